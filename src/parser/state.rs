//! Thread state inference.
//!
//! A dump reports many threads as RUNNABLE that are really parked in the
//! kernel (epoll, accept) or doing JVM housekeeping. The classifier combines
//! the declared state with thread-name and frame cues:
//!
//! - a declared state is *gated*: it only applies while the state is unknown
//! - name and frame cues are *forced*: they always apply, last one wins

use super::line::Dialect;
use super::patterns::{Matcher, PatternList};
use crate::utils::config::{
    BACKGROUND_THREAD_PATTERNS, IO_WAIT_FRAME_PATTERNS, NETWORK_FRAME_PATTERNS,
    NETWORK_WAIT_FRAME_PATTERNS, STATE_BACKGROUND, STATE_NETWORK, STATE_NETWORK_WAITING,
    STATE_RUNNABLE, STATE_WAITING,
};
use crate::utils::error::ConfigError;
use std::fmt;

/// Inferred state of one thread-dump entry
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ThreadState {
    #[default]
    Unknown,
    Known(String),
}

impl ThreadState {
    pub fn known(label: impl Into<String>) -> Self {
        Self::Known(label.into())
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// The state label, `None` while unknown
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Unknown => None,
            Self::Known(label) => Some(label.as_str()),
        }
    }
}

impl fmt::Display for ThreadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label().unwrap_or("?"))
    }
}

/// A textual hint about a thread's state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateCue<'a> {
    /// Explicit state line
    Declared { token: &'a str, dialect: Dialect },
    /// Raw thread name from the header
    ThreadName(&'a str),
    /// Raw frame signature
    Frame(&'a str),
}

/// Outcome of evaluating one cue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateUpdate {
    /// No rule fired
    Keep,
    /// Apply only if the state is still unknown
    Gated(String),
    /// Apply unconditionally
    Forced(&'static str),
}

impl StateUpdate {
    /// Apply this update to `current`
    ///
    /// **Public** - the precedence policy in one place
    pub fn apply(self, current: ThreadState) -> ThreadState {
        match self {
            StateUpdate::Keep => current,
            StateUpdate::Gated(label) if current.is_unknown() => ThreadState::Known(label),
            StateUpdate::Gated(_) => current,
            StateUpdate::Forced(label) => ThreadState::known(label),
        }
    }
}

/// Map a declared state token to the label used for filtering
///
/// **Public** - the `jstack -F` dialect reports VM-internal states
///
/// `jstack` tokens pass through unchanged.
pub fn normalize_declared(token: &str, dialect: Dialect) -> &str {
    match dialect {
        Dialect::Jstack => token,
        Dialect::JstackForced => match token {
            "BLOCKED" => STATE_WAITING,
            "IN_JAVA" | "IN_NATIVE" | "IN_NATIVE_TRANS" | "IN_VM" => STATE_RUNNABLE,
            other => other,
        },
    }
}

/// Rule set for state inference
///
/// **Public** - owned by the dispatcher
#[derive(Debug, Clone)]
pub struct StateClassifier {
    background_threads: PatternList,
    /// Evaluated in order; the last matching rule wins
    frame_rules: Vec<(PatternList, &'static str)>,
}

impl StateClassifier {
    /// Compile the built-in cue tables
    pub fn new() -> Result<Self, ConfigError> {
        let frame_rules = vec![
            (PatternList::compile(IO_WAIT_FRAME_PATTERNS.iter().copied())?, STATE_WAITING),
            (
                PatternList::compile(NETWORK_WAIT_FRAME_PATTERNS.iter().copied())?,
                STATE_NETWORK_WAITING,
            ),
            (PatternList::compile(NETWORK_FRAME_PATTERNS.iter().copied())?, STATE_NETWORK),
        ];

        Ok(Self {
            background_threads: PatternList::compile(BACKGROUND_THREAD_PATTERNS.iter().copied())?,
            frame_rules,
        })
    }

    /// Decide which rule, if any, a cue triggers
    pub fn evaluate(&self, cue: StateCue<'_>) -> StateUpdate {
        match cue {
            StateCue::Declared { token, dialect } => {
                StateUpdate::Gated(normalize_declared(token, dialect).to_string())
            }
            StateCue::ThreadName(name) => {
                if self.background_threads.matches(name) {
                    StateUpdate::Forced(STATE_BACKGROUND)
                } else {
                    StateUpdate::Keep
                }
            }
            StateCue::Frame(signature) => self
                .frame_rules
                .iter()
                .rev()
                .find(|(patterns, _)| patterns.matches(signature))
                .map_or(StateUpdate::Keep, |(_, label)| StateUpdate::Forced(*label)),
        }
    }

    /// Pure transition: `(current, cue) -> new state`
    ///
    /// **Public** - used by the thread block accumulator
    pub fn classify(&self, current: ThreadState, cue: StateCue<'_>) -> ThreadState {
        self.evaluate(cue).apply(current)
    }
}
