//! Configuration and constants for the CLI.

use super::error::ConfigError;
use std::collections::HashSet;

/// Current output schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Default number of hot paths kept in a JSON profile
pub const DEFAULT_TOP_PATHS: usize = 20;

/// Default flamegraph width in pixels
pub const DEFAULT_FLAMEGRAPH_WIDTH: usize = 1200;

/// States whose stacks are aggregated when no `--state` is given
pub const DEFAULT_STATES: &[&str] = &["RUNNABLE"];

/// Separator between frames in a folded stack
pub const STACK_SEPARATOR: &str = ";";

/// Appended to a collapse label to form its placeholder frame
pub const COLLAPSED_SUFFIX: &str = "...";

// Pseudo-states produced by the heuristics (never printed by the JVM itself)
pub const STATE_BACKGROUND: &str = "BACKGROUND";
pub const STATE_NETWORK: &str = "NETWORK";
pub const STATE_NETWORK_WAITING: &str = "NETWORK_WAITING";
pub const STATE_RUNNABLE: &str = "RUNNABLE";
pub const STATE_WAITING: &str = "WAITING";

// JVM housekeeping threads. Matched against the raw thread name.
pub const BACKGROUND_THREAD_PATTERNS: &[&str] = &[
    r"CompilerThread\d*",
    "Surrogate Locker Thread",
    "Signal Dispatcher",
    "Service Thread",
    "Attach Listener",
    "DestroyJavaVM",
];

// Frame cues, matched against the raw frame signature
pub const IO_WAIT_FRAME_PATTERNS: &[&str] = &["epollWait", r"EPoll\.wait"];
pub const NETWORK_WAIT_FRAME_PATTERNS: &[&str] = &[r"socketAccept$", r"Socket.*accept0$"];
pub const NETWORK_FRAME_PATTERNS: &[&str] = &[
    r"socketRead0$",
    r"socketRecv",
    r"SocketDispatcher\.read0$",
];

// Info lines that carry no stack semantics
pub const SKIP_LINE_PATTERNS: &[&str] = &[
    r"^\s*-",
    r"^\d{4}-\d{2}-\d{2}",
    r"^Full thread dump",
    r"^\s*Locked ownable synchronizers:",
    r"^JNI global references:",
    r"^Attaching to process ID",
    r"^Debugger attached successfully",
    r"^(Server|Client) compiler detected",
    r"^JVM version is",
    r"^Deadlock Detection:",
    r"^No deadlocks found",
];

/// Resolved configuration for one collapse run
///
/// **Public** - built by the CLI, consumed by the dispatcher
///
/// Immutable once the run starts.
#[derive(Debug, Clone)]
pub struct CollapseConfig {
    /// Prefix each stack with the thread name
    pub include_thread_name: bool,

    /// Keep the trailing `-<digits>` of thread names
    pub include_thread_id: bool,

    /// Abbreviate package names to their first letters
    pub shorten_packages: bool,

    /// Ordered collapse patterns; first match wins
    pub collapse_patterns: Vec<String>,

    /// States whose stacks are aggregated
    pub included_states: HashSet<String>,

    /// Suppress warnings about unrecognized lines
    pub quiet: bool,

    /// Keep a per-state tally of thread-dump entries
    pub stats: bool,
}

impl Default for CollapseConfig {
    fn default() -> Self {
        Self {
            include_thread_name: true,
            include_thread_id: false,
            shorten_packages: false,
            collapse_patterns: Vec::new(),
            included_states: DEFAULT_STATES.iter().map(|s| s.to_string()).collect(),
            quiet: false,
            stats: false,
        }
    }
}

impl CollapseConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_thread_name(mut self, include: bool) -> Self {
        self.include_thread_name = include;
        self
    }

    pub fn with_thread_id(mut self, include: bool) -> Self {
        self.include_thread_id = include;
        self
    }

    pub fn with_shorten_packages(mut self, shorten: bool) -> Self {
        self.shorten_packages = shorten;
        self
    }

    pub fn with_collapse_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.collapse_patterns.push(pattern.into());
        self
    }

    /// Replace the included state set
    ///
    /// An empty iterator leaves the default set in place.
    pub fn with_states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let states: HashSet<String> = states.into_iter().map(Into::into).collect();
        if !states.is_empty() {
            self.included_states = states;
        }
        self
    }

    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn with_stats(mut self, stats: bool) -> Self {
        self.stats = stats;
        self
    }

    /// Whether blocks finalized in `state` reach the aggregate
    pub fn is_included(&self, state: &str) -> bool {
        self.included_states.contains(state)
    }

    /// Check the configuration before any input is read
    ///
    /// **Public** - called by the dispatcher constructor
    ///
    /// # Errors
    /// * `ConfigError::EmptyState` - a blank `--state` value
    /// * `ConfigError::InvalidPattern` - a collapse pattern that is not a valid regex
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.included_states.iter().any(|s| s.trim().is_empty()) {
            return Err(ConfigError::EmptyState);
        }

        for pattern in &self.collapse_patterns {
            regex::Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })?;
        }

        Ok(())
    }
}
