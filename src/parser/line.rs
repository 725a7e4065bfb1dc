//! Line classification for thread-dump text.
//!
//! Two dialects are recognized:
//! - `jstack`: `"name" ...` headers, `java.lang.Thread.State: X`, `at sig(...)` frames
//! - `jstack -F`: `Thread 42: (state = X)` headers, `- sig(...) @bci=...` frames

use super::patterns::{Matcher, PatternList};
use crate::utils::config::SKIP_LINE_PATTERNS;
use crate::utils::error::ConfigError;
use regex::Regex;

/// Which dialect declared a thread state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// `java.lang.Thread.State: RUNNABLE`
    Jstack,
    /// `Thread 123: (state = IN_NATIVE)`
    JstackForced,
}

/// What a single input line means to the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Comment,
    Blank,
    ThreadHeader { name: &'a str },
    StateDeclaration { token: &'a str, dialect: Dialect },
    Frame { signature: &'a str },
    Skip,
    Unrecognized,
}

/// Classifies lines in priority order
///
/// **Public** - owned by the dispatcher
#[derive(Debug, Clone)]
pub struct LineClassifier {
    header: Regex,
    thread_state: Regex,
    vm_state: Regex,
    at_frame: Regex,
    dash_frame: Regex,
    skip: PatternList,
}

impl LineClassifier {
    /// Compile the built-in line patterns
    pub fn new() -> Result<Self, ConfigError> {
        Ok(Self {
            header: compile(r#"^"([^"]*)"#)?,
            thread_state: compile(r"java\.lang\.Thread\.State: (\S+)")?,
            vm_state: compile(r"\(state = (\w+)\)")?,
            at_frame: compile(r"^\s*at\s+([^(]+?)\s*\(")?,
            // `- locked <0x...> (a ...)` style lines never reach a `(` before the `<`
            dash_frame: compile(r"^\s*-\s+([^(<]+?)\s*\(")?,
            skip: PatternList::compile(SKIP_LINE_PATTERNS.iter().copied())?,
        })
    }

    /// Classify one line (without its line terminator)
    ///
    /// **Public** - called once per input line
    pub fn classify<'a>(&self, line: &'a str) -> LineKind<'a> {
        if line.starts_with('#') {
            return LineKind::Comment;
        }

        if line.trim().is_empty() {
            return LineKind::Blank;
        }

        if let Some(name) = capture(&self.header, line) {
            return LineKind::ThreadHeader { name };
        }

        if let Some(token) = capture(&self.thread_state, line) {
            return LineKind::StateDeclaration {
                token,
                dialect: Dialect::Jstack,
            };
        }

        if let Some(token) = capture(&self.vm_state, line) {
            return LineKind::StateDeclaration {
                token,
                dialect: Dialect::JstackForced,
            };
        }

        if let Some(signature) =
            capture(&self.at_frame, line).or_else(|| capture(&self.dash_frame, line))
        {
            return LineKind::Frame { signature };
        }

        if self.skip.matches(line) {
            return LineKind::Skip;
        }

        LineKind::Unrecognized
    }
}

fn compile(pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

fn capture<'a>(re: &Regex, line: &'a str) -> Option<&'a str> {
    re.captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
