//! Ordered lists of compiled patterns.
//!
//! Collapse patterns, housekeeping thread names, frame cues and skip lines
//! are all data: a list of regexes queried through [`Matcher`].

use crate::utils::error::ConfigError;
use regex::Regex;

/// Anything that can answer "does this text match"
pub trait Matcher {
    fn matches(&self, text: &str) -> bool;
}

impl Matcher for Regex {
    fn matches(&self, text: &str) -> bool {
        self.is_match(text)
    }
}

/// A compiled pattern together with the literal it was compiled from
#[derive(Debug, Clone)]
pub struct Pattern {
    label: String,
    regex: Regex,
}

impl Pattern {
    /// Compile a single pattern
    ///
    /// **Public** - used by `PatternList::compile`
    pub fn new(label: impl Into<String>) -> Result<Self, ConfigError> {
        let label = label.into();
        let regex = Regex::new(&label).map_err(|source| ConfigError::InvalidPattern {
            pattern: label.clone(),
            source,
        })?;

        Ok(Self { label, regex })
    }

    /// The pattern text as configured
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Matcher for Pattern {
    fn matches(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// Ordered pattern list; earlier entries take priority
#[derive(Debug, Clone, Default)]
pub struct PatternList {
    patterns: Vec<Pattern>,
}

impl PatternList {
    /// Compile every pattern, failing on the first invalid one
    ///
    /// **Public** - main constructor
    ///
    /// # Errors
    /// * `ConfigError::InvalidPattern` - pattern is not a valid regex
    pub fn compile<I, S>(patterns: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns = patterns
            .into_iter()
            .map(Pattern::new)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    /// Index of the first pattern matching `text`
    pub fn first_match(&self, text: &str) -> Option<usize> {
        self.patterns.iter().position(|p| p.matches(text))
    }

    /// Label of the pattern at `index`
    pub fn label(&self, index: usize) -> Option<&str> {
        self.patterns.get(index).map(Pattern::label)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Matcher for PatternList {
    fn matches(&self, text: &str) -> bool {
        self.first_match(text).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_match_respects_order() {
        let list = PatternList::compile(["Foo", "Foo\\.bar", "baz"]).unwrap();

        assert_eq!(list.first_match("com.Foo.bar"), Some(0));
        assert_eq!(list.first_match("baz"), Some(2));
        assert_eq!(list.first_match("qux"), None);
        assert_eq!(list.label(1), Some("Foo\\.bar"));
    }

    #[test]
    fn test_invalid_pattern_reports_label() {
        let err = PatternList::compile(["ok", "bad["]).unwrap_err();
        match err {
            ConfigError::InvalidPattern { pattern, .. } => assert_eq!(pattern, "bad["),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_list_matches_nothing() {
        let list = PatternList::default();
        assert!(list.is_empty());
        assert!(!list.matches("anything"));
    }
}
