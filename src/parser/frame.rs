//! Frame display transforms: collapse patterns and package shortening.

use super::patterns::PatternList;
use crate::utils::config::{CollapseConfig, COLLAPSED_SUFFIX};
use crate::utils::error::ConfigError;
use regex::Regex;

/// A frame ready to be pushed onto a thread block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameEntry {
    /// Display text
    pub text: String,

    /// Index of the collapse pattern that produced this frame, if any
    pub collapsed_by: Option<usize>,
}

impl FrameEntry {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            collapsed_by: None,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed_by.is_some()
    }
}

/// Turns raw frame signatures into display frames
///
/// **Public** - owned by the dispatcher
#[derive(Debug, Clone)]
pub struct FrameTransformer {
    collapse: PatternList,
    shorten_packages: bool,
    /// Splits `pkg.path.` from the trailing `Class.method`
    package_split: Regex,
    package_word: Regex,
}

impl FrameTransformer {
    /// Compile the transformer for a run
    ///
    /// # Errors
    /// * `ConfigError::InvalidPattern` - a collapse pattern is not a valid regex
    pub fn new(config: &CollapseConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            collapse: PatternList::compile(config.collapse_patterns.iter().cloned())?,
            shorten_packages: config.shorten_packages,
            package_split: Regex::new(r"^(.*\.)([^.]+\.[^.]+)$").map_err(|source| {
                ConfigError::InvalidPattern {
                    pattern: "package split".to_string(),
                    source,
                }
            })?,
            package_word: Regex::new(r"(\w)\w*").map_err(|source| {
                ConfigError::InvalidPattern {
                    pattern: "package word".to_string(),
                    source,
                }
            })?,
        })
    }

    /// Transform one raw signature
    ///
    /// **Public** - called for every frame line
    ///
    /// A matching collapse pattern replaces the frame with `<pattern>...`;
    /// otherwise the frame is optionally package-shortened.
    pub fn transform(&self, signature: &str) -> FrameEntry {
        let collapsed_by = self.collapse.first_match(signature);

        if let Some(label) = collapsed_by.and_then(|index| self.collapse.label(index)) {
            return FrameEntry {
                text: format!("{}{}", label, COLLAPSED_SUFFIX),
                collapsed_by,
            };
        }

        if self.shorten_packages {
            FrameEntry::plain(self.shorten(signature))
        } else {
            FrameEntry::plain(signature)
        }
    }

    /// Abbreviate every package word to its first character
    ///
    /// Signatures without at least `pkg.Class.method` pass through unchanged.
    pub fn shorten(&self, signature: &str) -> String {
        let Some(caps) = self.package_split.captures(signature) else {
            return signature.to_string();
        };

        let (Some(packages), Some(class_method)) = (caps.get(1), caps.get(2)) else {
            return signature.to_string();
        };

        let short = self.package_word.replace_all(packages.as_str(), "$1");
        format!("{}{}", short, class_method.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transformer(config: CollapseConfig) -> FrameTransformer {
        FrameTransformer::new(&config).unwrap()
    }

    #[test]
    fn test_passthrough_by_default() {
        let t = transformer(CollapseConfig::default());
        assert_eq!(
            t.transform("java.lang.Thread.run"),
            FrameEntry::plain("java.lang.Thread.run")
        );
    }

    #[test]
    fn test_shorten_packages() {
        let t = transformer(CollapseConfig::new().with_shorten_packages(true));

        assert_eq!(
            t.transform("com.google.common.collect.ImmutableMap$Builder.put").text,
            "c.g.c.c.ImmutableMap$Builder.put"
        );
        assert_eq!(t.transform("java.lang.Thread.run").text, "j.l.Thread.run");
    }

    #[test]
    fn test_shorten_leaves_short_signatures() {
        let t = transformer(CollapseConfig::new().with_shorten_packages(true));
        assert_eq!(t.transform("Worker.run").text, "Worker.run");
        assert_eq!(t.transform("main").text, "main");
    }

    #[test]
    fn test_collapse_wins_over_shortening() {
        let t = transformer(
            CollapseConfig::new()
                .with_shorten_packages(true)
                .with_collapse_pattern("org.eclipse.jetty")
                .with_collapse_pattern("jetty"),
        );

        let entry = t.transform("org.eclipse.jetty.server.Server.handle");
        assert_eq!(entry.text, "org.eclipse.jetty...");
        assert_eq!(entry.collapsed_by, Some(0));
        assert!(entry.is_collapsed());
    }

    #[test]
    fn test_collapse_reports_pattern_index() {
        let t = transformer(
            CollapseConfig::new()
                .with_collapse_pattern("^java\\.util")
                .with_collapse_pattern("Reflect"),
        );

        assert_eq!(
            t.transform("jdk.internal.reflect.NativeMethodAccessorImpl.invoke0").collapsed_by,
            None
        );
        assert_eq!(
            t.transform("java.lang.reflect.Method.invoke").collapsed_by,
            None
        );
        assert_eq!(
            t.transform("sun.reflect.GeneratedMethodAccessor1.Reflect").collapsed_by,
            Some(1)
        );
        assert_eq!(t.transform("java.util.HashMap.get").collapsed_by, Some(0));
    }
}
