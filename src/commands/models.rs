use crate::flamegraph::FlamegraphConfig;
use crate::utils::config::{CollapseConfig, DEFAULT_TOP_PATHS};
use std::path::PathBuf;

/// Arguments for the collapse command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct CollapseArgs {
    /// Thread dump files; empty or `-` means stdin
    pub inputs: Vec<PathBuf>,

    /// Resolved collapse configuration
    pub config: CollapseConfig,

    /// Folded output file (stdout if None)
    pub output: Option<PathBuf>,

    /// Output path for SVG flamegraph (optional)
    pub output_svg: Option<PathBuf>,

    /// Flamegraph configuration
    pub flamegraph_config: Option<FlamegraphConfig>,

    /// Output path for JSON profile (optional)
    pub output_json: Option<PathBuf>,

    /// Number of top hot paths to include in profile and summary
    pub top_paths: usize,

    /// Print text summary to stderr
    pub print_summary: bool,
}

impl Default for CollapseArgs {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            config: CollapseConfig::default(),
            output: None,
            output_svg: None,
            flamegraph_config: None,
            output_json: None,
            top_paths: DEFAULT_TOP_PATHS,
            print_summary: false,
        }
    }
}
