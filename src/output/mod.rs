//! Output writers for folded stacks, profiles and flamegraphs.
//!
//! This module handles writing data in various formats:
//! - Folded stacks (stdout or file)
//! - JSON profiles
//! - SVG flamegraphs

pub mod folded;
pub mod json;
pub mod svg;

use crate::utils::error::OutputError;
use log::debug;
use std::path::Path;

// Re-export main functions
pub use folded::{write_folded, write_folded_file, write_state_tally};
pub use json::{read_profile, write_profile};
pub use svg::write_svg;

/// Validate an output path and create its parent directories
///
/// **Private** - shared by all file writers
fn prepare_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    // Check if we're trying to overwrite a directory
    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}
