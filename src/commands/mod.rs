//! CLI command implementations.
//!
//! Commands orchestrate the various library components to perform user tasks.

pub mod collapse;
pub mod models;
pub mod utils;

// Re-export main command functions
pub use collapse::{collapse_sources, execute_collapse, validate_args};
pub use models::CollapseArgs;
pub use utils::{display_version, validate_profile_file};
