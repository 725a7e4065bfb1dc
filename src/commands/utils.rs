use crate::output::read_profile;
use crate::utils::config::SCHEMA_VERSION;
use anyhow::{Context, Result};
use std::path::Path;

/// Validate a profile JSON file
pub fn validate_profile_file(file_path: &Path) -> Result<()> {
    println!("Validating profile: {}", file_path.display());

    let profile = read_profile(file_path)
        .with_context(|| format!("Invalid profile: {}", file_path.display()))?;

    if profile.version != SCHEMA_VERSION {
        log::warn!(
            "Profile schema v{} differs from current v{}",
            profile.version,
            SCHEMA_VERSION
        );
    }

    println!("✓ Valid profile JSON");
    println!("  Version: {}", profile.version);
    println!("  Inputs: {}", profile.inputs.join(", "));
    println!("  Total Samples: {}", profile.total_samples);
    println!("  Unique Stacks: {}", profile.unique_stacks);
    println!("  States: {}", profile.included_states.join(", "));
    println!("  Hot Paths: {}", profile.hot_paths.len());

    Ok(())
}

/// Display version information
pub fn display_version() {
    println!("jstack-flame v{}", env!("CARGO_PKG_VERSION"));
    println!("Profile Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Folds Java thread dumps into flamegraph-ready collapsed stacks.");
}
