//! Output JSON schema definitions for profile data.
//!
//! This module defines the structure of JSON files we write to disk.
//! Schema is versioned to allow future evolution.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Top-level profile structure written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Schema version for compatibility checking
    pub version: String,

    /// Input sources that were collapsed ("-" for stdin)
    pub inputs: Vec<String>,

    /// Thread-dump entries that reached the aggregate
    pub total_samples: u64,

    /// Number of distinct folded stacks
    pub unique_stacks: usize,

    /// States whose stacks were aggregated
    pub included_states: Vec<String>,

    /// Entries per final state (only with `--stats`)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub state_tally: BTreeMap<String, u64>,

    /// Top hot paths (ranked by sample count)
    pub hot_paths: Vec<HotPath>,

    /// Timestamp when profile was generated
    pub generated_at: String,
}

/// A hot path: folded stack with its sample count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotPath {
    /// Folded stack (e.g., "main;java.lang.Thread.run;Worker.loop")
    pub stack: String,

    /// Thread-dump entries with this stack
    pub samples: u64,

    /// Percentage of all samples
    pub percentage: f64,
}
