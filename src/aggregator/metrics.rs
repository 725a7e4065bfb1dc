//! Calculate per-state tallies, hot paths and sample statistics.
//!
//! Hot paths are the stacks seen in the most thread-dump entries.
//! These are the primary targets for optimization.

use super::stack_builder::{sort_by_count, CollapsedStack};
use crate::parser::schema::HotPath;
use log::debug;
use std::collections::{BTreeMap, HashMap};

/// Count of thread-dump entries per final state
///
/// **Public** - recorded when `--stats` is set
///
/// Every finalized entry with a known state is counted, whether or not its
/// state is included in the aggregate.
#[derive(Debug, Clone, Default)]
pub struct StateTally {
    counts: HashMap<String, u64>,
}

impl StateTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, state: &str) {
        *self.counts.entry(state.to_string()).or_insert(0) += 1;
    }

    pub fn merge(&mut self, other: StateTally) {
        for (state, count) in other.counts {
            *self.counts.entry(state).or_insert(0) += count;
        }
    }

    pub fn get(&self, state: &str) -> u64 {
        self.counts.get(state).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// States and counts sorted ascending by state
    pub fn finalize(&self) -> Vec<(String, u64)> {
        let mut states: Vec<(String, u64)> = self
            .counts
            .iter()
            .map(|(state, count)| (state.clone(), *count))
            .collect();
        states.sort();
        states
    }

    /// Sorted view used by the JSON profile
    pub fn to_map(&self) -> BTreeMap<String, u64> {
        self.counts.iter().map(|(k, v)| (k.clone(), *v)).collect()
    }
}

/// Calculate hot paths from collapsed stacks
///
/// **Public** - main entry point for metrics calculation
///
/// # Arguments
/// * `stacks` - Collapsed stacks from the aggregate
/// * `total_samples` - Total samples across all stacks
/// * `top_n` - Number of top paths to return (e.g., 10)
///
/// # Returns
/// Vector of hot paths, sorted by sample count (descending)
pub fn calculate_hot_paths(
    stacks: &[CollapsedStack],
    total_samples: u64,
    top_n: usize,
) -> Vec<HotPath> {
    debug!("Calculating top {} hot paths from {} stacks", top_n, stacks.len());

    sort_by_count(stacks)
        .iter()
        .take(top_n)
        .map(|stack| create_hot_path(stack, total_samples))
        .collect()
}

/// Create a HotPath from a CollapsedStack
///
/// **Public** - internal conversion, exposed for tests
pub fn create_hot_path(stack: &CollapsedStack, total_samples: u64) -> HotPath {
    let percentage = if total_samples > 0 {
        (stack.count as f64 / total_samples as f64) * 100.0
    } else {
        0.0
    };

    HotPath {
        stack: stack.stack.clone(),
        samples: stack.count,
        percentage,
    }
}

/// Calculate sample distribution statistics
///
/// **Public** - provides summary statistics
pub fn calculate_sample_distribution(stacks: &[CollapsedStack]) -> SampleDistribution {
    if stacks.is_empty() {
        return SampleDistribution::default();
    }

    let total: u64 = stacks.iter().map(|s| s.count).sum();
    let count = stacks.len();
    let mean = total as f64 / count as f64;

    let mut counts: Vec<u64> = stacks.iter().map(|s| s.count).collect();
    counts.sort_unstable();
    let median = counts.get(counts.len() / 2).copied().unwrap_or(0);

    // Top 10% of stacks, hottest first
    let top_10_percent_count = (count as f64 * 0.1).ceil() as usize;
    let top_10_percent_samples: u64 = counts.iter().rev().take(top_10_percent_count).sum();

    SampleDistribution {
        total_samples: total,
        stack_count: count,
        mean_samples_per_stack: mean,
        median_samples_per_stack: median,
        top_10_percent_samples,
        top_10_percent_percentage: if total > 0 {
            (top_10_percent_samples as f64 / total as f64) * 100.0
        } else {
            0.0
        },
    }
}

/// Sample distribution statistics
///
/// **Public** - returned from calculate_sample_distribution
#[derive(Debug, Clone, Default)]
pub struct SampleDistribution {
    /// Total samples across all stacks
    pub total_samples: u64,

    /// Number of unique stacks
    pub stack_count: usize,

    pub mean_samples_per_stack: f64,

    pub median_samples_per_stack: u64,

    /// Samples in the hottest 10% of stacks
    pub top_10_percent_samples: u64,

    /// Percentage of all samples in the hottest 10%
    pub top_10_percent_percentage: f64,
}

impl SampleDistribution {
    /// Returns true if the hottest 10% of stacks hold >80% of samples
    pub fn is_highly_concentrated(&self) -> bool {
        self.top_10_percent_percentage > 80.0
    }

    /// Get human-readable summary
    ///
    /// **Public** - for logging and debugging
    pub fn summary(&self) -> String {
        format!(
            "Total: {} samples | Stacks: {} | Mean: {:.1} | Median: {} | Top 10%: {:.1}%",
            self.total_samples,
            self.stack_count,
            self.mean_samples_per_stack,
            self.median_samples_per_stack,
            self.top_10_percent_percentage
        )
    }
}
