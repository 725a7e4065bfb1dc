//! Aggregation of folded thread stacks into counted totals and metrics.
//!
//! This module turns finalized thread-dump entries into:
//! - Collapsed stack format (for flamegraph generation)
//! - Per-state tallies
//! - Hot path analysis (most frequently observed stacks)

pub mod metrics;
pub mod stack_builder;

// Re-export main types and functions
pub use metrics::{
    calculate_hot_paths, calculate_sample_distribution, SampleDistribution, StateTally,
};
pub use stack_builder::{sort_by_count, CollapsedStack, StackAggregate};
