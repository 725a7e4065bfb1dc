//! Aggregate folded stacks into counted totals.
//!
//! Collapsed stacks are the input format for flamegraph generation.
//! Format: "root;child;leaf count"
//!
//! Example: "main;java.lang.Thread.run;com.example.Worker.loop 12"
//! This means: the path was observed in 12 thread-dump entries.

use log::debug;
use std::collections::HashMap;

/// A single collapsed stack entry
///
/// **Public** - used by output writers and the flamegraph generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollapsedStack {
    /// Stack trace as semicolon-separated string
    pub stack: String,

    /// Number of thread-dump entries with this stack
    pub count: u64,
}

impl CollapsedStack {
    /// Create a new collapsed stack
    ///
    /// **Public** - constructor
    pub fn new(stack: impl Into<String>, count: u64) -> Self {
        Self {
            stack: stack.into(),
            count,
        }
    }

    /// Render as a folded line: `"<stack> <count>"`
    pub fn to_line(&self) -> String {
        format!("{} {}", self.stack, self.count)
    }
}

/// Run-wide stack → count table
///
/// **Public** - owned by the dispatcher for the duration of a run
///
/// Entries are only ever created or incremented.
#[derive(Debug, Clone, Default)]
pub struct StackAggregate {
    counts: HashMap<String, u64>,
}

impl StackAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more occurrence of `stack`
    pub fn increment(&mut self, stack: impl Into<String>) {
        *self.counts.entry(stack.into()).or_insert(0) += 1;
    }

    /// Sum another aggregate into this one
    ///
    /// **Public** - combines per-input aggregates
    pub fn merge(&mut self, other: StackAggregate) {
        for (stack, count) in other.counts {
            *self.counts.entry(stack).or_insert(0) += count;
        }
    }

    /// Occurrences recorded for `stack`
    pub fn get(&self, stack: &str) -> u64 {
        self.counts.get(stack).copied().unwrap_or(0)
    }

    /// Number of distinct stacks
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total occurrences across all stacks
    pub fn total_samples(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Produce all stacks sorted ascending by key (byte order)
    ///
    /// **Public** - the primary output of a run
    pub fn finalize(&self) -> Vec<CollapsedStack> {
        let mut stacks: Vec<CollapsedStack> = self
            .counts
            .iter()
            .map(|(stack, count)| CollapsedStack::new(stack.clone(), *count))
            .collect();

        stacks.sort_by(|a, b| a.stack.cmp(&b.stack));

        debug!("Finalized {} unique collapsed stacks", stacks.len());

        stacks
    }
}

/// Sort stacks hottest first, ties broken by key
///
/// **Public** - used for hot paths and text summaries
pub fn sort_by_count(stacks: &[CollapsedStack]) -> Vec<CollapsedStack> {
    let mut sorted = stacks.to_vec();
    sorted.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.stack.cmp(&b.stack)));
    sorted
}
