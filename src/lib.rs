//! jstack-flame
//!
//! Folds Java thread dumps (`jstack` and `jstack -F` output) into
//! collapsed stacks for flamegraph rendering.
//!
//! Many dumps taken at intervals approximate a sampling profiler: every
//! thread-dump entry judged to be on-CPU counts as one sample of its stack.
//!
//! ## Getting Started
//!
//! ```bash
//! jstack-flame collapse dumps.txt > out.folded
//! jstack-flame collapse dumps.txt --flamegraph profile.svg --stats
//! ```
//!
//! Programmatic use goes through [`parser::StackCollapser`] or
//! [`parser::collapse_lines`].

pub mod aggregator;
pub mod commands;
pub mod flamegraph;
pub mod input;
pub mod output;
pub mod parser;
pub mod utils;
