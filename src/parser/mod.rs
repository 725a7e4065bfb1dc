//! Thread-dump parsing and schema definitions.
//!
//! This module handles:
//! - Classifying raw dump lines (two jstack dialects)
//! - Inferring thread states from declared states and textual cues
//! - Transforming frames (collapse patterns, package shortening)
//! - Accumulating and folding per-thread blocks
//! - Defining the JSON profile schema

pub mod frame;
pub mod jstack;
pub mod line;
pub mod patterns;
pub mod schema;
pub mod state;
pub mod thread_block;

// Re-export main types
pub use frame::{FrameEntry, FrameTransformer};
pub use jstack::{collapse_lines, to_profile, CollapseOutput, LineStats, StackCollapser};
pub use line::{Dialect, LineClassifier, LineKind};
pub use patterns::{Matcher, PatternList};
pub use schema::{HotPath, Profile};
pub use state::{StateClassifier, StateCue, StateUpdate, ThreadState};
pub use thread_block::ThreadBlock;
