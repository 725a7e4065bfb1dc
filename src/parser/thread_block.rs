//! Accumulator for a single thread-dump entry.
//!
//! Frames arrive leaf first; they are kept in arrival order and reversed
//! once when the block is folded.

use super::frame::FrameEntry;
use super::state::{StateClassifier, StateCue, ThreadState};
use crate::utils::config::{CollapseConfig, STACK_SEPARATOR};

/// In-progress state of one thread-dump entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreadBlock {
    /// Display name, if recorded
    pub name: Option<String>,

    /// Inferred state so far
    pub state: ThreadState,

    /// Frames in arrival order (leaf first)
    frames: Vec<FrameEntry>,
}

impl ThreadBlock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a thread header line
    ///
    /// **Public** - the raw name always feeds the state cues, even when the
    /// name itself is not recorded.
    pub fn record_header(&mut self, raw_name: &str, config: &CollapseConfig, states: &StateClassifier) {
        if config.include_thread_name {
            let name = if config.include_thread_id {
                raw_name
            } else {
                strip_thread_id(raw_name)
            };
            if !name.is_empty() {
                self.name = Some(name.to_string());
            }
        }

        self.apply_cue(StateCue::ThreadName(raw_name), states);
    }

    /// Run one cue through the classifier
    pub fn apply_cue(&mut self, cue: StateCue<'_>, states: &StateClassifier) {
        let current = std::mem::take(&mut self.state);
        self.state = states.classify(current, cue);
    }

    /// Add a frame on the root side of the stack
    ///
    /// A collapsed frame is dropped when the previous frame was collapsed by
    /// the same pattern.
    pub fn push_frame(&mut self, entry: FrameEntry) {
        if entry.is_collapsed() {
            if let Some(last) = self.frames.last() {
                if last.collapsed_by == entry.collapsed_by {
                    return;
                }
            }
        }
        self.frames.push(entry);
    }

    /// Number of recorded frames (after collapse de-duplication)
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// True if nothing was recorded for this entry
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty() && self.name.is_none() && self.state.is_unknown()
    }

    /// Fold into a `name;root;...;leaf` key
    ///
    /// **Public** - called on block finalization
    ///
    /// Returns `None` when there is nothing to aggregate.
    pub fn folded(&self) -> Option<String> {
        let mut parts: Vec<&str> = Vec::with_capacity(self.frames.len() + 1);

        if let Some(name) = &self.name {
            parts.push(name);
        }
        parts.extend(self.frames.iter().rev().map(|f| f.text.as_str()));

        let key = parts.join(STACK_SEPARATOR);
        if key.is_empty() {
            None
        } else {
            Some(key)
        }
    }
}

/// Strip a trailing `-<digits>` from a thread name
///
/// **Public** - `pool-3-thread-7` becomes `pool-3-thread`
pub fn strip_thread_id(name: &str) -> &str {
    let without_digits = name.trim_end_matches(|c: char| c.is_ascii_digit());
    if without_digits.len() == name.len() {
        return name;
    }
    without_digits.strip_suffix('-').unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collapsed(text: &str, pattern: usize) -> FrameEntry {
        FrameEntry {
            text: text.to_string(),
            collapsed_by: Some(pattern),
        }
    }

    #[test]
    fn test_strip_thread_id() {
        assert_eq!(strip_thread_id("pool-3-thread-7"), "pool-3-thread");
        assert_eq!(strip_thread_id("Thread-12"), "Thread");
        assert_eq!(strip_thread_id("main"), "main");
        assert_eq!(strip_thread_id("worker7"), "worker7");
        assert_eq!(strip_thread_id("trailing-"), "trailing-");
    }

    #[test]
    fn test_header_name_handling() {
        let states = StateClassifier::new().unwrap();

        let mut block = ThreadBlock::new();
        block.record_header("pool-3-thread-7", &CollapseConfig::default(), &states);
        assert_eq!(block.name.as_deref(), Some("pool-3-thread"));

        let mut block = ThreadBlock::new();
        block.record_header("pool-3-thread-7", &CollapseConfig::new().with_thread_id(true), &states);
        assert_eq!(block.name.as_deref(), Some("pool-3-thread-7"));

        let mut block = ThreadBlock::new();
        block.record_header("Signal Dispatcher", &CollapseConfig::new().with_thread_name(false), &states);
        assert_eq!(block.name, None);
        assert_eq!(block.state, ThreadState::known("BACKGROUND"));
    }

    #[test]
    fn test_empty_header_name_not_recorded() {
        let states = StateClassifier::new().unwrap();

        let mut block = ThreadBlock::new();
        block.record_header("", &CollapseConfig::default(), &states);
        block.push_frame(FrameEntry::plain("X.y"));

        assert_eq!(block.name, None);
        assert_eq!(block.folded().as_deref(), Some("X.y"));
    }

    #[test]
    fn test_folded_is_root_first() {
        let mut block = ThreadBlock::new();
        block.name = Some("Worker".to_string());
        block.push_frame(FrameEntry::plain("a.b.C.m1"));
        block.push_frame(FrameEntry::plain("a.b.C.m2"));

        assert_eq!(block.folded().as_deref(), Some("Worker;a.b.C.m2;a.b.C.m1"));
    }

    #[test]
    fn test_adjacent_same_pattern_collapses() {
        let mut block = ThreadBlock::new();
        block.push_frame(FrameEntry::plain("leaf"));
        block.push_frame(collapsed("reflect...", 0));
        block.push_frame(collapsed("reflect...", 0));
        block.push_frame(collapsed("jetty...", 1));
        block.push_frame(collapsed("reflect...", 0));
        block.push_frame(FrameEntry::plain("root"));

        assert_eq!(block.depth(), 5);
        assert_eq!(
            block.folded().as_deref(),
            Some("root;reflect...;jetty...;reflect...;leaf")
        );
    }

    #[test]
    fn test_plain_frames_never_deduplicated() {
        let mut block = ThreadBlock::new();
        block.push_frame(FrameEntry::plain("Foo.recurse"));
        block.push_frame(FrameEntry::plain("Foo.recurse"));
        assert_eq!(block.depth(), 2);
    }

    #[test]
    fn test_empty_block_folds_to_none() {
        let block = ThreadBlock::new();
        assert!(block.is_empty());
        assert_eq!(block.folded(), None);
    }

    #[test]
    fn test_name_only_block() {
        let mut block = ThreadBlock::new();
        block.name = Some("idle".to_string());
        assert_eq!(block.folded().as_deref(), Some("idle"));
    }
}
