//! Dispatcher for jstack thread dumps.
//!
//! Reads lines in arrival order, keeps exactly one [`ThreadBlock`] in scope
//! and folds it into the aggregate at every blank line and at end of input.

use super::frame::FrameTransformer;
use super::line::{LineClassifier, LineKind};
use super::schema::Profile;
use super::state::{StateClassifier, StateCue};
use super::thread_block::ThreadBlock;
use crate::aggregator::{calculate_hot_paths, StackAggregate, StateTally};
use crate::utils::config::{CollapseConfig, SCHEMA_VERSION};
use crate::utils::error::ConfigError;
use log::{debug, warn};

/// Line counters for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineStats {
    pub lines: u64,
    pub blocks: u64,
    pub frames: u64,
    pub skipped: u64,
    pub unrecognized: u64,
}

impl LineStats {
    fn merge(&mut self, other: LineStats) {
        self.lines += other.lines;
        self.blocks += other.blocks;
        self.frames += other.frames;
        self.skipped += other.skipped;
        self.unrecognized += other.unrecognized;
    }
}

/// Everything a run produces
#[derive(Debug, Clone, Default)]
pub struct CollapseOutput {
    pub stacks: StackAggregate,

    /// Present only when `stats` is enabled
    pub state_tally: Option<StateTally>,

    pub line_stats: LineStats,
}

impl CollapseOutput {
    /// Combine the output of another input source
    ///
    /// **Public** - inputs are collapsed independently, then merged
    pub fn merge(&mut self, other: CollapseOutput) {
        self.stacks.merge(other.stacks);
        match (&mut self.state_tally, other.state_tally) {
            (Some(mine), Some(theirs)) => mine.merge(theirs),
            (None, Some(theirs)) => self.state_tally = Some(theirs),
            _ => {}
        }
        self.line_stats.merge(other.line_stats);
    }
}

/// Per-line state machine turning thread dumps into folded stacks
///
/// **Public** - main entry point of the core
///
/// # Example
/// ```ignore
/// let config = CollapseConfig::default();
/// let mut collapser = StackCollapser::new(&config)?;
/// for line in dump.lines() {
///     collapser.process_line(line);
/// }
/// let output = collapser.finish();
/// ```
pub struct StackCollapser<'a> {
    config: &'a CollapseConfig,
    lines: LineClassifier,
    states: StateClassifier,
    frames: FrameTransformer,
    block: ThreadBlock,
    aggregate: StackAggregate,
    tally: Option<StateTally>,
    line_stats: LineStats,
}

impl<'a> StackCollapser<'a> {
    /// Validate the configuration and compile every rule table
    ///
    /// # Errors
    /// * `ConfigError::InvalidPattern` - bad collapse pattern
    /// * `ConfigError::EmptyState` - blank included state
    pub fn new(config: &'a CollapseConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            config,
            lines: LineClassifier::new()?,
            states: StateClassifier::new()?,
            frames: FrameTransformer::new(config)?,
            block: ThreadBlock::new(),
            aggregate: StackAggregate::new(),
            tally: config.stats.then(StateTally::new),
            line_stats: LineStats::default(),
        })
    }

    /// Consume one line (terminator already removed)
    pub fn process_line(&mut self, line: &str) {
        let line = line.strip_suffix('\r').unwrap_or(line);
        self.line_stats.lines += 1;

        match self.lines.classify(line) {
            LineKind::Comment => {}
            LineKind::Blank => self.finalize_block(),
            LineKind::ThreadHeader { name } => {
                self.block.record_header(name, self.config, &self.states);
            }
            LineKind::StateDeclaration { token, dialect } => {
                self.block
                    .apply_cue(StateCue::Declared { token, dialect }, &self.states);
            }
            LineKind::Frame { signature } => {
                self.line_stats.frames += 1;
                self.block.push_frame(self.frames.transform(signature));
                self.block.apply_cue(StateCue::Frame(signature), &self.states);
            }
            LineKind::Skip => self.line_stats.skipped += 1,
            LineKind::Unrecognized => {
                self.line_stats.unrecognized += 1;
                if !self.config.quiet {
                    warn!("Unrecognized line {}: {}", self.line_stats.lines, line);
                }
            }
        }
    }

    /// Fold the current block into the aggregate and start a new one
    fn finalize_block(&mut self) {
        let block = std::mem::take(&mut self.block);
        if block.is_empty() {
            return;
        }
        self.line_stats.blocks += 1;

        let Some(state) = block.state.label() else {
            return;
        };

        if let Some(tally) = self.tally.as_mut() {
            tally.record(state);
        }

        if !self.config.is_included(state) {
            return;
        }

        if let Some(key) = block.folded() {
            self.aggregate.increment(key);
        }
    }

    /// Finalize the last block and hand back the run's results
    ///
    /// **Public** - end of input
    pub fn finish(mut self) -> CollapseOutput {
        self.finalize_block();

        debug!(
            "Processed {} lines: {} entries, {} frames, {} unrecognized",
            self.line_stats.lines,
            self.line_stats.blocks,
            self.line_stats.frames,
            self.line_stats.unrecognized
        );

        CollapseOutput {
            stacks: self.aggregate,
            state_tally: self.tally,
            line_stats: self.line_stats,
        }
    }
}

/// Collapse an in-memory sequence of lines
///
/// **Public** - convenience wrapper around [`StackCollapser`]
pub fn collapse_lines<I, S>(lines: I, config: &CollapseConfig) -> Result<CollapseOutput, ConfigError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut collapser = StackCollapser::new(config)?;
    for line in lines {
        collapser.process_line(line.as_ref());
    }
    Ok(collapser.finish())
}

/// Convert a run's output to the JSON profile format
///
/// **Public** - used by commands to create final output
pub fn to_profile(
    output: &CollapseOutput,
    config: &CollapseConfig,
    inputs: &[String],
    top_n: usize,
) -> Profile {
    use chrono::Utc;

    let stacks = output.stacks.finalize();
    let total_samples = output.stacks.total_samples();

    let mut included_states: Vec<String> = config.included_states.iter().cloned().collect();
    included_states.sort();

    Profile {
        version: SCHEMA_VERSION.to_string(),
        inputs: inputs.to_vec(),
        total_samples,
        unique_stacks: stacks.len(),
        included_states,
        state_tally: output
            .state_tally
            .as_ref()
            .map(StateTally::to_map)
            .unwrap_or_default(),
        hot_paths: calculate_hot_paths(&stacks, total_samples, top_n),
        generated_at: Utc::now().to_rfc3339(),
    }
}
