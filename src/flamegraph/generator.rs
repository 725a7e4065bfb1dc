//! SVG flamegraph generation using the inferno library.
//!
//! Folded thread-dump stacks are already in the format inferno consumes, so
//! rendering is a matter of handing the lines over with Java-flavoured
//! options. The text summary gives a terminal view of the hottest stacks.

use crate::aggregator::stack_builder::{sort_by_count, CollapsedStack};
use crate::utils::config::DEFAULT_FLAMEGRAPH_WIDTH;
use crate::utils::error::FlamegraphError;
use inferno::flamegraph::color::{MultiPalette, Palette};
use inferno::flamegraph::{self, Options};
use log::info;

/// Flamegraph configuration
#[derive(Debug, Clone)]
pub struct FlamegraphConfig {
    pub title: String,
    pub width: usize,
}

impl Default for FlamegraphConfig {
    fn default() -> Self {
        Self {
            title: "Java Thread Dump Profile".to_string(),
            width: DEFAULT_FLAMEGRAPH_WIDTH,
        }
    }
}

impl FlamegraphConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }
}

/// Generate SVG flamegraph from collapsed stacks
///
/// **Public** - main entry point for rendering
///
/// # Errors
/// * `FlamegraphError::EmptyStacks` - nothing was aggregated
/// * `FlamegraphError::RenderFailed` - inferno failed to render
pub fn generate_flamegraph(
    stacks: &[CollapsedStack],
    config: Option<&FlamegraphConfig>,
) -> Result<String, FlamegraphError> {
    if stacks.is_empty() {
        return Err(FlamegraphError::EmptyStacks);
    }

    let config = config.cloned().unwrap_or_default();
    info!("Generating flamegraph with {} stacks", stacks.len());

    let lines: Vec<String> = stacks.iter().map(CollapsedStack::to_line).collect();

    let mut options = Options::default();
    options.title = config.title;
    options.image_width = Some(config.width);
    options.count_name = "samples".to_string();
    options.colors = Palette::Multi(MultiPalette::Java);

    let mut svg = Vec::new();
    flamegraph::from_lines(&mut options, lines.iter().map(String::as_str), &mut svg)
        .map_err(|e| FlamegraphError::RenderFailed(e.to_string()))?;

    let svg = String::from_utf8(svg).map_err(|e| FlamegraphError::RenderFailed(e.to_string()))?;

    info!("Flamegraph generated successfully ({} bytes)", svg.len());
    Ok(svg)
}

/// Create a text summary of the hottest stacks
///
/// **Public** - printed with `--summary`
pub fn generate_text_summary(stacks: &[CollapsedStack], max_lines: usize) -> String {
    let total: u64 = stacks.iter().map(|s| s.count).sum::<u64>().max(1);
    let sorted = sort_by_count(stacks);

    let mut lines = Vec::new();
    lines.push("  HOTTEST STACKS".to_string());
    lines.push(format!("  {:<60} {:>10} {:>7}", "Leaf frame (thread)", "SAMPLES", "%"));
    lines.push(format!("  {}", "-".repeat(79)));

    for stack in sorted.iter().take(max_lines) {
        let percentage = (stack.count as f64 / total as f64) * 100.0;
        lines.push(format!(
            "  {:<60} {:>10} {:>6.1}%",
            describe_stack(&stack.stack, 60),
            stack.count,
            percentage
        ));
    }

    if stacks.len() > max_lines {
        lines.push(String::new());
        lines.push(format!(
            "   (Showing top {} of {} unique stacks)",
            max_lines,
            stacks.len()
        ));
    }

    lines.join("\n")
}

/// `leaf (root)`, truncated from the left to `width` characters
fn describe_stack(stack: &str, width: usize) -> String {
    let mut frames = stack.split(';');
    let root = frames.next().unwrap_or(stack);
    let leaf = frames.next_back().unwrap_or(root);

    let label = if leaf == root {
        leaf.to_string()
    } else {
        format!("{} ({})", leaf, root)
    };

    let chars: Vec<char> = label.chars().collect();
    if chars.len() > width {
        let tail: String = chars[chars.len() - (width - 3)..].iter().collect();
        format!("...{}", tail)
    } else {
        label
    }
}
