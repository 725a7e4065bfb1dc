//! Collapse command implementation.
//!
//! The collapse command:
//! 1. Reads thread dumps from files or stdin
//! 2. Folds each thread-dump entry into the stack aggregate
//! 3. Writes folded stacks (and the state tally, if requested)
//! 4. Optionally renders a flamegraph and writes a JSON profile

use super::models::CollapseArgs;
use crate::aggregator::{calculate_sample_distribution, SampleDistribution};
use crate::flamegraph::{generate_flamegraph, generate_text_summary};
use crate::input::{feed_reader, DumpSource};
use crate::output::{write_folded, write_folded_file, write_profile, write_state_tally, write_svg};
use crate::parser::{to_profile, CollapseOutput, StackCollapser};
use crate::utils::config::CollapseConfig;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::io;
use std::time::Instant;

/// Execute the collapse command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Invalid collapse patterns or state labels
/// * Unreadable input files
/// * File write errors
///
/// # Example
/// ```ignore
/// let args = CollapseArgs {
///     inputs: vec![PathBuf::from("dumps.txt")],
///     output: Some(PathBuf::from("out.folded")),
///     ..Default::default()
/// };
///
/// execute_collapse(args)?;
/// ```
pub fn execute_collapse(args: CollapseArgs) -> Result<()> {
    let start_time = Instant::now();

    let sources = resolve_sources(&args);
    let inputs: Vec<String> = sources.iter().map(DumpSource::name).collect();

    // Step 1: Read and fold all inputs
    info!("Step 1/4: Collapsing {} input(s)...", sources.len());
    let output = collapse_sources(&sources, &args.config)?;

    let stacks = output.stacks.finalize();
    debug!(
        "Collapsed {} lines into {} unique stacks",
        output.line_stats.lines,
        stacks.len()
    );
    if output.line_stats.unrecognized > 0 {
        info!("{} unrecognized lines ignored", output.line_stats.unrecognized);
    }

    let distribution = calculate_sample_distribution(&stacks);
    info!("Sample distribution: {}", distribution.summary());

    // Step 2: Folded output and state tally
    info!("Step 2/4: Writing folded stacks...");
    match &args.output {
        Some(path) => write_folded_file(&stacks, path).context("Failed to write folded stacks")?,
        None => write_folded(&stacks, io::stdout().lock()).context("Failed to write folded stacks")?,
    }

    if let Some(tally) = &output.state_tally {
        write_state_tally(&tally.finalize(), io::stderr().lock())
            .context("Failed to write state statistics")?;
    }

    // Step 3: Flamegraph (if requested)
    if let Some(svg_path) = &args.output_svg {
        info!("Step 3/4: Generating flamegraph...");
        if stacks.is_empty() {
            warn!("No stacks matched the selected states, skipping flamegraph");
        } else {
            let svg = generate_flamegraph(&stacks, args.flamegraph_config.as_ref())
                .context("Failed to generate flamegraph")?;
            write_svg(&svg, svg_path).context("Failed to write flamegraph SVG")?;
            info!("✓ Flamegraph written to: {}", svg_path.display());
        }
    } else {
        info!("Step 3/4: Skipping flamegraph generation (not requested)");
    }

    // Step 4: JSON profile (if requested)
    if let Some(json_path) = &args.output_json {
        info!("Step 4/4: Writing profile...");
        let profile = to_profile(&output, &args.config, &inputs, args.top_paths);
        write_profile(&profile, json_path).context("Failed to write profile JSON")?;
        info!("✓ Profile written to: {}", json_path.display());
    } else {
        info!("Step 4/4: Skipping profile output (not requested)");
    }

    if args.print_summary {
        eprintln!("\n{}", "=".repeat(80));
        eprintln!("THREAD DUMP SUMMARY");
        eprintln!("{}", "=".repeat(80));
        eprintln!("Inputs:         {}", inputs.join(", "));
        eprintln!("Lines:          {}", output.line_stats.lines);
        eprintln!("Thread entries: {}", output.line_stats.blocks);
        eprintln!("Samples:        {}", distribution.total_samples);
        eprintln!("Unique stacks:  {}", stacks.len());
        if let Some(note) = concentration_note(&distribution) {
            eprintln!("{}", note);
        }
        eprintln!("\n{}", generate_text_summary(&stacks, args.top_paths));
        eprintln!("{}", "=".repeat(80));
    }

    let elapsed = start_time.elapsed();
    info!("Collapse completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

/// Collapse every source independently and merge the results
///
/// **Public** - each source ends its own last block, so entries never span
/// two files
pub fn collapse_sources(sources: &[DumpSource], config: &CollapseConfig) -> Result<CollapseOutput> {
    let mut total = CollapseOutput::default();
    if config.stats {
        total.state_tally = Some(Default::default());
    }

    for source in sources {
        let mut collapser =
            StackCollapser::new(config).context("Invalid collapse configuration")?;

        let reader = source.open()?;
        feed_reader(reader, &mut collapser, &source.name())
            .with_context(|| format!("Failed to read thread dump {}", source.name()))?;

        total.merge(collapser.finish());
    }

    Ok(total)
}

/// Hint printed in the summary when a few stacks dominate
///
/// **Private** - internal helper for execute_collapse
fn concentration_note(distribution: &SampleDistribution) -> Option<String> {
    distribution.is_highly_concentrated().then(|| {
        format!(
            "Hot spot:       top 10% of stacks hold {:.1}% of samples",
            distribution.top_10_percent_percentage
        )
    })
}

/// Map input paths to sources, defaulting to stdin
///
/// **Private** - internal helper for execute_collapse
fn resolve_sources(args: &CollapseArgs) -> Vec<DumpSource> {
    if args.inputs.is_empty() {
        vec![DumpSource::Stdin]
    } else {
        args.inputs.iter().map(DumpSource::from_path).collect()
    }
}

/// Validate collapse arguments
///
/// **Public** - can be called before execute_collapse for early validation
pub fn validate_args(args: &CollapseArgs) -> Result<()> {
    args.config
        .validate()
        .context("Invalid collapse configuration")?;

    let stdin_count = args
        .inputs
        .iter()
        .filter(|p| DumpSource::from_path(p) == DumpSource::Stdin)
        .count();
    if stdin_count > 1 {
        anyhow::bail!("stdin ('-') can only be given once");
    }

    if args.top_paths == 0 {
        anyhow::bail!("top_paths must be greater than 0");
    }

    if args.top_paths > 1000 {
        anyhow::bail!("top_paths is too large (max 1000)");
    }

    if let Some(config) = &args.flamegraph_config {
        if config.width == 0 {
            anyhow::bail!("Flamegraph width must be greater than 0");
        }
    }

    Ok(())
}
