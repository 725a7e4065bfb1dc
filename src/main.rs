//! jstack-flame CLI
//!
//! Folds Java thread dumps into collapsed stacks for flamegraphs.

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use jstack_flame::commands::{
    display_version, execute_collapse, validate_args, validate_profile_file, CollapseArgs,
};
use jstack_flame::flamegraph::FlamegraphConfig;
use jstack_flame::utils::config::{CollapseConfig, DEFAULT_FLAMEGRAPH_WIDTH, DEFAULT_TOP_PATHS};

/// jstack-flame - thread dumps to flamegraphs
#[derive(Parser, Debug)]
#[command(name = "jstack-flame")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Fold thread dumps into collapsed stacks
    Collapse {
        /// Thread dump files ("-" or none for stdin)
        inputs: Vec<PathBuf>,

        /// Omit thread names from stacks
        #[arg(long = "no-include-tname", action = ArgAction::SetFalse)]
        include_tname: bool,

        /// Keep thread ids (trailing -<digits>) in thread names
        #[arg(long)]
        include_tid: bool,

        /// Shorten package names (com.example.Foo.bar -> c.e.Foo.bar)
        #[arg(long)]
        shorten_pkgs: bool,

        /// Collapse frames matching this regex into "<pattern>..." (repeatable)
        #[arg(long = "collapse-frame", value_name = "PATTERN")]
        collapse_frames: Vec<String>,

        /// Thread states to include (repeatable, default RUNNABLE;
        /// also BACKGROUND, NETWORK, NETWORK_WAITING)
        #[arg(long = "state", value_name = "STATE")]
        states: Vec<String>,

        /// Print per-state entry counts to stderr
        #[arg(long)]
        stats: bool,

        /// Do not warn about unrecognized lines
        #[arg(short, long, env = "JSTACK_FLAME_QUIET")]
        quiet: bool,

        /// Write folded stacks to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output path for SVG flamegraph (optional)
        #[arg(short, long)]
        flamegraph: Option<PathBuf>,

        /// Flamegraph title
        #[arg(long)]
        title: Option<String>,

        /// Flamegraph width in pixels
        #[arg(long, default_value_t = DEFAULT_FLAMEGRAPH_WIDTH)]
        width: usize,

        /// Output path for JSON profile (optional)
        #[arg(long)]
        json: Option<PathBuf>,

        /// Number of top hot paths in profile and summary
        #[arg(long, default_value_t = DEFAULT_TOP_PATHS)]
        top_paths: usize,

        /// Print text summary to stderr
        #[arg(long)]
        summary: bool,
    },

    /// Validate a profile JSON file
    Validate {
        /// Path to profile JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Collapse {
            inputs,
            include_tname,
            include_tid,
            shorten_pkgs,
            collapse_frames,
            states,
            stats,
            quiet,
            output,
            flamegraph,
            title,
            width,
            json,
            top_paths,
            summary,
        } => {
            let config = collapse_frames.into_iter().fold(
                CollapseConfig::new()
                    .with_thread_name(include_tname)
                    .with_thread_id(include_tid)
                    .with_shorten_packages(shorten_pkgs)
                    .with_states(states)
                    .with_stats(stats)
                    .with_quiet(quiet),
                |config, pattern| config.with_collapse_pattern(pattern),
            );

            // Create flamegraph config
            let flamegraph_config = flamegraph.as_ref().map(|_| {
                let config = FlamegraphConfig::new().with_width(width);
                match title {
                    Some(title) => config.with_title(title),
                    None => config,
                }
            });

            let args = CollapseArgs {
                inputs,
                config,
                output,
                output_svg: flamegraph,
                flamegraph_config,
                output_json: json,
                top_paths,
                print_summary: summary,
            };

            // Validate args first
            validate_args(&args)?;

            execute_collapse(args)?;
        }

        Commands::Validate { file } => {
            validate_profile_file(&file)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
