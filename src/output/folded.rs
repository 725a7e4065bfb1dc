//! Folded stack output writer.
//!
//! One line per distinct stack, ascending by stack: `"<stack> <count>"`.
//! The state tally uses the same discipline: `"<state>: <count>"`.

use super::prepare_output_path;
use crate::aggregator::CollapsedStack;
use crate::utils::error::OutputError;
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write folded stacks to any writer
///
/// **Public** - used for stdout and files alike
///
/// `stacks` is expected in output order (see `StackAggregate::finalize`).
pub fn write_folded<W: Write>(stacks: &[CollapsedStack], mut writer: W) -> Result<(), OutputError> {
    for stack in stacks {
        writeln!(writer, "{} {}", stack.stack, stack.count)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the per-state tally
///
/// **Public** - diagnostic output for `--stats`
pub fn write_state_tally<W: Write>(states: &[(String, u64)], mut writer: W) -> Result<(), OutputError> {
    for (state, count) in states {
        writeln!(writer, "{}: {}", state, count)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write folded stacks to a file
///
/// **Public** - `--output` target
///
/// # Errors
/// * `OutputError::InvalidPath` - Path is empty, a directory, or its parent cannot be created
/// * `OutputError::WriteFailed` - I/O error during write
pub fn write_folded_file(
    stacks: &[CollapsedStack],
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing folded stacks to: {}", output_path.display());

    prepare_output_path(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    write_folded(stacks, BufWriter::new(file))?;

    info!("Folded stacks written successfully ({} stacks)", stacks.len());

    Ok(())
}
