//! Line source for thread dumps: files or stdin.

use crate::parser::StackCollapser;
use crate::utils::error::InputError;
use log::{debug, info};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Where a thread dump is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DumpSource {
    Stdin,
    File(PathBuf),
}

impl DumpSource {
    /// `-` means stdin, anything else is a file path
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if path.as_os_str() == "-" {
            DumpSource::Stdin
        } else {
            DumpSource::File(path.to_path_buf())
        }
    }

    /// Display name used in logs and profiles
    pub fn name(&self) -> String {
        match self {
            DumpSource::Stdin => "-".to_string(),
            DumpSource::File(path) => path.display().to_string(),
        }
    }

    /// Open the source for buffered line reading
    ///
    /// # Errors
    /// * `InputError::ReadFailed` - file cannot be opened
    pub fn open(&self) -> Result<Box<dyn BufRead>, InputError> {
        match self {
            DumpSource::Stdin => Ok(Box::new(BufReader::new(io::stdin()))),
            DumpSource::File(path) => {
                let file = File::open(path).map_err(|source| InputError::ReadFailed {
                    name: self.name(),
                    source,
                })?;
                Ok(Box::new(BufReader::new(file)))
            }
        }
    }
}

/// Feed every line of `reader` into `collapser`
///
/// **Public** - main entry point for reading
///
/// Invalid UTF-8 (thread names can carry anything) is replaced rather than
/// rejected. Returns the number of lines read.
///
/// # Errors
/// * `InputError::ReadFailed` - I/O error while reading
pub fn feed_reader<R: BufRead>(
    mut reader: R,
    collapser: &mut StackCollapser<'_>,
    name: &str,
) -> Result<u64, InputError> {
    info!("Reading thread dump from: {}", name);

    let mut buf = Vec::new();
    let mut count = 0u64;

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|source| InputError::ReadFailed {
                name: name.to_string(),
                source,
            })?;

        if read == 0 {
            break;
        }

        if buf.last() == Some(&b'\n') {
            buf.pop();
        }

        collapser.process_line(&String::from_utf8_lossy(&buf));
        count += 1;
    }

    debug!("Read {} lines from {}", count, name);

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::config::CollapseConfig;
    use std::io::Cursor;

    #[test]
    fn test_from_path() {
        assert_eq!(DumpSource::from_path("-"), DumpSource::Stdin);
        assert_eq!(
            DumpSource::from_path("dump.txt"),
            DumpSource::File(PathBuf::from("dump.txt"))
        );
        assert_eq!(DumpSource::Stdin.name(), "-");
    }

    #[test]
    fn test_open_missing_file() {
        let source = DumpSource::File(PathBuf::from("/nonexistent/dump.txt"));
        assert!(matches!(source.open(), Err(InputError::ReadFailed { .. })));
    }

    #[test]
    fn test_feed_reader_handles_invalid_utf8() {
        let config = CollapseConfig::default();
        let mut collapser = StackCollapser::new(&config).unwrap();

        let mut data = b"\"w\xffrker\"\n   java.lang.Thread.State: RUNNABLE\n".to_vec();
        data.extend_from_slice(b"\tat X.y(X.java:1)");

        let lines = feed_reader(Cursor::new(data), &mut collapser, "test").unwrap();
        let output = collapser.finish();

        assert_eq!(lines, 3);
        assert_eq!(output.stacks.get("w\u{fffd}rker;X.y"), 1);
    }
}
