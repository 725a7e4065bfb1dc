//! Reading thread dumps from files and stdin.

pub mod reader;

pub use reader::{feed_reader, DumpSource};
