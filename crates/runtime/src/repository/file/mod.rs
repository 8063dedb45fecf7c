//! File-backed event sinks.

mod json_lines;
mod log;

pub use json_lines::JsonLinesSink;
pub use log::{FileEventLog, FileRepository};
