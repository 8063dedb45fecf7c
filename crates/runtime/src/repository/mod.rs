//! Event log storage for finished and running battles.
//!
//! Every sink implements [`EventSink`]:
//! - [`FileEventLog`]: append-only, length-prefixed bincode file readable by offset
//! - [`JsonLinesSink`]: one JSON object per line, for people and `jq`
//! - [`MemorySink`]: keeps events in a `Vec`, for tests and summaries

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::{FileEventLog, FileRepository, JsonLinesSink};
pub use memory::MemorySink;
pub use traits::EventSink;
