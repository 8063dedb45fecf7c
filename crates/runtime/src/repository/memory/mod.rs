//! In-memory event sinks.

mod event;

pub use event::MemorySink;
