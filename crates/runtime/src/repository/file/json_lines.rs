//! Human-readable event log: one JSON object per line.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::events::BattleEvent;
use crate::repository::{EventSink, RepositoryError, Result};

/// Writes each event as a single line of JSON.
pub struct JsonLinesSink<W: Write = BufWriter<File>> {
    writer: W,
    lines: u64,
}

impl JsonLinesSink {
    /// Append to the file at `path`, creating it and its parents if needed.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        tracing::debug!("Opened JSON event log: {}", path.display());
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, lines: 0 }
    }

    /// Number of events written so far.
    pub fn lines(&self) -> u64 {
        self.lines
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> EventSink for JsonLinesSink<W> {
    fn emit(&mut self, event: &BattleEvent) -> Result<()> {
        serde_json::to_writer(&mut self.writer, event)
            .map_err(|e| RepositoryError::Json(e.to_string()))?;
        self.writer.write_all(b"\n")?;
        self.lines += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
