//! In-memory event sink.

use std::sync::{Arc, RwLock};

use crate::events::BattleEvent;
use crate::repository::{EventSink, RepositoryError, Result};

/// Keeps every emitted event in a shared `Vec`.
///
/// Clones share the same storage, so a caller can hand one clone to a
/// [`BattleRunner`](crate::BattleRunner) and read the events through another.
/// Not persistent across process restarts.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    events: Arc<RwLock<Vec<BattleEvent>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every event emitted so far.
    pub fn events(&self) -> Result<Vec<BattleEvent>> {
        let events = self
            .events
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(events.clone())
    }

    pub fn len(&self) -> usize {
        self.events.read().map_or(0, |events| events.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for MemorySink {
    fn emit(&mut self, event: &BattleEvent) -> Result<()> {
        let mut events = self
            .events
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        events.push(event.clone());
        Ok(())
    }
}
