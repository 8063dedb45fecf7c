//! Contracts for recording battle events.

use crate::events::BattleEvent;
use crate::repository::Result;

/// Destination for the events a battle emits, in emission order.
pub trait EventSink {
    fn emit(&mut self, event: &BattleEvent) -> Result<()>;

    /// Push buffered events to their backing store.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn emit(&mut self, event: &BattleEvent) -> Result<()> {
        (**self).emit(event)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
}
