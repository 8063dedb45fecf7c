//! Battle events and their encodings.

mod types;

pub use types::BattleEvent;
