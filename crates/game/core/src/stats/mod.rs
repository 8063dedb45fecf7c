//! Stat system.
//!
//! # Architecture
//!
//! ```text
//! [ BaseStats ]          permanent, rewritten by progression
//!      ↓  Flat / Increased  (runes and set effects)
//! [ Permanent stats ]
//!      ↓  More              (effects, passives, leader aura)
//! [ StatsSnapshot ]      what combat reads
//! ```
//!
//! Every layer is recomputed on read through [`BonusStack`], so equipment and
//! effect changes reverse exactly when undone.

pub mod base;
pub mod bonus;
pub mod modifiers;
pub mod snapshot;

pub use base::BaseStats;
pub use bonus::{Bonus, BonusStack};
pub use modifiers::Modifiers;
pub use snapshot::StatsSnapshot;
