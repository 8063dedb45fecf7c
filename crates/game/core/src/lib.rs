//! Deterministic battle rules and data types shared across the arena crates.
//!
//! `arena-core` defines the canonical rules (creatures, effects, runes,
//! skills, teams, the gauge race and action resolution) and exposes pure APIs
//! that the content loader, the runtime and offline tools all reuse. All
//! battle state mutation flows through [`battle::Battle`]; randomness is
//! injected through [`rng::BattleRng`].
pub mod action;
pub mod battle;
pub mod combat;
pub mod config;
pub mod creature;
pub mod effect;
pub mod error;
pub mod rng;
pub mod rune;
pub mod skill;
pub mod stats;
pub mod team;

pub use action::{ActionChoice, ActionError, ActionOutcome, HitReport};
pub use battle::{Battle, Reward, Slot, TurnError, TurnReport};
pub use combat::{DamageFlags, DamageMultiplier, DamageRoll, Element, HitKind};
pub use config::BattleConfig;
pub use creature::{AwakenBonus, Creature, ProgressionError, Role, TurnStart};
pub use effect::{
    BeneficialEffect, BeneficialKind, Capabilities, Effect, EffectError, EffectKind, EffectList,
    EffectTemplate, HarmfulEffect, HarmfulKind,
};
pub use error::{ErrorSeverity, GameError};
pub use rng::{BattleRng, PcgRng, SequenceRng};
pub use rune::{Rune, RuneBonus, RuneError, RuneSet, RuneSlots, RuneStat};
pub use skill::{ActiveKind, ActiveSkill, LeaderSkill, PassiveSkill, Skill};
pub use stats::{BaseStats, Modifiers, StatsSnapshot};
pub use team::{Side, Team, TeamError};
