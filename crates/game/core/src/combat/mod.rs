//! Combat resolution system.
//!
//! Pure functions over [`StatsSnapshot`](crate::stats::StatsSnapshot)s. The
//! only side effect is drawing from the injected [`BattleRng`](crate::rng::BattleRng).
//!
//! - `calculate_raw_damage`: skill damage with glancing / crushing / critical rolls
//! - `normal_attack_damage`: attack through defense, no rolls
//! - `resist_chance`: accuracy vs resistance for harmful effects

pub mod damage;
pub mod elements;
pub mod multiplier;

pub use damage::{
    DamageFlags, DamageRoll, HitKind, calculate_raw_damage, crit_chance, crushing_chance,
    defense_factor, glancing_chance, normal_attack_damage, resist_chance,
};
pub use elements::{Element, crushing_applies, glancing_chance_by_elements};
pub use multiplier::DamageMultiplier;
