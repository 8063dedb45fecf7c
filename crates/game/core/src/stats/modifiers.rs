//! Live modifiers - the additive layer folded from effects, passives and auras.
//!
//! Percentage fields are stored in percentage points (`50.0` = +50%). Chance
//! fields are stored as fractions (`0.3` = +30 percentage points of chance).
//!
//! A creature never mutates its modifiers in place. The active set is summed
//! from its sources each time it is read, so adding then removing a source is
//! an exact round trip.

use core::ops::{Add, AddAssign};

macro_rules! modifier_fields {
    ($( $(#[$doc:meta])* $field:ident ),* $(,)?) => {
        /// Additive bundle of every live percentage and chance modifier.
        #[derive(Clone, Copy, Debug, Default, PartialEq)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(default))]
        pub struct Modifiers {
            $( $(#[$doc])* pub $field: f64, )*
        }

        impl Modifiers {
            /// Multiply every field by `factor`.
            pub fn scaled(self, factor: f64) -> Self {
                Self { $( $field: self.$field * factor, )* }
            }

            /// True when every field is zero.
            pub fn is_zero(&self) -> bool {
                true $( && self.$field == 0.0 )*
            }
        }

        impl Add for Modifiers {
            type Output = Self;

            fn add(self, rhs: Self) -> Self {
                Self { $( $field: self.$field + rhs.$field, )* }
            }
        }
    };
}

modifier_fields! {
    /// Max HP, percentage points.
    hp_pct,
    /// Max MP, percentage points.
    mp_pct,
    /// Attack, percentage points.
    attack_pct,
    /// Defense, percentage points.
    defense_pct,
    /// Speed, percentage points.
    speed_pct,
    crit_rate,
    crit_damage,
    resistance,
    accuracy,
    /// Chance of acting again right after an action.
    extra_turn,
    /// Chance of striking back when hit.
    counter,
    crit_resist,
    /// Chance of landing a glancing hit.
    glancing,
    /// Share of received damage returned to the attacker, percentage points.
    reflect_pct,
    /// Share of dealt damage healed back, percentage points.
    life_drain_pct,
    /// Extra damage taken, percentage points.
    damage_received_pct,
    /// Damage absorbed before defense, percentage points.
    shield_pct,
    /// Max HP healed at turn start, percentage points.
    heal_per_turn_pct,
    /// Max HP lost at turn start, percentage points.
    damage_per_turn_pct,
    /// Chance of stunning a target hit by a skill.
    stun_rate,
}

impl AddAssign for Modifiers {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl core::iter::Sum for Modifiers {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl<'a> core::iter::Sum<&'a Modifiers> for Modifiers {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Modifiers {
    pub const ZERO: Self = Self {
        hp_pct: 0.0,
        mp_pct: 0.0,
        attack_pct: 0.0,
        defense_pct: 0.0,
        speed_pct: 0.0,
        crit_rate: 0.0,
        crit_damage: 0.0,
        resistance: 0.0,
        accuracy: 0.0,
        extra_turn: 0.0,
        counter: 0.0,
        crit_resist: 0.0,
        glancing: 0.0,
        reflect_pct: 0.0,
        life_drain_pct: 0.0,
        damage_received_pct: 0.0,
        shield_pct: 0.0,
        heal_per_turn_pct: 0.0,
        damage_per_turn_pct: 0.0,
        stun_rate: 0.0,
    };
}
