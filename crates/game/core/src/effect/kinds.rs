//! Effect catalog: every named beneficial and harmful effect with its payload.

use crate::stats::Modifiers;

use super::Capabilities;

/// Behavior shared by beneficial and harmful effect names.
pub trait EffectKind: Copy + Eq + core::fmt::Debug {
    /// Modifiers folded into the bearer while the effect is active.
    fn payload(self) -> Modifiers;

    /// Capabilities revoked while the effect is active.
    fn revokes(self) -> Capabilities {
        Capabilities::empty()
    }

    /// Whether several instances may coexist on one creature.
    fn stackable(self) -> bool {
        false
    }
}

/// Beneficial effect names.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum BeneficialKind {
    IncreaseAtk,
    IncreaseDef,
    IncreaseSpd,
    IncreaseCritRate,
    /// Blocks harmful effects.
    Immunity,
    /// Blocks damage.
    Invincibility,
    HealOverTime,
    Counter,
    Reflect,
    Vampire,
    IncreaseCritResist,
    Shield,
    /// Cannot drop below 1 HP.
    Endure,
}

impl EffectKind for BeneficialKind {
    fn payload(self) -> Modifiers {
        let z = Modifiers::ZERO;
        match self {
            Self::IncreaseAtk => Modifiers {
                attack_pct: 50.0,
                ..z
            },
            Self::IncreaseDef => Modifiers {
                defense_pct: 50.0,
                ..z
            },
            Self::IncreaseSpd => Modifiers {
                speed_pct: 33.0,
                ..z
            },
            Self::IncreaseCritRate => Modifiers {
                crit_rate: 0.3,
                ..z
            },
            Self::HealOverTime => Modifiers {
                heal_per_turn_pct: 15.0,
                ..z
            },
            Self::Counter => Modifiers { counter: 1.0, ..z },
            Self::Reflect => Modifiers {
                reflect_pct: 33.0,
                ..z
            },
            Self::Vampire => Modifiers {
                life_drain_pct: 33.0,
                ..z
            },
            Self::IncreaseCritResist => Modifiers {
                crit_resist: 0.5,
                ..z
            },
            Self::Shield => Modifiers {
                shield_pct: 15.0,
                ..z
            },
            Self::Immunity | Self::Invincibility | Self::Endure => z,
        }
    }

    fn revokes(self) -> Capabilities {
        match self {
            Self::Immunity => Capabilities::CAN_RECEIVE_HARMFUL,
            Self::Invincibility => Capabilities::CAN_RECEIVE_DAMAGE,
            Self::Endure => Capabilities::CAN_DIE,
            _ => Capabilities::empty(),
        }
    }

    fn stackable(self) -> bool {
        matches!(self, Self::HealOverTime)
    }
}

/// Harmful effect names.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum HarmfulKind {
    DecreaseAtk,
    DecreaseDef,
    Glancing,
    DecreaseSpd,
    BlockBeneficialEffects,
    /// Bearer takes more damage.
    Brand,
    /// Bearer cannot be healed.
    Unrecoverable,
    /// Passive skills stop working.
    Oblivion,
    /// Skills with a cooltime cannot be used.
    Silence,
    DamageOverTime,
    Stun,
}

impl EffectKind for HarmfulKind {
    fn payload(self) -> Modifiers {
        let z = Modifiers::ZERO;
        match self {
            Self::DecreaseAtk => Modifiers {
                attack_pct: -50.0,
                ..z
            },
            Self::DecreaseDef => Modifiers {
                defense_pct: -50.0,
                ..z
            },
            Self::Glancing => Modifiers {
                glancing: 0.5,
                ..z
            },
            Self::DecreaseSpd => Modifiers {
                speed_pct: -33.0,
                ..z
            },
            Self::Brand => Modifiers {
                damage_received_pct: 25.0,
                ..z
            },
            Self::DamageOverTime => Modifiers {
                damage_per_turn_pct: 5.0,
                ..z
            },
            Self::BlockBeneficialEffects
            | Self::Unrecoverable
            | Self::Oblivion
            | Self::Silence
            | Self::Stun => z,
        }
    }

    fn revokes(self) -> Capabilities {
        match self {
            Self::BlockBeneficialEffects => Capabilities::CAN_RECEIVE_BENEFICIAL,
            Self::Unrecoverable => Capabilities::CAN_BE_HEALED,
            Self::Oblivion => Capabilities::CAN_USE_PASSIVES,
            Self::Silence => Capabilities::CAN_USE_COOLTIME_SKILLS,
            Self::Stun => Capabilities::CAN_MOVE,
            _ => Capabilities::empty(),
        }
    }

    fn stackable(self) -> bool {
        matches!(self, Self::DamageOverTime)
    }
}
