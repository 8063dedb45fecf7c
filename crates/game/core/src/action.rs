//! Action choices and the reports produced by resolving them.

use crate::battle::Slot;
use crate::combat::HitKind;
use crate::effect::{BeneficialKind, HarmfulKind};
use crate::error::{ErrorSeverity, GameError};

/// What an actor does with its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionChoice {
    /// Hit one enemy with effective attack through its defense.
    NormalAttack,
    /// Heal oneself by a fraction of max HP.
    NormalHeal,
    /// Use the active skill at this index of the actor's skill list.
    UseSkill(usize),
}

impl ActionChoice {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionChoice::NormalAttack => "normal_attack",
            ActionChoice::NormalHeal => "normal_heal",
            ActionChoice::UseSkill(_) => "use_skill",
        }
    }
}

/// Why an action was not applied.
///
/// A rejected action leaves the battle untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    #[error("a creature cannot target itself with this action")]
    SameCreature,

    #[error("target is on the actor's own team")]
    SameTeam,

    #[error("target is on the opposing team")]
    DifferentTeam,

    #[error("a normal heal can only target the actor")]
    NotHealingSelf,

    #[error("actor has no active skill at that index")]
    SkillNotOwned,

    #[error("not enough MP")]
    InsufficientMp,

    #[error("skill is still on cooltime")]
    OnCooldown,

    #[error("actor is silenced")]
    Silenced,

    #[error("target is already dead")]
    TargetDead,

    #[error("actor is dead")]
    ActorDead,

    #[error("no creature in that slot")]
    UnknownSlot,
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::SameCreature => "ACTION_SAME_CREATURE",
            Self::SameTeam => "ACTION_SAME_TEAM",
            Self::DifferentTeam => "ACTION_DIFFERENT_TEAM",
            Self::NotHealingSelf => "ACTION_NOT_HEALING_SELF",
            Self::SkillNotOwned => "ACTION_SKILL_NOT_OWNED",
            Self::InsufficientMp => "ACTION_INSUFFICIENT_MP",
            Self::OnCooldown => "ACTION_ON_COOLDOWN",
            Self::Silenced => "ACTION_SILENCED",
            Self::TargetDead => "ACTION_TARGET_DEAD",
            Self::ActorDead => "ACTION_ACTOR_DEAD",
            Self::UnknownSlot => "ACTION_UNKNOWN_SLOT",
        }
    }
}

/// Damage dealt to one target.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitReport {
    pub target: Slot,
    pub damage: f64,
    pub hit: HitKind,
    /// Damage the attacker took back from the target's reflect.
    pub reflected: f64,
    /// HP the attacker regained through life drain.
    pub drained: f64,
    pub killed: bool,
}

/// Everything an action changed, for logging and events.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionOutcome {
    pub hits: Vec<HitReport>,
    pub heals: Vec<(Slot, f64)>,
    pub buffs: Vec<(Slot, BeneficialKind)>,
    pub debuffs: Vec<(Slot, HarmfulKind)>,
    /// Attacker died from reflected damage.
    pub actor_killed: bool,
}

impl ActionOutcome {
    pub fn total_damage(&self) -> f64 {
        self.hits.iter().map(|h| h.damage).sum()
    }

    /// Targets that were hit and are still standing, in hit order.
    pub fn surviving_targets(&self) -> impl Iterator<Item = Slot> + '_ {
        self.hits.iter().filter(|h| !h.killed).map(|h| h.target)
    }

    pub fn killed(&self) -> impl Iterator<Item = Slot> + '_ {
        self.hits.iter().filter(|h| h.killed).map(|h| h.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::team::Side;

    #[test]
    fn outcome_splits_killed_and_surviving() {
        let a = Slot::new(Side::Two, 0);
        let b = Slot::new(Side::Two, 1);
        let outcome = ActionOutcome {
            hits: vec![
                HitReport {
                    target: a,
                    damage: 40.0,
                    hit: HitKind::Normal,
                    reflected: 0.0,
                    drained: 0.0,
                    killed: true,
                },
                HitReport {
                    target: b,
                    damage: 10.0,
                    hit: HitKind::Glancing,
                    reflected: 0.0,
                    drained: 0.0,
                    killed: false,
                },
            ],
            ..ActionOutcome::default()
        };
        assert_eq!(outcome.total_damage(), 50.0);
        assert_eq!(outcome.killed().collect::<Vec<_>>(), vec![a]);
        assert_eq!(outcome.surviving_targets().collect::<Vec<_>>(), vec![b]);
    }

    #[test]
    fn error_codes_are_stable() {
        assert_eq!(ActionError::InsufficientMp.error_code(), "ACTION_INSUFFICIENT_MP");
        assert_eq!(ActionError::Silenced.severity(), ErrorSeverity::Validation);
    }
}
