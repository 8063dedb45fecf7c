//! Skill catalog: active, passive and leader skills as one sum type.

mod active;

pub use active::{ActiveKind, ActiveSkill};

use crate::effect::{BeneficialKind, EffectTemplate, HarmfulKind};
use crate::stats::Modifiers;

/// Any skill a creature can own.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Skill {
    Active(ActiveSkill),
    Passive(PassiveSkill),
    Leader(LeaderSkill),
}

impl Skill {
    pub fn name(&self) -> &str {
        match self {
            Skill::Active(s) => &s.name,
            Skill::Passive(s) => &s.name,
            Skill::Leader(s) => &s.name,
        }
    }

    pub fn as_active(&self) -> Option<&ActiveSkill> {
        match self {
            Skill::Active(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_active_mut(&mut self) -> Option<&mut ActiveSkill> {
        match self {
            Skill::Active(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_passive(&self) -> Option<&PassiveSkill> {
        match self {
            Skill::Passive(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_leader(&self) -> Option<&LeaderSkill> {
        match self {
            Skill::Leader(s) => Some(s),
            _ => None,
        }
    }
}

/// Always-on skill, toggled by the owner's passive state.
///
/// `stats` contributes while activated. Only hp%, mp%, atk%, def%, spd%, crit
/// rate, crit damage, resistance, accuracy and extra turn are read from it.
/// The side payload fires every time the owner uses an attack skill.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PassiveSkill {
    pub name: String,
    pub stats: Modifiers,
    pub buffs_to_allies: Vec<EffectTemplate<BeneficialKind>>,
    pub debuffs_to_enemies: Vec<EffectTemplate<HarmfulKind>>,
    pub allies_gauge_up: f64,
    pub enemies_gauge_down: f64,
    pub heal_to_allies: f64,
}

impl PassiveSkill {
    pub fn new(name: impl Into<String>, stats: Modifiers) -> Self {
        Self {
            name: name.into(),
            stats,
            ..Self::default()
        }
    }

    /// Stat payload restricted to the fields a passive may grant.
    pub fn payload(&self) -> Modifiers {
        Modifiers {
            extra_turn: self.stats.extra_turn,
            ..leader_fields(&self.stats)
        }
    }

    /// Whether using an attack skill triggers anything beyond stats.
    pub fn has_side_payload(&self) -> bool {
        !self.buffs_to_allies.is_empty()
            || !self.debuffs_to_enemies.is_empty()
            || self.allies_gauge_up != 0.0
            || self.enemies_gauge_down != 0.0
            || self.heal_to_allies != 0.0
    }
}

/// Skill of the team leader, broadcast to every team member while active.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LeaderSkill {
    pub name: String,
    pub mp_cost: f64,
    pub stats: Modifiers,
}

impl LeaderSkill {
    pub fn new(name: impl Into<String>, stats: Modifiers) -> Self {
        Self {
            name: name.into(),
            mp_cost: 0.0,
            stats,
        }
    }

    /// Aura granted to each member: hp%, mp%, atk%, def%, spd%, crit rate,
    /// crit damage, resistance and accuracy.
    pub fn payload(&self) -> Modifiers {
        leader_fields(&self.stats)
    }
}

fn leader_fields(m: &Modifiers) -> Modifiers {
    Modifiers {
        hp_pct: m.hp_pct,
        mp_pct: m.mp_pct,
        attack_pct: m.attack_pct,
        defense_pct: m.defense_pct,
        speed_pct: m.speed_pct,
        crit_rate: m.crit_rate,
        crit_damage: m.crit_damage,
        resistance: m.resistance,
        accuracy: m.accuracy,
        ..Modifiers::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leader_payload_drops_battle_only_fields() {
        let leader = LeaderSkill::new(
            "banner",
            Modifiers {
                attack_pct: 20.0,
                extra_turn: 0.3,
                shield_pct: 50.0,
                ..Modifiers::ZERO
            },
        );
        let payload = leader.payload();
        assert_eq!(payload.attack_pct, 20.0);
        assert_eq!(payload.extra_turn, 0.0);
        assert_eq!(payload.shield_pct, 0.0);
    }

    #[test]
    fn passive_payload_keeps_extra_turn() {
        let passive = PassiveSkill::new(
            "haste",
            Modifiers {
                extra_turn: 0.2,
                counter: 0.5,
                ..Modifiers::ZERO
            },
        );
        assert_eq!(passive.payload().extra_turn, 0.2);
        assert_eq!(passive.payload().counter, 0.0);
        assert!(!passive.has_side_payload());
    }

    #[test]
    fn skill_accessors() {
        let skill = Skill::Leader(LeaderSkill::new("banner", Modifiers::ZERO));
        assert_eq!(skill.name(), "banner");
        assert!(skill.as_active().is_none());
        assert!(skill.as_leader().is_some());
    }
}
