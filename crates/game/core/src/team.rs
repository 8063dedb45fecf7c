//! Teams of up to five creatures and the leader aura they share.

use arrayvec::ArrayVec;

use crate::config::BattleConfig;
use crate::creature::Creature;
use crate::error::{ErrorSeverity, GameError};
use crate::stats::Modifiers;

/// Which side of a battle a team fights on.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    One,
    Two,
}

impl Side {
    pub const fn opposite(self) -> Self {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }

    /// Position of this side in a `[Team; 2]`.
    pub const fn index(self) -> usize {
        match self {
            Side::One => 0,
            Side::Two => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TeamError {
    #[error("team already holds {} creatures", BattleConfig::TEAM_SIZE)]
    Full,

    #[error("team has no creatures")]
    Empty,
}

impl GameError for TeamError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Full => "TEAM_FULL",
            Self::Empty => "TEAM_EMPTY",
        }
    }
}

/// An ordered roster. The first creature is the leader.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Team {
    pub name: String,
    creatures: ArrayVec<Creature, { BattleConfig::TEAM_SIZE }>,
}

impl Team {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            creatures: ArrayVec::new(),
        }
    }

    /// Build a team from a roster, failing if it holds more than five.
    pub fn from_creatures(
        name: impl Into<String>,
        creatures: impl IntoIterator<Item = Creature>,
    ) -> Result<Self, TeamError> {
        let mut team = Self::new(name);
        for creature in creatures {
            team.add(creature)?;
        }
        Ok(team)
    }

    pub fn add(&mut self, creature: Creature) -> Result<(), TeamError> {
        self.creatures.try_push(creature).map_err(|_| TeamError::Full)
    }

    pub fn remove(&mut self, index: usize) -> Option<Creature> {
        if index < self.creatures.len() {
            Some(self.creatures.remove(index))
        } else {
            None
        }
    }

    pub fn leader(&self) -> Option<&Creature> {
        self.creatures.first()
    }

    pub fn get(&self, index: usize) -> Option<&Creature> {
        self.creatures.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Creature> {
        self.creatures.get_mut(index)
    }

    pub fn creatures(&self) -> &[Creature] {
        &self.creatures
    }

    pub fn creatures_mut(&mut self) -> &mut [Creature] {
        &mut self.creatures
    }

    pub fn len(&self) -> usize {
        self.creatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.creatures.is_empty()
    }

    /// True when no creature is standing. An empty team counts as defeated.
    pub fn all_died(&self) -> bool {
        self.creatures.iter().all(|c| !c.is_alive())
    }

    /// Indices of the creatures still alive.
    pub fn living(&self) -> impl Iterator<Item = usize> + '_ {
        self.creatures
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_alive())
            .map(|(i, _)| i)
    }

    pub fn rating_sum(&self) -> u32 {
        self.creatures.iter().map(|c| u32::from(c.rating())).sum()
    }

    /// Aura the leader broadcasts to every member.
    pub fn leader_aura(&self) -> Modifiers {
        self.leader()
            .map(|leader| {
                leader
                    .skills()
                    .iter()
                    .filter_map(|s| s.as_leader())
                    .map(|s| s.payload())
                    .sum()
            })
            .unwrap_or(Modifiers::ZERO)
    }

    /// Grant the leader aura to every member. Returns whether any aura applied.
    pub fn activate_leader_skill(&mut self) -> bool {
        let aura = self.leader_aura();
        if aura.is_zero() {
            return false;
        }
        for creature in self.creatures.iter_mut() {
            creature.set_leader_aura(aura);
        }
        tracing::debug!(team = %self.name, "leader skill activated");
        true
    }

    pub fn deactivate_leader_skill(&mut self) {
        for creature in self.creatures.iter_mut() {
            creature.set_leader_aura(Modifiers::ZERO);
        }
    }

    pub fn restore_all(&mut self) {
        for creature in self.creatures.iter_mut() {
            creature.restore();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::Element;
    use crate::skill::{LeaderSkill, Skill};
    use crate::stats::BaseStats;

    fn grunt(name: &str) -> Creature {
        Creature::new(name, Element::Fire, 2, BaseStats::new(100.0, 50.0, 10.0, 5.0, 100.0))
    }

    #[test]
    fn sixth_creature_is_rejected() {
        let mut team = Team::new("blue");
        for i in 0..5 {
            team.add(grunt(&format!("g{i}"))).unwrap();
        }
        assert_eq!(team.add(grunt("extra")), Err(TeamError::Full));
        assert_eq!(team.rating_sum(), 10);
    }

    #[test]
    fn all_died_tracks_hp() {
        let mut team = Team::from_creatures("blue", [grunt("a"), grunt("b")]).unwrap();
        assert!(!team.all_died());
        team.get_mut(0).unwrap().take_damage(1e9);
        assert_eq!(team.living().collect::<Vec<_>>(), vec![1]);
        team.get_mut(1).unwrap().take_damage(1e9);
        assert!(team.all_died());
    }

    #[test]
    fn leader_aura_reaches_every_member() {
        let leader = grunt("chief").with_skills(vec![Skill::Leader(LeaderSkill::new(
            "rally",
            Modifiers {
                attack_pct: 20.0,
                ..Modifiers::ZERO
            },
        ))]);
        let mut team = Team::from_creatures("blue", [leader, grunt("b")]).unwrap();
        let before = team.get(1).unwrap().attack();
        assert!(team.activate_leader_skill());
        assert!((team.get(1).unwrap().attack() - before * 1.2).abs() < 1e-9);
        team.deactivate_leader_skill();
        assert_eq!(team.get(1).unwrap().attack(), before);
    }

    #[test]
    fn side_opposite() {
        assert_eq!(Side::One.opposite(), Side::Two);
        assert_eq!(Side::Two.index(), 1);
    }
}
