//! Battle coordinator: two teams, the gauge race and action resolution.
//!
//! The [`Battle`] is the authoritative owner of every creature in a fight.
//! Creatures are addressed through [`Slot`]s, never through references, so
//! an action can read the attacker and mutate the defender in turn.
//!
//! A turn runs in three steps:
//!
//! 1. [`Battle::get_someone_to_move`] ticks gauges until someone is full.
//! 2. [`Battle::start_turn`] runs start-of-turn effects for that creature.
//! 3. [`Battle::resolve`] validates the choice, then applies it.

mod resolve;
mod turns;

pub use turns::TurnReport;

use crate::config::BattleConfig;
use crate::creature::Creature;
use crate::error::{ErrorSeverity, GameError};
use crate::team::{Side, Team, TeamError};

/// Non-owning reference to one creature in a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Slot {
    pub side: Side,
    pub index: usize,
}

impl Slot {
    pub const fn new(side: Side, index: usize) -> Self {
        Self { side, index }
    }
}

impl core::fmt::Display for Slot {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}#{}", self.side, self.index)
    }
}

/// Errors surfaced while looking for the next actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnError {
    #[error("no creature reached a full gauge within {ticks} ticks")]
    Stalled { ticks: u32 },

    #[error("no living creatures remain")]
    NoLivingCreatures,
}

impl GameError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Stalled { .. } => "TURN_STALLED",
            Self::NoLivingCreatures => "TURN_NO_LIVING_CREATURES",
        }
    }
}

/// Rewards for beating the opposing team.
///
/// With `S` the rating sum of team two: player EXP and creature EXP are
/// `10^S`, gold is `10^(S-2)` and gems are `10^(S-5)`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reward {
    pub player_exp: f64,
    pub gold: f64,
    pub gems: f64,
    pub creature_exp: f64,
}

impl Reward {
    pub fn from_rating_sum(sum: u32) -> Self {
        let s = sum as i32;
        Self {
            player_exp: 10f64.powi(s),
            gold: 10f64.powi(s - 2),
            gems: 10f64.powi(s - 5),
            creature_exp: 10f64.powi(s),
        }
    }
}

/// A fight between two teams.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Battle {
    teams: [Team; 2],
    reward: Reward,
    whose_turn: Option<Slot>,
    winner: Option<Side>,
    config: BattleConfig,
}

impl Battle {
    /// Set up a battle: tag sides, price the reward, restore every creature
    /// and spread the leader auras.
    pub fn new(team1: Team, team2: Team, config: BattleConfig) -> Result<Self, TeamError> {
        if team1.is_empty() || team2.is_empty() {
            return Err(TeamError::Empty);
        }

        let reward = Reward::from_rating_sum(team2.rating_sum());
        let mut battle = Self {
            teams: [team1, team2],
            reward,
            whose_turn: None,
            winner: None,
            config,
        };

        for side in [Side::One, Side::Two] {
            let team = battle.team_mut(side);
            for creature in team.creatures_mut() {
                creature.set_side(side);
            }
            team.restore_all();
            team.activate_leader_skill();
            for creature in team.creatures_mut() {
                creature.refill();
            }
        }

        tracing::debug!(
            team1 = %battle.teams[0].name,
            team2 = %battle.teams[1].name,
            "battle created"
        );
        Ok(battle)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn team(&self, side: Side) -> &Team {
        &self.teams[side.index()]
    }

    pub(crate) fn team_mut(&mut self, side: Side) -> &mut Team {
        &mut self.teams[side.index()]
    }

    pub fn creature(&self, slot: Slot) -> Option<&Creature> {
        self.team(slot.side).get(slot.index)
    }

    pub(crate) fn creature_mut(&mut self, slot: Slot) -> Option<&mut Creature> {
        self.team_mut(slot.side).get_mut(slot.index)
    }

    /// Every slot in scan order: team one, then team two, each in roster order.
    pub fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
        [Side::One, Side::Two].into_iter().flat_map(move |side| {
            (0..self.team(side).len()).map(move |index| Slot::new(side, index))
        })
    }

    /// Slots of the living creatures on `side`.
    pub fn living(&self, side: Side) -> impl Iterator<Item = Slot> + '_ {
        self.team(side)
            .living()
            .map(move |index| Slot::new(side, index))
    }

    pub fn reward(&self) -> Reward {
        self.reward
    }

    pub fn whose_turn(&self) -> Option<Slot> {
        self.whose_turn
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    // ========================================================================
    // Gauge race
    // ========================================================================

    /// Advance every living creature's gauge by `speed × tick_rate`.
    pub fn tick(&mut self) {
        let rate = self.config.tick_rate;
        for team in self.teams.iter_mut() {
            for creature in team.creatures_mut().iter_mut().filter(|c| c.is_alive()) {
                let gain = creature.speed() * rate;
                creature.advance_gauge(gain);
            }
        }
    }

    /// The living creature with the strictly highest full gauge, if any.
    /// Ties go to the first in scan order.
    fn ready_creature(&self) -> Option<Slot> {
        let mut best: Option<(Slot, f64)> = None;
        for slot in self.slots() {
            let Some(creature) = self.creature(slot) else {
                continue;
            };
            let gauge = creature.attack_gauge();
            if !creature.is_alive() || gauge < BattleConfig::FULL_ATTACK_GAUGE {
                continue;
            }
            if best.is_none_or(|(_, top)| gauge > top) {
                best = Some((slot, gauge));
            }
        }
        best.map(|(slot, _)| slot)
    }

    /// Tick until some creature's gauge is full and return it.
    ///
    /// Gives up after `max_ticks` ticks, which only happens when every
    /// living creature has zero speed.
    pub fn get_someone_to_move(&mut self) -> Result<Slot, TurnError> {
        if self.slots().all(|slot| {
            self.creature(slot).is_none_or(|c| !c.is_alive())
        }) {
            return Err(TurnError::NoLivingCreatures);
        }

        let mut ticks = 0;
        loop {
            if let Some(slot) = self.ready_creature() {
                self.whose_turn = Some(slot);
                return Ok(slot);
            }
            if ticks >= self.config.max_ticks {
                return Err(TurnError::Stalled { ticks });
            }
            self.tick();
            ticks += 1;
        }
    }

    // ========================================================================
    // Upkeep and outcome
    // ========================================================================

    /// Regenerate MP for every living creature.
    pub fn recover_mp_all_living(&mut self) {
        let config = self.config.clone();
        for team in self.teams.iter_mut() {
            for creature in team.creatures_mut().iter_mut().filter(|c| c.is_alive()) {
                creature.recover_mp(&config);
            }
        }
    }

    /// Record the winner once a team is wiped out.
    ///
    /// If both teams fall in the same action, team one wins.
    pub fn check_winner(&mut self) -> Option<Side> {
        if self.winner.is_none() {
            if self.team(Side::Two).all_died() {
                self.winner = Some(Side::One);
            } else if self.team(Side::One).all_died() {
                self.winner = Some(Side::Two);
            }
            if let Some(side) = self.winner {
                tracing::debug!(winner = %side, "battle decided");
            }
        }
        self.winner
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// End the battle: drop leader auras and restore every creature.
    pub fn finish(&mut self) -> Option<Side> {
        for team in self.teams.iter_mut() {
            team.deactivate_leader_skill();
            team.restore_all();
        }
        self.whose_turn = None;
        self.winner
    }

    /// Hand the teams back, e.g. after [`Battle::finish`].
    pub fn into_teams(self) -> [Team; 2] {
        self.teams
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::combat::Element;
    use crate::stats::BaseStats;

    pub(crate) fn duel(hp1: f64, speed1: f64, hp2: f64, speed2: f64) -> Battle {
        let a = Creature::new("a", Element::Neutral, 1, BaseStats::new(hp1, 60.0, 100.0, 0.0, speed1));
        let b = Creature::new("b", Element::Neutral, 1, BaseStats::new(hp2, 60.0, 100.0, 0.0, speed2));
        Battle::new(
            Team::from_creatures("one", [a]).unwrap(),
            Team::from_creatures("two", [b]).unwrap(),
            BattleConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn new_rejects_empty_team() {
        let err = Battle::new(Team::new("one"), Team::new("two"), BattleConfig::default());
        assert_eq!(err.err(), Some(TeamError::Empty));
    }

    #[test]
    fn reward_is_exponential_in_opponent_rating() {
        let reward = Reward::from_rating_sum(7);
        assert_eq!(reward.player_exp, 1e7);
        assert_eq!(reward.gold, 1e5);
        assert_eq!(reward.gems, 1e2);
        assert_eq!(reward.creature_exp, 1e7);
    }

    #[test]
    fn sides_are_tagged() {
        let battle = duel(10.0, 100.0, 10.0, 100.0);
        let b = battle.creature(Slot::new(Side::Two, 0)).unwrap();
        assert_eq!(b.side(), Some(Side::Two));
    }

    #[test]
    fn faster_creature_moves_first() {
        let mut battle = duel(10.0, 100.0, 10.0, 120.0);
        assert_eq!(battle.get_someone_to_move(), Ok(Slot::new(Side::Two, 0)));
        assert_eq!(battle.whose_turn(), Some(Slot::new(Side::Two, 0)));
    }

    #[test]
    fn ties_go_to_scan_order() {
        let mut battle = duel(10.0, 100.0, 10.0, 100.0);
        assert_eq!(battle.get_someone_to_move(), Ok(Slot::new(Side::One, 0)));
    }

    #[test]
    fn gauge_overflow_decides_who_moves() {
        let mut battle = duel(10.0, 100.0, 10.0, 100.0);
        let one = Slot::new(Side::One, 0);
        let two = Slot::new(Side::Two, 0);
        battle.creature_mut(one).unwrap().advance_gauge(1.2);
        battle.creature_mut(two).unwrap().advance_gauge(1.5);
        assert_eq!(battle.creature(two).unwrap().attack_gauge(), 1.5);

        assert_eq!(battle.get_someone_to_move(), Ok(two));
    }

    #[test]
    fn zero_speed_stalls() {
        let mut battle = duel(10.0, 0.0, 10.0, 0.0);
        battle.config = BattleConfig::default().with_max_ticks(50);
        assert_eq!(
            battle.get_someone_to_move(),
            Err(TurnError::Stalled { ticks: 50 })
        );
    }

    #[test]
    fn winner_is_recorded_once_a_team_falls() {
        let mut battle = duel(10.0, 100.0, 10.0, 100.0);
        assert_eq!(battle.check_winner(), None);
        battle
            .creature_mut(Slot::new(Side::Two, 0))
            .unwrap()
            .take_damage(100.0);
        assert_eq!(battle.check_winner(), Some(Side::One));
        assert!(battle.is_over());
        battle.finish();
        assert!(battle.creature(Slot::new(Side::Two, 0)).unwrap().is_alive());
    }
}
