//! Battle runner: drives a [`Battle`] from setup to a winner.
//!
//! Each step asks the gauge race for the next actor, runs its turn upkeep,
//! asks the actor's [`ActionProvider`] for a decision and resolves it. After
//! the action come the counterattack rolls of every surviving target, MP
//! regeneration and finally the actor's extra-turn roll.
//!
//! Every step is reported to the optional [`EventSink`].

use arena_core::{
    ActionChoice, ActionOutcome, Battle, BattleRng, Reward, Side, Slot, Team,
};

use crate::api::{ActionProvider, Decision, Result, RuntimeError};
use crate::events::BattleEvent;
use crate::repository::EventSink;

/// A creature still standing when the battle ended.
#[derive(Clone, Debug, PartialEq)]
pub struct Survivor {
    pub slot: Slot,
    pub name: String,
    pub hp: f64,
    pub max_hp: f64,
}

/// Result of a finished battle.
#[derive(Clone, Debug, PartialEq)]
pub struct BattleSummary {
    pub winner: Side,
    /// Resolved actions, counterattacks included.
    pub actions: u32,
    /// Reward earned by team one; `None` when team two won.
    pub reward: Option<Reward>,
    pub survivors: Vec<Survivor>,
}

/// Owns a battle and everything needed to play it out.
pub struct BattleRunner {
    battle: Battle,
    providers: [Box<dyn ActionProvider>; 2],
    rng: Box<dyn BattleRng>,
    sink: Option<Box<dyn EventSink>>,
    actions: u32,
}

impl BattleRunner {
    pub fn new(
        battle: Battle,
        team_one: impl ActionProvider + 'static,
        team_two: impl ActionProvider + 'static,
        rng: impl BattleRng + 'static,
    ) -> Self {
        Self {
            battle,
            providers: [Box::new(team_one), Box::new(team_two)],
            rng: Box::new(rng),
            sink: None,
            actions: 0,
        }
    }

    /// Report every battle event to `sink`.
    pub fn with_sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn battle(&self) -> &Battle {
        &self.battle
    }

    /// Resolved actions so far, counterattacks included.
    pub fn actions(&self) -> u32 {
        self.actions
    }

    /// Play until one team is wiped out.
    ///
    /// # Errors
    ///
    /// Fails with [`RuntimeError::ActionLimitReached`] once `max_actions`
    /// actions resolve without a winner, and passes through gauge race,
    /// provider and event log failures.
    pub fn run(&mut self) -> Result<BattleSummary> {
        self.emit(BattleEvent::BattleStarted {
            team_one: self.battle.team(Side::One).name.clone(),
            team_two: self.battle.team(Side::Two).name.clone(),
        })?;
        tracing::info!(
            team_one = %self.battle.team(Side::One).name,
            team_two = %self.battle.team(Side::Two).name,
            "battle started"
        );

        let limit = self.battle.config().max_actions;
        let winner = loop {
            if let Some(winner) = self.battle.check_winner() {
                break winner;
            }
            if self.actions >= limit {
                self.emit(BattleEvent::BattleEnded {
                    winner: None,
                    actions: self.actions,
                })?;
                self.flush()?;
                tracing::warn!(limit, "battle hit the action limit");
                return Err(RuntimeError::ActionLimitReached { limit });
            }
            self.step()?;
        };

        self.emit(BattleEvent::BattleEnded {
            winner: Some(winner),
            actions: self.actions,
        })?;
        self.flush()?;

        let summary = self.summary(winner);
        tracing::info!(
            winner = %self.battle.team(winner).name,
            actions = summary.actions,
            survivors = summary.survivors.len(),
            "battle ended"
        );
        Ok(summary)
    }

    /// Play the next actor's turn, plus its extra turn if one is rolled.
    pub fn step(&mut self) -> Result<()> {
        let actor = self.battle.get_someone_to_move()?;
        let acted = self.play_turn(actor)?;

        if acted
            && !self.battle.is_over()
            && self.battle.try_extra_turn(actor, &mut *self.rng)
        {
            tracing::debug!(%actor, "extra turn");
            self.emit(BattleEvent::ExtraTurn { actor })?;
            self.play_turn(actor)?;
        }
        Ok(())
    }

    /// End the battle and hand back both teams, restored.
    pub fn finish(mut self) -> [Team; 2] {
        self.battle.finish();
        self.battle.into_teams()
    }

    // ========================================================================
    // Turn flow
    // ========================================================================

    /// Run `actor`'s turn. Returns whether it got to act.
    fn play_turn(&mut self, actor: Slot) -> Result<bool> {
        let start = self.battle.start_turn(actor)?;
        let can_move = start.can_move;
        self.emit(BattleEvent::TurnStarted { actor, start })?;

        if !can_move {
            tracing::debug!(%actor, "turn forfeited");
            self.emit(BattleEvent::TurnForfeited { actor })?;
            self.report_if_defeated(actor)?;
            self.battle.check_winner();
            return Ok(false);
        }

        let decision =
            self.providers[actor.side.index()].provide(&self.battle, actor, &mut *self.rng)?;
        let (decision, outcome) = self.resolve_or_attack(actor, decision)?;
        self.actions += 1;

        self.emit(BattleEvent::ActionResolved {
            actor,
            choice: decision.choice,
            target: decision.target,
            outcome: outcome.clone(),
        })?;
        self.report_defeats(actor, &outcome)?;

        if self.battle.check_winner().is_none() {
            self.counterattacks(actor, &outcome)?;
        }
        self.battle.recover_mp_all_living();
        Ok(true)
    }

    /// Resolve `decision`, or a normal attack on the first living enemy if
    /// the battle rejects it.
    fn resolve_or_attack(
        &mut self,
        actor: Slot,
        decision: Decision,
    ) -> Result<(Decision, ActionOutcome)> {
        match self
            .battle
            .resolve(actor, decision.choice, decision.target, &mut *self.rng)
        {
            Ok(outcome) => Ok((decision, outcome)),
            Err(err) => {
                let target = self
                    .battle
                    .living(actor.side.opposite())
                    .next()
                    .ok_or(RuntimeError::NoLivingTarget { actor })?;
                tracing::warn!(
                    %actor,
                    choice = decision.choice.as_str(),
                    target = %decision.target,
                    %err,
                    "decision rejected, falling back to normal attack"
                );
                let fallback = Decision::attack(target);
                let outcome =
                    self.battle
                        .resolve(actor, ActionChoice::NormalAttack, target, &mut *self.rng)?;
                Ok((fallback, outcome))
            }
        }
    }

    /// Every surviving target of `outcome` may strike back once. Counters
    /// never trigger further counters.
    fn counterattacks(&mut self, attacker: Slot, outcome: &ActionOutcome) -> Result<()> {
        let targets: Vec<Slot> = outcome.surviving_targets().collect();
        for counterer in targets {
            if !self.battle.try_counter(counterer, attacker, &mut *self.rng) {
                continue;
            }
            let outcome = self
                .battle
                .counterattack(counterer, attacker, &mut *self.rng)?;
            self.actions += 1;

            self.emit(BattleEvent::Counterattack {
                counterer,
                target: attacker,
                outcome: outcome.clone(),
            })?;
            self.report_defeats(counterer, &outcome)?;

            if self.battle.check_winner().is_some() {
                break;
            }
        }
        Ok(())
    }

    // ========================================================================
    // Events
    // ========================================================================

    fn report_defeats(&mut self, actor: Slot, outcome: &ActionOutcome) -> Result<()> {
        let killed: Vec<Slot> = outcome.killed().collect();
        for slot in killed {
            self.report_defeated(slot)?;
        }
        if outcome.actor_killed {
            self.report_defeated(actor)?;
        }
        Ok(())
    }

    fn report_if_defeated(&mut self, slot: Slot) -> Result<()> {
        if self.battle.creature(slot).is_some_and(|c| !c.is_alive()) {
            self.report_defeated(slot)?;
        }
        Ok(())
    }

    fn report_defeated(&mut self, slot: Slot) -> Result<()> {
        let name = self
            .battle
            .creature(slot)
            .map(|c| c.name().to_string())
            .unwrap_or_default();
        tracing::debug!(%slot, creature = %name, "creature defeated");
        self.emit(BattleEvent::CreatureDefeated { slot, name })
    }

    fn emit(&mut self, event: BattleEvent) -> Result<()> {
        if let Some(sink) = self.sink.as_mut() {
            sink.emit(&event)?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(sink) = self.sink.as_mut() {
            sink.flush()?;
        }
        Ok(())
    }

    fn summary(&self, winner: Side) -> BattleSummary {
        let survivors = self
            .battle
            .slots()
            .filter_map(|slot| {
                let creature = self.battle.creature(slot)?;
                creature.is_alive().then(|| Survivor {
                    slot,
                    name: creature.name().to_string(),
                    hp: creature.current_hp(),
                    max_hp: creature.max_hp(),
                })
            })
            .collect();

        BattleSummary {
            winner,
            actions: self.actions,
            reward: (winner == Side::One).then(|| self.battle.reward()),
            survivors,
        }
    }
}

#[cfg(test)]
mod tests {
    use arena_core::{
        BaseStats, BattleConfig, Creature, Element, SequenceRng, Team,
    };

    use super::*;
    use crate::providers::ScriptedProvider;
    use crate::repository::MemorySink;

    const ONE: Slot = Slot::new(Side::One, 0);
    const TWO: Slot = Slot::new(Side::Two, 0);

    fn battle(hp_two: f64, config: BattleConfig) -> Battle {
        let a = Creature::new("a", Element::Neutral, 1, BaseStats::new(1000.0, 60.0, 100.0, 0.0, 100.0));
        let b = Creature::new("b", Element::Neutral, 1, BaseStats::new(hp_two, 60.0, 100.0, 0.0, 100.0));
        Battle::new(
            Team::from_creatures("one", [a]).unwrap(),
            Team::from_creatures("two", [b]).unwrap(),
            config,
        )
        .unwrap()
    }

    #[test]
    fn rejected_decision_falls_back_to_attack() {
        let sink = MemorySink::new();
        // Attacking yourself is rejected
        let mut runner = BattleRunner::new(
            battle(1.0, BattleConfig::default()),
            ScriptedProvider::new([Decision::attack(ONE)]),
            ScriptedProvider::default(),
            SequenceRng::constant(0.5),
        )
        .with_sink(sink.clone());

        let summary = runner.run().unwrap();
        assert_eq!(summary.winner, Side::One);
        assert_eq!(summary.actions, 1);

        let events = sink.events().unwrap();
        let resolved = events
            .iter()
            .find_map(|e| match e {
                BattleEvent::ActionResolved { choice, target, .. } => Some((*choice, *target)),
                _ => None,
            })
            .unwrap();
        assert_eq!(resolved, (ActionChoice::NormalAttack, TWO));
    }

    #[test]
    fn action_limit_stops_a_stalemate() {
        // Both sides only heal
        let config = BattleConfig::default().with_max_actions(6);
        let mut runner = BattleRunner::new(
            battle(1000.0, config),
            ScriptedProvider::repeat(Decision::heal(ONE)),
            ScriptedProvider::repeat(Decision::heal(TWO)),
            SequenceRng::constant(0.5),
        );

        let err = runner.run().unwrap_err();
        assert!(matches!(err, RuntimeError::ActionLimitReached { limit: 6 }));
        assert_eq!(runner.actions(), 6);
    }

    #[test]
    fn finish_restores_both_teams() {
        let mut runner = BattleRunner::new(
            battle(1.0, BattleConfig::default()),
            ScriptedProvider::repeat(Decision::attack(TWO)),
            ScriptedProvider::default(),
            SequenceRng::constant(0.5),
        );
        runner.run().unwrap();
        let [_, two] = runner.finish();
        assert!(two.creatures()[0].is_alive());
    }
}
