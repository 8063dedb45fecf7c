use crate::action::{ActionChoice, ActionError, ActionOutcome};
use crate::creature::TurnStart;
use crate::rng::BattleRng;

use super::{Battle, Slot};

/// Result of a full turn: start-of-turn upkeep and, if the actor could
/// move, the resolved action.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnReport {
    pub start: TurnStart,
    /// `None` when the turn was forfeited.
    pub outcome: Option<ActionOutcome>,
}

/// Turn flow methods for Battle.
impl Battle {
    /// Begin `actor`'s turn: effects and cooltimes count down, over-time
    /// effects apply and the gauge is emptied.
    pub fn start_turn(&mut self, actor: Slot) -> Result<TurnStart, ActionError> {
        let creature = self.creature_mut(actor).ok_or(ActionError::UnknownSlot)?;
        if !creature.is_alive() {
            return Err(ActionError::ActorDead);
        }
        let start = creature.begin_turn();
        creature.reset_gauge();
        self.whose_turn = Some(actor);
        Ok(start)
    }

    /// Start `actor`'s turn and, if it can move, resolve `choice`.
    ///
    /// The turn counts as started even when the choice is rejected; the
    /// caller may then resolve a different choice for the same turn.
    pub fn take_turn(
        &mut self,
        actor: Slot,
        choice: ActionChoice,
        target: Slot,
        rng: &mut dyn BattleRng,
    ) -> Result<TurnReport, ActionError> {
        let start = self.start_turn(actor)?;
        if !start.can_move {
            tracing::debug!(%actor, "turn forfeited");
            return Ok(TurnReport {
                start,
                outcome: None,
            });
        }
        let outcome = self.resolve(actor, choice, target, rng)?;
        Ok(TurnReport {
            start,
            outcome: Some(outcome),
        })
    }

    /// Roll whether `target`, just hit by `attacker`, strikes back.
    ///
    /// Only a living target that can move rolls, and only against a living
    /// attacker.
    pub fn try_counter(&self, target: Slot, attacker: Slot, rng: &mut dyn BattleRng) -> bool {
        let (Some(counterer), Some(victim)) = (self.creature(target), self.creature(attacker))
        else {
            return false;
        };
        if !counterer.is_alive() || !victim.is_alive() || !counterer.capabilities().can_move() {
            return false;
        }
        let chance = counterer.snapshot().counter;
        chance > 0.0 && rng.roll(chance)
    }

    /// Strike back at `target` with the last usable attack skill, or a
    /// normal attack when none is usable.
    pub fn counterattack(
        &mut self,
        counterer: Slot,
        target: Slot,
        rng: &mut dyn BattleRng,
    ) -> Result<ActionOutcome, ActionError> {
        let creature = self.creature(counterer).ok_or(ActionError::UnknownSlot)?;
        let choice = creature
            .counter_skill()
            .map_or(ActionChoice::NormalAttack, ActionChoice::UseSkill);
        tracing::debug!(%counterer, %target, choice = choice.as_str(), "counterattack");
        self.resolve(counterer, choice, target, rng)
    }

    /// Roll whether `actor` acts again right away.
    pub fn try_extra_turn(&self, actor: Slot, rng: &mut dyn BattleRng) -> bool {
        let Some(creature) = self.creature(actor) else {
            return false;
        };
        if !creature.is_alive() {
            return false;
        }
        let chance = creature.snapshot().extra_turn;
        chance > 0.0 && rng.roll(chance)
    }
}
