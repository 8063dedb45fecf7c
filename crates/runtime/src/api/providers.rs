//! Abstraction for sourcing each creature's action.
//!
//! Runtime users plug in [`ActionProvider`] implementations so a battle can
//! run with AI policies, scripted fixtures or human input.
use arena_core::{ActionChoice, Battle, BattleRng, Slot};

use super::errors::Result;

/// An action and the creature it is aimed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decision {
    pub choice: ActionChoice,
    pub target: Slot,
}

impl Decision {
    pub const fn new(choice: ActionChoice, target: Slot) -> Self {
        Self { choice, target }
    }

    pub const fn attack(target: Slot) -> Self {
        Self::new(ActionChoice::NormalAttack, target)
    }

    /// A normal heal, which always targets the actor.
    pub const fn heal(actor: Slot) -> Self {
        Self::new(ActionChoice::NormalHeal, actor)
    }

    pub const fn skill(index: usize, target: Slot) -> Self {
        Self::new(ActionChoice::UseSkill(index), target)
    }
}

/// Trait for choosing what a creature does with its turn.
///
/// Different implementations can handle:
/// - AI decisions
/// - Scripted/replayed actions
/// - Player input
pub trait ActionProvider {
    /// Decide the action of `actor` given the current battle.
    ///
    /// The decision is validated by the battle; a rejected decision is
    /// replaced by a normal attack.
    fn provide(
        &mut self,
        battle: &Battle,
        actor: Slot,
        rng: &mut dyn BattleRng,
    ) -> Result<Decision>;
}
