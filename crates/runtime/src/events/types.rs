//! Events emitted while a battle runs.

use arena_core::{ActionChoice, ActionOutcome, Side, Slot, TurnStart};
use serde::{Deserialize, Serialize};

/// One step of a battle, in the order it happened.
///
/// Externally tagged so the binary log can decode it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BattleEvent {
    BattleStarted {
        team_one: String,
        team_two: String,
    },

    /// Start-of-turn upkeep ran for `actor`.
    TurnStarted { actor: Slot, start: TurnStart },

    ActionResolved {
        actor: Slot,
        choice: ActionChoice,
        target: Slot,
        outcome: ActionOutcome,
    },

    /// `actor` could not move this turn.
    TurnForfeited { actor: Slot },

    Counterattack {
        counterer: Slot,
        target: Slot,
        outcome: ActionOutcome,
    },

    /// `actor` acts again before the next gauge scan.
    ExtraTurn { actor: Slot },

    CreatureDefeated { slot: Slot, name: String },

    BattleEnded {
        winner: Option<Side>,
        /// Resolved actions, counterattacks included.
        actions: u32,
    },
}

impl BattleEvent {
    pub fn name(&self) -> &'static str {
        match self {
            BattleEvent::BattleStarted { .. } => "battle_started",
            BattleEvent::TurnStarted { .. } => "turn_started",
            BattleEvent::ActionResolved { .. } => "action_resolved",
            BattleEvent::TurnForfeited { .. } => "turn_forfeited",
            BattleEvent::Counterattack { .. } => "counterattack",
            BattleEvent::ExtraTurn { .. } => "extra_turn",
            BattleEvent::CreatureDefeated { .. } => "creature_defeated",
            BattleEvent::BattleEnded { .. } => "battle_ended",
        }
    }

    /// The creature whose turn or action this event describes.
    pub fn actor(&self) -> Option<Slot> {
        match self {
            BattleEvent::TurnStarted { actor, .. }
            | BattleEvent::ActionResolved { actor, .. }
            | BattleEvent::TurnForfeited { actor }
            | BattleEvent::ExtraTurn { actor } => Some(*actor),
            BattleEvent::Counterattack { counterer, .. } => Some(*counterer),
            BattleEvent::BattleStarted { .. }
            | BattleEvent::CreatureDefeated { .. }
            | BattleEvent::BattleEnded { .. } => None,
        }
    }
}
