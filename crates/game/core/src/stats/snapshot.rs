//! StatsSnapshot - effective stats frozen at a point in time.
//!
//! A snapshot is taken when an action starts so that damage against several
//! targets is computed from the attacker's stats as they were before any of
//! those hits landed (life drain, reflect, etc.).

use crate::combat::Element;
use crate::effect::Capabilities;

/// Effective stats of one creature, after runes and live modifiers.
///
/// `crit_rate` and `crit_damage` are the permanent value plus the live bonus,
/// unclamped; the damage evaluator applies the crit clamp itself.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatsSnapshot {
    pub element: Element,
    pub max_hp: f64,
    pub current_hp: f64,
    pub max_mp: f64,
    pub current_mp: f64,
    pub attack: f64,
    pub defense: f64,
    pub speed: f64,
    pub crit_rate: f64,
    pub crit_damage: f64,
    pub crit_resist: f64,
    pub resistance: f64,
    pub accuracy: f64,
    pub glancing: f64,
    pub extra_turn: f64,
    pub counter: f64,
    pub reflect_pct: f64,
    pub life_drain_pct: f64,
    pub damage_received_pct: f64,
    pub shield_pct: f64,
    pub stun_rate: f64,
    pub capabilities: Capabilities,
}

impl StatsSnapshot {
    /// Current HP as a percentage of max HP (0–100).
    pub fn current_hp_pct(&self) -> f64 {
        if self.max_hp <= 0.0 {
            return 0.0;
        }
        (self.current_hp / self.max_hp * 100.0).clamp(0.0, 100.0)
    }

    /// Missing HP as a percentage of max HP (0–100).
    pub fn hp_loss_pct(&self) -> f64 {
        100.0 - self.current_hp_pct()
    }
}
