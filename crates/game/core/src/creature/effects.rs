//! Effect bookkeeping and the start-of-turn sequence.

use crate::effect::{BeneficialEffect, BeneficialKind, EffectError, HarmfulEffect, HarmfulKind};
use crate::skill::Skill;

use super::Creature;

/// What happened when a creature's turn began.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnStart {
    pub passives_activated: bool,
    pub expired_beneficial: Vec<BeneficialKind>,
    pub expired_harmful: Vec<HarmfulKind>,
    /// HP regained from HEAL_OVER_TIME.
    pub healed: f64,
    /// HP lost to DAMAGE_OVER_TIME.
    pub damaged: f64,
    /// Whether the creature may act this turn.
    pub can_move: bool,
}

impl Creature {
    pub fn add_beneficial_effect(&mut self, effect: BeneficialEffect) -> Result<(), EffectError> {
        if !self.capabilities().can_receive_beneficial() {
            return Err(EffectError::Blocked);
        }
        self.beneficial.add(effect)?;
        tracing::debug!(creature = %self.name, effect = %effect.kind, turns = effect.turns, "beneficial effect added");
        Ok(())
    }

    /// Add a harmful effect. OBLIVION switches passives off, so HP and MP
    /// are clamped to the lowered maxima.
    pub fn add_harmful_effect(&mut self, effect: HarmfulEffect) -> Result<(), EffectError> {
        if !self.capabilities().can_receive_harmful() {
            return Err(EffectError::Blocked);
        }
        self.harmful.add(effect)?;
        self.clamp_resources();
        tracing::debug!(creature = %self.name, effect = %effect.kind, turns = effect.turns, "harmful effect added");
        Ok(())
    }

    pub fn remove_beneficial_effect(&mut self, index: usize) -> Option<BeneficialEffect> {
        let removed = self.beneficial.remove(index)?;
        self.clamp_resources();
        Some(removed)
    }

    /// Remove a harmful effect. Lifting OBLIVION re-activates passives.
    pub fn remove_harmful_effect(&mut self, index: usize) -> Option<HarmfulEffect> {
        let removed = self.harmful.remove(index)?;
        if removed.kind == HarmfulKind::Oblivion {
            self.use_passive_skills();
        }
        self.clamp_resources();
        Some(removed)
    }

    /// Activate passive skills. Returns whether anything changed.
    pub fn use_passive_skills(&mut self) -> bool {
        if self.passive_active || !self.capabilities().can_use_passives() {
            return false;
        }
        self.passive_active = true;
        true
    }

    /// Deactivate passive skills. Returns whether anything changed.
    pub fn deactivate_passive_skills(&mut self) -> bool {
        if !self.passive_active {
            return false;
        }
        self.passive_active = false;
        self.clamp_resources();
        true
    }

    /// Run the start of this creature's turn.
    ///
    /// 1. Activate passives if allowed.
    /// 2. Count effects down and drop the expired ones.
    /// 3. Count cooltimes down.
    /// 4. Apply heal and damage over time.
    pub fn begin_turn(&mut self) -> TurnStart {
        let mut start = TurnStart {
            passives_activated: self.use_passive_skills(),
            ..TurnStart::default()
        };

        start.expired_beneficial = self.beneficial.tick().into_iter().map(|e| e.kind).collect();
        start.expired_harmful = self.harmful.tick().into_iter().map(|e| e.kind).collect();
        if start.expired_harmful.contains(&HarmfulKind::Oblivion) {
            start.passives_activated |= self.use_passive_skills();
        }
        self.clamp_resources();

        for skill in self.skills.iter_mut().filter_map(Skill::as_active_mut) {
            skill.tick_cooltime();
        }

        start.healed = self.apply_heal_over_time();
        start.damaged = self.apply_damage_over_time();
        start.can_move = self.is_alive() && self.capabilities().can_move();

        tracing::debug!(
            creature = %self.name,
            can_move = start.can_move,
            healed = start.healed,
            damaged = start.damaged,
            "turn started"
        );
        start
    }

    fn apply_heal_over_time(&mut self) -> f64 {
        let pct = self.modifiers().heal_per_turn_pct;
        if pct <= 0.0 {
            return 0.0;
        }
        let amount = self.max_hp() * pct / 100.0;
        self.heal(amount)
    }

    fn apply_damage_over_time(&mut self) -> f64 {
        let pct = self.modifiers().damage_per_turn_pct;
        if pct <= 0.0 || !self.is_alive() {
            return 0.0;
        }
        let amount = self.max_hp() * pct / 100.0;
        self.take_damage(amount)
    }
}
