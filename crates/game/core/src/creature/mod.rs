//! Creatures: identity, progression and per-battle state.
//!
//! Only [`BaseStats`] are stored. Effective stats are layered on read:
//!
//! ```text
//! stat = (base + rune flat) × (1 + rune%/100) × (1 + live%/100)
//! ```
//!
//! where the live layer is the sum of active effects, activated passives and
//! the received leader aura. Chance stats (crit, resistance, ...) add the
//! three layers and clamp to their bounds.
//!
//! Rune bonuses are summed before they apply: every flat bonus lands before
//! any rune percentage, whatever order the runes were equipped in. A stat
//! therefore depends only on the set of equipped runes.

mod effects;
mod progression;
mod runes;
mod skills;

pub use effects::TurnStart;
pub use progression::{AwakenBonus, ProgressionError, triangular};

use crate::combat::Element;
use crate::config::BattleConfig;
use crate::effect::{BeneficialKind, Capabilities, EffectList, HarmfulKind};
use crate::rune::{RuneBonus, RuneSlots};
use crate::skill::{PassiveSkill, Skill};
use crate::stats::{BaseStats, Bonus, BonusStack, Modifiers, StatsSnapshot};
use crate::team::Side;

/// Encounter tier of a creature.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Role {
    #[default]
    Normal,
    Miniboss,
    Boss,
}

/// A battle-ready creature.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Creature {
    name: String,
    element: Element,
    rating: u8,
    role: Role,
    level: u32,
    exp: f64,
    required_exp: f64,
    base: BaseStats,
    skills: Vec<Skill>,
    runes: RuneSlots,
    awaken_bonus: AwakenBonus,
    awakened: bool,

    current_hp: f64,
    current_mp: f64,
    attack_gauge: f64,
    beneficial: EffectList<BeneficialKind>,
    harmful: EffectList<HarmfulKind>,
    passive_active: bool,
    leader_aura: Modifiers,
    side: Option<Side>,
}

impl Creature {
    /// Level-1 creature at full HP and MP. `rating` is clamped to 1–6.
    pub fn new(name: impl Into<String>, element: Element, rating: u8, base: BaseStats) -> Self {
        let mut creature = Self {
            name: name.into(),
            element,
            rating: rating.clamp(1, BattleConfig::MAX_RATING),
            role: Role::Normal,
            level: 1,
            exp: 0.0,
            required_exp: BattleConfig::INITIAL_REQUIRED_EXP,
            base: base.clamp(),
            skills: Vec::new(),
            runes: RuneSlots::new(),
            awaken_bonus: AwakenBonus::default(),
            awakened: false,
            current_hp: 0.0,
            current_mp: 0.0,
            attack_gauge: BattleConfig::MIN_ATTACK_GAUGE,
            beneficial: EffectList::new(),
            harmful: EffectList::new(),
            passive_active: false,
            leader_aura: Modifiers::ZERO,
            side: None,
        };
        creature.restore();
        creature
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn with_skills(mut self, skills: Vec<Skill>) -> Self {
        self.skills.clear();
        for skill in skills {
            self.learn_skill(skill);
        }
        self
    }

    pub fn with_awaken_bonus(mut self, bonus: AwakenBonus) -> Self {
        self.awaken_bonus = bonus;
        self
    }

    // ========================================================================
    // Identity
    // ========================================================================

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn element(&self) -> Element {
        self.element
    }

    pub fn rating(&self) -> u8 {
        self.rating
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn exp(&self) -> f64 {
        self.exp
    }

    pub fn required_exp(&self) -> f64 {
        self.required_exp
    }

    pub fn base(&self) -> &BaseStats {
        &self.base
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    pub fn runes(&self) -> &RuneSlots {
        &self.runes
    }

    pub fn is_awakened(&self) -> bool {
        self.awakened
    }

    /// Side this creature fights on, once placed into a battle.
    pub fn side(&self) -> Option<Side> {
        self.side
    }

    pub(crate) fn set_side(&mut self, side: Side) {
        self.side = Some(side);
    }

    // ========================================================================
    // Battle state
    // ========================================================================

    pub fn current_hp(&self) -> f64 {
        self.current_hp
    }

    pub fn current_mp(&self) -> f64 {
        self.current_mp
    }

    pub fn attack_gauge(&self) -> f64 {
        self.attack_gauge
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0.0
    }

    pub fn beneficial_effects(&self) -> &EffectList<BeneficialKind> {
        &self.beneficial
    }

    pub fn harmful_effects(&self) -> &EffectList<HarmfulKind> {
        &self.harmful
    }

    pub fn passives_active(&self) -> bool {
        self.passive_active
    }

    pub fn leader_aura(&self) -> Modifiers {
        self.leader_aura
    }

    pub(crate) fn set_leader_aura(&mut self, aura: Modifiers) {
        self.leader_aura = aura;
        self.clamp_resources();
    }

    /// Raise the gauge. There is no upper cap: a gauge past full keeps its
    /// overflow, which ranks it among the creatures ready to act.
    pub(crate) fn advance_gauge(&mut self, amount: f64) {
        self.attack_gauge += amount;
    }

    /// Lower the gauge, never below the minimum.
    pub(crate) fn drain_gauge(&mut self, amount: f64) {
        self.attack_gauge = (self.attack_gauge - amount).max(BattleConfig::MIN_ATTACK_GAUGE);
    }

    pub(crate) fn reset_gauge(&mut self) {
        self.attack_gauge = BattleConfig::MIN_ATTACK_GAUGE;
    }

    // ========================================================================
    // Derived stats
    // ========================================================================

    /// What the creature may currently do, after effect revocations.
    pub fn capabilities(&self) -> Capabilities {
        Capabilities::all() - (self.beneficial.revoked() | self.harmful.revoked())
    }

    fn passive_payload(&self) -> Modifiers {
        self.skills
            .iter()
            .filter_map(Skill::as_passive)
            .map(PassiveSkill::payload)
            .sum()
    }

    /// Live modifier layer: effects, activated passives and the leader aura.
    pub fn modifiers(&self) -> Modifiers {
        let mut live = self.beneficial.payload() + self.harmful.payload() + self.leader_aura;
        if self.passive_active && self.capabilities().can_use_passives() {
            live += self.passive_payload();
        }
        live
    }

    fn layered(base: f64, flat: f64, rune_pct: f64, live_pct: f64) -> f64 {
        BonusStack::new()
            .with(Bonus::flat(flat))
            .with(Bonus::increased(rune_pct))
            .with(Bonus::more(live_pct))
            .apply_non_negative(base)
    }

    pub fn max_hp(&self) -> f64 {
        let rune = self.runes.bonus();
        Self::layered(
            self.base.max_hp,
            rune.hp,
            rune.modifiers.hp_pct,
            self.modifiers().hp_pct,
        )
    }

    pub fn max_mp(&self) -> f64 {
        let rune = self.runes.bonus();
        Self::layered(
            self.base.max_mp,
            rune.mp,
            rune.modifiers.mp_pct,
            self.modifiers().mp_pct,
        )
    }

    pub fn attack(&self) -> f64 {
        self.snapshot().attack
    }

    pub fn defense(&self) -> f64 {
        self.snapshot().defense
    }

    pub fn speed(&self) -> f64 {
        self.snapshot().speed
    }

    /// Freeze the effective stats for a damage calculation.
    pub fn snapshot(&self) -> StatsSnapshot {
        let rune: RuneBonus = self.runes.bonus();
        let live = self.modifiers();
        let r = &rune.modifiers;
        let all = *r + live;

        StatsSnapshot {
            element: self.element,
            max_hp: Self::layered(self.base.max_hp, rune.hp, r.hp_pct, live.hp_pct),
            current_hp: self.current_hp,
            max_mp: Self::layered(self.base.max_mp, rune.mp, r.mp_pct, live.mp_pct),
            current_mp: self.current_mp,
            attack: Self::layered(self.base.attack, rune.attack, r.attack_pct, live.attack_pct),
            defense: Self::layered(
                self.base.defense,
                rune.defense,
                r.defense_pct,
                live.defense_pct,
            ),
            speed: Self::layered(self.base.speed, rune.speed, r.speed_pct, live.speed_pct),
            crit_rate: (self.base.crit_rate + r.crit_rate)
                .clamp(BattleConfig::MIN_CRIT_RATE, BattleConfig::MAX_CRIT_RATE)
                + live.crit_rate,
            crit_damage: (self.base.crit_damage + r.crit_damage)
                .max(BattleConfig::MIN_CRIT_DAMAGE)
                + live.crit_damage,
            crit_resist: all.crit_resist.clamp(0.0, BattleConfig::MAX_CRIT_RESIST),
            resistance: (self.base.resistance + all.resistance)
                .clamp(BattleConfig::MIN_RESISTANCE, BattleConfig::MAX_RESISTANCE),
            accuracy: (self.base.accuracy + all.accuracy)
                .clamp(BattleConfig::MIN_ACCURACY, BattleConfig::MAX_ACCURACY),
            glancing: all.glancing.max(0.0),
            extra_turn: all.extra_turn.clamp(0.0, BattleConfig::MAX_EXTRA_TURN_CHANCE),
            counter: all.counter.clamp(0.0, BattleConfig::MAX_COUNTER_CHANCE),
            reflect_pct: all.reflect_pct.max(0.0),
            life_drain_pct: all.life_drain_pct.max(0.0),
            damage_received_pct: all.damage_received_pct,
            shield_pct: all.shield_pct.clamp(0.0, 100.0),
            stun_rate: all.stun_rate.max(0.0),
            capabilities: self.capabilities(),
        }
    }

    // ========================================================================
    // HP / MP
    // ========================================================================

    /// Reset to a fresh battle state.
    ///
    /// Clears every effect, the passive flag and the leader aura, empties the
    /// gauge, resets cooltimes and refills HP and MP to the resulting maxima.
    pub fn restore(&mut self) {
        self.beneficial.clear();
        self.harmful.clear();
        self.passive_active = false;
        self.leader_aura = Modifiers::ZERO;
        self.attack_gauge = BattleConfig::MIN_ATTACK_GAUGE;
        for skill in self.skills.iter_mut().filter_map(Skill::as_active_mut) {
            skill.reset_cooltime();
        }
        self.refill();
    }

    /// Top HP and MP up to their current maxima.
    pub(crate) fn refill(&mut self) {
        self.current_hp = self.max_hp();
        self.current_mp = self.max_mp();
    }

    /// Keep current HP and MP within their maxima after a max drops.
    pub(crate) fn clamp_resources(&mut self) {
        self.current_hp = self.current_hp.min(self.max_hp());
        self.current_mp = self.current_mp.min(self.max_mp());
    }

    /// Apply damage and return how much HP was actually lost.
    ///
    /// ENDURE holds HP at 1 when the hit would otherwise drop it below 1.
    pub fn take_damage(&mut self, amount: f64) -> f64 {
        let before = self.current_hp;
        let mut after = before - amount.max(0.0);
        if after < 1.0 && before >= 1.0 && !self.capabilities().can_die() {
            after = 1.0;
        }
        self.current_hp = after.max(0.0);
        if before > 0.0 && self.current_hp <= 0.0 {
            tracing::debug!(creature = %self.name, "creature died");
        }
        before - self.current_hp
    }

    /// Heal and return how much HP was actually restored.
    ///
    /// Dead creatures and UNRECOVERABLE creatures are not healed.
    pub fn heal(&mut self, amount: f64) -> f64 {
        if !self.is_alive() || !self.capabilities().can_be_healed() {
            return 0.0;
        }
        let before = self.current_hp;
        self.current_hp = (before + amount.max(0.0)).min(self.max_hp());
        (self.current_hp - before).max(0.0)
    }

    /// Regenerate `max MP / mp_regen_divisor`, clamped to max.
    pub fn recover_mp(&mut self, config: &BattleConfig) -> f64 {
        let max = self.max_mp();
        if config.mp_regen_divisor <= 0.0 {
            return 0.0;
        }
        let before = self.current_mp;
        self.current_mp = (before + max / config.mp_regen_divisor).min(max);
        self.current_mp - before
    }

    pub(crate) fn spend_mp(&mut self, amount: f64) {
        self.current_mp = (self.current_mp - amount).max(0.0);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::effect::{BeneficialEffect, HarmfulEffect};

    pub(crate) fn sample() -> Creature {
        Creature::new(
            "Ignis",
            Element::Fire,
            3,
            BaseStats::new(1000.0, 120.0, 100.0, 50.0, 100.0),
        )
    }

    #[test]
    fn new_creature_is_full() {
        let c = sample();
        assert_eq!(c.current_hp(), 1000.0);
        assert_eq!(c.current_mp(), 120.0);
        assert_eq!(c.level(), 1);
        assert_eq!(c.required_exp(), 1e6);
        assert!(c.is_alive());
    }

    #[test]
    fn restore_is_idempotent() {
        let mut c = sample();
        c.add_harmful_effect(HarmfulEffect::new(HarmfulKind::DecreaseAtk, 3))
            .unwrap();
        c.add_beneficial_effect(BeneficialEffect::new(BeneficialKind::Shield, 2))
            .unwrap();
        c.take_damage(400.0);
        c.advance_gauge(0.6);

        c.restore();
        let once = c.clone();
        c.restore();

        assert_eq!(c, once);
        assert_eq!(c.current_hp(), c.max_hp());
        assert_eq!(c.current_mp(), c.max_mp());
        assert!(c.beneficial_effects().is_empty());
        assert!(c.harmful_effects().is_empty());
        assert_eq!(c.attack_gauge(), 0.0);
        assert_eq!(c.capabilities(), Capabilities::all());
    }

    #[test]
    fn endure_holds_at_one_hp() {
        let mut c = sample();
        c.add_beneficial_effect(BeneficialEffect::new(BeneficialKind::Endure, 2))
            .unwrap();
        let lost = c.take_damage(5000.0);
        assert_eq!(c.current_hp(), 1.0);
        assert_eq!(lost, 999.0);
        assert!(c.is_alive());
    }

    #[test]
    fn damage_floors_at_zero() {
        let mut c = sample();
        assert_eq!(c.take_damage(5000.0), 1000.0);
        assert_eq!(c.current_hp(), 0.0);
        assert!(!c.is_alive());
        assert_eq!(c.heal(100.0), 0.0);
    }

    #[test]
    fn unrecoverable_blocks_heal() {
        let mut c = sample();
        c.take_damage(500.0);
        c.add_harmful_effect(HarmfulEffect::new(HarmfulKind::Unrecoverable, 2))
            .unwrap();
        assert_eq!(c.heal(100.0), 0.0);
        c.restore();
        c.take_damage(500.0);
        assert_eq!(c.heal(800.0), 500.0);
    }

    #[test]
    fn mp_regen_is_a_twelfth() {
        let mut c = sample();
        c.spend_mp(120.0);
        assert_eq!(c.recover_mp(&BattleConfig::default()), 10.0);
        assert_eq!(c.current_mp(), 10.0);
    }

    #[test]
    fn snapshot_clamps_chances() {
        let mut c = sample();
        c.set_leader_aura(Modifiers {
            resistance: 5.0,
            accuracy: -2.0,
            ..Modifiers::ZERO
        });
        let snap = c.snapshot();
        assert_eq!(snap.resistance, 1.0);
        assert_eq!(snap.accuracy, 0.0);
    }
}
