//! Damage calculation.

use crate::config::BattleConfig;
use crate::rng::BattleRng;
use crate::stats::StatsSnapshot;

use super::elements::{crushing_applies, glancing_chance_by_elements};
use super::multiplier::DamageMultiplier;

/// Damage scale of a glancing hit.
pub const GLANCING_MULTIPLIER: f64 = 0.7;
/// Damage scale of a crushing hit.
pub const CRUSHING_MULTIPLIER: f64 = 1.3;

// ============================================================================
// Hit classification
// ============================================================================

/// How a damage roll resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum HitKind {
    /// Target is invincible; no damage.
    Blocked,
    Glancing,
    Crushing,
    Critical,
    Normal,
}

/// Result of one damage calculation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageRoll {
    pub amount: f64,
    pub hit: HitKind,
}

impl DamageRoll {
    pub const BLOCKED: Self = Self {
        amount: 0.0,
        hit: HitKind::Blocked,
    };
}

/// Which protections a skill bypasses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DamageFlags {
    pub ignore_defense: bool,
    pub ignore_shield: bool,
    pub ignore_invincibility: bool,
}

// ============================================================================
// Chances
// ============================================================================

/// Fraction of damage that gets through `defense`.
///
/// ```text
/// factor = 1e8 / (1e8 + 3.5 × defense)
/// ```
pub fn defense_factor(defense: f64) -> f64 {
    1e8 / (1e8 + 3.5 * defense.max(0.0))
}

/// Critical hit chance, clamped to `[0.15, 1]`.
pub fn crit_chance(user: &StatsSnapshot, target: &StatsSnapshot) -> f64 {
    (user.crit_rate - target.crit_resist)
        .clamp(BattleConfig::MIN_CRIT_RATE, BattleConfig::MAX_CRIT_RATE)
}

/// Crushing hit chance; zero unless the element pair allows crushing.
pub fn crushing_chance(user: &StatsSnapshot, target: &StatsSnapshot) -> f64 {
    if !crushing_applies(user.element, target.element) {
        return 0.0;
    }
    (1.0 - (user.crit_rate - target.crit_resist)).max(0.0)
}

/// Glancing hit chance from the attacker's modifiers plus the element pair.
pub fn glancing_chance(user: &StatsSnapshot, target: &StatsSnapshot) -> f64 {
    user.glancing + glancing_chance_by_elements(user.element, target.element)
}

/// Chance that a harmful effect is resisted.
///
/// A harmful effect lands when `roll >= resist_chance`.
pub fn resist_chance(user: &StatsSnapshot, target: &StatsSnapshot) -> f64 {
    (target.resistance - user.accuracy).max(BattleConfig::MIN_RESIST_CHANCE)
}

// ============================================================================
// Damage
// ============================================================================

/// Calculate the damage a skill deals.
///
/// # Order
///
/// 1. Defense factor (skipped with `ignore_defense`)
/// 2. Raw damage from the multiplier template
/// 3. Shield reduction (skipped with `ignore_shield`)
/// 4. Invincibility blocks everything (skipped with `ignore_invincibility`)
/// 5. Glancing roll: ×0.7
/// 6. Crushing roll: ×1.3
/// 7. Critical roll: ×crit damage
///
/// Rolls 5–7 each draw once from `rng`, in that order, until one succeeds.
pub fn calculate_raw_damage(
    user: &StatsSnapshot,
    target: &StatsSnapshot,
    multiplier: &DamageMultiplier,
    flags: DamageFlags,
    rng: &mut dyn BattleRng,
) -> DamageRoll {
    let defense = if flags.ignore_defense {
        1.0
    } else {
        defense_factor(target.defense)
    };

    let mut raw = multiplier.evaluate(user, target);
    if !flags.ignore_shield && target.shield_pct > 0.0 {
        raw *= (1.0 - target.shield_pct / 100.0).max(0.0);
    }

    if !(flags.ignore_invincibility || target.capabilities.can_receive_damage()) {
        return DamageRoll::BLOCKED;
    }

    if rng.roll(glancing_chance(user, target)) {
        return DamageRoll {
            amount: raw * defense * GLANCING_MULTIPLIER,
            hit: HitKind::Glancing,
        };
    }

    if rng.roll(crushing_chance(user, target)) {
        return DamageRoll {
            amount: raw * defense * CRUSHING_MULTIPLIER,
            hit: HitKind::Crushing,
        };
    }

    if rng.roll(crit_chance(user, target)) {
        return DamageRoll {
            amount: raw * user.crit_damage.max(BattleConfig::MIN_CRIT_DAMAGE) * defense,
            hit: HitKind::Critical,
        };
    }

    DamageRoll {
        amount: raw * defense,
        hit: HitKind::Normal,
    }
}

/// Damage of a normal attack: effective attack through the target's defense.
///
/// Normal attacks never roll glancing, crushing or critical hits.
pub fn normal_attack_damage(user: &StatsSnapshot, target: &StatsSnapshot) -> DamageRoll {
    if !target.capabilities.can_receive_damage() {
        return DamageRoll::BLOCKED;
    }
    DamageRoll {
        amount: (user.attack * defense_factor(target.defense)).max(0.0),
        hit: HitKind::Normal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::Element;
    use crate::effect::Capabilities;
    use crate::rng::SequenceRng;

    fn snapshot() -> StatsSnapshot {
        StatsSnapshot {
            element: Element::Neutral,
            max_hp: 1000.0,
            current_hp: 1000.0,
            max_mp: 100.0,
            current_mp: 100.0,
            attack: 100.0,
            defense: 0.0,
            speed: 100.0,
            crit_rate: 0.15,
            crit_damage: 1.5,
            crit_resist: 0.0,
            resistance: 0.15,
            accuracy: 0.0,
            glancing: 0.0,
            extra_turn: 0.0,
            counter: 0.0,
            reflect_pct: 0.0,
            life_drain_pct: 0.0,
            damage_received_pct: 0.0,
            shield_pct: 0.0,
            stun_rate: 0.0,
            capabilities: Capabilities::all(),
        }
    }

    #[test]
    fn normal_hit_when_all_rolls_fail() {
        let user = snapshot();
        let target = snapshot();
        let mut rng = SequenceRng::constant(0.99);
        let roll = calculate_raw_damage(
            &user,
            &target,
            &DamageMultiplier::attack(2.0),
            DamageFlags::default(),
            &mut rng,
        );
        assert_eq!(roll.hit, HitKind::Normal);
        assert_eq!(roll.amount, 200.0);
        assert_eq!(rng.draws(), 3);
    }

    #[test]
    fn invincible_target_takes_zero() {
        let user = snapshot();
        let mut target = snapshot();
        target.capabilities.remove(Capabilities::CAN_RECEIVE_DAMAGE);
        let mut rng = SequenceRng::constant(0.0);
        let roll = calculate_raw_damage(
            &user,
            &target,
            &DamageMultiplier::attack(5.0),
            DamageFlags::default(),
            &mut rng,
        );
        assert_eq!(roll, DamageRoll::BLOCKED);
        assert_eq!(normal_attack_damage(&user, &target).amount, 0.0);
    }

    #[test]
    fn ignore_invincibility_pierces() {
        let user = snapshot();
        let mut target = snapshot();
        target.capabilities.remove(Capabilities::CAN_RECEIVE_DAMAGE);
        let mut rng = SequenceRng::constant(0.99);
        let flags = DamageFlags {
            ignore_invincibility: true,
            ..DamageFlags::default()
        };
        let roll = calculate_raw_damage(&user, &target, &DamageMultiplier::attack(1.0), flags, &mut rng);
        assert_eq!(roll.amount, 100.0);
    }

    #[test]
    fn crit_chance_clamps_both_ways() {
        let mut user = snapshot();
        let mut target = snapshot();
        user.crit_rate = 5.0;
        target.crit_resist = -3.0;
        assert_eq!(crit_chance(&user, &target), 1.0);

        user.crit_rate = -5.0;
        target.crit_resist = 3.0;
        assert_eq!(crit_chance(&user, &target), 0.15);
    }

    #[test]
    fn critical_hit_uses_crit_damage() {
        let mut user = snapshot();
        user.crit_damage = 2.0;
        let target = snapshot();
        // glancing fails (chance 0), crushing fails (not applicable), crit succeeds
        let mut rng = SequenceRng::new(vec![0.5, 0.5, 0.1]);
        let roll = calculate_raw_damage(
            &user,
            &target,
            &DamageMultiplier::attack(1.0),
            DamageFlags::default(),
            &mut rng,
        );
        assert_eq!(roll.hit, HitKind::Critical);
        assert_eq!(roll.amount, 200.0);
    }

    #[test]
    fn elemental_glancing_and_crushing() {
        let mut user = snapshot();
        let mut target = snapshot();
        user.element = Element::Fire;
        target.element = Element::Water;
        let mut rng = SequenceRng::constant(0.2);
        let roll = calculate_raw_damage(
            &user,
            &target,
            &DamageMultiplier::attack(1.0),
            DamageFlags::default(),
            &mut rng,
        );
        assert_eq!(roll.hit, HitKind::Glancing);
        assert_eq!(roll.amount, 70.0);

        user.element = Element::Water;
        target.element = Element::Fire;
        // crushing chance = 1 - 0.15 = 0.85
        let mut rng = SequenceRng::new(vec![0.9, 0.5]);
        let roll = calculate_raw_damage(
            &user,
            &target,
            &DamageMultiplier::attack(1.0),
            DamageFlags::default(),
            &mut rng,
        );
        assert_eq!(roll.hit, HitKind::Crushing);
        assert_eq!(roll.amount, 130.0);
    }

    #[test]
    fn shield_and_defense_reduce_damage() {
        let user = snapshot();
        let mut target = snapshot();
        target.shield_pct = 15.0;
        target.defense = 1e8 / 3.5;
        let mut rng = SequenceRng::constant(0.99);
        let roll = calculate_raw_damage(
            &user,
            &target,
            &DamageMultiplier::attack(1.0),
            DamageFlags::default(),
            &mut rng,
        );
        assert!((roll.amount - 42.5).abs() < 1e-9);

        let flags = DamageFlags {
            ignore_defense: true,
            ignore_shield: true,
            ..DamageFlags::default()
        };
        let roll = calculate_raw_damage(&user, &target, &DamageMultiplier::attack(1.0), flags, &mut rng);
        assert_eq!(roll.amount, 100.0);
    }

    #[test]
    fn damage_is_never_negative() {
        let mut user = snapshot();
        user.attack = -500.0;
        let target = snapshot();
        let mut rng = SequenceRng::constant(0.99);
        let roll = calculate_raw_damage(
            &user,
            &target,
            &DamageMultiplier::attack(1.0),
            DamageFlags::default(),
            &mut rng,
        );
        assert!(roll.amount >= 0.0);
        assert!(normal_attack_damage(&user, &target).amount >= 0.0);
    }

    #[test]
    fn resist_chance_has_floor() {
        let mut user = snapshot();
        let mut target = snapshot();
        user.accuracy = 1.0;
        target.resistance = 0.5;
        assert_eq!(resist_chance(&user, &target), 0.15);
        user.accuracy = 0.0;
        target.resistance = 0.9;
        assert_eq!(resist_chance(&user, &target), 0.9);
    }
}
