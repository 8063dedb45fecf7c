//! Experience, levels, evolution and awakening.

use crate::config::BattleConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::skill::Skill;

use super::Creature;

/// `n(n-1)/2`, the growth factor applied on level-up.
pub fn triangular(n: u32) -> f64 {
    let n = f64::from(n);
    n * (n - 1.0) / 2.0
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProgressionError {
    #[error("creature is already at its max level")]
    MaxLevel,

    #[error("not enough experience")]
    NotEnoughExp,

    #[error("creature is already awakened")]
    AlreadyAwakened,

    #[error("creature must be at max level with full experience and below rating 6 to evolve")]
    CannotEvolve,
}

impl GameError for ProgressionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MaxLevel => "PROGRESSION_MAX_LEVEL",
            Self::NotEnoughExp => "PROGRESSION_NOT_ENOUGH_EXP",
            Self::AlreadyAwakened => "PROGRESSION_ALREADY_AWAKENED",
            Self::CannotEvolve => "PROGRESSION_CANNOT_EVOLVE",
        }
    }
}

/// One-time permanent upgrade granted by awakening.
///
/// Percentages multiply the matching base stat; the rest are added.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AwakenBonus {
    pub hp_pct: f64,
    pub mp_pct: f64,
    pub attack_pct: f64,
    pub defense_pct: f64,
    pub speed: f64,
    pub crit_rate: f64,
    pub crit_damage: f64,
    pub resistance: f64,
    pub accuracy: f64,
    pub skill: Option<Skill>,
}

impl Creature {
    /// Speed gained on each level-up.
    pub const LEVEL_UP_SPEED: f64 = 2.0;
    /// Speed gained on evolution.
    pub const EVOLVE_SPEED: f64 = 3.0;

    /// Highest reachable level, or `None` at max rating.
    ///
    /// `10 × triangular(rating)`, floored at 1 so a rating-1 creature can
    /// still evolve.
    pub fn max_level(&self) -> Option<u32> {
        if self.rating >= BattleConfig::MAX_RATING {
            return None;
        }
        let n = u32::from(self.rating);
        Some((10 * n * n.saturating_sub(1) / 2).max(1))
    }

    fn below_max_level(&self) -> bool {
        self.max_level().is_none_or(|max| self.level < max)
    }

    /// Add experience. Non-finite and negative amounts are ignored and the
    /// total saturates at `f64::MAX`.
    pub fn gain_exp(&mut self, amount: f64) {
        if !amount.is_finite() || amount <= 0.0 {
            return;
        }
        self.exp = (self.exp + amount).min(f64::MAX);
    }

    /// Level up for as long as experience meets the requirement.
    ///
    /// Each level multiplies the required experience by `10^level`, scales
    /// attack, HP, MP and defense by `triangular(level)` and adds 2 speed.
    /// Returns the number of levels gained.
    pub fn level_up(&mut self) -> Result<u32, ProgressionError> {
        if !self.below_max_level() {
            return Err(ProgressionError::MaxLevel);
        }
        if self.exp < self.required_exp {
            return Err(ProgressionError::NotEnoughExp);
        }

        let mut gained = 0;
        while self.required_exp.is_finite()
            && self.exp >= self.required_exp
            && self.below_max_level()
        {
            self.level += 1;
            self.required_exp *= 10f64.powi(self.level as i32);
            self.base.scale_growth(triangular(self.level));
            self.base.speed += Self::LEVEL_UP_SPEED;
            gained += 1;
        }
        tracing::debug!(creature = %self.name, level = self.level, gained, "levelled up");
        self.restore();
        Ok(gained)
    }

    /// Raise the rating by one and start over at level 1.
    pub fn evolve(&mut self) -> Result<(), ProgressionError> {
        let at_max = self.max_level().is_some_and(|max| self.level == max);
        if !at_max || self.exp < self.required_exp {
            return Err(ProgressionError::CannotEvolve);
        }

        self.rating += 1;
        self.level = 1;
        self.exp = 0.0;
        self.required_exp = BattleConfig::INITIAL_REQUIRED_EXP;
        self.base.scale_growth(triangular(self.level) + 1.0);
        self.base.speed += Self::EVOLVE_SPEED;
        tracing::debug!(creature = %self.name, rating = self.rating, "evolved");
        self.restore();
        Ok(())
    }

    /// Apply the awaken bonus once: boost base stats, learn the bonus skill
    /// and take the "AWAKENED" prefix.
    pub fn awaken(&mut self) -> Result<(), ProgressionError> {
        if self.awakened {
            return Err(ProgressionError::AlreadyAwakened);
        }

        let bonus = self.awaken_bonus.clone();
        let base = &mut self.base;
        base.max_hp *= 1.0 + bonus.hp_pct / 100.0;
        base.max_mp *= 1.0 + bonus.mp_pct / 100.0;
        base.attack *= 1.0 + bonus.attack_pct / 100.0;
        base.defense *= 1.0 + bonus.defense_pct / 100.0;
        base.speed += bonus.speed;
        base.crit_rate += bonus.crit_rate;
        base.crit_damage += bonus.crit_damage;
        base.resistance += bonus.resistance;
        base.accuracy += bonus.accuracy;
        self.base = self.base.clamp();

        if let Some(skill) = bonus.skill {
            self.learn_skill(skill);
        }

        self.name = format!("AWAKENED {}", self.name);
        self.awakened = true;
        tracing::debug!(creature = %self.name, "awakened");
        self.restore();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::sample;
    use super::*;
    use crate::combat::{DamageMultiplier, Element};
    use crate::skill::ActiveSkill;
    use crate::stats::BaseStats;

    #[test]
    fn triangular_numbers() {
        assert_eq!(triangular(1), 0.0);
        assert_eq!(triangular(2), 1.0);
        assert_eq!(triangular(4), 6.0);
    }

    #[test]
    fn max_level_by_rating() {
        let mut c = sample();
        assert_eq!(c.max_level(), Some(30));
        c.rating = 1;
        assert_eq!(c.max_level(), Some(1));
        c.rating = 6;
        assert_eq!(c.max_level(), None);
    }

    #[test]
    fn level_up_needs_exp() {
        let mut c = sample();
        assert_eq!(c.level_up(), Err(ProgressionError::NotEnoughExp));
    }

    #[test]
    fn level_up_spends_exp_and_grows() {
        let mut c = sample();
        c.gain_exp(1e6);
        assert_eq!(c.level_up(), Ok(1));
        assert_eq!(c.level(), 2);
        assert_eq!(c.required_exp(), 1e8);
        // triangular(2) = 1 leaves growth stats unchanged
        assert_eq!(c.base().attack, 100.0);
        assert_eq!(c.base().speed, 102.0);
        assert_eq!(c.current_hp(), c.max_hp());

        c.gain_exp(1e8);
        assert_eq!(c.level_up(), Ok(1));
        assert_eq!(c.base().attack, 300.0);
    }

    #[test]
    fn unbounded_level_up_stops_when_exp_runs_out() {
        let mut c = sample();
        c.rating = 6;
        c.gain_exp(f64::INFINITY);
        c.gain_exp(f64::NAN);
        assert_eq!(c.exp(), 0.0);

        c.gain_exp(f64::MAX);
        c.gain_exp(f64::MAX);
        assert_eq!(c.exp(), f64::MAX);

        let gained = c.level_up().unwrap();
        assert!(gained > 1);
        assert!(c.required_exp() > c.exp());
        assert_eq!(c.level_up(), Err(ProgressionError::NotEnoughExp));
    }

    #[test]
    fn evolve_requires_max_level() {
        let mut c = Creature::new(
            "Spark",
            Element::Light,
            1,
            BaseStats::new(100.0, 10.0, 10.0, 10.0, 90.0),
        );
        assert_eq!(c.level_up(), Err(ProgressionError::MaxLevel));
        assert_eq!(c.evolve(), Err(ProgressionError::CannotEvolve));

        c.gain_exp(1e6);
        c.evolve().unwrap();
        assert_eq!(c.rating(), 2);
        assert_eq!(c.level(), 1);
        assert_eq!(c.exp(), 0.0);
        assert_eq!(c.base().speed, 93.0);
        assert_eq!(c.max_level(), Some(10));
    }

    #[test]
    fn awaken_is_one_shot() {
        let mut c = sample().with_awaken_bonus(AwakenBonus {
            attack_pct: 20.0,
            speed: 5.0,
            resistance: 2.0,
            skill: Some(Skill::Active(ActiveSkill::attack(
                "blaze",
                DamageMultiplier::attack(3.0),
            ))),
            ..AwakenBonus::default()
        });
        c.awaken().unwrap();
        assert_eq!(c.name(), "AWAKENED Ignis");
        assert_eq!(c.base().attack, 120.0);
        assert_eq!(c.base().speed, 105.0);
        assert_eq!(c.base().resistance, 1.0);
        assert_eq!(c.skills().len(), 1);
        assert_eq!(c.awaken(), Err(ProgressionError::AlreadyAwakened));
    }
}
