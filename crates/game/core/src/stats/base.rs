//! Base stats - the only numbers permanently stored on a creature.
//!
//! Level-ups, evolution and awakening rewrite these. Runes and battle
//! modifiers never do; they are layered on top when stats are read.

use crate::config::BattleConfig;

/// Permanent attributes of a creature before runes and live modifiers.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseStats {
    pub max_hp: f64,
    pub max_mp: f64,
    pub attack: f64,
    pub defense: f64,
    pub speed: f64,
    pub crit_rate: f64,
    pub crit_damage: f64,
    pub resistance: f64,
    pub accuracy: f64,
}

impl BaseStats {
    /// Create base stats with the minimum crit, resistance and accuracy values.
    pub fn new(max_hp: f64, max_mp: f64, attack: f64, defense: f64, speed: f64) -> Self {
        Self {
            max_hp,
            max_mp,
            attack,
            defense,
            speed,
            crit_rate: BattleConfig::MIN_CRIT_RATE,
            crit_damage: BattleConfig::MIN_CRIT_DAMAGE,
            resistance: BattleConfig::MIN_RESISTANCE,
            accuracy: BattleConfig::MIN_ACCURACY,
        }
    }

    pub fn with_crit(mut self, crit_rate: f64, crit_damage: f64) -> Self {
        self.crit_rate = crit_rate;
        self.crit_damage = crit_damage;
        self.clamp()
    }

    pub fn with_resistance(mut self, resistance: f64) -> Self {
        self.resistance = resistance;
        self.clamp()
    }

    pub fn with_accuracy(mut self, accuracy: f64) -> Self {
        self.accuracy = accuracy;
        self.clamp()
    }

    /// Enforce the permanent stat bounds.
    #[must_use]
    pub fn clamp(mut self) -> Self {
        self.max_hp = self.max_hp.max(0.0);
        self.max_mp = self.max_mp.max(0.0);
        self.attack = self.attack.max(0.0);
        self.defense = self.defense.max(0.0);
        self.speed = self.speed.max(0.0);
        self.crit_rate = self
            .crit_rate
            .clamp(BattleConfig::MIN_CRIT_RATE, BattleConfig::MAX_CRIT_RATE);
        self.crit_damage = self.crit_damage.max(BattleConfig::MIN_CRIT_DAMAGE);
        self.resistance = self
            .resistance
            .clamp(BattleConfig::MIN_RESISTANCE, BattleConfig::MAX_RESISTANCE);
        self.accuracy = self
            .accuracy
            .clamp(BattleConfig::MIN_ACCURACY, BattleConfig::MAX_ACCURACY);
        self
    }

    /// Multiply the four growth stats (attack, max HP, max MP, defense).
    pub fn scale_growth(&mut self, factor: f64) {
        self.attack *= factor;
        self.max_hp *= factor;
        self.max_mp *= factor;
        self.defense *= factor;
    }
}

impl Default for BaseStats {
    fn default() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_starts_at_minimums() {
        let stats = BaseStats::new(100.0, 50.0, 10.0, 5.0, 100.0);
        assert_eq!(stats.crit_rate, 0.15);
        assert_eq!(stats.crit_damage, 1.5);
        assert_eq!(stats.resistance, 0.15);
        assert_eq!(stats.accuracy, 0.0);
    }

    #[test]
    fn clamp_enforces_bounds() {
        let stats = BaseStats::new(100.0, 50.0, 10.0, 5.0, 100.0)
            .with_crit(5.0, 0.1)
            .with_resistance(-3.0)
            .with_accuracy(2.0);
        assert_eq!(stats.crit_rate, 1.0);
        assert_eq!(stats.crit_damage, 1.5);
        assert_eq!(stats.resistance, 0.15);
        assert_eq!(stats.accuracy, 1.0);
    }

    #[test]
    fn scale_growth_leaves_speed() {
        let mut stats = BaseStats::new(100.0, 50.0, 10.0, 5.0, 100.0);
        stats.scale_growth(3.0);
        assert_eq!(stats.max_hp, 300.0);
        assert_eq!(stats.attack, 30.0);
        assert_eq!(stats.speed, 100.0);
    }
}
