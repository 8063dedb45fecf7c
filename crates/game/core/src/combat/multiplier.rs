//! Damage multiplier templates carried by attack skills.

use crate::stats::StatsSnapshot;

/// Thirteen coefficients turning two stat blocks into raw damage.
///
/// Ten are additive weights on the attacker's and defender's max HP, attack,
/// defense, max MP and speed. The last three scale the sum by HP
/// percentages (0–100): attacker's current HP, attacker's missing HP and
/// defender's current HP.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DamageMultiplier {
    pub self_max_hp: f64,
    pub enemy_max_hp: f64,
    pub self_attack: f64,
    pub enemy_attack: f64,
    pub self_defense: f64,
    pub enemy_defense: f64,
    pub self_max_mp: f64,
    pub enemy_max_mp: f64,
    pub self_speed: f64,
    pub enemy_speed: f64,
    pub self_current_hp_pct: f64,
    pub self_hp_loss_pct: f64,
    pub enemy_current_hp_pct: f64,
}

impl DamageMultiplier {
    /// Growth applied to every coefficient by a skill level-up.
    pub const LEVEL_UP_FACTOR: f64 = 1.25;

    /// Template that only scales with the attacker's attack.
    pub fn attack(coefficient: f64) -> Self {
        Self {
            self_attack: coefficient,
            ..Self::default()
        }
    }

    /// Multiply all thirteen coefficients by `factor`.
    pub fn scale(&mut self, factor: f64) {
        for c in self.coefficients_mut() {
            *c *= factor;
        }
    }

    fn coefficients_mut(&mut self) -> [&mut f64; 13] {
        [
            &mut self.self_max_hp,
            &mut self.enemy_max_hp,
            &mut self.self_attack,
            &mut self.enemy_attack,
            &mut self.self_defense,
            &mut self.enemy_defense,
            &mut self.self_max_mp,
            &mut self.enemy_max_mp,
            &mut self.self_speed,
            &mut self.enemy_speed,
            &mut self.self_current_hp_pct,
            &mut self.self_hp_loss_pct,
            &mut self.enemy_current_hp_pct,
        ]
    }

    /// Raw damage before defense, shield, invincibility and hit rolls.
    ///
    /// ```text
    /// sum   = Σ stat × coefficient              (10 terms)
    /// raw   = sum × (1 + self_hp% × c11) × (1 + self_loss% × c12) × (1 + enemy_hp% × c13)
    /// final = raw × (1 + target.damage_received% / 100)
    /// ```
    pub fn evaluate(&self, user: &StatsSnapshot, target: &StatsSnapshot) -> f64 {
        let sum = user.max_hp * self.self_max_hp
            + target.max_hp * self.enemy_max_hp
            + user.attack * self.self_attack
            + target.attack * self.enemy_attack
            + user.defense * self.self_defense
            + target.defense * self.enemy_defense
            + user.max_mp * self.self_max_mp
            + target.max_mp * self.enemy_max_mp
            + user.speed * self.self_speed
            + target.speed * self.enemy_speed;

        let scaled = sum
            * (1.0 + user.current_hp_pct() * self.self_current_hp_pct)
            * (1.0 + user.hp_loss_pct() * self.self_hp_loss_pct)
            * (1.0 + target.current_hp_pct() * self.enemy_current_hp_pct);

        (scaled * (1.0 + target.damage_received_pct / 100.0)).max(0.0)
    }
}
