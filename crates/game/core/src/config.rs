/// Battle configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Gauge gained per tick for each point of effective speed.
    pub tick_rate: f64,
    /// Upper bound on ticks spent searching for the next actor.
    pub max_ticks: u32,
    /// Fraction of max HP restored by a normal heal.
    pub normal_heal_ratio: f64,
    /// Max MP is divided by this to get the per-action regeneration.
    pub mp_regen_divisor: f64,
    /// Whether equipping or removing a rune fully restores the creature.
    pub restore_on_rune_change: bool,
    /// Upper bound on resolved actions in one battle.
    pub max_actions: u32,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_EFFECTS: usize = 10;
    pub const MAX_BENEFICIAL_EFFECTS: usize = Self::MAX_EFFECTS;
    pub const MAX_HARMFUL_EFFECTS: usize = Self::MAX_EFFECTS;
    pub const TEAM_SIZE: usize = 5;
    pub const RUNE_SLOTS: usize = 6;
    pub const MAX_RUNE_SUBSTATS: usize = 4;

    // ===== gauge =====
    pub const FULL_ATTACK_GAUGE: f64 = 1.0;
    pub const MIN_ATTACK_GAUGE: f64 = 0.0;

    // ===== stat bounds =====
    pub const MIN_CRIT_RATE: f64 = 0.15;
    pub const MAX_CRIT_RATE: f64 = 1.0;
    pub const MIN_CRIT_DAMAGE: f64 = 1.5;
    pub const MIN_RESISTANCE: f64 = 0.15;
    pub const MAX_RESISTANCE: f64 = 1.0;
    pub const MIN_ACCURACY: f64 = 0.0;
    pub const MAX_ACCURACY: f64 = 1.0;
    pub const MAX_EXTRA_TURN_CHANCE: f64 = 0.5;
    pub const MAX_COUNTER_CHANCE: f64 = 1.0;
    pub const MAX_CRIT_RESIST: f64 = 1.0;
    /// Lowest chance that a harmful effect is resisted.
    pub const MIN_RESIST_CHANCE: f64 = 0.15;

    // ===== progression =====
    pub const MAX_RATING: u8 = 6;
    pub const INITIAL_REQUIRED_EXP: f64 = 1e6;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_TICK_RATE: f64 = 0.07;
    pub const DEFAULT_MAX_TICKS: u32 = 100_000;
    pub const DEFAULT_NORMAL_HEAL_RATIO: f64 = 0.05;
    pub const DEFAULT_MP_REGEN_DIVISOR: f64 = 12.0;
    pub const DEFAULT_MAX_ACTIONS: u32 = 10_000;

    pub fn new() -> Self {
        Self {
            tick_rate: Self::DEFAULT_TICK_RATE,
            max_ticks: Self::DEFAULT_MAX_TICKS,
            normal_heal_ratio: Self::DEFAULT_NORMAL_HEAL_RATIO,
            mp_regen_divisor: Self::DEFAULT_MP_REGEN_DIVISOR,
            restore_on_rune_change: true,
            max_actions: Self::DEFAULT_MAX_ACTIONS,
        }
    }

    pub fn with_restore_on_rune_change(mut self, enabled: bool) -> Self {
        self.restore_on_rune_change = enabled;
        self
    }

    pub fn with_max_ticks(mut self, max_ticks: u32) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    pub fn with_max_actions(mut self, max_actions: u32) -> Self {
        self.max_actions = max_actions;
        self
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
