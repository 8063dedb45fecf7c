use crate::combat::{DamageFlags, DamageMultiplier};
use crate::effect::{BeneficialKind, EffectTemplate, HarmfulKind};

/// What an active skill does when used.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum ActiveKind {
    /// Damages one enemy or the whole enemy team.
    Attack,
    /// Heals one ally or the whole team by a flat amount.
    Heal,
    /// Applies beneficial effects and gauge gain to allies.
    AlliesEffect,
    /// Applies harmful effects and gauge loss to enemies.
    EnemiesEffect,
}

impl ActiveKind {
    /// Whether the skill targets the user's own team.
    pub const fn targets_allies(self) -> bool {
        matches!(self, Self::Heal | Self::AlliesEffect)
    }
}

/// A manually used skill.
///
/// Fields that do not apply to the skill's kind are cleared by
/// [`ActiveSkill::normalized`]: only attacks carry a damage multiplier, only
/// ally-effect skills carry buffs and gauge gain, only attack and
/// enemy-effect skills carry debuffs and gauge loss, and only heals carry a
/// heal amount.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveSkill {
    pub name: String,
    pub kind: ActiveKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub aoe: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mp_cost: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_cooltime: u32,
    /// Owner turns left before the skill can be used again.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cooltime: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub multiplier: DamageMultiplier,
    #[cfg_attr(feature = "serde", serde(default))]
    pub buffs: Vec<EffectTemplate<BeneficialKind>>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub debuffs: Vec<EffectTemplate<HarmfulKind>>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub allies_gauge_up: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub enemies_gauge_down: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub heal_amount: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub flags: DamageFlags,
    #[cfg_attr(feature = "serde", serde(default = "default_level"))]
    pub level: u32,
}

#[cfg(feature = "serde")]
fn default_level() -> u32 {
    1
}

impl ActiveSkill {
    fn blank(name: impl Into<String>, kind: ActiveKind) -> Self {
        Self {
            name: name.into(),
            kind,
            aoe: false,
            mp_cost: 0.0,
            max_cooltime: 0,
            cooltime: 0,
            multiplier: DamageMultiplier::default(),
            buffs: Vec::new(),
            debuffs: Vec::new(),
            allies_gauge_up: 0.0,
            enemies_gauge_down: 0.0,
            heal_amount: 0.0,
            flags: DamageFlags::default(),
            level: 1,
        }
    }

    pub fn attack(name: impl Into<String>, multiplier: DamageMultiplier) -> Self {
        Self {
            multiplier,
            ..Self::blank(name, ActiveKind::Attack)
        }
    }

    pub fn heal(name: impl Into<String>, heal_amount: f64) -> Self {
        Self {
            heal_amount,
            ..Self::blank(name, ActiveKind::Heal)
        }
    }

    pub fn allies_effect(
        name: impl Into<String>,
        buffs: Vec<EffectTemplate<BeneficialKind>>,
    ) -> Self {
        Self {
            buffs,
            ..Self::blank(name, ActiveKind::AlliesEffect)
        }
    }

    pub fn enemies_effect(
        name: impl Into<String>,
        debuffs: Vec<EffectTemplate<HarmfulKind>>,
    ) -> Self {
        Self {
            debuffs,
            ..Self::blank(name, ActiveKind::EnemiesEffect)
        }
    }

    pub fn with_aoe(mut self, aoe: bool) -> Self {
        self.aoe = aoe;
        self
    }

    pub fn with_mp_cost(mut self, mp_cost: f64) -> Self {
        self.mp_cost = mp_cost;
        self
    }

    pub fn with_cooltime(mut self, max_cooltime: u32) -> Self {
        self.max_cooltime = max_cooltime;
        self
    }

    pub fn with_debuffs(mut self, debuffs: Vec<EffectTemplate<HarmfulKind>>) -> Self {
        self.debuffs = debuffs;
        self
    }

    pub fn with_gauge(mut self, allies_up: f64, enemies_down: f64) -> Self {
        self.allies_gauge_up = allies_up;
        self.enemies_gauge_down = enemies_down;
        self
    }

    pub fn with_flags(mut self, flags: DamageFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Clear every field that does not apply to this skill's kind.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.kind != ActiveKind::Attack {
            self.multiplier = DamageMultiplier::default();
        }
        if self.kind != ActiveKind::AlliesEffect {
            self.buffs.clear();
            self.allies_gauge_up = 0.0;
        }
        if !matches!(self.kind, ActiveKind::Attack | ActiveKind::EnemiesEffect) {
            self.debuffs.clear();
            self.enemies_gauge_down = 0.0;
        }
        if self.kind != ActiveKind::Heal {
            self.heal_amount = 0.0;
        }
        self
    }

    /// Whether the cooltime has run out.
    pub fn is_ready(&self) -> bool {
        self.cooltime == 0
    }

    /// Whether SILENCE blocks this skill.
    pub fn has_cooltime(&self) -> bool {
        self.max_cooltime > 0
    }

    pub(crate) fn start_cooltime(&mut self) {
        self.cooltime = self.max_cooltime;
    }

    pub(crate) fn tick_cooltime(&mut self) {
        self.cooltime = self.cooltime.saturating_sub(1);
    }

    pub(crate) fn reset_cooltime(&mut self) {
        self.cooltime = 0;
    }

    /// Raise the skill level; every damage coefficient grows by 25%.
    pub fn level_up(&mut self) {
        self.level += 1;
        self.multiplier.scale(DamageMultiplier::LEVEL_UP_FACTOR);
    }
}
