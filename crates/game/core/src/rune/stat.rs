use core::ops::Add;

use crate::stats::Modifiers;

/// Stat a rune can raise, as a main stat or a substat.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RuneStat {
    #[strum(serialize = "HP")]
    Hp,
    #[strum(serialize = "HP%")]
    HpPct,
    #[strum(serialize = "MP")]
    Mp,
    #[strum(serialize = "MP%")]
    MpPct,
    #[strum(serialize = "ATK")]
    Atk,
    #[strum(serialize = "ATK%")]
    AtkPct,
    #[strum(serialize = "DEF")]
    Def,
    #[strum(serialize = "DEF%")]
    DefPct,
    #[strum(serialize = "SPD")]
    Spd,
    #[strum(serialize = "CR")]
    CritRate,
    #[strum(serialize = "CD")]
    CritDamage,
    #[strum(serialize = "RES")]
    Resistance,
    #[strum(serialize = "ACC")]
    Accuracy,
}

impl RuneStat {
    pub const ALL: [RuneStat; 13] = [
        Self::Hp,
        Self::HpPct,
        Self::Mp,
        Self::MpPct,
        Self::Atk,
        Self::AtkPct,
        Self::Def,
        Self::DefPct,
        Self::Spd,
        Self::CritRate,
        Self::CritDamage,
        Self::Resistance,
        Self::Accuracy,
    ];

    /// Value granted when a rune of `rating` is created with this main stat.
    pub fn initial_value(self, rating: u8) -> f64 {
        let r = f64::from(rating);
        match self {
            Self::Hp | Self::Mp => 10f64.powf(6.0 * r),
            Self::Atk | Self::Def => 10f64.powf(5.0 * r),
            Self::HpPct | Self::MpPct | Self::AtkPct | Self::DefPct | Self::Spd => 2.0 * r,
            Self::CritRate | Self::Resistance | Self::Accuracy => 0.01 * r,
            Self::CritDamage => 0.05 * r,
        }
    }

    /// Value added when a rune of `rating` reaches `level`.
    pub fn level_increment(self, rating: u8, level: u32) -> f64 {
        let r = f64::from(rating);
        match self {
            Self::Hp | Self::Mp => 10f64.powf(6.0 * r + f64::from(level)),
            Self::Atk | Self::Def => 10f64.powf(5.0 * r + 1.0),
            Self::HpPct | Self::MpPct | Self::AtkPct | Self::DefPct => r,
            Self::Spd => 2.0 * r,
            Self::CritRate | Self::Resistance | Self::Accuracy => 0.01 * r,
            Self::CritDamage => 0.05 * r,
        }
    }
}

/// Accumulated stat increase carried by a rune, or by all equipped runes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuneBonus {
    pub hp: f64,
    pub mp: f64,
    pub attack: f64,
    pub defense: f64,
    pub speed: f64,
    /// Percentage and chance increases (hp%, atk%, crit rate, ...).
    pub modifiers: Modifiers,
}

impl RuneBonus {
    /// Bonus holding only `amount` of `stat`.
    pub fn of(stat: RuneStat, amount: f64) -> Self {
        let mut bonus = Self::default();
        bonus.raise(stat, amount);
        bonus
    }

    /// Add `amount` to the field backing `stat`.
    pub fn raise(&mut self, stat: RuneStat, amount: f64) {
        let m = &mut self.modifiers;
        match stat {
            RuneStat::Hp => self.hp += amount,
            RuneStat::HpPct => m.hp_pct += amount,
            RuneStat::Mp => self.mp += amount,
            RuneStat::MpPct => m.mp_pct += amount,
            RuneStat::Atk => self.attack += amount,
            RuneStat::AtkPct => m.attack_pct += amount,
            RuneStat::Def => self.defense += amount,
            RuneStat::DefPct => m.defense_pct += amount,
            RuneStat::Spd => self.speed += amount,
            RuneStat::CritRate => m.crit_rate += amount,
            RuneStat::CritDamage => m.crit_damage += amount,
            RuneStat::Resistance => m.resistance += amount,
            RuneStat::Accuracy => m.accuracy += amount,
        }
    }
}

impl Add for RuneBonus {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            hp: self.hp + rhs.hp,
            mp: self.mp + rhs.mp,
            attack: self.attack + rhs.attack,
            defense: self.defense + rhs.defense,
            speed: self.speed + rhs.speed,
            modifiers: self.modifiers + rhs.modifiers,
        }
    }
}

impl core::iter::Sum for RuneBonus {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}
