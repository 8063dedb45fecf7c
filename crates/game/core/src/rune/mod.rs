//! Runes: slot-bound equipment with a main stat, substats and a set.

mod set;
mod slots;
mod stat;

use arrayvec::ArrayVec;

use crate::config::BattleConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::rng::BattleRng;

pub use set::RuneSet;
pub use slots::RuneSlots;
pub use stat::{RuneBonus, RuneStat};

/// Errors raised by rune construction and (un)equipping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RuneError {
    #[error("slot {0} is outside 1..=6")]
    InvalidSlot(u8),

    #[error("rating {0} is outside 1..=6")]
    InvalidRating(u8),

    #[error("slot {0} is empty")]
    SlotEmpty(u8),

    #[error("rune is already equipped to a creature")]
    AlreadyEquipped,
}

impl GameError for RuneError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidSlot(_) => "RUNE_INVALID_SLOT",
            Self::InvalidRating(_) => "RUNE_INVALID_RATING",
            Self::SlotEmpty(_) => "RUNE_SLOT_EMPTY",
            Self::AlreadyEquipped => "RUNE_ALREADY_EQUIPPED",
        }
    }
}

/// A rune item.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rune {
    pub name: String,
    rating: u8,
    slot: u8,
    set: RuneSet,
    main_stat: RuneStat,
    substats: ArrayVec<RuneStat, { BattleConfig::MAX_RUNE_SUBSTATS }>,
    level: u32,
    success_rate: f64,
    bonus: RuneBonus,
    equipped: bool,
    set_active: bool,
}

impl Rune {
    /// Success rate multiplier applied after every successful upgrade.
    pub const SUCCESS_RATE_DECAY: f64 = 0.95;

    pub fn new(
        name: impl Into<String>,
        rating: u8,
        slot: u8,
        set: RuneSet,
        main_stat: RuneStat,
    ) -> Result<Self, RuneError> {
        if !(1..=BattleConfig::MAX_RATING).contains(&rating) {
            return Err(RuneError::InvalidRating(rating));
        }
        if !(1..=BattleConfig::RUNE_SLOTS as u8).contains(&slot) {
            return Err(RuneError::InvalidSlot(slot));
        }
        Ok(Self {
            name: name.into(),
            rating,
            slot,
            set,
            main_stat,
            substats: ArrayVec::new(),
            level: 1,
            success_rate: 1.0,
            bonus: RuneBonus::of(main_stat, main_stat.initial_value(rating)),
            equipped: false,
            set_active: false,
        })
    }

    pub fn rating(&self) -> u8 {
        self.rating
    }

    pub fn slot(&self) -> u8 {
        self.slot
    }

    pub fn set(&self) -> RuneSet {
        self.set
    }

    pub fn main_stat(&self) -> RuneStat {
        self.main_stat
    }

    pub fn substats(&self) -> &[RuneStat] {
        &self.substats
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn success_rate(&self) -> f64 {
        self.success_rate
    }

    /// Stat increase from the main stat and substats, excluding the set effect.
    pub fn bonus(&self) -> &RuneBonus {
        &self.bonus
    }

    pub fn is_equipped(&self) -> bool {
        self.equipped
    }

    /// Whether this rune currently counts toward an active set effect.
    pub fn is_set_active(&self) -> bool {
        self.set_active
    }

    pub(crate) fn mark_equipped(&mut self, equipped: bool) {
        self.equipped = equipped;
        if !equipped {
            self.set_active = false;
        }
    }

    pub(crate) fn mark_set_active(&mut self, active: bool) {
        self.set_active = active;
    }

    /// Try to upgrade the rune.
    ///
    /// Succeeds when the roll lands under the current success rate. A success
    /// raises the main stat, then draws a random stat: it becomes a new substat
    /// if it is not the main stat and there is room, and an existing substat
    /// is raised by the same per-level increment.
    ///
    /// Returns whether the upgrade succeeded.
    pub fn level_up(&mut self, rng: &mut dyn BattleRng) -> bool {
        if !rng.roll(self.success_rate) {
            return false;
        }

        self.level += 1;
        self.success_rate *= Self::SUCCESS_RATE_DECAY;

        let main = self.main_stat;
        self.bonus
            .raise(main, main.level_increment(self.rating, self.level));

        let candidate = RuneStat::ALL[rng.pick(RuneStat::ALL.len())];
        if candidate != main {
            if !self.substats.contains(&candidate) && !self.substats.is_full() {
                self.substats.push(candidate);
            }
            if self.substats.contains(&candidate) {
                self.bonus
                    .raise(candidate, candidate.level_increment(self.rating, self.level));
            }
        }
        true
    }
}
