//! Bonus application system following the layered stack architecture.
//!
//! This module implements the bonus calculation stack:
//! Flat → %Inc → More → Clamp
//!
//! Permanent rune bonuses enter as Flat and Increased entries; live battle
//! modifiers (effects, passives, leader aura) enter as a single More entry.
//! Because effective stats are recomputed from the stack on every read,
//! removing a bonus restores the previous value exactly.

/// A single bonus that can be applied to a stat value.
///
/// - **Flat**: Additive bonuses applied first (e.g., +1000 HP from a rune)
/// - **Increased**: Percentage increases, summed then multiplied (e.g., +35% ATK)
/// - **More**: Sequential multipliers applied individually (e.g., +50% from a buff)
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Bonus {
    /// Flat additive bonus (applied first)
    Flat(f64),

    /// Percentage increase (summed with other %Inc, then multiplied)
    /// Stored as percentage (e.g., 20.0 = +20%)
    Increased(f64),

    /// Multiplicative "more" modifier (applied sequentially)
    /// Stored as percentage (e.g., 50.0 = ×1.5, -50.0 = ×0.5)
    More(f64),
}

impl Bonus {
    /// Create a flat bonus
    pub fn flat(value: f64) -> Self {
        Bonus::Flat(value)
    }

    /// Create a percentage increase bonus (20.0 = +20%)
    pub fn increased(percent: f64) -> Self {
        Bonus::Increased(percent)
    }

    /// Create a "more" multiplier (50.0 = ×1.5)
    pub fn more(percent: f64) -> Self {
        Bonus::More(percent)
    }
}

/// A collection of bonuses that will be applied in the correct order.
///
/// The stack guarantees the following application order:
/// 1. Flat bonuses (summed)
/// 2. Increased bonuses (summed, then multiplied)
/// 3. More multipliers (applied sequentially)
/// 4. Clamp to bounds
///
/// Multipliers never go below zero: a net −150% "more" yields 0, not a
/// negative stat.
///
/// # Example
/// ```
/// # use arena_core::stats::bonus::{Bonus, BonusStack};
/// let mut stack = BonusStack::new();
/// stack.add(Bonus::flat(5.0));          // +5
/// stack.add(Bonus::increased(20.0));    // +20%
/// stack.add(Bonus::increased(30.0));    // +30% (summed)
/// stack.add(Bonus::more(50.0));         // ×1.5
///
/// let result = stack.apply(10.0, 0.0, 100.0);
/// // = clamp((10 + 5) × 1.5 × 1.5, 0, 100)
/// assert_eq!(result, 33.75);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BonusStack {
    bonuses: Vec<Bonus>,
}

impl BonusStack {
    /// Create a new empty bonus stack
    pub fn new() -> Self {
        Self {
            bonuses: Vec::new(),
        }
    }

    /// Add a bonus to the stack
    pub fn add(&mut self, bonus: Bonus) {
        self.bonuses.push(bonus);
    }

    /// Builder-style add.
    pub fn with(mut self, bonus: Bonus) -> Self {
        self.add(bonus);
        self
    }

    /// Add multiple bonuses at once
    pub fn extend(&mut self, bonuses: impl IntoIterator<Item = Bonus>) {
        self.bonuses.extend(bonuses);
    }

    /// Apply all bonuses to a base value with clamping
    ///
    /// # Formula
    /// ```text
    /// result = clamp((base + flat_sum) × max(0, 1 + inc_sum/100) × Π max(0, 1 + more/100), min, max)
    /// ```
    pub fn apply(&self, base: f64, min: f64, max: f64) -> f64 {
        let flat_sum: f64 = self
            .bonuses
            .iter()
            .filter_map(|b| match b {
                Bonus::Flat(v) => Some(*v),
                _ => None,
            })
            .sum();

        let inc_sum: f64 = self
            .bonuses
            .iter()
            .filter_map(|b| match b {
                Bonus::Increased(p) => Some(*p),
                _ => None,
            })
            .sum();

        let after_inc = (base + flat_sum) * (1.0 + inc_sum / 100.0).max(0.0);

        let after_more = self
            .bonuses
            .iter()
            .filter_map(|b| match b {
                Bonus::More(p) => Some(*p),
                _ => None,
            })
            .fold(after_inc, |acc, more_percent| {
                acc * (1.0 + more_percent / 100.0).max(0.0)
            });

        after_more.clamp(min, max)
    }

    /// Apply bonuses with a lower bound of zero and no upper bound.
    pub fn apply_non_negative(&self, base: f64) -> f64 {
        self.apply(base, 0.0, f64::INFINITY)
    }

    /// Check if the stack is empty
    pub fn is_empty(&self) -> bool {
        self.bonuses.is_empty()
    }

    /// Get the number of bonuses in the stack
    pub fn len(&self) -> usize {
        self.bonuses.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stack_returns_base() {
        assert_eq!(BonusStack::new().apply_non_negative(42.0), 42.0);
    }

    #[test]
    fn flat_applies_before_increased() {
        let stack = BonusStack::new()
            .with(Bonus::increased(100.0))
            .with(Bonus::flat(10.0));
        assert_eq!(stack.apply_non_negative(10.0), 40.0);
    }

    #[test]
    fn more_multipliers_are_sequential() {
        let stack = BonusStack::new()
            .with(Bonus::more(50.0))
            .with(Bonus::more(100.0));
        assert_eq!(stack.apply_non_negative(10.0), 30.0);
    }

    #[test]
    fn negative_multiplier_floors_at_zero() {
        let stack = BonusStack::new().with(Bonus::more(-150.0));
        assert_eq!(stack.apply_non_negative(100.0), 0.0);
    }

    #[test]
    fn clamps_to_bounds() {
        let stack = BonusStack::new().with(Bonus::flat(100.0));
        assert_eq!(stack.apply(0.0, 0.0, 50.0), 50.0);
    }
}
