//! Beneficial and harmful effects.
//!
//! Effects are named templates with a fixed payload. A creature holds one
//! [`EffectList`] per polarity; its live modifiers and [`Capabilities`] are
//! recomputed from those lists, never accumulated.

mod capabilities;
mod kinds;
mod list;

pub use capabilities::Capabilities;
pub use kinds::{BeneficialKind, EffectKind, HarmfulKind};
pub use list::{Effect, EffectError, EffectList};

pub type BeneficialEffect = Effect<BeneficialKind>;
pub type HarmfulEffect = Effect<HarmfulKind>;

/// Effect a skill applies: which effect and for how many turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectTemplate<K> {
    pub kind: K,
    pub turns: u32,
}

impl<K: Copy> EffectTemplate<K> {
    pub const fn new(kind: K, turns: u32) -> Self {
        Self { kind, turns }
    }

    /// Fresh instance of this template.
    pub fn instantiate(&self) -> Effect<K> {
        Effect::new(self.kind, self.turns)
    }
}
