//! Effect instances and the bounded list a creature carries them in.

use arrayvec::ArrayVec;

use crate::config::BattleConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::stats::Modifiers;

use super::{Capabilities, EffectKind};

/// Why an effect could not be attached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EffectError {
    #[error("effect list is full")]
    Full,

    #[error("a non-stackable effect of this kind is already active")]
    AlreadyActive,

    #[error("the creature cannot receive this kind of effect right now")]
    Blocked,
}

impl GameError for EffectError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Full => "EFFECT_FULL",
            Self::AlreadyActive => "EFFECT_ALREADY_ACTIVE",
            Self::Blocked => "EFFECT_BLOCKED",
        }
    }
}

/// One active effect and the number of owner turns it has left.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Effect<K> {
    pub kind: K,
    pub turns: u32,
}

impl<K> Effect<K> {
    pub fn new(kind: K, turns: u32) -> Self {
        Self { kind, turns }
    }
}

/// Bounded list of active effects of one polarity.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectList<K> {
    effects: ArrayVec<Effect<K>, { BattleConfig::MAX_EFFECTS }>,
}

impl<K> Default for EffectList<K> {
    fn default() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }
}

impl<K: EffectKind> EffectList<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an effect.
    ///
    /// Rejected when the list is full, or when the kind is not stackable and
    /// an instance is already active (re-adding is then a no-op).
    pub fn add(&mut self, effect: Effect<K>) -> Result<(), EffectError> {
        if self.effects.is_full() {
            return Err(EffectError::Full);
        }
        if !effect.kind.stackable() && self.contains(effect.kind) {
            return Err(EffectError::AlreadyActive);
        }
        self.effects.push(effect);
        Ok(())
    }

    /// Remove the effect at `index`.
    pub fn remove(&mut self, index: usize) -> Option<Effect<K>> {
        if index < self.effects.len() {
            Some(self.effects.remove(index))
        } else {
            None
        }
    }

    /// Remove the first active instance of `kind`.
    pub fn remove_kind(&mut self, kind: K) -> Option<Effect<K>> {
        let index = self.effects.iter().position(|e| e.kind == kind)?;
        self.remove(index)
    }

    /// Count down every effect by one turn and drain the expired ones.
    pub fn tick(&mut self) -> Vec<Effect<K>> {
        for effect in self.effects.iter_mut() {
            effect.turns = effect.turns.saturating_sub(1);
        }
        let mut expired = Vec::new();
        self.effects.retain(|e| {
            if e.turns == 0 {
                expired.push(*e);
                false
            } else {
                true
            }
        });
        expired
    }

    /// Sum of the payloads of every active instance.
    pub fn payload(&self) -> Modifiers {
        self.effects.iter().map(|e| e.kind.payload()).sum()
    }

    /// Union of the capabilities revoked by active instances.
    pub fn revoked(&self) -> Capabilities {
        self.effects
            .iter()
            .fold(Capabilities::empty(), |acc, e| acc | e.kind.revokes())
    }

    pub fn contains(&self, kind: K) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    pub fn count(&self, kind: K) -> usize {
        self.effects.iter().filter(|e| e.kind == kind).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Effect<K>> {
        self.effects.iter()
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.effects.is_full()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::{BeneficialKind, HarmfulKind};

    #[test]
    fn non_stackable_duplicate_is_rejected() {
        let mut list = EffectList::new();
        list.add(Effect::new(BeneficialKind::IncreaseAtk, 2)).unwrap();
        assert_eq!(
            list.add(Effect::new(BeneficialKind::IncreaseAtk, 3)),
            Err(EffectError::AlreadyActive)
        );
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn stackable_effects_coexist() {
        let mut list = EffectList::new();
        list.add(Effect::new(HarmfulKind::DamageOverTime, 2)).unwrap();
        list.add(Effect::new(HarmfulKind::DamageOverTime, 2)).unwrap();
        assert_eq!(list.count(HarmfulKind::DamageOverTime), 2);
        assert_eq!(list.payload().damage_per_turn_pct, 10.0);
    }

    #[test]
    fn capacity_is_ten() {
        let mut list = EffectList::new();
        for _ in 0..BattleConfig::MAX_EFFECTS {
            list.add(Effect::new(BeneficialKind::HealOverTime, 1)).unwrap();
        }
        assert_eq!(
            list.add(Effect::new(BeneficialKind::Shield, 1)),
            Err(EffectError::Full)
        );
    }

    #[test]
    fn tick_drains_expired() {
        let mut list = EffectList::new();
        list.add(Effect::new(HarmfulKind::Stun, 1)).unwrap();
        list.add(Effect::new(HarmfulKind::Silence, 2)).unwrap();

        let expired = list.tick();
        assert_eq!(expired, vec![Effect::new(HarmfulKind::Stun, 0)]);
        assert!(list.contains(HarmfulKind::Silence));
        assert!(!list.revoked().contains(Capabilities::CAN_MOVE));
        assert!(list.revoked().contains(Capabilities::CAN_USE_COOLTIME_SKILLS));
    }

    #[test]
    fn zero_turn_effect_expires_on_first_tick() {
        let mut list = EffectList::new();
        list.add(Effect::new(BeneficialKind::Shield, 0)).unwrap();
        assert_eq!(list.tick().len(), 1);
        assert!(list.is_empty());
    }
}
