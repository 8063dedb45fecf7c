//! Replays a fixed list of decisions.

use std::collections::VecDeque;

use arena_core::{Battle, BattleRng, Slot};

use crate::api::{ActionProvider, Decision, Result, RuntimeError};

/// Hands out queued decisions in order, for tests and replays.
///
/// Running out is an error unless a fallback decision is set.
#[derive(Clone, Debug, Default)]
pub struct ScriptedProvider {
    queue: VecDeque<Decision>,
    fallback: Option<Decision>,
}

impl ScriptedProvider {
    pub fn new(decisions: impl IntoIterator<Item = Decision>) -> Self {
        Self {
            queue: decisions.into_iter().collect(),
            fallback: None,
        }
    }

    /// A provider that makes the same decision every turn.
    pub fn repeat(decision: Decision) -> Self {
        Self::default().with_fallback(decision)
    }

    /// Decision used once the queue is empty.
    pub fn with_fallback(mut self, decision: Decision) -> Self {
        self.fallback = Some(decision);
        self
    }

    pub fn push(&mut self, decision: Decision) {
        self.queue.push_back(decision);
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl ActionProvider for ScriptedProvider {
    fn provide(
        &mut self,
        _battle: &Battle,
        actor: Slot,
        _rng: &mut dyn BattleRng,
    ) -> Result<Decision> {
        self.queue
            .pop_front()
            .or(self.fallback)
            .ok_or(RuntimeError::ScriptExhausted { actor })
    }
}

#[cfg(test)]
mod tests {
    use arena_core::{BaseStats, BattleConfig, Creature, Element, SequenceRng, Side, Team};

    use super::*;

    const ONE: Slot = Slot::new(Side::One, 0);
    const TWO: Slot = Slot::new(Side::Two, 0);

    fn battle() -> Battle {
        let stats = BaseStats::new(100.0, 10.0, 10.0, 0.0, 100.0);
        Battle::new(
            Team::from_creatures("one", [Creature::new("a", Element::Neutral, 1, stats)]).unwrap(),
            Team::from_creatures("two", [Creature::new("b", Element::Neutral, 1, stats)]).unwrap(),
            BattleConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn replays_in_order_then_errors() {
        let battle = battle();
        let mut rng = SequenceRng::constant(0.0);
        let mut provider = ScriptedProvider::new([Decision::attack(TWO), Decision::heal(ONE)]);

        assert_eq!(provider.provide(&battle, ONE, &mut rng).unwrap(), Decision::attack(TWO));
        assert_eq!(provider.provide(&battle, ONE, &mut rng).unwrap(), Decision::heal(ONE));
        assert!(matches!(
            provider.provide(&battle, ONE, &mut rng),
            Err(RuntimeError::ScriptExhausted { actor: ONE })
        ));
    }

    #[test]
    fn repeat_never_runs_out() {
        let battle = battle();
        let mut rng = SequenceRng::constant(0.0);
        let mut provider = ScriptedProvider::repeat(Decision::attack(TWO));
        for _ in 0..3 {
            assert_eq!(provider.provide(&battle, ONE, &mut rng).unwrap(), Decision::attack(TWO));
        }
        assert_eq!(provider.remaining(), 0);
    }
}
