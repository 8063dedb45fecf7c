//! Random policy used for computer-controlled teams.

use arena_core::{Battle, BattleRng, Slot};

use crate::api::{ActionProvider, Decision, Result, RuntimeError};

/// Rolls normal attack, normal heal or a skill with equal odds.
///
/// Without a usable skill the skill branch falls back to attack or heal,
/// again with equal odds. Targets are drawn uniformly from the living
/// creatures the action may aim at.
#[derive(Clone, Copy, Debug, Default)]
pub struct AiProvider;

impl AiProvider {
    pub fn new() -> Self {
        Self
    }

    fn random_enemy(battle: &Battle, actor: Slot, rng: &mut dyn BattleRng) -> Result<Slot> {
        pick(battle.living(actor.side.opposite()).collect(), rng)
            .ok_or(RuntimeError::NoLivingTarget { actor })
    }

    fn attack_or_heal(
        battle: &Battle,
        actor: Slot,
        attack: bool,
        rng: &mut dyn BattleRng,
    ) -> Result<Decision> {
        if attack {
            Ok(Decision::attack(Self::random_enemy(battle, actor, rng)?))
        } else {
            Ok(Decision::heal(actor))
        }
    }
}

impl ActionProvider for AiProvider {
    fn provide(
        &mut self,
        battle: &Battle,
        actor: Slot,
        rng: &mut dyn BattleRng,
    ) -> Result<Decision> {
        let creature = battle
            .creature(actor)
            .ok_or(RuntimeError::Action(arena_core::ActionError::UnknownSlot))?;

        let decision = match rng.pick(3) {
            0 => Self::attack_or_heal(battle, actor, true, rng)?,
            1 => Self::attack_or_heal(battle, actor, false, rng)?,
            _ => {
                let usable: Vec<usize> = creature.usable_skills().collect();
                match pick(usable, rng) {
                    None => {
                        let attack = rng.pick(2) == 0;
                        Self::attack_or_heal(battle, actor, attack, rng)?
                    }
                    Some(index) => {
                        let allies = creature
                            .active_skill(index)
                            .is_some_and(|skill| skill.kind.targets_allies());
                        let target = if allies {
                            pick(battle.living(actor.side).collect(), rng).unwrap_or(actor)
                        } else {
                            Self::random_enemy(battle, actor, rng)?
                        };
                        Decision::skill(index, target)
                    }
                }
            }
        };

        tracing::trace!(%actor, choice = decision.choice.as_str(), target = %decision.target, "ai decision");
        Ok(decision)
    }
}

fn pick<T: Copy>(items: Vec<T>, rng: &mut dyn BattleRng) -> Option<T> {
    if items.is_empty() {
        return None;
    }
    items.get(rng.pick(items.len())).copied()
}

#[cfg(test)]
mod tests {
    use arena_core::{
        ActionChoice, ActiveSkill, BaseStats, BattleConfig, Creature, DamageMultiplier, Element,
        SequenceRng, Side, Skill, Team,
    };

    use super::*;

    const ONE: Slot = Slot::new(Side::One, 0);

    fn battle(skills: Vec<Skill>) -> Battle {
        let a = Creature::new("a", Element::Fire, 1, BaseStats::new(500.0, 100.0, 100.0, 10.0, 100.0))
            .with_skills(skills);
        let b = Creature::new("b", Element::Water, 1, BaseStats::new(500.0, 100.0, 100.0, 10.0, 100.0));
        let c = Creature::new("c", Element::Wind, 1, BaseStats::new(500.0, 100.0, 100.0, 10.0, 100.0));
        Battle::new(
            Team::from_creatures("one", [a]).unwrap(),
            Team::from_creatures("two", [b, c]).unwrap(),
            BattleConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn low_roll_attacks_an_enemy() {
        let battle = battle(Vec::new());
        // action roll, then target roll
        let mut rng = SequenceRng::new(vec![0.1, 0.9]);
        let decision = AiProvider.provide(&battle, ONE, &mut rng).unwrap();
        assert_eq!(decision, Decision::attack(Slot::new(Side::Two, 1)));
    }

    #[test]
    fn middle_roll_heals_self() {
        let battle = battle(Vec::new());
        let mut rng = SequenceRng::constant(0.5);
        let decision = AiProvider.provide(&battle, ONE, &mut rng).unwrap();
        assert_eq!(decision, Decision::heal(ONE));
    }

    #[test]
    fn skill_roll_without_skills_falls_back() {
        let battle = battle(Vec::new());
        // skill branch, no skill, then the heal half of the fallback
        let mut rng = SequenceRng::new(vec![0.9, 0.9]);
        let decision = AiProvider.provide(&battle, ONE, &mut rng).unwrap();
        assert_eq!(decision.choice, ActionChoice::NormalHeal);
    }

    #[test]
    fn heal_skill_targets_an_ally() {
        let battle = battle(vec![
            Skill::Active(ActiveSkill::attack("jab", DamageMultiplier::attack(1.0)).with_mp_cost(9999.0)),
            Skill::Active(ActiveSkill::heal("mend", 100.0)),
        ]);
        let mut rng = SequenceRng::constant(0.9);
        let decision = AiProvider.provide(&battle, ONE, &mut rng).unwrap();
        assert_eq!(decision, Decision::skill(1, ONE));
    }

    #[test]
    fn decisions_pass_validation() {
        let battle = battle(vec![
            Skill::Active(ActiveSkill::attack("jab", DamageMultiplier::attack(1.0))),
            Skill::Active(ActiveSkill::heal("mend", 100.0)),
        ]);
        let mut rng = arena_core::PcgRng::new(7);
        for _ in 0..50 {
            let decision = AiProvider.provide(&battle, ONE, &mut rng).unwrap();
            assert!(battle.validate(ONE, decision.choice, decision.target).is_ok());
        }
    }
}
