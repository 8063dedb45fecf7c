//! Action resolution: validate a choice, then apply it.

use crate::action::{ActionChoice, ActionError, ActionOutcome, HitReport};
use crate::combat::{DamageRoll, calculate_raw_damage, normal_attack_damage, resist_chance};
use crate::effect::{BeneficialKind, EffectTemplate, HarmfulKind};
use crate::rng::BattleRng;
use crate::skill::{ActiveKind, ActiveSkill};
use crate::stats::StatsSnapshot;

use super::{Battle, Slot};

/// Turns a DESPAIR stun lasts. The owner's next start-of-turn tick consumes
/// one, so the stun costs exactly one action.
pub const DESPAIR_STUN_TURNS: u32 = 2;

impl Battle {
    /// Resolve one action of `actor` against `target`.
    ///
    /// Validation runs first and a rejected action changes nothing.
    pub fn resolve(
        &mut self,
        actor: Slot,
        choice: ActionChoice,
        target: Slot,
        rng: &mut dyn BattleRng,
    ) -> Result<ActionOutcome, ActionError> {
        let skill = self.validate(actor, choice, target)?;

        let outcome = match (choice, skill) {
            (ActionChoice::NormalAttack, _) => self.apply_normal_attack(actor, target),
            (ActionChoice::NormalHeal, _) => self.apply_normal_heal(actor),
            (ActionChoice::UseSkill(index), Some(skill)) => {
                let outcome = match skill.kind {
                    ActiveKind::Attack => self.apply_attack_skill(actor, target, &skill, rng),
                    ActiveKind::Heal => self.apply_heal_skill(actor, target, &skill),
                    ActiveKind::AlliesEffect => self.apply_allies_effect(actor, target, &skill),
                    ActiveKind::EnemiesEffect => {
                        self.apply_enemies_effect(actor, target, &skill, rng)
                    }
                };
                if let Some(user) = self.creature_mut(actor) {
                    user.pay_for_skill(index);
                }
                outcome
            }
            (ActionChoice::UseSkill(_), None) => return Err(ActionError::SkillNotOwned),
        };

        tracing::debug!(
            %actor,
            %target,
            choice = choice.as_str(),
            damage = outcome.total_damage(),
            "action resolved"
        );
        Ok(outcome)
    }

    /// Check that `choice` is legal. Returns the skill to use, if any.
    pub fn validate(
        &self,
        actor: Slot,
        choice: ActionChoice,
        target: Slot,
    ) -> Result<Option<ActiveSkill>, ActionError> {
        let user = self.creature(actor).ok_or(ActionError::UnknownSlot)?;
        let victim = self.creature(target).ok_or(ActionError::UnknownSlot)?;
        if !user.is_alive() {
            return Err(ActionError::ActorDead);
        }

        let enemy_target = || {
            if actor == target {
                Err(ActionError::SameCreature)
            } else if actor.side == target.side {
                Err(ActionError::SameTeam)
            } else if !victim.is_alive() {
                Err(ActionError::TargetDead)
            } else {
                Ok(())
            }
        };
        let ally_target = || {
            if actor.side != target.side {
                Err(ActionError::DifferentTeam)
            } else if !victim.is_alive() {
                Err(ActionError::TargetDead)
            } else {
                Ok(())
            }
        };

        match choice {
            ActionChoice::NormalAttack => enemy_target().map(|_| None),
            ActionChoice::NormalHeal => {
                if actor != target {
                    Err(ActionError::NotHealingSelf)
                } else {
                    Ok(None)
                }
            }
            ActionChoice::UseSkill(index) => {
                let skill = user.check_skill(index)?;
                if skill.kind.targets_allies() {
                    ally_target()?;
                } else {
                    enemy_target()?;
                }
                Ok(Some(skill.clone()))
            }
        }
    }

    // ========================================================================
    // Targets
    // ========================================================================

    /// The target alone, or every living member of its team for AoE skills.
    fn targets(&self, target: Slot, aoe: bool) -> Vec<Slot> {
        if aoe {
            self.living(target.side).collect()
        } else {
            vec![target]
        }
    }

    fn snapshot(&self, slot: Slot) -> Option<StatsSnapshot> {
        self.creature(slot).map(|c| c.snapshot())
    }

    // ========================================================================
    // Damage
    // ========================================================================

    /// Land `roll` on `target`, then apply life drain and reflect.
    ///
    /// Life drain heals the attacker by its drain share of the HP the target
    /// lost. Reflect returns the target's reflect share of that HP to the
    /// attacker and never reflects again.
    fn land_hit(
        &mut self,
        actor: Slot,
        target: Slot,
        roll: DamageRoll,
        life_drain_pct: f64,
    ) -> HitReport {
        let Some(victim) = self.creature_mut(target) else {
            return HitReport {
                target,
                damage: 0.0,
                hit: roll.hit,
                reflected: 0.0,
                drained: 0.0,
                killed: false,
            };
        };
        let damage = victim.take_damage(roll.amount);
        let reflect_pct = victim.snapshot().reflect_pct;
        let killed = !victim.is_alive();

        let mut drained = 0.0;
        let mut reflected = 0.0;
        if let Some(user) = self.creature_mut(actor) {
            if life_drain_pct > 0.0 {
                drained = user.heal(damage * life_drain_pct / 100.0);
            }
            if reflect_pct > 0.0 && damage > 0.0 {
                reflected = user.take_damage(damage * reflect_pct / 100.0);
            }
        }

        if killed {
            tracing::debug!(%actor, %target, "target defeated");
        }
        HitReport {
            target,
            damage,
            hit: roll.hit,
            reflected,
            drained,
            killed,
        }
    }

    fn apply_normal_attack(&mut self, actor: Slot, target: Slot) -> ActionOutcome {
        let mut outcome = ActionOutcome::default();
        if let (Some(user), Some(victim)) = (self.snapshot(actor), self.snapshot(target)) {
            let roll = normal_attack_damage(&user, &victim);
            outcome.hits.push(self.land_hit(actor, target, roll, 0.0));
        }
        self.finish_outcome(actor, outcome)
    }

    fn apply_normal_heal(&mut self, actor: Slot) -> ActionOutcome {
        let mut outcome = ActionOutcome::default();
        let ratio = self.config.normal_heal_ratio;
        if let Some(user) = self.creature_mut(actor) {
            let healed = user.heal(ratio * user.max_hp());
            outcome.heals.push((actor, healed));
        }
        outcome
    }

    fn apply_attack_skill(
        &mut self,
        actor: Slot,
        target: Slot,
        skill: &ActiveSkill,
        rng: &mut dyn BattleRng,
    ) -> ActionOutcome {
        let mut outcome = ActionOutcome::default();
        let Some(user) = self.snapshot(actor) else {
            return outcome;
        };

        let targets = self.targets(target, skill.aoe);
        for &enemy in &targets {
            let Some(victim) = self.snapshot(enemy) else {
                continue;
            };
            let roll = calculate_raw_damage(&user, &victim, &skill.multiplier, skill.flags, rng);
            let report = self.land_hit(actor, enemy, roll, user.life_drain_pct);
            outcome.hits.push(report);
            if report.killed {
                continue;
            }

            let chance = resist_chance(&user, &victim);
            if report.damage > 0.0 && user.stun_rate > 0.0 && rng.roll(user.stun_rate) {
                let stun = EffectTemplate::new(HarmfulKind::Stun, DESPAIR_STUN_TURNS);
                self.try_debuff(enemy, &[stun], chance, rng, &mut outcome);
            }
            self.try_debuff(enemy, &skill.debuffs, chance, rng, &mut outcome);
            self.try_gauge_down(enemy, skill.enemies_gauge_down, chance, rng);
        }

        if let Some(creature) = self.creature_mut(actor) {
            creature.reset_gauge();
        }
        self.apply_passive_payload(actor, &user, &targets, rng, &mut outcome);
        self.finish_outcome(actor, outcome)
    }

    /// Fire the side payload of the actor's passives after an attack skill.
    ///
    /// Buffs, gauge gain and heals reach every living ally; debuffs and
    /// gauge loss are rolled against each enemy that was hit.
    fn apply_passive_payload(
        &mut self,
        actor: Slot,
        user: &StatsSnapshot,
        enemies: &[Slot],
        rng: &mut dyn BattleRng,
        outcome: &mut ActionOutcome,
    ) {
        let Some(creature) = self.creature(actor) else {
            return;
        };
        if !creature.passives_active() || !user.capabilities.can_use_passives() {
            return;
        }
        let passives: Vec<_> = creature
            .passive_skills()
            .filter(|p| p.has_side_payload())
            .cloned()
            .collect();
        if passives.is_empty() {
            return;
        }

        let allies: Vec<Slot> = self.living(actor.side).collect();
        for passive in &passives {
            for &ally in &allies {
                self.try_buff(ally, &passive.buffs_to_allies, outcome);
                if let Some(c) = self.creature_mut(ally) {
                    c.advance_gauge(passive.allies_gauge_up);
                    if passive.heal_to_allies > 0.0 {
                        let healed = c.heal(passive.heal_to_allies);
                        outcome.heals.push((ally, healed));
                    }
                }
            }
            for &enemy in enemies {
                let alive = self.creature(enemy).is_some_and(|c| c.is_alive());
                let Some(victim) = self.snapshot(enemy).filter(|_| alive) else {
                    continue;
                };
                let chance = resist_chance(user, &victim);
                self.try_debuff(enemy, &passive.debuffs_to_enemies, chance, rng, outcome);
                self.try_gauge_down(enemy, passive.enemies_gauge_down, chance, rng);
            }
        }
    }

    // ========================================================================
    // Support
    // ========================================================================

    fn apply_heal_skill(&mut self, actor: Slot, target: Slot, skill: &ActiveSkill) -> ActionOutcome {
        let mut outcome = ActionOutcome::default();
        for ally in self.targets(target, skill.aoe) {
            if let Some(c) = self.creature_mut(ally) {
                let healed = c.heal(skill.heal_amount);
                outcome.heals.push((ally, healed));
            }
        }
        tracing::trace!(%actor, heals = outcome.heals.len(), "heal skill");
        outcome
    }

    fn apply_allies_effect(
        &mut self,
        actor: Slot,
        target: Slot,
        skill: &ActiveSkill,
    ) -> ActionOutcome {
        let mut outcome = ActionOutcome::default();
        for ally in self.targets(target, skill.aoe) {
            self.try_buff(ally, &skill.buffs, &mut outcome);
            if let Some(c) = self.creature_mut(ally) {
                c.advance_gauge(skill.allies_gauge_up);
            }
        }
        tracing::trace!(%actor, buffs = outcome.buffs.len(), "allies effect");
        outcome
    }

    fn apply_enemies_effect(
        &mut self,
        actor: Slot,
        target: Slot,
        skill: &ActiveSkill,
        rng: &mut dyn BattleRng,
    ) -> ActionOutcome {
        let mut outcome = ActionOutcome::default();
        let Some(user) = self.snapshot(actor) else {
            return outcome;
        };
        for enemy in self.targets(target, skill.aoe) {
            let Some(victim) = self.snapshot(enemy) else {
                continue;
            };
            let chance = resist_chance(&user, &victim);
            self.try_debuff(enemy, &skill.debuffs, chance, rng, &mut outcome);
            self.try_gauge_down(enemy, skill.enemies_gauge_down, chance, rng);
        }
        outcome
    }

    // ========================================================================
    // Effect helpers
    // ========================================================================

    fn try_buff(
        &mut self,
        slot: Slot,
        buffs: &[EffectTemplate<BeneficialKind>],
        outcome: &mut ActionOutcome,
    ) {
        let Some(creature) = self.creature_mut(slot) else {
            return;
        };
        for buff in buffs {
            if creature.add_beneficial_effect(buff.instantiate()).is_ok() {
                outcome.buffs.push((slot, buff.kind));
            }
        }
    }

    /// Each debuff lands when its roll is at or above the resist chance.
    fn try_debuff(
        &mut self,
        slot: Slot,
        debuffs: &[EffectTemplate<HarmfulKind>],
        resist: f64,
        rng: &mut dyn BattleRng,
        outcome: &mut ActionOutcome,
    ) {
        let Some(creature) = self.creature_mut(slot) else {
            return;
        };
        if !creature.capabilities().can_receive_harmful() {
            return;
        }
        for debuff in debuffs {
            if rng.roll(resist) {
                continue;
            }
            if creature.add_harmful_effect(debuff.instantiate()).is_ok() {
                outcome.debuffs.push((slot, debuff.kind));
            }
        }
    }

    fn try_gauge_down(&mut self, slot: Slot, amount: f64, resist: f64, rng: &mut dyn BattleRng) {
        if amount <= 0.0 {
            return;
        }
        let Some(creature) = self.creature_mut(slot) else {
            return;
        };
        if !creature.capabilities().can_receive_harmful() || rng.roll(resist) {
            return;
        }
        creature.drain_gauge(amount);
    }

    fn finish_outcome(&self, actor: Slot, mut outcome: ActionOutcome) -> ActionOutcome {
        outcome.actor_killed = self.creature(actor).is_some_and(|c| !c.is_alive());
        outcome
    }
}
