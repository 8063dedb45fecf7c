use crate::action::ActionError;
use crate::skill::{ActiveKind, ActiveSkill, LeaderSkill, PassiveSkill, Skill};

use super::Creature;

impl Creature {
    pub fn active_skill(&self, index: usize) -> Option<&ActiveSkill> {
        self.skills.get(index).and_then(Skill::as_active)
    }

    /// Indices of the active skills in the skill list.
    pub fn active_skill_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.skills
            .iter()
            .enumerate()
            .filter(|(_, s)| s.as_active().is_some())
            .map(|(i, _)| i)
    }

    pub fn passive_skills(&self) -> impl Iterator<Item = &PassiveSkill> {
        self.skills.iter().filter_map(Skill::as_passive)
    }

    pub fn leader_skill(&self) -> Option<&LeaderSkill> {
        self.skills.iter().find_map(Skill::as_leader)
    }

    pub fn learn_skill(&mut self, skill: Skill) {
        self.skills.push(match skill {
            Skill::Active(active) => Skill::Active(active.normalized()),
            other => other,
        });
    }

    /// Level up the active skill at `index`. Returns false for non-active skills.
    pub fn level_up_skill(&mut self, index: usize) -> bool {
        match self.skills.get_mut(index).and_then(Skill::as_active_mut) {
            Some(skill) => {
                skill.level_up();
                true
            }
            None => false,
        }
    }

    /// Check that the active skill at `index` can be used right now.
    pub fn check_skill(&self, index: usize) -> Result<&ActiveSkill, ActionError> {
        let skill = self.active_skill(index).ok_or(ActionError::SkillNotOwned)?;
        if skill.has_cooltime() && !self.capabilities().can_use_cooltime_skills() {
            return Err(ActionError::Silenced);
        }
        if !skill.is_ready() {
            return Err(ActionError::OnCooldown);
        }
        if self.current_mp < skill.mp_cost {
            return Err(ActionError::InsufficientMp);
        }
        Ok(skill)
    }

    /// Deduct the MP cost and start the cooltime of the skill at `index`.
    pub(crate) fn pay_for_skill(&mut self, index: usize) {
        if let Some(skill) = self.skills.get_mut(index).and_then(Skill::as_active_mut) {
            let cost = skill.mp_cost;
            skill.start_cooltime();
            self.spend_mp(cost);
        }
    }

    /// Skill used to strike back: the last listed attack skill if it can be
    /// used right now, otherwise `None` for a normal attack.
    pub fn counter_skill(&self) -> Option<usize> {
        let index = self
            .skills
            .iter()
            .enumerate()
            .filter(|(_, s)| s.as_active().is_some_and(|a| a.kind == ActiveKind::Attack))
            .map(|(i, _)| i)
            .last()?;
        self.check_skill(index).ok().map(|_| index)
    }

    /// Active skills that pass [`Creature::check_skill`].
    pub fn usable_skills(&self) -> impl Iterator<Item = usize> + '_ {
        self.active_skill_indices()
            .filter(|&i| self.check_skill(i).is_ok())
    }
}
