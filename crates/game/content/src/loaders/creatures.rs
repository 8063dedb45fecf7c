//! Creature catalog loader.

use std::path::Path;

use arena_core::{AwakenBonus, BaseStats, Creature, Element, Role};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, SkillCatalog, read_file};

/// One creature template as written in `creatures.ron`.
///
/// Skills are referenced by skill catalog id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatureSpec {
    pub name: String,
    pub element: Element,
    pub rating: u8,
    #[serde(default)]
    pub role: Role,
    pub base: BaseStats,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub awaken_bonus: AwakenBonus,
    /// Skill learned on awakening, by catalog id.
    #[serde(default)]
    pub awaken_skill: Option<String>,
}

impl CreatureSpec {
    /// Build a fresh creature, resolving skill ids against `skills`.
    pub fn build(&self, skills: &SkillCatalog) -> LoadResult<Creature> {
        let lookup = |id: &String| {
            skills.get(id).cloned().ok_or_else(|| {
                anyhow::anyhow!("Creature '{}' references unknown skill '{}'", self.name, id)
            })
        };

        let learned = self.skills.iter().map(lookup).collect::<LoadResult<Vec<_>>>()?;
        let mut bonus = self.awaken_bonus.clone();
        if let Some(id) = &self.awaken_skill {
            bonus.skill = Some(lookup(id)?);
        }

        Ok(
            Creature::new(self.name.clone(), self.element, self.rating, self.base.clamp())
                .with_role(self.role)
                .with_skills(learned)
                .with_awaken_bonus(bonus),
        )
    }
}

/// Loader for the creature catalog from RON files.
///
/// RON format: `[ (name: ..., element: ..., rating: ..., base: (...), skills: [...]), ... ]`
pub struct CreatureLoader;

impl CreatureLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<CreatureSpec>> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load creatures {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<Vec<CreatureSpec>> {
        let specs: Vec<CreatureSpec> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse creature catalog RON: {}", e))?;
        for spec in &specs {
            if !(1..=6).contains(&spec.rating) {
                anyhow::bail!("Creature '{}' has rating {} outside 1..=6", spec.name, spec.rating);
            }
        }
        Ok(specs)
    }
}
