//! Skill catalog loader.

use std::collections::HashMap;
use std::path::Path;

use arena_core::Skill;

use crate::loaders::{LoadResult, read_file};

/// Skills keyed by catalog id.
pub type SkillCatalog = HashMap<String, Skill>;

/// Loader for the skill catalog from RON files.
///
/// RON format: `{ "id": Active((...)), "id": Passive((...)), "id": Leader((...)) }`
pub struct SkillLoader;

impl SkillLoader {
    pub fn load(path: &Path) -> LoadResult<SkillCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load skills {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<SkillCatalog> {
        let catalog: SkillCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skill catalog RON: {}", e))?;
        Ok(catalog)
    }
}
