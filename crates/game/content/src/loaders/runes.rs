//! Rune catalog loader.

use std::path::Path;

use arena_core::{Rune, RuneSet, RuneStat};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// One rune as written in `runes.ron`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuneSpec {
    pub name: String,
    pub rating: u8,
    pub slot: u8,
    pub set: RuneSet,
    pub main_stat: RuneStat,
}

impl RuneSpec {
    /// Forge a fresh level-1 rune.
    pub fn build(&self) -> LoadResult<Rune> {
        Rune::new(self.name.clone(), self.rating, self.slot, self.set, self.main_stat)
            .map_err(|e| anyhow::anyhow!("Invalid rune '{}': {}", self.name, e))
    }
}

/// Loader for the rune catalog from RON files.
pub struct RuneLoader;

impl RuneLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<RuneSpec>> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load runes {}: {}", path.display(), e))
    }

    /// Parse and validate every rune up front.
    pub fn parse(content: &str) -> LoadResult<Vec<RuneSpec>> {
        let specs: Vec<RuneSpec> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse rune catalog RON: {}", e))?;
        for spec in &specs {
            spec.build()?;
        }
        Ok(specs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_builds_runes() {
        let specs = RuneLoader::parse(
            r#"[
                (name: "Swift I", rating: 3, slot: 1, set: Swift, main_stat: Spd),
                (name: "Fatal II", rating: 4, slot: 2, set: Fatal, main_stat: AtkPct),
            ]"#,
        )
        .unwrap();
        let rune = specs[1].build().unwrap();
        assert_eq!(rune.set(), RuneSet::Fatal);
        assert_eq!(rune.level(), 1);
    }

    #[test]
    fn invalid_slot_is_rejected() {
        let err = RuneLoader::parse(
            r#"[(name: "Broken", rating: 3, slot: 9, set: Swift, main_stat: Spd)]"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Broken"));
    }
}
