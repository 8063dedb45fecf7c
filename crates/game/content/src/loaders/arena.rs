//! Arena roster loader.
//!
//! Rosters describe the CPU teams a player can be matched against: which
//! creatures line up, which runes they wear and how often each rune is
//! upgraded before the fight.

use std::path::Path;

use arena_core::BattleConfig;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// One team slot of a roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberSpec {
    /// Creature catalog name.
    pub creature: String,
    /// Rune catalog names to equip.
    #[serde(default)]
    pub runes: Vec<String>,
    /// Upgrade attempts made on every equipped rune.
    #[serde(default)]
    pub rune_upgrades: u32,
}

/// A named team. The first member is the leader.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterSpec {
    pub name: String,
    pub members: Vec<MemberSpec>,
}

/// Arena roster file structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ArenaFile {
    rosters: Vec<RosterSpec>,
}

/// Loader for arena rosters from RON files.
pub struct ArenaLoader;

impl ArenaLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<RosterSpec>> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load arena {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<Vec<RosterSpec>> {
        let file: ArenaFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse arena RON: {}", e))?;
        for roster in &file.rosters {
            if roster.members.is_empty() || roster.members.len() > BattleConfig::TEAM_SIZE {
                anyhow::bail!(
                    "Roster '{}' must have 1..={} members, has {}",
                    roster.name,
                    BattleConfig::TEAM_SIZE,
                    roster.members.len()
                );
            }
        }
        Ok(file.rosters)
    }
}
