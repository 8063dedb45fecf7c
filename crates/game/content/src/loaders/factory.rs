//! Content factory for building teams from data files.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use arena_core::{BattleConfig, BattleRng, Creature, Team};

use crate::loaders::{
    ArenaLoader, ConfigLoader, CreatureLoader, CreatureSpec, LoadResult, MemberSpec, RosterSpec,
    RuneLoader, RuneSpec, SkillCatalog, SkillLoader,
};

/// Every catalog of a data directory, indexed by name.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub config: BattleConfig,
    pub skills: SkillCatalog,
    pub creatures: HashMap<String, CreatureSpec>,
    pub runes: HashMap<String, RuneSpec>,
    pub rosters: Vec<RosterSpec>,
}

impl Catalog {
    pub fn roster(&self, name: &str) -> Option<&RosterSpec> {
        self.rosters.iter().find(|r| r.name == name)
    }

    /// Build one team member: resolve skills, equip runes, then upgrade
    /// every equipped rune `rune_upgrades` times.
    fn build_member(
        &self,
        member: &MemberSpec,
        rng: &mut dyn BattleRng,
    ) -> LoadResult<Creature> {
        let spec = self
            .creatures
            .get(&member.creature)
            .ok_or_else(|| anyhow::anyhow!("Unknown creature '{}'", member.creature))?;
        let mut creature = spec.build(&self.skills)?;

        for name in &member.runes {
            let rune = self
                .runes
                .get(name)
                .ok_or_else(|| anyhow::anyhow!("Unknown rune '{}'", name))?
                .build()?;
            let displaced = creature.place_rune(rune, &self.config).map_err(|e| {
                anyhow::anyhow!("Cannot equip '{}' on '{}': {}", name, member.creature, e)
            })?;
            if let Some(old) = displaced {
                tracing::warn!(
                    creature = %member.creature,
                    replaced = %old.name,
                    rune = %name,
                    "roster equips two runes in one slot"
                );
            }
        }

        let slots: Vec<u8> = creature.runes().iter().map(|r| r.slot()).collect();
        for slot in slots {
            for _ in 0..member.rune_upgrades {
                creature
                    .level_up_rune(slot, rng, &self.config)
                    .map_err(|e| anyhow::anyhow!("Rune upgrade failed: {}", e))?;
            }
        }
        Ok(creature)
    }

    /// Build the roster called `name` into a ready team.
    pub fn build_team(&self, name: &str, rng: &mut dyn BattleRng) -> LoadResult<Team> {
        let roster = self
            .roster(name)
            .ok_or_else(|| anyhow::anyhow!("Unknown roster '{}'", name))?;

        let mut team = Team::new(roster.name.clone());
        for member in &roster.members {
            let creature = self.build_member(member, rng)?;
            team.add(creature)
                .map_err(|e| anyhow::anyhow!("Roster '{}': {}", roster.name, e))?;
        }
        tracing::debug!(roster = %roster.name, size = team.len(), "team built");
        Ok(team)
    }
}

/// Content factory that loads all arena content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── skills.ron
/// ├── creatures.ron
/// ├── runes.ron
/// └── arena.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load battle configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load the skill catalog from `skills.ron`.
    pub fn load_skills(&self) -> LoadResult<SkillCatalog> {
        SkillLoader::load(&self.data_dir.join("skills.ron"))
    }

    /// Load the creature catalog from `creatures.ron`.
    pub fn load_creatures(&self) -> LoadResult<Vec<CreatureSpec>> {
        CreatureLoader::load(&self.data_dir.join("creatures.ron"))
    }

    /// Load the rune catalog from `runes.ron`.
    pub fn load_runes(&self) -> LoadResult<Vec<RuneSpec>> {
        RuneLoader::load(&self.data_dir.join("runes.ron"))
    }

    /// Load CPU rosters from `arena.ron`.
    pub fn load_rosters(&self) -> LoadResult<Vec<RosterSpec>> {
        ArenaLoader::load(&self.data_dir.join("arena.ron"))
    }

    /// Load every file and index the catalogs by name.
    pub fn load_catalog(&self) -> LoadResult<Catalog> {
        let catalog = Catalog {
            config: self.load_config()?,
            skills: self.load_skills()?,
            creatures: by_name(self.load_creatures()?, |c| &c.name),
            runes: by_name(self.load_runes()?, |r| &r.name),
            rosters: self.load_rosters()?,
        };
        tracing::info!(
            data_dir = %self.data_dir.display(),
            skills = catalog.skills.len(),
            creatures = catalog.creatures.len(),
            runes = catalog.runes.len(),
            rosters = catalog.rosters.len(),
            "content loaded"
        );
        Ok(catalog)
    }

    /// Load the catalog and build the roster called `roster`.
    pub fn build_team(&self, roster: &str, rng: &mut dyn BattleRng) -> LoadResult<Team> {
        self.load_catalog()?.build_team(roster, rng)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

fn by_name<T>(items: Vec<T>, name: impl Fn(&T) -> &String) -> HashMap<String, T> {
    items
        .into_iter()
        .map(|item| (name(&item).clone(), item))
        .collect()
}

#[cfg(test)]
mod tests {
    use arena_core::SequenceRng;

    use super::*;

    fn shipped_data() -> ContentFactory {
        ContentFactory::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../data"))
    }

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn missing_directory_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ContentFactory::new(dir.path()).load_catalog().unwrap_err();
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn shipped_content_builds_every_roster() {
        let catalog = shipped_data().load_catalog().unwrap();
        assert!(!catalog.rosters.is_empty());

        let mut rng = SequenceRng::constant(0.0);
        for roster in &catalog.rosters {
            let team = catalog.build_team(&roster.name, &mut rng).unwrap();
            assert_eq!(team.len(), roster.members.len());
            assert!(team.creatures().iter().all(|c| c.is_alive()));
        }
    }

    #[test]
    fn unknown_roster_is_an_error() {
        let catalog = shipped_data().load_catalog().unwrap();
        let mut rng = SequenceRng::constant(0.0);
        assert!(catalog.build_team("No Such Team", &mut rng).is_err());
    }
}
