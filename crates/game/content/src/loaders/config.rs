//! Battle configuration loader.

use std::path::Path;

use arena_core::BattleConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for battle configuration from TOML files.
///
/// Every field is optional; missing ones keep their [`BattleConfig`] default.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    pub fn load(path: &Path) -> LoadResult<BattleConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<BattleConfig> {
        let config: BattleConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        if config.tick_rate <= 0.0 {
            anyhow::bail!("tick_rate must be positive, got {}", config.tick_rate);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_keep_defaults() {
        let config = ConfigLoader::parse("max_actions = 500\nrestore_on_rune_change = false\n")
            .unwrap();
        assert_eq!(config.max_actions, 500);
        assert!(!config.restore_on_rune_change);
        assert_eq!(config.tick_rate, BattleConfig::DEFAULT_TICK_RATE);
    }

    #[test]
    fn rejects_non_positive_tick_rate() {
        assert!(ConfigLoader::parse("tick_rate = 0.0").is_err());
    }
}
