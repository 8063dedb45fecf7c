//! Client configuration read from the process environment.
use std::env;
use std::path::PathBuf;

/// Everything the `arena` binary needs to set up one battle.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    pub data_dir: PathBuf,
    pub seed: u64,
    pub event_log: Option<PathBuf>,
    pub log_dir: PathBuf,
    /// Roster for team one; the first roster in `arena.ron` when unset.
    pub player_team: Option<String>,
    /// Roster for team two; the second roster in `arena.ron` when unset.
    pub opponent_team: Option<String>,
}

impl ClientConfig {
    pub const DEFAULT_DATA_DIR: &'static str = "data";
    pub const DEFAULT_LOG_DIR: &'static str = "logs";

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ARENA_DATA_DIR` - Content directory (default: `data`)
    /// - `ARENA_SEED` - Battle seed (default: random)
    /// - `ARENA_EVENT_LOG` - Event log path, `.jsonl` for JSON lines (default: none)
    /// - `ARENA_LOG_DIR` - Directory for `arena.log` (default: `logs`)
    /// - `ARENA_PLAYER_TEAM` / `ARENA_OPPONENT_TEAM` - Roster names
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let text = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            data_dir: text("ARENA_DATA_DIR")
                .map_or_else(|| PathBuf::from(Self::DEFAULT_DATA_DIR), PathBuf::from),
            seed: read_env(&lookup, "ARENA_SEED").unwrap_or_else(rand::random),
            event_log: text("ARENA_EVENT_LOG").map(PathBuf::from),
            log_dir: text("ARENA_LOG_DIR")
                .map_or_else(|| PathBuf::from(Self::DEFAULT_LOG_DIR), PathBuf::from),
            player_team: text("ARENA_PLAYER_TEAM"),
            opponent_team: text("ARENA_OPPONENT_TEAM"),
        }
    }
}

fn read_env<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> ClientConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ClientConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config(&[("ARENA_SEED", "9")]);
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.log_dir, PathBuf::from("logs"));
        assert_eq!(config.seed, 9);
        assert!(config.event_log.is_none());
        assert!(config.player_team.is_none());
    }

    #[test]
    fn variables_override_defaults() {
        let config = config(&[
            ("ARENA_DATA_DIR", "/srv/arena"),
            ("ARENA_SEED", " 1234 "),
            ("ARENA_EVENT_LOG", "out/battle.jsonl"),
            ("ARENA_PLAYER_TEAM", "Tideguard"),
            ("ARENA_OPPONENT_TEAM", ""),
        ]);
        assert_eq!(config.data_dir, PathBuf::from("/srv/arena"));
        assert_eq!(config.seed, 1234);
        assert_eq!(config.event_log, Some(PathBuf::from("out/battle.jsonl")));
        assert_eq!(config.player_team.as_deref(), Some("Tideguard"));
        assert!(config.opponent_team.is_none());
    }
}
