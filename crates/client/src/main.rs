//! Arena battle client binary.
//!
//! Composition root: loads content from the data directory, builds two CPU
//! rosters, plays them against each other with the AI provider and prints
//! the result.
//!
//! # Examples
//!
//! ```bash
//! ARENA_SEED=7 ARENA_EVENT_LOG=logs/battle.jsonl cargo run -p arena-client
//! ```

mod config;
mod logging;

use std::path::Path;

use anyhow::{Context, Result};
use arena_content::{Catalog, ContentFactory};
use arena_core::{Battle, PcgRng, Side};
use arena_runtime::{AiProvider, BattleRunner, BattleSummary, FileEventLog, JsonLinesSink};

use crate::config::ClientConfig;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    let _guard = logging::setup_logging(&config.log_dir)?;

    tracing::info!(seed = config.seed, data_dir = %config.data_dir.display(), "Starting arena");

    let catalog = ContentFactory::new(&config.data_dir).load_catalog()?;
    let (player, opponent) = pick_rosters(&catalog, &config)?;

    let mut rng = PcgRng::new(config.seed);
    let team_one = catalog.build_team(&player, &mut rng)?;
    let team_two = catalog.build_team(&opponent, &mut rng)?;
    let battle = Battle::new(team_one, team_two, catalog.config.clone())
        .context("Failed to set up battle")?;

    let runner = BattleRunner::new(battle, AiProvider::new(), AiProvider::new(), rng);
    let mut runner = match &config.event_log {
        Some(path) => attach_event_log(runner, path)?,
        None => runner,
    };

    let summary = runner.run()?;
    print_summary(&runner, &summary);

    runner.finish();
    tracing::info!("Arena shutdown complete");
    Ok(())
}

/// Configured rosters, or the first two in the catalog.
fn pick_rosters(catalog: &Catalog, config: &ClientConfig) -> Result<(String, String)> {
    let default = |index: usize| {
        catalog
            .rosters
            .get(index)
            .map(|r| r.name.clone())
            .with_context(|| format!("arena.ron needs at least {} rosters", index + 1))
    };

    let player = match &config.player_team {
        Some(name) => name.clone(),
        None => default(0)?,
    };
    let opponent = match &config.opponent_team {
        Some(name) => name.clone(),
        None => default(1)?,
    };
    Ok((player, opponent))
}

/// `.jsonl` paths get a JSON-lines log, anything else the binary log.
fn attach_event_log(runner: BattleRunner, path: &Path) -> Result<BattleRunner> {
    if path.extension().is_some_and(|ext| ext == "jsonl") {
        let sink = JsonLinesSink::create(path)
            .with_context(|| format!("Failed to open event log {}", path.display()))?;
        return Ok(runner.with_sink(sink));
    }

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("Invalid event log path {}", path.display()))?;
    let log = FileEventLog::create(dir, name)
        .with_context(|| format!("Failed to create event log {}", path.display()))?;
    Ok(runner.with_sink(log))
}

fn print_summary(runner: &BattleRunner, summary: &BattleSummary) {
    let battle = runner.battle();
    println!(
        "{} vs {}",
        battle.team(Side::One).name,
        battle.team(Side::Two).name
    );
    println!(
        "Winner: {} after {} actions",
        battle.team(summary.winner).name,
        summary.actions
    );

    for survivor in &summary.survivors {
        println!(
            "  {:<14} {:>10.0} / {:.0} HP",
            survivor.name, survivor.hp, survivor.max_hp
        );
    }

    if let Some(reward) = summary.reward {
        println!(
            "Reward: {:.0} player EXP, {:.0} gold, {} gems, {:.0} creature EXP",
            reward.player_exp, reward.gold, reward.gems, reward.creature_exp
        );
    }
}
