//! Content loaders for reading arena data from files.
//!
//! Each loader exposes `load(path)` for files and `parse(text)` for inline
//! data, so tests and tools can feed content without touching the disk.

pub mod arena;
pub mod config;
pub mod creatures;
pub mod factory;
pub mod runes;
pub mod skills;

pub use arena::{ArenaLoader, MemberSpec, RosterSpec};
pub use config::ConfigLoader;
pub use creatures::{CreatureLoader, CreatureSpec};
pub use factory::{Catalog, ContentFactory};
pub use runes::{RuneLoader, RuneSpec};
pub use skills::{SkillCatalog, SkillLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
