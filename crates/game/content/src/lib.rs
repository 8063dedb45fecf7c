//! Data-driven content definitions and loaders.
//!
//! This crate houses the static arena content and provides loaders for
//! RON/TOML data files:
//! - Skill catalog (data-driven via RON)
//! - Creature catalog (data-driven via RON)
//! - Rune catalog (data-driven via RON)
//! - CPU arena rosters (data-driven via RON)
//! - Battle configuration (data-driven via TOML)
//!
//! Content is turned into arena-core [`Team`](arena_core::Team)s by the
//! [`ContentFactory`] and never appears in battle state by name.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ArenaLoader, Catalog, ConfigLoader, ContentFactory, CreatureLoader, CreatureSpec, MemberSpec,
    RosterSpec, RuneLoader, RuneSpec, SkillLoader,
};
