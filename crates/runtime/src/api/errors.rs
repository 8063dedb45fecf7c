//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the battle rules, action providers and event logs so
//! clients can bubble them up with consistent context.
use arena_core::{ActionError, Slot, TurnError};
use thiserror::Error;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Turn(#[from] TurnError),

    #[error(transparent)]
    Action(#[from] ActionError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("battle still undecided after {limit} actions")]
    ActionLimitReached { limit: u32 },

    #[error("{actor} has no living enemy to target")]
    NoLivingTarget { actor: Slot },

    #[error("scripted provider ran out of decisions for {actor}")]
    ScriptExhausted { actor: Slot },
}
