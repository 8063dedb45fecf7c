//! Runtime orchestration for arena battles.
//!
//! This crate wires the action provider abstraction, the battle runner and
//! the event logs around the pure rules in `arena-core`. Consumers build a
//! [`BattleRunner`] from a battle and one provider per side, then call
//! [`BattleRunner::run`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the battle runner and its summary
//! - [`api`] exposes the types downstream clients interact with
//! - [`providers`] ships the AI and scripted decision makers
//! - [`events`] and [`repository`] describe and store what happened
pub mod api;
pub mod events;
pub mod providers;
pub mod repository;
pub mod runtime;

pub use api::{ActionProvider, Decision, Result, RuntimeError};
pub use events::BattleEvent;
pub use providers::{AiProvider, ScriptedProvider};
pub use repository::{
    EventSink, FileEventLog, FileRepository, JsonLinesSink, MemorySink, RepositoryError,
};
pub use runtime::{BattleRunner, BattleSummary, Survivor};
