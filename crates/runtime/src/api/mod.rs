//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! the runner and the providers can stay focused on battle flow.

pub mod errors;
pub mod providers;

pub use errors::{Result, RuntimeError};
pub use providers::{ActionProvider, Decision};
