//! Built-in action providers.

mod ai;
mod scripted;

pub use ai::AiProvider;
pub use scripted::ScriptedProvider;
