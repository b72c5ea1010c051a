//! Application-level controller that switches between modes.

pub mod orchestrator;

pub use orchestrator::{Advance, Quiz};
