//! Observer registry used by modes and the orchestrator to publish snapshots.

pub mod registry;

pub use registry::{Listener, ListenerId, ListenerRegistry};
