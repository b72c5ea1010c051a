//! # flag-quiz
//!
//! Game engine for a geography quiz: show a flag (or a country), pick the
//! matching answer from a handful of options.
//!
//! ## Design Principles
//!
//! 1. **One engine, many rule sets**: Classic, Time, Survival, Region,
//!    Capital, Flags and Learning share a single `GameMode` state machine.
//!    Only the rules differ.
//!
//! 2. **Presentation-agnostic**: Modes publish `GameSnapshot`s to listeners
//!    and take commands. Rendering, input and navigation live elsewhere.
//!
//! 3. **Load once, read freely**: The `CountryCatalog` is loaded at most
//!    once and is read-only afterwards, so all modes share it behind an `Arc`.
//!
//! 4. **Deterministic when seeded**: Every random choice goes through
//!    `GameRng`. A fixed seed replays the same questions.
//!
//! ## Modules
//!
//! - `core`: Country data, configuration, errors, RNG
//! - `catalog`: Country catalog, sources, JSON cache, built-in dataset
//! - `observer`: Listener registry used for snapshot notifications
//! - `modes`: Game state machine and the seven rule sets
//! - `quiz`: Orchestrator that switches between modes

pub mod catalog;
pub mod core;
pub mod modes;
pub mod observer;
pub mod quiz;

// Re-export commonly used types
pub use crate::core::{Country, FallbackPolicy, GameRng, LoadPolicy, QuizConfig, QuizError, Region, SourceError};

pub use crate::catalog::{BuiltinSource, CountryCatalog, CountrySource, JsonCache, MemorySource};

pub use crate::observer::{ListenerId, ListenerRegistry};

pub use crate::modes::{
    Answer, AnswerOutcome, GameMode, GameSnapshot, GameState, GameStats, ModeExtras, ModeKind, Phase, Progress,
    Score, Verdict,
};

pub use crate::quiz::{Advance, Quiz};
