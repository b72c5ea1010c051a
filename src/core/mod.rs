//! Core types: countries, regions, RNG, configuration, errors.
//!
//! Everything here is mode-agnostic. Modes and the catalog build on top.

pub mod config;
pub mod country;
pub mod error;
pub mod rng;

pub use config::{FallbackPolicy, LoadPolicy, QuizConfig};
pub use country::{Country, Region};
pub use error::{QuizError, SourceError};
pub use rng::GameRng;
