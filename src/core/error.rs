//! Error types.
//!
//! Answering without a pending question is not an error: `answer_question`
//! simply returns `None`.

use thiserror::Error;

use super::country::Region;
use crate::modes::ModeKind;

/// Errors surfaced by the catalog, the modes and the orchestrator.
#[derive(Error, Debug)]
pub enum QuizError {
    /// Catalog queried before a successful load, or loaded empty.
    #[error("country catalog is not loaded")]
    NotReady,

    /// Every country source failed and no fallback was allowed.
    #[error("failed to load countries: {} source(s) failed", .failures.len())]
    LoadFailure {
        /// Source name and error, in the order they were tried.
        failures: Vec<(String, SourceError)>,
    },

    /// The mode has nothing to ask.
    #[error("no countries available for {mode} mode{}", .region.map(|r| format!(" in {r}")).unwrap_or_default())]
    EmptyPool {
        mode: ModeKind,
        region: Option<Region>,
    },

    #[error("no region selected")]
    NoRegionSelected,

    #[error("unknown region: {0}")]
    UnknownRegion(String),

    #[error("unknown game mode: {0}")]
    UnknownMode(String),

    /// Command not valid for this mode or in its current phase.
    #[error("{operation} is not supported by {mode} mode in its current phase")]
    Unsupported {
        mode: ModeKind,
        operation: &'static str,
    },
}

/// Errors from a single country source.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Cached data is older than the configured time to live.
    #[error("cached data expired")]
    Expired,

    #[error("source returned no countries")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_failure_message() {
        let err = QuizError::LoadFailure {
            failures: vec![
                ("cache".to_string(), SourceError::Expired),
                ("memory".to_string(), SourceError::Empty),
            ],
        };
        assert_eq!(err.to_string(), "failed to load countries: 2 source(s) failed");
    }

    #[test]
    fn test_empty_pool_message() {
        let err = QuizError::EmptyPool {
            mode: ModeKind::Region,
            region: Some(Region::Oceania),
        };
        assert_eq!(err.to_string(), "no countries available for region mode in Oceania");

        let err = QuizError::EmptyPool {
            mode: ModeKind::Capital,
            region: None,
        };
        assert_eq!(err.to_string(), "no countries available for capital mode");
    }

    #[test]
    fn test_source_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: SourceError = io.into();
        assert!(matches!(err, SourceError::Io(_)));
    }
}
