//! Mode identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::QuizError;

/// The seven quiz variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeKind {
    /// Every country once, four flags to pick from.
    Classic,
    /// As many as possible before the clock runs out.
    Time,
    /// Endless questions until the lives run out.
    Survival,
    /// Every country of one chosen region once.
    Region,
    /// Guess the capital of each country once.
    Capital,
    /// Endless flag questions, never finishes.
    Flags,
    /// Browse every country in random order, no scoring.
    Learning,
}

impl ModeKind {
    pub const ALL: [ModeKind; 7] = [
        ModeKind::Classic,
        ModeKind::Time,
        ModeKind::Survival,
        ModeKind::Region,
        ModeKind::Capital,
        ModeKind::Flags,
        ModeKind::Learning,
    ];

    /// Lowercase key, also used as the RNG context.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ModeKind::Classic => "classic",
            ModeKind::Time => "time",
            ModeKind::Survival => "survival",
            ModeKind::Region => "region",
            ModeKind::Capital => "capital",
            ModeKind::Flags => "flags",
            ModeKind::Learning => "learning",
        }
    }

    /// Position in `ALL`.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ModeKind {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModeKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| QuizError::UnknownMode(s.to_string()))
    }
}
