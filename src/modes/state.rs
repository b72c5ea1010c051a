//! Game state and the read-only views handed to listeners and hosts.
//!
//! ## GameState
//!
//! Owned by exactly one `GameMode`. Holds the phase, the running score and
//! the pending question.
//!
//! ## GameSnapshot
//!
//! A detached copy of the state plus mode-specific extras. Listeners
//! receive one after every phase change and, in Time mode, every tick.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::kind::ModeKind;
use crate::core::{Country, Region};

/// State-machine phase of a mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Not started, or finished.
    #[default]
    Idle,
    /// Waiting for the catalog, or reset and about to restart.
    Loading,
    /// Time mode: waiting for `begin_game`.
    Ready,
    /// Region mode: waiting for `select_region`.
    RegionSelection,
    /// A question is pending.
    Question,
    /// The pending question has been answered.
    Result,
}

/// Running score. `total == correct + incorrect` always holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub correct: u32,
    pub incorrect: u32,
    pub total: u32,
}

impl Score {
    /// Count one answer.
    pub fn record(&mut self, correct: bool) {
        if correct {
            self.correct += 1;
        } else {
            self.incorrect += 1;
        }
        self.total += 1;
    }

    /// Correct answers as a rounded percentage of all answers (0 if none).
    #[must_use]
    pub fn percentage(&self) -> u32 {
        rounded_percent(self.correct as usize, self.total as usize)
    }
}

pub(crate) fn rounded_percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    let pct = (part * 200 + whole) / (2 * whole);
    u32::try_from(pct).unwrap_or(u32::MAX)
}

/// A choice offered to the player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Answer {
    /// Flag questions: pick the country.
    Country(Country),
    /// Capital questions: pick the capital.
    Capital(String),
}

impl Answer {
    /// Same answer: countries by name, capitals by exact string.
    #[must_use]
    pub fn matches(&self, other: &Answer) -> bool {
        match (self, other) {
            (Answer::Country(a), Answer::Country(b)) => a.same_as(b),
            (Answer::Capital(a), Answer::Capital(b)) => a == b,
            _ => false,
        }
    }

    /// Text shown on the option button.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Answer::Country(country) => &country.name,
            Answer::Capital(capital) => capital,
        }
    }
}

impl From<Country> for Answer {
    fn from(country: Country) -> Self {
        Answer::Country(country)
    }
}

/// Option list; four slots inline.
pub type Options = SmallVec<[Answer; 4]>;

/// Mutable state of one mode instance.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub phase: Phase,
    pub score: Score,
    /// The country the question is about.
    pub current_question: Option<Country>,
    /// Shuffled choices, exactly one matching `correct_answer`.
    pub options: Options,
    pub correct_answer: Option<Answer>,
    /// Guards against scoring the same question twice.
    pub is_answered: bool,
}

impl GameState {
    /// Drop the pending question and zero the score. Phase is untouched.
    pub(crate) fn clear(&mut self) {
        self.score = Score::default();
        self.current_question = None;
        self.options.clear();
        self.correct_answer = None;
        self.is_answered = false;
    }
}

/// Mode-specific fields reported alongside the shared state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModeExtras {
    Classic {
        total_countries: usize,
        used_countries: usize,
    },
    Time {
        time_left: u32,
        time_limit: u32,
        is_active: bool,
        total_countries: usize,
    },
    Survival {
        lives: u32,
        max_lives: u32,
    },
    Region {
        selected_region: Option<Region>,
        total_countries: usize,
        used_countries: usize,
    },
    Capital {
        total_countries: usize,
        used_countries: usize,
    },
    Flags {
        total_countries: usize,
    },
    Learning {
        current_index: usize,
        total_countries: usize,
    },
}

/// Immutable copy of a mode's state delivered to listeners.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub mode: ModeKind,
    #[serde(flatten)]
    pub state: GameState,
    pub extras: ModeExtras,
}

impl GameSnapshot {
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Seconds left, Time mode only.
    #[must_use]
    pub fn time_left(&self) -> Option<u32> {
        match self.extras {
            ModeExtras::Time { time_left, .. } => Some(time_left),
            _ => None,
        }
    }
}

/// End-of-turn / end-of-game summary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    pub mode: ModeKind,
    pub score: Score,
    /// Rounded percent correct; progress through the catalog in Learning.
    pub percentage: u32,
    pub is_finished: bool,
    pub extras: ModeExtras,
}

/// How an answer was judged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Correct,
    Incorrect,
    /// Learning mode does not judge answers.
    Unscored,
}

/// Result of a successful `answer_question`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOutcome {
    pub verdict: Verdict,
    pub correct_answer: Answer,
    pub selected: Answer,
}

impl AnswerOutcome {
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.verdict == Verdict::Correct
    }
}

/// Learning mode traversal progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
    pub percentage: u32,
}
