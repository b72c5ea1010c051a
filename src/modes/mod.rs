//! Game modes.
//!
//! One engine (`GameMode`) drives all seven variants; `ModeKind` picks the
//! rule set. Modes read the shared `CountryCatalog` and never modify it.
//!
//! | Mode     | Starts in        | Over when                     | Wrong answer     |
//! |----------|------------------|-------------------------------|------------------|
//! | Classic  | Question         | every country asked           | -                |
//! | Time     | Ready            | clock reaches 0               | clock -2s        |
//! | Survival | Question         | no lives left                 | one life lost    |
//! | Region   | RegionSelection  | every country of region asked | -                |
//! | Capital  | Question         | every capital asked           | -                |
//! | Flags    | Question         | never                         | -                |
//! | Learning | Question         | never (wraps around)          | not judged       |

pub mod kind;
mod mode;
mod rules;
pub mod state;
pub mod timer;
pub mod used;

pub use kind::ModeKind;
pub use mode::GameMode;
pub use state::{
    Answer, AnswerOutcome, GameSnapshot, GameState, GameStats, ModeExtras, Options, Phase, Progress, Score,
    Verdict,
};
pub use timer::Countdown;
pub use used::UsedSet;
