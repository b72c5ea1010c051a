//! Per-mode rules.
//!
//! The engine in `mode.rs` is shared by all seven modes. Everything that
//! differs between them lives here:
//! - which countries a question may be about (the pool)
//! - what a wrong answer costs
//! - when the game is over
//! - the phase a fresh game starts in
//! - the extra fields reported in snapshots and stats

use crate::catalog::CountryCatalog;
use crate::core::{Country, QuizConfig, QuizError, Region};

use super::kind::ModeKind;
use super::state::{ModeExtras, Phase};
use super::timer::Countdown;
use super::used::UsedSet;

/// Rules plus the mode-specific state they act on.
#[derive(Debug)]
pub(crate) enum ModeRules {
    Classic,
    Time(Countdown),
    Survival { lives: u32, max_lives: u32 },
    Region { selected: Option<Region> },
    Capital,
    Flags,
    /// Catalog indices in visiting order, and the next position to visit.
    Learning { order: Vec<usize>, index: usize },
}

impl ModeRules {
    pub(crate) fn for_kind(kind: ModeKind, config: &QuizConfig) -> Self {
        match kind {
            ModeKind::Classic => ModeRules::Classic,
            ModeKind::Time => ModeRules::Time(Countdown::new(config.time_limit_secs, config.tick_period)),
            ModeKind::Survival => ModeRules::Survival {
                lives: config.max_lives,
                max_lives: config.max_lives,
            },
            ModeKind::Region => ModeRules::Region { selected: None },
            ModeKind::Capital => ModeRules::Capital,
            ModeKind::Flags => ModeRules::Flags,
            ModeKind::Learning => ModeRules::Learning {
                order: Vec::new(),
                index: 0,
            },
        }
    }

    /// Back to the state of a freshly constructed mode.
    pub(crate) fn reset(&mut self) {
        match self {
            ModeRules::Time(countdown) => countdown.reset(),
            ModeRules::Survival { lives, max_lives } => *lives = *max_lives,
            ModeRules::Region { selected } => *selected = None,
            ModeRules::Learning { order, index } => {
                order.clear();
                *index = 0;
            }
            ModeRules::Classic | ModeRules::Capital | ModeRules::Flags => {}
        }
    }

    /// Phase a started game waits in before its first question, if any.
    pub(crate) fn gate(&self) -> Option<Phase> {
        match self {
            ModeRules::Time(_) => Some(Phase::Ready),
            ModeRules::Region { .. } => Some(Phase::RegionSelection),
            _ => None,
        }
    }

    /// Countries a question may be about.
    pub(crate) fn pool<'c>(&self, catalog: &'c CountryCatalog) -> Result<Vec<&'c Country>, QuizError> {
        match self {
            ModeRules::Region { selected: Some(region) } => Ok(catalog.in_region(*region)),
            ModeRules::Region { selected: None } => Err(QuizError::NoRegionSelected),
            ModeRules::Capital => Ok(catalog.with_capitals()),
            _ => Ok(catalog.all()?.iter().collect()),
        }
    }

    /// Size of the pool, 0 when it cannot be computed yet.
    pub(crate) fn pool_size(&self, catalog: &CountryCatalog) -> usize {
        self.pool(catalog).map_or(0, |pool| pool.len())
    }

    /// Apply the mode's cost of a wrong answer.
    pub(crate) fn on_wrong(&mut self, config: &QuizConfig) {
        match self {
            ModeRules::Time(countdown) => {
                countdown.penalize(config.time_penalty_secs);
            }
            ModeRules::Survival { lives, .. } => *lives = lives.saturating_sub(1),
            _ => {}
        }
    }

    /// Learning mode never judges answers.
    pub(crate) fn is_scored(&self) -> bool {
        !matches!(self, ModeRules::Learning { .. })
    }

    /// Answers are only accepted while this holds.
    pub(crate) fn accepts_answers(&self) -> bool {
        match self {
            ModeRules::Time(countdown) => countdown.is_armed(),
            _ => true,
        }
    }

    pub(crate) fn is_finished(&self, used: &UsedSet, catalog: &CountryCatalog) -> bool {
        match self {
            ModeRules::Classic | ModeRules::Capital | ModeRules::Region { .. } => {
                let pool = self.pool_size(catalog);
                pool > 0 && used.len() >= pool
            }
            ModeRules::Time(countdown) => countdown.remaining() == 0,
            ModeRules::Survival { lives, .. } => *lives == 0,
            ModeRules::Flags | ModeRules::Learning { .. } => false,
        }
    }

    pub(crate) fn countdown(&self) -> Option<&Countdown> {
        match self {
            ModeRules::Time(countdown) => Some(countdown),
            _ => None,
        }
    }

    pub(crate) fn countdown_mut(&mut self) -> Option<&mut Countdown> {
        match self {
            ModeRules::Time(countdown) => Some(countdown),
            _ => None,
        }
    }

    pub(crate) fn extras(&self, used: &UsedSet, catalog: &CountryCatalog) -> ModeExtras {
        match self {
            ModeRules::Classic => ModeExtras::Classic {
                total_countries: catalog.size(),
                used_countries: used.len(),
            },
            ModeRules::Time(countdown) => ModeExtras::Time {
                time_left: countdown.remaining(),
                time_limit: countdown.limit(),
                is_active: countdown.is_armed(),
                total_countries: catalog.size(),
            },
            ModeRules::Survival { lives, max_lives } => ModeExtras::Survival {
                lives: *lives,
                max_lives: *max_lives,
            },
            ModeRules::Region { selected } => ModeExtras::Region {
                selected_region: *selected,
                total_countries: self.pool_size(catalog),
                used_countries: used.len(),
            },
            ModeRules::Capital => ModeExtras::Capital {
                total_countries: self.pool_size(catalog),
                used_countries: used.len(),
            },
            ModeRules::Flags => ModeExtras::Flags {
                total_countries: catalog.size(),
            },
            ModeRules::Learning { order, index } => ModeExtras::Learning {
                current_index: *index,
                total_countries: order.len(),
            },
        }
    }
}
