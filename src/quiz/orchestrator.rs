//! Quiz orchestrator.
//!
//! Owns one `GameMode` per `ModeKind`, all reading the same catalog, and
//! keeps exactly one of them active. Commands from the presentation layer
//! go to the active mode; snapshots from the active mode are relayed to the
//! quiz's subscribers. Snapshots from background modes are dropped.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use log::info;

use crate::catalog::CountryCatalog;
use crate::core::{QuizConfig, QuizError, Region};
use crate::modes::{Answer, AnswerOutcome, GameMode, GameSnapshot, GameStats, ModeKind};
use crate::observer::{ListenerId, ListenerRegistry};

/// What `Quiz::next_question` did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Advance {
    /// A new question is pending.
    Next,
    /// The game is over; final stats attached.
    Finished(GameStats),
    /// No game in progress (not started, waiting for a gate, or idle).
    Waiting,
}

struct Relay {
    active: ModeKind,
    listeners: ListenerRegistry<GameSnapshot>,
}

/// Per-application controller.
pub struct Quiz {
    catalog: Arc<CountryCatalog>,
    modes: Vec<GameMode>,
    active: ModeKind,
    relay: Rc<RefCell<Relay>>,
}

impl Quiz {
    /// Create a quiz with every mode constructed and Classic active.
    pub fn new(catalog: Arc<CountryCatalog>, config: QuizConfig) -> Self {
        let active = ModeKind::Classic;
        let relay = Rc::new(RefCell::new(Relay {
            active,
            listeners: ListenerRegistry::new(),
        }));

        let modes = ModeKind::ALL
            .into_iter()
            .map(|kind| {
                let mut mode = GameMode::new(kind, Arc::clone(&catalog), config.clone());
                let relay = Rc::clone(&relay);
                mode.add_listener(move |snapshot| {
                    let mut relay = relay.borrow_mut();
                    if snapshot.mode == relay.active {
                        relay.listeners.notify(snapshot);
                    }
                });
                mode
            })
            .collect();

        Self {
            catalog,
            modes,
            active,
            relay,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn catalog(&self) -> &CountryCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn active_kind(&self) -> ModeKind {
        self.active
    }

    #[must_use]
    pub fn active(&self) -> &GameMode {
        self.mode(self.active)
    }

    fn active_mut(&mut self) -> &mut GameMode {
        &mut self.modes[self.active.index()]
    }

    #[must_use]
    pub fn mode(&self, kind: ModeKind) -> &GameMode {
        &self.modes[kind.index()]
    }

    #[must_use]
    pub fn game_stats(&self) -> GameStats {
        self.active().game_stats()
    }

    // === Listeners ===

    /// Receive snapshots from whichever mode is active.
    pub fn subscribe(&mut self, listener: impl FnMut(&GameSnapshot) + 'static) -> ListenerId {
        self.relay.borrow_mut().listeners.register(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.relay.borrow_mut().listeners.unregister(id)
    }

    // === Commands ===

    /// Start (or restart) the active mode.
    ///
    /// A `LoadFailure` leaves the mode idle; calling again retries the load.
    pub async fn start_game(&mut self) -> Result<(), QuizError> {
        self.active_mut().start_game().await
    }

    /// Start the clock in a gated mode.
    pub fn begin_game(&mut self) -> Result<(), QuizError> {
        self.active_mut().begin_game()
    }

    /// Stop the current mode's clock, activate `kind` and start it.
    pub async fn switch_to(&mut self, kind: ModeKind) -> Result<(), QuizError> {
        self.active_mut().halt();
        self.active = kind;
        self.relay.borrow_mut().active = kind;
        info!("Switched to {} mode", kind);
        self.start_game().await
    }

    /// Reset the active mode and start it again.
    pub async fn reset_game(&mut self) -> Result<(), QuizError> {
        self.active_mut().reset_game();
        self.start_game().await
    }

    /// Reset every mode, then start the active one again.
    pub async fn reset_all_games(&mut self) -> Result<(), QuizError> {
        for mode in &mut self.modes {
            mode.reset_game();
        }
        self.start_game().await
    }

    /// Region mode only. `region` is a region name such as "South America".
    pub fn select_region(&mut self, region: &str) -> Result<(), QuizError> {
        if self.active != ModeKind::Region {
            return Err(QuizError::Unsupported {
                mode: self.active,
                operation: "select_region",
            });
        }
        let region: Region = region.parse()?;
        self.active_mut().select_region(region)
    }

    pub fn answer_question(&mut self, selected: &Answer) -> Option<AnswerOutcome> {
        self.active_mut().answer_question(selected)
    }

    /// Move on, or report that the game is over.
    pub fn next_question(&mut self) -> Result<Advance, QuizError> {
        let finished = self.active().is_finished();
        if self.active_mut().next_question()? {
            return Ok(Advance::Next);
        }
        if finished || self.active().is_finished() {
            Ok(Advance::Finished(self.game_stats()))
        } else {
            Ok(Advance::Waiting)
        }
    }

    /// Apply one countdown second to the active mode.
    pub fn tick(&mut self) -> bool {
        self.active_mut().tick()
    }

    /// Wait for the active mode's next countdown second and apply it.
    pub async fn next_tick(&mut self) -> bool {
        self.active_mut().next_tick().await
    }
}

impl std::fmt::Debug for Quiz {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Quiz")
            .field("catalog", &self.catalog)
            .field("active", &self.active)
            .field("modes", &self.modes)
            .finish_non_exhaustive()
    }
}
