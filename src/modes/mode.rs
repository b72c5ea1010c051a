//! The mode controller shared by all seven quiz variants.
//!
//! `GameMode` owns a `GameState`, a used-set, an RNG and a listener registry,
//! and delegates every mode-specific decision to `ModeRules`.
//!
//! ## State machine
//!
//! ```text
//! Idle ──start_game──▶ Loading ──┬──▶ Question ◀──next_question── Result
//!                                ├──▶ Ready ──begin_game──▶ Question      (Time)
//!                                └──▶ RegionSelection ──select_region──▶ Question (Region)
//! Question ──answer_question──▶ Result
//! any ──reset_game──▶ Loading
//! finished / failed ──▶ Idle
//! ```
//!
//! Every phase change, and every countdown tick, notifies listeners with a
//! fresh `GameSnapshot` before the call returns.

use std::sync::Arc;

use log::{debug, info, trace, warn};
use rustc_hash::FxHashSet;

use crate::catalog::CountryCatalog;
use crate::core::{Country, GameRng, QuizConfig, QuizError, Region};
use crate::observer::{ListenerId, ListenerRegistry};

use super::kind::ModeKind;
use super::rules::ModeRules;
use super::state::{
    rounded_percent, Answer, AnswerOutcome, GameSnapshot, GameState, GameStats, Options, Phase, Progress,
    Score, Verdict,
};
use super::used::UsedSet;

/// A freshly generated question.
struct Question {
    country: Country,
    correct: Answer,
    options: Options,
}

/// One mode instance.
pub struct GameMode {
    kind: ModeKind,
    catalog: Arc<CountryCatalog>,
    config: QuizConfig,
    rng: GameRng,
    state: GameState,
    used: UsedSet,
    rules: ModeRules,
    listeners: ListenerRegistry<GameSnapshot>,
}

impl GameMode {
    /// Create a mode. Seeds from `config.seed` (per-mode stream) or entropy.
    pub fn new(kind: ModeKind, catalog: Arc<CountryCatalog>, config: QuizConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => GameRng::new(seed).for_context(kind.name()),
            None => GameRng::from_entropy(),
        };
        Self::with_rng(kind, catalog, config, rng)
    }

    /// Create a mode with an explicit RNG.
    pub fn with_rng(kind: ModeKind, catalog: Arc<CountryCatalog>, config: QuizConfig, rng: GameRng) -> Self {
        let rules = ModeRules::for_kind(kind, &config);
        Self {
            kind,
            catalog,
            config,
            rng,
            state: GameState::default(),
            used: UsedSet::new(),
            rules,
            listeners: ListenerRegistry::new(),
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn kind(&self) -> ModeKind {
        self.kind
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn score(&self) -> Score {
        self.state.score
    }

    #[must_use]
    pub fn options(&self) -> &[Answer] {
        &self.state.options
    }

    #[must_use]
    pub fn catalog(&self) -> &CountryCatalog {
        &self.catalog
    }

    /// Countries asked since the used-set was last cleared.
    #[must_use]
    pub fn used_count(&self) -> usize {
        self.used.len()
    }

    /// Regions offered by Region mode.
    #[must_use]
    pub fn available_regions(&self) -> &'static [Region] {
        &Region::ALL
    }

    /// Region chosen for this game, Region mode only.
    #[must_use]
    pub fn selected_region(&self) -> Option<Region> {
        match self.rules {
            ModeRules::Region { selected } => selected,
            _ => None,
        }
    }

    /// Lives left, Survival mode only.
    #[must_use]
    pub fn lives(&self) -> Option<u32> {
        match self.rules {
            ModeRules::Survival { lives, .. } => Some(lives),
            _ => None,
        }
    }

    /// Seconds left, Time mode only.
    #[must_use]
    pub fn time_left(&self) -> Option<u32> {
        self.rules.countdown().map(|c| c.remaining())
    }

    /// Countdown running, Time mode only.
    #[must_use]
    pub fn is_timer_active(&self) -> bool {
        self.rules.countdown().is_some_and(|c| c.is_armed())
    }

    /// Traversal progress, Learning mode only.
    #[must_use]
    pub fn progress(&self) -> Option<Progress> {
        match &self.rules {
            ModeRules::Learning { order, index } => Some(Progress {
                current: *index,
                total: order.len(),
                percentage: rounded_percent(*index, order.len()),
            }),
            _ => None,
        }
    }

    /// Copy of the current state for presentation.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            mode: self.kind,
            state: self.state.clone(),
            extras: self.rules.extras(&self.used, &self.catalog),
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.rules.is_finished(&self.used, &self.catalog)
    }

    #[must_use]
    pub fn game_stats(&self) -> GameStats {
        let percentage = match self.progress() {
            Some(progress) => progress.percentage,
            None => self.state.score.percentage(),
        };
        GameStats {
            mode: self.kind,
            score: self.state.score,
            percentage,
            is_finished: self.is_finished(),
            extras: self.rules.extras(&self.used, &self.catalog),
        }
    }

    // === Listeners ===

    /// Subscribe to snapshots. Called in registration order.
    pub fn add_listener(&mut self, listener: impl FnMut(&GameSnapshot) + 'static) -> ListenerId {
        self.listeners.register(listener)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.unregister(id)
    }

    fn notify(&mut self) {
        let snapshot = self.snapshot();
        self.listeners.notify(&snapshot);
    }

    fn set_phase(&mut self, phase: Phase) {
        self.state.phase = phase;
        self.notify();
    }

    // === Commands ===

    /// Load the catalog if needed, clear the previous session and move to
    /// the mode's first phase.
    ///
    /// On failure the mode is left in `Idle`.
    pub async fn start_game(&mut self) -> Result<(), QuizError> {
        self.stop_timer();
        self.set_phase(Phase::Loading);

        let catalog = Arc::clone(&self.catalog);
        if let Err(e) = catalog.load().await {
            warn!("Cannot start {} game: {}", self.kind, e);
            self.set_phase(Phase::Idle);
            return Err(e);
        }

        self.clear_session();
        info!("Starting {} game with {} countries", self.kind, self.catalog.size());

        if let ModeRules::Learning { order, index } = &mut self.rules {
            *order = (0..catalog.size()).collect();
            self.rng.shuffle(order.as_mut_slice());
            *index = 0;
        }

        match self.rules.gate() {
            Some(phase) => {
                self.set_phase(phase);
                Ok(())
            }
            None => self.generate_question(),
        }
    }

    /// Start the clock and ask the first question. Time mode, `Ready` phase only.
    pub fn begin_game(&mut self) -> Result<(), QuizError> {
        if self.state.phase != Phase::Ready {
            return Err(self.unsupported("begin_game"));
        }
        let Some(countdown) = self.rules.countdown_mut() else {
            return Err(self.unsupported("begin_game"));
        };
        countdown.arm();
        info!("Clock started: {}s", countdown.remaining());

        if let Err(e) = self.generate_question() {
            self.stop_timer();
            return Err(e);
        }
        Ok(())
    }

    /// Fix the region and ask the first question. Region mode,
    /// `RegionSelection` phase only.
    ///
    /// A region without countries fails and leaves the mode in `Idle`.
    pub fn select_region(&mut self, region: Region) -> Result<(), QuizError> {
        if self.state.phase != Phase::RegionSelection {
            return Err(self.unsupported("select_region"));
        }
        let ModeRules::Region { selected } = &mut self.rules else {
            return Err(self.unsupported("select_region"));
        };
        *selected = Some(region);
        debug!("Region selected: {}", region);

        self.generate_question()
    }

    /// Hard reset: stop the clock, clear score, question and used-set, and
    /// wait in `Loading` for the next `start_game`.
    pub fn reset_game(&mut self) {
        self.stop_timer();
        self.clear_session();
        debug!("{} game reset", self.kind);
        self.set_phase(Phase::Loading);
    }

    /// Judge `selected` against the pending question.
    ///
    /// Returns `None` without touching the score when no question is pending,
    /// it was already answered, or the Time mode clock is not running.
    /// Learning mode never judges, so every answer to the shown card
    /// succeeds with `Verdict::Unscored`, repeats included.
    pub fn answer_question(&mut self, selected: &Answer) -> Option<AnswerOutcome> {
        let scored = self.rules.is_scored();
        let pending = if scored {
            self.state.phase == Phase::Question && !self.state.is_answered
        } else {
            matches!(self.state.phase, Phase::Question | Phase::Result)
        };
        if !pending || !self.rules.accepts_answers() {
            return None;
        }
        let correct = self.state.correct_answer.clone()?;
        self.state.is_answered = true;

        let verdict = if !scored {
            Verdict::Unscored
        } else if correct.matches(selected) {
            self.state.score.record(true);
            Verdict::Correct
        } else {
            self.state.score.record(false);
            self.rules.on_wrong(&self.config);
            Verdict::Incorrect
        };
        debug!("{} answer {:?}: {}", self.kind, verdict, selected.label());

        self.set_phase(Phase::Result);

        if self.time_left() == Some(0) {
            self.end_game();
        }

        Some(AnswerOutcome {
            verdict,
            correct_answer: correct,
            selected: selected.clone(),
        })
    }

    /// Advance to the next question.
    ///
    /// Returns `Ok(false)` and moves to `Idle` when the game is over, and
    /// `Ok(false)` with no effect when there is no game in progress.
    pub fn next_question(&mut self) -> Result<bool, QuizError> {
        if !matches!(self.state.phase, Phase::Question | Phase::Result) {
            return Ok(false);
        }
        if self.rules.countdown().is_some_and(|c| !c.is_armed()) {
            return Ok(false);
        }
        if self.is_finished() {
            self.end_game();
            return Ok(false);
        }
        self.generate_question()?;
        Ok(true)
    }

    /// One countdown second. Returns false when no clock is running.
    pub fn tick(&mut self) -> bool {
        let Some(left) = self.rules.countdown_mut().and_then(|c| c.tick()) else {
            return false;
        };
        trace!("{}s left", left);
        self.notify();
        if left == 0 {
            self.end_game();
        }
        true
    }

    /// Wait for the next countdown second and apply it.
    ///
    /// Never resolves unless this is a Time mode with a running clock, so it
    /// can sit in a `select!` next to input handling.
    pub async fn next_tick(&mut self) -> bool {
        match self.rules.countdown_mut() {
            Some(countdown) => countdown.wait().await,
            None => std::future::pending::<()>().await,
        }
        self.tick()
    }

    /// Stop a running game so the mode can go to the background.
    pub fn halt(&mut self) {
        if self.is_timer_active() {
            self.end_game();
        }
    }

    // === Internals ===

    fn unsupported(&self, operation: &'static str) -> QuizError {
        QuizError::Unsupported {
            mode: self.kind,
            operation,
        }
    }

    fn stop_timer(&mut self) {
        if let Some(countdown) = self.rules.countdown_mut() {
            countdown.disarm();
        }
    }

    fn end_game(&mut self) {
        self.stop_timer();
        info!(
            "{} game over: {}/{} correct",
            self.kind, self.state.score.correct, self.state.score.total
        );
        self.set_phase(Phase::Idle);
    }

    fn clear_session(&mut self) {
        self.state.clear();
        self.used.clear();
        self.rules.reset();
    }

    /// Build and install a question, moving to `Question`.
    ///
    /// On failure the clock stops, any region selection is dropped, the mode
    /// moves to `Idle` and the error is returned.
    fn generate_question(&mut self) -> Result<(), QuizError> {
        match self.build_question() {
            Ok(question) => {
                debug!("{} question: {}", self.kind, question.country.name);
                self.state.current_question = Some(question.country);
                self.state.correct_answer = Some(question.correct);
                self.state.options = question.options;
                self.state.is_answered = false;
                self.set_phase(Phase::Question);
                Ok(())
            }
            Err(e) => {
                warn!("Failed to generate {} question: {}", self.kind, e);
                self.stop_timer();
                // A region that yields no question is not kept as the selection.
                if let ModeRules::Region { selected } = &mut self.rules {
                    *selected = None;
                }
                self.set_phase(Phase::Idle);
                Err(e)
            }
        }
    }

    fn build_question(&mut self) -> Result<Question, QuizError> {
        let catalog = Arc::clone(&self.catalog);
        let distractors = self.config.distractor_count();

        if let ModeRules::Learning { order, index } = &mut self.rules {
            if order.is_empty() {
                return Err(QuizError::EmptyPool {
                    mode: ModeKind::Learning,
                    region: None,
                });
            }
            if *index >= order.len() {
                *index = 0;
            }
            let country = catalog.all()?[order[*index]].clone();
            *index += 1;
            return Ok(Question {
                correct: Answer::Country(country.clone()),
                country,
                options: Options::new(),
            });
        }

        let pool = self.rules.pool(&catalog)?;
        let Some(pick) = self.used.draw(&mut self.rng, &pool, self.config.max_draw_attempts) else {
            return Err(self.empty_pool());
        };

        let (correct, mut options) = match self.rules {
            ModeRules::Capital => {
                let capital = pick.capital().ok_or_else(|| self.empty_pool())?.to_string();
                let options: Options = self
                    .distinct_capitals(&catalog, &capital)?
                    .into_iter()
                    .map(Answer::Capital)
                    .collect();
                (Answer::Capital(capital), options)
            }
            ModeRules::Region { .. } => {
                let others: Vec<&Country> = pool.iter().copied().filter(|c| !c.same_as(pick)).collect();
                let options: Options = self
                    .rng
                    .sample(others, distractors)
                    .into_iter()
                    .map(|c| Answer::Country(c.clone()))
                    .collect();
                (Answer::Country(pick.clone()), options)
            }
            _ => {
                let options: Options = catalog
                    .sample_excluding(&mut self.rng, distractors, &pick.name)?
                    .into_iter()
                    .map(|c| Answer::Country(c.clone()))
                    .collect();
                (Answer::Country(pick.clone()), options)
            }
        };

        options.push(correct.clone());
        self.rng.shuffle(options.as_mut_slice());

        Ok(Question {
            country: pick.clone(),
            correct,
            options,
        })
    }

    /// Up to `distractor_count` distinct capitals other than `exclude`.
    fn distinct_capitals(&mut self, catalog: &CountryCatalog, exclude: &str) -> Result<Vec<String>, QuizError> {
        let mut seen = FxHashSet::default();
        let capitals: Vec<String> = catalog
            .all()?
            .iter()
            .filter_map(Country::capital)
            .filter(|capital| *capital != exclude && seen.insert(*capital))
            .map(str::to_string)
            .collect();
        Ok(self.rng.sample(capitals, self.config.distractor_count()))
    }

    fn empty_pool(&self) -> QuizError {
        QuizError::EmptyPool {
            mode: self.kind,
            region: self.selected_region(),
        }
    }
}

impl std::fmt::Debug for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameMode")
            .field("kind", &self.kind)
            .field("state", &self.state)
            .field("used", &self.used.len())
            .field("rules", &self.rules)
            .field("listeners", &self.listeners)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn mode(kind: ModeKind) -> GameMode {
        let catalog = Arc::new(CountryCatalog::offline());
        GameMode::new(kind, catalog, QuizConfig::default().with_seed(11))
    }

    fn correct(mode: &GameMode) -> Answer {
        mode.state().correct_answer.clone().unwrap()
    }

    #[tokio::test]
    async fn test_start_generates_question() {
        let mut classic = mode(ModeKind::Classic);
        classic.start_game().await.unwrap();

        assert_eq!(classic.phase(), Phase::Question);
        assert_eq!(classic.options().len(), 4);
        assert_eq!(classic.used_count(), 1);
    }

    #[tokio::test]
    async fn test_listener_sees_phase_sequence() {
        let phases = Rc::new(RefCell::new(Vec::new()));
        let mut classic = mode(ModeKind::Classic);
        let seen = Rc::clone(&phases);
        classic.add_listener(move |snap| seen.borrow_mut().push(snap.phase()));

        classic.start_game().await.unwrap();
        let answer = correct(&classic);
        classic.answer_question(&answer);
        classic.next_question().unwrap();

        assert_eq!(
            *phases.borrow(),
            vec![Phase::Loading, Phase::Question, Phase::Result, Phase::Question]
        );
    }

    #[tokio::test]
    async fn test_answer_without_question() {
        let mut classic = mode(ModeKind::Classic);
        let answer = Answer::Country(Country::new("France"));
        assert!(classic.answer_question(&answer).is_none());
        assert_eq!(classic.score().total, 0);
    }

    #[tokio::test]
    async fn test_begin_game_outside_ready() {
        let mut classic = mode(ModeKind::Classic);
        classic.start_game().await.unwrap();

        assert!(matches!(
            classic.begin_game(),
            Err(QuizError::Unsupported { operation: "begin_game", .. })
        ));
    }

    #[tokio::test]
    async fn test_select_region_wrong_mode() {
        let mut survival = mode(ModeKind::Survival);
        survival.start_game().await.unwrap();

        assert!(matches!(
            survival.select_region(Region::Europe),
            Err(QuizError::Unsupported { operation: "select_region", .. })
        ));
    }

    #[tokio::test]
    async fn test_capital_options_are_capitals() {
        let mut capital = mode(ModeKind::Capital);
        capital.start_game().await.unwrap();

        assert!(capital.options().iter().all(|o| matches!(o, Answer::Capital(_))));
        let country = capital.state().current_question.clone().unwrap();
        assert_eq!(
            correct(&capital),
            Answer::Capital(country.capital().unwrap().to_string())
        );
    }

    #[test]
    fn test_next_question_idle_is_noop() {
        let mut flags = mode(ModeKind::Flags);
        assert!(!flags.next_question().unwrap());
        assert_eq!(flags.phase(), Phase::Idle);
    }

    #[test]
    fn test_accessors_per_mode() {
        assert_eq!(mode(ModeKind::Survival).lives(), Some(3));
        assert_eq!(mode(ModeKind::Time).time_left(), Some(30));
        assert_eq!(mode(ModeKind::Classic).lives(), None);
        assert_eq!(mode(ModeKind::Region).available_regions().len(), 6);
        assert!(mode(ModeKind::Learning).progress().is_some());
    }
}
