//! Property tests over random seeds and answer sequences.

use std::sync::Arc;

use proptest::prelude::*;
use rustc_hash::FxHashSet;

use flag_quiz::{Answer, CountryCatalog, GameMode, ModeKind, Phase, QuizConfig};

fn started(kind: ModeKind, config: QuizConfig) -> GameMode {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap();
    let mut mode = GameMode::new(kind, Arc::new(CountryCatalog::offline()), config);
    runtime.block_on(mode.start_game()).unwrap();
    mode
}

/// The correct option, or the first wrong one.
fn pick(mode: &GameMode, correct: bool) -> Answer {
    let answer = mode.state().correct_answer.clone().unwrap();
    if correct {
        answer
    } else {
        mode.options().iter().find(|o| !o.matches(&answer)).cloned().unwrap()
    }
}

fn quiz_kind() -> impl Strategy<Value = ModeKind> {
    prop_oneof![
        Just(ModeKind::Classic),
        Just(ModeKind::Survival),
        Just(ModeKind::Capital),
        Just(ModeKind::Flags),
    ]
}

proptest! {
    #[test]
    fn prop_options_hold_correct_once(seed in any::<u64>(), kind in quiz_kind(), rounds in 1..15usize) {
        let mut mode = started(kind, QuizConfig::default().with_seed(seed));

        for _ in 0..rounds {
            let correct = mode.state().correct_answer.clone().unwrap();
            let labels: FxHashSet<&str> = mode.options().iter().map(Answer::label).collect();

            prop_assert_eq!(mode.options().len(), 4);
            prop_assert_eq!(labels.len(), 4);
            prop_assert_eq!(mode.options().iter().filter(|o| o.matches(&correct)).count(), 1);

            let answer = pick(&mode, true);
            mode.answer_question(&answer);
            if !mode.next_question().unwrap() {
                break;
            }
        }
    }

    #[test]
    fn prop_score_totals_add_up(seed in any::<u64>(), answers in prop::collection::vec(any::<bool>(), 1..40)) {
        let mut mode = started(ModeKind::Flags, QuizConfig::default().with_seed(seed));

        for &correct in &answers {
            let answer = pick(&mode, correct);
            let outcome = mode.answer_question(&answer).unwrap();
            prop_assert_eq!(outcome.is_correct(), correct);
            prop_assert!(mode.next_question().unwrap());
        }

        let score = mode.score();
        let right = answers.iter().filter(|&&c| c).count() as u32;
        prop_assert_eq!(score.total, score.correct + score.incorrect);
        prop_assert_eq!(score.total, answers.len() as u32);
        prop_assert_eq!(score.correct, right);
    }

    #[test]
    fn prop_second_answer_ignored(seed in any::<u64>(), first in any::<bool>(), second in any::<bool>()) {
        let mut mode = started(ModeKind::Classic, QuizConfig::default().with_seed(seed));

        let answer = pick(&mode, first);
        prop_assert!(mode.answer_question(&answer).is_some());
        let score = mode.score();

        let again = pick(&mode, second);
        prop_assert!(mode.answer_question(&again).is_none());
        prop_assert_eq!(mode.score(), score);
        prop_assert_eq!(mode.phase(), Phase::Result);
    }

    #[test]
    fn prop_survival_lives(seed in any::<u64>(), lives in 1..6u32, answers in prop::collection::vec(any::<bool>(), 1..30)) {
        let config = QuizConfig::default().with_seed(seed).with_max_lives(lives);
        let mut mode = started(ModeKind::Survival, config);

        let mut wrong = 0;
        for &correct in &answers {
            let answer = pick(&mode, correct);
            mode.answer_question(&answer);
            if !correct {
                wrong += 1;
            }
            prop_assert_eq!(mode.lives(), Some(lives.saturating_sub(wrong)));
            prop_assert_eq!(mode.is_finished(), wrong >= lives);
            if !mode.next_question().unwrap() {
                break;
            }
        }
    }

    #[test]
    fn prop_time_penalty_floors_at_zero(seed in any::<u64>(), limit in 1..20u32, wrongs in 1..15u32) {
        let config = QuizConfig::default().with_seed(seed).with_time_limit(limit);
        let mut mode = started(ModeKind::Time, config);
        mode.begin_game().unwrap();

        for n in 1..=wrongs {
            let answer = pick(&mode, false);
            mode.answer_question(&answer);
            let left = limit.saturating_sub(2 * n);
            prop_assert_eq!(mode.time_left(), Some(left));
            if left == 0 {
                prop_assert_eq!(mode.phase(), Phase::Idle);
                prop_assert!(!mode.is_timer_active());
                break;
            }
            prop_assert!(mode.next_question().unwrap());
        }
    }

    #[test]
    fn prop_reset_then_start_is_fresh(seed in any::<u64>(), kind in quiz_kind(), rounds in 0..10usize) {
        let mut mode = started(kind, QuizConfig::default().with_seed(seed));
        for _ in 0..rounds {
            let answer = pick(&mode, false);
            mode.answer_question(&answer);
            if !mode.next_question().unwrap() {
                break;
            }
        }

        mode.reset_game();
        prop_assert_eq!(mode.phase(), Phase::Loading);

        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        runtime.block_on(mode.start_game()).unwrap();
        prop_assert_eq!(mode.phase(), Phase::Question);
        prop_assert_eq!(mode.score().total, 0);
        prop_assert_eq!(mode.used_count(), 1);
        prop_assert_eq!(mode.lives(), if kind == ModeKind::Survival { Some(3) } else { None });
    }
}
