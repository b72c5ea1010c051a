//! Capital mode integration tests.

use std::sync::Arc;

use rustc_hash::FxHashSet;

use flag_quiz::{Answer, Country, CountryCatalog, GameMode, ModeKind, Phase, QuizConfig};

fn catalog() -> Arc<CountryCatalog> {
    Arc::new(CountryCatalog::from_countries(vec![
        Country::new("France").with_capital("Paris"),
        Country::new("Japan").with_capital("Tokyo"),
        Country::new("Kenya").with_capital("Nairobi"),
        Country::new("Chile").with_capital("Santiago"),
        Country::new("Nauru"),
        Country::new("Bolivia").with_capital(""),
    ]))
}

fn capital_mode() -> GameMode {
    GameMode::new(ModeKind::Capital, catalog(), QuizConfig::default().with_seed(29))
}

/// Only countries with a capital are asked; the game ends after all four.
#[tokio::test]
async fn test_capital_full_game() {
    let mut mode = capital_mode();
    mode.start_game().await.unwrap();

    let mut asked = FxHashSet::default();
    loop {
        let country = mode.state().current_question.clone().unwrap();
        assert!(country.capital().is_some(), "{} has no capital", country.name);
        asked.insert(country.name.clone());

        let answer = mode.state().correct_answer.clone().unwrap();
        assert_eq!(answer, Answer::Capital(country.capital().unwrap().to_string()));
        mode.answer_question(&answer);

        if !mode.next_question().unwrap() {
            break;
        }
    }

    assert_eq!(asked.len(), 4);
    assert_eq!(mode.phase(), Phase::Idle);
    assert_eq!(mode.score().correct, 4);
}

/// Options are distinct capitals, the correct one exactly once.
#[tokio::test]
async fn test_capital_options_distinct() {
    let mut mode = capital_mode();
    mode.start_game().await.unwrap();

    let labels: Vec<&str> = mode.options().iter().map(Answer::label).collect();
    let unique: FxHashSet<&str> = labels.iter().copied().collect();
    assert_eq!(labels.len(), 4);
    assert_eq!(unique.len(), 4);
    assert!(!unique.contains(""));

    let correct = mode.state().correct_answer.clone().unwrap();
    assert_eq!(mode.options().iter().filter(|o| o.matches(&correct)).count(), 1);
}

/// A country answer never matches a capital question.
#[tokio::test]
async fn test_capital_rejects_country_answer() {
    let mut mode = capital_mode();
    mode.start_game().await.unwrap();

    let country = mode.state().current_question.clone().unwrap();
    let outcome = mode.answer_question(&Answer::Country(country)).unwrap();
    assert!(!outcome.is_correct());
    assert_eq!(mode.score().incorrect, 1);
}
