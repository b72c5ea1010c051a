//! Quiz configuration types.
//!
//! - `QuizConfig`: per-mode rules (time limit, lives, option count, ...)
//! - `LoadPolicy`: how the catalog behaves when every source fails
//!
//! Both are plain data with builder methods and serde support, so hosts can
//! keep them in a settings file.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Rules shared by all mode instances of a quiz.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    /// Seconds on the clock at the start of a Time game.
    pub time_limit_secs: u32,

    /// Seconds removed from the clock for a wrong answer in Time mode.
    pub time_penalty_secs: u32,

    /// Lives at the start of a Survival game.
    pub max_lives: u32,

    /// Choices offered per question (correct answer included).
    pub option_count: usize,

    /// Draws attempted before the used-set is cleared.
    pub max_draw_attempts: u32,

    /// Countdown tick period.
    #[serde(with = "millis")]
    pub tick_period: Duration,

    /// Seed for question drawing. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            time_limit_secs: 30,
            time_penalty_secs: 2,
            max_lives: 3,
            option_count: 4,
            max_draw_attempts: 100,
            tick_period: Duration::from_secs(1),
            seed: None,
        }
    }
}

impl QuizConfig {
    /// Create a config with default rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the Time mode limit in seconds.
    #[must_use]
    pub fn with_time_limit(mut self, secs: u32) -> Self {
        self.time_limit_secs = secs;
        self
    }

    /// Set the wrong-answer penalty in seconds.
    #[must_use]
    pub fn with_time_penalty(mut self, secs: u32) -> Self {
        self.time_penalty_secs = secs;
        self
    }

    /// Set Survival mode lives.
    #[must_use]
    pub fn with_max_lives(mut self, lives: u32) -> Self {
        assert!(lives > 0, "Survival needs at least 1 life");
        self.max_lives = lives;
        self
    }

    /// Set the number of options per question.
    #[must_use]
    pub fn with_option_count(mut self, count: usize) -> Self {
        assert!(count >= 2, "A question needs at least 2 options");
        self.option_count = count;
        self
    }

    /// Set the resampling bound for avoid-repeat draws.
    #[must_use]
    pub fn with_max_draw_attempts(mut self, attempts: u32) -> Self {
        assert!(attempts > 0, "At least one draw attempt is required");
        self.max_draw_attempts = attempts;
        self
    }

    /// Set the countdown tick period.
    #[must_use]
    pub fn with_tick_period(mut self, period: Duration) -> Self {
        assert!(!period.is_zero(), "Tick period must be non-zero");
        self.tick_period = period;
        self
    }

    /// Set a fixed seed for reproducible games.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of distractors per question.
    #[must_use]
    pub fn distractor_count(&self) -> usize {
        self.option_count.saturating_sub(1)
    }
}

/// What the catalog does once every configured source has failed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Substitute the built-in offline dataset.
    #[default]
    Builtin,
    /// Report `LoadFailure`.
    Fail,
}

/// Catalog load behaviour.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadPolicy {
    pub fallback: FallbackPolicy,

    /// Age after which cached countries are ignored.
    #[serde(with = "millis")]
    pub cache_ttl: Duration,
}

impl Default for LoadPolicy {
    fn default() -> Self {
        Self {
            fallback: FallbackPolicy::Builtin,
            cache_ttl: Duration::from_secs(24 * 60 * 60),
        }
    }
}

impl LoadPolicy {
    /// Fail instead of falling back to the built-in dataset.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            fallback: FallbackPolicy::Fail,
            ..Self::default()
        }
    }

    /// Set the cache time to live.
    #[must_use]
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = QuizConfig::default();
        assert_eq!(config.time_limit_secs, 30);
        assert_eq!(config.time_penalty_secs, 2);
        assert_eq!(config.max_lives, 3);
        assert_eq!(config.option_count, 4);
        assert_eq!(config.distractor_count(), 3);
        assert_eq!(config.max_draw_attempts, 100);
        assert_eq!(config.tick_period, Duration::from_secs(1));
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_builder() {
        let config = QuizConfig::new()
            .with_time_limit(60)
            .with_time_penalty(5)
            .with_max_lives(5)
            .with_option_count(6)
            .with_seed(9);

        assert_eq!(config.time_limit_secs, 60);
        assert_eq!(config.time_penalty_secs, 5);
        assert_eq!(config.max_lives, 5);
        assert_eq!(config.distractor_count(), 5);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    #[should_panic(expected = "Survival needs at least 1 life")]
    fn test_zero_lives() {
        let _ = QuizConfig::new().with_max_lives(0);
    }

    #[test]
    fn test_config_serde_partial() {
        let config: QuizConfig = serde_json::from_str(r#"{"time_limit_secs": 45, "tick_period": 500}"#).unwrap();
        assert_eq!(config.time_limit_secs, 45);
        assert_eq!(config.tick_period, Duration::from_millis(500));
        assert_eq!(config.max_lives, 3);
    }

    #[test]
    fn test_load_policy() {
        assert_eq!(LoadPolicy::default().fallback, FallbackPolicy::Builtin);
        let strict = LoadPolicy::strict().with_cache_ttl(Duration::from_secs(60));
        assert_eq!(strict.fallback, FallbackPolicy::Fail);
        assert_eq!(strict.cache_ttl, Duration::from_secs(60));
    }
}
