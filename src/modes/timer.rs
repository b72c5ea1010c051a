//! Time mode countdown.
//!
//! The countdown is an owned resource: armed by `begin_game`, disarmed by
//! reset, game end and mode switch. While armed it can be driven two ways:
//! call `tick` from the host's own clock, or await `wait` which paces ticks
//! with a tokio interval. The interval is created on first await and dropped
//! on disarm, so at most one clock exists per countdown.

use std::time::Duration;

use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

#[derive(Debug)]
pub struct Countdown {
    limit: u32,
    left: u32,
    period: Duration,
    armed: bool,
    clock: Option<Interval>,
}

impl Countdown {
    pub fn new(limit: u32, period: Duration) -> Self {
        Self {
            limit,
            left: limit,
            period,
            armed: false,
            clock: None,
        }
    }

    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.left
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn arm(&mut self) {
        self.armed = true;
        self.clock = None;
    }

    pub fn disarm(&mut self) {
        self.armed = false;
        self.clock = None;
    }

    /// Disarm and refill.
    pub fn reset(&mut self) {
        self.disarm();
        self.left = self.limit;
    }

    /// Remove `secs`, floored at zero. Returns the time left.
    pub fn penalize(&mut self, secs: u32) -> u32 {
        self.left = self.left.saturating_sub(secs);
        self.left
    }

    /// One second elapsed. `None` when disarmed.
    pub fn tick(&mut self) -> Option<u32> {
        if !self.armed {
            return None;
        }
        self.left = self.left.saturating_sub(1);
        Some(self.left)
    }

    /// Wait for the next tick boundary. Never resolves while disarmed.
    pub async fn wait(&mut self) {
        if !self.armed {
            std::future::pending::<()>().await;
        }
        let period = self.period;
        let clock = self.clock.get_or_insert_with(|| {
            let mut clock = interval_at(Instant::now() + period, period);
            clock.set_missed_tick_behavior(MissedTickBehavior::Delay);
            clock
        });
        clock.tick().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disarmed_does_not_tick() {
        let mut countdown = Countdown::new(30, Duration::from_secs(1));
        assert_eq!(countdown.tick(), None);
        assert_eq!(countdown.remaining(), 30);
    }

    #[test]
    fn test_tick_and_floor() {
        let mut countdown = Countdown::new(2, Duration::from_secs(1));
        countdown.arm();

        assert_eq!(countdown.tick(), Some(1));
        assert_eq!(countdown.tick(), Some(0));
        assert_eq!(countdown.tick(), Some(0));
    }

    #[test]
    fn test_penalize() {
        let mut countdown = Countdown::new(30, Duration::from_secs(1));
        assert_eq!(countdown.penalize(2), 28);
        assert_eq!(countdown.penalize(100), 0);
    }

    #[test]
    fn test_reset_refills_and_disarms() {
        let mut countdown = Countdown::new(10, Duration::from_secs(1));
        countdown.arm();
        countdown.tick();
        countdown.reset();

        assert!(!countdown.is_armed());
        assert_eq!(countdown.remaining(), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_paces_ticks() {
        let mut countdown = Countdown::new(5, Duration::from_secs(1));
        countdown.arm();

        let start = Instant::now();
        countdown.wait().await;
        countdown.wait().await;

        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(2) && elapsed < Duration::from_millis(2500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_pending_when_disarmed() {
        let mut countdown = Countdown::new(5, Duration::from_secs(1));
        let waited = tokio::time::timeout(Duration::from_secs(10), countdown.wait()).await;
        assert!(waited.is_err());
    }
}
