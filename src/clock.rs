//! Per-turn wall-clock budget.

use std::time::{Duration, Instant};

/// Countdown for one turn, started when the turn begins.
#[derive(Debug, Clone, Copy)]
pub struct TurnClock {
    started: Instant,
    budget: Duration,
}

impl TurnClock {
    #[must_use]
    pub fn start(budget: Duration) -> Self {
        Self {
            started: Instant::now(),
            budget,
        }
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Milliseconds left in the turn. Negative once the budget is overrun.
    #[must_use]
    pub fn time_left_ms(&self) -> f64 {
        (self.budget.as_secs_f64() - self.elapsed().as_secs_f64()) * 1000.0
    }

    #[must_use]
    pub fn expired(&self) -> bool {
        self.elapsed() > self.budget
    }

    /// Remaining-time probe to hand to a search. Reads the clock on every call.
    pub fn probe(&self) -> impl Fn() -> f64 + '_ {
        move || self.time_left_ms()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_clock_has_almost_the_whole_budget() {
        let clock = TurnClock::start(Duration::from_secs(60));
        let left = clock.time_left_ms();
        assert!(left <= 60_000.0);
        assert!(left > 50_000.0);
        assert!(!clock.expired());
    }

    #[test]
    fn probe_counts_down() {
        let clock = TurnClock::start(Duration::from_secs(60));
        let probe = clock.probe();
        let first = probe();
        std::thread::sleep(Duration::from_millis(5));
        assert!(probe() < first);
    }

    #[test]
    fn zero_budget_is_expired_immediately() {
        let clock = TurnClock::start(Duration::ZERO);
        std::thread::sleep(Duration::from_millis(1));
        assert!(clock.expired());
        assert!(clock.time_left_ms() < 0.0);
    }
}
