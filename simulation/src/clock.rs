//! Wall-clock pacing for real-time runs.

use std::time::Duration;

use balloon_defence_core::ConfigError;

/// Upper bound on ticks released by a single [`FixedStep::accumulate`] call.
const MAX_CATCH_UP_TICKS: u32 = 8;

/// Converts elapsed wall-clock time into a whole number of due ticks.
///
/// Time beyond [`MAX_CATCH_UP_TICKS`] worth of backlog is dropped so a stalled
/// host does not trigger an unbounded burst of catch-up ticks.
#[derive(Clone, Debug)]
pub struct FixedStep {
    period: Duration,
    accumulator: Duration,
}

impl FixedStep {
    /// Creates a pacer running at `tick_rate_hz` ticks per second.
    pub fn from_rate(tick_rate_hz: u32) -> Result<Self, ConfigError> {
        if tick_rate_hz == 0 {
            return Err(ConfigError::NonPositiveTickRate);
        }

        Ok(Self {
            period: Duration::from_secs(1) / tick_rate_hz,
            accumulator: Duration::ZERO,
        })
    }

    /// Wall-clock duration of a single tick.
    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Adds `elapsed` to the backlog and returns how many ticks are now due.
    pub fn accumulate(&mut self, elapsed: Duration) -> u32 {
        self.accumulator = self.accumulator.saturating_add(elapsed);

        let mut due = 0;
        while self.accumulator >= self.period && due < MAX_CATCH_UP_TICKS {
            self.accumulator -= self.period;
            due += 1;
        }

        if due == MAX_CATCH_UP_TICKS {
            self.accumulator = self.accumulator.min(self.period);
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_rate_is_rejected() {
        assert!(matches!(
            FixedStep::from_rate(0),
            Err(ConfigError::NonPositiveTickRate)
        ));
    }

    #[test]
    fn partial_periods_carry_over() {
        let mut step = FixedStep::from_rate(10).expect("rate");
        assert_eq!(step.accumulate(Duration::from_millis(150)), 1);
        assert_eq!(step.accumulate(Duration::from_millis(60)), 1);
        assert_eq!(step.accumulate(Duration::from_millis(5)), 0);
    }

    #[test]
    fn long_stalls_are_capped() {
        let mut step = FixedStep::from_rate(60).expect("rate");
        assert_eq!(step.accumulate(Duration::from_secs(10)), MAX_CATCH_UP_TICKS);
        assert!(step.accumulate(Duration::ZERO) <= 1);
    }
}
