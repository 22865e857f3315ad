//! Microsecond tick clocks with wrapping counters.
//!
//! Ticks behave like a free-running hardware timer: they count up and wrap at
//! a power-of-two period. Differences must go through [`ticks_diff`] to stay
//! correct across a wrap.

#![forbid(unsafe_code)]

use rpsha_core::{Error, Result};
use std::cell::Cell;
use std::time::Instant;

/// Default tick period (2^30 microseconds, about 17.9 minutes).
pub const DEFAULT_TICKS_PERIOD: u64 = 1 << 30;

/// Largest period that keeps signed differences inside `i64`.
const MAX_TICKS_PERIOD: u64 = 1 << 62;

/// A source of monotonic microsecond ticks.
pub trait TickSource {
    /// Current tick, always below `period()`.
    fn now(&self) -> u64;

    /// Wrap period of the counter. Always a power of two.
    fn period(&self) -> u64;

    /// Signed ticks from `start` to `end`, accounting for one wrap.
    fn diff(&self, end: u64, start: u64) -> i64 {
        ticks_diff(end, start, self.period())
    }
}

/// Signed distance from `start` to `end` on a counter wrapping at `period`.
///
/// The result lies in `[-period/2, period/2)`, so intervals shorter than half a
/// period are measured correctly even when the counter wrapped in between.
/// `period` must be a power of two.
pub fn ticks_diff(end: u64, start: u64, period: u64) -> i64 {
    debug_assert!(period.is_power_of_two());
    let mask = period - 1;
    let half = period / 2;
    let shifted = end.wrapping_sub(start).wrapping_add(half) & mask;
    shifted as i64 - half as i64
}

fn check_period(period: u64) -> Result<()> {
    if !period.is_power_of_two() || period < 2 || period > MAX_TICKS_PERIOD {
        return Err(Error::InvalidBenchConfig(format!(
            "tick period {} must be a power of two between 2 and 2^62",
            period
        )));
    }
    Ok(())
}

/// Wall-clock ticks from `std::time::Instant`, in microseconds.
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    origin: Instant,
    period: u64,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            period: DEFAULT_TICKS_PERIOD,
        }
    }

    /// Clock wrapping at a custom period.
    pub fn with_period(period: u64) -> Result<Self> {
        check_period(period)?;
        Ok(Self {
            origin: Instant::now(),
            period,
        })
    }
}

impl TickSource for MonotonicClock {
    fn now(&self) -> u64 {
        let micros = self.origin.elapsed().as_micros();
        // Truncation is fine: only the bits below the period survive the mask
        (micros as u64) & (self.period - 1)
    }

    fn period(&self) -> u64 {
        self.period
    }
}

/// Deterministic clock that advances by a fixed step on every read.
///
/// Makes timing output reproducible: a measurement bracketed by two reads
/// always reports exactly `step` ticks.
#[derive(Debug)]
pub struct StepClock {
    next: Cell<u64>,
    step: u64,
    period: u64,
}

impl StepClock {
    pub fn new(start: u64, step: u64) -> Self {
        Self {
            next: Cell::new(start & (DEFAULT_TICKS_PERIOD - 1)),
            step,
            period: DEFAULT_TICKS_PERIOD,
        }
    }

    pub fn with_period(start: u64, step: u64, period: u64) -> Result<Self> {
        check_period(period)?;
        Ok(Self {
            next: Cell::new(start & (period - 1)),
            step,
            period,
        })
    }
}

impl TickSource for StepClock {
    fn now(&self) -> u64 {
        let tick = self.next.get();
        self.next
            .set(tick.wrapping_add(self.step) & (self.period - 1));
        tick
    }

    fn period(&self) -> u64 {
        self.period
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diff_without_wrap() {
        assert_eq!(ticks_diff(1500, 1000, DEFAULT_TICKS_PERIOD), 500);
        assert_eq!(ticks_diff(1000, 1500, DEFAULT_TICKS_PERIOD), -500);
        assert_eq!(ticks_diff(7, 7, DEFAULT_TICKS_PERIOD), 0);
    }

    #[test]
    fn test_diff_across_wrap() {
        let period = DEFAULT_TICKS_PERIOD;
        assert_eq!(ticks_diff(10, period - 5, period), 15);
        assert_eq!(ticks_diff(period - 5, 10, period), -15);
    }

    #[test]
    fn test_diff_half_period_bounds() {
        let period = 16;
        assert_eq!(ticks_diff(7, 0, period), 7);
        // Exactly half a period reads as the negative extreme
        assert_eq!(ticks_diff(8, 0, period), -8);
    }

    #[test]
    fn test_step_clock_wraps() {
        let clock = StepClock::with_period(14, 3, 16).unwrap();
        let start = clock.now();
        let end = clock.now();
        assert_eq!(start, 14);
        assert_eq!(end, 1);
        assert_eq!(clock.diff(end, start), 3);
    }

    #[test]
    fn test_monotonic_clock_moves_forward() {
        let clock = MonotonicClock::new();
        let start = clock.now();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let end = clock.now();
        assert!(clock.diff(end, start) >= 1000);
    }

    #[test]
    fn test_rejects_bad_period() {
        assert!(MonotonicClock::with_period(0).is_err());
        assert!(MonotonicClock::with_period(1000).is_err());
        assert!(StepClock::with_period(0, 1, 3).is_err());
        assert!(MonotonicClock::with_period(1 << 20).is_ok());
    }
}
