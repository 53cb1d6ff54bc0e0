//! Pacing - actual progress against where it should be by now.

use brokerdash_core::TimePeriod;
use serde::{Deserialize, Serialize};

/// Pacing at a point inside a period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pacing {
    /// Value expected by now if progress were linear
    pub expected: f64,

    /// Value actually reached
    pub actual: f64,

    /// `actual - expected`
    pub delta: f64,

    /// `delta >= 0`; ties count as ahead
    pub ahead_of_pace: bool,

    /// Full-period target
    pub target: f64,

    /// Units left in the period
    pub remaining_units: f64,
}

impl Pacing {
    /// Target still to be reached.
    pub fn remaining_target(&self) -> f64 {
        (self.target - self.actual).max(0.0)
    }

    /// Rate needed over the remaining units to reach the target.
    ///
    /// Zero once the target is met. With no units left, the whole remaining
    /// target.
    pub fn required_per_remaining_unit(&self) -> f64 {
        let remaining = self.remaining_target();
        if remaining == 0.0 {
            return 0.0;
        }
        if self.remaining_units <= 0.0 {
            return remaining;
        }
        remaining / self.remaining_units
    }
}

/// Compares actual progress with the proportional expectation.
#[derive(Debug, Clone, Copy, Default)]
pub struct PacingCalculator;

impl PacingCalculator {
    /// Create a new calculator.
    pub fn new() -> Self {
        Self
    }

    /// Pacing after `elapsed_units` of `total_units` toward `target`.
    ///
    /// `expected = round(elapsed / total * target)`. A zero-length period
    /// expects nothing, so any actual value is on pace. Elapsed time is
    /// clamped into the period; non-finite inputs count as zero.
    pub fn pacing(&self, elapsed_units: f64, total_units: f64, target: f64, actual: f64) -> Pacing {
        let total_units = finite_or_zero(total_units).max(0.0);
        let elapsed_units = finite_or_zero(elapsed_units).clamp(0.0, total_units);
        let period = TimePeriod::new(elapsed_units, total_units);
        let target = finite_or_zero(target);
        let actual = finite_or_zero(actual);

        let expected = if total_units > 0.0 {
            (period.fraction() * target).round()
        } else {
            0.0
        };
        let delta = actual - expected;

        Pacing {
            expected,
            actual,
            delta,
            ahead_of_pace: total_units <= 0.0 || delta >= 0.0,
            target,
            remaining_units: period.remaining_units(),
        }
    }

    /// Pacing through `period`.
    pub fn pacing_for_period(&self, period: &TimePeriod, target: f64, actual: f64) -> Pacing {
        self.pacing(period.elapsed_units, period.total_units, target, actual)
    }
}

/// See [`PacingCalculator::pacing`].
pub fn pacing(elapsed_units: f64, total_units: f64, target: f64, actual: f64) -> Pacing {
    PacingCalculator.pacing(elapsed_units, total_units, target, actual)
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_of_period_expects_nothing() {
        for total in [1.0, 28.0, 31.0] {
            for target in [0.0, 10.0, 3000.0] {
                assert_eq!(pacing(0.0, total, target, 0.0).expected, 0.0);
            }
        }
    }

    #[test]
    fn test_end_of_period_expects_target() {
        for total in [1.0, 30.0, 31.0] {
            assert_eq!(pacing(total, total, 3000.0, 0.0).expected, 3000.0);
        }
    }

    #[test]
    fn test_tie_counts_as_ahead() {
        let p = pacing(10.0, 20.0, 100.0, 50.0);
        assert_eq!(p.expected, 50.0);
        assert_eq!(p.delta, 0.0);
        assert!(p.ahead_of_pace);
    }

    #[test]
    fn test_mid_month_behind() {
        // daysPassed 15 of 30, target 3000, currentMonthPoints 1250
        let p = pacing(15.0, 30.0, 3000.0, 1250.0);
        assert_eq!(p.expected, 1500.0);
        assert_eq!(p.delta, -250.0);
        assert!(!p.ahead_of_pace);
        assert_eq!(p.remaining_units, 15.0);
    }

    #[test]
    fn test_zero_length_period() {
        let p = pacing(0.0, 0.0, 3000.0, 0.0);
        assert_eq!(p.expected, 0.0);
        assert!(p.ahead_of_pace);
    }

    #[test]
    fn test_elapsed_beyond_period_is_clamped() {
        let p = pacing(45.0, 30.0, 3000.0, 3000.0);
        assert_eq!(p.expected, 3000.0);
        assert_eq!(p.remaining_units, 0.0);
    }

    #[test]
    fn test_negative_elapsed_is_clamped_to_start() {
        let p = pacing(-5.0, 30.0, 3000.0, 0.0);
        assert_eq!(p.expected, 0.0);
        assert_eq!(p.remaining_units, 30.0);
        assert_eq!(p.required_per_remaining_unit(), 100.0);
    }

    #[test]
    fn test_non_finite_time_degrades_to_zero() {
        let p = pacing(f64::NAN, 30.0, 3000.0, 1000.0);
        assert_eq!(p.expected, 0.0);
        assert_eq!(p.delta, 1000.0);
        assert!(p.ahead_of_pace);
        assert_eq!(p.remaining_units, 30.0);

        let p = pacing(10.0, f64::INFINITY, 3000.0, 0.0);
        assert_eq!(p.expected, 0.0);
        assert!(p.ahead_of_pace);
        assert_eq!(p.remaining_units, 0.0);
    }

    #[test]
    fn test_required_rate() {
        let p = pacing(15.0, 30.0, 3000.0, 1250.0);
        assert_eq!(p.remaining_target(), 1750.0);
        assert!((p.required_per_remaining_unit() - 1750.0 / 15.0).abs() < 1e-9);

        let done = pacing(15.0, 30.0, 3000.0, 3200.0);
        assert_eq!(done.required_per_remaining_unit(), 0.0);

        let last_day = pacing(30.0, 30.0, 3000.0, 2900.0);
        assert_eq!(last_day.required_per_remaining_unit(), 100.0);
    }

    #[test]
    fn test_for_period_matches_raw_call() {
        let period = TimePeriod::new(12.0, 31.0);
        assert_eq!(
            PacingCalculator::new().pacing_for_period(&period, 900.0, 400.0),
            pacing(12.0, 31.0, 900.0, 400.0)
        );
    }
}
