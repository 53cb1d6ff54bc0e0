//! Progress percentages.

/// Maps a count and its target to a display percentage.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressCalculator;

impl ProgressCalculator {
    /// Create a new calculator.
    pub fn new() -> Self {
        Self
    }

    /// Percentage of `target` reached, rounded and clamped to [0, 100].
    ///
    /// A target of zero or below yields 0. Non-finite inputs yield 0.
    pub fn percentage(&self, current: f64, target: f64) -> f64 {
        let pct = (self.ratio(current, target) * 100.0).round();
        if pct <= 0.0 {
            0.0
        } else {
            pct.min(100.0)
        }
    }

    /// Unclamped `current / target`, kept for ranking over-achievers.
    pub fn ratio(&self, current: f64, target: f64) -> f64 {
        if target <= 0.0 || !target.is_finite() || !current.is_finite() {
            return 0.0;
        }
        current / target
    }
}

/// See [`ProgressCalculator::percentage`].
pub fn percentage(current: f64, target: f64) -> f64 {
    ProgressCalculator.percentage(current, target)
}

/// See [`ProgressCalculator::ratio`].
pub fn ratio(current: f64, target: f64) -> f64 {
    ProgressCalculator.ratio(current, target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_in_range() {
        for target in [1.0, 3.0, 7.5, 10.0, 3000.0] {
            for current in [0.0, 0.4, 1.0, 2.5, 9.0, 100.0, 1e9] {
                let pct = percentage(current, target);
                assert!((0.0..=100.0).contains(&pct), "{current}/{target} -> {pct}");
            }
        }
    }

    #[test]
    fn test_zero_target() {
        assert_eq!(percentage(0.0, 0.0), 0.0);
        assert_eq!(percentage(42.0, 0.0), 0.0);
        assert_eq!(percentage(42.0, -5.0), 0.0);
        assert_eq!(ratio(42.0, 0.0), 0.0);
    }

    #[test]
    fn test_full_and_over_target() {
        assert_eq!(percentage(10.0, 10.0), 100.0);
        assert_eq!(percentage(20.0, 10.0), 100.0);
        assert_eq!(ratio(20.0, 10.0), 2.0);
    }

    #[test]
    fn test_probation_new_listings() {
        // newList: {count: 5, target: 10}
        assert_eq!(percentage(5.0, 10.0), 50.0);
    }

    #[test]
    fn test_rounding() {
        assert_eq!(percentage(1.0, 3.0), 33.0);
        assert_eq!(percentage(2.0, 3.0), 67.0);
        assert_eq!(percentage(1.0, 8.0), 13.0);
    }

    #[test]
    fn test_degenerate_inputs_never_nan_or_negative() {
        assert_eq!(percentage(-4.0, 10.0), 0.0);
        assert_eq!(percentage(f64::NAN, 10.0), 0.0);
        assert_eq!(percentage(5.0, f64::INFINITY), 0.0);
        assert_eq!(percentage(f64::INFINITY, 10.0), 0.0);
    }
}
