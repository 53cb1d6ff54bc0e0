//! Weighted composite scores.

use brokerdash_core::WeightedComponent;

/// Combines weighted sub-metrics into one score.
///
/// Weights are used as given. A set that does not sum to 1 is the caller's
/// choice and is not normalised.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedScoreCalculator;

impl WeightedScoreCalculator {
    /// Create a new calculator.
    pub fn new() -> Self {
        Self
    }

    /// Points one component adds: `value / max_value * weight * 100`.
    ///
    /// A `max_value` of zero or below, or any non-finite input, adds nothing.
    pub fn contribution(&self, component: &WeightedComponent) -> f64 {
        let WeightedComponent {
            value,
            max_value,
            weight,
        } = *component;

        if max_value <= 0.0 || !(value.is_finite() && max_value.is_finite() && weight.is_finite()) {
            return 0.0;
        }
        value / max_value * weight * 100.0
    }

    /// Rounded sum of all contributions. Not clamped to 100.
    pub fn score(&self, components: &[WeightedComponent]) -> f64 {
        let total: f64 = components.iter().map(|c| self.contribution(c)).sum();
        total.round()
    }
}

/// See [`WeightedScoreCalculator::score`].
pub fn score(components: &[WeightedComponent]) -> f64 {
    WeightedScoreCalculator.score(components)
}
