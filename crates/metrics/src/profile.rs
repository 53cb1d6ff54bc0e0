//! Score profiles - named weight tables for composite scores.
//!
//! A profile maps metric ids to a weight and the value that counts as a
//! full mark. Keeping the table as data lets the same calculator serve every
//! score type on the dashboard.

use std::collections::HashSet;

use brokerdash_core::WeightedComponent;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Name of the built-in team-member assessment profile.
pub const SALES_PERFORMANCE: &str = "sales-performance";

/// Largest weight-sum drift from 1.0 accepted without a warning.
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.001;

/// Metric ids used by the sales-performance profile.
pub mod metric_ids {
    /// Lead-to-contract conversion rate
    pub const CONVERSION: &str = "conversion";
    /// Closed sales volume against target
    pub const SALES: &str = "sales";
    /// Buyer satisfaction rating
    pub const BUYER_SATISFACTION: &str = "buyerSatisfaction";
    /// Owner satisfaction rating
    pub const OWNER_SATISFACTION: &str = "ownerSatisfaction";
}

/// One row of a weight table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileMetric {
    /// Metric id
    pub id: String,

    /// Share of the composite, 0-1
    pub weight: f64,

    /// Full-mark value; `None` when each record supplies its own (e.g. a sales target)
    #[serde(default)]
    pub max_value: Option<f64>,
}

impl ProfileMetric {
    /// Metric with a fixed full mark.
    pub fn fixed(id: impl Into<String>, weight: f64, max_value: f64) -> Self {
        Self {
            id: id.into(),
            weight,
            max_value: Some(max_value),
        }
    }

    /// Metric whose full mark comes with each record.
    pub fn per_record(id: impl Into<String>, weight: f64) -> Self {
        Self {
            id: id.into(),
            weight,
            max_value: None,
        }
    }
}

/// An observed value for one profile metric.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricInput<'a> {
    /// Metric id
    pub id: &'a str,
    /// Observed value
    pub value: f64,
    /// Full mark for this record, overriding the profile's
    pub max_value: Option<f64>,
}

impl<'a> MetricInput<'a> {
    /// Input using the profile's full mark.
    pub fn new(id: &'a str, value: f64) -> Self {
        Self {
            id,
            value,
            max_value: None,
        }
    }

    /// Input carrying its own full mark.
    pub fn with_max(id: &'a str, value: f64, max_value: f64) -> Self {
        Self {
            id,
            value,
            max_value: Some(max_value),
        }
    }
}

/// A named weight table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreProfile {
    /// Profile name
    pub name: String,

    /// Weighted metrics
    pub metrics: Vec<ProfileMetric>,
}

impl ScoreProfile {
    /// Create a new profile.
    pub fn new(name: impl Into<String>, metrics: Vec<ProfileMetric>) -> Self {
        Self {
            name: name.into(),
            metrics,
        }
    }

    /// Conversion 30%, sales 40%, buyer and owner satisfaction 15% each.
    pub fn sales_performance() -> Self {
        Self::new(
            SALES_PERFORMANCE,
            vec![
                ProfileMetric::fixed(metric_ids::CONVERSION, 0.30, 100.0),
                ProfileMetric::per_record(metric_ids::SALES, 0.40),
                ProfileMetric::fixed(metric_ids::BUYER_SATISFACTION, 0.15, 5.0),
                ProfileMetric::fixed(metric_ids::OWNER_SATISFACTION, 0.15, 5.0),
            ],
        )
    }

    /// Sum of all weights.
    pub fn weight_sum(&self) -> f64 {
        self.metrics.iter().map(|m| m.weight).sum()
    }

    /// Whether the weights sum to 1 within [`WEIGHT_SUM_TOLERANCE`].
    pub fn is_balanced(&self) -> bool {
        (self.weight_sum() - 1.0).abs() <= WEIGHT_SUM_TOLERANCE
    }

    /// Reject tables no score can be computed from.
    ///
    /// Negative or non-finite weights, non-positive full marks, duplicate ids,
    /// and empty tables are errors. An unbalanced weight sum is allowed.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| ConfigError::InvalidProfile {
            profile: self.name.clone(),
            reason,
        };

        if self.name.trim().is_empty() {
            return Err(invalid("profile name cannot be empty".to_string()));
        }
        if self.metrics.is_empty() {
            return Err(invalid("no metrics".to_string()));
        }

        let mut seen = HashSet::new();
        for metric in &self.metrics {
            if !seen.insert(metric.id.as_str()) {
                return Err(invalid(format!("duplicate metric '{}'", metric.id)));
            }
            if !metric.weight.is_finite() || metric.weight < 0.0 {
                return Err(invalid(format!(
                    "metric '{}' has invalid weight {}",
                    metric.id, metric.weight
                )));
            }
            if let Some(max) = metric.max_value {
                if !max.is_finite() || max <= 0.0 {
                    return Err(invalid(format!(
                        "metric '{}' has invalid max value {}",
                        metric.id, max
                    )));
                }
            }
        }
        Ok(())
    }

    /// Build calculator components in profile order.
    ///
    /// Metrics with no matching input count as zero. A per-record metric
    /// with no full mark in its input contributes nothing.
    pub fn components(&self, inputs: &[MetricInput<'_>]) -> Vec<WeightedComponent> {
        self.metrics
            .iter()
            .map(|metric| {
                let input = inputs.iter().find(|i| i.id == metric.id);
                if input.is_none() {
                    tracing::debug!("Profile '{}' has no input for '{}'", self.name, metric.id);
                }

                let value = input.map(|i| i.value).unwrap_or(0.0);
                let max_value = input
                    .and_then(|i| i.max_value)
                    .or(metric.max_value)
                    .unwrap_or(0.0);

                WeightedComponent::new(value, max_value, metric.weight)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::score;

    #[test]
    fn test_sales_performance_is_balanced() {
        let profile = ScoreProfile::sales_performance();
        assert!(profile.validate().is_ok());
        assert!(profile.is_balanced());
        assert!((profile.weight_sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_components_follow_profile_order() {
        let profile = ScoreProfile::sales_performance();
        let components = profile.components(&[
            MetricInput::new(metric_ids::OWNER_SATISFACTION, 4.5),
            MetricInput::with_max(metric_ids::SALES, 250_000.0, 350_000.0),
            MetricInput::new(metric_ids::CONVERSION, 72.0),
            MetricInput::new(metric_ids::BUYER_SATISFACTION, 4.2),
        ]);

        assert_eq!(components.len(), 4);
        assert_eq!(components[0], WeightedComponent::new(72.0, 100.0, 0.30));
        assert_eq!(components[1], WeightedComponent::new(250_000.0, 350_000.0, 0.40));
        assert_eq!(score(&components), 76.0);
    }

    #[test]
    fn test_missing_inputs_count_as_zero() {
        let profile = ScoreProfile::sales_performance();
        let components = profile.components(&[MetricInput::new(metric_ids::CONVERSION, 100.0)]);
        assert_eq!(score(&components), 30.0);
    }

    #[test]
    fn test_validate_rejects_bad_tables() {
        let negative = ScoreProfile::new("neg", vec![ProfileMetric::fixed("a", -0.1, 10.0)]);
        assert!(matches!(
            negative.validate(),
            Err(ConfigError::InvalidProfile { .. })
        ));

        let duplicate = ScoreProfile::new(
            "dup",
            vec![
                ProfileMetric::fixed("a", 0.5, 10.0),
                ProfileMetric::fixed("a", 0.5, 10.0),
            ],
        );
        assert!(duplicate.validate().is_err());

        let zero_max = ScoreProfile::new("zero", vec![ProfileMetric::fixed("a", 1.0, 0.0)]);
        assert!(zero_max.validate().is_err());

        let empty = ScoreProfile::new("empty", vec![]);
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_unbalanced_profile_is_valid() {
        let profile = ScoreProfile::new(
            "partial",
            vec![
                ProfileMetric::fixed("a", 0.5, 10.0),
                ProfileMetric::fixed("b", 0.2, 10.0),
            ],
        );
        assert!(profile.validate().is_ok());
        assert!(!profile.is_balanced());
    }
}
