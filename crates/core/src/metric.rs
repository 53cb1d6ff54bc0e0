//! Metric inputs - the value objects every calculation consumes.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A tracked count against its target.
///
/// `current` may exceed `target`. Display percentages clamp the ratio, but
/// rankings use the raw ratio.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricSample {
    /// Achieved so far (`count` in dashboard records)
    #[serde(alias = "count")]
    pub current: f64,

    /// Goal value
    pub target: f64,
}

impl MetricSample {
    /// Create a new sample.
    pub fn new(current: f64, target: f64) -> Self {
        Self { current, target }
    }

    /// Check the sample against the input policy.
    ///
    /// `metric` names the sample in the error.
    pub fn validate(&self, metric: &str) -> Result<(), ValidationError> {
        check_finite(metric, self.current)?;
        check_finite(metric, self.target)?;
        if self.current < 0.0 {
            return Err(ValidationError::NegativeCurrent {
                metric: metric.to_string(),
                value: self.current,
            });
        }
        if self.target <= 0.0 {
            return Err(ValidationError::NonPositiveTarget {
                metric: metric.to_string(),
                value: self.target,
            });
        }
        Ok(())
    }
}

/// How far through a period we are, in whole units (usually days).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimePeriod {
    /// Units already passed
    pub elapsed_units: f64,

    /// Units in the whole period
    pub total_units: f64,
}

impl TimePeriod {
    /// Create a new period.
    pub fn new(elapsed_units: f64, total_units: f64) -> Self {
        Self {
            elapsed_units,
            total_units,
        }
    }

    /// Day-of-month over days-in-month for the month containing `date`.
    pub fn for_month(date: NaiveDate) -> Self {
        Self::new(date.day() as f64, days_in_month(date.year(), date.month()) as f64)
    }

    /// Period for the calendar month `year`/`month`, observed on `on`.
    ///
    /// Dates before the month give zero elapsed days; dates after it give the
    /// full month.
    pub fn within_month(year: i32, month: u32, on: NaiveDate) -> Result<Self, ValidationError> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or(ValidationError::InvalidMonth(month))?;
        let total = days_in_month(year, month);

        let elapsed = if on < first {
            0
        } else if (on.year(), on.month()) == (year, month) {
            on.day()
        } else {
            total
        };

        Ok(Self::new(elapsed as f64, total as f64))
    }

    /// Fraction of the period that has passed, within [0, 1].
    ///
    /// A zero-length period, or one with non-finite bounds, counts as not
    /// started.
    pub fn fraction(&self) -> f64 {
        if self.total_units <= 0.0
            || !self.total_units.is_finite()
            || !self.elapsed_units.is_finite()
        {
            return 0.0;
        }
        (self.elapsed_units / self.total_units).clamp(0.0, 1.0)
    }

    /// Units still to come, with elapsed time clamped into the period.
    pub fn remaining_units(&self) -> f64 {
        if !self.total_units.is_finite() || self.total_units <= 0.0 {
            return 0.0;
        }
        let elapsed = if self.elapsed_units.is_finite() {
            self.elapsed_units.clamp(0.0, self.total_units)
        } else {
            0.0
        };
        self.total_units - elapsed
    }

    /// Check `0 <= elapsed <= total`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_finite("elapsedUnits", self.elapsed_units)?;
        check_finite("totalUnits", self.total_units)?;
        if self.elapsed_units < 0.0 || self.elapsed_units > self.total_units {
            return Err(ValidationError::ElapsedOutOfRange {
                elapsed: self.elapsed_units,
                total: self.total_units,
            });
        }
        Ok(())
    }
}

/// One normalised sub-metric of a composite score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightedComponent {
    /// Observed value
    pub value: f64,

    /// Value that counts as 100% of this component
    pub max_value: f64,

    /// Share of the composite, 0-1
    pub weight: f64,
}

impl WeightedComponent {
    /// Create a new component.
    pub fn new(value: f64, max_value: f64, weight: f64) -> Self {
        Self {
            value,
            max_value,
            weight,
        }
    }
}

/// Number of days in a calendar month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(30)
}

fn check_finite(name: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NonFinite(name.to_string()))
    }
}
