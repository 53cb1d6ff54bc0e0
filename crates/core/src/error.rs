//! Validation errors for metric inputs and domain records.

/// Errors raised when an input record breaks a data-model invariant.
///
/// The calculators never return these; they degrade to defaults instead.
/// Validation happens where records enter the system (input files, forms).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// A current value below zero
    #[error("Negative current value for '{metric}': {value}")]
    NegativeCurrent {
        /// Metric name
        metric: String,
        /// Offending value
        value: f64,
    },

    /// A target of zero or below
    #[error("Non-positive target for '{metric}': {value}")]
    NonPositiveTarget {
        /// Metric name
        metric: String,
        /// Offending value
        value: f64,
    },

    /// Elapsed time outside the period
    #[error("Elapsed units {elapsed} outside period of {total} units")]
    ElapsedOutOfRange {
        /// Units elapsed
        elapsed: f64,
        /// Units in the period
        total: f64,
    },

    /// A probation period of zero months
    #[error("Probation period must last at least one month")]
    EmptyProbationPeriod,

    /// A probation month without KPIs
    #[error("Probation month {month} has no KPIs")]
    EmptyProbationMonth {
        /// 1-based month index
        month: u32,
    },

    /// A probation month index that is zero, duplicated, or out of order
    #[error("Probation month index {month} is out of sequence")]
    MonthOutOfSequence {
        /// 1-based month index
        month: u32,
    },

    /// Calendar month outside 1..=12
    #[error("Invalid calendar month: {0}")]
    InvalidMonth(u32),

    /// Unrecognised action kind name
    #[error("Unknown action kind: {0}")]
    UnknownActionKind(String),

    /// A value that is NaN or infinite
    #[error("Non-finite value for '{0}'")]
    NonFinite(String),
}
