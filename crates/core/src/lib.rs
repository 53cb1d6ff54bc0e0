//! Brokerdash core data models.
//!
//! This crate defines the records a sales-performance dashboard feeds into
//! its metric calculators: counts against targets, time periods, weighted
//! sub-metrics, and the brokerage records they are derived from.

#![warn(missing_docs)]

// Core identities
mod id;
mod error;

// Metric inputs
mod metric;

// Brokerage records
mod agent;
mod action;
mod probation;
mod goal;

// Re-exports
pub use id::*;
pub use error::ValidationError;

pub use metric::{MetricSample, TimePeriod, WeightedComponent, days_in_month};

pub use agent::{Agent, PerformanceRecord};
pub use action::{ActionKind, ActionRecord};
pub use probation::{ProbationKpi, ProbationMonth, ProbationPlan, DEFAULT_PROBATION_MONTHS};
pub use goal::MonthlyGoal;

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
