//! Derived metrics (progress, pacing, weighted scores)
//!
//! Calculators for the sales dashboard and the evaluators built on them:
//! probation reviews, goal tracking, action points, assessments, and
//! leaderboards.

#![warn(missing_docs)]

pub mod error;
pub mod config;
pub mod progress;
pub mod pacing;
pub mod score;
pub mod profile;
pub mod probation;
pub mod tracker;
pub mod ledger;
pub mod assessment;
pub mod leaderboard;

pub use error::{ConfigError, Result};
pub use config::{DashboardConfig, ProbationThresholds, default_action_points};
pub use progress::{ProgressCalculator, percentage, ratio};
pub use pacing::{Pacing, PacingCalculator, pacing};
pub use score::{WeightedScoreCalculator, score};
pub use profile::{MetricInput, ProfileMetric, ScoreProfile, SALES_PERFORMANCE};
pub use probation::{
    KpiResult, MonthReview, ProbationEvaluator, ProbationReview, ProbationStatus,
};
pub use tracker::{GoalReport, GoalSnapshot, GoalTracker};
pub use ledger::{ActionLedger, ActionSummary};
pub use assessment::{Assessment, AssessmentService, ComponentScore, Grade};
pub use leaderboard::{Leaderboard, LeaderboardEntry, RankBy, Standing};
