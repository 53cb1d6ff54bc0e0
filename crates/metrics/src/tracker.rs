//! Monthly goal tracking.

use brokerdash_core::{AgentId, MonthlyGoal, Time, TimePeriod, ValidationError};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::pacing::{Pacing, PacingCalculator};
use crate::progress::ProgressCalculator;

/// Progress and pacing of one goal on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalReport {
    /// Goal owner
    pub agent_id: AgentId,
    /// Agent display name
    pub agent_name: String,
    /// Day the report describes
    pub as_of: NaiveDate,
    /// Display percentage (0-100)
    pub percentage: f64,
    /// Unclamped ratio of points to target
    pub ratio: f64,
    /// Pacing through the goal's month
    pub pacing: Pacing,
}

/// Reports for many goals at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalSnapshot {
    /// When snapshot was taken
    pub timestamp: Time,

    /// Reports for goals that could be tracked
    pub reports: Vec<GoalReport>,

    /// Goals skipped because their month was invalid
    pub skipped: Vec<AgentId>,
}

/// Tracks monthly goals against the calendar.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoalTracker;

impl GoalTracker {
    /// Create a new tracker.
    pub fn new() -> Self {
        Self
    }

    /// Report on `goal` as of `on`.
    ///
    /// Days before the goal's month expect nothing; days after it expect the
    /// full target.
    pub fn track(&self, goal: &MonthlyGoal, on: NaiveDate) -> Result<GoalReport, ValidationError> {
        let period = TimePeriod::within_month(goal.year, goal.month, on)?;
        let progress = ProgressCalculator;

        Ok(GoalReport {
            agent_id: goal.agent_id,
            agent_name: goal.agent_name.clone(),
            as_of: on,
            percentage: progress.percentage(goal.current_points, goal.target_points),
            ratio: progress.ratio(goal.current_points, goal.target_points),
            pacing: PacingCalculator.pacing_for_period(
                &period,
                goal.target_points,
                goal.current_points,
            ),
        })
    }

    /// Report on every goal as of `on`.
    pub fn snapshot(&self, goals: &[MonthlyGoal], on: NaiveDate) -> GoalSnapshot {
        let mut reports = Vec::new();
        let mut skipped = Vec::new();

        for goal in goals {
            match self.track(goal, on) {
                Ok(report) => reports.push(report),
                Err(e) => {
                    tracing::warn!("Skipping goal for {}: {}", goal.agent_id, e);
                    skipped.push(goal.agent_id);
                }
            }
        }

        GoalSnapshot {
            timestamp: Utc::now(),
            reports,
            skipped,
        }
    }
}
