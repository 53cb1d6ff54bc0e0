//! Goal model - an agent's monthly points target.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::AgentId;
use crate::metric::MetricSample;

/// A monthly points goal set by an agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyGoal {
    /// Goal owner
    pub agent_id: AgentId,

    /// Agent display name
    #[serde(default)]
    pub agent_name: String,

    /// Calendar year
    pub year: i32,

    /// Calendar month (1-12)
    pub month: u32,

    /// Points to reach by month end
    pub target_points: f64,

    /// Points earned so far this month
    #[serde(default, alias = "currentMonthPoints")]
    pub current_points: f64,
}

impl MonthlyGoal {
    /// Create a goal with no points earned yet.
    pub fn new(agent_id: AgentId, year: i32, month: u32, target_points: f64) -> Self {
        Self {
            agent_id,
            agent_name: String::new(),
            year,
            month,
            target_points,
            current_points: 0.0,
        }
    }

    /// Progress as a metric sample.
    pub fn sample(&self) -> MetricSample {
        MetricSample::new(self.current_points, self.target_points)
    }

    /// Check the calendar month and the points sample.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=12).contains(&self.month) {
            return Err(ValidationError::InvalidMonth(self.month));
        }
        self.sample().validate("monthlyPoints")
    }
}
