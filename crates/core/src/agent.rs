//! Agent model - a sales agent on a brokerage team.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::AgentId;
use crate::metric::MetricSample;

/// A sales agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    /// Unique identifier
    pub id: AgentId,

    /// Display name
    pub name: String,

    /// Team the agent belongs to
    pub team: String,

    /// First working day
    pub hired_at: NaiveDate,
}

impl Agent {
    /// Create a new agent with a fresh id.
    pub fn new(name: impl Into<String>, team: impl Into<String>, hired_at: NaiveDate) -> Self {
        Self {
            id: AgentId::new(),
            name: name.into(),
            team: team.into(),
            hired_at,
        }
    }
}

/// Sales results feeding a team-member assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceRecord {
    /// Assessed agent
    pub agent_id: AgentId,

    /// Agent display name
    pub name: String,

    /// Lead-to-contract conversion, in percent (0-100)
    pub conversion_rate: f64,

    /// Closed sales volume
    pub sales_volume: f64,

    /// Sales volume target
    pub sales_target: f64,

    /// Buyer satisfaction rating (0-5)
    pub buyer_satisfaction: f64,

    /// Owner satisfaction rating (0-5)
    pub owner_satisfaction: f64,
}

impl PerformanceRecord {
    /// Sales volume against target.
    pub fn sales(&self) -> MetricSample {
        MetricSample::new(self.sales_volume, self.sales_target)
    }

    /// Check every figure is finite and none is negative.
    ///
    /// A zero sales target is allowed; that component then scores zero.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (metric, value) in [
            ("conversionRate", self.conversion_rate),
            ("salesVolume", self.sales_volume),
            ("salesTarget", self.sales_target),
            ("buyerSatisfaction", self.buyer_satisfaction),
            ("ownerSatisfaction", self.owner_satisfaction),
        ] {
            if !value.is_finite() {
                return Err(ValidationError::NonFinite(metric.to_string()));
            }
            if value < 0.0 {
                return Err(ValidationError::NegativeCurrent {
                    metric: metric.to_string(),
                    value,
                });
            }
        }
        Ok(())
    }
}
