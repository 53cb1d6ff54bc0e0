//! Probation model - the onboarding evaluation of new agents.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::AgentId;
use crate::metric::MetricSample;

/// Months in a standard probation period.
pub const DEFAULT_PROBATION_MONTHS: u32 = 3;

/// A KPI tracked during probation, e.g. `newList`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbationKpi {
    /// KPI name
    pub name: String,

    /// Count against target
    #[serde(flatten)]
    pub sample: MetricSample,
}

impl ProbationKpi {
    /// Create a new KPI.
    pub fn new(name: impl Into<String>, current: f64, target: f64) -> Self {
        Self {
            name: name.into(),
            sample: MetricSample::new(current, target),
        }
    }
}

/// KPIs recorded for one probation month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbationMonth {
    /// 1-based month within the probation period
    pub month_index: u32,

    /// KPIs for this month
    pub kpis: Vec<ProbationKpi>,
}

/// A new agent's probation plan with the months recorded so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbationPlan {
    /// Agent on probation
    pub agent_id: AgentId,

    /// Agent display name
    #[serde(default)]
    pub name: String,

    /// First day of probation
    pub started_on: NaiveDate,

    /// Length of the probation period in months
    #[serde(default = "default_duration")]
    pub duration_months: u32,

    /// Recorded months, in order
    #[serde(default)]
    pub months: Vec<ProbationMonth>,
}

fn default_duration() -> u32 {
    DEFAULT_PROBATION_MONTHS
}

impl ProbationPlan {
    /// Create an empty plan of the default length.
    pub fn new(agent_id: AgentId, started_on: NaiveDate) -> Self {
        Self {
            agent_id,
            name: String::new(),
            started_on,
            duration_months: DEFAULT_PROBATION_MONTHS,
            months: Vec::new(),
        }
    }

    /// Whether every month of the period has been recorded.
    pub fn is_complete(&self) -> bool {
        self.months.len() as u32 >= self.duration_months
    }

    /// Check the period length, month ordering, and every KPI sample.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.duration_months == 0 {
            return Err(ValidationError::EmptyProbationPeriod);
        }
        for (position, month) in self.months.iter().enumerate() {
            let expected = position as u32 + 1;
            if month.month_index != expected || month.month_index > self.duration_months {
                return Err(ValidationError::MonthOutOfSequence {
                    month: month.month_index,
                });
            }
            if month.kpis.is_empty() {
                return Err(ValidationError::EmptyProbationMonth {
                    month: month.month_index,
                });
            }
            for kpi in &month.kpis {
                kpi.sample.validate(&kpi.name)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan_with(months: Vec<ProbationMonth>) -> ProbationPlan {
        let mut plan = ProbationPlan::new(
            AgentId::new(),
            NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
        );
        plan.months = months;
        plan
    }

    #[test]
    fn test_kpi_parses_dashboard_shape() {
        let kpi: ProbationKpi =
            serde_json::from_str(r#"{"name":"newList","count":5,"target":10}"#).unwrap();
        assert_eq!(kpi, ProbationKpi::new("newList", 5.0, 10.0));
    }

    #[test]
    fn test_plan_defaults_duration() {
        let json = r#"{"agentId":"01HZX3Q5J8N4Y6M2K7T9V0W1RS","startedOn":"2024-01-08"}"#;
        let plan: ProbationPlan = serde_json::from_str(json).unwrap();
        assert_eq!(plan.duration_months, DEFAULT_PROBATION_MONTHS);
        assert!(plan.months.is_empty());
        assert!(!plan.is_complete());
    }

    #[test]
    fn test_validate_rejects_out_of_sequence() {
        let plan = plan_with(vec![ProbationMonth {
            month_index: 2,
            kpis: vec![ProbationKpi::new("newList", 1.0, 10.0)],
        }]);
        assert_eq!(
            plan.validate(),
            Err(ValidationError::MonthOutOfSequence { month: 2 })
        );
    }

    #[test]
    fn test_validate_rejects_empty_month() {
        let plan = plan_with(vec![ProbationMonth {
            month_index: 1,
            kpis: vec![],
        }]);
        assert_eq!(
            plan.validate(),
            Err(ValidationError::EmptyProbationMonth { month: 1 })
        );
    }

    #[test]
    fn test_validate_rejects_negative_kpi() {
        let plan = plan_with(vec![ProbationMonth {
            month_index: 1,
            kpis: vec![ProbationKpi::new("showings", -2.0, 10.0)],
        }]);
        assert!(matches!(
            plan.validate(),
            Err(ValidationError::NegativeCurrent { .. })
        ));
    }
}
