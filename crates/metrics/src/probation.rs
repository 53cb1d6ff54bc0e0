//! Probation reviews.
//!
//! Each recorded month is scored from its KPIs; the plan as a whole is
//! on track, at risk, passed, or failed depending on those month results.

use brokerdash_core::{AgentId, ProbationMonth, ProbationPlan, WeightedComponent};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ProbationThresholds;
use crate::progress::ProgressCalculator;
use crate::score::WeightedScoreCalculator;

/// Overall state of a probation plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProbationStatus {
    /// Ongoing, no month below the at-risk line
    OnTrack,
    /// Ongoing, at least one month below the at-risk line
    AtRisk,
    /// Every month of the period passed
    Passed,
    /// Period finished with a failed month
    Failed,
}

impl ProbationStatus {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProbationStatus::OnTrack => "OnTrack",
            ProbationStatus::AtRisk => "AtRisk",
            ProbationStatus::Passed => "Passed",
            ProbationStatus::Failed => "Failed",
        }
    }
}

/// Result for one KPI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiResult {
    /// KPI name
    pub name: String,
    /// Display percentage (0-100)
    pub percentage: f64,
    /// Unclamped ratio of current to target
    pub ratio: f64,
    /// Whether the pass threshold was reached
    pub met: bool,
}

/// Result for one probation month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthReview {
    /// 1-based month index
    pub month_index: u32,
    /// Per-KPI results
    pub kpis: Vec<KpiResult>,
    /// Equal-weight score of the clamped KPI percentages
    pub score: f64,
    /// Every KPI met
    pub passed: bool,
}

/// Review of a whole plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbationReview {
    /// Agent on probation
    pub agent_id: AgentId,
    /// Agent display name
    pub name: String,
    /// Last recorded month, 0 when none
    pub current_month: u32,
    /// Length of the period
    pub duration_months: u32,
    /// Per-month results
    pub months: Vec<MonthReview>,
    /// Mean month score, rounded
    pub overall_percentage: f64,
    /// Overall state
    pub status: ProbationStatus,
}

/// Scores probation plans against configured thresholds.
#[derive(Debug, Clone, Default)]
pub struct ProbationEvaluator {
    thresholds: ProbationThresholds,
}

impl ProbationEvaluator {
    /// Create an evaluator with the given thresholds.
    pub fn new(thresholds: ProbationThresholds) -> Self {
        Self { thresholds }
    }

    /// Thresholds in use.
    pub fn thresholds(&self) -> &ProbationThresholds {
        &self.thresholds
    }

    /// Score one month.
    pub fn review_month(&self, month: &ProbationMonth) -> MonthReview {
        let progress = ProgressCalculator;

        let kpis: Vec<KpiResult> = month
            .kpis
            .iter()
            .map(|kpi| {
                let percentage = progress.percentage(kpi.sample.current, kpi.sample.target);
                KpiResult {
                    name: kpi.name.clone(),
                    percentage,
                    ratio: progress.ratio(kpi.sample.current, kpi.sample.target),
                    met: percentage >= self.thresholds.pass_percentage,
                }
            })
            .collect();

        let weight = if kpis.is_empty() {
            0.0
        } else {
            1.0 / kpis.len() as f64
        };
        let components: Vec<WeightedComponent> = kpis
            .iter()
            .map(|kpi| WeightedComponent::new(kpi.percentage, 100.0, weight))
            .collect();
        let score = WeightedScoreCalculator.score(&components);

        MonthReview {
            month_index: month.month_index,
            passed: !kpis.is_empty() && kpis.iter().all(|k| k.met),
            kpis,
            score,
        }
    }

    /// Review every recorded month and derive the plan status.
    pub fn review(&self, plan: &ProbationPlan) -> ProbationReview {
        let months: Vec<MonthReview> = plan.months.iter().map(|m| self.review_month(m)).collect();

        let overall_percentage = if months.is_empty() {
            0.0
        } else {
            (months.iter().map(|m| m.score).sum::<f64>() / months.len() as f64).round()
        };

        let status = if plan.is_complete() {
            if months.iter().all(|m| m.passed) {
                ProbationStatus::Passed
            } else {
                ProbationStatus::Failed
            }
        } else if months
            .iter()
            .any(|m| m.score < self.thresholds.at_risk_percentage)
        {
            ProbationStatus::AtRisk
        } else {
            ProbationStatus::OnTrack
        };

        debug!(
            "Probation review for {}: {} of {} months, {}",
            plan.agent_id,
            months.len(),
            plan.duration_months,
            status.as_str()
        );

        ProbationReview {
            agent_id: plan.agent_id,
            name: plan.name.clone(),
            current_month: months.last().map(|m| m.month_index).unwrap_or(0),
            duration_months: plan.duration_months,
            months,
            overall_percentage,
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brokerdash_core::ProbationKpi;
    use chrono::NaiveDate;

    fn month(index: u32, kpis: &[(&str, f64, f64)]) -> ProbationMonth {
        ProbationMonth {
            month_index: index,
            kpis: kpis
                .iter()
                .map(|(name, current, target)| ProbationKpi::new(*name, *current, *target))
                .collect(),
        }
    }

    fn plan(months: Vec<ProbationMonth>) -> ProbationPlan {
        let mut plan = ProbationPlan::new(
            AgentId::new(),
            NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
        );
        plan.months = months;
        plan
    }

    #[test]
    fn test_new_list_half_way() {
        let evaluator = ProbationEvaluator::default();
        let review = evaluator.review_month(&month(1, &[("newList", 5.0, 10.0)]));

        assert_eq!(review.kpis[0].percentage, 50.0);
        assert_eq!(review.score, 50.0);
        assert!(!review.passed);
    }

    #[test]
    fn test_month_score_is_mean_of_clamped_kpis() {
        let evaluator = ProbationEvaluator::default();
        let review = evaluator.review_month(&month(
            1,
            &[("newList", 20.0, 10.0), ("showings", 15.0, 30.0)],
        ));

        assert_eq!(review.kpis[0].percentage, 100.0);
        assert_eq!(review.kpis[0].ratio, 2.0);
        assert_eq!(review.score, 75.0);
    }

    #[test]
    fn test_month_passes_when_all_kpis_met() {
        let evaluator = ProbationEvaluator::default();
        let review = evaluator.review_month(&month(
            1,
            &[("newList", 10.0, 10.0), ("showings", 31.0, 30.0)],
        ));
        assert!(review.passed);
    }

    #[test]
    fn test_empty_plan_is_on_track() {
        let review = ProbationEvaluator::default().review(&plan(vec![]));
        assert_eq!(review.status, ProbationStatus::OnTrack);
        assert_eq!(review.current_month, 0);
        assert_eq!(review.overall_percentage, 0.0);
    }

    #[test]
    fn test_low_month_is_at_risk() {
        let review = ProbationEvaluator::default().review(&plan(vec![
            month(1, &[("newList", 8.0, 10.0)]),
            month(2, &[("newList", 3.0, 10.0)]),
        ]));
        assert_eq!(review.status, ProbationStatus::AtRisk);
        assert_eq!(review.current_month, 2);
        assert_eq!(review.overall_percentage, 55.0);
    }

    #[test]
    fn test_completed_plan_passes_or_fails() {
        let evaluator = ProbationEvaluator::default();
        let full = |second: f64| {
            plan(vec![
                month(1, &[("newList", 10.0, 10.0)]),
                month(2, &[("newList", second, 10.0)]),
                month(3, &[("newList", 12.0, 10.0)]),
            ])
        };

        assert_eq!(evaluator.review(&full(10.0)).status, ProbationStatus::Passed);
        assert_eq!(evaluator.review(&full(9.0)).status, ProbationStatus::Failed);
    }

    #[test]
    fn test_custom_pass_threshold() {
        let evaluator = ProbationEvaluator::new(ProbationThresholds {
            pass_percentage: 80.0,
            ..Default::default()
        });
        let review = evaluator.review_month(&month(1, &[("newList", 8.0, 10.0)]));
        assert!(review.passed);
    }
}
