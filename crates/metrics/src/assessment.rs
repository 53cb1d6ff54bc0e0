//! Team-member assessment.

use brokerdash_core::{AgentId, PerformanceRecord};
use serde::{Deserialize, Serialize};

use crate::profile::{metric_ids, MetricInput, ScoreProfile};
use crate::score::WeightedScoreCalculator;

/// Letter grade for a display score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    /// 90 and above
    S,
    /// 80 to 89
    A,
    /// 70 to 79
    B,
    /// 60 to 69
    C,
    /// Below 60
    D,
}

impl Grade {
    /// Grade for a 0-100 score.
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 90.0 => Grade::S,
            s if s >= 80.0 => Grade::A,
            s if s >= 70.0 => Grade::B,
            s if s >= 60.0 => Grade::C,
            _ => Grade::D,
        }
    }

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::S => "S",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
        }
    }
}

/// What one metric added to a composite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentScore {
    /// Metric id
    pub id: String,
    /// Weight from the profile
    pub weight: f64,
    /// Points added to the composite (unrounded)
    pub contribution: f64,
}

/// Assessment of one team member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    /// Assessed agent
    pub agent_id: AgentId,
    /// Agent display name
    pub name: String,
    /// Composite score; may exceed 100
    pub score: f64,
    /// Composite clamped to 100 for display
    pub display_score: f64,
    /// Grade of the display score
    pub grade: Grade,
    /// Per-metric breakdown
    pub components: Vec<ComponentScore>,
}

/// Scores performance records with a weight table.
#[derive(Debug, Clone)]
pub struct AssessmentService {
    profile: ScoreProfile,
}

impl AssessmentService {
    /// Create a service using `profile`.
    ///
    /// The profile should carry the sales-performance metric ids; others
    /// score zero.
    pub fn new(profile: ScoreProfile) -> Self {
        Self { profile }
    }

    /// Profile in use.
    pub fn profile(&self) -> &ScoreProfile {
        &self.profile
    }

    /// Assess one record.
    pub fn assess(&self, record: &PerformanceRecord) -> Assessment {
        let inputs = [
            MetricInput::new(metric_ids::CONVERSION, record.conversion_rate),
            MetricInput::with_max(metric_ids::SALES, record.sales_volume, record.sales_target),
            MetricInput::new(metric_ids::BUYER_SATISFACTION, record.buyer_satisfaction),
            MetricInput::new(metric_ids::OWNER_SATISFACTION, record.owner_satisfaction),
        ];
        let components = self.profile.components(&inputs);

        let calculator = WeightedScoreCalculator;
        let score = calculator.score(&components);
        let display_score = score.clamp(0.0, 100.0);

        let breakdown = self
            .profile
            .metrics
            .iter()
            .zip(&components)
            .map(|(metric, component)| ComponentScore {
                id: metric.id.clone(),
                weight: metric.weight,
                contribution: calculator.contribution(component),
            })
            .collect();

        Assessment {
            agent_id: record.agent_id,
            name: record.name.clone(),
            score,
            display_score,
            grade: Grade::from_score(display_score),
            components: breakdown,
        }
    }

    /// Assess every record, keeping input order.
    pub fn assess_all(&self, records: &[PerformanceRecord]) -> Vec<Assessment> {
        records.iter().map(|r| self.assess(r)).collect()
    }
}

impl Default for AssessmentService {
    fn default() -> Self {
        Self::new(ScoreProfile::sales_performance())
    }
}
