//! Dashboard configuration.
//!
//! Weight tables, action point values, and probation thresholds live here
//! as data. [`DashboardConfig::default`] carries the built-in tables; a JSON
//! file may override any part of them. Action points and threshold fields
//! are merged over the built-ins key by key, while a `profiles` list replaces
//! the built-in profiles.

use std::collections::BTreeMap;
use std::path::Path;

use brokerdash_core::ActionKind;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

use crate::error::{ConfigError, Result};
use crate::profile::ScoreProfile;

/// Thresholds for probation reviews, in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProbationThresholds {
    /// KPI percentage a month needs on every KPI to pass
    pub pass_percentage: f64,

    /// Month score below which an ongoing probation is at risk
    pub at_risk_percentage: f64,
}

impl Default for ProbationThresholds {
    fn default() -> Self {
        Self {
            pass_percentage: 100.0,
            at_risk_percentage: 60.0,
        }
    }
}

impl ProbationThresholds {
    /// Check both percentages lie in [0, 100].
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("passPercentage", self.pass_percentage),
            ("atRiskPercentage", self.at_risk_percentage),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(ConfigError::InvalidThresholds(format!(
                    "{} must be within 0-100, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Points earned per logged action.
pub fn default_action_points() -> BTreeMap<ActionKind, f64> {
    BTreeMap::from([
        (ActionKind::NewListing, 100.0),
        (ActionKind::Showing, 20.0),
        (ActionKind::BuyerConsultation, 30.0),
        (ActionKind::OwnerConsultation, 30.0),
        (ActionKind::ContractSigned, 300.0),
        (ActionKind::Referral, 50.0),
        (ActionKind::FollowUpCall, 5.0),
    ])
}

/// Complete dashboard configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardConfig {
    /// Score weight tables
    pub profiles: Vec<ScoreProfile>,

    /// Points per action kind
    #[serde(deserialize_with = "merge_action_points")]
    pub action_points: BTreeMap<ActionKind, f64>,

    /// Probation review thresholds
    pub probation: ProbationThresholds,
}

fn merge_action_points<'de, D>(
    deserializer: D,
) -> std::result::Result<BTreeMap<ActionKind, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let overrides = BTreeMap::<ActionKind, f64>::deserialize(deserializer)?;
    let mut points = default_action_points();
    points.extend(overrides);
    Ok(points)
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            profiles: vec![ScoreProfile::sales_performance()],
            action_points: default_action_points(),
            probation: ProbationThresholds::default(),
        }
    }
}

impl DashboardConfig {
    /// Parse and validate a JSON configuration.
    ///
    /// Omitted sections keep their built-in values.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading dashboard config from {}", path.display());
        let content = tokio::fs::read_to_string(path).await?;
        Self::from_json_str(&content)
    }

    /// Validate every section.
    ///
    /// Unbalanced weight tables are logged, not rejected.
    pub fn validate(&self) -> Result<()> {
        for profile in &self.profiles {
            profile.validate()?;
            if !profile.is_balanced() {
                warn!(
                    "Score profile '{}' weights sum to {:.3}, scores will not be on a 0-100 scale",
                    profile.name,
                    profile.weight_sum()
                );
            }
        }

        for (kind, points) in &self.action_points {
            if !points.is_finite() || *points < 0.0 {
                return Err(ConfigError::InvalidActionPoints(format!(
                    "action '{}' has invalid points {}",
                    kind, points
                )));
            }
        }

        self.probation.validate()
    }

    /// Look up a score profile by name.
    pub fn profile(&self, name: &str) -> Result<&ScoreProfile> {
        self.profiles
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| ConfigError::UnknownProfile(name.to_string()))
    }

    /// Points for one action; kinds missing from the table earn nothing.
    pub fn points_for(&self, kind: ActionKind) -> f64 {
        self.action_points.get(&kind).copied().unwrap_or(0.0)
    }
}
