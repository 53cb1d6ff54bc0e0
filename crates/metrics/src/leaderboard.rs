//! Leaderboards.
//!
//! Standings are sorted by value, highest first. Equal values share a rank
//! and the next rank skips ahead (1, 1, 3). Names break ties in ordering only.

use std::cmp::Ordering;
use std::collections::HashMap;

use brokerdash_core::{AgentId, MonthlyGoal};
use serde::{Deserialize, Serialize};

use crate::assessment::Assessment;
use crate::progress::ratio;

/// What a leaderboard ranks by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RankBy {
    /// Composite assessment score
    Score,
    /// Raw goal ratio, over-achievement included
    Ratio,
    /// Action points
    Points,
}

impl RankBy {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            RankBy::Score => "score",
            RankBy::Ratio => "ratio",
            RankBy::Points => "points",
        }
    }
}

/// A value to be ranked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Standing {
    /// Ranked agent
    pub agent_id: AgentId,
    /// Agent display name
    pub name: String,
    /// Ranked value
    pub value: f64,
}

/// A ranked standing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    /// 1-based rank
    pub rank: usize,
    /// Ranked agent
    pub agent_id: AgentId,
    /// Agent display name
    pub name: String,
    /// Ranked value
    pub value: f64,
}

/// A ranked list of agents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leaderboard {
    /// Ranking criterion
    pub rank_by: RankBy,
    /// Entries, best first
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Rank `standings` by value.
    ///
    /// Non-finite values sort last.
    pub fn rank(rank_by: RankBy, mut standings: Vec<Standing>) -> Self {
        standings.sort_by(|a, b| {
            sort_key(b.value)
                .total_cmp(&sort_key(a.value))
                .then_with(|| a.name.cmp(&b.name))
        });

        let mut entries: Vec<LeaderboardEntry> = Vec::with_capacity(standings.len());
        for (position, standing) in standings.into_iter().enumerate() {
            let rank = match entries.last() {
                Some(prev) if same_value(prev.value, standing.value) => prev.rank,
                _ => position + 1,
            };
            entries.push(LeaderboardEntry {
                rank,
                agent_id: standing.agent_id,
                name: standing.name,
                value: standing.value,
            });
        }

        Self { rank_by, entries }
    }

    /// Rank assessments by composite score (unclamped).
    pub fn from_assessments(assessments: &[Assessment]) -> Self {
        let standings = assessments
            .iter()
            .map(|a| Standing {
                agent_id: a.agent_id,
                name: a.name.clone(),
                value: a.score,
            })
            .collect();
        Self::rank(RankBy::Score, standings)
    }

    /// Rank goals by raw ratio of points to target.
    pub fn from_goals(goals: &[MonthlyGoal]) -> Self {
        let standings = goals
            .iter()
            .map(|g| Standing {
                agent_id: g.agent_id,
                name: g.agent_name.clone(),
                value: ratio(g.current_points, g.target_points),
            })
            .collect();
        Self::rank(RankBy::Ratio, standings)
    }

    /// Rank point totals; agents missing from `names` show their id.
    pub fn from_points<'a>(
        totals: impl IntoIterator<Item = (&'a AgentId, &'a f64)>,
        names: &HashMap<AgentId, String>,
    ) -> Self {
        let standings = totals
            .into_iter()
            .map(|(id, points)| Standing {
                agent_id: *id,
                name: names.get(id).cloned().unwrap_or_else(|| id.to_string()),
                value: *points,
            })
            .collect();
        Self::rank(RankBy::Points, standings)
    }

    /// Entry for `agent_id`, if ranked.
    pub fn position_of(&self, agent_id: AgentId) -> Option<&LeaderboardEntry> {
        self.entries.iter().find(|e| e.agent_id == agent_id)
    }

    /// The first `n` entries.
    pub fn top(&self, n: usize) -> &[LeaderboardEntry] {
        &self.entries[..n.min(self.entries.len())]
    }
}

fn sort_key(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        f64::NEG_INFINITY
    }
}

fn same_value(a: f64, b: f64) -> bool {
    sort_key(a).partial_cmp(&sort_key(b)) == Some(Ordering::Equal)
}
