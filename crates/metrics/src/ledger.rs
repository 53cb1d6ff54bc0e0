//! Action ledger - points earned from logged actions.

use std::collections::{BTreeMap, HashMap};

use brokerdash_core::{ActionKind, ActionRecord, AgentId};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::default_action_points;

/// Action counts and points for one agent in one month.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionSummary {
    /// Number of actions by kind
    pub counts: BTreeMap<ActionKind, usize>,
    /// Points by kind
    pub points_by_kind: BTreeMap<ActionKind, f64>,
    /// All points
    pub total_points: f64,
}

/// In-memory log of actions with a point table.
#[derive(Debug, Clone)]
pub struct ActionLedger {
    points: BTreeMap<ActionKind, f64>,
    entries: Vec<ActionRecord>,
}

impl ActionLedger {
    /// Create an empty ledger using `points` per action kind.
    pub fn new(points: BTreeMap<ActionKind, f64>) -> Self {
        Self {
            points,
            entries: Vec::new(),
        }
    }

    /// Log an action.
    pub fn record(&mut self, action: ActionRecord) {
        self.entries.push(action);
    }

    /// Log many actions.
    pub fn extend(&mut self, actions: impl IntoIterator<Item = ActionRecord>) {
        self.entries.extend(actions);
    }

    /// All logged actions, in logging order.
    pub fn entries(&self) -> &[ActionRecord] {
        &self.entries
    }

    /// Points one action kind is worth.
    pub fn points_for(&self, kind: ActionKind) -> f64 {
        self.points.get(&kind).copied().unwrap_or(0.0)
    }

    /// Summarise `agent_id`'s actions in `year`/`month`.
    pub fn summary(&self, agent_id: AgentId, year: i32, month: u32) -> ActionSummary {
        let mut summary = ActionSummary::default();

        for action in self
            .entries
            .iter()
            .filter(|a| a.agent_id == agent_id && in_month(a.occurred_on, year, month))
        {
            let points = self.points_for(action.kind);
            *summary.counts.entry(action.kind).or_default() += 1;
            *summary.points_by_kind.entry(action.kind).or_default() += points;
            summary.total_points += points;
        }

        summary
    }

    /// Points for `agent_id` in `year`/`month`, ready for a monthly goal.
    pub fn month_points(&self, agent_id: AgentId, year: i32, month: u32) -> f64 {
        self.summary(agent_id, year, month).total_points
    }

    /// Month points for every agent with at least one action in the month.
    pub fn totals_by_agent(&self, year: i32, month: u32) -> BTreeMap<AgentId, f64> {
        let mut totals = BTreeMap::new();
        for action in self
            .entries
            .iter()
            .filter(|a| in_month(a.occurred_on, year, month))
        {
            *totals.entry(action.agent_id).or_insert(0.0) += self.points_for(action.kind);
        }
        totals
    }

    /// Agent display names carried by the recorded actions.
    ///
    /// The latest named entry for an agent wins.
    pub fn agent_names(&self) -> HashMap<AgentId, String> {
        self.entries
            .iter()
            .filter_map(|a| a.agent_name.as_ref().map(|name| (a.agent_id, name.clone())))
            .collect()
    }
}

impl Default for ActionLedger {
    fn default() -> Self {
        Self::new(default_action_points())
    }
}

fn in_month(date: NaiveDate, year: i32, month: u32) -> bool {
    date.year() == year && date.month() == month
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_summary_counts_only_the_month() {
        let agent = AgentId::new();
        let mut ledger = ActionLedger::default();
        ledger.extend([
            ActionRecord::new(agent, ActionKind::NewListing, date(2024, 6, 3)),
            ActionRecord::new(agent, ActionKind::Showing, date(2024, 6, 4)),
            ActionRecord::new(agent, ActionKind::Showing, date(2024, 6, 5)),
            ActionRecord::new(agent, ActionKind::ContractSigned, date(2024, 5, 30)),
        ]);

        let summary = ledger.summary(agent, 2024, 6);
        assert_eq!(summary.counts[&ActionKind::Showing], 2);
        assert_eq!(summary.points_by_kind[&ActionKind::Showing], 40.0);
        assert_eq!(summary.total_points, 140.0);
        assert!(!summary.counts.contains_key(&ActionKind::ContractSigned));
    }

    #[test]
    fn test_other_agents_excluded() {
        let alice = AgentId::new();
        let bob = AgentId::new();
        let mut ledger = ActionLedger::default();
        ledger.record(ActionRecord::new(alice, ActionKind::Referral, date(2024, 6, 1)));
        ledger.record(ActionRecord::new(bob, ActionKind::NewListing, date(2024, 6, 1)));

        assert_eq!(ledger.month_points(alice, 2024, 6), 50.0);

        let totals = ledger.totals_by_agent(2024, 6);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[&bob], 100.0);
    }

    #[test]
    fn test_agent_names_from_records() {
        let alice = AgentId::new();
        let bob = AgentId::new();
        let mut ledger = ActionLedger::default();
        ledger.extend([
            ActionRecord::new(alice, ActionKind::Showing, date(2024, 6, 3)).with_agent_name("Alice"),
            ActionRecord::new(bob, ActionKind::Showing, date(2024, 6, 4)),
        ]);

        let names = ledger.agent_names();
        assert_eq!(names.get(&alice).map(String::as_str), Some("Alice"));
        assert!(!names.contains_key(&bob));
    }

    #[test]
    fn test_unpriced_kind_earns_nothing() {
        let agent = AgentId::new();
        let mut ledger = ActionLedger::new(BTreeMap::from([(ActionKind::Showing, 10.0)]));
        ledger.record(ActionRecord::new(agent, ActionKind::FollowUpCall, date(2024, 6, 1)));

        let summary = ledger.summary(agent, 2024, 6);
        assert_eq!(summary.counts[&ActionKind::FollowUpCall], 1);
        assert_eq!(summary.total_points, 0.0);
    }

    #[test]
    fn test_empty_month() {
        let ledger = ActionLedger::default();
        assert_eq!(ledger.month_points(AgentId::new(), 2024, 6), 0.0);
        assert!(ledger.totals_by_agent(2024, 6).is_empty());
    }
}
