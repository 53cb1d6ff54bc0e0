//! Action log model - the daily activities agents record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::AgentId;

/// Kinds of sales activity an agent can log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionKind {
    /// A new property listing taken
    NewListing,
    /// A property showing
    Showing,
    /// Consultation with a buyer
    BuyerConsultation,
    /// Consultation with an owner
    OwnerConsultation,
    /// A signed sales or lease contract
    ContractSigned,
    /// A referral received
    Referral,
    /// A follow-up call
    FollowUpCall,
}

impl ActionKind {
    /// Every kind, in display order.
    pub const ALL: [ActionKind; 7] = [
        ActionKind::NewListing,
        ActionKind::Showing,
        ActionKind::BuyerConsultation,
        ActionKind::OwnerConsultation,
        ActionKind::ContractSigned,
        ActionKind::Referral,
        ActionKind::FollowUpCall,
    ];

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::NewListing => "newListing",
            ActionKind::Showing => "showing",
            ActionKind::BuyerConsultation => "buyerConsultation",
            ActionKind::OwnerConsultation => "ownerConsultation",
            ActionKind::ContractSigned => "contractSigned",
            ActionKind::Referral => "referral",
            ActionKind::FollowUpCall => "followUpCall",
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ActionKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValidationError::UnknownActionKind(s.to_string()))
    }
}

/// A single logged action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRecord {
    /// Who performed it
    pub agent_id: AgentId,

    /// Display name of the agent, when the log carries one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_name: Option<String>,

    /// What was done
    pub kind: ActionKind,

    /// Day it happened
    pub occurred_on: NaiveDate,

    /// Free-form note
    #[serde(default)]
    pub note: String,
}

impl ActionRecord {
    /// Create a new record without a note.
    pub fn new(agent_id: AgentId, kind: ActionKind, occurred_on: NaiveDate) -> Self {
        Self {
            agent_id,
            agent_name: None,
            kind,
            occurred_on,
            note: String::new(),
        }
    }

    /// Attach the agent's display name.
    pub fn with_agent_name(mut self, name: impl Into<String>) -> Self {
        self.agent_name = Some(name.into());
        self
    }
}
