//! The engine's output record.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::core::task::ScheduledTask;
use crate::error::Result;
use crate::schedule::rooms::distribute_across_rooms;

/// Identifier of a schedule proposal.
///
/// UUIDv7 values are time-ordered, so IDs generated later in the same
/// process compare greater without any shared counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProposalId(pub Uuid);

impl ProposalId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Return first 8 characters of the UUID for display.
    pub fn short(&self) -> String {
        self.0.to_string()[..8].to_string()
    }
}

impl Default for ProposalId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ProposalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ProposalId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A complete, time-sequenced schedule and its derived statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleProposal {
    pub proposal_id: ProposalId,
    pub created_at: DateTime<Utc>,
    /// Tasks in sequence order.
    pub scheduled_tasks: Vec<ScheduledTask>,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub total_days: u32,
    pub estimated_yield_kg: f64,
    pub total_labor_hours: f64,
    pub equipment_utilization: BTreeMap<String, u64>,
    pub rationale: String,
    /// 0 to 100.
    pub confidence: u8,
    pub risk_factors: Vec<String>,
}

impl ScheduleProposal {
    /// Copy of this proposal with unassigned tasks spread across rooms.
    pub fn with_rooms(&self, room_count: usize) -> Result<Self> {
        Ok(Self {
            scheduled_tasks: distribute_across_rooms(&self.scheduled_tasks, room_count)?,
            ..self.clone()
        })
    }

    pub fn task_count(&self) -> usize {
        self.scheduled_tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scheduled_tasks.is_empty()
    }

    pub fn get_task(&self, id: &str) -> Option<&ScheduledTask> {
        self.scheduled_tasks.iter().find(|t| t.task_id.as_str() == id)
    }
}
