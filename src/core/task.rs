//! Task data model for the scheduling engine.
//!
//! `WorkflowTask` is the caller-owned description of a unit of cultivation
//! work. `ScheduledTask` is the engine's projection of one task onto the
//! shared timeline.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Identifier of a workflow task, as supplied by the workflow generator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for TaskId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::borrow::Borrow<str> for TaskId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A single unit of cultivation work.
///
/// Tasks are immutable input to the scheduler. `dependsOn` keeps the
/// declared order because the sequencer visits dependencies in that order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowTask {
    pub task_id: TaskId,
    /// Kind of work, e.g. "inoculation" or "colonization_check".
    #[serde(rename = "type")]
    pub task_type: String,
    pub duration_hours: f64,
    #[serde(default)]
    pub depends_on: Vec<TaskId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facility: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
    #[serde(default)]
    pub labor_hours: f64,
    #[serde(default)]
    pub equipment: Vec<String>,
}

impl WorkflowTask {
    /// Create a task with no dependencies, labels, labor or equipment.
    pub fn new(task_id: impl Into<TaskId>, task_type: &str, duration_hours: f64) -> Self {
        Self {
            task_id: task_id.into(),
            task_type: task_type.to_string(),
            duration_hours,
            depends_on: Vec::new(),
            room: None,
            facility: None,
            species: None,
            labor_hours: 0.0,
            equipment: Vec::new(),
        }
    }

    pub fn with_dependency(mut self, id: impl Into<TaskId>) -> Self {
        self.depends_on.push(id.into());
        self
    }

    pub fn with_dependencies<I, T>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TaskId>,
    {
        self.depends_on.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn with_room(mut self, room: &str) -> Self {
        self.room = Some(room.to_string());
        self
    }

    pub fn with_facility(mut self, facility: &str) -> Self {
        self.facility = Some(facility.to_string());
        self
    }

    pub fn with_species(mut self, species: &str) -> Self {
        self.species = Some(species.to_string());
        self
    }

    pub fn with_labor_hours(mut self, hours: f64) -> Self {
        self.labor_hours = hours;
        self
    }

    pub fn with_equipment(mut self, equipment: &str) -> Self {
        self.equipment.push(equipment.to_string());
        self
    }

    /// Check the numeric fields the time allocator relies on.
    ///
    /// # Errors
    /// Returns `Error::Validation` for a non-positive or non-finite duration,
    /// or negative / non-finite labor hours.
    pub fn validate(&self) -> Result<()> {
        if !self.duration_hours.is_finite() || self.duration_hours <= 0.0 {
            return Err(Error::Validation(format!(
                "Task {} has non-positive duration {}",
                self.task_id, self.duration_hours
            )));
        }
        if !self.labor_hours.is_finite() || self.labor_hours < 0.0 {
            return Err(Error::Validation(format!(
                "Task {} has invalid labor hours {}",
                self.task_id, self.labor_hours
            )));
        }
        Ok(())
    }

    /// Species label, ignoring blank values.
    pub fn species_label(&self) -> Option<&str> {
        non_blank(self.species.as_deref())
    }
}

/// A task placed on the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledTask {
    pub task_id: TaskId,
    #[serde(rename = "type")]
    pub task_type: String,
    pub duration_hours: f64,
    #[serde(default)]
    pub depends_on: Vec<TaskId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facility: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
    #[serde(default)]
    pub equipment: Vec<String>,
    /// Labor hours carried over from the task's `laborHours`.
    pub assigned_labor: f64,
    pub scheduled_start: NaiveDateTime,
    pub scheduled_end: NaiveDateTime,
    /// 1-based position in the processed order.
    pub sequence_order: usize,
}

impl ScheduledTask {
    pub fn from_task(
        task: &WorkflowTask,
        scheduled_start: NaiveDateTime,
        scheduled_end: NaiveDateTime,
        sequence_order: usize,
    ) -> Self {
        Self {
            task_id: task.task_id.clone(),
            task_type: task.task_type.clone(),
            duration_hours: task.duration_hours,
            depends_on: task.depends_on.clone(),
            room: task.room.clone(),
            facility: task.facility.clone(),
            species: task.species.clone(),
            equipment: task.equipment.clone(),
            assigned_labor: task.labor_hours,
            scheduled_start,
            scheduled_end,
            sequence_order,
        }
    }

    /// Calendar day the task starts on; risk scans bucket by this.
    pub fn scheduled_day(&self) -> NaiveDate {
        self.scheduled_start.date()
    }

    pub fn species_label(&self) -> Option<&str> {
        non_blank(self.species.as_deref())
    }

    /// Whether a non-blank room label is present.
    pub fn has_room(&self) -> bool {
        non_blank(self.room.as_deref()).is_some()
    }

    pub fn uses_equipment(&self, equipment: &str) -> bool {
        self.equipment.iter().any(|e| e == equipment)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
