//! Test fixtures for integration tests.
//!
//! Provides helpers for:
//! - Building tasks and requests tersely
//! - Predefined task sets modeled on a mushroom grow cycle
//! - Timestamp construction

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};

use mycoplan::core::{ScheduledTask, WorkflowRequest, WorkflowTask};

/// Start date used by most tests.
pub const START: &str = "2024-01-01";

/// Create a task with the given duration and dependencies.
pub fn task(id: &str, hours: f64, deps: &[&str]) -> WorkflowTask {
    WorkflowTask::new(id, "check", hours).with_dependencies(deps.iter().copied())
}

/// A request with eight labor hours a day and nothing else.
pub fn request() -> WorkflowRequest {
    WorkflowRequest::new(8.0)
}

/// Wall-clock time on January 2024.
pub fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

/// Find a scheduled task by ID, panicking with a useful message.
pub fn find<'a>(tasks: &'a [ScheduledTask], id: &str) -> &'a ScheduledTask {
    tasks
        .iter()
        .find(|t| t.task_id.as_str() == id)
        .unwrap_or_else(|| panic!("task {} not scheduled", id))
}

/// Create a diamond-shaped task set.
///
/// ```text
///       prep
///      /    \
///  sterilize  hydrate
///      \    /
///     inoculate
/// ```
pub fn diamond() -> Vec<WorkflowTask> {
    vec![
        task("prep", 2.0, &[]),
        task("sterilize", 4.0, &["prep"]),
        task("hydrate", 1.0, &["prep"]),
        task("inoculate", 1.5, &["sterilize", "hydrate"]),
    ]
}

/// A realistic oyster grow cycle with labels, labor and equipment.
pub fn grow_cycle() -> Vec<WorkflowTask> {
    vec![
        WorkflowTask::new("substrate-prep", "substrate_prep", 3.0)
            .with_labor_hours(3.0)
            .with_species("oyster")
            .with_facility("north")
            .with_equipment("mixer"),
        WorkflowTask::new("sterilize", "sterilization", 4.0)
            .with_dependency("substrate-prep")
            .with_labor_hours(1.0)
            .with_species("oyster")
            .with_equipment("autoclave"),
        WorkflowTask::new("inoculate", "inoculation", 2.0)
            .with_dependency("sterilize")
            .with_labor_hours(2.0)
            .with_species("oyster")
            .with_room("lab")
            .with_equipment("flow-hood"),
        WorkflowTask::new("colonize", "colonization", 48.0)
            .with_dependency("inoculate")
            .with_labor_hours(1.0)
            .with_species("oyster")
            .with_room("incubation"),
        WorkflowTask::new("check", "colonization_check", 0.5)
            .with_dependency("colonize")
            .with_labor_hours(0.5)
            .with_species("oyster"),
        WorkflowTask::new("fruit", "fruiting", 24.0)
            .with_dependency("check")
            .with_labor_hours(2.0)
            .with_species("oyster"),
        WorkflowTask::new("harvest", "harvest", 3.0)
            .with_dependency("fruit")
            .with_labor_hours(6.0)
            .with_species("oyster")
            .with_equipment("scale"),
    ]
}

/// Request matching `grow_cycle`.
pub fn grow_request() -> WorkflowRequest {
    WorkflowRequest::new(8.0)
        .with_harvest_target("oyster", 25.0)
        .with_equipment("autoclave")
        .with_equipment("flow-hood")
        .with_equipment("scale")
        .with_time_window(7)
}

/// Independent tasks with no dependencies.
pub fn independent(count: usize, hours: f64) -> Vec<WorkflowTask> {
    (0..count)
        .map(|i| WorkflowTask::new(format!("task-{}", i), "check", hours))
        .collect()
}
