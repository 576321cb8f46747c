//! Schedule-level statistics.

use chrono::NaiveDateTime;
use std::collections::BTreeMap;

use crate::core::request::WorkflowRequest;
use crate::core::task::ScheduledTask;

const MS_PER_DAY: f64 = 86_400_000.0;

/// Aggregates derived from a scheduled task list.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleMetrics {
    /// Whole days from the first start to the last end, rounded up.
    pub total_days: u32,
    pub total_labor_hours: f64,
    /// Planning estimate from the request's harvest targets.
    pub estimated_yield_kg: f64,
    /// Equipment ID to integer percent of working hours occupied.
    pub equipment_utilization: BTreeMap<String, u64>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl ScheduleMetrics {
    /// Compute metrics for `tasks`, which must be in sequence order.
    ///
    /// `origin` is reported as both start and end when `tasks` is empty.
    pub fn calculate(
        tasks: &[ScheduledTask],
        request: &WorkflowRequest,
        working_hours_per_day: f64,
        origin: NaiveDateTime,
    ) -> Self {
        let (start, end) = match (tasks.first(), tasks.last()) {
            (Some(first), Some(last)) => (first.scheduled_start, last.scheduled_end),
            _ => (origin, origin),
        };
        let total_days = span_days(start, end);
        let total_labor_hours = tasks.iter().map(|t| t.assigned_labor).sum();

        Self {
            total_days,
            total_labor_hours,
            estimated_yield_kg: request.total_target_yield_kg(),
            equipment_utilization: equipment_utilization(
                tasks,
                &request.constraint_set.equipment_available,
                total_days,
                working_hours_per_day,
            ),
            start,
            end,
        }
    }
}

fn span_days(start: NaiveDateTime, end: NaiveDateTime) -> u32 {
    let millis = (end - start).num_milliseconds();
    if millis <= 0 {
        return 0;
    }
    (millis as f64 / MS_PER_DAY).ceil() as u32
}

/// Labor hours on tasks using each equipment item over the available
/// working hours of the span. A zero-day span reports 0.
pub fn equipment_utilization(
    tasks: &[ScheduledTask],
    equipment_available: &[String],
    total_days: u32,
    working_hours_per_day: f64,
) -> BTreeMap<String, u64> {
    let capacity = f64::from(total_days) * working_hours_per_day;

    equipment_available
        .iter()
        .map(|equipment| {
            let busy: f64 = tasks
                .iter()
                .filter(|t| t.uses_equipment(equipment))
                .map(|t| t.assigned_labor)
                .sum();
            let percent = if capacity > 0.0 {
                (busy / capacity * 100.0).round().max(0.0) as u64
            } else {
                0
            };
            (equipment.clone(), percent)
        })
        .collect()
}
