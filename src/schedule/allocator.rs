//! Time allocation on a single shared timeline.
//!
//! One cursor walks the topological order. A task starts at the later of
//! the cursor and its latest-finishing scheduled dependency, and the cursor
//! always moves to the task's end. Two tasks never overlap, whatever their
//! room, facility or equipment labels say.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};
use std::collections::HashMap;

use crate::core::task::{ScheduledTask, WorkflowTask};
use crate::error::{Error, Result};
use crate::mlog_trace;

/// Parse a caller-supplied start date.
///
/// Accepts `YYYY-MM-DD`, or an ISO / RFC 3339 date-time whose date portion
/// is used.
pub fn parse_start_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(datetime.date_naive());
    }
    if let Ok(datetime) = trimmed.parse::<NaiveDateTime>() {
        return Ok(datetime.date());
    }
    Err(Error::InvalidStartDate(input.to_string()))
}

/// Cursor origin: `day_start_hour`:00 on the start date.
pub fn timeline_origin(date: NaiveDate, day_start_hour: u32) -> Result<NaiveDateTime> {
    date.and_hms_opt(day_start_hour, 0, 0).ok_or_else(|| {
        Error::Validation(format!("Invalid day start hour {}", day_start_hour))
    })
}

pub(crate) fn hours(value: f64) -> Duration {
    Duration::milliseconds((value * 3_600_000.0).round() as i64)
}

/// Assign start and end times to tasks already in topological order.
///
/// Dependencies that were never scheduled (unknown IDs) are ignored.
///
/// # Errors
/// Returns `Error::Validation` if an end time falls outside the
/// representable date range.
pub fn allocate(order: &[&WorkflowTask], origin: NaiveDateTime) -> Result<Vec<ScheduledTask>> {
    let mut cursor = origin;
    let mut ends: HashMap<&str, NaiveDateTime> = HashMap::with_capacity(order.len());
    let mut scheduled = Vec::with_capacity(order.len());

    for (position, task) in order.iter().copied().enumerate() {
        let dependencies_done = task
            .depends_on
            .iter()
            .filter_map(|dependency| ends.get(dependency.as_str()))
            .max()
            .copied();
        let start = match dependencies_done {
            Some(done) if done > cursor => done,
            _ => cursor,
        };
        let end = start
            .checked_add_signed(hours(task.duration_hours))
            .ok_or_else(|| {
                Error::Validation(format!(
                    "Task {} ends outside the representable date range",
                    task.task_id
                ))
            })?;

        mlog_trace!(
            "Allocated #{} {} {} -> {}",
            position + 1,
            task.task_id,
            start,
            end
        );

        ends.insert(task.task_id.as_str(), end);
        scheduled.push(ScheduledTask::from_task(task, start, end, position + 1));
        cursor = end;
    }

    Ok(scheduled)
}
