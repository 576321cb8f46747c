//! Round-robin room assignment.

use crate::core::task::ScheduledTask;
use crate::error::{Error, Result};
use crate::mlog_debug;

/// Give every task without a room `room-{(index % room_count) + 1}`.
///
/// `index` is the task's position in `tasks`, not its sequence order.
/// Capacity, duration and overlap are not considered. Returns a new list
/// and leaves `tasks` untouched.
///
/// # Errors
/// Returns `Error::Validation` when `room_count` is zero.
pub fn distribute_across_rooms(
    tasks: &[ScheduledTask],
    room_count: usize,
) -> Result<Vec<ScheduledTask>> {
    if room_count == 0 {
        return Err(Error::Validation(
            "Room count must be at least 1".to_string(),
        ));
    }

    let mut assigned = 0;
    let distributed = tasks
        .iter()
        .enumerate()
        .map(|(index, task)| {
            let mut task = task.clone();
            if !task.has_room() {
                task.room = Some(format!("room-{}", index % room_count + 1));
                assigned += 1;
            }
            task
        })
        .collect();

    mlog_debug!(
        "Distributed {} of {} tasks across {} rooms",
        assigned,
        tasks.len(),
        room_count
    );
    Ok(distributed)
}
