pub mod config;
pub mod error;
pub mod log;

// Scheduling engine
pub mod core;
pub mod schedule;

pub use config::{Config, UnknownDependencyPolicy};
pub use core::{ScheduledTask, TaskId, WorkflowRequest, WorkflowTask};
pub use error::{Error, Result};
pub use schedule::{
    create_schedule_proposal, distribute_across_rooms, ScheduleProposal, Scheduler,
};
