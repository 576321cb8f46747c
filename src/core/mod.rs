//! Core domain models for the scheduling engine.
//!
//! This module contains the task and request types the engine consumes,
//! and the dependency graph that orders tasks.

pub mod dag;
pub mod request;
pub mod task;

pub use dag::{TaskGraph, UnknownReference};
pub use request::{ConstraintSet, HarvestTarget, Prioritization, WorkflowRequest};
pub use task::{ScheduledTask, TaskId, WorkflowTask};
