//! Schedule construction for ordered workflow tasks.
//!
//! The `Scheduler` drives the pipeline: the time allocator places tasks on
//! a single serial timeline, then metrics, confidence and risk scans are
//! derived from the placed tasks. Room distribution is a separate,
//! optional pass over a finished schedule.

pub mod allocator;
pub mod confidence;
pub mod engine;
pub mod metrics;
pub mod proposal;
pub mod risk;
pub mod rooms;

pub use allocator::{allocate, parse_start_date, timeline_origin};
pub use confidence::{ConfidenceInputs, ConfidenceModel, LaborPressureConfidence};
pub use engine::{create_schedule_proposal, Scheduler};
pub use metrics::ScheduleMetrics;
pub use proposal::{ProposalId, ScheduleProposal};
pub use risk::RiskAnalyzer;
pub use rooms::distribute_across_rooms;
