//! Scheduling pipeline.
//!
//! Graph build, topological sequencing, time allocation, metrics and risk
//! analysis run in that order and produce one `ScheduleProposal`. Every
//! stage finishes before the next begins and nothing blocks on I/O.

use chrono::{NaiveDate, NaiveDateTime, Utc};

use crate::config::Config;
use crate::core::dag::TaskGraph;
use crate::core::request::WorkflowRequest;
use crate::core::task::{ScheduledTask, WorkflowTask};
use crate::error::Result;
use crate::schedule::allocator::{allocate, parse_start_date, timeline_origin};
use crate::schedule::confidence::{ConfidenceInputs, ConfidenceModel, LaborPressureConfidence};
use crate::schedule::metrics::ScheduleMetrics;
use crate::schedule::proposal::{ProposalId, ScheduleProposal};
use crate::schedule::risk::RiskAnalyzer;
use crate::{mlog, mlog_debug};

/// Turns task lists into schedule proposals.
///
/// Holds no per-call state, so one instance can serve many threads.
pub struct Scheduler {
    config: Config,
    confidence: Box<dyn ConfidenceModel>,
}

impl Scheduler {
    /// Create a scheduler with the default confidence model.
    ///
    /// # Errors
    /// Returns `Error::Validation` if the configuration is unusable.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            confidence: Box::new(LaborPressureConfidence::default()),
        })
    }

    /// Replace the confidence strategy.
    pub fn with_confidence_model(mut self, model: impl ConfidenceModel + 'static) -> Self {
        self.confidence = Box::new(model);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn confidence_model(&self) -> &dyn ConfidenceModel {
        self.confidence.as_ref()
    }

    /// Validate the task list and return it in scheduling order.
    pub fn sequence<'a>(&self, tasks: &'a [WorkflowTask]) -> Result<Vec<&'a WorkflowTask>> {
        let graph = TaskGraph::build(tasks, self.config.unknown_dependencies)?;
        graph.topological_order()
    }

    /// Build a schedule proposal starting on `start_date` (ISO date).
    ///
    /// # Errors
    /// Returns an error if the start date cannot be parsed, a task is
    /// invalid or duplicated, the dependencies form a cycle, or an unknown
    /// dependency is found under the `reject` policy.
    pub fn create_schedule_proposal(
        &self,
        tasks: &[WorkflowTask],
        request: &WorkflowRequest,
        start_date: &str,
    ) -> Result<ScheduleProposal> {
        let date = parse_start_date(start_date)?;
        self.create_schedule_proposal_on(tasks, request, date)
    }

    /// Same as `create_schedule_proposal` with an already-parsed date.
    pub fn create_schedule_proposal_on(
        &self,
        tasks: &[WorkflowTask],
        request: &WorkflowRequest,
        start_date: NaiveDate,
    ) -> Result<ScheduleProposal> {
        let origin = timeline_origin(start_date, self.config.day_start_hour)?;
        let order = self.sequence(tasks)?;
        let scheduled = allocate(&order, origin)?;

        let metrics = ScheduleMetrics::calculate(
            &scheduled,
            request,
            self.config.working_hours_per_day,
            origin,
        );
        let confidence = self.confidence.score(&ConfidenceInputs {
            scheduled_tasks: &scheduled,
            request,
            total_labor_hours: metrics.total_labor_hours,
            total_days: metrics.total_days,
        });
        let risk_factors = RiskAnalyzer::from_config(&self.config).analyze(&scheduled, request);
        let rationale = rationale(&scheduled, request, &metrics, origin);

        let proposal = ScheduleProposal {
            proposal_id: ProposalId::new(),
            created_at: Utc::now(),
            start_date: metrics.start,
            end_date: metrics.end,
            total_days: metrics.total_days,
            estimated_yield_kg: metrics.estimated_yield_kg,
            total_labor_hours: metrics.total_labor_hours,
            equipment_utilization: metrics.equipment_utilization,
            rationale,
            confidence,
            risk_factors,
            scheduled_tasks: scheduled,
        };

        mlog_debug!(
            "Confidence model {} scored {}",
            self.confidence.name(),
            proposal.confidence
        );
        mlog!(
            "Proposal {} created: tasks={}, days={}, labor={:.1}h, confidence={}, risks={}",
            proposal.proposal_id.short(),
            proposal.task_count(),
            proposal.total_days,
            proposal.total_labor_hours,
            proposal.confidence,
            proposal.risk_factors.len()
        );

        Ok(proposal)
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self {
            config: Config::default(),
            confidence: Box::new(LaborPressureConfidence::default()),
        }
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("config", &self.config)
            .field("confidence", &self.confidence.name())
            .finish()
    }
}

/// Build a proposal with the default configuration.
pub fn create_schedule_proposal(
    tasks: &[WorkflowTask],
    request: &WorkflowRequest,
    start_date: &str,
) -> Result<ScheduleProposal> {
    Scheduler::default().create_schedule_proposal(tasks, request, start_date)
}

fn rationale(
    scheduled: &[ScheduledTask],
    request: &WorkflowRequest,
    metrics: &ScheduleMetrics,
    origin: NaiveDateTime,
) -> String {
    if scheduled.is_empty() {
        return format!("No tasks to schedule; empty plan anchored at {}.", origin);
    }

    let mut parts = vec![
        format!(
            "Scheduled {} tasks in dependency order on a single timeline over {} day(s) starting {}.",
            scheduled.len(),
            metrics.total_days,
            metrics.start
        ),
        format!(
            "Modeled labor is {:.1} hours against {:.1} hours available per day.",
            metrics.total_labor_hours, request.constraint_set.labor_hours_available
        ),
        format!(
            "Estimated yield is {:.1} kg across {} harvest target(s).",
            metrics.estimated_yield_kg,
            request.harvest_targets.len()
        ),
    ];

    let window = request.time_window_days;
    if window > 0 {
        if metrics.total_days <= window {
            parts.push(format!("Fits within the requested {}-day window.", window));
        } else {
            parts.push(format!(
                "Exceeds the requested {}-day window by {} day(s).",
                window,
                metrics.total_days - window
            ));
        }
    }

    let priorities = request.prioritization.active();
    if !priorities.is_empty() {
        parts.push(format!("Prioritizing {}.", priorities.join(", ")));
    }

    parts.join(" ")
}
