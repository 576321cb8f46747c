//! Confidence scoring strategies.

use crate::core::request::WorkflowRequest;
use crate::core::task::ScheduledTask;

/// Everything a confidence model may look at.
#[derive(Debug, Clone, Copy)]
pub struct ConfidenceInputs<'a> {
    pub scheduled_tasks: &'a [ScheduledTask],
    pub request: &'a WorkflowRequest,
    pub total_labor_hours: f64,
    pub total_days: u32,
}

/// A swappable confidence heuristic producing a score in `0..=100`.
pub trait ConfidenceModel: Send + Sync {
    fn name(&self) -> &'static str;

    fn score(&self, inputs: &ConfidenceInputs<'_>) -> u8;
}

/// Flat baseline, penalized once when modeled labor outruns availability.
///
/// The default is `min(100, 85 - 15 * [labor / available > 1.2])`.
#[derive(Debug, Clone, PartialEq)]
pub struct LaborPressureConfidence {
    pub baseline: u8,
    pub penalty: u8,
    /// Labor-to-availability ratio above which the penalty applies.
    pub pressure_threshold: f64,
}

impl Default for LaborPressureConfidence {
    fn default() -> Self {
        Self {
            baseline: 85,
            penalty: 15,
            pressure_threshold: 1.2,
        }
    }
}

impl LaborPressureConfidence {
    /// Ratio of modeled labor to daily availability.
    ///
    /// Zero availability with positive labor is unbounded pressure.
    pub fn pressure(total_labor_hours: f64, labor_hours_available: f64) -> f64 {
        if labor_hours_available > 0.0 {
            total_labor_hours / labor_hours_available
        } else if total_labor_hours > 0.0 {
            f64::INFINITY
        } else {
            0.0
        }
    }
}

impl ConfidenceModel for LaborPressureConfidence {
    fn name(&self) -> &'static str {
        "labor_pressure"
    }

    fn score(&self, inputs: &ConfidenceInputs<'_>) -> u8 {
        let pressure = Self::pressure(
            inputs.total_labor_hours,
            inputs.request.constraint_set.labor_hours_available,
        );
        let score = if pressure > self.pressure_threshold {
            self.baseline.saturating_sub(self.penalty)
        } else {
            self.baseline
        };
        score.min(100)
    }
}
