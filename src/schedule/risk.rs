//! Risk scans over a produced schedule.
//!
//! Both scans bucket tasks by the calendar day they start on and only read
//! the schedule. Findings are human-readable strings, reported in ascending
//! day order: labor overload findings first, then species co-location.

use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

use crate::config::Config;
use crate::core::request::WorkflowRequest;
use crate::core::task::ScheduledTask;

#[derive(Debug, Clone, PartialEq)]
pub struct RiskAnalyzer {
    /// Multiple of daily availability a day may reach before it is overloaded.
    pub labor_overload_factor: f64,
    /// Distinct species tolerated on one day.
    pub max_species_per_day: usize,
}

impl Default for RiskAnalyzer {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl RiskAnalyzer {
    pub fn from_config(config: &Config) -> Self {
        Self {
            labor_overload_factor: config.labor_overload_factor,
            max_species_per_day: config.max_species_per_day,
        }
    }

    /// Run every scan and collect the findings.
    pub fn analyze(&self, tasks: &[ScheduledTask], request: &WorkflowRequest) -> Vec<String> {
        let mut risks =
            self.labor_overload(tasks, request.constraint_set.labor_hours_available);
        risks.extend(self.species_colocation(tasks));
        risks
    }

    /// Days whose summed labor exceeds the overload limit.
    pub fn labor_overload(&self, tasks: &[ScheduledTask], labor_hours_available: f64) -> Vec<String> {
        let limit = self.labor_overload_factor * labor_hours_available;
        let mut per_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for task in tasks {
            *per_day.entry(task.scheduled_day()).or_insert(0.0) += task.assigned_labor;
        }

        per_day
            .into_iter()
            .filter(|(_, hours)| *hours > limit)
            .map(|(day, hours)| {
                format!(
                    "Labor overload on {}: {:.1} hours scheduled exceeds the {:.1}-hour limit ({:.1} hours available per day)",
                    day, hours, limit, labor_hours_available
                )
            })
            .collect()
    }

    /// Days on which too many distinct species are handled.
    pub fn species_colocation(&self, tasks: &[ScheduledTask]) -> Vec<String> {
        let mut per_day: BTreeMap<NaiveDate, BTreeSet<&str>> = BTreeMap::new();
        for task in tasks {
            if let Some(species) = task.species_label() {
                per_day
                    .entry(task.scheduled_day())
                    .or_default()
                    .insert(species);
            }
        }

        per_day
            .into_iter()
            .filter(|(_, species)| species.len() > self.max_species_per_day)
            .map(|(day, species)| {
                format!(
                    "Contamination cross-risk on {}: {} species handled on the same day ({})",
                    day,
                    species.len(),
                    species.into_iter().collect::<Vec<_>>().join(", ")
                )
            })
            .collect()
    }
}
