//! Planning request supplied alongside the task list.

use serde::{Deserialize, Serialize};

/// Yield the grower is aiming for with one species.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarvestTarget {
    pub species: String,
    pub target_yield_kg: f64,
}

impl HarvestTarget {
    pub fn new(species: &str, target_yield_kg: f64) -> Self {
        Self {
            species: species.to_string(),
            target_yield_kg,
        }
    }
}

/// Operational limits of the facility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintSet {
    /// Nominal labor hours available per day.
    pub labor_hours_available: f64,
    #[serde(default)]
    pub equipment_available: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub substrate_limit_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature_min_c: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature_max_c: Option<f64>,
}

/// What the caller wants the plan to favour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Prioritization {
    pub maximize_yield: bool,
    pub minimize_labor: bool,
    pub minimize_duration: bool,
}

impl Prioritization {
    /// Names of the active flags, in a fixed order.
    pub fn active(&self) -> Vec<&'static str> {
        let mut flags = Vec::new();
        if self.maximize_yield {
            flags.push("yield");
        }
        if self.minimize_labor {
            flags.push("labor");
        }
        if self.minimize_duration {
            flags.push("duration");
        }
        flags
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowRequest {
    #[serde(default)]
    pub harvest_targets: Vec<HarvestTarget>,
    pub constraint_set: ConstraintSet,
    #[serde(default)]
    pub time_window_days: u32,
    #[serde(default)]
    pub prioritization: Prioritization,
}

impl WorkflowRequest {
    pub fn new(labor_hours_available: f64) -> Self {
        Self {
            constraint_set: ConstraintSet {
                labor_hours_available,
                ..ConstraintSet::default()
            },
            ..Self::default()
        }
    }

    pub fn with_harvest_target(mut self, species: &str, target_yield_kg: f64) -> Self {
        self.harvest_targets
            .push(HarvestTarget::new(species, target_yield_kg));
        self
    }

    pub fn with_equipment(mut self, equipment: &str) -> Self {
        self.constraint_set
            .equipment_available
            .push(equipment.to_string());
        self
    }

    pub fn with_time_window(mut self, days: u32) -> Self {
        self.time_window_days = days;
        self
    }

    pub fn with_prioritization(mut self, prioritization: Prioritization) -> Self {
        self.prioritization = prioritization;
        self
    }

    /// Sum of all harvest target yields.
    pub fn total_target_yield_kg(&self) -> f64 {
        self.harvest_targets.iter().map(|t| t.target_yield_kg).sum()
    }
}
