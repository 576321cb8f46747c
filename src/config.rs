use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::{mlog_debug, Error, Result};

/// How the graph builder treats a `dependsOn` entry that names no task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UnknownDependencyPolicy {
    /// Drop the reference, log a warning and schedule the task as unconstrained.
    #[default]
    AssumeSatisfied,
    /// Fail the scheduling call with `Error::UnknownDependency`.
    Reject,
}

impl std::fmt::Display for UnknownDependencyPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnknownDependencyPolicy::AssumeSatisfied => write!(f, "assume_satisfied"),
            UnknownDependencyPolicy::Reject => write!(f, "reject"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Hour of day the timeline cursor starts at on the start date.
    pub day_start_hour: u32,
    /// Working hours per day used as the utilization denominator.
    pub working_hours_per_day: f64,
    /// Multiple of daily labor availability above which a day is overloaded.
    pub labor_overload_factor: f64,
    /// Distinct species tolerated on one day before flagging cross-contamination.
    pub max_species_per_day: usize,
    pub unknown_dependencies: UnknownDependencyPolicy,
    /// Rooms to distribute unassigned tasks across, if any.
    pub default_room_count: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            day_start_hour: 6,
            working_hours_per_day: 8.0,
            labor_overload_factor: 1.5,
            max_species_per_day: 3,
            unknown_dependencies: UnknownDependencyPolicy::AssumeSatisfied,
            default_room_count: None,
        }
    }
}

impl Config {
    pub fn app_dir() -> Result<PathBuf> {
        Ok(dirs::home_dir().ok_or(Error::NoHomeDir)?.join(".mycoplan"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::app_dir()?.join("mycoplan.toml"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        mlog_debug!("Config::load path={}", path.display());
        if !path.exists() {
            mlog_debug!("Config file not found, using defaults");
            return Ok(Self::default());
        }
        let config: Self = toml::from_str(&fs::read_to_string(path)?)?;
        config.validate()?;
        mlog_debug!(
            "Config loaded: day_start_hour={}, working_hours_per_day={}, unknown_dependencies={}",
            config.day_start_hour,
            config.working_hours_per_day,
            config.unknown_dependencies
        );
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                mlog_debug!("Creating config directory: {}", dir.display());
                fs::create_dir_all(dir)?;
            }
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        mlog_debug!("Config saved to {}", path.display());
        Ok(())
    }

    /// Reject values the engine cannot schedule with.
    pub fn validate(&self) -> Result<()> {
        if self.day_start_hour > 23 {
            return Err(Error::Validation(format!(
                "day_start_hour must be within 0..=23, got {}",
                self.day_start_hour
            )));
        }
        if !self.working_hours_per_day.is_finite() || self.working_hours_per_day <= 0.0 {
            return Err(Error::Validation(format!(
                "working_hours_per_day must be positive, got {}",
                self.working_hours_per_day
            )));
        }
        if !self.labor_overload_factor.is_finite() || self.labor_overload_factor <= 0.0 {
            return Err(Error::Validation(format!(
                "labor_overload_factor must be positive, got {}",
                self.labor_overload_factor
            )));
        }
        if self.default_room_count == Some(0) {
            return Err(Error::Validation(
                "default_room_count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
