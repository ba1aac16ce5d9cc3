//! Planning run configuration.
//!
//! Capacity arithmetic lives here so every component agrees on it:
//! a sprint provides `team_size × weeks × 5 workdays × 6 focus-hours`
//! of working time, converted to story points at 4 hours per point.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{PlanError, PlanResult};

/// Workdays per sprint week.
pub const WORKDAYS_PER_WEEK: u32 = 5;

/// Productive hours per workday (6, not 8 — meetings are real).
pub const WORK_HOURS_PER_DAY: u32 = 6;

/// Hours of estimated work per story point.
pub const HOURS_PER_STORY_POINT: f64 = 4.0;

/// Date format accepted for project start dates.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Configuration for one planning run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanConfig {
    /// Number of roster members.
    pub team_size: u32,
    /// Sprint length in weeks.
    pub sprint_duration_weeks: u32,
    /// First day of sprint 1.
    pub project_start_date: NaiveDate,
}

impl PlanConfig {
    /// Creates a configuration. Call [`PlanConfig::validate`] before use.
    pub fn new(team_size: u32, sprint_duration_weeks: u32, project_start_date: NaiveDate) -> Self {
        Self {
            team_size,
            sprint_duration_weeks,
            project_start_date,
        }
    }

    /// Creates a configuration from an ISO-8601 (`YYYY-MM-DD`) start date.
    pub fn with_start_date_str(
        team_size: u32,
        sprint_duration_weeks: u32,
        start_date: &str,
    ) -> PlanResult<Self> {
        let date = NaiveDate::parse_from_str(start_date, DATE_FORMAT).map_err(|e| {
            PlanError::InvalidConfig(format!("unparseable start date '{start_date}': {e}"))
        })?;
        Ok(Self::new(team_size, sprint_duration_weeks, date))
    }

    /// Rejects malformed configuration, before any graph is built.
    pub fn validate(&self) -> PlanResult<()> {
        if self.team_size == 0 {
            return Err(PlanError::InvalidConfig(
                "team_size must be positive".into(),
            ));
        }
        if self.sprint_duration_weeks == 0 {
            return Err(PlanError::InvalidConfig(
                "sprint_duration_weeks must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Working hours one member contributes to one sprint.
    pub fn member_hours_per_sprint(&self) -> f64 {
        f64::from(self.sprint_duration_weeks * WORKDAYS_PER_WEEK * WORK_HOURS_PER_DAY)
    }

    /// Team working hours per sprint (the velocity base).
    pub fn velocity_hours(&self) -> f64 {
        f64::from(self.team_size) * self.member_hours_per_sprint()
    }

    /// Sprint capacity in story points: velocity hours at
    /// [`HOURS_PER_STORY_POINT`], rounded down.
    pub fn capacity_points(&self) -> u32 {
        (self.velocity_hours() / HOURS_PER_STORY_POINT).floor() as u32
    }

    /// Sprint length in calendar days.
    pub fn sprint_days(&self) -> i64 {
        i64::from(self.sprint_duration_weeks) * 7
    }
}
