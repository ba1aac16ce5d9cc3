//! Sprint plan model.
//!
//! A sprint is a fixed-length, fixed-capacity iteration that tasks are
//! allocated into. Dates are calendar dates (`chrono::NaiveDate`);
//! capacity is in story points.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A planned sprint with its assigned tasks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SprintPlan {
    /// Sprint number, starting at 1.
    pub number: u32,
    /// First day of the sprint.
    pub start_date: NaiveDate,
    /// Last day of the sprint (inclusive).
    pub end_date: NaiveDate,
    /// Story-point capacity (team velocity for one sprint).
    pub capacity_points: u32,
    /// IDs of tasks assigned to this sprint, in assignment order.
    pub task_ids: Vec<String>,
    /// Sum of story points of the assigned tasks.
    pub committed_points: u32,
}

impl SprintPlan {
    /// Creates an empty sprint.
    pub fn new(number: u32, start_date: NaiveDate, end_date: NaiveDate, capacity: u32) -> Self {
        Self {
            number,
            start_date,
            end_date,
            capacity_points: capacity,
            task_ids: Vec::new(),
            committed_points: 0,
        }
    }

    /// Assigns a task to this sprint.
    pub fn assign(&mut self, task_id: impl Into<String>, story_points: u32) {
        self.task_ids.push(task_id.into());
        self.committed_points += story_points;
    }

    /// Remaining capacity in story points (0 when overcommitted).
    pub fn remaining_points(&self) -> u32 {
        self.capacity_points.saturating_sub(self.committed_points)
    }

    /// Whether the given task is assigned to this sprint.
    pub fn contains(&self, task_id: &str) -> bool {
        self.task_ids.iter().any(|id| id == task_id)
    }

    /// Whether this sprint holds no tasks.
    pub fn is_empty(&self) -> bool {
        self.task_ids.is_empty()
    }

    /// Whether committed points exceed capacity (the single-task
    /// overflow case).
    pub fn is_overcommitted(&self) -> bool {
        self.committed_points > self.capacity_points
    }
}
