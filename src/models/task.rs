//! Task model.
//!
//! A task is the atomic unit of planning: a single piece of work with an
//! hour estimate, a story-point bucket, a priority, and a set of
//! predecessor tasks. Tasks are produced by the graph builder and carry
//! their sprint assignment once allocation has run.
//!
//! # Reference
//! Kerzner (2017), "Project Management", Ch. 11: Network Scheduling

use serde::{Deserialize, Serialize};

/// Story-point bucket thresholds, as (max_hours, points) pairs.
///
/// Estimates above the last threshold map to [`MAX_STORY_POINTS`].
const STORY_POINT_BUCKETS: [(f64, u32); 5] = [(4.0, 1), (8.0, 2), (12.0, 3), (20.0, 5), (40.0, 8)];

/// Story points assigned to estimates beyond the largest bucket.
const MAX_STORY_POINTS: u32 = 13;

/// A schedulable unit of work.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier.
    pub id: String,
    /// Human-readable title.
    pub title: String,
    /// Work classification.
    pub task_type: TaskType,
    /// Estimated effort in hours.
    pub estimated_hours: f64,
    /// Relative-effort bucket derived from the hour estimate.
    pub story_points: u32,
    /// Scheduling priority (P0 = most urgent).
    pub priority: Priority,
    /// IDs of tasks that must complete before this one starts.
    pub dependencies: Vec<String>,
    /// Sprint number once allocated. `None` until allocation runs.
    pub sprint: Option<u32>,
    /// Task lifecycle state.
    pub status: TaskStatus,
}

/// Work classification for a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    /// Architecture and design work.
    Design,
    /// Implementation work.
    Development,
    /// Unit and integration testing.
    Testing,
    /// Security reviews and threat mitigations.
    Security,
    /// Documentation work.
    Documentation,
    /// Build, deploy, and monitoring infrastructure.
    Devops,
}

/// Scheduling priority. Lower ordinal = more urgent.
///
/// Derives `Ord` so P0 sorts before P3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    /// Must ship; blocks everything else.
    P0,
    /// High priority.
    P1,
    /// Normal priority.
    P2,
    /// Low priority.
    P3,
}

/// Task lifecycle state.
///
/// A planning run always emits `Planned`; the remaining states exist for
/// consumers that track execution against the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Scheduled but not started.
    Planned,
    /// Work underway.
    InProgress,
    /// Work finished.
    Done,
}

impl Task {
    /// Creates a new task with the given ID and hour estimate.
    ///
    /// Story points are derived from the estimate via [`story_points`].
    pub fn new(id: impl Into<String>, task_type: TaskType, estimated_hours: f64) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            task_type,
            estimated_hours,
            story_points: story_points(estimated_hours),
            priority: Priority::P2,
            dependencies: Vec::new(),
            sprint: None,
            status: TaskStatus::Planned,
        }
    }

    /// Sets the task title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Adds a predecessor task ID.
    pub fn with_dependency(mut self, id: impl Into<String>) -> Self {
        self.dependencies.push(id.into());
        self
    }

    /// Adds multiple predecessor task IDs.
    pub fn with_dependencies<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies.extend(ids.into_iter().map(Into::into));
        self
    }

    /// Pins the task to a sprint before allocation runs.
    pub fn with_sprint(mut self, sprint: u32) -> Self {
        self.sprint = Some(sprint);
        self
    }

    /// Whether this task has no predecessors.
    pub fn is_source(&self) -> bool {
        self.dependencies.is_empty()
    }

    /// Number of predecessors.
    pub fn dependency_count(&self) -> usize {
        self.dependencies.len()
    }
}

/// Buckets an hour estimate into story points.
///
/// Pure step function: ≤4h→1, ≤8h→2, ≤12h→3, ≤20h→5, ≤40h→8, else 13.
pub fn story_points(hours: f64) -> u32 {
    for (max_hours, points) in STORY_POINT_BUCKETS {
        if hours <= max_hours {
            return points;
        }
    }
    MAX_STORY_POINTS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_builder() {
        let task = Task::new("TASK-001", TaskType::Development, 16.0)
            .with_title("Implement login")
            .with_priority(Priority::P1)
            .with_dependency("TASK-000");

        assert_eq!(task.id, "TASK-001");
        assert_eq!(task.title, "Implement login");
        assert_eq!(task.task_type, TaskType::Development);
        assert_eq!(task.priority, Priority::P1);
        assert_eq!(task.dependencies, vec!["TASK-000".to_string()]);
        assert_eq!(task.sprint, None);
        assert_eq!(task.status, TaskStatus::Planned);
    }

    #[test]
    fn test_story_points_buckets() {
        assert_eq!(story_points(1.0), 1);
        assert_eq!(story_points(4.0), 1);
        assert_eq!(story_points(4.5), 2);
        assert_eq!(story_points(8.0), 2);
        assert_eq!(story_points(12.0), 3);
        assert_eq!(story_points(16.0), 5);
        assert_eq!(story_points(20.0), 5);
        assert_eq!(story_points(40.0), 8);
        assert_eq!(story_points(41.0), 13);
        assert_eq!(story_points(500.0), 13);
    }

    #[test]
    fn test_story_points_derived_on_construction() {
        assert_eq!(Task::new("t", TaskType::Design, 8.0).story_points, 2);
        assert_eq!(Task::new("t", TaskType::Design, 48.0).story_points, 13);
    }

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::P0 < Priority::P1);
        assert!(Priority::P1 < Priority::P3);
        let mut ps = vec![Priority::P3, Priority::P0, Priority::P2];
        ps.sort();
        assert_eq!(ps, vec![Priority::P0, Priority::P2, Priority::P3]);
    }

    #[test]
    fn test_source_task() {
        let task = Task::new("t", TaskType::Design, 8.0);
        assert!(task.is_source());
        assert_eq!(task.dependency_count(), 0);

        let task = task.with_dependencies(vec!["a", "b"]);
        assert!(!task.is_source());
        assert_eq!(task.dependency_count(), 2);
    }
}
