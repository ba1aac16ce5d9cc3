//! Error and warning taxonomy.
//!
//! Every failure is returned to the caller as a typed value; nothing is
//! thrown across the API boundary, so a broken input can never produce a
//! partially rendered downstream report. Failures indicate bad
//! caller-supplied data, never a transient fault, so nothing is retried.
//!
//! Warnings are non-fatal findings attached to the plan output rather
//! than dropped or escalated.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound on total task count for one planning run.
///
/// Keeps the O(V+E) graph passes and the allocation sort tractable.
pub const MAX_TASKS: usize = 5000;

/// Fatal planning errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// Malformed configuration, rejected before graph construction.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Two input entities share the same ID.
    #[error("duplicate id '{0}'")]
    DuplicateId(String),

    /// An entity references a dependency that does not exist.
    #[error("'{entity}' references unknown dependency '{dependency}'")]
    UnknownDependency {
        /// The referencing entity's ID.
        entity: String,
        /// The missing dependency's ID.
        dependency: String,
    },

    /// The dependency graph is cyclic; CPM is undefined on a cycle.
    #[error("dependency cycle detected involving '{0}'")]
    CyclicDependency(String),

    /// The constructed graph exceeds the task-count bound.
    #[error("task count {count} exceeds the limit of {limit}")]
    TooManyTasks {
        /// Number of tasks the run would produce.
        count: usize,
        /// The configured bound ([`MAX_TASKS`]).
        limit: usize,
    },
}

/// Non-fatal findings attached to the plan output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlanWarning {
    /// A single task's story points exceed one full sprint's capacity;
    /// the task was placed alone in its own sprint.
    OverCapacity {
        /// The oversized task.
        task_id: String,
        /// Its story points.
        points: u32,
        /// The sprint capacity it exceeds.
        capacity_points: u32,
        /// The sprint it was placed alone into.
        sprint: u32,
    },
    /// A roster member's utilization exceeds the overallocation
    /// threshold. Reported, never auto-corrected.
    Overallocation {
        /// The overallocated member's name.
        member: String,
        /// Utilization as a fraction (1.0 = fully booked).
        utilization: f64,
    },
}

/// Convenience alias for fallible planning operations.
pub type PlanResult<T> = Result<T, PlanError>;
