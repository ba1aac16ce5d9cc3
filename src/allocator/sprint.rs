//! Sprint allocation: precedence-respecting greedy bin packing.
//!
//! Tasks are considered in a fixed order (priority, then dependency
//! count, then slack, then ID) and packed greedily into sprints of
//! fixed story-point capacity. Optimal precedence-constrained bin
//! packing is NP-hard and out of scope; the greedy pass is a
//! deterministic heuristic.
//!
//! Two rules keep the result well-formed on any DAG:
//! - a task enters a sprint only when every dependency sits in a
//!   *strictly earlier* sprint — a dependency in the current sprint
//!   closes it;
//! - a task bigger than a whole sprint is placed alone in its own
//!   sprint and flagged, rather than dropped or made fatal.

use chrono::Duration;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::critical_path::CriticalPathAnalysis;
use crate::error::PlanWarning;
use crate::models::{SprintPlan, TaskGraph};
use crate::planner::PlanConfig;

/// Greedy sprint allocator.
#[derive(Debug, Clone)]
pub struct SprintAllocator {
    capacity_points: u32,
    sprint_days: i64,
    start_date: chrono::NaiveDate,
}

impl SprintAllocator {
    /// Creates an allocator from a validated configuration.
    pub fn new(config: &PlanConfig) -> Self {
        Self {
            capacity_points: config.capacity_points(),
            sprint_days: config.sprint_days(),
            start_date: config.project_start_date,
        }
    }

    /// Allocates every task in the graph to a sprint.
    ///
    /// Tasks pre-pinned to sprint 1 (infrastructure setup) are seated
    /// first. Writes each task's sprint number back into the graph and
    /// returns the ordered sprint plans plus any capacity warnings.
    pub fn allocate(
        &self,
        graph: &mut TaskGraph,
        analysis: &CriticalPathAnalysis,
    ) -> (Vec<SprintPlan>, Vec<PlanWarning>) {
        let mut assigned: HashMap<String, u32> = HashMap::new();
        let mut warnings = Vec::new();
        let mut sprints: Vec<SprintPlan> = Vec::new();
        let mut current = self.open_sprint(1);

        // Pinned tasks first, in task order.
        for task in &graph.tasks {
            if task.sprint == Some(1) {
                current.assign(&task.id, task.story_points);
                assigned.insert(task.id.clone(), 1);
            }
        }

        let mut remaining = self.consideration_order(graph, analysis);

        while !remaining.is_empty() {
            let eligible = remaining.iter().position(|&i| {
                graph.tasks[i]
                    .dependencies
                    .iter()
                    .all(|dep| assigned.get(dep).is_some_and(|&s| s < current.number))
            });

            let Some(pos) = eligible else {
                // Every candidate is blocked by the current sprint
                // itself; on an acyclic graph closing it always
                // unblocks something.
                debug_assert!(
                    !current.is_empty(),
                    "allocator stalled on an acyclic graph"
                );
                if current.is_empty() {
                    break;
                }
                debug!(sprint = current.number, "closing sprint on precedence");
                current = self.close_and_open_next(&mut sprints, current);
                continue;
            };

            let i = remaining.remove(pos);
            let task = &graph.tasks[i];
            let points = task.story_points;

            if points > self.capacity_points {
                // Single-task overflow: a sprint of its own, flagged.
                if !current.is_empty() {
                    current = self.close_and_open_next(&mut sprints, current);
                }
                warn!(
                    task = %task.id,
                    points,
                    capacity = self.capacity_points,
                    "task exceeds a full sprint; placing alone"
                );
                warnings.push(PlanWarning::OverCapacity {
                    task_id: task.id.clone(),
                    points,
                    capacity_points: self.capacity_points,
                    sprint: current.number,
                });
                current.assign(&task.id, points);
                assigned.insert(task.id.clone(), current.number);
                current = self.close_and_open_next(&mut sprints, current);
            } else {
                if points > current.remaining_points() {
                    debug!(sprint = current.number, "closing sprint on capacity");
                    current = self.close_and_open_next(&mut sprints, current);
                }
                current.assign(&task.id, points);
                assigned.insert(task.id.clone(), current.number);
            }
        }

        if !current.is_empty() {
            sprints.push(current);
        }

        for task in &mut graph.tasks {
            task.sprint = assigned.get(&task.id).copied().or(task.sprint);
        }

        (sprints, warnings)
    }

    /// Consideration order: priority ascending (P0 first), fewer
    /// dependencies first, ascending slack, then task ID. Pinned tasks
    /// are excluded.
    fn consideration_order(&self, graph: &TaskGraph, analysis: &CriticalPathAnalysis) -> Vec<usize> {
        let mut order: Vec<usize> = (0..graph.len())
            .filter(|&i| graph.tasks[i].sprint.is_none())
            .collect();
        order.sort_by(|&a, &b| {
            let ta = &graph.tasks[a];
            let tb = &graph.tasks[b];
            ta.priority
                .cmp(&tb.priority)
                .then(ta.dependency_count().cmp(&tb.dependency_count()))
                .then(analysis.slack(&ta.id).total_cmp(&analysis.slack(&tb.id)))
                .then(ta.id.cmp(&tb.id))
        });
        order
    }

    /// Opens sprint `number` with dates derived from the project start:
    /// `start + (number − 1) × sprint_days`, ending the day before the
    /// next sprint begins.
    fn open_sprint(&self, number: u32) -> SprintPlan {
        let start = self.start_date + Duration::days(i64::from(number - 1) * self.sprint_days);
        let end = start + Duration::days(self.sprint_days - 1);
        SprintPlan::new(number, start, end, self.capacity_points)
    }

    fn close_and_open_next(&self, sprints: &mut Vec<SprintPlan>, current: SprintPlan) -> SprintPlan {
        let next = current.number + 1;
        sprints.push(current);
        self.open_sprint(next)
    }
}
