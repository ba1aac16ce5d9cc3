//! Critical path analysis (CPM).
//!
//! Computes earliest/latest start times, slack, and the critical path
//! for a task graph via the classic forward/backward pass:
//!
//! 1. Topological sort (Kahn's algorithm); a cyclic graph is fatal.
//! 2. Forward pass: `EST(t) = max(EST(p) + duration(p))` over
//!    predecessors, 0 for sources.
//! 3. Backward pass, anchored at the project end (max `EST + duration`
//!    over terminal tasks): `LST(t) = min(LST(s)) − duration(t)` over
//!    successors; terminals seed at `anchor − duration`.
//! 4. `slack = LST − EST`; a task is critical iff its slack is zero.
//!
//! The critical path is the chain of contiguous zero-slack tasks from a
//! source to a sink; ties are broken by larger duration, then
//! lexicographic task ID, which makes the whole analysis deterministic.
//!
//! # Reference
//! Kelley & Walker (1959), "Critical-Path Planning and Scheduling"

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

use crate::error::{PlanError, PlanResult};
use crate::models::TaskGraph;

/// Slack below this threshold (in hours) counts as zero.
const SLACK_EPSILON: f64 = 1e-9;

/// Fraction of total duration reserved as schedule buffer.
const BUFFER_RATIO: f64 = 0.2;

/// Per-task timing computed by the forward/backward pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskTiming {
    /// Task ID.
    pub task_id: String,
    /// Earliest start time (hours from project start).
    pub est: f64,
    /// Latest start time without delaying the project (hours).
    pub lst: f64,
    /// Scheduling slack: `lst − est`.
    pub slack: f64,
    /// Whether the task lies on the critical path (zero slack).
    pub is_critical: bool,
}

/// Full critical-path analysis of a task graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriticalPathAnalysis {
    /// Per-task timings, in graph task order.
    pub timings: Vec<TaskTiming>,
    /// Ordered task IDs along the critical path, source to sink.
    pub critical_path: Vec<String>,
    /// Total project duration: the critical-path sum in hours. This is
    /// working time, not calendar time.
    pub total_duration_hours: f64,
    /// Schedule buffer: `ceil(0.2 × total duration)` hours.
    pub buffer_hours: f64,
    /// Groups of tasks sharing an identical EST (size ≥ 2). Reporting
    /// only; the allocator does not consume these.
    pub parallel_groups: Vec<Vec<String>>,
}

impl CriticalPathAnalysis {
    /// Runs the full CPM pass over a graph.
    ///
    /// Fails with [`PlanError::CyclicDependency`] if the graph is
    /// cyclic.
    pub fn analyze(graph: &TaskGraph) -> PlanResult<Self> {
        let order = topological_order(graph)?;

        let index: HashMap<&str, usize> = graph
            .tasks
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id.as_str(), i))
            .collect();
        let durations: Vec<f64> = graph.tasks.iter().map(|t| t.estimated_hours).collect();
        let successors = graph.successor_map();

        // Forward pass in topological order.
        let mut est = vec![0.0_f64; graph.len()];
        for id in &order {
            let i = index[id.as_str()];
            let task = &graph.tasks[i];
            for dep in &task.dependencies {
                let p = index[dep.as_str()];
                est[i] = est[i].max(est[p] + durations[p]);
            }
        }

        // Anchor: latest finish over terminal tasks.
        let anchor = graph
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| successors[t.id.as_str()].is_empty())
            .map(|(i, _)| est[i] + durations[i])
            .fold(0.0_f64, f64::max);

        // Backward pass in reverse topological order.
        let mut lst = vec![0.0_f64; graph.len()];
        for id in order.iter().rev() {
            let i = index[id.as_str()];
            let succs = &successors[id.as_str()];
            if succs.is_empty() {
                lst[i] = anchor - durations[i];
            } else {
                let min_succ = succs
                    .iter()
                    .map(|s| lst[index[s]])
                    .fold(f64::INFINITY, f64::min);
                lst[i] = min_succ - durations[i];
            }
        }

        let timings: Vec<TaskTiming> = graph
            .tasks
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let slack = lst[i] - est[i];
                TaskTiming {
                    task_id: t.id.clone(),
                    est: est[i],
                    lst: lst[i],
                    slack,
                    is_critical: slack.abs() < SLACK_EPSILON,
                }
            })
            .collect();

        let critical_path = trace_critical_path(graph, &timings, &est, &durations, &index);
        let parallel_groups = group_by_est(graph, &est);

        Ok(Self {
            timings,
            critical_path,
            total_duration_hours: anchor,
            buffer_hours: (BUFFER_RATIO * anchor).ceil(),
            parallel_groups,
        })
    }

    /// Looks up the timing for a task.
    pub fn timing(&self, task_id: &str) -> Option<&TaskTiming> {
        self.timings.iter().find(|t| t.task_id == task_id)
    }

    /// Slack for a task; 0.0 for unknown IDs.
    pub fn slack(&self, task_id: &str) -> f64 {
        self.timing(task_id).map(|t| t.slack).unwrap_or(0.0)
    }
}

/// Topologically orders a graph's task IDs using Kahn's algorithm.
///
/// Deterministic: the queue is seeded and drained in task order. Fails
/// with [`PlanError::CyclicDependency`] naming a task on a cycle if any
/// task remains unordered. Every dependency edge must reference a task
/// in the graph (checked by [`crate::validation::validate_graph`]).
pub fn topological_order(graph: &TaskGraph) -> PlanResult<Vec<String>> {
    let successors = graph.successor_map();

    let mut in_degree: HashMap<&str, usize> = graph
        .tasks
        .iter()
        .map(|t| (t.id.as_str(), t.dependencies.len()))
        .collect();

    let mut queue: VecDeque<&str> = graph
        .tasks
        .iter()
        .filter(|t| t.dependencies.is_empty())
        .map(|t| t.id.as_str())
        .collect();

    let mut order = Vec::with_capacity(graph.len());
    while let Some(id) = queue.pop_front() {
        order.push(id.to_string());
        for &succ in &successors[id] {
            let degree = in_degree.get_mut(succ).expect("successor is in graph");
            *degree -= 1;
            if *degree == 0 {
                queue.push_back(succ);
            }
        }
    }

    if order.len() != graph.len() {
        // Any task with remaining in-degree sits on or behind a cycle;
        // report the first in task order for a stable message.
        let stuck = graph
            .tasks
            .iter()
            .find(|t| in_degree[t.id.as_str()] > 0)
            .map(|t| t.id.clone())
            .unwrap_or_default();
        return Err(PlanError::CyclicDependency(stuck));
    }

    Ok(order)
}

/// Walks the chain of contiguous zero-slack tasks from a source to a
/// sink. At each step the next task must be a zero-slack successor whose
/// EST equals the current task's finish; ties break toward larger
/// duration, then lexicographic ID. The starting source is chosen by the
/// same rule.
fn trace_critical_path(
    graph: &TaskGraph,
    timings: &[TaskTiming],
    est: &[f64],
    durations: &[f64],
    index: &HashMap<&str, usize>,
) -> Vec<String> {
    let successors = graph.successor_map();

    let pick = |candidates: &[usize]| -> Option<usize> {
        candidates.iter().copied().min_by(|&a, &b| {
            durations[b]
                .partial_cmp(&durations[a])
                .expect("durations are finite")
                .then_with(|| graph.tasks[a].id.cmp(&graph.tasks[b].id))
        })
    };

    let sources: Vec<usize> = graph
        .tasks
        .iter()
        .enumerate()
        .filter(|(i, t)| t.dependencies.is_empty() && timings[*i].is_critical)
        .map(|(i, _)| i)
        .collect();

    let Some(mut current) = pick(&sources) else {
        return Vec::new();
    };

    let mut path = vec![graph.tasks[current].id.clone()];
    loop {
        let finish = est[current] + durations[current];
        let next: Vec<usize> = successors[graph.tasks[current].id.as_str()]
            .iter()
            .map(|s| index[s])
            .filter(|&s| timings[s].is_critical && (est[s] - finish).abs() < SLACK_EPSILON)
            .collect();
        match pick(&next) {
            Some(n) => {
                path.push(graph.tasks[n].id.clone());
                current = n;
            }
            None => break,
        }
    }
    path
}

/// Groups tasks sharing an identical EST, for reporting.
///
/// Groups are ordered by EST ascending; only groups of two or more
/// tasks are kept. Members stay in task order.
fn group_by_est(graph: &TaskGraph, est: &[f64]) -> Vec<Vec<String>> {
    let mut indices: Vec<usize> = (0..graph.len()).collect();
    indices.sort_by(|&a, &b| {
        est[a]
            .partial_cmp(&est[b])
            .expect("start times are finite")
            .then(a.cmp(&b))
    });

    let mut groups: Vec<Vec<String>> = Vec::new();
    let mut current: Vec<usize> = Vec::new();
    for &i in &indices {
        if current.is_empty() || est[i] == est[current[0]] {
            current.push(i);
        } else {
            if current.len() >= 2 {
                groups.push(current.iter().map(|&j| graph.tasks[j].id.clone()).collect());
            }
            current = vec![i];
        }
    }
    if current.len() >= 2 {
        groups.push(current.iter().map(|&j| graph.tasks[j].id.clone()).collect());
    }
    groups
}
