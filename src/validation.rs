//! Input validation for planning runs.
//!
//! Checks structural integrity of features, threats, and constructed
//! task graphs before any algorithm runs. Detects:
//! - Duplicate IDs
//! - References to features that don't exist
//! - Dependency edges pointing outside the task set
//! - Graphs exceeding the task-count bound
//!
//! Cycle detection lives with the topological sort in
//! [`crate::critical_path`], since Kahn's algorithm produces both.

use std::collections::HashSet;

use crate::error::{PlanError, PlanResult, MAX_TASKS};
use crate::models::{Feature, TaskGraph, Threat};

/// Validates the feature list.
///
/// Checks:
/// 1. No duplicate feature IDs
/// 2. Every feature dependency references a feature in the list
pub fn validate_features(features: &[Feature]) -> PlanResult<()> {
    let mut ids = HashSet::new();
    for feature in features {
        if !ids.insert(feature.id.as_str()) {
            return Err(PlanError::DuplicateId(feature.id.clone()));
        }
    }

    for feature in features {
        for dep in &feature.dependencies {
            if !ids.contains(dep.as_str()) {
                return Err(PlanError::UnknownDependency {
                    entity: feature.id.clone(),
                    dependency: dep.clone(),
                });
            }
        }
    }

    Ok(())
}

/// Validates the threat list: no duplicate threat IDs.
pub fn validate_threats(threats: &[Threat]) -> PlanResult<()> {
    let mut ids = HashSet::new();
    for threat in threats {
        if !ids.insert(threat.id.as_str()) {
            return Err(PlanError::DuplicateId(threat.id.clone()));
        }
    }
    Ok(())
}

/// Validates a constructed task graph.
///
/// Checks:
/// 1. Task count within [`MAX_TASKS`]
/// 2. No duplicate task IDs
/// 3. Every dependency edge references a task in the set
///
/// Acyclicity is checked by [`crate::critical_path::topological_order`].
pub fn validate_graph(graph: &TaskGraph) -> PlanResult<()> {
    if graph.len() > MAX_TASKS {
        return Err(PlanError::TooManyTasks {
            count: graph.len(),
            limit: MAX_TASKS,
        });
    }

    let mut ids = HashSet::new();
    for task in &graph.tasks {
        if !ids.insert(task.id.as_str()) {
            return Err(PlanError::DuplicateId(task.id.clone()));
        }
    }

    if let Err((task, dep)) = graph.validate_edges() {
        return Err(PlanError::UnknownDependency {
            entity: task,
            dependency: dep,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Task, TaskType, ThreatImpact};

    #[test]
    fn test_valid_features() {
        let features = vec![
            Feature::new("F1", "Auth"),
            Feature::new("F2", "Billing").with_dependency("F1"),
        ];
        assert!(validate_features(&features).is_ok());
    }

    #[test]
    fn test_duplicate_feature_id() {
        let features = vec![Feature::new("F1", "Auth"), Feature::new("F1", "Billing")];
        assert_eq!(
            validate_features(&features),
            Err(PlanError::DuplicateId("F1".into()))
        );
    }

    #[test]
    fn test_unknown_feature_dependency() {
        let features = vec![Feature::new("F1", "Auth").with_dependency("F9")];
        assert_eq!(
            validate_features(&features),
            Err(PlanError::UnknownDependency {
                entity: "F1".into(),
                dependency: "F9".into(),
            })
        );
    }

    #[test]
    fn test_duplicate_threat_id() {
        let threats = vec![
            Threat::new("T1", "XSS", ThreatImpact::High),
            Threat::new("T1", "CSRF", ThreatImpact::Medium),
        ];
        assert_eq!(
            validate_threats(&threats),
            Err(PlanError::DuplicateId("T1".into()))
        );
    }

    #[test]
    fn test_valid_graph() {
        let graph = TaskGraph::from_tasks(vec![
            Task::new("a", TaskType::Design, 8.0),
            Task::new("b", TaskType::Development, 16.0).with_dependency("a"),
        ]);
        assert!(validate_graph(&graph).is_ok());
    }

    #[test]
    fn test_graph_duplicate_task_id() {
        let graph = TaskGraph::from_tasks(vec![
            Task::new("a", TaskType::Design, 8.0),
            Task::new("a", TaskType::Testing, 4.0),
        ]);
        assert_eq!(
            validate_graph(&graph),
            Err(PlanError::DuplicateId("a".into()))
        );
    }

    #[test]
    fn test_graph_dangling_edge() {
        let graph = TaskGraph::from_tasks(vec![
            Task::new("a", TaskType::Design, 8.0).with_dependency("ghost")
        ]);
        assert_eq!(
            validate_graph(&graph),
            Err(PlanError::UnknownDependency {
                entity: "a".into(),
                dependency: "ghost".into(),
            })
        );
    }

    #[test]
    fn test_graph_task_bound() {
        let tasks: Vec<Task> = (0..MAX_TASKS + 1)
            .map(|i| Task::new(format!("t{i}"), TaskType::Development, 8.0))
            .collect();
        let graph = TaskGraph::from_tasks(tasks);
        assert!(matches!(
            validate_graph(&graph),
            Err(PlanError::TooManyTasks { .. })
        ));
    }

    #[test]
    fn test_empty_inputs_valid() {
        assert!(validate_features(&[]).is_ok());
        assert!(validate_threats(&[]).is_ok());
        assert!(validate_graph(&TaskGraph::new()).is_ok());
    }
}
