//! Task graph construction.
//!
//! Decomposes features and threats into atomic tasks with precedence
//! edges:
//!
//! - per feature: a design task, then per sub-feature an implementation
//!   task (after design) and a unit-test task (after implementation);
//! - per feature: a security-review task (forced P0) and an
//!   integration-test task, both after *all* of the feature's
//!   implementation tasks;
//! - per critical or high-scoring threat: a standalone P0 mitigation
//!   task;
//! - two fixed infrastructure tasks, pinned to sprint 1.
//!
//! Feature-level dependencies order design tasks across features, which
//! is the one place caller data can smuggle in a cycle — the builder
//! ends with a topological-sort check even though its own construction
//! rules cannot produce one.

use std::collections::HashMap;
use tracing::debug;

use crate::critical_path::topological_order;
use crate::error::PlanResult;
use crate::models::{Feature, Priority, Task, TaskGraph, TaskType, Threat};
use crate::validation::{validate_features, validate_graph, validate_threats};

/// Hour estimates per derived task kind.
const DESIGN_HOURS: f64 = 8.0;
const IMPLEMENTATION_HOURS: f64 = 16.0;
const UNIT_TEST_HOURS: f64 = 8.0;
const SECURITY_REVIEW_HOURS: f64 = 12.0;
const INTEGRATION_TEST_HOURS: f64 = 12.0;
const MITIGATION_HOURS: f64 = 16.0;
const CICD_SETUP_HOURS: f64 = 16.0;
const MONITORING_SETUP_HOURS: f64 = 8.0;

/// Decomposes planning inputs into a validated task graph.
///
/// Task IDs (`TASK-001`, …) come from a run-local sequence, so
/// concurrent runs share nothing and identical inputs yield identical
/// graphs.
#[derive(Debug, Default)]
pub struct TaskGraphBuilder {
    next_id: u32,
}

impl TaskGraphBuilder {
    /// Creates a builder with a fresh ID sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds and validates the task graph.
    ///
    /// Inputs are checked first (duplicate IDs, unknown feature
    /// references), the graph is checked last (edge integrity, task
    /// bound, acyclicity).
    pub fn build(mut self, features: &[Feature], threats: &[Threat]) -> PlanResult<TaskGraph> {
        validate_features(features)?;
        validate_threats(threats)?;

        let mut graph = TaskGraph::new();
        let mut design_ids: HashMap<&str, String> = HashMap::new();

        for feature in features {
            let design_id = self.next_task_id();
            design_ids.insert(feature.id.as_str(), design_id.clone());
            graph.add_task(
                Task::new(&design_id, TaskType::Design, DESIGN_HOURS)
                    .with_title(format!("Design: {}", feature.name))
                    .with_priority(feature.priority),
            );

            let mut implementation_ids = Vec::with_capacity(feature.sub_features.len());
            for sub_feature in &feature.sub_features {
                let impl_id = self.next_task_id();
                graph.add_task(
                    Task::new(&impl_id, TaskType::Development, IMPLEMENTATION_HOURS)
                        .with_title(format!("Implement: {sub_feature}"))
                        .with_priority(feature.priority)
                        .with_dependency(&design_id),
                );
                graph.add_task(
                    Task::new(self.next_task_id(), TaskType::Testing, UNIT_TEST_HOURS)
                        .with_title(format!("Unit test: {sub_feature}"))
                        .with_priority(feature.priority)
                        .with_dependency(&impl_id),
                );
                implementation_ids.push(impl_id);
            }

            graph.add_task(
                Task::new(self.next_task_id(), TaskType::Security, SECURITY_REVIEW_HOURS)
                    .with_title(format!("Security review: {}", feature.name))
                    .with_priority(Priority::P0)
                    .with_dependencies(implementation_ids.clone()),
            );
            graph.add_task(
                Task::new(self.next_task_id(), TaskType::Testing, INTEGRATION_TEST_HOURS)
                    .with_title(format!("Integration test: {}", feature.name))
                    .with_priority(feature.priority)
                    .with_dependencies(implementation_ids),
            );
        }

        for threat in threats {
            if threat.requires_mitigation_task() {
                graph.add_task(
                    Task::new(self.next_task_id(), TaskType::Security, MITIGATION_HOURS)
                        .with_title(format!("Mitigate: {}", threat.name))
                        .with_priority(Priority::P0),
                );
            }
        }

        graph.add_task(
            Task::new(self.next_task_id(), TaskType::Devops, CICD_SETUP_HOURS)
                .with_title("Set up CI/CD pipeline")
                .with_priority(Priority::P1)
                .with_sprint(1),
        );
        graph.add_task(
            Task::new(self.next_task_id(), TaskType::Devops, MONITORING_SETUP_HOURS)
                .with_title("Set up monitoring and alerting")
                .with_priority(Priority::P1)
                .with_sprint(1),
        );

        // Feature-level ordering: a design starts after the designs of
        // the features it depends on. Patched after the loop so forward
        // references work.
        for feature in features {
            if feature.dependencies.is_empty() {
                continue;
            }
            let design_id = design_ids[feature.id.as_str()].clone();
            let task = graph
                .tasks
                .iter_mut()
                .find(|t| t.id == design_id)
                .expect("design task was just added");
            for dep in &feature.dependencies {
                task.dependencies.push(design_ids[dep.as_str()].clone());
            }
        }

        validate_graph(&graph)?;
        topological_order(&graph)?;

        debug!(
            tasks = graph.len(),
            features = features.len(),
            threats = threats.len(),
            "task graph built"
        );
        Ok(graph)
    }

    fn next_task_id(&mut self) -> String {
        self.next_id += 1;
        format!("TASK-{:03}", self.next_id)
    }
}
