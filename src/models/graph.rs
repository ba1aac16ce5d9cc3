//! Task graph model.
//!
//! The full task set plus its precedence edges. Edges are stored on the
//! tasks themselves (each task lists its predecessors); the graph adds
//! id-based lookup and successor queries on top.
//!
//! A graph is structurally valid only if every dependency edge
//! references a task within the set; [`TaskGraph::validate_edges`]
//! checks this. Acyclicity is checked separately by the validation
//! module, since cycle detection belongs with the other input checks.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::Task;

/// A set of tasks with precedence edges.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskGraph {
    /// All tasks, in construction order.
    pub tasks: Vec<Task>,
}

impl TaskGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a graph from an existing task list.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Adds a task.
    pub fn add_task(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Number of tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the graph holds no tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Looks up a task by ID.
    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Whether a task with the given ID exists.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Predecessor IDs of a task (its declared dependencies).
    pub fn predecessors(&self, id: &str) -> Vec<&str> {
        self.get(id)
            .map(|t| t.dependencies.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Successor IDs of a task (tasks that depend on it), in task order.
    pub fn successors(&self, id: &str) -> Vec<&str> {
        self.tasks
            .iter()
            .filter(|t| t.dependencies.iter().any(|d| d == id))
            .map(|t| t.id.as_str())
            .collect()
    }

    /// Terminal tasks: those no other task depends on, in task order.
    pub fn terminals(&self) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| self.successors(&t.id).is_empty())
            .collect()
    }

    /// Builds an id → successor-ids adjacency map for graph passes.
    ///
    /// Every task gets an entry, so sinks map to empty vectors.
    pub fn successor_map(&self) -> HashMap<&str, Vec<&str>> {
        let mut adj: HashMap<&str, Vec<&str>> =
            self.tasks.iter().map(|t| (t.id.as_str(), Vec::new())).collect();
        for task in &self.tasks {
            for dep in &task.dependencies {
                if let Some(succs) = adj.get_mut(dep.as_str()) {
                    succs.push(task.id.as_str());
                }
            }
        }
        adj
    }

    /// Checks that every dependency edge references a task in the set.
    ///
    /// Returns the first `(task_id, missing_dependency)` pair found.
    pub fn validate_edges(&self) -> Result<(), (String, String)> {
        for task in &self.tasks {
            for dep in &task.dependencies {
                if !self.contains(dep) {
                    return Err((task.id.clone(), dep.clone()));
                }
            }
        }
        Ok(())
    }

    /// Total estimated hours across all tasks.
    pub fn total_hours(&self) -> f64 {
        self.tasks.iter().map(|t| t.estimated_hours).sum()
    }

    /// Total story points across all tasks.
    pub fn total_story_points(&self) -> u32 {
        self.tasks.iter().map(|t| t.story_points).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskType;

    fn chain_graph() -> TaskGraph {
        // a → b → c, with d standalone
        TaskGraph::from_tasks(vec![
            Task::new("a", TaskType::Design, 8.0),
            Task::new("b", TaskType::Development, 16.0).with_dependency("a"),
            Task::new("c", TaskType::Testing, 8.0).with_dependency("b"),
            Task::new("d", TaskType::Devops, 16.0),
        ])
    }

    #[test]
    fn test_lookup() {
        let g = chain_graph();
        assert_eq!(g.len(), 4);
        assert!(g.contains("a"));
        assert!(!g.contains("z"));
        assert_eq!(g.get("b").unwrap().estimated_hours, 16.0);
    }

    #[test]
    fn test_predecessors_successors() {
        let g = chain_graph();
        assert_eq!(g.predecessors("b"), vec!["a"]);
        assert_eq!(g.successors("a"), vec!["b"]);
        assert!(g.predecessors("a").is_empty());
        assert!(g.successors("c").is_empty());
    }

    #[test]
    fn test_terminals() {
        let g = chain_graph();
        let terminal_ids: Vec<&str> = g.terminals().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(terminal_ids, vec!["c", "d"]);
    }

    #[test]
    fn test_successor_map_includes_sinks() {
        let g = chain_graph();
        let adj = g.successor_map();
        assert_eq!(adj["a"], vec!["b"]);
        assert!(adj["c"].is_empty());
        assert!(adj["d"].is_empty());
    }

    #[test]
    fn test_validate_edges() {
        let g = chain_graph();
        assert!(g.validate_edges().is_ok());

        let mut bad = chain_graph();
        bad.add_task(Task::new("e", TaskType::Testing, 4.0).with_dependency("ghost"));
        let (task, dep) = bad.validate_edges().unwrap_err();
        assert_eq!(task, "e");
        assert_eq!(dep, "ghost");
    }

    #[test]
    fn test_totals() {
        let g = chain_graph();
        assert_eq!(g.total_hours(), 48.0);
        // 8h→2 + 16h→5 + 8h→2 + 16h→5
        assert_eq!(g.total_story_points(), 14);
    }

    #[test]
    fn test_empty_graph() {
        let g = TaskGraph::new();
        assert!(g.is_empty());
        assert!(g.terminals().is_empty());
        assert!(g.validate_edges().is_ok());
    }
}
