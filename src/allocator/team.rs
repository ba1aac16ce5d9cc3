//! Team allocation: task-to-member assignment and utilization.
//!
//! Each task type maps to a skill tag through a small declarative table
//! resolved when the allocator is built. Members carrying the tag
//! receive matching tasks round-robin; a task no roster member can take
//! is booked under an explicit "Unassigned" role rather than silently
//! mismatched. Overallocation is reported, never auto-corrected.

use std::collections::{BTreeMap, HashMap};
use tracing::warn;

use crate::error::PlanWarning;
use crate::models::{MemberLoad, SprintPlan, TaskGraph, TaskType, TeamAllocation, TeamMember};
use crate::planner::PlanConfig;

/// Utilization above this fraction raises an overallocation warning.
pub const OVERALLOCATION_THRESHOLD: f64 = 0.8;

/// Role booked for tasks no roster member can take.
pub const UNASSIGNED_ROLE: &str = "Unassigned";

/// Task-type → skill-tag table.
const ROLE_RULES: [(TaskType, &str); 6] = [
    (TaskType::Design, "architecture"),
    (TaskType::Development, "backend"),
    (TaskType::Testing, "testing"),
    (TaskType::Security, "security"),
    (TaskType::Documentation, "documentation"),
    (TaskType::Devops, "devops"),
];

/// Maps tasks onto roster members and computes utilization.
#[derive(Debug, Clone)]
pub struct TeamAllocator {
    roster: Vec<TeamMember>,
    member_hours_per_sprint: f64,
    /// Skill tag → indices of roster members carrying it, resolved once
    /// at construction.
    members_by_tag: HashMap<&'static str, Vec<usize>>,
}

impl TeamAllocator {
    /// Creates an allocator for a roster, resolving the role table.
    pub fn new(roster: Vec<TeamMember>, config: &PlanConfig) -> Self {
        let mut members_by_tag: HashMap<&'static str, Vec<usize>> = HashMap::new();
        for (_, tag) in ROLE_RULES {
            let members: Vec<usize> = roster
                .iter()
                .enumerate()
                .filter(|(_, m)| m.has_skill(tag))
                .map(|(i, _)| i)
                .collect();
            members_by_tag.insert(tag, members);
        }
        Self {
            roster,
            member_hours_per_sprint: config.member_hours_per_sprint(),
            members_by_tag,
        }
    }

    /// Assigns every task to a roster member and computes loads.
    ///
    /// Tasks are walked in graph order, so the round-robin cursor per
    /// skill tag is deterministic.
    pub fn allocate(
        &self,
        graph: &TaskGraph,
        sprints: &[SprintPlan],
    ) -> (TeamAllocation, Vec<PlanWarning>) {
        let mut task_ids: Vec<Vec<String>> = vec![Vec::new(); self.roster.len()];
        let mut hours: Vec<f64> = vec![0.0; self.roster.len()];
        let mut cursors: HashMap<&'static str, usize> = HashMap::new();
        let mut workload_by_sprint: BTreeMap<u32, BTreeMap<String, f64>> = BTreeMap::new();

        for task in &graph.tasks {
            let tag = skill_tag(task.task_type);
            let candidates = &self.members_by_tag[tag];

            let role = if candidates.is_empty() {
                warn!(task = %task.id, tag, "no roster member matches; booking as unassigned");
                UNASSIGNED_ROLE.to_string()
            } else {
                let cursor = cursors.entry(tag).or_insert(0);
                let member = candidates[*cursor % candidates.len()];
                *cursor += 1;
                task_ids[member].push(task.id.clone());
                hours[member] += task.estimated_hours;
                self.roster[member].role.clone()
            };

            if let Some(sprint) = task.sprint {
                *workload_by_sprint
                    .entry(sprint)
                    .or_default()
                    .entry(role)
                    .or_insert(0.0) += task.estimated_hours;
            }
        }

        let available = sprints.len() as f64 * self.member_hours_per_sprint;
        let mut warnings = Vec::new();
        let members: Vec<MemberLoad> = self
            .roster
            .iter()
            .enumerate()
            .map(|(i, member)| {
                let utilization = if available > 0.0 { hours[i] / available } else { 0.0 };
                if utilization > OVERALLOCATION_THRESHOLD {
                    warn!(
                        member = %member.name,
                        utilization,
                        "member overallocated"
                    );
                    warnings.push(PlanWarning::Overallocation {
                        member: member.name.clone(),
                        utilization,
                    });
                }
                MemberLoad {
                    name: member.name.clone(),
                    role: member.role.clone(),
                    task_ids: std::mem::take(&mut task_ids[i]),
                    total_hours: hours[i],
                    utilization,
                }
            })
            .collect();

        (
            TeamAllocation {
                members,
                workload_by_sprint,
            },
            warnings,
        )
    }
}

/// Resolves a task type to its skill tag.
fn skill_tag(task_type: TaskType) -> &'static str {
    ROLE_RULES
        .iter()
        .find(|(t, _)| *t == task_type)
        .map(|(_, tag)| *tag)
        .expect("every task type has a rule")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{default_roster, Task};
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn config(team_size: u32, weeks: u32) -> PlanConfig {
        PlanConfig::new(team_size, weeks, date("2024-01-01"))
    }

    fn one_sprint(capacity: u32) -> Vec<SprintPlan> {
        vec![SprintPlan::new(
            1,
            date("2024-01-01"),
            date("2024-01-14"),
            capacity,
        )]
    }

    #[test]
    fn test_tasks_map_to_matching_roles() {
        let cfg = config(5, 2);
        let allocator = TeamAllocator::new(default_roster(5), &cfg);
        let graph = TaskGraph::from_tasks(vec![
            Task::new("design", TaskType::Design, 8.0).with_sprint(1),
            Task::new("impl", TaskType::Development, 16.0).with_sprint(1),
            Task::new("test", TaskType::Testing, 8.0).with_sprint(1),
            Task::new("ci", TaskType::Devops, 16.0).with_sprint(1),
        ]);

        let (allocation, _) = allocator.allocate(&graph, &one_sprint(45));

        // Tech Lead carries "architecture"; QA carries "testing".
        assert!(allocation.member("Tech Lead").unwrap().task_ids.contains(&"design".to_string()));
        assert!(allocation.member("QA Engineer").unwrap().task_ids.contains(&"test".to_string()));
        assert!(allocation.member("DevOps Engineer").unwrap().task_ids.contains(&"ci".to_string()));
    }

    #[test]
    fn test_round_robin_across_shared_tag() {
        // Tech Lead and Backend Developer both carry "backend".
        let cfg = config(2, 2);
        let allocator = TeamAllocator::new(default_roster(2), &cfg);
        let graph = TaskGraph::from_tasks(vec![
            Task::new("i1", TaskType::Development, 16.0).with_sprint(1),
            Task::new("i2", TaskType::Development, 16.0).with_sprint(1),
            Task::new("i3", TaskType::Development, 16.0).with_sprint(1),
            Task::new("i4", TaskType::Development, 16.0).with_sprint(1),
        ]);

        let (allocation, _) = allocator.allocate(&graph, &one_sprint(45));

        let lead = allocation.member("Tech Lead").unwrap();
        let backend = allocation.member("Backend Developer").unwrap();
        assert_eq!(lead.task_ids, vec!["i1", "i3"]);
        assert_eq!(backend.task_ids, vec!["i2", "i4"]);
        assert_eq!(lead.total_hours, 32.0);
        assert_eq!(backend.total_hours, 32.0);
    }

    #[test]
    fn test_unassigned_fallback() {
        // A 2-member roster (Tech Lead, Backend Developer) has nobody
        // tagged "documentation".
        let cfg = config(2, 2);
        let allocator = TeamAllocator::new(default_roster(2), &cfg);
        let graph = TaskGraph::from_tasks(vec![
            Task::new("docs", TaskType::Documentation, 8.0).with_sprint(1)
        ]);

        let (allocation, _) = allocator.allocate(&graph, &one_sprint(45));

        for member in &allocation.members {
            assert!(member.task_ids.is_empty());
        }
        assert_eq!(
            allocation.workload_by_sprint[&1][UNASSIGNED_ROLE], 8.0,
            "unmatched work must be booked explicitly"
        );
    }

    #[test]
    fn test_utilization_and_overallocation_warning() {
        // One member, one 2-week sprint → 60 available hours. 56 hours
        // of work → 93% utilization.
        let cfg = config(1, 2);
        let allocator = TeamAllocator::new(default_roster(1), &cfg);
        let graph = TaskGraph::from_tasks(vec![
            Task::new("i1", TaskType::Development, 40.0).with_sprint(1),
            Task::new("i2", TaskType::Development, 16.0).with_sprint(1),
        ]);

        let (allocation, warnings) = allocator.allocate(&graph, &one_sprint(15));

        let lead = allocation.member("Tech Lead").unwrap();
        assert!((lead.utilization - 56.0 / 60.0).abs() < 1e-9);
        assert_eq!(warnings.len(), 1);
        assert!(matches!(
            &warnings[0],
            PlanWarning::Overallocation { member, .. } if member == "Tech Lead"
        ));
    }

    #[test]
    fn test_workload_breakdown_by_sprint_and_role() {
        let cfg = config(5, 2);
        let allocator = TeamAllocator::new(default_roster(5), &cfg);
        let graph = TaskGraph::from_tasks(vec![
            Task::new("design", TaskType::Design, 8.0).with_sprint(1),
            Task::new("impl", TaskType::Development, 16.0).with_sprint(2),
            Task::new("test", TaskType::Testing, 8.0).with_sprint(2),
        ]);
        let sprints = vec![
            SprintPlan::new(1, date("2024-01-01"), date("2024-01-14"), 45),
            SprintPlan::new(2, date("2024-01-15"), date("2024-01-28"), 45),
        ];

        let (allocation, _) = allocator.allocate(&graph, &sprints);

        assert_eq!(allocation.workload_by_sprint[&1]["Tech Lead"], 8.0);
        assert_eq!(allocation.workload_by_sprint[&2]["Backend Developer"], 16.0);
        assert_eq!(allocation.workload_by_sprint[&2]["QA Engineer"], 8.0);
    }

    #[test]
    fn test_no_sprints_means_zero_utilization() {
        let cfg = config(1, 2);
        let allocator = TeamAllocator::new(default_roster(1), &cfg);
        let graph = TaskGraph::from_tasks(vec![
            Task::new("i1", TaskType::Development, 16.0)
        ]);

        let (allocation, warnings) = allocator.allocate(&graph, &[]);
        assert_eq!(allocation.members[0].utilization, 0.0);
        assert!(warnings.is_empty());
    }
}
