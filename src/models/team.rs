//! Team model.
//!
//! Roster members carry a role and skill tags; the team allocator maps
//! tasks onto them and reports per-member load and utilization. Ordered
//! maps keep the per-sprint breakdown deterministic when serialized.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A roster member available for task assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMember {
    /// Member name (unique within a roster).
    pub name: String,
    /// Role title (e.g., "Backend Developer").
    pub role: String,
    /// Skill tags used for task-to-role matching.
    pub skills: Vec<String>,
}

/// Computed workload for one roster member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberLoad {
    /// Member name.
    pub name: String,
    /// Role title.
    pub role: String,
    /// IDs of tasks assigned to this member.
    pub task_ids: Vec<String>,
    /// Total estimated hours across assigned tasks.
    pub total_hours: f64,
    /// Utilization as a fraction of available hours (1.0 = fully booked).
    pub utilization: f64,
}

/// The full team allocation result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamAllocation {
    /// Per-member load, in roster order.
    pub members: Vec<MemberLoad>,
    /// Hours per sprint per role: sprint number → role → hours.
    pub workload_by_sprint: BTreeMap<u32, BTreeMap<String, f64>>,
}

impl TeamMember {
    /// Creates a new roster member.
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            skills: Vec::new(),
        }
    }

    /// Adds a skill tag.
    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        self.skills.push(skill.into());
        self
    }

    /// Whether this member carries the given skill tag.
    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills.iter().any(|s| s == skill)
    }
}

impl TeamAllocation {
    /// Looks up a member's load by name.
    pub fn member(&self, name: &str) -> Option<&MemberLoad> {
        self.members.iter().find(|m| m.name == name)
    }

    /// Members with utilization above the given threshold.
    pub fn overallocated(&self, threshold: f64) -> Vec<&MemberLoad> {
        self.members
            .iter()
            .filter(|m| m.utilization > threshold)
            .collect()
    }
}

/// Role templates for generated rosters, as (role, skills) pairs.
///
/// Rosters larger than the template cycle through it with numbered names
/// ("Backend Developer 2", ...).
const ROSTER_TEMPLATE: [(&str, &[&str]); 5] = [
    ("Tech Lead", &["architecture", "backend", "security"]),
    ("Backend Developer", &["backend", "api", "database"]),
    ("Frontend Developer", &["frontend", "ui"]),
    ("QA Engineer", &["testing", "automation"]),
    ("DevOps Engineer", &["devops", "ci", "monitoring"]),
];

/// Generates a default roster of the given size.
///
/// Used when the caller supplies no roster of their own. Deterministic:
/// the same size always yields the same members.
pub fn default_roster(team_size: u32) -> Vec<TeamMember> {
    let mut roster = Vec::with_capacity(team_size as usize);
    for i in 0..team_size as usize {
        let (role, skills) = ROSTER_TEMPLATE[i % ROSTER_TEMPLATE.len()];
        let round = i / ROSTER_TEMPLATE.len() + 1;
        let name = if round == 1 {
            role.to_string()
        } else {
            format!("{role} {round}")
        };
        let mut member = TeamMember::new(name, role);
        for &skill in skills {
            member.skills.push(skill.to_string());
        }
        roster.push(member);
    }
    roster
}
