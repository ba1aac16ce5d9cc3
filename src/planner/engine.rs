//! Planning pipeline.
//!
//! Wires the components into one pure, synchronous run:
//! build the task graph, analyze the critical path, pack sprints,
//! assign the team, derive risks. The engine holds no state across
//! runs; independent runs may execute concurrently with zero
//! coordination.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::allocator::{SprintAllocator, TeamAllocator};
use crate::builder::TaskGraphBuilder;
use crate::critical_path::CriticalPathAnalysis;
use crate::error::{PlanResult, PlanWarning};
use crate::models::{
    default_roster, Feature, RiskItem, SprintPlan, Task, TeamAllocation, TeamMember, Threat,
};
use crate::planner::PlanConfig;
use crate::risk::RiskRegisterGenerator;

/// Input container for one planning run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRequest {
    /// Features to decompose and schedule.
    pub features: Vec<Feature>,
    /// Threats from upstream threat modeling.
    pub threats: Vec<Threat>,
    /// Roster to allocate against. Empty = generate a default roster
    /// of `config.team_size` members.
    pub roster: Vec<TeamMember>,
    /// Run configuration.
    pub config: PlanConfig,
}

/// The complete output of a planning run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectPlan {
    /// All tasks, with sprint assignments filled in.
    pub tasks: Vec<Task>,
    /// Ordered sprint plans.
    pub sprints: Vec<SprintPlan>,
    /// Per-member loads and the workload breakdown.
    pub team_allocation: TeamAllocation,
    /// Critical-path analysis of the task graph.
    pub critical_path: CriticalPathAnalysis,
    /// Derived risk register.
    pub risk_register: Vec<RiskItem>,
    /// Non-fatal findings (capacity overflow, overallocation).
    pub warnings: Vec<PlanWarning>,
}

/// The scheduling engine.
#[derive(Debug, Clone, Default)]
pub struct Planner;

impl PlanRequest {
    /// Creates a request with a generated roster.
    pub fn new(features: Vec<Feature>, threats: Vec<Threat>, config: PlanConfig) -> Self {
        Self {
            features,
            threats,
            roster: Vec::new(),
            config,
        }
    }

    /// Supplies an explicit roster.
    pub fn with_roster(mut self, roster: Vec<TeamMember>) -> Self {
        self.roster = roster;
        self
    }
}

impl ProjectPlan {
    /// Looks up a task by ID.
    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Looks up a sprint by number.
    pub fn sprint(&self, number: u32) -> Option<&SprintPlan> {
        self.sprints.iter().find(|s| s.number == number)
    }
}

impl Planner {
    /// Creates a planner.
    pub fn new() -> Self {
        Self
    }

    /// Runs the full pipeline.
    ///
    /// Fails eagerly on malformed configuration, then on structural
    /// input defects, then on dependency cycles; every failure is a
    /// typed [`crate::error::PlanError`] and leaves no partial output.
    pub fn plan(&self, request: &PlanRequest) -> PlanResult<ProjectPlan> {
        request.config.validate()?;

        let mut graph = TaskGraphBuilder::new().build(&request.features, &request.threats)?;
        let analysis = CriticalPathAnalysis::analyze(&graph)?;

        let (sprints, mut warnings) =
            SprintAllocator::new(&request.config).allocate(&mut graph, &analysis);

        let roster = if request.roster.is_empty() {
            default_roster(request.config.team_size)
        } else {
            request.roster.clone()
        };
        let (team_allocation, team_warnings) =
            TeamAllocator::new(roster, &request.config).allocate(&graph, &sprints);
        warnings.extend(team_warnings);

        let risk_register = RiskRegisterGenerator::new().generate(
            &request.features,
            &request.threats,
            analysis.buffer_hours,
        );

        info!(
            tasks = graph.len(),
            sprints = sprints.len(),
            risks = risk_register.len(),
            warnings = warnings.len(),
            "planning run complete"
        );

        Ok(ProjectPlan {
            tasks: graph.tasks,
            sprints,
            team_allocation,
            critical_path: analysis,
            risk_register,
            warnings,
        })
    }
}
