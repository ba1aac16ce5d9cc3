//! Project scheduling engine.
//!
//! Turns a feature list and a threat list into an executable plan:
//! an atomic task graph with precedence edges, a critical-path analysis
//! (CPM forward/backward pass), a precedence-respecting allocation of
//! tasks into fixed-capacity sprints, a task-to-member team allocation,
//! and a derived risk register.
//!
//! The engine is a pure function of its inputs: no I/O, no clock, no
//! randomness. Identical inputs always produce byte-identical output,
//! and independent runs share nothing. Upstream generators produce the
//! `Feature`/`Threat` inputs; downstream renderers consume the typed
//! [`planner::ProjectPlan`] — neither concern lives here.
//!
//! # Modules
//!
//! - **`models`**: domain types — `Feature`, `Threat`, `Task`,
//!   `TaskGraph`, `SprintPlan`, `TeamMember`, `RiskItem`
//! - **`builder`**: feature/threat decomposition into the task graph
//! - **`critical_path`**: topological sort, forward/backward pass,
//!   slack, critical chain
//! - **`allocator`**: sprint bin packing and team assignment
//! - **`risk`**: risk register derivation
//! - **`planner`**: configuration and the end-to-end pipeline
//! - **`validation`**: structural input checks
//!
//! # Example
//!
//! ```
//! use iterplan::models::{Feature, Priority};
//! use iterplan::planner::{PlanConfig, PlanRequest, Planner};
//!
//! let features = vec![Feature::new("F1", "User auth")
//!     .with_priority(Priority::P1)
//!     .with_sub_feature("login")];
//! let config = PlanConfig::with_start_date_str(3, 2, "2024-01-01").unwrap();
//!
//! let plan = Planner::new()
//!     .plan(&PlanRequest::new(features, vec![], config))
//!     .unwrap();
//! assert!(!plan.sprints.is_empty());
//! ```
//!
//! # References
//!
//! - Kelley & Walker (1959), "Critical-Path Planning and Scheduling"
//! - Kerzner (2017), "Project Management", Ch. 11–12

pub mod allocator;
pub mod builder;
pub mod critical_path;
pub mod error;
pub mod models;
pub mod planner;
pub mod risk;
pub mod validation;

pub use error::{PlanError, PlanResult, PlanWarning};
pub use planner::{PlanConfig, PlanRequest, Planner, ProjectPlan};
