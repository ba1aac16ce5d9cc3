//! Planning inputs: features and security threats.
//!
//! Features and threats are produced by upstream requirement and
//! threat-model generators; this crate only consumes them. A feature
//! decomposes into design, implementation, testing, and review tasks;
//! a sufficiently severe threat yields a standalone mitigation task.

use serde::{Deserialize, Serialize};

use super::Priority;

/// A product feature to be decomposed into tasks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    /// Unique feature identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Business priority, inherited by most derived tasks.
    pub priority: Priority,
    /// Named sub-features; each yields an implementation and a unit-test task.
    pub sub_features: Vec<String>,
    /// IDs of features whose design must precede this feature's design.
    pub dependencies: Vec<String>,
}

/// A security threat from upstream threat modeling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Threat {
    /// Unique threat identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Threat classification (e.g., "spoofing", "tampering").
    pub category: String,
    /// Assessed impact if realized.
    pub impact: ThreatImpact,
    /// Numeric risk score (0.0–10.0, higher = worse).
    pub risk_score: f64,
    /// Mitigation steps proposed upstream.
    pub mitigation: Vec<String>,
}

/// Assessed impact of a threat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreatImpact {
    Low,
    Medium,
    High,
    Critical,
}

impl Feature {
    /// Creates a new feature.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            priority: Priority::P2,
            sub_features: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Adds a sub-feature.
    pub fn with_sub_feature(mut self, name: impl Into<String>) -> Self {
        self.sub_features.push(name.into());
        self
    }

    /// Adds a dependency on another feature.
    pub fn with_dependency(mut self, feature_id: impl Into<String>) -> Self {
        self.dependencies.push(feature_id.into());
        self
    }
}

impl Threat {
    /// Creates a new threat.
    pub fn new(id: impl Into<String>, name: impl Into<String>, impact: ThreatImpact) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: String::new(),
            impact,
            risk_score: 0.0,
            mitigation: Vec::new(),
        }
    }

    /// Sets the threat category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Sets the numeric risk score.
    pub fn with_risk_score(mut self, score: f64) -> Self {
        self.risk_score = score;
        self
    }

    /// Adds a mitigation step.
    pub fn with_mitigation(mut self, step: impl Into<String>) -> Self {
        self.mitigation.push(step.into());
        self
    }

    /// Whether this threat is severe enough to demand a dedicated
    /// mitigation task: critical impact or risk score ≥ 8.0.
    pub fn requires_mitigation_task(&self) -> bool {
        self.impact == ThreatImpact::Critical || self.risk_score >= 8.0
    }
}
