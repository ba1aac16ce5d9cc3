//! Risk register model.
//!
//! Risk items are derived from the threat list and the schedule buffer,
//! never entered by hand. Probability and impact are three-level scales;
//! the numeric score is their product (1–9).

use serde::{Deserialize, Serialize};

/// An entry in the project risk register.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskItem {
    /// Unique risk identifier.
    pub id: String,
    /// Risk classification.
    pub category: RiskCategory,
    /// Likelihood of the risk materializing.
    pub probability: RiskLevel,
    /// Severity if it does.
    pub impact: RiskLevel,
    /// Numeric score: probability level × impact level (1–9).
    pub score: u8,
    /// How the risk is being reduced.
    pub mitigation: String,
    /// What happens if it materializes anyway.
    pub contingency: String,
    /// Role responsible for tracking this risk.
    pub owner: String,
    /// Register lifecycle state.
    pub status: RiskStatus,
}

/// Risk classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskCategory {
    /// Delivery risk on complex or critical features.
    Technical,
    /// Unmitigated or partially mitigated threats.
    Security,
    /// Staffing and key-person exposure.
    Resource,
    /// Insufficient schedule buffer.
    Schedule,
    /// Third-party and external dependencies.
    External,
}

/// Three-level probability/impact scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Register lifecycle state.
///
/// A planning run always emits `Open`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskStatus {
    Open,
    Mitigated,
    Closed,
}

impl RiskLevel {
    /// Numeric level: Low=1, Medium=2, High=3.
    pub fn level(self) -> u8 {
        match self {
            RiskLevel::Low => 1,
            RiskLevel::Medium => 2,
            RiskLevel::High => 3,
        }
    }
}

impl RiskItem {
    /// Creates a new open risk; the score is computed from the levels.
    pub fn new(
        id: impl Into<String>,
        category: RiskCategory,
        probability: RiskLevel,
        impact: RiskLevel,
    ) -> Self {
        Self {
            id: id.into(),
            category,
            probability,
            impact,
            score: probability.level() * impact.level(),
            mitigation: String::new(),
            contingency: String::new(),
            owner: String::new(),
            status: RiskStatus::Open,
        }
    }

    /// Sets the mitigation text.
    pub fn with_mitigation(mut self, text: impl Into<String>) -> Self {
        self.mitigation = text.into();
        self
    }

    /// Sets the contingency text.
    pub fn with_contingency(mut self, text: impl Into<String>) -> Self {
        self.contingency = text.into();
        self
    }

    /// Sets the owning role.
    pub fn with_owner(mut self, role: impl Into<String>) -> Self {
        self.owner = role.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_is_product_of_levels() {
        let r = RiskItem::new("RISK-001", RiskCategory::Technical, RiskLevel::Medium, RiskLevel::High);
        assert_eq!(r.score, 6);

        let worst = RiskItem::new("RISK-002", RiskCategory::Security, RiskLevel::High, RiskLevel::High);
        assert_eq!(worst.score, 9);

        let best = RiskItem::new("RISK-003", RiskCategory::External, RiskLevel::Low, RiskLevel::Low);
        assert_eq!(best.score, 1);
    }

    #[test]
    fn test_new_risk_is_open() {
        let r = RiskItem::new("RISK-001", RiskCategory::Schedule, RiskLevel::High, RiskLevel::Medium)
            .with_mitigation("Re-baseline the plan")
            .with_contingency("Cut scope")
            .with_owner("Tech Lead");
        assert_eq!(r.status, RiskStatus::Open);
        assert_eq!(r.owner, "Tech Lead");
        assert_eq!(r.score, 6);
    }

    #[test]
    fn test_levels() {
        assert_eq!(RiskLevel::Low.level(), 1);
        assert_eq!(RiskLevel::Medium.level(), 2);
        assert_eq!(RiskLevel::High.level(), 3);
        assert!(RiskLevel::Low < RiskLevel::High);
    }
}
