//! Risk register derivation.
//!
//! Builds the project risk register from the threat list and the
//! schedule buffer. Every planning run yields at least the two fixed
//! organizational risks (key person, external dependencies); the rest
//! are data-driven: one technical risk per P0 feature, one security
//! risk per critical threat, and a schedule risk when the buffer is
//! thin.

use tracing::debug;

use crate::models::{Feature, Priority, RiskCategory, RiskItem, RiskLevel, Threat, ThreatImpact};

/// Buffers below this many hours raise a schedule risk.
const SCHEDULE_BUFFER_FLOOR: f64 = 5.0;

/// Threat scores at or above this map to High probability.
const HIGH_PROBABILITY_SCORE: f64 = 8.0;

/// Derives the risk register for one planning run.
///
/// Risk IDs (`RISK-001`, …) come from a run-local sequence.
#[derive(Debug, Default)]
pub struct RiskRegisterGenerator {
    next_id: u32,
}

impl RiskRegisterGenerator {
    /// Creates a generator with a fresh ID sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the register from features, threats, and the computed
    /// schedule buffer (hours).
    pub fn generate(
        mut self,
        features: &[Feature],
        threats: &[Threat],
        buffer_hours: f64,
    ) -> Vec<RiskItem> {
        let mut register = Vec::new();

        for feature in features {
            if feature.priority == Priority::P0 {
                register.push(
                    RiskItem::new(
                        self.next_risk_id(),
                        RiskCategory::Technical,
                        RiskLevel::Medium,
                        RiskLevel::High,
                    )
                    .with_mitigation(format!(
                        "Early design review and prototyping for '{}'",
                        feature.name
                    ))
                    .with_contingency("Descope to a minimum viable slice")
                    .with_owner("Tech Lead"),
                );
            }
        }

        for threat in threats {
            if threat.impact == ThreatImpact::Critical {
                let probability = if threat.risk_score >= HIGH_PROBABILITY_SCORE {
                    RiskLevel::High
                } else {
                    RiskLevel::Medium
                };
                let mitigation = if threat.mitigation.is_empty() {
                    format!("Implement controls for '{}'", threat.name)
                } else {
                    threat.mitigation.join("; ")
                };
                register.push(
                    RiskItem::new(
                        self.next_risk_id(),
                        RiskCategory::Security,
                        probability,
                        RiskLevel::High,
                    )
                    .with_mitigation(mitigation)
                    .with_contingency("Invoke incident response and hotfix procedures")
                    .with_owner("Tech Lead"),
                );
            }
        }

        register.push(
            RiskItem::new(
                self.next_risk_id(),
                RiskCategory::Resource,
                RiskLevel::Medium,
                RiskLevel::High,
            )
            .with_mitigation("Pair rotation and documentation of critical components")
            .with_contingency("Cross-train a second owner per module")
            .with_owner("Engineering Manager"),
        );

        if buffer_hours < SCHEDULE_BUFFER_FLOOR {
            register.push(
                RiskItem::new(
                    self.next_risk_id(),
                    RiskCategory::Schedule,
                    RiskLevel::High,
                    RiskLevel::Medium,
                )
                .with_mitigation("Track velocity weekly and re-baseline at sprint boundaries")
                .with_contingency("Cut P2/P3 scope to protect the critical path")
                .with_owner("Project Manager"),
            );
        }

        register.push(
            RiskItem::new(
                self.next_risk_id(),
                RiskCategory::External,
                RiskLevel::Medium,
                RiskLevel::Medium,
            )
            .with_mitigation("Pin third-party versions and mirror critical dependencies")
            .with_contingency("Keep a vetted fallback for each external service")
            .with_owner("Project Manager"),
        );

        debug!(items = register.len(), "risk register derived");
        register
    }

    fn next_risk_id(&mut self) -> String {
        self.next_id += 1;
        format!("RISK-{:03}", self.next_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RiskStatus;

    #[test]
    fn test_fixed_risks_always_present() {
        let register = RiskRegisterGenerator::new().generate(&[], &[], 100.0);
        assert_eq!(register.len(), 2);
        assert_eq!(register[0].category, RiskCategory::Resource);
        assert_eq!(register[1].category, RiskCategory::External);
        assert!(register.iter().all(|r| r.status == RiskStatus::Open));
    }

    #[test]
    fn test_p0_feature_raises_technical_risk() {
        let features = vec![
            Feature::new("F1", "Payments").with_priority(Priority::P0),
            Feature::new("F2", "Reporting").with_priority(Priority::P2),
        ];
        let register = RiskRegisterGenerator::new().generate(&features, &[], 100.0);

        let technical: Vec<_> = register
            .iter()
            .filter(|r| r.category == RiskCategory::Technical)
            .collect();
        assert_eq!(technical.len(), 1);
        assert!(technical[0].mitigation.contains("Payments"));
        assert_eq!(technical[0].score, 6);
        assert_eq!(technical[0].owner, "Tech Lead");
    }

    #[test]
    fn test_critical_threat_raises_security_risk() {
        let threats = vec![
            Threat::new("T1", "SQL injection", ThreatImpact::Critical)
                .with_risk_score(9.0)
                .with_mitigation("Parameterize queries")
                .with_mitigation("Add input validation"),
            Threat::new("T2", "Log spoofing", ThreatImpact::Low).with_risk_score(2.0),
        ];
        let register = RiskRegisterGenerator::new().generate(&[], &threats, 100.0);

        let security: Vec<_> = register
            .iter()
            .filter(|r| r.category == RiskCategory::Security)
            .collect();
        assert_eq!(security.len(), 1);
        // risk_score 9.0 → High probability × High impact = 9.
        assert_eq!(security[0].score, 9);
        assert_eq!(security[0].mitigation, "Parameterize queries; Add input validation");
    }

    #[test]
    fn test_critical_threat_with_moderate_score() {
        let threats =
            vec![Threat::new("T1", "Privilege escalation", ThreatImpact::Critical)
                .with_risk_score(6.5)];
        let register = RiskRegisterGenerator::new().generate(&[], &threats, 100.0);

        let security = register
            .iter()
            .find(|r| r.category == RiskCategory::Security)
            .unwrap();
        assert_eq!(security.probability, RiskLevel::Medium);
        assert_eq!(security.score, 6);
        assert!(security.mitigation.contains("Privilege escalation"));
    }

    #[test]
    fn test_thin_buffer_raises_schedule_risk() {
        let register = RiskRegisterGenerator::new().generate(&[], &[], 4.0);
        assert!(register
            .iter()
            .any(|r| r.category == RiskCategory::Schedule));

        let register = RiskRegisterGenerator::new().generate(&[], &[], 5.0);
        assert!(!register
            .iter()
            .any(|r| r.category == RiskCategory::Schedule));
    }

    #[test]
    fn test_ids_are_sequential() {
        let features = vec![Feature::new("F1", "Core").with_priority(Priority::P0)];
        let register = RiskRegisterGenerator::new().generate(&features, &[], 0.0);
        let ids: Vec<&str> = register.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["RISK-001", "RISK-002", "RISK-003", "RISK-004"]);
    }
}
