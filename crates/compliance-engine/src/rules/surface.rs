// Walking surface condition: openings (ADAAG 302.3) and level changes (ADAAG 303.2)
use super::{Rule, RuleKind, Unit, MAX_SURFACE_GAP_INCHES, MAX_VERTICAL_CHANGE_INCHES};
use shared_types::{DetectionClass, MeasurementKind, Priority, Severity, ViolationType};

/// Surface gap and trip hazard rules
///
/// Surface gaps are Medium severity but scheduled as moderate (priority 3):
/// they degrade the route without being an immediate fall risk.
pub fn surface_rules() -> Vec<Rule> {
    vec![
        Rule {
            key: "surface_gap".to_string(),
            applies_to: DetectionClass::Surface,
            measurement: MeasurementKind::MaxGap,
            kind: RuleKind::MaxThreshold {
                limit: MAX_SURFACE_GAP_INCHES,
            },
            unit: Unit::Inches,
            reference: "ADAAG 302.3".to_string(),
            description: "Surface openings not to exceed 0.5 inch".to_string(),
            violation_type: ViolationType::SurfaceQuality,
            severity: Severity::Medium,
            priority: Some(Priority::Moderate),
            location: "Surface".to_string(),
            standard_label: format!("Maximum {} inch", MAX_SURFACE_GAP_INCHES),
            recommendation: "Repair or replace damaged surface".to_string(),
        },
        Rule {
            key: "trip_hazard".to_string(),
            applies_to: DetectionClass::Surface,
            measurement: MeasurementKind::VerticalChange,
            kind: RuleKind::MaxThreshold {
                limit: MAX_VERTICAL_CHANGE_INCHES,
            },
            unit: Unit::Inches,
            reference: "ADAAG 303.2".to_string(),
            description: "Vertical level changes over 0.25 inch need treatment".to_string(),
            violation_type: ViolationType::TripHazard,
            severity: Severity::High,
            priority: Some(Priority::Critical),
            location: "Surface".to_string(),
            standard_label: format!("Maximum {} inch", MAX_VERTICAL_CHANGE_INCHES),
            recommendation: "Bevel edges or install ramp".to_string(),
        },
    ]
}
