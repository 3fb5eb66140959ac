// Crossing requirements: curb ramps at crossings (ADAAG 406), markings (MUTCD 3B.18)
use super::{Rule, RuleKind, Unit, MIN_MARKING_QUALITY};
use shared_types::{DetectionClass, MeasurementKind, Priority, Severity, ViolationType};

pub fn crosswalk_rules() -> Vec<Rule> {
    vec![
        Rule {
            key: "crosswalk_curb_ramps".to_string(),
            applies_to: DetectionClass::Crosswalk,
            measurement: MeasurementKind::HasCurbRamps,
            kind: RuleKind::RequiredBoolean,
            unit: Unit::None,
            reference: "ADAAG 406".to_string(),
            description: "Curb ramps required where pedestrian routes cross curbs".to_string(),
            violation_type: ViolationType::MissingCurbRamps,
            severity: Severity::High,
            priority: Some(Priority::Critical),
            location: "Crosswalk".to_string(),
            standard_label: "Curb ramps required at all crossings".to_string(),
            recommendation: "Install compliant curb ramps".to_string(),
        },
        Rule {
            key: "crosswalk_markings".to_string(),
            applies_to: DetectionClass::Crosswalk,
            measurement: MeasurementKind::MarkingQuality,
            kind: RuleKind::MinThreshold {
                limit: MIN_MARKING_QUALITY,
            },
            unit: Unit::Score,
            reference: "MUTCD Section 3B.18".to_string(),
            description: "Crosswalk markings must be clear and visible".to_string(),
            violation_type: ViolationType::CrosswalkMarkings,
            severity: Severity::Medium,
            priority: Some(Priority::Important),
            location: "Crosswalk".to_string(),
            standard_label: "Clear and visible markings required".to_string(),
            recommendation: "Repaint crosswalk markings".to_string(),
        },
    ]
}
