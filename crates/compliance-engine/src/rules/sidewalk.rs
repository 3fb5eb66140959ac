// Sidewalk clear width (ADAAG 403.5.1) and cross slope
use super::{Rule, RuleKind, Unit, MAX_CROSS_SLOPE_PERCENT, MIN_CLEAR_WIDTH_INCHES};
use shared_types::{DetectionClass, MeasurementKind, Priority, Severity, ViolationType};

pub fn sidewalk_rules() -> Vec<Rule> {
    vec![
        Rule {
            key: "sidewalk_width".to_string(),
            applies_to: DetectionClass::Sidewalk,
            measurement: MeasurementKind::Width,
            kind: RuleKind::MinThreshold {
                limit: MIN_CLEAR_WIDTH_INCHES,
            },
            unit: Unit::Inches,
            reference: "ADAAG 403.5.1".to_string(),
            description: "Minimum continuous clear width of 36 inches".to_string(),
            violation_type: ViolationType::SidewalkWidth,
            severity: Severity::Medium,
            priority: Some(Priority::Important),
            location: "Sidewalk".to_string(),
            standard_label: format!("Minimum {:.0} inches", MIN_CLEAR_WIDTH_INCHES),
            recommendation: "Widen sidewalk to minimum 36 inches".to_string(),
        },
        Rule {
            key: "sidewalk_cross_slope".to_string(),
            applies_to: DetectionClass::Sidewalk,
            measurement: MeasurementKind::CrossSlope,
            kind: RuleKind::MaxThreshold {
                limit: MAX_CROSS_SLOPE_PERCENT,
            },
            unit: Unit::Percent,
            reference: "ADAAG 406.3".to_string(),
            description: "Cross slope must not exceed 1:48 (2%)".to_string(),
            violation_type: ViolationType::CrossSlope,
            severity: Severity::High,
            priority: Some(Priority::Critical),
            location: "Sidewalk".to_string(),
            standard_label: format!("Maximum {:.1}%", MAX_CROSS_SLOPE_PERCENT),
            recommendation: "Regrade sidewalk to reduce cross slope".to_string(),
        },
    ]
}
