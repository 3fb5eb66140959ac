// Curb ramp requirements per ADAAG 406 and 705
use super::{
    Rule, RuleKind, Unit, MAX_CROSS_SLOPE_PERCENT, MAX_RUNNING_SLOPE_PERCENT, MIN_LANDING_INCHES,
};
use shared_types::{DetectionClass, MeasurementKind, Priority, Severity, ViolationType};

/// Running slope, cross slope, detectable warning and landing rules
pub fn curb_ramp_rules() -> Vec<Rule> {
    vec![
        Rule {
            key: "curb_ramp_slope".to_string(),
            applies_to: DetectionClass::CurbRamp,
            measurement: MeasurementKind::Slope,
            kind: RuleKind::MaxThreshold {
                limit: MAX_RUNNING_SLOPE_PERCENT,
            },
            unit: Unit::Percent,
            reference: "ADAAG 406.2".to_string(),
            description: "Curb ramp running slope must not exceed 1:12 (8.33%)".to_string(),
            violation_type: ViolationType::CurbRampSlope,
            severity: Severity::High,
            priority: Some(Priority::Critical),
            location: "Detected curb ramp".to_string(),
            standard_label: format!("≤{}% (1:12 ratio)", MAX_RUNNING_SLOPE_PERCENT),
            recommendation: "Reconstruct ramp to meet 1:12 maximum slope".to_string(),
        },
        Rule {
            key: "curb_ramp_cross_slope".to_string(),
            applies_to: DetectionClass::CurbRamp,
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
            location: "Curb ramp cross slope".to_string(),
            standard_label: format!("≤{:.1}%", MAX_CROSS_SLOPE_PERCENT),
            recommendation: "Adjust cross slope to maximum 2%".to_string(),
        },
        Rule {
            key: "detectable_warning".to_string(),
            applies_to: DetectionClass::CurbRamp,
            measurement: MeasurementKind::DetectableWarning,
            kind: RuleKind::RequiredBoolean,
            unit: Unit::None,
            reference: "ADAAG 705".to_string(),
            description: "Detectable warning surfaces required at curb ramps".to_string(),
            violation_type: ViolationType::DetectableWarning,
            severity: Severity::High,
            priority: Some(Priority::Critical),
            location: "Curb ramp".to_string(),
            standard_label: "Required at all curb ramps".to_string(),
            recommendation: "Install truncated dome detectable warning surface".to_string(),
        },
        Rule {
            key: "landing_size".to_string(),
            applies_to: DetectionClass::CurbRamp,
            measurement: MeasurementKind::LandingSize,
            kind: RuleKind::MinPair {
                first: MIN_LANDING_INCHES,
                second: MIN_LANDING_INCHES,
            },
            unit: Unit::Inches,
            reference: "ADAAG 406.4".to_string(),
            description: "Landing must be 36\" x 36\" minimum".to_string(),
            violation_type: ViolationType::LandingSize,
            severity: Severity::Medium,
            priority: Some(Priority::Important),
            location: "Curb ramp landing".to_string(),
            standard_label: format!(
                "≥{:.0}\" x {:.0}\"",
                MIN_LANDING_INCHES, MIN_LANDING_INCHES
            ),
            recommendation: "Expand landing to minimum 36\" x 36\"".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use crate::engine::RuleEngine;
    use pretty_assertions::assert_eq;
    use shared_types::{
        BoundingBox, Detection, DetectionClass, DetectionId, MeasurementSet, Measurements,
        Priority, Severity, ViolationType,
    };

    fn ramp() -> Detection {
        Detection::new(1, DetectionClass::CurbRamp, 0.9, BoundingBox::new(0.0, 0.0, 50.0, 40.0))
    }

    fn evaluate(m: Measurements) -> Vec<shared_types::Violation> {
        let mut set = MeasurementSet::new();
        set.insert(DetectionId(1), m);
        RuleEngine::default().evaluate(&[ramp()], &set)
    }

    #[test]
    fn test_steep_ramp_is_one_high_violation() {
        let violations = evaluate(Measurements {
            slope: Some(12.0),
            ..Default::default()
        });

        assert_eq!(violations.len(), 1);
        let v = &violations[0];
        assert_eq!(v.violation_type, ViolationType::CurbRampSlope);
        assert_eq!(v.severity, Severity::High);
        assert_eq!(v.priority, Some(Priority::Critical));
        assert_eq!(v.reference, "ADAAG 406.2");
        assert_eq!(v.detected_value, "12.0% (1:8.3 ratio)");
        assert_eq!(v.standard_value, "≤8.33% (1:12 ratio)");
        assert_eq!(v.bbox, ramp().bbox);
    }

    #[test]
    fn test_missing_detectable_warning() {
        let violations = evaluate(Measurements {
            detectable_warning: Some(false),
            ..Default::default()
        });
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].violation_type, ViolationType::DetectableWarning);
        assert_eq!(violations[0].detected_value, "Missing");
    }

    #[test]
    fn test_small_landing_is_medium() {
        let violations = evaluate(Measurements {
            landing_size: Some((40.0, 30.0)),
            ..Default::default()
        });
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].violation_type, ViolationType::LandingSize);
        assert_eq!(violations[0].severity, Severity::Medium);
        assert_eq!(violations[0].priority, Some(Priority::Important));
    }

    #[test]
    fn test_compliant_ramp_has_no_violations() {
        let violations = evaluate(Measurements {
            slope: Some(8.33),
            cross_slope: Some(1.5),
            detectable_warning: Some(true),
            landing_size: Some((36.0, 36.0)),
            ..Default::default()
        });
        assert!(violations.is_empty());
    }

    #[test]
    fn test_ramp_ignores_sidewalk_measurements() {
        let violations = evaluate(Measurements {
            width: Some(20.0),
            ..Default::default()
        });
        assert!(violations.is_empty());
    }
}
