//! Compliance rule engine
//!
//! Turns detections plus their measurements into violations, one per failed
//! rule per detection. A missing or implausible measurement produces no
//! verdict at all: "not measurable from this image" is neither a pass nor a
//! violation.

use crate::catalog::RuleCatalog;
use crate::rules::{format_detected, Rule, Verdict};
use shared_types::{Detection, MeasuredValue, MeasurementSet, Violation};
use tracing::{debug, info, instrument};

/// Evaluates detections against a fixed rule catalog
#[derive(Debug, Clone, Default)]
pub struct RuleEngine {
    catalog: RuleCatalog,
}

impl RuleEngine {
    pub fn new(catalog: RuleCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    /// Check every applicable rule for every detection, in input order
    #[instrument(skip_all, fields(catalog = %self.catalog.name, detections = detections.len()))]
    pub fn evaluate(
        &self,
        detections: &[Detection],
        measurements: &MeasurementSet,
    ) -> Vec<Violation> {
        let mut violations = Vec::new();

        for detection in detections {
            for rule in self.catalog.rules_for(detection.class) {
                let value = measurements.value(detection.id, rule.measurement);
                match rule.check(value) {
                    Verdict::Violated(measured) => {
                        violations.push(violation_for(rule, detection, measured));
                    }
                    Verdict::Compliant => {}
                    Verdict::NoVerdict(reason) => {
                        debug!(
                            detection = %detection.id,
                            rule = %rule.key,
                            ?reason,
                            "No verdict"
                        );
                    }
                }
            }
        }

        info!("Found {} violations", violations.len());
        violations
    }
}

/// Evaluate with an explicit catalog
pub fn evaluate(
    detections: &[Detection],
    measurements: &MeasurementSet,
    catalog: &RuleCatalog,
) -> Vec<Violation> {
    RuleEngine::new(catalog.clone()).evaluate(detections, measurements)
}

fn violation_for(rule: &Rule, detection: &Detection, measured: MeasuredValue) -> Violation {
    Violation {
        violation_type: rule.violation_type.clone(),
        severity: rule.severity,
        detection_id: detection.id,
        detected_value: format_detected(rule.measurement, measured),
        measured,
        standard_value: rule.standard_label.clone(),
        location: rule.location.clone(),
        reference: rule.reference.clone(),
        bbox: detection.bbox,
        recommendation: rule.recommendation.clone(),
        priority: Some(rule.initial_priority()),
        cost: 0,
        labor_hours: 0,
    }
}
