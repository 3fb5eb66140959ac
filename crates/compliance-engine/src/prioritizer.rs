//! Violation prioritizer
//!
//! Priority 1 = critical (safety hazard), 2 = important (accessibility
//! barrier), 3 = moderate (minor compliance issue).

use crate::costs::CostTable;
use shared_types::Violation;
use std::cmp::Reverse;

/// Attaches unit costs, finalizes priorities and orders violations
#[derive(Debug, Clone, Default)]
pub struct Prioritizer {
    costs: CostTable,
}

impl Prioritizer {
    pub fn new(costs: CostTable) -> Self {
        Self { costs }
    }

    pub fn prioritize(&self, mut violations: Vec<Violation>) -> Vec<Violation> {
        for violation in &mut violations {
            let (cost, labor_hours) = self.costs.unit_cost(&violation.violation_type);
            violation.cost = cost;
            violation.labor_hours = labor_hours;

            // Rule-assigned priorities stand
            if violation.priority.is_none() {
                violation.priority = Some(violation.severity.default_priority());
            }
        }

        sort_violations(&mut violations);
        violations
    }
}

/// Prioritize against the canonical cost table
pub fn prioritize(violations: Vec<Violation>) -> Vec<Violation> {
    Prioritizer::default().prioritize(violations)
}

/// Stable sort: ascending priority, then descending cost
pub fn sort_violations(violations: &mut [Violation]) {
    violations.sort_by_key(|v| (v.effective_priority(), Reverse(v.cost)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use shared_types::{
        BoundingBox, DetectionId, MeasuredValue, Priority, Severity, ViolationType,
    };

    fn violation(id: u32, violation_type: ViolationType, severity: Severity) -> Violation {
        Violation {
            violation_type,
            severity,
            detection_id: DetectionId(id),
            detected_value: String::new(),
            measured: MeasuredValue::Scalar(0.0),
            standard_value: String::new(),
            location: String::new(),
            reference: String::new(),
            bbox: BoundingBox::new(0.0, 0.0, 1.0, 1.0),
            recommendation: String::new(),
            priority: None,
            cost: 0,
            labor_hours: 0,
        }
    }

    #[test]
    fn test_costs_from_canonical_table() {
        let out = Prioritizer::default().prioritize(vec![
            violation(1, ViolationType::CrosswalkMarkings, Severity::Medium),
            violation(2, ViolationType::Other("Handrail".to_string()), Severity::Low),
        ]);

        assert_eq!(out[0].violation_type, ViolationType::CrosswalkMarkings);
        assert_eq!((out[0].cost, out[0].labor_hours), (400, 2));
        assert_eq!((out[1].cost, out[1].labor_hours), (1000, 8));
        assert_eq!(out[1].priority, Some(Priority::Moderate));
    }

    #[test]
    fn test_rule_priority_is_kept() {
        let mut gap = violation(1, ViolationType::SurfaceQuality, Severity::Medium);
        gap.priority = Some(Priority::Moderate);
        let width = violation(2, ViolationType::SidewalkWidth, Severity::Medium);

        let out = Prioritizer::default().prioritize(vec![gap, width]);
        assert_eq!(out[0].violation_type, ViolationType::SidewalkWidth);
        assert_eq!(out[0].priority, Some(Priority::Important));
        assert_eq!(out[1].priority, Some(Priority::Moderate));
    }

    #[test]
    fn test_sorted_by_priority_then_cost_desc() {
        let out = Prioritizer::default().prioritize(vec![
            violation(1, ViolationType::SidewalkWidth, Severity::Medium),
            violation(2, ViolationType::DetectableWarning, Severity::High),
            violation(3, ViolationType::MissingCurbRamps, Severity::High),
            violation(4, ViolationType::CurbRampSlope, Severity::High),
        ]);

        let ids: Vec<u32> = out.iter().map(|v| v.detection_id.0).collect();
        assert_eq!(ids, vec![3, 4, 2, 1]);
    }

    #[test]
    fn test_equal_priority_and_cost_keep_discovery_order() {
        let out = Prioritizer::default().prioritize(vec![
            violation(7, ViolationType::TripHazard, Severity::High),
            violation(3, ViolationType::TripHazard, Severity::High),
            violation(5, ViolationType::TripHazard, Severity::High),
        ]);

        let ids: Vec<u32> = out.iter().map(|v| v.detection_id.0).collect();
        assert_eq!(ids, vec![7, 3, 5]);
    }

    fn arb_violation() -> impl Strategy<Value = Violation> {
        (
            0usize..10,
            prop_oneof![Just(Severity::High), Just(Severity::Medium), Just(Severity::Low)],
            prop::option::of(1u8..=3),
            0u32..1000,
        )
            .prop_map(|(type_idx, severity, priority, id)| {
                let violation_type = ViolationType::CANONICAL
                    .get(type_idx)
                    .cloned()
                    .unwrap_or_else(|| ViolationType::Other("Custom".to_string()));
                let mut v = violation(id, violation_type, severity);
                v.priority = priority.and_then(|p| Priority::try_from(p).ok());
                v
            })
    }

    proptest! {
        #[test]
        fn prop_priorities_monotonic(input in prop::collection::vec(arb_violation(), 0..40)) {
            let out = Prioritizer::default().prioritize(input.clone());

            prop_assert_eq!(out.len(), input.len());
            prop_assert!(out.iter().all(|v| v.priority.is_some()));
            for pair in out.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                prop_assert!(a.effective_priority() <= b.effective_priority());
                if a.effective_priority() == b.effective_priority() {
                    prop_assert!(a.cost >= b.cost);
                }
            }
        }

        #[test]
        fn prop_sort_is_stable(input in prop::collection::vec(arb_violation(), 0..40)) {
            // Tag each input with its position through the detection id
            let tagged: Vec<Violation> = input
                .into_iter()
                .enumerate()
                .map(|(i, mut v)| {
                    v.detection_id = DetectionId(i as u32);
                    v
                })
                .collect();
            let out = Prioritizer::default().prioritize(tagged);

            for pair in out.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                if a.effective_priority() == b.effective_priority() && a.cost == b.cost {
                    prop_assert!(a.detection_id < b.detection_id);
                }
            }
        }
    }
}
