//! Cost and timeline estimation
//!
//! Prices each violation from the canonical cost table, scaled by a site
//! complexity multiplier, and derives a crew-based schedule:
//!
//! ```text
//! work_days  = labor_hours / (crew 2.5 × 7 h/day) × 1.2 buffer
//! work_weeks = work_days / 5
//! ```

use crate::costs::{ComplexityTable, CostEntry, CostTable, DEFAULT_UNIT};
use shared_types::{CostLine, Estimate, Violation};
use tracing::instrument;

pub const CONTINGENCY_RATE: f64 = 0.12;
/// Average crew size (2-3 workers)
pub const CREW_SIZE: f64 = 2.5;
pub const EFFECTIVE_HOURS_PER_DAY: f64 = 7.0;
/// Weather and permitting slack
pub const SCHEDULE_BUFFER: f64 = 1.2;
pub const WORK_DAYS_PER_WEEK: f64 = 5.0;

pub const NO_TIMELINE: &str = "N/A";

#[derive(Debug, Clone, Default)]
pub struct CostEstimator {
    costs: CostTable,
    complexity: ComplexityTable,
}

struct PricedItem {
    line: CostLine,
    low: u64,
    high: u64,
}

impl CostEstimator {
    pub fn new(costs: CostTable, complexity: ComplexityTable) -> Self {
        Self { costs, complexity }
    }

    pub fn complexity_table(&self) -> &ComplexityTable {
        &self.complexity
    }

    /// Aggregate remediation estimate; the breakdown has one line per violation
    #[instrument(skip(self, violations), fields(violations = violations.len()))]
    pub fn estimate(&self, violations: &[Violation], complexity: &str) -> Estimate {
        let multiplier = self.complexity.multiplier(complexity);

        if violations.is_empty() {
            return Estimate {
                total_cost: 0,
                contingency: 0,
                total_with_contingency: 0,
                cost_range_low: 0,
                cost_range_high: 0,
                timeline_label: NO_TIMELINE.to_string(),
                labor_hours_total: 0,
                breakdown: Vec::new(),
                complexity_factor: multiplier,
            };
        }

        let mut breakdown = Vec::with_capacity(violations.len());
        let mut total_cost = 0u64;
        let mut cost_range_low = 0u64;
        let mut cost_range_high = 0u64;
        let mut labor_hours_total = 0u32;

        for violation in violations {
            let item = self.price(violation, multiplier);
            total_cost += item.line.cost;
            cost_range_low += item.low;
            cost_range_high += item.high;
            labor_hours_total += item.line.labor_hours;
            breakdown.push(item.line);
        }

        let contingency = contingency_for(total_cost);

        Estimate {
            total_cost,
            contingency,
            total_with_contingency: total_cost + contingency,
            cost_range_low,
            cost_range_high,
            timeline_label: timeline_label(labor_hours_total),
            labor_hours_total,
            breakdown,
            complexity_factor: multiplier,
        }
    }

    /// Estimate, then write each priced cost and labor figure back onto its violation
    pub fn estimate_and_apply(&self, violations: &mut [Violation], complexity: &str) -> Estimate {
        let estimate = self.estimate(violations, complexity);
        for (violation, line) in violations.iter_mut().zip(&estimate.breakdown) {
            violation.cost = line.cost;
            violation.labor_hours = line.labor_hours;
        }
        estimate
    }

    fn price(&self, violation: &Violation, multiplier: f64) -> PricedItem {
        let priority = violation.effective_priority();
        match self.costs.get(&violation.violation_type) {
            Some(entry) => PricedItem {
                line: CostLine {
                    violation_type: violation.violation_type.clone(),
                    cost: scaled(entry.typical, multiplier),
                    unit: entry.unit.clone(),
                    labor_hours: entry.labor_hours,
                    priority,
                },
                low: scaled(entry.min, multiplier),
                high: scaled(entry.max, multiplier),
            },
            None => {
                // Unknown types are charged flat, without the multiplier
                let (cost, labor_hours) = self.costs.unit_cost(&violation.violation_type);
                let fallback = CostEntry::fallback();
                PricedItem {
                    line: CostLine {
                        violation_type: violation.violation_type.clone(),
                        cost,
                        unit: DEFAULT_UNIT.to_string(),
                        labor_hours,
                        priority,
                    },
                    low: fallback.min,
                    high: fallback.max,
                }
            }
        }
    }
}

/// Estimate with the canonical cost and complexity tables
pub fn estimate(violations: &[Violation], complexity: &str) -> Estimate {
    CostEstimator::default().estimate(violations, complexity)
}

fn scaled(amount: u64, multiplier: f64) -> u64 {
    (amount as f64 * multiplier).round() as u64
}

/// 12% contingency, rounded to whole currency units
pub fn contingency_for(total_cost: u64) -> u64 {
    (total_cost as f64 * CONTINGENCY_RATE).round() as u64
}

/// Human schedule label for a labor total
///
/// Under a week reads in days, under four weeks in weeks, under twelve weeks
/// as a month range, beyond that in whole months.
pub fn timeline_label(total_labor_hours: u32) -> String {
    let work_days =
        total_labor_hours as f64 / (CREW_SIZE * EFFECTIVE_HOURS_PER_DAY) * SCHEDULE_BUFFER;
    let work_weeks = work_days / WORK_DAYS_PER_WEEK;

    if work_weeks < 1.0 {
        format!("{} days", work_days as u64)
    } else if work_weeks < 4.0 {
        format!("{} weeks", work_weeks as u64)
    } else if work_weeks < 12.0 {
        let months = (work_weeks / 4.0) as u64;
        format!("{}-{} months", months, months + 1)
    } else {
        format!("{} months", (work_weeks / 4.0) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use shared_types::{
        BoundingBox, DetectionId, MeasuredValue, Priority, Severity, ViolationType,
    };

    fn violation(violation_type: ViolationType, priority: Priority) -> Violation {
        Violation {
            violation_type,
            severity: Severity::High,
            detection_id: DetectionId(1),
            detected_value: String::new(),
            measured: MeasuredValue::Scalar(0.0),
            standard_value: String::new(),
            location: String::new(),
            reference: String::new(),
            bbox: BoundingBox::new(0.0, 0.0, 1.0, 1.0),
            recommendation: String::new(),
            priority: Some(priority),
            cost: 0,
            labor_hours: 0,
        }
    }

    #[test]
    fn test_empty_estimate() {
        let estimate = CostEstimator::default().estimate(&[], "standard");
        assert_eq!(estimate.total_cost, 0);
        assert_eq!(estimate.contingency, 0);
        assert_eq!(estimate.total_with_contingency, 0);
        assert_eq!(estimate.labor_hours_total, 0);
        assert_eq!(estimate.timeline_label, "N/A");
        assert!(estimate.breakdown.is_empty());
        assert_eq!(estimate.complexity_factor, 1.0);
    }

    #[test]
    fn test_single_curb_ramp_slope() {
        let estimate = CostEstimator::default().estimate(
            &[violation(ViolationType::CurbRampSlope, Priority::Critical)],
            "standard",
        );

        assert_eq!(estimate.total_cost, 2500);
        assert_eq!(estimate.labor_hours_total, 16);
        assert_eq!(estimate.contingency, 300);
        assert_eq!(estimate.total_with_contingency, 2800);
        assert_eq!(estimate.timeline_label, "1 days");
        assert_eq!((estimate.cost_range_low, estimate.cost_range_high), (2000, 3500));
        assert_eq!(
            estimate.breakdown,
            vec![CostLine {
                violation_type: ViolationType::CurbRampSlope,
                cost: 2500,
                unit: "per ramp".to_string(),
                labor_hours: 16,
                priority: Priority::Critical,
            }]
        );
    }

    #[test]
    fn test_complexity_multiplier_applies_to_known_types_only() {
        let estimate = CostEstimator::default().estimate(
            &[
                violation(ViolationType::CurbRampSlope, Priority::Critical),
                violation(ViolationType::Other("Handrail".to_string()), Priority::Moderate),
            ],
            "urban_high_traffic",
        );

        assert_eq!(estimate.breakdown[0].cost, 3250);
        assert_eq!(estimate.breakdown[1].cost, 1000);
        assert_eq!(estimate.breakdown[1].unit, "per item");
        assert_eq!(estimate.total_cost, 4250);
        assert_eq!(estimate.labor_hours_total, 24);
        assert_eq!(estimate.complexity_factor, 1.3);
    }

    #[test]
    fn test_unknown_complexity_falls_back_to_standard() {
        let violations = [violation(ViolationType::CrossSlope, Priority::Critical)];
        let estimator = CostEstimator::default();
        assert_eq!(
            estimator.estimate(&violations, "volcanic"),
            estimator.estimate(&violations, "standard")
        );
    }

    #[test]
    fn test_estimate_and_apply_overrides_costs() {
        let mut violations = vec![
            violation(ViolationType::TripHazard, Priority::Critical),
            violation(ViolationType::DetectableWarning, Priority::Critical),
        ];
        violations[0].cost = 1200;

        let estimate =
            CostEstimator::default().estimate_and_apply(&mut violations, "historic_district");
        assert_eq!(violations[0].cost, 1800);
        assert_eq!(violations[1].cost, 1200);
        assert_eq!(violations[1].labor_hours, 4);
        assert_eq!(estimate.total_cost, 3000);
    }

    #[test]
    fn test_timeline_buckets() {
        assert_eq!(timeline_label(0), "0 days");
        assert_eq!(timeline_label(16), "1 days");
        assert_eq!(timeline_label(60), "4 days");
        assert_eq!(timeline_label(80), "1 weeks");
        assert_eq!(timeline_label(200), "2 weeks");
        assert_eq!(timeline_label(300), "1-2 months");
        assert_eq!(timeline_label(600), "2-3 months");
        assert_eq!(timeline_label(1000), "3 months");
    }

    proptest! {
        #[test]
        fn prop_contingency_identity(
            type_indices in prop::collection::vec(0usize..12, 0..30),
            complexity in prop_oneof![
                Just("standard"),
                Just("urban_high_traffic"),
                Just("historic_district"),
                Just("utility_conflicts"),
                Just("drainage_issues"),
                Just("not_a_key"),
            ],
        ) {
            let violations: Vec<Violation> = type_indices
                .iter()
                .map(|i| {
                    let t = ViolationType::CANONICAL
                        .get(*i)
                        .cloned()
                        .unwrap_or_else(|| ViolationType::Other(format!("Custom {}", i)));
                    violation(t, Priority::Important)
                })
                .collect();

            let estimate = CostEstimator::default().estimate(&violations, complexity);
            prop_assert_eq!(
                estimate.total_with_contingency,
                estimate.total_cost + (estimate.total_cost as f64 * 0.12).round() as u64
            );
            prop_assert_eq!(estimate.breakdown.len(), violations.len());
            prop_assert_eq!(
                estimate.breakdown.iter().map(|l| l.cost).sum::<u64>(),
                estimate.total_cost
            );
            prop_assert!(estimate.cost_range_low <= estimate.total_cost);
            prop_assert!(estimate.total_cost <= estimate.cost_range_high);
        }
    }
}
