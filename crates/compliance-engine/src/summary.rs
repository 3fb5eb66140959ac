//! Cost summary for budget reporting

use serde::{Deserialize, Serialize};
use shared_types::{Estimate, Severity, Violation, ViolationType};
use std::collections::BTreeMap;

/// Estimated annual non-compliance exposure per open violation (fines, liability)
pub const NON_COMPLIANCE_COST_PER_VIOLATION: u64 = 5000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostSummary {
    pub total_violations: usize,
    pub total_cost: u64,
    pub total_with_contingency: u64,
    pub timeline: String,
    pub labor_hours: u32,
    pub by_severity: BTreeMap<Severity, u64>,
    pub by_type: BTreeMap<ViolationType, u64>,
    pub non_compliance_risk: u64,
    pub roi_payback_years: f64,
}

/// Group priced violations by severity and type
///
/// Expects the estimator's costs to already be written onto `violations`.
pub fn summarize(violations: &[Violation], estimate: &Estimate) -> CostSummary {
    let mut by_severity: BTreeMap<Severity, u64> = [Severity::High, Severity::Medium, Severity::Low]
        .into_iter()
        .map(|s| (s, 0))
        .collect();
    let mut by_type: BTreeMap<ViolationType, u64> = BTreeMap::new();

    for violation in violations {
        *by_severity.entry(violation.severity).or_default() += violation.cost;
        *by_type.entry(violation.violation_type.clone()).or_default() += violation.cost;
    }

    let non_compliance_risk = violations.len() as u64 * NON_COMPLIANCE_COST_PER_VIOLATION;

    CostSummary {
        total_violations: violations.len(),
        total_cost: estimate.total_cost,
        total_with_contingency: estimate.total_with_contingency,
        timeline: estimate.timeline_label.clone(),
        labor_hours: estimate.labor_hours_total,
        by_severity,
        by_type,
        non_compliance_risk,
        roi_payback_years: estimate.total_cost as f64 / non_compliance_risk.max(1) as f64,
    }
}
