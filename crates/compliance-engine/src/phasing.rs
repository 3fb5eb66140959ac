//! Budget-constrained phased remediation
//!
//! Greedy and order-driven, not an optimal packing: violations are taken in
//! priority order (most expensive first within a priority) and each one
//! either fits the current phase or opens the next.

use crate::error::ComplianceError;
use crate::prioritizer::sort_violations;
use shared_types::{Phase, PhasedPlan, Violation};
use tracing::{debug, instrument};

#[instrument(skip(violations), fields(violations = violations.len()))]
pub fn estimate_phased(
    violations: &[Violation],
    budget: u64,
) -> Result<PhasedPlan, ComplianceError> {
    if budget == 0 {
        return Err(ComplianceError::InvalidBudget(budget));
    }

    let mut ordered = violations.to_vec();
    sort_violations(&mut ordered);

    let mut phases: Vec<Phase> = Vec::new();
    let mut current = Phase {
        phase_number: 1,
        violations: Vec::new(),
        cost: 0,
    };
    // Goes negative when a single violation exceeds the budget
    let mut remaining = budget as i64;

    for violation in ordered {
        let cost = violation.cost as i64;

        if cost <= remaining || current.violations.is_empty() {
            remaining -= cost;
            current.cost += violation.cost;
            current.violations.push(violation);
        } else {
            let next = Phase {
                phase_number: current.phase_number + 1,
                cost: violation.cost,
                violations: vec![violation],
            };
            phases.push(std::mem::replace(&mut current, next));
            remaining = budget as i64 - cost;
        }
    }

    if !current.violations.is_empty() {
        phases.push(current);
    }

    debug!(phases = phases.len(), remaining, "Phased plan built");

    Ok(PhasedPlan {
        budget,
        total_phases: phases.len(),
        phases,
        fully_funded: remaining >= 0,
    })
}
