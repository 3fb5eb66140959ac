//! Compliance scoring
//!
//! The penalty is normalized by the number of detections, not violations:
//! the worst case is every detection carrying one High violation. A scene
//! with many compliant features and one High violation therefore scores far
//! better than a small scene with the same single violation.

use shared_types::{Detection, Severity, Violation};

pub fn score(violations: &[Violation], detections: &[Detection]) -> u8 {
    if detections.is_empty() {
        return 100;
    }

    let total_weight: u32 = violations.iter().map(|v| v.severity.weight()).sum();
    let max_possible = Severity::High.weight() as f64 * detections.len() as f64;
    let penalty = (100.0 * total_weight as f64 / max_possible).round();

    (100.0 - penalty).clamp(0.0, 100.0) as u8
}
