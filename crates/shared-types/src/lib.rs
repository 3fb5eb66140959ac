pub mod detection;
pub mod measurements;
pub mod types;

pub use detection::{BoundingBox, Detection, DetectionClass, DetectionId};
pub use measurements::{
    MeasuredValue, MeasurementError, MeasurementKind, MeasurementSet, Measurements,
};
pub use types::{
    ComplianceResult, CostLine, Estimate, Phase, PhasedPlan, Priority, Scan, Severity, Violation,
    ViolationType,
};
