use shared_types::DetectionId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComplianceError {
    #[error("Invalid budget: {0} (phased planning needs a positive budget)")]
    InvalidBudget(u64),

    #[error("Duplicate detection id {0} in one analysis")]
    DuplicateDetectionId(DetectionId),

    #[error("Detection {id} has confidence {confidence} outside [0, 1]")]
    InvalidConfidence { id: DetectionId, confidence: f64 },

    #[error("Detection confidence threshold must be within [0, 1] (got {0})")]
    InvalidThreshold(f64),

    #[error("Configuration error: {0}")]
    Config(String),
}
