use crate::detection::{BoundingBox, Detection, DetectionId};
use crate::measurements::{MeasuredValue, MeasurementSet};
use std::fmt;

/// Qualitative violation class
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    /// Scoring weight (High 3, Medium 2, Low 1)
    pub fn weight(&self) -> u32 {
        match self {
            Severity::High => 3,
            Severity::Medium => 2,
            Severity::Low => 1,
        }
    }

    pub fn default_priority(&self) -> Priority {
        match self {
            Severity::High => Priority::Critical,
            Severity::Medium => Priority::Important,
            Severity::Low => Priority::Moderate,
        }
    }
}

/// Remediation ranking; serialized as 1, 2 or 3
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(into = "u8", try_from = "u8")]
pub enum Priority {
    /// Safety hazard
    Critical = 1,
    /// Accessibility barrier
    Important = 2,
    /// Minor compliance issue
    Moderate = 3,
}

impl Priority {
    pub fn rank(&self) -> u8 {
        *self as u8
    }
}

impl From<Priority> for u8 {
    fn from(p: Priority) -> Self {
        p.rank()
    }
}

impl TryFrom<u8> for Priority {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Priority::Critical),
            2 => Ok(Priority::Important),
            3 => Ok(Priority::Moderate),
            other => Err(format!("priority must be 1, 2 or 3 (got {})", other)),
        }
    }
}

/// Violation label; the nine canonical types plus free-form extensions
///
/// Serialized as its human label, e.g. `"Curb Ramp Slope"`.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(from = "String", into = "String")]
pub enum ViolationType {
    CurbRampSlope,
    CrossSlope,
    SidewalkWidth,
    DetectableWarning,
    SurfaceQuality,
    LandingSize,
    MissingCurbRamps,
    CrosswalkMarkings,
    TripHazard,
    Other(String),
}

impl ViolationType {
    pub const CANONICAL: [ViolationType; 9] = [
        ViolationType::CurbRampSlope,
        ViolationType::CrossSlope,
        ViolationType::SidewalkWidth,
        ViolationType::DetectableWarning,
        ViolationType::SurfaceQuality,
        ViolationType::LandingSize,
        ViolationType::MissingCurbRamps,
        ViolationType::CrosswalkMarkings,
        ViolationType::TripHazard,
    ];

    pub fn label(&self) -> &str {
        match self {
            ViolationType::CurbRampSlope => "Curb Ramp Slope",
            ViolationType::CrossSlope => "Cross Slope",
            ViolationType::SidewalkWidth => "Sidewalk Width",
            ViolationType::DetectableWarning => "Detectable Warning",
            ViolationType::SurfaceQuality => "Surface Quality",
            ViolationType::LandingSize => "Landing Size",
            ViolationType::MissingCurbRamps => "Missing Curb Ramps",
            ViolationType::CrosswalkMarkings => "Crosswalk Markings",
            ViolationType::TripHazard => "Trip Hazard",
            ViolationType::Other(label) => label,
        }
    }

    pub fn is_canonical(&self) -> bool {
        !matches!(self, ViolationType::Other(_))
    }
}

impl From<String> for ViolationType {
    fn from(label: String) -> Self {
        ViolationType::CANONICAL
            .iter()
            .find(|t| t.label() == label)
            .cloned()
            .unwrap_or(ViolationType::Other(label))
    }
}

impl From<&str> for ViolationType {
    fn from(label: &str) -> Self {
        ViolationType::from(label.to_string())
    }
}

impl From<ViolationType> for String {
    fn from(t: ViolationType) -> Self {
        match t {
            ViolationType::Other(label) => label,
            canonical => canonical.label().to_string(),
        }
    }
}

impl fmt::Display for ViolationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One failed rule instance for one detection
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Violation {
    pub violation_type: ViolationType,
    pub severity: Severity,
    pub detection_id: DetectionId,
    pub detected_value: String, // e.g. "12.0% (1:8.3 ratio)"
    pub measured: MeasuredValue,
    pub standard_value: String,
    pub location: String,
    pub reference: String, // e.g. "ADAAG 406.2"
    pub bbox: BoundingBox,
    pub recommendation: String,
    /// Rule-assigned priority; filled from severity when unset
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub cost: u64,
    #[serde(default)]
    pub labor_hours: u32,
}

impl Violation {
    pub fn effective_priority(&self) -> Priority {
        self.priority
            .unwrap_or_else(|| self.severity.default_priority())
    }
}

/// One line of the estimate breakdown, in violation order
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CostLine {
    pub violation_type: ViolationType,
    pub cost: u64,
    pub unit: String,
    pub labor_hours: u32,
    pub priority: Priority,
}

/// Aggregate remediation cost and schedule
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Estimate {
    pub total_cost: u64,
    pub contingency: u64,
    pub total_with_contingency: u64,
    pub cost_range_low: u64,
    pub cost_range_high: u64,
    pub timeline_label: String,
    pub labor_hours_total: u32,
    pub breakdown: Vec<CostLine>,
    pub complexity_factor: f64,
}

/// Budget-bounded bundle of violations scheduled together
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Phase {
    pub phase_number: u32,
    pub violations: Vec<Violation>,
    pub cost: u64,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PhasedPlan {
    pub budget: u64,
    pub phases: Vec<Phase>,
    pub total_phases: usize,
    pub fully_funded: bool,
}

/// Top-level output consumed by report, visualization and persistence layers
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ComplianceResult {
    pub score: u8,
    pub violations: Vec<Violation>,
    pub estimate: Estimate,
}

/// One image's worth of core input
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Scan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub detections: Vec<Detection>,
    #[serde(default)]
    pub measurements: MeasurementSet,
}
