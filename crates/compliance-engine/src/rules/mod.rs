//! Accessibility rules and their comparison semantics
//!
//! A [`Rule`] pairs one measurement kind with a threshold check. Rules are
//! plain data so catalogs can be loaded per jurisdiction; the default ADA
//! 2010 rules live in the per-class modules below.

pub mod crosswalk;
pub mod curb_ramp;
pub mod sidewalk;
pub mod surface;

use serde::{Deserialize, Serialize};
use shared_types::{
    DetectionClass, MeasuredValue, MeasurementKind, Priority, Severity, ViolationType,
};

/// 1:12 running slope
pub const MAX_RUNNING_SLOPE_PERCENT: f64 = 8.33;
/// 1:48 cross slope
pub const MAX_CROSS_SLOPE_PERCENT: f64 = 2.0;
pub const MIN_CLEAR_WIDTH_INCHES: f64 = 36.0;
pub const MIN_LANDING_INCHES: f64 = 36.0;
pub const MAX_SURFACE_GAP_INCHES: f64 = 0.5;
/// Untreated level change
pub const MAX_VERTICAL_CHANGE_INCHES: f64 = 0.25;
pub const MIN_MARKING_QUALITY: f64 = 0.6;

/// Comparison applied to a measured value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleKind {
    /// Violation iff value > limit
    MaxThreshold { limit: f64 },
    /// Violation iff value < limit
    MinThreshold { limit: f64 },
    /// Violation iff the feature is absent
    RequiredBoolean,
    /// Violation iff either component falls below its minimum
    MinPair { first: f64, second: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Percent,
    Inches,
    Score,
    None,
}

/// A named, cited accessibility standard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub key: String,
    pub applies_to: DetectionClass,
    pub measurement: MeasurementKind,
    pub kind: RuleKind,
    pub unit: Unit,
    pub reference: String,
    pub description: String,
    pub violation_type: ViolationType,
    pub severity: Severity,
    /// Overrides the severity-derived priority
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    pub location: String,
    pub standard_label: String,
    pub recommendation: String,
}

/// Outcome of checking one rule against one detection
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    Compliant,
    Violated(MeasuredValue),
    NoVerdict(SkipReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Not measurable from this image
    Absent,
    /// Value shape does not fit the rule kind
    KindMismatch,
    /// Negative, non-finite or otherwise impossible reading
    OutOfRange,
}

impl Rule {
    /// Priority assigned at creation: the override, else the severity default
    pub fn initial_priority(&self) -> Priority {
        self.priority
            .unwrap_or_else(|| self.severity.default_priority())
    }

    /// Compare a measurement against this rule
    ///
    /// Equality with the threshold is compliant for both Max and Min checks.
    pub fn check(&self, value: Option<MeasuredValue>) -> Verdict {
        let Some(value) = value else {
            return Verdict::NoVerdict(SkipReason::Absent);
        };

        let shape_fits = matches!(
            (self.kind, value),
            (
                RuleKind::MaxThreshold { .. } | RuleKind::MinThreshold { .. },
                MeasuredValue::Scalar(_)
            ) | (RuleKind::RequiredBoolean, MeasuredValue::Flag(_))
                | (RuleKind::MinPair { .. }, MeasuredValue::Pair(..))
        );
        if !shape_fits {
            return Verdict::NoVerdict(SkipReason::KindMismatch);
        }
        if !self.measurement.accepts(&value) {
            return Verdict::NoVerdict(SkipReason::OutOfRange);
        }

        let violated = match (self.kind, value) {
            (RuleKind::MaxThreshold { limit }, MeasuredValue::Scalar(v)) => v > limit,
            (RuleKind::MinThreshold { limit }, MeasuredValue::Scalar(v)) => v < limit,
            (RuleKind::RequiredBoolean, MeasuredValue::Flag(present)) => !present,
            (RuleKind::MinPair { first, second }, MeasuredValue::Pair(a, b)) => {
                a < first || b < second
            }
            _ => false,
        };

        if violated {
            Verdict::Violated(value)
        } else {
            Verdict::Compliant
        }
    }
}

/// Human-readable rendering of a measured value for violation records
pub fn format_detected(kind: MeasurementKind, value: MeasuredValue) -> String {
    match (kind, value) {
        (MeasurementKind::Slope, MeasuredValue::Scalar(v)) if v > 0.0 => {
            format!("{:.1}% (1:{:.1} ratio)", v, 100.0 / v)
        }
        (MeasurementKind::Slope | MeasurementKind::CrossSlope, MeasuredValue::Scalar(v)) => {
            format!("{:.1}%", v)
        }
        (MeasurementKind::Width, MeasuredValue::Scalar(v)) => format!("{:.0} inches", v),
        (MeasurementKind::MaxGap, MeasuredValue::Scalar(v)) => {
            format!("Gaps up to {:.2} inches", v)
        }
        (MeasurementKind::VerticalChange, MeasuredValue::Scalar(v)) => {
            format!("{:.2} inch vertical change", v)
        }
        (MeasurementKind::MarkingQuality, MeasuredValue::Scalar(v)) => {
            format!("Quality: {:.0}%", v * 100.0)
        }
        (MeasurementKind::LandingSize, MeasuredValue::Pair(w, l)) => {
            format!("{:.0}\" x {:.0}\"", w, l)
        }
        (MeasurementKind::DetectableWarning, MeasuredValue::Flag(present)) => {
            String::from(if present { "Present" } else { "Missing" })
        }
        (MeasurementKind::HasCurbRamps, MeasuredValue::Flag(present)) => String::from(if present {
            "Curb ramps present"
        } else {
            "No curb ramps detected"
        }),
        (_, MeasuredValue::Scalar(v)) => format!("{}", v),
        (_, MeasuredValue::Flag(b)) => format!("{}", b),
        (_, MeasuredValue::Pair(a, b)) => format!("{} x {}", a, b),
    }
}
