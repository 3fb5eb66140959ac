//! Measurement Set: physical facts extracted per detection
//!
//! Absence of a value means "could not be measured", never zero. Values are
//! stored as extracted; range checks happen in the rule engine.

use crate::detection::DetectionId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Kinds of measurement the extractor can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementKind {
    /// Running slope, percent
    Slope,
    /// Slope perpendicular to travel, percent
    CrossSlope,
    /// Clear width, inches
    Width,
    DetectableWarning,
    /// Landing (width, length), inches
    LandingSize,
    /// Widest surface opening, inches
    MaxGap,
    /// Abrupt level change, inches
    VerticalChange,
    HasCurbRamps,
    /// Marking visibility score in [0, 1]
    MarkingQuality,
}

impl MeasurementKind {
    pub fn name(&self) -> &'static str {
        match self {
            MeasurementKind::Slope => "slope",
            MeasurementKind::CrossSlope => "cross_slope",
            MeasurementKind::Width => "width",
            MeasurementKind::DetectableWarning => "detectable_warning",
            MeasurementKind::LandingSize => "landing_size",
            MeasurementKind::MaxGap => "max_gap",
            MeasurementKind::VerticalChange => "vertical_change",
            MeasurementKind::HasCurbRamps => "has_curb_ramps",
            MeasurementKind::MarkingQuality => "marking_quality",
        }
    }

    /// Whether `value` has this kind's shape and lies in its physical range
    pub fn accepts(&self, value: &MeasuredValue) -> bool {
        match (self, value) {
            (
                MeasurementKind::DetectableWarning | MeasurementKind::HasCurbRamps,
                MeasuredValue::Flag(_),
            ) => true,
            (MeasurementKind::LandingSize, MeasuredValue::Pair(a, b)) => {
                is_physical(*a) && is_physical(*b)
            }
            (MeasurementKind::MarkingQuality, MeasuredValue::Scalar(v)) => {
                is_physical(*v) && *v <= 1.0
            }
            (
                MeasurementKind::Slope
                | MeasurementKind::CrossSlope
                | MeasurementKind::Width
                | MeasurementKind::MaxGap
                | MeasurementKind::VerticalChange,
                MeasuredValue::Scalar(v),
            ) => is_physical(*v),
            _ => false,
        }
    }
}

impl fmt::Display for MeasurementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn is_physical(v: f64) -> bool {
    v.is_finite() && v >= 0.0
}

/// A single measured value
///
/// Untagged on the wire: a number, a boolean, or a two-element array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MeasuredValue {
    Scalar(f64),
    Flag(bool),
    Pair(f64, f64),
}

impl MeasuredValue {
    /// Primary numeric reading (first component for pairs, 1/0 for flags)
    pub fn as_f64(&self) -> f64 {
        match self {
            MeasuredValue::Scalar(v) => *v,
            MeasuredValue::Flag(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            MeasuredValue::Pair(a, _) => *a,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeasurementError {
    #[error("Value {value:?} does not fit measurement kind '{kind}'")]
    ShapeMismatch {
        kind: MeasurementKind,
        value: MeasuredValue,
    },
}

/// Measurements recorded for one detection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Measurements {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slope: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cross_slope: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detectable_warning: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landing_size: Option<(f64, f64)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_gap: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_change: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_curb_ramps: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marking_quality: Option<f64>,
}

impl Measurements {
    pub fn get(&self, kind: MeasurementKind) -> Option<MeasuredValue> {
        match kind {
            MeasurementKind::Slope => self.slope.map(MeasuredValue::Scalar),
            MeasurementKind::CrossSlope => self.cross_slope.map(MeasuredValue::Scalar),
            MeasurementKind::Width => self.width.map(MeasuredValue::Scalar),
            MeasurementKind::DetectableWarning => self.detectable_warning.map(MeasuredValue::Flag),
            MeasurementKind::LandingSize => self
                .landing_size
                .map(|(w, l)| MeasuredValue::Pair(w, l)),
            MeasurementKind::MaxGap => self.max_gap.map(MeasuredValue::Scalar),
            MeasurementKind::VerticalChange => self.vertical_change.map(MeasuredValue::Scalar),
            MeasurementKind::HasCurbRamps => self.has_curb_ramps.map(MeasuredValue::Flag),
            MeasurementKind::MarkingQuality => self.marking_quality.map(MeasuredValue::Scalar),
        }
    }

    /// Store a value under `kind`; the value's shape must match the kind
    pub fn set(
        &mut self,
        kind: MeasurementKind,
        value: MeasuredValue,
    ) -> Result<(), MeasurementError> {
        match (kind, value) {
            (MeasurementKind::Slope, MeasuredValue::Scalar(v)) => self.slope = Some(v),
            (MeasurementKind::CrossSlope, MeasuredValue::Scalar(v)) => self.cross_slope = Some(v),
            (MeasurementKind::Width, MeasuredValue::Scalar(v)) => self.width = Some(v),
            (MeasurementKind::DetectableWarning, MeasuredValue::Flag(b)) => {
                self.detectable_warning = Some(b)
            }
            (MeasurementKind::LandingSize, MeasuredValue::Pair(w, l)) => {
                self.landing_size = Some((w, l))
            }
            (MeasurementKind::MaxGap, MeasuredValue::Scalar(v)) => self.max_gap = Some(v),
            (MeasurementKind::VerticalChange, MeasuredValue::Scalar(v)) => {
                self.vertical_change = Some(v)
            }
            (MeasurementKind::HasCurbRamps, MeasuredValue::Flag(b)) => {
                self.has_curb_ramps = Some(b)
            }
            (MeasurementKind::MarkingQuality, MeasuredValue::Scalar(v)) => {
                self.marking_quality = Some(v)
            }
            (kind, value) => return Err(MeasurementError::ShapeMismatch { kind, value }),
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        *self == Measurements::default()
    }
}

/// Measurements for one detection batch, keyed by [`DetectionId`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeasurementSet {
    entries: BTreeMap<DetectionId, Measurements>,
}

impl MeasurementSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: DetectionId, measurements: Measurements) {
        self.entries.insert(id, measurements);
    }

    /// Record a single value, creating the detection's entry on first use
    pub fn record(
        &mut self,
        id: DetectionId,
        kind: MeasurementKind,
        value: MeasuredValue,
    ) -> Result<(), MeasurementError> {
        self.entries.entry(id).or_default().set(kind, value)
    }

    pub fn get(&self, id: DetectionId) -> Option<&Measurements> {
        self.entries.get(&id)
    }

    /// Look up one value; an unknown id reads the same as an absent value
    pub fn value(&self, id: DetectionId, kind: MeasurementKind) -> Option<MeasuredValue> {
        self.entries.get(&id).and_then(|m| m.get(kind))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DetectionId, &Measurements)> {
        self.entries.iter()
    }
}

impl FromIterator<(DetectionId, Measurements)> for MeasurementSet {
    fn from_iter<T: IntoIterator<Item = (DetectionId, Measurements)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
