//! Detector output: recognized infrastructure elements
//!
//! Detections are produced outside the core (object detection model) and are
//! read-only from here on. Each one carries a run-scoped [`DetectionId`] that
//! keys its measurements.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a detection, unique within one analysis run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DetectionId(pub u32);

impl fmt::Display for DetectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for DetectionId {
    fn from(value: u32) -> Self {
        DetectionId(value)
    }
}

/// Infrastructure class recognized by the detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionClass {
    CurbRamp,
    Sidewalk,
    Crosswalk,
    Surface,
    Other,
}

lazy_static! {
    /// Keyword patterns for free-text detector labels, checked in order
    static ref CLASS_LABEL_PATTERNS: Vec<(Regex, DetectionClass)> = vec![
        (Regex::new(r"(?i)curb|ramp").unwrap(), DetectionClass::CurbRamp),
        (Regex::new(r"(?i)sidewalk|path").unwrap(), DetectionClass::Sidewalk),
        (Regex::new(r"(?i)crosswalk|crossing").unwrap(), DetectionClass::Crosswalk),
        (Regex::new(r"(?i)surface").unwrap(), DetectionClass::Surface),
    ];
}

impl DetectionClass {
    /// Map a detector class name (e.g. "curb_ramp", "Pedestrian Path") to a class
    ///
    /// Labels matching none of the known keywords become [`DetectionClass::Other`].
    pub fn from_label(label: &str) -> Self {
        CLASS_LABEL_PATTERNS
            .iter()
            .find(|(pattern, _)| pattern.is_match(label))
            .map(|(_, class)| *class)
            .unwrap_or(DetectionClass::Other)
    }

    pub fn name(&self) -> &'static str {
        match self {
            DetectionClass::CurbRamp => "Curb Ramp",
            DetectionClass::Sidewalk => "Sidewalk",
            DetectionClass::Crosswalk => "Crosswalk",
            DetectionClass::Surface => "Surface",
            DetectionClass::Other => "Other",
        }
    }
}

/// Axis-aligned box in pixel or normalized image space
///
/// Serialized as `[x1, y1, x2, y2]`, the layout detectors emit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct BoundingBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl BoundingBox {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn center(&self) -> (f64, f64) {
        ((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    /// Finite coordinates with x1 < x2 and y1 < y2
    pub fn is_valid(&self) -> bool {
        [self.x1, self.y1, self.x2, self.y2]
            .iter()
            .all(|c| c.is_finite())
            && self.x1 < self.x2
            && self.y1 < self.y2
    }
}

impl From<[f64; 4]> for BoundingBox {
    fn from([x1, y1, x2, y2]: [f64; 4]) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

impl From<BoundingBox> for [f64; 4] {
    fn from(b: BoundingBox) -> Self {
        [b.x1, b.y1, b.x2, b.y2]
    }
}

/// One recognized infrastructure element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub id: DetectionId,
    pub class: DetectionClass,
    pub confidence: f64,
    pub bbox: BoundingBox,
}

impl Detection {
    pub fn new(
        id: impl Into<DetectionId>,
        class: DetectionClass,
        confidence: f64,
        bbox: BoundingBox,
    ) -> Self {
        Self {
            id: id.into(),
            class,
            confidence,
            bbox,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_class_from_detector_labels() {
        assert_eq!(DetectionClass::from_label("curb_ramp"), DetectionClass::CurbRamp);
        assert_eq!(DetectionClass::from_label("Ramp"), DetectionClass::CurbRamp);
        assert_eq!(DetectionClass::from_label("sidewalk"), DetectionClass::Sidewalk);
        assert_eq!(
            DetectionClass::from_label("Pedestrian Path"),
            DetectionClass::Sidewalk
        );
        assert_eq!(
            DetectionClass::from_label("zebra_crossing"),
            DetectionClass::Crosswalk
        );
        assert_eq!(
            DetectionClass::from_label("damaged_surface"),
            DetectionClass::Surface
        );
        assert_eq!(DetectionClass::from_label("car"), DetectionClass::Other);
    }

    #[test]
    fn test_curb_keyword_wins_over_later_patterns() {
        // "curb ramp at crossing" hits the curb pattern first
        assert_eq!(
            DetectionClass::from_label("curb ramp at crossing"),
            DetectionClass::CurbRamp
        );
    }

    #[test]
    fn test_bbox_serializes_as_array() {
        let bbox = BoundingBox::new(10.0, 20.0, 110.0, 220.0);
        let json = serde_json::to_string(&bbox).unwrap();
        assert_eq!(json, "[10.0,20.0,110.0,220.0]");

        let parsed: BoundingBox = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, bbox);
    }

    #[test]
    fn test_bbox_center_and_validity() {
        let bbox = BoundingBox::new(0.0, 0.0, 100.0, 50.0);
        assert_eq!(bbox.center(), (50.0, 25.0));
        assert!(bbox.is_valid());
        assert!(!BoundingBox::new(100.0, 0.0, 0.0, 50.0).is_valid());
        assert!(!BoundingBox::new(0.0, 0.0, f64::NAN, 50.0).is_valid());
    }

    #[test]
    fn test_detection_deserializes_from_detector_json() {
        let json = r#"{"id":7,"class":"curb_ramp","confidence":0.91,"bbox":[1,2,3,4]}"#;
        let detection: Detection = serde_json::from_str(json).unwrap();
        assert_eq!(detection.id, DetectionId(7));
        assert_eq!(detection.class, DetectionClass::CurbRamp);
        assert_eq!(detection.bbox, BoundingBox::new(1.0, 2.0, 3.0, 4.0));
    }
}
