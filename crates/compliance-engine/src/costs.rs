//! Canonical remediation cost table and site complexity multipliers
//!
//! Both the prioritizer and the estimator price violations from the same
//! [`CostTable`], so the two stages cannot drift apart.

use serde::{Deserialize, Serialize};
use shared_types::ViolationType;
use std::collections::BTreeMap;
use tracing::debug;

/// Cost charged for a violation type missing from the table
pub const DEFAULT_COST: u64 = 1000;
/// Labor charged for a violation type missing from the table
pub const DEFAULT_LABOR_HOURS: u32 = 8;
pub const DEFAULT_UNIT: &str = "per item";

pub const STANDARD_COMPLEXITY: &str = "standard";

/// Unit cost figures for one violation type (USD)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEntry {
    pub min: u64,
    pub max: u64,
    pub typical: u64,
    pub unit: String,
    pub labor_hours: u32,
}

impl CostEntry {
    fn new(min: u64, max: u64, typical: u64, unit: &str, labor_hours: u32) -> Self {
        Self {
            min,
            max,
            typical,
            unit: unit.to_string(),
            labor_hours,
        }
    }

    /// Entry used for unknown violation types
    pub fn fallback() -> Self {
        Self::new(
            DEFAULT_COST,
            DEFAULT_COST,
            DEFAULT_COST,
            DEFAULT_UNIT,
            DEFAULT_LABOR_HOURS,
        )
    }
}

/// Per-type remediation costs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CostTable {
    entries: BTreeMap<ViolationType, CostEntry>,
}

impl CostTable {
    pub fn new(entries: BTreeMap<ViolationType, CostEntry>) -> Self {
        Self { entries }
    }

    /// Typical US municipal costs for the nine canonical violation types
    pub fn standard() -> Self {
        // (type, min, max, typical, unit, labor hours)
        let rows = [
            (ViolationType::CurbRampSlope, 2000, 3500, 2500, "per ramp", 16),
            (ViolationType::CrossSlope, 2500, 4000, 3200, "per section", 20),
            (ViolationType::SidewalkWidth, 1500, 2500, 1800, "per linear foot", 12),
            (ViolationType::DetectableWarning, 600, 1200, 800, "per installation", 4),
            (ViolationType::SurfaceQuality, 1800, 3000, 2200, "per section", 14),
            (ViolationType::LandingSize, 1200, 2000, 1500, "per landing", 10),
            (ViolationType::MissingCurbRamps, 3000, 4500, 3500, "per ramp", 24),
            (ViolationType::CrosswalkMarkings, 300, 600, 400, "per crossing", 2),
            (ViolationType::TripHazard, 800, 1800, 1200, "per repair", 8),
        ];
        Self {
            entries: rows
                .into_iter()
                .map(|(t, min, max, typical, unit, labor)| {
                    (t, CostEntry::new(min, max, typical, unit, labor))
                })
                .collect(),
        }
    }

    pub fn get(&self, violation_type: &ViolationType) -> Option<&CostEntry> {
        self.entries.get(violation_type)
    }

    /// Typical cost and labor hours, falling back to the flat defaults
    pub fn unit_cost(&self, violation_type: &ViolationType) -> (u64, u32) {
        match self.get(violation_type) {
            Some(entry) => (entry.typical, entry.labor_hours),
            None => {
                debug!(
                    violation_type = %violation_type,
                    "Unknown violation type, using default cost"
                );
                (DEFAULT_COST, DEFAULT_LABOR_HOURS)
            }
        }
    }

    pub fn insert(&mut self, violation_type: ViolationType, entry: CostEntry) {
        self.entries.insert(violation_type, entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CostTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Site-condition multipliers keyed by complexity name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComplexityTable {
    factors: BTreeMap<String, f64>,
}

impl ComplexityTable {
    pub fn standard() -> Self {
        let factors = [
            (STANDARD_COMPLEXITY, 1.0),
            ("urban_high_traffic", 1.3),
            ("historic_district", 1.5),
            ("utility_conflicts", 1.4),
            ("drainage_issues", 1.2),
        ];
        Self {
            factors: factors
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        }
    }

    /// Multiplier for `key`; unknown keys mean a standard site (1.0)
    pub fn multiplier(&self, key: &str) -> f64 {
        match self.factors.get(key) {
            Some(factor) => *factor,
            None => {
                debug!(complexity = key, "Unknown complexity key, using 1.0");
                1.0
            }
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.factors.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.factors.keys().map(String::as_str)
    }
}

impl Default for ComplexityTable {
    fn default() -> Self {
        Self::standard()
    }
}
