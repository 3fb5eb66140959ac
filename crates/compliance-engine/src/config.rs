//! Analyzer configuration
//!
//! Loaded from TOML. Every field is optional; an empty file yields the
//! ADA 2010 catalog, the standard cost table, a 0.6 detection threshold and
//! a standard-complexity site.
//!
//! ```toml
//! confidence_threshold = 0.5
//! complexity = "urban_high_traffic"
//! budget = 25000
//! ```

use crate::catalog::RuleCatalog;
use crate::costs::{CostTable, STANDARD_COMPLEXITY};
use crate::error::ComplianceError;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Detections below this confidence are dropped (default: 0.6)
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f64,
    /// Site complexity key (default: "standard")
    #[serde(default = "default_complexity")]
    pub complexity: String,
    /// Enables phased planning when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<u64>,
    /// Replaces the ADA 2010 catalog, e.g. for a stricter local code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<RuleCatalog>,
    /// Replaces the canonical cost table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub costs: Option<CostTable>,
}

fn default_confidence_threshold() -> f64 {
    0.6
}

fn default_complexity() -> String {
    STANDARD_COMPLEXITY.to_string()
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: default_confidence_threshold(),
            complexity: default_complexity(),
            budget: None,
            catalog: None,
            costs: None,
        }
    }
}

impl AnalyzerConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(s).context("Failed to parse TOML configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ComplianceError> {
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(ComplianceError::InvalidThreshold(self.confidence_threshold));
        }
        if let Some(budget) = self.budget {
            if budget == 0 {
                return Err(ComplianceError::InvalidBudget(budget));
            }
        }
        if let Some(catalog) = &self.catalog {
            if catalog.is_empty() {
                return Err(ComplianceError::Config(format!(
                    "catalog '{}' has no rules",
                    catalog.name
                )));
            }
        }
        Ok(())
    }

    pub fn with_budget(mut self, budget: u64) -> Self {
        self.budget = Some(budget);
        self
    }

    pub fn with_complexity(mut self, complexity: impl Into<String>) -> Self {
        self.complexity = complexity.into();
        self
    }
}
