//! ADA accessibility compliance engine
//!
//! Evaluates detected pedestrian infrastructure against a rule catalog and
//! plans remediation. One analysis runs a fixed sequential pipeline:
//!
//! 1. Validate detections and drop those below the confidence threshold
//! 2. Evaluate every applicable rule ([`engine`])
//! 3. Attach costs and finalize priorities ([`prioritizer`])
//! 4. Price the work and derive a schedule ([`estimator`])
//! 5. Score the scene ([`scoring`])
//! 6. Optionally split the work into budget phases ([`phasing`])

pub mod catalog;
pub mod config;
pub mod costs;
pub mod engine;
pub mod error;
pub mod estimator;
pub mod phasing;
pub mod prioritizer;
pub mod rules;
pub mod scoring;
pub mod summary;

pub use catalog::RuleCatalog;
pub use config::AnalyzerConfig;
pub use costs::{ComplexityTable, CostEntry, CostTable};
pub use engine::{evaluate, RuleEngine};
pub use error::ComplianceError;
pub use estimator::{estimate, CostEstimator};
pub use phasing::estimate_phased;
pub use prioritizer::{prioritize, Prioritizer};
pub use scoring::score;
pub use summary::{summarize, CostSummary};

use serde::{Deserialize, Serialize};
use shared_types::{ComplianceResult, Detection, MeasurementSet, PhasedPlan, Scan};
use std::collections::HashSet;
use tracing::{debug, info, instrument, warn};

/// Everything one analysis produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOutcome {
    pub result: ComplianceResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phased_plan: Option<PhasedPlan>,
    pub summary: CostSummary,
    /// Detections that passed the confidence threshold
    pub detections_analyzed: usize,
}

/// Analyzer pipeline entry point
///
/// Holds one immutable configuration; several analyzers with different
/// catalogs can run side by side.
#[derive(Debug, Clone)]
pub struct Analyzer {
    config: AnalyzerConfig,
    engine: RuleEngine,
    prioritizer: Prioritizer,
    estimator: CostEstimator,
}

impl Analyzer {
    pub fn new() -> Self {
        Self::build(AnalyzerConfig::default())
    }

    pub fn with_config(config: AnalyzerConfig) -> Result<Self, ComplianceError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: AnalyzerConfig) -> Self {
        let catalog = config.catalog.clone().unwrap_or_default();
        let costs = config.costs.clone().unwrap_or_default();
        let complexity = ComplexityTable::standard();

        if !complexity.contains(&config.complexity) {
            warn!(
                complexity = %config.complexity,
                "Unknown site complexity, costs use a 1.0 multiplier"
            );
        }

        Self {
            engine: RuleEngine::new(catalog),
            prioritizer: Prioritizer::new(costs.clone()),
            estimator: CostEstimator::new(costs, complexity),
            config,
        }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn catalog(&self) -> &RuleCatalog {
        self.engine.catalog()
    }

    /// Run the full pipeline over one scene
    #[instrument(skip_all, fields(detections = detections.len()))]
    pub fn analyze(
        &self,
        detections: &[Detection],
        measurements: &MeasurementSet,
    ) -> Result<AnalysisOutcome, ComplianceError> {
        validate_detections(detections)?;

        let threshold = self.config.confidence_threshold;
        let kept: Vec<Detection> = detections
            .iter()
            .filter(|d| {
                let keep = d.confidence >= threshold;
                if !keep {
                    debug!(
                        detection = %d.id,
                        confidence = d.confidence,
                        "Below threshold, dropped"
                    );
                }
                keep
            })
            .cloned()
            .collect();

        let violations = self.engine.evaluate(&kept, measurements);
        let mut violations = self.prioritizer.prioritize(violations);

        // Complexity-adjusted costs replace the unit costs, which can reorder ties
        self.estimator.estimate_and_apply(&mut violations, &self.config.complexity);
        prioritizer::sort_violations(&mut violations);
        // Re-price in final order so the breakdown lines up with the violations
        let estimate = self.estimator.estimate(&violations, &self.config.complexity);

        let score = scoring::score(&violations, &kept);

        let phased_plan = match self.config.budget {
            Some(budget) => Some(estimate_phased(&violations, budget)?),
            None => None,
        };

        let summary = summarize(&violations, &estimate);

        info!(
            violations = violations.len(),
            score,
            total_cost = estimate.total_cost,
            "Analysis complete"
        );

        Ok(AnalysisOutcome {
            result: ComplianceResult {
                score,
                violations,
                estimate,
            },
            phased_plan,
            summary,
            detections_analyzed: kept.len(),
        })
    }

    pub fn analyze_scan(&self, scan: &Scan) -> Result<AnalysisOutcome, ComplianceError> {
        self.analyze(&scan.detections, &scan.measurements)
    }

    /// Analyze scans in order; one failing scan does not stop the rest
    #[instrument(skip_all, fields(scans = scans.len()))]
    pub fn analyze_batch(&self, scans: &[Scan]) -> Vec<Result<AnalysisOutcome, ComplianceError>> {
        scans
            .iter()
            .map(|scan| {
                let outcome = self.analyze_scan(scan);
                if let Err(e) = &outcome {
                    warn!(
                        location = scan.location.as_deref().unwrap_or("unknown"),
                        error = %e,
                        "Scan analysis failed"
                    );
                }
                outcome
            })
            .collect()
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_detections(detections: &[Detection]) -> Result<(), ComplianceError> {
    let mut seen = HashSet::with_capacity(detections.len());
    for detection in detections {
        if !(0.0..=1.0).contains(&detection.confidence) {
            return Err(ComplianceError::InvalidConfidence {
                id: detection.id,
                confidence: detection.confidence,
            });
        }
        if !seen.insert(detection.id) {
            return Err(ComplianceError::DuplicateDetectionId(detection.id));
        }
    }
    Ok(())
}
