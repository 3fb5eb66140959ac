//! Parallel batch runner
//!
//! Every scan runs on its own blocking task. With a deadline, scans still in
//! flight when it passes are abandoned; the analyzer holds nothing across
//! calls, so there is no cleanup to do.
//!
//! Blocking tasks cannot be cancelled, and a dropping runtime waits for them.
//! Callers that must stop at the deadline check [`BatchReport::has_abandoned_scans`]
//! and exit without dropping the runtime.

use crate::scan_file::LoadedScan;
use chrono::{DateTime, Utc};
use compliance_engine::{AnalysisOutcome, Analyzer};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{error, info, warn};

/// One analyzed scan as printed on stdout
#[derive(Debug, Clone, Serialize)]
pub struct AuditRecord {
    pub source: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub analyzed_at: DateTime<Utc>,
    #[serde(flatten)]
    pub outcome: AnalysisOutcome,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScanFailure {
    pub source: PathBuf,
    pub error: String,
}

#[derive(Debug, Default, Serialize)]
pub struct BatchReport {
    /// In input order
    pub records: Vec<AuditRecord>,
    pub failures: Vec<ScanFailure>,
    pub timed_out: Vec<PathBuf>,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.timed_out.is_empty()
    }

    /// Blocking tasks may still be running for these scans
    pub fn has_abandoned_scans(&self) -> bool {
        !self.timed_out.is_empty()
    }
}

pub async fn run_batch(
    analyzer: Arc<Analyzer>,
    scans: Vec<LoadedScan>,
    timeout: Option<Duration>,
) -> BatchReport {
    let deadline = timeout.map(|t| Instant::now() + t);

    let handles: Vec<_> = scans
        .into_iter()
        .map(|loaded| {
            let analyzer = Arc::clone(&analyzer);
            let source = loaded.source.clone();
            let handle = tokio::task::spawn_blocking(move || {
                let outcome = analyzer.analyze_scan(&loaded.scan);
                (loaded, outcome, Utc::now())
            });
            (source, handle)
        })
        .collect();

    let mut report = BatchReport::default();

    for (source, handle) in handles {
        let joined = match deadline {
            Some(deadline) => match tokio::time::timeout_at(deadline, handle).await {
                Ok(joined) => joined,
                Err(_elapsed) => {
                    warn!(source = %source.display(), "Scan abandoned at deadline");
                    report.timed_out.push(source);
                    continue;
                }
            },
            None => handle.await,
        };

        match joined {
            Ok((loaded, Ok(outcome), analyzed_at)) => {
                report.records.push(AuditRecord {
                    source: loaded.source,
                    location: loaded.scan.location,
                    analyzed_at,
                    outcome,
                });
            }
            Ok((loaded, Err(e), _)) => {
                error!(source = %loaded.source.display(), error = %e, "Scan rejected");
                report.failures.push(ScanFailure {
                    source: loaded.source,
                    error: e.to_string(),
                });
            }
            Err(join_error) => {
                error!(source = %source.display(), "Analysis task panicked: {}", join_error);
                report.failures.push(ScanFailure {
                    source,
                    error: format!("Analysis task panicked: {}", join_error),
                });
            }
        }
    }

    info!(
        analyzed = report.records.len(),
        failed = report.failures.len(),
        timed_out = report.timed_out.len(),
        "Batch complete"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shared_types::{
        BoundingBox, Detection, DetectionClass, DetectionId, Measurements, Scan,
    };

    fn loaded(name: &str, detections: Vec<Detection>, slope: f64) -> LoadedScan {
        LoadedScan {
            source: PathBuf::from(name),
            scan: Scan {
                location: Some(name.to_string()),
                measurements: [(
                    DetectionId(1),
                    Measurements {
                        slope: Some(slope),
                        ..Default::default()
                    },
                )]
                .into_iter()
                .collect(),
                detections,
            },
        }
    }

    fn ramp(id: u32) -> Detection {
        Detection::new(
            id,
            DetectionClass::CurbRamp,
            0.9,
            BoundingBox::new(0.0, 0.0, 10.0, 10.0),
        )
    }

    #[tokio::test]
    async fn test_records_keep_input_order() {
        let scans = vec![
            loaded("a.json", vec![ramp(1)], 12.0),
            loaded("b.json", vec![ramp(1)], 5.0),
            loaded("c.json", vec![ramp(1)], 9.0),
        ];

        let report = run_batch(Arc::new(Analyzer::new()), scans, None).await;
        assert!(report.is_clean());

        let sources: Vec<_> = report
            .records
            .iter()
            .map(|r| r.source.to_string_lossy().into_owned())
            .collect();
        assert_eq!(sources, vec!["a.json", "b.json", "c.json"]);
        assert_eq!(report.records[1].outcome.result.violations.len(), 0);
        assert_eq!(report.records[2].outcome.result.violations.len(), 1);
    }

    #[tokio::test]
    async fn test_failure_does_not_stop_batch() {
        let scans = vec![
            loaded("dup.json", vec![ramp(1), ramp(1)], 12.0),
            loaded("ok.json", vec![ramp(1)], 12.0),
        ];

        let timeout = Some(Duration::from_secs(30));
        let report = run_batch(Arc::new(Analyzer::new()), scans, timeout).await;
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].error.contains("Duplicate detection id"));
        assert!(!report.is_clean());
    }

    #[test]
    fn test_abandoned_scans_flagged() {
        let mut report = BatchReport::default();
        assert!(!report.has_abandoned_scans());

        report.failures.push(ScanFailure {
            source: PathBuf::from("bad.json"),
            error: "Duplicate detection id #1 in one analysis".to_string(),
        });
        assert!(!report.has_abandoned_scans());

        report.timed_out.push(PathBuf::from("slow.json"));
        assert!(report.has_abandoned_scans());
        assert!(!report.is_clean());
    }

    #[tokio::test]
    async fn test_record_json_shape() {
        let report = run_batch(
            Arc::new(Analyzer::new()),
            vec![loaded("x.json", vec![ramp(1)], 12.0)],
            None,
        )
        .await;

        let json = serde_json::to_value(&report.records[0]).unwrap();
        assert_eq!(json["location"], "x.json");
        assert_eq!(json["result"]["score"], 0);
        assert_eq!(json["result"]["violations"][0]["priority"], 1);
        assert!(json["analyzed_at"].is_string());
    }
}
