//! Scan files
//!
//! A scan file is the JSON form of one image's detections and measurements:
//!
//! ```json
//! {
//!   "location": "Main St & 3rd Ave",
//!   "detections": [{"id": 1, "class": "curb_ramp", "confidence": 0.9, "bbox": [0, 0, 100, 80]}],
//!   "measurements": {"1": {"slope": 9.5, "detectable_warning": false}}
//! }
//! ```

use anyhow::Context;
use shared_types::Scan;
use std::fs;
use std::path::{Path, PathBuf};

/// A scan paired with the file it came from
#[derive(Debug, Clone)]
pub struct LoadedScan {
    pub source: PathBuf,
    pub scan: Scan,
}

/// Read one scan; a missing location falls back to the file stem
pub fn load_scan<P: AsRef<Path>>(path: P) -> anyhow::Result<LoadedScan> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read scan file: {}", path.display()))?;
    let mut scan: Scan = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse scan file: {}", path.display()))?;

    if scan.location.is_none() {
        scan.location = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned());
    }

    Ok(LoadedScan {
        source: path.to_path_buf(),
        scan,
    })
}
