//! JSON run reports.
//!
//! When enabled in configuration, a run writes a `.edgeflip_report.json`
//! file into the destination directory recording when the run happened,
//! which directories it touched, and per-file line statistics. The report
//! is informational only; nothing reads it back at run time.

use crate::edge_reverser::RunSummary;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Filename of the report written into the destination directory.
pub const REPORT_FILE_NAME: &str = ".edgeflip_report.json";

/// Errors that can occur while saving or loading a run report.
#[derive(Debug)]
pub enum ReportError {
    /// Failed to write the report file.
    WriteFailed { source: std::io::Error },
    /// Failed to read the report file.
    ReadFailed { source: std::io::Error },
    /// The report file contents could not be (de)serialized.
    InvalidFormat { reason: String },
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WriteFailed { source } => write!(f, "Failed to write run report: {}", source),
            Self::ReadFailed { source } => write!(f, "Failed to read run report: {}", source),
            Self::InvalidFormat { reason } => write!(f, "Invalid run report format: {}", reason),
        }
    }
}

impl std::error::Error for ReportError {}

/// Line statistics for one processed file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportEntry {
    /// The filename, identical in source and destination.
    pub file_name: String,
    /// Total lines in the file.
    pub lines: usize,
    /// Lines whose fields were swapped.
    pub swapped: usize,
    /// Malformed lines copied through unchanged.
    pub passed_through: usize,
}

/// A record of one completed reversal run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// ISO 8601 timestamp of when the run completed.
    pub timestamp: String,
    /// The source directory that was read.
    pub source_dir: PathBuf,
    /// The destination directory that was written.
    pub dest_dir: PathBuf,
    /// Per-file statistics, in processing order.
    pub files: Vec<ReportEntry>,
}

impl RunReport {
    /// Builds a report from a run summary.
    pub fn new(summary: &RunSummary, source_dir: &Path, dest_dir: &Path) -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            source_dir: source_dir.to_path_buf(),
            dest_dir: dest_dir.to_path_buf(),
            files: summary
                .files
                .iter()
                .map(|stats| ReportEntry {
                    file_name: stats.file_name.clone(),
                    lines: stats.lines,
                    swapped: stats.swapped,
                    passed_through: stats.passed_through,
                })
                .collect(),
        }
    }

    /// Saves this report as pretty-printed JSON into the destination directory.
    pub fn save(&self, dest_dir: &Path) -> Result<(), ReportError> {
        let json = serde_json::to_string_pretty(self).map_err(|e| ReportError::InvalidFormat {
            reason: e.to_string(),
        })?;
        fs::write(dest_dir.join(REPORT_FILE_NAME), json)
            .map_err(|e| ReportError::WriteFailed { source: e })
    }

    /// Loads the report from a destination directory, if one exists.
    pub fn load(dest_dir: &Path) -> Result<Option<Self>, ReportError> {
        let path = dest_dir.join(REPORT_FILE_NAME);
        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&path).map_err(|e| ReportError::ReadFailed { source: e })?;
        let report = serde_json::from_str(&json).map_err(|e| ReportError::InvalidFormat {
            reason: e.to_string(),
        })?;
        Ok(Some(report))
    }
}
