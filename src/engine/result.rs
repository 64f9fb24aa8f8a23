//! Result aggregation and reporting.
//!
//! Collects check results, generates summaries, and supports baseline comparison.

use crate::{Check, CheckResult, PreflightError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Result summary statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSummary {
    pub passed: u32,
    pub failed: u32,
    pub skipped: u32,
    pub total: u32,
    pub total_duration_ms: u64,
}

impl ResultSummary {
    fn from_checks(checks: &[Check]) -> Self {
        let mut summary = ResultSummary::default();

        for check in checks {
            summary.total += 1;

            match &check.result {
                Some(CheckResult::Pass { duration_ms, .. }) => {
                    summary.passed += 1;
                    summary.total_duration_ms += duration_ms;
                }
                Some(CheckResult::Fail { duration_ms, .. }) => {
                    summary.failed += 1;
                    summary.total_duration_ms += duration_ms;
                }
                Some(CheckResult::Skip { .. }) | None => {
                    summary.skipped += 1;
                }
            }
        }

        summary
    }

    /// True when nothing failed.
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Validation report containing all check results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub timestamp: u64,
    /// Path of the validated document
    pub source: String,
    pub checks: Vec<Check>,
    pub total_duration_ms: u64,
}

impl ValidationReport {
    /// Create a new empty report
    pub fn new() -> Self {
        ValidationReport {
            timestamp: unix_timestamp(),
            source: String::new(),
            checks: Vec::new(),
            total_duration_ms: 0,
        }
    }

    /// Calculate summary statistics
    pub fn summary(&self) -> ResultSummary {
        ResultSummary::from_checks(&self.checks)
    }

    /// Look up a check by ID
    pub fn get(&self, id: &str) -> Option<&Check> {
        self.checks.iter().find(|c| c.id == id)
    }

    /// IDs of failed checks, in report order
    pub fn failed_ids(&self) -> Vec<&str> {
        self.checks
            .iter()
            .filter(|c| c.result.as_ref().is_some_and(CheckResult::is_fail))
            .map(|c| c.id.as_str())
            .collect()
    }

    /// Check ID to outcome, ignoring timing
    pub fn outcomes(&self) -> Vec<(&str, Option<&'static str>)> {
        self.checks
            .iter()
            .map(|c| (c.id.as_str(), c.result.as_ref().map(CheckResult::status)))
            .collect()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Baseline comparison result
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparisonResult {
    /// Checks failing now that were absent or skipped in the baseline
    pub new_failures: Vec<String>,
    /// Checks that passed in the baseline and fail now
    pub regressions: Vec<String>,
    /// Checks that failed in the baseline and pass now
    pub resolved: Vec<String>,
    pub unchanged: Vec<String>,
}

impl ComparisonResult {
    pub fn has_regressions(&self) -> bool {
        !self.regressions.is_empty() || !self.new_failures.is_empty()
    }
}

/// Result aggregator for collecting check results
pub struct ResultAggregator {
    checks: Vec<Check>,
    source: String,
    total_duration_ms: u64,
}

impl ResultAggregator {
    /// Create a new result aggregator
    pub fn new() -> Self {
        ResultAggregator {
            checks: Vec::new(),
            source: String::new(),
            total_duration_ms: 0,
        }
    }

    /// Set report metadata
    pub fn set_metadata(&mut self, source: String, total_duration_ms: u64) {
        self.source = source;
        self.total_duration_ms = total_duration_ms;
    }

    /// Add a completed check result
    pub fn add_result(&mut self, check: Check) {
        self.checks.push(check);
    }

    /// Create final validation report
    pub fn to_report(&self) -> ValidationReport {
        ValidationReport {
            timestamp: unix_timestamp(),
            source: self.source.clone(),
            checks: self.checks.clone(),
            total_duration_ms: self.total_duration_ms,
        }
    }
}

impl Default for ResultAggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// Compare a finished report against a baseline report
pub fn compare_reports(current: &ValidationReport, baseline: &ValidationReport) -> ComparisonResult {
    compare_checks(&current.checks, baseline)
}

fn compare_checks(checks: &[Check], baseline: &ValidationReport) -> ComparisonResult {
    let mut result = ComparisonResult::default();

    let baseline_status: HashMap<&str, &'static str> = baseline
        .checks
        .iter()
        .filter_map(|c| c.result.as_ref().map(|r| (c.id.as_str(), r.status())))
        .collect();

    for check in checks {
        let current = check.result.as_ref().map(CheckResult::status);
        let previous = baseline_status.get(check.id.as_str()).copied();

        match (previous, current) {
            (Some("pass"), Some("fail")) => result.regressions.push(check.id.clone()),
            (Some("fail"), Some("pass")) => result.resolved.push(check.id.clone()),
            (None | Some("skip"), Some("fail")) => result.new_failures.push(check.id.clone()),
            _ => result.unchanged.push(check.id.clone()),
        }
    }

    result
}

/// Save a validation report as JSON baseline
pub fn save_as_baseline(report: &ValidationReport, path: &Path) -> Result<(), PreflightError> {
    let json = serde_json::to_string_pretty(report).map_err(|e| PreflightError::Baseline {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    fs::write(path, json).map_err(|source| PreflightError::Io {
        context: format!("writing baseline {}", path.display()),
        source,
    })
}

/// Load a validation report from JSON baseline
pub fn load_baseline(path: &Path) -> Result<ValidationReport, PreflightError> {
    let content = fs::read_to_string(path).map_err(|e| PreflightError::Baseline {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    serde_json::from_str(&content).map_err(|e| PreflightError::Baseline {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
