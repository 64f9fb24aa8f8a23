//! html-preflight library
//!
//! Structural validation for a static HTML page that presents a table of
//! users with embedded media (figure, image, caption per row).
//!
//! This library provides:
//! - A document loader built on `scraper`
//! - A fixed battery of structural checks over the parsed DOM
//! - An asset probe for the image files the page refers to
//! - Report aggregation, baseline comparison, and text/JSON/JUnit output
//!
//! # Example
//!
//! ```no_run
//! use html_preflight::{run_preflight, PreflightConfig};
//!
//! let config = PreflightConfig::default();
//! let report = run_preflight(config).expect("document could not be loaded");
//! println!("Checks passed: {}", report.summary().passed);
//! ```

pub mod checks;
pub mod cli;
pub mod config;
pub mod document;
pub mod engine;

use document::Document;
use engine::orchestrator::{create_all_checks, CheckOrchestrator};
use engine::result::ValidationReport;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

// Re-exports for public API
pub use engine::orchestrator::CheckOrchestrator as Orchestrator;
pub use engine::result::{ResultSummary, ValidationReport as Report};

/// Outcome of a single check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CheckResult {
    /// Check passed
    Pass {
        message: String,
        duration_ms: u64,
    },
    /// Check failed; `details` states what was expected
    Fail {
        message: String,
        details: String,
        duration_ms: u64,
    },
    /// Nothing was asserted
    Skip {
        reason: String,
    },
}

impl CheckResult {
    pub fn pass(message: impl Into<String>) -> Self {
        CheckResult::Pass {
            message: message.into(),
            duration_ms: 0,
        }
    }

    pub fn fail(message: impl Into<String>, details: impl Into<String>) -> Self {
        CheckResult::Fail {
            message: message.into(),
            details: details.into(),
            duration_ms: 0,
        }
    }

    pub fn skip(reason: impl Into<String>) -> Self {
        CheckResult::Skip {
            reason: reason.into(),
        }
    }

    /// Stamp the measured duration onto a pass or fail.
    pub fn with_duration(self, elapsed_ms: u64) -> Self {
        match self {
            CheckResult::Pass { message, .. } => CheckResult::Pass {
                message,
                duration_ms: elapsed_ms,
            },
            CheckResult::Fail { message, details, .. } => CheckResult::Fail {
                message,
                details,
                duration_ms: elapsed_ms,
            },
            skip => skip,
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, CheckResult::Pass { .. })
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, CheckResult::Fail { .. })
    }

    pub fn status(&self) -> &'static str {
        match self {
            CheckResult::Pass { .. } => "pass",
            CheckResult::Fail { .. } => "fail",
            CheckResult::Skip { .. } => "skip",
        }
    }

    pub fn duration_ms(&self) -> u64 {
        match self {
            CheckResult::Pass { duration_ms, .. } | CheckResult::Fail { duration_ms, .. } => *duration_ms,
            CheckResult::Skip { .. } => 0,
        }
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckResult::Pass { message, .. } => write!(f, "PASS: {}", message),
            CheckResult::Fail { message, details, .. } => {
                write!(f, "FAIL: {} ({})", message, details)
            }
            CheckResult::Skip { reason } => write!(f, "SKIP: {}", reason),
        }
    }
}

/// Check category for grouping related checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckCategory {
    /// Document skeleton (doctype, html/head/body, meta, title)
    Structure,
    /// Table, header and body sections, header texts, row count
    Table,
    /// Figures, images, captions, image attributes
    Media,
    /// Per-row cell contents and caption/name agreement
    UserData,
    /// Image assets on disk
    Files,
}

impl CheckCategory {
    /// All categories in report order.
    pub const ALL: [CheckCategory; 5] = [
        CheckCategory::Structure,
        CheckCategory::Table,
        CheckCategory::Media,
        CheckCategory::UserData,
        CheckCategory::Files,
    ];

    /// Lower-case identifier used for JUnit suite names.
    pub fn slug(&self) -> &'static str {
        match self {
            CheckCategory::Structure => "structure",
            CheckCategory::Table => "table",
            CheckCategory::Media => "media",
            CheckCategory::UserData => "user_data",
            CheckCategory::Files => "files",
        }
    }

    /// Whether checks in this category read the parsed document.
    pub fn reads_document(&self) -> bool {
        !matches!(self, CheckCategory::Files)
    }
}

impl fmt::Display for CheckCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckCategory::Structure => write!(f, "Structure"),
            CheckCategory::Table => write!(f, "Table"),
            CheckCategory::Media => write!(f, "Media"),
            CheckCategory::UserData => write!(f, "User Data"),
            CheckCategory::Files => write!(f, "Files"),
        }
    }
}

/// A validation check with its result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Check {
    /// Unique identifier (e.g., "DOC-001")
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Check category
    pub category: CheckCategory,
    /// Description of what this check validates
    pub description: String,
    /// Result of the check (None if not yet executed)
    pub result: Option<CheckResult>,
}

/// Error types for html-preflight operations.
///
/// Check failures are never errors; they land in the report.
#[derive(Debug, Error)]
pub enum PreflightError {
    /// The document could not be read
    #[error("cannot load document {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A built-in selector failed to compile
    #[error("invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Configuration file unreadable or malformed
    #[error("config error in {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    /// Baseline report unreadable or malformed
    #[error("baseline error in {}: {message}", .path.display())]
    Baseline { path: PathBuf, message: String },

    /// Other I/O failure
    #[error("I/O error in {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

/// Configuration for a preflight run.
#[derive(Debug, Clone)]
pub struct PreflightConfig {
    /// HTML document to validate
    pub document: PathBuf,
    /// Images directory (None = `images` next to the document)
    pub images_dir: Option<PathBuf>,
    /// Categories to run (None = all)
    pub categories: Option<Vec<CheckCategory>>,
    /// Specific checks to skip (by ID)
    pub skip_checks: Vec<String>,
    /// Specific checks to run (by ID)
    pub only_checks: Vec<String>,
}

impl Default for PreflightConfig {
    fn default() -> Self {
        PreflightConfig {
            document: PathBuf::from("index.html"),
            images_dir: None,
            categories: None,
            skip_checks: Vec::new(),
            only_checks: Vec::new(),
        }
    }
}

impl PreflightConfig {
    /// Images directory, resolved against the document location.
    pub fn resolved_images_dir(&self) -> PathBuf {
        match &self.images_dir {
            Some(dir) => dir.clone(),
            None => default_images_dir(&self.document),
        }
    }
}

/// The `images` directory adjacent to a document.
pub fn default_images_dir(document: &Path) -> PathBuf {
    document
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join("images")
}

/// Run preflight checks.
///
/// Loads the document first; a missing or unreadable document is returned
/// as `PreflightError::Load` and no check runs. Every selected check then
/// runs to completion and lands in the report.
///
/// # Example
///
/// ```no_run
/// use html_preflight::{run_preflight, PreflightConfig, CheckCategory};
///
/// let config = PreflightConfig {
///     categories: Some(vec![CheckCategory::Media]),
///     ..Default::default()
/// };
///
/// match run_preflight(config) {
///     Ok(report) => {
///         let summary = report.summary();
///         println!("Passed: {}, Failed: {}", summary.passed, summary.failed);
///     }
///     Err(e) => eprintln!("Error: {}", e),
/// }
/// ```
pub fn run_preflight(config: PreflightConfig) -> Result<ValidationReport, PreflightError> {
    let document = Document::load(&config.document)?;
    let images_dir = config.resolved_images_dir();

    let mut orchestrator = CheckOrchestrator::new(&document, &images_dir);
    orchestrator.register_checks(create_all_checks());

    let report = if !config.only_checks.is_empty() {
        orchestrator.run_specific(&config.only_checks)
    } else {
        let categories = config.categories.as_deref().unwrap_or_default();
        orchestrator.run_filtered(categories, &config.skip_checks)
    };

    let summary = report.summary();
    info!(
        document = %config.document.display(),
        passed = summary.passed,
        failed = summary.failed,
        skipped = summary.skipped,
        "preflight complete"
    );
    Ok(report)
}

/// Run every document check against an already parsed document.
///
/// Filesystem checks are not included; see `checks::files`.
pub fn validate(document: &Document) -> ValidationReport {
    let images_dir = document
        .path()
        .map(default_images_dir)
        .unwrap_or_else(|| PathBuf::from("images"));

    let mut orchestrator = CheckOrchestrator::new(document, &images_dir);
    orchestrator.register_checks(create_all_checks());

    let categories: Vec<CheckCategory> = CheckCategory::ALL
        .iter()
        .copied()
        .filter(CheckCategory::reads_document)
        .collect();
    orchestrator.run_categories(&categories)
}
