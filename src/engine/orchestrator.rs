//! Check execution orchestrator.
//!
//! Manages check registration and sequential execution against one
//! document.
//!
//! # Graceful Degradation
//!
//! - Check failure: recorded in the report, the run continues
//! - Check error (bad selector): converted to a Fail result
//! - Check panic: caught via std::panic::catch_unwind, converted to Fail
//! - Invalid check ID: silently skipped in run_specific/run_filtered
//! - Empty check list: returns an empty report (not an error)
//!
//! Every selected check runs; there is no fail-fast mode.

use crate::checks::{files, media, structure, table, user_data, CheckContext};
use crate::document::Document;
use crate::engine::result::{ResultAggregator, ValidationReport};
use crate::{Check, CheckCategory, CheckResult, PreflightError};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, warn};

/// Signature shared by every check implementation.
pub type CheckFn = Box<dyn Fn(&CheckContext<'_>) -> Result<CheckResult, PreflightError>>;

/// A registered check with its execution function
pub struct RegisteredCheck {
    pub id: String,
    pub name: String,
    pub category: CheckCategory,
    pub description: String,
    pub check_fn: CheckFn,
}

impl RegisteredCheck {
    pub fn new(
        id: &str,
        name: &str,
        category: CheckCategory,
        description: &str,
        check_fn: impl Fn(&CheckContext<'_>) -> Result<CheckResult, PreflightError> + 'static,
    ) -> Self {
        RegisteredCheck {
            id: id.to_string(),
            name: name.to_string(),
            category,
            description: description.to_string(),
            check_fn: Box::new(check_fn),
        }
    }

    fn to_check(&self, result: CheckResult) -> Check {
        Check {
            id: self.id.clone(),
            name: self.name.clone(),
            category: self.category,
            description: self.description.clone(),
            result: Some(result),
        }
    }
}

/// Check orchestrator
pub struct CheckOrchestrator<'a> {
    context: CheckContext<'a>,
    checks: Vec<RegisteredCheck>,
}

impl<'a> CheckOrchestrator<'a> {
    /// Create an orchestrator bound to one document and images directory
    pub fn new(document: &'a Document, images_dir: &'a Path) -> Self {
        CheckOrchestrator {
            context: CheckContext {
                document,
                images_dir,
            },
            checks: Vec::new(),
        }
    }

    /// Register checks for execution
    pub fn register_checks(&mut self, checks: Vec<RegisteredCheck>) {
        self.checks.extend(checks);
    }

    /// Register a single check
    pub fn register_check(&mut self, check: RegisteredCheck) {
        self.checks.push(check);
    }

    /// IDs of every registered check, in registration order
    pub fn check_ids(&self) -> Vec<&str> {
        self.checks.iter().map(|c| c.id.as_str()).collect()
    }

    /// Run all registered checks
    pub fn run_all(&self) -> ValidationReport {
        self.run_matching(|_| true)
    }

    /// Run checks in a specific category
    pub fn run_category(&self, category: CheckCategory) -> ValidationReport {
        self.run_matching(|c| c.category == category)
    }

    /// Run checks in multiple categories
    pub fn run_categories(&self, categories: &[CheckCategory]) -> ValidationReport {
        self.run_matching(|c| categories.contains(&c.category))
    }

    /// Run specific checks by ID
    pub fn run_specific(&self, check_ids: &[String]) -> ValidationReport {
        for id in check_ids {
            if !self.checks.iter().any(|c| &c.id == id) {
                debug!(check = %id, "ignoring unknown check id");
            }
        }
        self.run_matching(|c| check_ids.contains(&c.id))
    }

    /// Run checks in `categories` (all when empty), minus `skip_ids`
    pub fn run_filtered(&self, categories: &[CheckCategory], skip_ids: &[String]) -> ValidationReport {
        self.run_matching(|c| {
            (categories.is_empty() || categories.contains(&c.category)) && !skip_ids.contains(&c.id)
        })
    }

    /// Execute the selected checks in registration order
    fn run_matching(&self, select: impl Fn(&RegisteredCheck) -> bool) -> ValidationReport {
        let start = Instant::now();
        let mut aggregator = ResultAggregator::new();

        for check in self.checks.iter().filter(|c| select(c)) {
            let result = self.execute_check(check);
            aggregator.add_result(check.to_check(result));
        }

        let source = self
            .context
            .document
            .path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<inline>".to_string());
        aggregator.set_metadata(source, start.elapsed().as_millis() as u64);
        aggregator.to_report()
    }

    /// Execute a single check, converting errors and panics to failures
    fn execute_check(&self, check: &RegisteredCheck) -> CheckResult {
        let start = Instant::now();

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            (check.check_fn)(&self.context)
        }));
        let elapsed = start.elapsed().as_millis() as u64;

        let result = match outcome {
            Ok(Ok(result)) => result.with_duration(elapsed),
            Ok(Err(e)) => {
                warn!(check = %check.id, error = %e, "check could not be evaluated");
                CheckResult::Fail {
                    message: "Check could not be evaluated".to_string(),
                    details: e.to_string(),
                    duration_ms: elapsed,
                }
            }
            Err(_) => {
                warn!(check = %check.id, "check panicked");
                CheckResult::Fail {
                    message: "Check panicked during execution".to_string(),
                    details: "An unexpected error occurred".to_string(),
                    duration_ms: elapsed,
                }
            }
        };

        debug!(check = %check.id, status = result.status(), elapsed_ms = elapsed, "check finished");
        result
    }
}

/// Create all registered checks with their execution functions
pub fn create_all_checks() -> Vec<RegisteredCheck> {
    let mut checks = Vec::new();
    checks.extend(structure::structure_checks());
    checks.extend(table::table_checks());
    checks.extend(media::media_checks());
    checks.extend(user_data::user_data_checks());
    checks.extend(files::file_checks());
    checks
}
