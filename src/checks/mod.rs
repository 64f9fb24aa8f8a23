//! Validation check modules.
//!
//! This module contains all checks organized by category:
//! - Structure: doctype, document skeleton, meta tags, title
//! - Table: table sections, header texts, row count
//! - Media: figures, images, captions, image attributes
//! - User data: per-row cells and caption/name agreement
//! - Files: image assets next to the document
//!
//! # Failure Semantics
//!
//! - A predicate that does not hold: `CheckResult::Fail` with the expectation in `details`
//! - A collection the check iterates is empty: `Fail` (nothing to verify counts as false)
//! - No input the check could compare: `CheckResult::Skip`
//! - Selector compile error: `Err`, turned into `Fail` by the orchestrator
//!
//! Checks never panic and never stop the run.

pub mod files;
pub mod media;
pub mod structure;
pub mod table;
pub mod user_data;

use crate::document::Document;
use crate::CheckResult;
use std::path::Path;

/// Everything a check may read.
pub struct CheckContext<'a> {
    pub document: &'a Document,
    pub images_dir: &'a Path,
}

/// Fail with a list of offenders, or pass.
pub(crate) fn verdict(problems: Vec<String>, pass_message: String, fail_message: &str) -> CheckResult {
    if problems.is_empty() {
        CheckResult::pass(pass_message)
    } else {
        CheckResult::fail(format!("{} ({})", fail_message, problems.len()), problems.join("; "))
    }
}

/// Fail when a collection the check iterates over is empty.
pub(crate) fn nothing_to_verify(what: &str) -> CheckResult {
    CheckResult::fail(
        format!("No {} found", what),
        format!("expected at least one {} inside the table body", what),
    )
}
