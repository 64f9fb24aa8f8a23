//! Table structure checks (TBL-001 through TBL-003).

use crate::checks::CheckContext;
use crate::document::{sel, trimmed_text};
use crate::engine::orchestrator::RegisteredCheck;
use crate::{CheckCategory, CheckResult, PreflightError};

/// Column headers every user table must carry, in any order.
pub const REQUIRED_HEADERS: [&str; 5] = ["Profile Image", "First Name", "Last Name", "Gender", "Country"];

pub const MIN_HEADERS: usize = 5;
pub const MIN_ROWS: usize = 3;

/// Get all table checks
pub fn table_checks() -> Vec<RegisteredCheck> {
    vec![
        RegisteredCheck::new(
            "TBL-001",
            "Table Skeleton",
            CheckCategory::Table,
            "A table with thead and tbody sections is present",
            run_tbl001,
        ),
        RegisteredCheck::new(
            "TBL-002",
            "Table Headers",
            CheckCategory::Table,
            "Header row names every required column",
            run_tbl002,
        ),
        RegisteredCheck::new(
            "TBL-003",
            "Row Count",
            CheckCategory::Table,
            "Table body holds at least three user rows",
            run_tbl003,
        ),
    ]
}

/// Required headers absent from `found`.
pub fn missing_headers<S: AsRef<str>>(found: &[S]) -> Vec<&'static str> {
    REQUIRED_HEADERS
        .iter()
        .copied()
        .filter(|required| !found.iter().any(|h| h.as_ref() == *required))
        .collect()
}

/// Run TBL-001: Table Skeleton
pub fn run_tbl001(ctx: &CheckContext<'_>) -> Result<CheckResult, PreflightError> {
    if !ctx.document.exists(sel::TABLE)? {
        return Ok(CheckResult::fail("No table element", "expected a <table> element"));
    }

    let mut missing = Vec::new();
    if !ctx.document.exists(sel::TABLE_HEAD)? {
        missing.push("<thead>");
    }
    if !ctx.document.exists(sel::TABLE_BODY)? {
        missing.push("<tbody>");
    }

    if missing.is_empty() {
        Ok(CheckResult::pass("table with thead and tbody"))
    } else {
        Ok(CheckResult::fail(
            "Table sections missing",
            format!("expected the table to contain {}", missing.join(" and ")),
        ))
    }
}

/// Run TBL-002: Table Headers
pub fn run_tbl002(ctx: &CheckContext<'_>) -> Result<CheckResult, PreflightError> {
    let headers: Vec<String> = ctx
        .document
        .select(sel::HEADER_CELLS)?
        .into_iter()
        .map(trimmed_text)
        .collect();

    let mut problems = Vec::new();
    if headers.len() < MIN_HEADERS {
        problems.push(format!(
            "found {} header cell(s), expected at least {}",
            headers.len(),
            MIN_HEADERS
        ));
    }
    let missing = missing_headers(&headers);
    if !missing.is_empty() {
        problems.push(format!("missing header(s): {}", missing.join(", ")));
    }

    if problems.is_empty() {
        Ok(CheckResult::pass(format!("{} headers, all required columns present", headers.len())))
    } else {
        Ok(CheckResult::fail("Table headers incomplete", problems.join("; ")))
    }
}

/// Run TBL-003: Row Count
pub fn run_tbl003(ctx: &CheckContext<'_>) -> Result<CheckResult, PreflightError> {
    let rows = ctx.document.select(sel::BODY_ROWS)?.len();
    if rows >= MIN_ROWS {
        Ok(CheckResult::pass(format!("{} rows in tbody", rows)))
    } else {
        Ok(CheckResult::fail(
            format!("Only {} row(s) in tbody", rows),
            format!("expected at least {} rows", MIN_ROWS),
        ))
    }
}
