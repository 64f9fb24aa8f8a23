//! Document structure checks (DOC-001 through DOC-004).
//!
//! Doctype, html/head/body skeleton, charset and viewport meta tags, title.

use crate::checks::CheckContext;
use crate::document::{sel, text_content};
use crate::engine::orchestrator::RegisteredCheck;
use crate::{CheckCategory, CheckResult, PreflightError};

const DOCTYPE: &str = "<!doctype html>";

/// Get all document structure checks
pub fn structure_checks() -> Vec<RegisteredCheck> {
    vec![
        RegisteredCheck::new(
            "DOC-001",
            "Doctype Declaration",
            CheckCategory::Structure,
            "Source starts with the HTML5 doctype",
            run_doc001,
        ),
        RegisteredCheck::new(
            "DOC-002",
            "Document Skeleton",
            CheckCategory::Structure,
            "html, head and body elements are present",
            run_doc002,
        ),
        RegisteredCheck::new(
            "DOC-003",
            "Meta Tags",
            CheckCategory::Structure,
            "UTF-8 charset and viewport meta tags are declared",
            run_doc003,
        ),
        RegisteredCheck::new(
            "DOC-004",
            "Document Title",
            CheckCategory::Structure,
            "A title element with text is present",
            run_doc004,
        ),
    ]
}

/// `source` without leading whitespace or byte order mark.
fn leading_markup(source: &str) -> &str {
    source.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Whether `source` opens with `<!doctype html>`, ignoring case and leading whitespace.
pub fn has_html5_doctype(source: &str) -> bool {
    leading_markup(source)
        .get(..DOCTYPE.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(DOCTYPE))
}

/// Run DOC-001: Doctype Declaration
pub fn run_doc001(ctx: &CheckContext<'_>) -> Result<CheckResult, PreflightError> {
    if has_html5_doctype(ctx.document.source()) {
        return Ok(CheckResult::pass("HTML5 doctype declared"));
    }

    let found: String = leading_markup(ctx.document.source()).chars().take(DOCTYPE.len()).collect();
    Ok(CheckResult::fail(
        "Missing HTML5 doctype",
        format!("expected document to begin with <!DOCTYPE html>, found '{}'", found),
    ))
}

/// Run DOC-002: Document Skeleton
pub fn run_doc002(ctx: &CheckContext<'_>) -> Result<CheckResult, PreflightError> {
    let mut missing = Vec::new();
    for (name, css) in [("html", sel::HTML), ("head", sel::HEAD), ("body", sel::BODY)] {
        if !ctx.document.exists(css)? {
            missing.push(name);
        }
    }

    if missing.is_empty() {
        Ok(CheckResult::pass("html, head and body present"))
    } else {
        Ok(CheckResult::fail(
            "Document skeleton incomplete",
            format!("missing element(s): {}", missing.join(", ")),
        ))
    }
}

/// Run DOC-003: Meta Tags
pub fn run_doc003(ctx: &CheckContext<'_>) -> Result<CheckResult, PreflightError> {
    let mut problems = Vec::new();

    match ctx.document.first(sel::META_CHARSET)? {
        Some(meta) => {
            let charset = meta.value().attr("charset").unwrap_or_default();
            if charset.to_lowercase() != "utf-8" {
                problems.push(format!("charset is '{}', expected utf-8", charset));
            }
        }
        None => problems.push("no <meta charset> declaration".to_string()),
    }

    if !ctx.document.exists(sel::META_VIEWPORT)? {
        problems.push("no <meta name=\"viewport\"> declaration".to_string());
    }

    if problems.is_empty() {
        Ok(CheckResult::pass("charset utf-8 and viewport declared"))
    } else {
        Ok(CheckResult::fail("Meta tags incomplete", problems.join("; ")))
    }
}

/// Run DOC-004: Document Title
pub fn run_doc004(ctx: &CheckContext<'_>) -> Result<CheckResult, PreflightError> {
    match ctx.document.first(sel::TITLE)? {
        Some(title) => {
            let text = text_content(title);
            if text.is_empty() {
                Ok(CheckResult::fail("Title is empty", "expected <title> to contain text"))
            } else {
                Ok(CheckResult::pass(format!("Title: {}", text.trim())))
            }
        }
        None => Ok(CheckResult::fail("No title element", "expected a <title> element in the document")),
    }
}
