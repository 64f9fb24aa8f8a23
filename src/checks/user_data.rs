//! User data checks (DAT-001, DAT-002).
//!
//! A user row is one `tr` in the table body: cell 0 holds the profile
//! figure, cells 1 and 2 the first and last name, then gender and country.

use crate::checks::{nothing_to_verify, verdict, CheckContext};
use crate::document::{first_within, select_within, sel, trimmed_text, Document};
use crate::engine::orchestrator::RegisteredCheck;
use crate::{CheckCategory, CheckResult, PreflightError};
use scraper::ElementRef;

pub const MIN_CELLS: usize = 5;

/// One table body row and its `td` cells.
pub struct UserRow<'a> {
    pub cells: Vec<ElementRef<'a>>,
}

impl<'a> UserRow<'a> {
    /// Rows of `table tbody`, in document order.
    pub fn collect(document: &'a Document) -> Result<Vec<UserRow<'a>>, PreflightError> {
        document
            .select(sel::BODY_ROWS)?
            .into_iter()
            .map(|row| select_within(row, sel::CELL).map(|cells| UserRow { cells }))
            .collect()
    }

    /// Trimmed text of cell `index`, empty when the cell is absent.
    pub fn cell_text(&self, index: usize) -> String {
        self.cells.get(index).map(|c| trimmed_text(*c)).unwrap_or_default()
    }

    /// The caption inside the media cell, if any.
    pub fn caption(&self) -> Result<Option<ElementRef<'a>>, PreflightError> {
        match self.cells.first() {
            Some(cell) => first_within(*cell, sel::FIGCAPTION),
            None => Ok(None),
        }
    }

    /// Contract violations of this row's cells.
    pub fn cell_problems(&self) -> Result<Vec<String>, PreflightError> {
        let mut problems = Vec::new();
        if self.cells.len() < MIN_CELLS {
            problems.push(format!("{} cell(s), expected at least {}", self.cells.len(), MIN_CELLS));
        }

        for (index, cell) in self.cells.iter().enumerate() {
            if index == 0 {
                if first_within(*cell, sel::FIGURE)?.is_none() {
                    problems.push("first cell has no <figure>".to_string());
                }
            } else if trimmed_text(*cell).is_empty() {
                problems.push(format!("cell {} is empty", index + 1));
            }
        }
        Ok(problems)
    }
}

/// Outcome of comparing one row's caption with its name cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameMatch {
    Matches,
    Differs { caption: String, expected: String },
    /// Caption or either name cell missing; nothing is asserted
    Skipped,
}

/// Compare a caption with `"{first} {last}"` after trimming all three.
pub fn match_caption(caption: Option<&str>, first_name: &str, last_name: &str) -> NameMatch {
    let first_name = first_name.trim();
    let last_name = last_name.trim();
    let Some(caption) = caption else {
        return NameMatch::Skipped;
    };
    if first_name.is_empty() || last_name.is_empty() {
        return NameMatch::Skipped;
    }

    let expected = format!("{} {}", first_name, last_name);
    let caption = caption.trim();
    if caption == expected {
        NameMatch::Matches
    } else {
        NameMatch::Differs {
            caption: caption.to_string(),
            expected,
        }
    }
}

/// Get all user data checks
pub fn user_data_checks() -> Vec<RegisteredCheck> {
    vec![
        RegisteredCheck::new(
            "DAT-001",
            "Row Cells",
            CheckCategory::UserData,
            "Each row has a figure cell followed by non-empty text cells",
            run_dat001,
        ),
        RegisteredCheck::new(
            "DAT-002",
            "Caption Names",
            CheckCategory::UserData,
            "Each figure caption equals the row's first and last name",
            run_dat002,
        ),
    ]
}

/// Run DAT-001: Row Cells
pub fn run_dat001(ctx: &CheckContext<'_>) -> Result<CheckResult, PreflightError> {
    let rows = UserRow::collect(ctx.document)?;
    if rows.is_empty() {
        return Ok(nothing_to_verify("row"));
    }

    let mut problems = Vec::new();
    for (i, row) in rows.iter().enumerate() {
        for problem in row.cell_problems()? {
            problems.push(format!("row {}: {}", i + 1, problem));
        }
    }

    Ok(verdict(
        problems,
        format!("{} rows carry a figure and user data", rows.len()),
        "Row cell problems",
    ))
}

/// Run DAT-002: Caption Names
pub fn run_dat002(ctx: &CheckContext<'_>) -> Result<CheckResult, PreflightError> {
    let rows = UserRow::collect(ctx.document)?;

    let mut compared = 0;
    let mut problems = Vec::new();
    for (i, row) in rows.iter().enumerate() {
        let caption = row.caption()?.map(trimmed_text);
        match match_caption(caption.as_deref(), &row.cell_text(1), &row.cell_text(2)) {
            NameMatch::Matches => compared += 1,
            NameMatch::Differs { caption, expected } => {
                compared += 1;
                problems.push(format!("row {}: caption '{}', expected '{}'", i + 1, caption, expected));
            }
            NameMatch::Skipped => {}
        }
    }

    if compared == 0 {
        return Ok(CheckResult::skip("No row has both a caption and first/last name cells"));
    }

    Ok(verdict(
        problems,
        format!("{} captions match the row names", compared),
        "Captions differ from row names",
    ))
}
