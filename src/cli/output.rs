//! Output formatting for html-preflight.
//!
//! Provides terminal, JSON, and JUnit XML output formatters.
//!
//! # Graceful Degradation
//!
//! - Non-TTY output: color disabled via NO_COLOR or --no-color
//! - Empty reports: valid output with zero checks
//! - Out-of-range timestamps: printed as raw seconds
//!
//! All formatters produce valid output for any ValidationReport input.

use crate::cli::args::OutputFormat;
use crate::engine::result::{ResultSummary, ValidationReport};
use crate::{CheckCategory, CheckResult};
use chrono::DateTime;
use serde::Serialize;

const RULE: &str = "--------------------------------------------------------------------------------";

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format a validation report into a string
    fn format(&self, report: &ValidationReport) -> String;
}

/// Terminal (human-readable) formatter
pub struct TerminalFormatter {
    color: bool,
    verbose: bool,
    quiet: bool,
}

impl TerminalFormatter {
    pub fn new(color: bool, verbose: bool, quiet: bool) -> Self {
        TerminalFormatter {
            color,
            verbose,
            quiet,
        }
    }

    fn colorize(&self, text: &str, color_code: &str) -> String {
        if self.color {
            format!("\x1b[{}m{}\x1b[0m", color_code, text)
        } else {
            text.to_string()
        }
    }

    fn status_and_message(&self, result: Option<&CheckResult>) -> (String, String) {
        match result {
            Some(CheckResult::Pass { message, duration_ms }) => {
                let msg = if self.verbose {
                    format!("{} ({}ms)", message, duration_ms)
                } else {
                    message.clone()
                };
                (self.colorize("[PASS]", "32"), msg)
            }
            Some(CheckResult::Fail {
                message,
                details,
                duration_ms,
            }) => {
                let msg = if self.verbose {
                    format!("{} - {} ({}ms)", message, details, duration_ms)
                } else {
                    format!("{} - {}", message, details)
                };
                (self.colorize("[FAIL]", "31"), msg)
            }
            Some(CheckResult::Skip { reason }) => (self.colorize("[SKIP]", "90"), reason.clone()),
            None => (self.colorize("[----]", "90"), "Not executed".to_string()),
        }
    }
}

impl OutputFormatter for TerminalFormatter {
    fn format(&self, report: &ValidationReport) -> String {
        let mut output = String::new();

        output.push_str(RULE);
        output.push('\n');
        output.push_str("html-preflight validation report\n");
        output.push_str(&format!("Document: {}\n", report.source));
        output.push_str(&format!("Timestamp: {}\n", format_timestamp(report.timestamp)));
        output.push_str(RULE);
        output.push_str("\n\n");

        for category in CheckCategory::ALL {
            let category_checks: Vec<_> = report.checks.iter().filter(|c| c.category == category).collect();
            if category_checks.is_empty() {
                continue;
            }

            if self.quiet && !category_checks.iter().any(|c| c.result.as_ref().is_some_and(CheckResult::is_fail)) {
                continue;
            }

            output.push_str(&format!("{} CHECKS\n", category.to_string().to_uppercase()));

            for check in category_checks {
                if self.quiet && !check.result.as_ref().is_some_and(CheckResult::is_fail) {
                    continue;
                }

                let (status, message) = self.status_and_message(check.result.as_ref());
                output.push_str(&format!("  {} {}: {} ({})\n", status, check.id, check.name, message));
            }

            output.push('\n');
        }

        let summary = report.summary();
        output.push_str(RULE);
        output.push('\n');
        output.push_str(&format!(
            "SUMMARY: {} passed, {} failed, {} skipped\n",
            summary.passed, summary.failed, summary.skipped
        ));
        output.push_str(&format!(
            "Total time: {:.3}s\n",
            report.total_duration_ms as f64 / 1000.0
        ));

        let (exit_code, exit_desc) = if summary.failed > 0 {
            (1, "failures detected")
        } else {
            (0, "all checks passed")
        };
        output.push_str(&format!("Exit code: {} ({})\n", exit_code, exit_desc));
        output.push_str(RULE);

        output
    }
}

/// JSON document written by `JsonFormatter`.
///
/// The flattened report fields make the output loadable as a baseline.
#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    report: &'a ValidationReport,
    summary: ResultSummary,
}

/// JSON formatter
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        JsonFormatter { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &ValidationReport) -> String {
        let doc = JsonReport {
            report,
            summary: report.summary(),
        };
        let rendered = if self.pretty {
            serde_json::to_string_pretty(&doc)
        } else {
            serde_json::to_string(&doc)
        };
        // Serializing plain strings and integers cannot fail
        rendered.unwrap_or_else(|e| format!("{{\"error\":\"{}\"}}", e))
    }
}

/// JUnit XML formatter
pub struct JunitFormatter;

impl JunitFormatter {
    pub fn new() -> Self {
        JunitFormatter
    }

    fn escape_xml(s: &str) -> String {
        let mut result = String::with_capacity(s.len());
        for c in s.chars() {
            match c {
                '&' => result.push_str("&amp;"),
                '<' => result.push_str("&lt;"),
                '>' => result.push_str("&gt;"),
                '"' => result.push_str("&quot;"),
                '\'' => result.push_str("&apos;"),
                c => result.push(c),
            }
        }
        result
    }
}

impl Default for JunitFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for JunitFormatter {
    fn format(&self, report: &ValidationReport) -> String {
        let mut output = String::new();
        output.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");

        let summary = report.summary();
        output.push_str(&format!(
            "<testsuites tests=\"{}\" failures=\"{}\" errors=\"0\" skipped=\"{}\" time=\"{:.3}\">\n",
            summary.total,
            summary.failed,
            summary.skipped,
            report.total_duration_ms as f64 / 1000.0
        ));

        for category in CheckCategory::ALL {
            let category_checks: Vec<_> = report.checks.iter().filter(|c| c.category == category).collect();
            if category_checks.is_empty() {
                continue;
            }

            let suite = category.slug();
            let failures = category_checks
                .iter()
                .filter(|c| matches!(&c.result, Some(CheckResult::Fail { .. })))
                .count();
            let skipped = category_checks
                .iter()
                .filter(|c| matches!(&c.result, Some(CheckResult::Skip { .. }) | None))
                .count();
            let suite_time: u64 = category_checks
                .iter()
                .filter_map(|c| c.result.as_ref().map(CheckResult::duration_ms))
                .sum();

            output.push_str(&format!(
                "  <testsuite name=\"{}\" tests=\"{}\" failures=\"{}\" errors=\"0\" skipped=\"{}\" time=\"{:.3}\">\n",
                suite,
                category_checks.len(),
                failures,
                skipped,
                suite_time as f64 / 1000.0
            ));

            for check in category_checks {
                let time = check.result.as_ref().map(CheckResult::duration_ms).unwrap_or(0);
                output.push_str(&format!(
                    "    <testcase name=\"{}: {}\" classname=\"html-preflight.{}\" time=\"{:.3}\"",
                    Self::escape_xml(&check.id),
                    Self::escape_xml(&check.name),
                    suite,
                    time as f64 / 1000.0
                ));

                match &check.result {
                    Some(CheckResult::Pass { message, .. }) => {
                        output.push_str(">\n");
                        output.push_str(&format!(
                            "      <system-out>{}</system-out>\n",
                            Self::escape_xml(message)
                        ));
                        output.push_str("    </testcase>\n");
                    }
                    Some(CheckResult::Fail { message, details, .. }) => {
                        output.push_str(">\n");
                        output.push_str(&format!(
                            "      <failure message=\"{}\">{}</failure>\n",
                            Self::escape_xml(message),
                            Self::escape_xml(details)
                        ));
                        output.push_str("    </testcase>\n");
                    }
                    Some(CheckResult::Skip { reason }) => {
                        output.push_str(">\n");
                        output.push_str(&format!(
                            "      <skipped message=\"{}\" />\n",
                            Self::escape_xml(reason)
                        ));
                        output.push_str("    </testcase>\n");
                    }
                    None => {
                        output.push_str(" />\n");
                    }
                }
            }

            output.push_str("  </testsuite>\n");
        }

        output.push_str("</testsuites>");
        output
    }
}

/// Get a formatter based on the output format
pub fn get_formatter(format: OutputFormat, color: bool, verbose: bool, quiet: bool) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TerminalFormatter::new(color, verbose, quiet)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
        OutputFormat::Junit => Box::new(JunitFormatter::new()),
    }
}

/// Format a Unix timestamp as ISO 8601
pub fn format_timestamp(timestamp: u64) -> String {
    i64::try_from(timestamp)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|dt| dt.format("%Y-%m-%dT%H:%M:%SZ").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}
