//! Output formatting tests.
//!
//! Tests for terminal, JSON, and JUnit XML output formatters.

use html_preflight::cli::args::OutputFormat;
use html_preflight::cli::output::{get_formatter, JsonFormatter, JunitFormatter, OutputFormatter, TerminalFormatter};
use html_preflight::engine::result::ValidationReport;
use html_preflight::{Check, CheckCategory, CheckResult};

fn check(id: &str, name: &str, category: CheckCategory, result: CheckResult) -> Check {
    Check {
        id: id.to_string(),
        name: name.to_string(),
        category,
        description: format!("{} description", name),
        result: Some(result),
    }
}

fn create_sample_report() -> ValidationReport {
    ValidationReport {
        timestamp: 1733500000,
        source: "site/index.html".to_string(),
        checks: vec![
            check(
                "DOC-001",
                "Doctype Declaration",
                CheckCategory::Structure,
                CheckResult::pass("HTML5 doctype declared").with_duration(1),
            ),
            check(
                "MED-004",
                "Image Alt Text",
                CheckCategory::Media,
                CheckResult::fail("Images missing alt text (1)", "image 2 (images/user2.jpg) has no alt text").with_duration(2),
            ),
            check(
                "DAT-002",
                "Caption Names",
                CheckCategory::UserData,
                CheckResult::skip("No row has both a caption and first/last name cells"),
            ),
        ],
        total_duration_ms: 4,
    }
}

fn create_empty_report() -> ValidationReport {
    ValidationReport {
        timestamp: 1733500000,
        source: "empty.html".to_string(),
        checks: vec![],
        total_duration_ms: 0,
    }
}

// Terminal formatter tests

#[test]
fn test_terminal_formatter_basic() {
    let output = TerminalFormatter::new(false, false, false).format(&create_sample_report());

    assert!(output.contains("html-preflight validation report"));
    assert!(output.contains("Document: site/index.html"));
    assert!(output.contains("2024-12-06T15:46:40Z"));
    assert!(output.contains("STRUCTURE CHECKS"));
    assert!(output.contains("USER DATA CHECKS"));
    assert!(output.contains("[PASS] DOC-001"));
    assert!(output.contains("[FAIL] MED-004"));
    assert!(output.contains("[SKIP] DAT-002"));
    assert!(output.contains("SUMMARY: 1 passed, 1 failed, 1 skipped"));
    assert!(output.contains("Exit code: 1 (failures detected)"));
}

#[test]
fn test_terminal_formatter_failure_shows_expectation() {
    let output = TerminalFormatter::new(false, false, false).format(&create_sample_report());
    assert!(output.contains("image 2 (images/user2.jpg) has no alt text"));
}

#[test]
fn test_terminal_formatter_quiet_hides_passing() {
    let output = TerminalFormatter::new(false, false, true).format(&create_sample_report());
    assert!(!output.contains("DOC-001"));
    assert!(!output.contains("STRUCTURE CHECKS"));
    assert!(!output.contains("DAT-002"));
    assert!(output.contains("MED-004"));
}

#[test]
fn test_terminal_formatter_verbose_shows_timing() {
    let output = TerminalFormatter::new(false, true, false).format(&create_sample_report());
    assert!(output.contains("(1ms)"));
    assert!(output.contains("(2ms)"));
}

#[test]
fn test_terminal_formatter_color() {
    let colored = TerminalFormatter::new(true, false, false).format(&create_sample_report());
    let plain = TerminalFormatter::new(false, false, false).format(&create_sample_report());
    assert!(colored.contains("\x1b[32m[PASS]\x1b[0m"));
    assert!(!plain.contains("\x1b["));
}

#[test]
fn test_terminal_formatter_empty_report() {
    let output = TerminalFormatter::new(false, false, false).format(&create_empty_report());
    assert!(output.contains("SUMMARY: 0 passed, 0 failed, 0 skipped"));
    assert!(output.contains("Exit code: 0 (all checks passed)"));
}

// JSON formatter tests

#[test]
fn test_json_formatter_structure() {
    let output = JsonFormatter::new(true).format(&create_sample_report());
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value["source"], "site/index.html");
    assert_eq!(value["summary"]["passed"], 1);
    assert_eq!(value["summary"]["failed"], 1);
    assert_eq!(value["summary"]["skipped"], 1);
    assert_eq!(value["checks"][0]["id"], "DOC-001");
    assert_eq!(value["checks"][0]["category"], "Structure");
    assert_eq!(value["checks"][0]["result"]["status"], "pass");
    assert_eq!(value["checks"][1]["result"]["status"], "fail");
    assert_eq!(value["checks"][1]["result"]["details"], "image 2 (images/user2.jpg) has no alt text");
    assert_eq!(value["checks"][2]["result"]["status"], "skip");
}

#[test]
fn test_json_output_loads_as_report() {
    let report = create_sample_report();
    let output = JsonFormatter::new(false).format(&report);
    let parsed: ValidationReport = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed, report);
}

#[test]
fn test_json_formatter_compact() {
    let output = JsonFormatter::new(false).format(&create_empty_report());
    assert!(!output.contains('\n'));
    assert!(output.contains("\"checks\":[]"));
}

// JUnit formatter tests

#[test]
fn test_junit_formatter_basic() {
    let output = JunitFormatter::new().format(&create_sample_report());

    assert!(output.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(output.contains("<testsuites tests=\"3\" failures=\"1\" errors=\"0\" skipped=\"1\""));
    assert!(output.contains("<testsuite name=\"structure\""));
    assert!(output.contains("<testsuite name=\"media\""));
    assert!(output.contains("<testsuite name=\"user_data\""));
    assert!(!output.contains("<testsuite name=\"files\""));
    assert!(output.contains("classname=\"html-preflight.media\""));
    assert!(output.contains("<failure message=\"Images missing alt text (1)\">"));
    assert!(output.contains("<skipped message="));
    assert!(output.ends_with("</testsuites>"));
}

#[test]
fn test_junit_formatter_escapes_markup() {
    let report = ValidationReport {
        checks: vec![check(
            "DOC-001",
            "Doctype Declaration",
            CheckCategory::Structure,
            CheckResult::fail("Missing HTML5 doctype", "found '<html lang=\"en\">'"),
        )],
        ..create_empty_report()
    };
    let output = JunitFormatter::new().format(&report);
    assert!(output.contains("found &apos;&lt;html lang=&quot;en&quot;&gt;&apos;"));
}

#[test]
fn test_get_formatter_dispatch() {
    let report = create_sample_report();
    assert!(get_formatter(OutputFormat::Text, false, false, false)
        .format(&report)
        .contains("SUMMARY"));
    assert!(get_formatter(OutputFormat::Json, false, false, false)
        .format(&report)
        .starts_with('{'));
    assert!(get_formatter(OutputFormat::Junit, false, false, false)
        .format(&report)
        .starts_with("<?xml"));
}
