//! Document validator tests.
//!
//! Each test breaks one property of the conforming page and asserts which
//! checks fail.

use crate::mocks::{MockPage, MockSite};
use html_preflight::document::Document;
use html_preflight::{run_preflight, validate, CheckCategory, CheckResult, PreflightConfig, PreflightError};

fn failed(page: &MockPage) -> Vec<String> {
    let report = validate(&Document::parse(page.render()));
    report.failed_ids().iter().map(|id| id.to_string()).collect()
}

#[test]
fn test_conforming_page_passes_every_document_check() {
    let report = validate(&Document::parse(MockPage::conforming().render()));
    let summary = report.summary();

    assert_eq!(summary.total, 15);
    assert_eq!(summary.passed, 15, "failures: {:?}", report.failed_ids());
    assert!(summary.is_success());
    assert!(report.checks.iter().all(|c| c.category.reads_document()));
}

#[test]
fn test_validation_is_deterministic() {
    let document = Document::parse(MockPage::conforming().render());
    let first = validate(&document);
    let second = validate(&document);
    assert_eq!(first.outcomes(), second.outcomes());

    let mut broken = MockPage::conforming();
    broken.users[1].alt = None;
    let document = Document::parse(broken.render());
    assert_eq!(validate(&document).outcomes(), validate(&document).outcomes());
}

#[test]
fn test_missing_doctype_fails_only_doctype() {
    let mut page = MockPage::conforming();
    page.doctype = false;
    assert_eq!(failed(&page), vec!["DOC-001"]);
}

#[test]
fn test_leading_whitespace_before_doctype() {
    let page = MockPage::conforming();
    let report = validate(&Document::parse(format!("\n\n   {}", page.render())));
    assert!(report.summary().is_success());
}

#[test]
fn test_missing_alt_fails_only_alt_check() {
    let mut page = MockPage::conforming();
    page.users[0].alt = None;
    assert_eq!(failed(&page), vec!["MED-004"]);
}

#[test]
fn test_empty_alt_fails_only_alt_check() {
    let mut page = MockPage::conforming();
    page.users[2].alt = Some(String::new());
    assert_eq!(failed(&page), vec!["MED-004"]);
}

#[test]
fn test_caption_trailing_space_passes() {
    let mut page = MockPage::conforming();
    page.users[0].caption = Some("Ada Lovelace ".to_string());
    assert!(failed(&page).is_empty());
}

#[test]
fn test_caption_with_middle_initial_fails_name_check() {
    let mut page = MockPage::conforming();
    page.users[0].caption = Some("Ada M Lovelace".to_string());
    assert_eq!(failed(&page), vec!["DAT-002"]);
}

#[test]
fn test_empty_last_name_skips_name_comparison_for_that_row() {
    let mut page = MockPage::conforming();
    page.users[1].last_name = String::new();
    page.users[1].caption = Some("Someone Else".to_string());

    // The row breaks the cell contract, but the caption is not compared.
    assert_eq!(failed(&page), vec!["DAT-001"]);
}

#[test]
fn test_zero_rows_fail_consistently() {
    let mut page = MockPage::conforming();
    page.users.clear();

    let report = validate(&Document::parse(page.render()));
    assert_eq!(
        report.failed_ids(),
        vec!["TBL-003", "MED-001", "MED-002", "MED-003", "MED-004", "MED-005", "MED-006", "DAT-001"]
    );
    assert!(matches!(
        report.get("DAT-002").and_then(|c| c.result.as_ref()),
        Some(CheckResult::Skip { .. })
    ));
}

#[test]
fn test_missing_header_fails_only_header_check() {
    let mut page = MockPage::conforming();
    page.headers[3] = "Sex".to_string();
    assert_eq!(failed(&page), vec!["TBL-002"]);
}

#[test]
fn test_header_order_irrelevant_and_extras_allowed() {
    let mut page = MockPage::conforming();
    page.headers.reverse();
    page.headers.push("Email".to_string());
    for user in &mut page.users {
        user.country.push_str("</td><td>someone@example.com");
    }
    assert!(failed(&page).is_empty());
}

#[test]
fn test_image_outside_images_folder() {
    let mut page = MockPage::conforming();
    page.users[2].src = Some("assets/user3.jpg".to_string());
    assert_eq!(failed(&page), vec!["MED-005"]);
}

#[test]
fn test_wrong_asset_name() {
    let mut page = MockPage::conforming();
    page.users[2].src = Some("images/user4.jpg".to_string());
    assert_eq!(failed(&page), vec!["MED-006"]);
}

#[test]
fn test_missing_src_fails_path_and_asset_checks() {
    let mut page = MockPage::conforming();
    page.users[0].src = None;
    assert_eq!(failed(&page), vec!["MED-005", "MED-006"]);
}

#[test]
fn test_missing_caption_fails_caption_check() {
    let mut page = MockPage::conforming();
    page.users[0].caption = None;
    assert_eq!(failed(&page), vec!["MED-003"]);
}

#[test]
fn test_wrong_charset_and_missing_title() {
    let mut page = MockPage::conforming();
    page.charset = Some("latin1".to_string());
    page.title = None;
    assert_eq!(failed(&page), vec!["DOC-003", "DOC-004"]);
}

#[test]
fn test_missing_viewport() {
    let mut page = MockPage::conforming();
    page.viewport = false;
    assert_eq!(failed(&page), vec!["DOC-003"]);
}

#[test]
fn test_run_preflight_with_images() {
    let site = MockSite::new(&MockPage::conforming(), &["user1.jpg", "user2.png", "user3.jpeg"]);
    let config = PreflightConfig {
        document: site.index.clone(),
        ..Default::default()
    };

    let report = run_preflight(config).unwrap();
    let summary = report.summary();
    assert_eq!(summary.total, 17);
    assert_eq!(summary.passed, 17, "failures: {:?}", report.failed_ids());
    assert_eq!(report.source, site.index.display().to_string());
}

#[test]
fn test_run_preflight_without_images_folder() {
    let site = MockSite::new(&MockPage::conforming(), &[]);
    let config = PreflightConfig {
        document: site.index.clone(),
        ..Default::default()
    };

    let report = run_preflight(config).unwrap();
    assert_eq!(report.failed_ids(), vec!["FS-001", "FS-002"]);
}

#[test]
fn test_run_preflight_explicit_images_dir() {
    let site = MockSite::new(&MockPage::conforming(), &[]);
    let assets = site.root().join("assets");
    std::fs::create_dir(&assets).unwrap();
    for name in ["user1.jpg", "user2.jpg", "user3.jpg"] {
        std::fs::write(assets.join(name), b"").unwrap();
    }

    let config = PreflightConfig {
        document: site.index.clone(),
        images_dir: Some(assets),
        categories: Some(vec![CheckCategory::Files]),
        ..Default::default()
    };
    let report = run_preflight(config).unwrap();
    assert_eq!(report.summary().total, 2);
    assert!(report.summary().is_success());
}

#[test]
fn test_run_preflight_missing_document_is_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = PreflightConfig {
        document: dir.path().join("index.html"),
        ..Default::default()
    };

    match run_preflight(config) {
        Err(PreflightError::Load { path, .. }) => assert!(path.ends_with("index.html")),
        other => panic!("expected load error, got {:?}", other.map(|r| r.failed_ids().len())),
    }
}

#[test]
fn test_run_preflight_only_and_skip() {
    let site = MockSite::new(&MockPage::conforming(), &[]);

    let only = PreflightConfig {
        document: site.index.clone(),
        only_checks: vec!["DOC-001".to_string(), "NOPE-999".to_string()],
        ..Default::default()
    };
    let report = run_preflight(only).unwrap();
    assert_eq!(report.checks.len(), 1);
    assert_eq!(report.checks[0].id, "DOC-001");

    let skip = PreflightConfig {
        document: site.index.clone(),
        skip_checks: vec!["FS-001".to_string(), "FS-002".to_string()],
        ..Default::default()
    };
    let report = run_preflight(skip).unwrap();
    assert_eq!(report.checks.len(), 15);
    assert!(report.summary().is_success());
}

#[test]
fn test_run_preflight_category_with_skip() {
    let site = MockSite::new(&MockPage::conforming(), &[]);
    let config = PreflightConfig {
        document: site.index.clone(),
        categories: Some(vec![CheckCategory::Media]),
        skip_checks: vec!["MED-001".to_string()],
        ..Default::default()
    };

    let report = run_preflight(config).unwrap();
    let ids: Vec<&str> = report.checks.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["MED-002", "MED-003", "MED-004", "MED-005", "MED-006"]);
    assert!(report.summary().is_success());
}

#[test]
fn test_run_preflight_only_overrides_category_and_skip() {
    let site = MockSite::new(&MockPage::conforming(), &[]);
    let config = PreflightConfig {
        document: site.index.clone(),
        categories: Some(vec![CheckCategory::Media]),
        skip_checks: vec!["DOC-001".to_string()],
        only_checks: vec!["DOC-001".to_string()],
        ..Default::default()
    };

    let report = run_preflight(config).unwrap();
    assert_eq!(report.failed_ids().len(), 0);
    assert_eq!(report.checks.len(), 1);
    assert_eq!(report.checks[0].id, "DOC-001");
}
