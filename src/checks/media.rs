//! Media element checks (MED-001 through MED-006).
//!
//! Every query here is scoped to `table tbody`; figures and images outside
//! the user table are not inspected.

use crate::checks::{nothing_to_verify, verdict, CheckContext};
use crate::document::{first_within, non_empty_attr, sel, trimmed_text};
use crate::engine::orchestrator::RegisteredCheck;
use crate::{CheckCategory, CheckResult, PreflightError};

pub const MIN_FIGURES: usize = 3;
pub const MIN_IMAGES: usize = 3;

/// Path segment every image source must contain.
pub const IMAGES_SEGMENT: &str = "images/";

/// File names that must each appear in some image source.
pub const USER_IMAGES: [&str; 3] = ["user1.jpg", "user2.jpg", "user3.jpg"];

/// Get all media checks
pub fn media_checks() -> Vec<RegisteredCheck> {
    vec![
        RegisteredCheck::new(
            "MED-001",
            "Figure Elements",
            CheckCategory::Media,
            "Table body holds a figure for each user",
            run_med001,
        ),
        RegisteredCheck::new(
            "MED-002",
            "Figure Images",
            CheckCategory::Media,
            "Every figure contains an img",
            run_med002,
        ),
        RegisteredCheck::new(
            "MED-003",
            "Figure Captions",
            CheckCategory::Media,
            "Every figure contains a figcaption with text",
            run_med003,
        ),
        RegisteredCheck::new(
            "MED-004",
            "Image Alt Text",
            CheckCategory::Media,
            "Every image has a non-empty alt attribute",
            run_med004,
        ),
        RegisteredCheck::new(
            "MED-005",
            "Image Source Paths",
            CheckCategory::Media,
            "Every image src points into the images folder",
            run_med005,
        ),
        RegisteredCheck::new(
            "MED-006",
            "User Images",
            CheckCategory::Media,
            "user1.jpg, user2.jpg and user3.jpg are all referenced",
            run_med006,
        ),
    ]
}

/// Entries of `USER_IMAGES` that no source mentions.
pub fn unreferenced_user_images(sources: &[&str]) -> Vec<&'static str> {
    USER_IMAGES
        .iter()
        .copied()
        .filter(|name| !sources.iter().any(|src| src.contains(name)))
        .collect()
}

/// Run MED-001: Figure Elements
pub fn run_med001(ctx: &CheckContext<'_>) -> Result<CheckResult, PreflightError> {
    let figures = ctx.document.select(sel::BODY_FIGURES)?.len();
    if figures >= MIN_FIGURES {
        Ok(CheckResult::pass(format!("{} figures in tbody", figures)))
    } else {
        Ok(CheckResult::fail(
            format!("Only {} figure(s) in tbody", figures),
            format!("expected at least {} figure elements, one per user row", MIN_FIGURES),
        ))
    }
}

/// Run MED-002: Figure Images
pub fn run_med002(ctx: &CheckContext<'_>) -> Result<CheckResult, PreflightError> {
    let figures = ctx.document.select(sel::BODY_FIGURES)?;
    if figures.is_empty() {
        return Ok(nothing_to_verify("figure"));
    }

    let mut problems = Vec::new();
    for (i, figure) in figures.iter().enumerate() {
        if first_within(*figure, sel::IMG)?.is_none() {
            problems.push(format!("figure {} has no <img>", i + 1));
        }
    }

    Ok(verdict(
        problems,
        format!("{} figures each contain an image", figures.len()),
        "Figures without images",
    ))
}

/// Run MED-003: Figure Captions
pub fn run_med003(ctx: &CheckContext<'_>) -> Result<CheckResult, PreflightError> {
    let figures = ctx.document.select(sel::BODY_FIGURES)?;
    if figures.is_empty() {
        return Ok(nothing_to_verify("figure"));
    }

    let mut problems = Vec::new();
    for (i, figure) in figures.iter().enumerate() {
        match first_within(*figure, sel::FIGCAPTION)? {
            Some(caption) if !trimmed_text(caption).is_empty() => {}
            Some(_) => problems.push(format!("figure {} has an empty <figcaption>", i + 1)),
            None => problems.push(format!("figure {} has no <figcaption>", i + 1)),
        }
    }

    Ok(verdict(
        problems,
        format!("{} figures each carry a caption", figures.len()),
        "Figures without captions",
    ))
}

/// Run MED-004: Image Alt Text
pub fn run_med004(ctx: &CheckContext<'_>) -> Result<CheckResult, PreflightError> {
    let images = ctx.document.select(sel::BODY_IMAGES)?;
    if images.len() < MIN_IMAGES {
        return Ok(CheckResult::fail(
            format!("Only {} image(s) in tbody", images.len()),
            format!("expected at least {} images with alt text", MIN_IMAGES),
        ));
    }

    let problems: Vec<String> = images
        .iter()
        .enumerate()
        .filter(|(_, img)| non_empty_attr(**img, "alt").is_none())
        .map(|(i, img)| {
            let src = img.value().attr("src").unwrap_or("?");
            format!("image {} ({}) has no alt text", i + 1, src)
        })
        .collect();

    Ok(verdict(
        problems,
        format!("{} images have alt text", images.len()),
        "Images missing alt text",
    ))
}

/// Run MED-005: Image Source Paths
pub fn run_med005(ctx: &CheckContext<'_>) -> Result<CheckResult, PreflightError> {
    let images = ctx.document.select(sel::BODY_IMAGES)?;
    if images.is_empty() {
        return Ok(nothing_to_verify("image"));
    }

    let mut problems = Vec::new();
    for (i, img) in images.iter().enumerate() {
        match non_empty_attr(*img, "src") {
            Some(src) if src.contains(IMAGES_SEGMENT) => {}
            Some(src) => problems.push(format!("image {} src '{}' is outside {}", i + 1, src, IMAGES_SEGMENT)),
            None => problems.push(format!("image {} has no src", i + 1)),
        }
    }

    Ok(verdict(
        problems,
        format!("{} image sources point into {}", images.len(), IMAGES_SEGMENT),
        "Image sources outside the images folder",
    ))
}

/// Run MED-006: User Images
pub fn run_med006(ctx: &CheckContext<'_>) -> Result<CheckResult, PreflightError> {
    let images = ctx.document.select(sel::BODY_IMAGES)?;
    let sources: Vec<&str> = images.iter().filter_map(|img| img.value().attr("src")).collect();

    let missing = unreferenced_user_images(&sources);
    if missing.is_empty() {
        Ok(CheckResult::pass(format!("{} referenced", USER_IMAGES.join(", "))))
    } else {
        Ok(CheckResult::fail(
            "User images not referenced",
            format!("no image src contains {}", missing.join(", ")),
        ))
    }
}
