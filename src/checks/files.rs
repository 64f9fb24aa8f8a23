//! Asset presence checks (FS-001, FS-002).
//!
//! Pure filesystem probes; the document is not consulted.

use crate::checks::CheckContext;
use crate::engine::orchestrator::RegisteredCheck;
use crate::{CheckCategory, CheckResult, PreflightError};
use std::path::Path;

/// Base names of the user images, without extension.
pub const USER_ASSETS: [&str; 3] = ["user1", "user2", "user3"];

/// Extensions accepted for each asset, tried in order.
pub const ASSET_EXTENSIONS: [&str; 3] = ["jpg", "png", "jpeg"];

/// Get all file checks
pub fn file_checks() -> Vec<RegisteredCheck> {
    vec![
        RegisteredCheck::new(
            "FS-001",
            "Images Folder",
            CheckCategory::Files,
            "An images entry exists next to the document",
            run_fs001,
        ),
        RegisteredCheck::new(
            "FS-002",
            "User Image Files",
            CheckCategory::Files,
            "user1, user2 and user3 exist as .jpg, .png or .jpeg",
            run_fs002,
        ),
    ]
}

/// Probe `dir` for each base name under every accepted extension.
///
/// Returns `(name, found)` pairs in input order.
pub fn asset_presence(dir: &Path, names: &[&str]) -> Vec<(String, bool)> {
    names
        .iter()
        .map(|name| {
            let found = ASSET_EXTENSIONS
                .iter()
                .any(|ext| dir.join(format!("{}.{}", name, ext)).exists());
            (name.to_string(), found)
        })
        .collect()
}

/// Run FS-001: Images Folder
pub fn run_fs001(ctx: &CheckContext<'_>) -> Result<CheckResult, PreflightError> {
    let dir = ctx.images_dir;
    if dir.exists() {
        Ok(CheckResult::pass(format!("{} exists", dir.display())))
    } else {
        Ok(CheckResult::fail(
            "Images folder missing",
            format!("expected directory {}", dir.display()),
        ))
    }
}

/// Run FS-002: User Image Files
pub fn run_fs002(ctx: &CheckContext<'_>) -> Result<CheckResult, PreflightError> {
    let missing: Vec<String> = asset_presence(ctx.images_dir, &USER_ASSETS)
        .into_iter()
        .filter(|(_, found)| !found)
        .map(|(name, _)| name)
        .collect();

    if missing.is_empty() {
        Ok(CheckResult::pass(format!(
            "{} present in {}",
            USER_ASSETS.join(", "),
            ctx.images_dir.display()
        )))
    } else {
        Ok(CheckResult::fail(
            format!("{} user image(s) missing", missing.len()),
            format!(
                "no .{} file for {} in {}",
                ASSET_EXTENSIONS.join("/."),
                missing.join(", "),
                ctx.images_dir.display()
            ),
        ))
    }
}
