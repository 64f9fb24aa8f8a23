//! Command line arguments for html-preflight.

use crate::CheckCategory;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Command to execute
#[derive(Subcommand, Debug, Clone, PartialEq, Eq, Default)]
pub enum Command {
    /// Run validation checks (default)
    #[default]
    Check,
    /// List all available checks
    List,
}

/// Output format selection
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable terminal output
    #[default]
    Text,
    /// Machine-readable JSON
    Json,
    /// JUnit XML for CI/CD integration
    Junit,
}

/// Structural validation for static HTML user tables.
#[derive(Parser, Debug, Clone)]
#[command(name = "html-preflight", version, about)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// HTML document to validate [default: index.html]
    #[arg(short, long, global = true, env = "HTML_PREFLIGHT_DOCUMENT")]
    pub document: Option<PathBuf>,

    /// Images directory [default: images/ next to the document]
    #[arg(long, global = true)]
    pub images_dir: Option<PathBuf>,

    /// Run document structure checks
    #[arg(long, global = true)]
    pub structure: bool,

    /// Run table checks
    #[arg(long, global = true)]
    pub table: bool,

    /// Run media element checks
    #[arg(long, global = true)]
    pub media: bool,

    /// Run user data checks
    #[arg(long, global = true)]
    pub user_data: bool,

    /// Run image file checks
    #[arg(long, global = true)]
    pub files: bool,

    /// Skip a check by ID (repeatable)
    #[arg(long, value_name = "ID", action = ArgAction::Append, global = true)]
    pub skip: Vec<String>,

    /// Run only this check ID (repeatable)
    #[arg(long, value_name = "ID", action = ArgAction::Append, global = true)]
    pub only: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Only output failures
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Include details and timings, and debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Compare against a JSON baseline report
    #[arg(long, value_name = "FILE", global = true)]
    pub baseline: Option<PathBuf>,

    /// Write this run's report as a JSON baseline
    #[arg(long, value_name = "FILE", global = true)]
    pub save_baseline: Option<PathBuf>,

    /// Load defaults from a TOML file
    #[arg(long, value_name = "FILE", global = true, env = "HTML_PREFLIGHT_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Command to run, defaulting to `check`
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or_default()
    }

    /// Categories selected by flags; None when no category flag was given
    pub fn categories(&self) -> Option<Vec<CheckCategory>> {
        let flags = [
            (self.structure, CheckCategory::Structure),
            (self.table, CheckCategory::Table),
            (self.media, CheckCategory::Media),
            (self.user_data, CheckCategory::UserData),
            (self.files, CheckCategory::Files),
        ];
        let selected: Vec<CheckCategory> = flags
            .iter()
            .filter(|(on, _)| *on)
            .map(|(_, category)| *category)
            .collect();

        if selected.is_empty() {
            None
        } else {
            Some(selected)
        }
    }
}
