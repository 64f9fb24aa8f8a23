//! Run configuration.
//!
//! A TOML file may provide defaults; command line flags always win.
//!
//! ```toml
//! document = "site/index.html"
//! images_dir = "site/images"
//! skip = ["FS-001"]
//! ```

use crate::cli::args::Args;
use crate::{PreflightConfig, PreflightError};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Settings read from a configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub document: Option<PathBuf>,
    pub images_dir: Option<PathBuf>,
    pub skip: Vec<String>,
    pub only: Vec<String>,
}

impl FileConfig {
    /// Read and parse a TOML configuration file
    pub fn load(path: &Path) -> Result<Self, PreflightError> {
        let text = fs::read_to_string(path).map_err(|e| PreflightError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config = Self::parse(&text, path)?;
        debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Parse TOML text; `path` is only used for error reporting
    pub fn parse(text: &str, path: &Path) -> Result<Self, PreflightError> {
        toml::from_str(text).map_err(|e| PreflightError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

impl PreflightConfig {
    /// Merge command line arguments over file defaults
    pub fn from_args(args: &Args, file: FileConfig) -> Self {
        let defaults = PreflightConfig::default();

        PreflightConfig {
            document: args
                .document
                .clone()
                .or(file.document)
                .unwrap_or(defaults.document),
            images_dir: args.images_dir.clone().or(file.images_dir),
            categories: args.categories(),
            skip_checks: if args.skip.is_empty() { file.skip } else { args.skip.clone() },
            only_checks: if args.only.is_empty() { file.only } else { args.only.clone() },
        }
    }

    /// Build the configuration for `args`, reading `--config` if given
    pub fn resolve(args: &Args) -> Result<Self, PreflightError> {
        let file = match &args.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Ok(Self::from_args(args, file))
    }
}
