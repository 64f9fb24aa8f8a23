//! Document loading and DOM queries.
//!
//! Wraps a parsed `scraper::Html` together with the raw source text. Checks
//! only read from a `Document`; nothing in this module mutates the tree
//! after parsing.
//!
//! # Graceful Degradation
//!
//! - Missing or unreadable file: `PreflightError::Load`, before any check runs
//! - Malformed markup: parsed leniently by html5ever, never an error
//! - Invalid selector: `PreflightError::Selector` (built-in selectors only)

use crate::PreflightError;
use scraper::{ElementRef, Html, Selector};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Selectors shared by the document checks.
pub mod sel {
    pub const HTML: &str = "html";
    pub const HEAD: &str = "head";
    pub const BODY: &str = "body";
    pub const META_CHARSET: &str = "meta[charset]";
    pub const META_VIEWPORT: &str = "meta[name=\"viewport\"]";
    pub const TITLE: &str = "title";
    pub const TABLE: &str = "table";
    pub const TABLE_HEAD: &str = "table thead";
    pub const TABLE_BODY: &str = "table tbody";
    pub const HEADER_CELLS: &str = "table thead th";
    pub const BODY_ROWS: &str = "table tbody tr";
    pub const BODY_FIGURES: &str = "table tbody figure";
    pub const BODY_IMAGES: &str = "table tbody img";
    pub const CELL: &str = "td";
    pub const FIGURE: &str = "figure";
    pub const IMG: &str = "img";
    pub const FIGCAPTION: &str = "figcaption";
}

/// An immutable parsed HTML document.
pub struct Document {
    source: String,
    html: Html,
    path: Option<PathBuf>,
}

impl Document {
    /// Read and parse a document from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PreflightError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| PreflightError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), bytes = source.len(), "loaded document");

        let mut document = Self::parse(source);
        document.path = Some(path.to_path_buf());
        Ok(document)
    }

    /// Parse a document from source text.
    pub fn parse(source: impl Into<String>) -> Self {
        let source = source.into();
        let html = Html::parse_document(&source);
        Document {
            source,
            html,
            path: None,
        }
    }

    /// Raw source text as read.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Path the document was loaded from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// All elements matching `css`, in document order.
    pub fn select(&self, css: &str) -> Result<Vec<ElementRef<'_>>, PreflightError> {
        let selector = compile(css)?;
        Ok(self.html.select(&selector).collect())
    }

    /// First element matching `css`.
    pub fn first(&self, css: &str) -> Result<Option<ElementRef<'_>>, PreflightError> {
        let selector = compile(css)?;
        Ok(self.html.select(&selector).next())
    }

    /// Whether any element matches `css`.
    pub fn exists(&self, css: &str) -> Result<bool, PreflightError> {
        Ok(self.first(css)?.is_some())
    }
}

/// Descendants of `element` matching `css`.
pub fn select_within<'a>(element: ElementRef<'a>, css: &str) -> Result<Vec<ElementRef<'a>>, PreflightError> {
    let selector = compile(css)?;
    Ok(element.select(&selector).collect())
}

/// First descendant of `element` matching `css`.
pub fn first_within<'a>(element: ElementRef<'a>, css: &str) -> Result<Option<ElementRef<'a>>, PreflightError> {
    let selector = compile(css)?;
    let found = element.select(&selector).next();
    Ok(found)
}

/// Concatenated text of every descendant text node.
pub fn text_content(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Text content with surrounding whitespace removed.
pub fn trimmed_text(element: ElementRef<'_>) -> String {
    text_content(element).trim().to_string()
}

/// Attribute value, treating an empty value as absent.
pub fn non_empty_attr<'a>(element: ElementRef<'a>, name: &str) -> Option<&'a str> {
    element.value().attr(name).filter(|v| !v.is_empty())
}

fn compile(css: &str) -> Result<Selector, PreflightError> {
    Selector::parse(css).map_err(|e| PreflightError::Selector {
        selector: css.to_string(),
        message: e.to_string(),
    })
}
