//! CLI module for argument parsing and output formatting.

pub mod args;
pub mod output;
