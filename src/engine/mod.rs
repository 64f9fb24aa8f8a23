//! Validation engine.
//!
//! Runs registered checks against one document and aggregates the report.

pub mod orchestrator;
pub mod result;
