//! Test fixtures.
//!
//! Generated HTML pages and on-disk site layouts.


pub use documents::*;
