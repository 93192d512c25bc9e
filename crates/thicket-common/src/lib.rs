//! Common utilities for the Thicket parser.
//!
//! This crate provides shared infrastructure used by the parser crates and the CLI:
//! - **Warning System** - deduplicated diagnostics routed through the `log` facade

pub mod warning;
