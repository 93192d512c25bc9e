//! Parser module for tree construction.

/// Recursive tree builder.
pub mod builder;

pub use builder::{HTMLParser, IssueKind, ParseIssue, tree_outline};
