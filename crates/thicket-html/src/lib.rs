//! Segment tokenizer and tree builder for the Thicket parser.
//!
//! # Scope
//!
//! This crate implements:
//! - **Tokenizer** ([`HTMLTokenizer`])
//!   - Pull-based: one [`Segment`] (element tag, text run or comment) per call
//!   - Raw-text context after `script`/`style` open tags
//!   - Attribute parsing with strict and lenient rules
//!
//! - **Tree Builder** ([`HTMLParser`])
//!   - Recursive open/close matching into a [`thicket_dom::DomTree`]
//!   - Crossed-tag recovery by handing unmatched close tags up to an ancestor
//!   - Void tags and self-closing tags
//!
//! # Not Implemented
//!
//! - Character encoding detection
//! - Character reference (entity) decoding
//! - Implicit tag insertion and foster parenting

/// Parse errors and source positions.
pub mod error;
/// Parse options and fixed tag sets.
pub mod options;
/// Tree construction.
pub mod parser;
/// Tokenizer producing segments.
pub mod tokenizer;

pub use error::{ParseError, PositionCursor, SourcePosition, TagViolation};
pub use options::{ParseMode, ParseOptions};
pub use parser::{HTMLParser, IssueKind, ParseIssue, tree_outline};
pub use tokenizer::{CommentSegment, ElementSegment, HTMLTokenizer, Segment, Span, TextSegment};

use thicket_dom::Document;

/// Parse `input` into a [`Document`].
///
/// # Errors
///
/// Returns a [`ParseError`] when the input cannot be tokenized at all, or, in
/// strict mode, on the first structural violation.
pub fn parse_document(input: &str, options: &ParseOptions) -> Result<Document, ParseError> {
    HTMLParser::new(input, options).run()
}

/// Parse `input` leniently, dropping comments.
///
/// # Errors
///
/// Returns [`ParseError::Malformed`] when the input cannot be tokenized.
pub fn parse(input: &str) -> Result<Document, ParseError> {
    parse_document(input, &ParseOptions::default())
}
