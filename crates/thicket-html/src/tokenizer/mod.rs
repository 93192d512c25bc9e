//! Tokenizer module.
//!
//! Splits raw markup into segments one at a time, on demand.

/// Scanning helpers shared by the tag, comment and text readers.
mod helpers;
/// Segment types produced by the tokenizer.
pub mod segment;
/// The tokenizer itself.
pub mod scanner;

pub use segment::{CommentSegment, ElementSegment, Segment, SegmentKind, Span, TextSegment};
pub use scanner::HTMLTokenizer;
