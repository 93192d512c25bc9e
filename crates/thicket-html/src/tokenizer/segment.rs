use core::fmt;

use strum_macros::Display;
use thicket_dom::Attributes;

/// Byte range of a segment in the input, `start..end`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Span {
    /// Offset of the first byte.
    pub start: usize,
    /// Offset one past the last byte.
    pub end: usize,
}

impl Span {
    /// Create a span.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span covers no bytes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// An element tag.
///
/// `is_open` and `is_close` are independent: `<a>` is open, `</a>` is close
/// and `<a/>` is both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementSegment {
    /// Lowercased tag name. `<!DOCTYPE>` is named `!doctype`.
    pub name: String,
    /// Attributes in source order, names lowercased.
    pub attributes: Attributes,
    /// Opens an element.
    pub is_open: bool,
    /// Closes an element.
    pub is_close: bool,
    /// Source range of the whole tag.
    pub span: Span,
}

impl ElementSegment {
    /// `<tag/>`: opens and closes at once.
    #[must_use]
    pub const fn is_self_closing(&self) -> bool {
        self.is_open && self.is_close
    }
}

/// A run of text, trimmed of surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSegment {
    /// The text.
    pub text: String,
    /// Source range, trailing whitespace included.
    pub span: Span,
}

/// A `<!-- -->` comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentSegment {
    /// Content between the delimiters, trimmed.
    pub text: String,
    /// Source range, delimiters included.
    pub span: Span,
}

/// One lexical unit of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// An open, close or self-closing tag.
    Element(ElementSegment),
    /// Text between tags.
    Text(TextSegment),
    /// A comment.
    Comment(CommentSegment),
}

/// Discriminant of a [`Segment`], for logging and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum SegmentKind {
    /// [`Segment::Element`]
    Element,
    /// [`Segment::Text`]
    Text,
    /// [`Segment::Comment`]
    Comment,
}

impl Segment {
    /// Source range of the segment.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Element(element) => element.span,
            Self::Text(text) => text.span,
            Self::Comment(comment) => comment.span,
        }
    }

    /// Which kind of segment this is.
    #[must_use]
    pub const fn kind(&self) -> SegmentKind {
        match self {
            Self::Element(_) => SegmentKind::Element,
            Self::Text(_) => SegmentKind::Text,
            Self::Comment(_) => SegmentKind::Comment,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Element(element) => {
                if element.is_open {
                    write!(f, "<{}", element.name)?;
                } else {
                    write!(f, "</{}", element.name)?;
                }
                for attr in &element.attributes {
                    write!(f, " {}=\"{}\"", attr.name, attr.value)?;
                }
                if element.is_self_closing() {
                    write!(f, " /")?;
                }
                write!(f, ">")
            }
            Self::Text(text) => write!(f, "Text({:?})", text.text),
            Self::Comment(comment) => write!(f, "Comment({:?})", comment.text),
        }
    }
}
