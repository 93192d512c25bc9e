use core::fmt;

use thiserror::Error;

/// A byte offset with its 1-based line and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourcePosition {
    /// Byte offset into the input.
    pub offset: usize,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column, counted in characters.
    pub column: usize,
}

impl SourcePosition {
    /// Compute the line and column of `offset` in `source`.
    ///
    /// Offsets past the end, or inside a multi-byte character, are clamped
    /// back to the nearest character boundary.
    #[must_use]
    pub fn locate(source: &str, offset: usize) -> Self {
        let before = &source[..char_boundary_at_or_before(source, offset)];
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        Self {
            offset,
            line: before.matches('\n').count() + 1,
            column: before[line_start..].chars().count() + 1,
        }
    }
}

/// Clamp `offset` into `source` and back to a character boundary.
fn char_boundary_at_or_before(source: &str, offset: usize) -> usize {
    let mut end = offset.min(source.len());
    while !source.is_char_boundary(end) {
        end -= 1;
    }
    end
}

/// Resolves offsets to [`SourcePosition`]s by scanning forward from the
/// previous lookup.
///
/// Lookups with non-decreasing offsets cost one pass over the input in total.
/// A lookup behind the previous one starts over from the beginning.
#[derive(Debug, Clone, Copy)]
pub struct PositionCursor {
    scanned: usize,
    line: usize,
    column: usize,
}

impl Default for PositionCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionCursor {
    /// A cursor at the start of the input.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            scanned: 0,
            line: 1,
            column: 1,
        }
    }

    /// Same result as [`SourcePosition::locate`].
    pub fn locate(&mut self, source: &str, offset: usize) -> SourcePosition {
        let end = char_boundary_at_or_before(source, offset);
        if end < self.scanned {
            *self = Self::new();
        }
        for c in source[self.scanned..end].chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.scanned = end;
        SourcePosition {
            offset,
            line: self.line,
            column: self.column,
        }
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Why a tag was rejected in strict mode that lenient mode would accept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagViolation {
    /// `< div>` or `</ div>`.
    #[error("whitespace before the tag name")]
    WhitespaceBeforeName,
    /// A name that does not start with a letter or `_`, or contains other
    /// characters than letters, digits and `-_.`.
    #[error("invalid characters in tag name `{0}`")]
    InvalidTagName(String),
    /// `<a "href"="x">`.
    #[error("quoted attribute name")]
    QuotedAttributeName,
    /// An attribute name with characters other than letters, digits and `-_.:`.
    #[error("invalid characters in attribute name `{0}`")]
    InvalidAttributeName(String),
    /// `<a href=x>`.
    #[error("unquoted value for attribute `{0}`")]
    UnquotedAttributeValue(String),
    /// `<a x="1" x="2">`.
    #[error("duplicate attribute `{0}`")]
    DuplicateAttribute(String),
    /// `</br/>`.
    #[error("self-closing marker on a close tag")]
    SelfClosingCloseTag,
    /// `<br / >`.
    #[error("whitespace between `/` and `>`")]
    WhitespaceBeforeTagEnd,
}

/// Everything that can abort a parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No comment, tag or text could be read. Fatal in both modes.
    #[error("could not read a tag, comment or text at {position}")]
    Malformed {
        /// Where reading stopped.
        position: SourcePosition,
    },
    /// A tag that lenient mode would accept broke a strict rule.
    #[error("invalid tag at {position}: {violation}")]
    InvalidTag {
        /// The rule that was broken.
        violation: TagViolation,
        /// Start of the tag.
        position: SourcePosition,
    },
    /// A close tag with nothing open.
    #[error("closing tag </{name}> at the root level at {position}")]
    CloseTagAtRoot {
        /// Tag name.
        name: String,
        /// Start of the tag.
        position: SourcePosition,
    },
    /// A close tag that does not match the innermost open element.
    #[error("closing tag </{name}> at {position} does not match <{open}>")]
    UnmatchedCloseTag {
        /// Name of the close tag.
        name: String,
        /// Name of the innermost open element.
        open: String,
        /// Start of the close tag.
        position: SourcePosition,
    },
    /// An element segment that is neither an open nor a close tag.
    #[error("tag <{name}> at {position} is neither an open nor a close tag")]
    UnidentifiedTag {
        /// Tag name.
        name: String,
        /// Start of the tag.
        position: SourcePosition,
    },
    /// The input ended with elements still open.
    #[error("input ended before <{name}> was closed")]
    UnexpectedEnd {
        /// Innermost element still open.
        name: String,
    },
}

impl ParseError {
    /// Where the error was detected, if it refers to a position.
    #[must_use]
    pub const fn position(&self) -> Option<SourcePosition> {
        match self {
            Self::Malformed { position }
            | Self::InvalidTag { position, .. }
            | Self::CloseTagAtRoot { position, .. }
            | Self::UnmatchedCloseTag { position, .. }
            | Self::UnidentifiedTag { position, .. } => Some(*position),
            Self::UnexpectedEnd { .. } => None,
        }
    }
}
