use thicket_common::warning::LOG_TARGET;
use thicket_dom::Attributes;

use super::helpers::{
    char_at, is_quote, is_tag_delimiter, is_valid_attribute_name_char, is_valid_tag_name,
    scan_quoted, scan_until, skip_whitespace,
};
use super::segment::{CommentSegment, ElementSegment, Segment, Span, TextSegment};
use crate::error::{ParseError, SourcePosition, TagViolation};
use crate::options::ParseOptions;

const COMMENT_START: &str = "<!--";
const COMMENT_END: &str = "-->";
const DOCTYPE: &str = "!DOCTYPE";

/// Why a tag read failed.
#[derive(Debug)]
enum TagReject {
    /// The `<` does not start a tag under any rules.
    NotATag,
    /// The tag breaks a strict rule.
    Violation(TagViolation),
}

/// Pull-based tokenizer over an in-memory string.
///
/// Each call to [`next_segment`](Self::next_segment) skips whitespace and
/// reads one comment, tag or text run. Reading a text run scans ahead to the
/// next `<` that starts a real comment or tag; that segment is cached and
/// returned by the following call. A `<` that starts nothing is kept as text.
///
/// After an open tag named in the raw-text set (`script`, `style`, ...)
/// everything up to the matching close tag is returned as one text segment.
pub struct HTMLTokenizer<'a> {
    input: &'a str,
    options: &'a ParseOptions,
    position: usize,
    lookahead: Option<Segment>,
    raw_text_context: Option<String>,
}

impl<'a> HTMLTokenizer<'a> {
    /// Create a tokenizer at the start of `input`.
    #[must_use]
    pub const fn new(input: &'a str, options: &'a ParseOptions) -> Self {
        Self {
            input,
            options,
            position: 0,
            lookahead: None,
            raw_text_context: None,
        }
    }

    /// The full input.
    #[must_use]
    pub const fn input(&self) -> &'a str {
        self.input
    }

    /// Byte offset of the cursor.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Line and column of a byte offset in the input.
    #[must_use]
    pub fn locate(&self, offset: usize) -> SourcePosition {
        SourcePosition::locate(self.input, offset)
    }

    /// Read the next segment, or `None` at end of input.
    ///
    /// # Errors
    ///
    /// [`ParseError::Malformed`] when nothing can be read at the cursor, and in
    /// strict mode [`ParseError::InvalidTag`] for a tag that only lenient rules
    /// accept.
    pub fn next_segment(&mut self) -> Result<Option<Segment>, ParseError> {
        self.position = skip_whitespace(self.input, self.position);
        if self.position >= self.input.len() {
            return Ok(None);
        }
        let start = self.position;

        let segment = if let Some(segment) = self.lookahead.take() {
            segment
        } else if let Some(context) = self.raw_text_context.take() {
            if let Some(close) = self.read_raw_text_close(start, &context) {
                Segment::Element(close)
            } else if let Some(read) = self.read_raw_text(start, &context) {
                self.with_lookahead(read)
            } else {
                // Strict and never closed: nothing more can be read.
                self.position = self.input.len();
                return Ok(None);
            }
        } else if let Some(comment) = self.read_comment(start) {
            Segment::Comment(comment)
        } else if let Some(element) = self.read_tag_checked(start)? {
            Segment::Element(element)
        } else if let Some(read) = self.read_text(start)? {
            self.with_lookahead(read)
        } else {
            return Err(ParseError::Malformed {
                position: self.locate(start),
            });
        };

        self.position = segment.span().end;
        self.raw_text_context = match &segment {
            Segment::Element(element)
                if element.is_open
                    && !element.is_close
                    && self.options.is_raw_text_tag(&element.name) =>
            {
                Some(element.name.clone())
            }
            _ => None,
        };
        log::trace!(target: LOG_TARGET, "{} segment at {}: {segment}", segment.kind(), start);
        Ok(Some(segment))
    }

    fn with_lookahead(&mut self, (text, next): (TextSegment, Option<Segment>)) -> Segment {
        self.lookahead = next;
        Segment::Text(text)
    }

    fn text_segment(&self, start: usize, end: usize) -> TextSegment {
        TextSegment {
            text: self.input[start..end].trim().to_string(),
            span: Span::new(start, end),
        }
    }

    fn read_comment(&self, start: usize) -> Option<CommentSegment> {
        if !self.input.get(start..)?.starts_with(COMMENT_START) {
            return None;
        }
        let body_start = start + COMMENT_START.len();
        let body_end = body_start + self.input[body_start..].find(COMMENT_END)?;
        Some(CommentSegment {
            text: self.input[body_start..body_end].trim().to_string(),
            span: Span::new(start, body_end + COMMENT_END.len()),
        })
    }

    /// Read a tag under the configured mode.
    ///
    /// In strict mode a tag that breaks a strict rule but reads fine under
    /// lenient rules is an error; one that fails both ways is not a tag.
    fn read_tag_checked(&self, start: usize) -> Result<Option<ElementSegment>, ParseError> {
        match self.read_tag(start, self.options.is_strict()) {
            Ok(element) => Ok(Some(element)),
            Err(TagReject::NotATag) => Ok(None),
            Err(TagReject::Violation(violation)) => {
                if self.read_tag(start, false).is_ok() {
                    Err(ParseError::InvalidTag {
                        violation,
                        position: self.locate(start),
                    })
                } else {
                    Ok(None)
                }
            }
        }
    }

    /// Text from `start` up to the next real comment or tag, which is returned
    /// alongside. Lenient mode accepts text running to the end of input.
    fn read_text(
        &self,
        start: usize,
    ) -> Result<Option<(TextSegment, Option<Segment>)>, ParseError> {
        let mut cursor = start;
        while let Some(offset) = self.input[cursor..].find('<') {
            let at = cursor + offset;
            let next = match self.read_comment(at) {
                Some(comment) => Some(Segment::Comment(comment)),
                None => self.read_tag_checked(at)?.map(Segment::Element),
            };
            if let Some(next) = next {
                return Ok(Some((self.text_segment(start, at), Some(next))));
            }
            cursor = at + 1;
        }

        if self.options.is_strict() {
            return Ok(None);
        }
        Ok(Some((self.text_segment(start, self.input.len()), None)))
    }

    fn read_raw_text_close(&self, start: usize, context: &str) -> Option<ElementSegment> {
        self.read_tag(start, self.options.is_strict())
            .ok()
            .filter(|element| !element.is_open && element.is_close && element.name == context)
    }

    /// Everything up to `</context>`, with no comments or tags recognized.
    fn read_raw_text(&self, start: usize, context: &str) -> Option<(TextSegment, Option<Segment>)> {
        let mut cursor = start;
        while let Some(offset) = self.input[cursor..].find('<') {
            let at = cursor + offset;
            if let Some(close) = self.read_raw_text_close(at, context) {
                return Some((self.text_segment(start, at), Some(Segment::Element(close))));
            }
            cursor = at + 1;
        }

        if self.options.is_strict() {
            return None;
        }
        Some((self.text_segment(start, self.input.len()), None))
    }

    fn read_tag(&self, start: usize, strict: bool) -> Result<ElementSegment, TagReject> {
        let input = self.input;
        if char_at(input, start) != Some('<') {
            return Err(TagReject::NotATag);
        }
        let mut pos = start + 1;

        let (is_open, mut is_close) = if char_at(input, pos) == Some('/') {
            pos += 1;
            (false, true)
        } else {
            (true, false)
        };

        if char_at(input, pos).is_some_and(char::is_whitespace) {
            if strict {
                return Err(TagReject::Violation(TagViolation::WhitespaceBeforeName));
            }
            pos = skip_whitespace(input, pos);
        }

        let name_end = self.tag_name_end(pos, strict)?;
        let name = input[pos..name_end].to_lowercase();
        pos = skip_whitespace(input, name_end);

        let mut attributes = Attributes::new();
        while let Some(next) = self.read_attribute(pos, strict, &mut attributes)? {
            pos = skip_whitespace(input, next);
        }

        if !is_open && !attributes.is_empty() {
            return Err(TagReject::NotATag);
        }

        if char_at(input, pos) == Some('/') {
            if strict && is_close {
                return Err(TagReject::Violation(TagViolation::SelfClosingCloseTag));
            }
            is_close = true;
            pos += 1;

            if char_at(input, pos).is_some_and(char::is_whitespace) {
                if strict {
                    return Err(TagReject::Violation(TagViolation::WhitespaceBeforeTagEnd));
                }
                pos = skip_whitespace(input, pos);
            }
        }

        if char_at(input, pos) != Some('>') {
            return Err(TagReject::NotATag);
        }

        Ok(ElementSegment {
            name,
            attributes,
            is_open,
            is_close,
            span: Span::new(start, pos + 1),
        })
    }

    fn tag_name_end(&self, start: usize, strict: bool) -> Result<usize, TagReject> {
        if let Some(end) = self.doctype_end(start, strict) {
            return Ok(end);
        }

        let end = scan_until(self.input, start, is_tag_delimiter);
        let name = &self.input[start..end];
        if name.is_empty() {
            return Err(TagReject::NotATag);
        }
        if strict && !is_valid_tag_name(name) {
            return Err(TagReject::Violation(TagViolation::InvalidTagName(
                name.to_string(),
            )));
        }
        Ok(end)
    }

    /// `!DOCTYPE` followed by a delimiter. Exact case in strict mode.
    fn doctype_end(&self, start: usize, strict: bool) -> Option<usize> {
        let end = start + DOCTYPE.len();
        let candidate = self.input.get(start..end)?;
        let matches = if strict {
            candidate == DOCTYPE
        } else {
            candidate.eq_ignore_ascii_case(DOCTYPE)
        };
        (matches && char_at(self.input, end).is_some_and(is_tag_delimiter)).then_some(end)
    }

    /// Read one `name[=value]` pair into `attributes`.
    ///
    /// `Ok(None)` when no attribute starts at `start`.
    fn read_attribute(
        &self,
        start: usize,
        strict: bool,
        attributes: &mut Attributes,
    ) -> Result<Option<usize>, TagReject> {
        let input = self.input;
        let Some(first) = char_at(input, start) else {
            return Ok(None);
        };

        let (name, mut pos) = if is_quote(first) {
            if strict {
                return Err(TagReject::Violation(TagViolation::QuotedAttributeName));
            }
            let (name, end) = scan_quoted(input, start).ok_or(TagReject::NotATag)?;
            (name.trim().to_lowercase(), end)
        } else {
            let end = scan_until(input, start, |c| is_tag_delimiter(c) || c == '=');
            if end == start {
                return Ok(None);
            }
            let raw = &input[start..end];
            if strict && !raw.chars().all(is_valid_attribute_name_char) {
                return Err(TagReject::Violation(TagViolation::InvalidAttributeName(
                    raw.to_string(),
                )));
            }
            (raw.to_lowercase(), end)
        };

        pos = skip_whitespace(input, pos);
        let value = if char_at(input, pos) == Some('=') {
            pos += 1;
            if !strict {
                pos = skip_whitespace(input, pos);
            }
            match char_at(input, pos) {
                Some(c) if is_quote(c) => {
                    let (value, end) = scan_quoted(input, pos).ok_or(TagReject::NotATag)?;
                    pos = end;
                    value
                }
                _ if strict => {
                    return Err(TagReject::Violation(TagViolation::UnquotedAttributeValue(
                        name,
                    )));
                }
                _ => {
                    let end = scan_until(input, pos, is_tag_delimiter);
                    let value = input[pos..end].to_string();
                    pos = end;
                    value
                }
            }
        } else {
            "true".to_string()
        };

        if strict && attributes.contains(&name) {
            return Err(TagReject::Violation(TagViolation::DuplicateAttribute(name)));
        }
        let _ = attributes.insert(name, value);
        Ok(Some(pos))
    }
}

impl Iterator for HTMLTokenizer<'_> {
    type Item = Result<Segment, ParseError>;

    /// Yields segments until end of input or the first error.
    fn next(&mut self) -> Option<Self::Item> {
        let result = self.next_segment();
        if result.is_err() {
            self.position = self.input.len();
            self.lookahead = None;
        }
        result.transpose()
    }
}
