//! Scanning helpers for the tokenizer.
//!
//! All positions are byte offsets into the input. An offset past the end or
//! inside a multi-byte character reads as "no character".

/// The character starting at `pos`, if any.
pub(super) fn char_at(input: &str, pos: usize) -> Option<char> {
    input.get(pos..)?.chars().next()
}

/// First offset at or after `pos` that is not whitespace.
pub(super) fn skip_whitespace(input: &str, pos: usize) -> usize {
    scan_until(input, pos, |c| !c.is_whitespace())
}

/// First offset at or after `pos` whose character satisfies `stop`, or the
/// end of input.
pub(super) fn scan_until(input: &str, pos: usize, stop: impl Fn(char) -> bool) -> usize {
    let Some(rest) = input.get(pos..) else {
        return input.len();
    };
    rest.char_indices()
        .find(|&(_, c)| stop(c))
        .map_or(input.len(), |(offset, _)| pos + offset)
}

pub(super) const fn is_quote(c: char) -> bool {
    matches!(c, '"' | '\'')
}

/// Ends a tag name or an unquoted attribute value.
pub(super) fn is_tag_delimiter(c: char) -> bool {
    c.is_whitespace() || c == '/' || c == '>'
}

/// Strict tag names: a letter or `_`, then letters, digits and `-_.`.
pub(super) fn is_valid_tag_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first.is_alphabetic() || first == '_')
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// Strict attribute names allow letters, digits and `-_.:`.
pub(super) fn is_valid_attribute_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | ':')
}

/// Read a quoted string whose opening quote is at `pos`.
///
/// A backslash always consumes the character after it; a backslash before
/// the quote character yields the bare quote, any other pair is kept as is.
/// Returns the content and the offset just past the closing quote, or `None`
/// when the quote is never closed.
pub(super) fn scan_quoted(input: &str, pos: usize) -> Option<(String, usize)> {
    let quote = char_at(input, pos).filter(|&c| is_quote(c))?;
    let body_start = pos + quote.len_utf8();
    let mut chars = input.get(body_start..)?.char_indices();
    let mut value = String::new();

    while let Some((offset, c)) = chars.next() {
        if c == quote {
            return Some((value, body_start + offset + c.len_utf8()));
        }
        if c == '\\' {
            let (_, escaped) = chars.next()?;
            if escaped != quote {
                value.push('\\');
            }
            value.push(escaped);
        } else {
            value.push(c);
        }
    }
    None
}
