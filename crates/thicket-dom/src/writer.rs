//! Configurable serializer.
//!
//! Pretty output puts every tag, text run and comment on its own line,
//! separated by CR+LF. The first line carries no leading terminator and there
//! is no trailing one.

use serde::{Deserialize, Serialize};

use crate::{DomTree, ElementData, NodeId, NodeType};

/// Tags never written in self-closed form, even when childless.
pub const NEVER_SELF_CLOSING: [&str; 5] = ["script", "style", "html", "head", "body"];

/// Default set of tags always written as a single self-closed tag.
pub const ALWAYS_SELF_CLOSING: [&str; 5] = ["!doctype", "meta", "input", "br", "img"];

/// Widest indentation step honoured by the writer. Larger `indent_size`
/// values are clamped to it.
pub const MAX_INDENT_SIZE: usize = 16;

const LINE_TERMINATOR: &str = "\r\n";

/// Rendering options for [`DomTree::write`].
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriteOptions {
    /// One construct per line with indentation. Off concatenates everything.
    pub pretty: bool,
    /// Spaces per indentation level when `use_tabs` is off, at most
    /// [`MAX_INDENT_SIZE`].
    pub indent_size: usize,
    /// Indent with one tab per level.
    pub use_tabs: bool,
    /// Write childless elements as `<tag />`.
    pub self_closing: bool,
    /// Keep an element with a single short text child on one line.
    pub shrink_text: bool,
    /// Longest text, in characters, that `shrink_text` keeps inline.
    pub shrink_limit: usize,
    /// Tags written as a single tag whatever their children.
    pub always_self_closing: Vec<String>,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent_size: 2,
            use_tabs: false,
            self_closing: true,
            shrink_text: true,
            shrink_limit: 20,
            always_self_closing: ALWAYS_SELF_CLOSING.iter().map(ToString::to_string).collect(),
        }
    }
}

impl WriteOptions {
    /// Compact output: no line breaks, no indentation.
    #[must_use]
    pub fn compact() -> Self {
        Self {
            pretty: false,
            ..Self::default()
        }
    }

    fn is_always_self_closing(&self, tag_name: &str) -> bool {
        self.always_self_closing.iter().any(|t| t == tag_name)
    }
}

struct Writer<'a> {
    tree: &'a DomTree,
    options: &'a WriteOptions,
    out: String,
    at_start: bool,
}

impl Writer<'_> {
    fn line(&mut self, depth: usize, text: &str) {
        if self.options.pretty {
            if !self.at_start {
                self.out.push_str(LINE_TERMINATOR);
            }
            if self.options.use_tabs {
                self.out.extend(std::iter::repeat_n('\t', depth));
            } else {
                let width = depth.saturating_mul(self.options.indent_size.min(MAX_INDENT_SIZE));
                self.out.extend(std::iter::repeat_n(' ', width));
            }
        }
        self.at_start = false;
        self.out.push_str(text);
    }

    fn node(&mut self, id: NodeId, depth: usize) {
        let Some(node) = self.tree.get(id) else {
            return;
        };
        match &node.node_type {
            NodeType::Document => {
                for &child in &node.children {
                    self.node(child, depth);
                }
            }
            NodeType::Element(data) => self.element(id, data, depth),
            NodeType::Text(text) => self.line(depth, text),
            NodeType::Comment(text) => self.line(depth, &format!("<!-- {text} -->")),
        }
    }

    fn element(&mut self, id: NodeId, data: &ElementData, depth: usize) {
        let children = self.tree.children(id);
        let tag = &data.tag_name;

        if tag == "!doctype" {
            let open = open_tag(data, "");
            self.line(depth, &open);
            return;
        }

        let slash = if self.options.self_closing { " /" } else { "" };
        if self.options.is_always_self_closing(tag) {
            let open = open_tag(data, slash);
            self.line(depth, &open);
            return;
        }

        if children.is_empty() {
            let line = if self.options.self_closing && !NEVER_SELF_CLOSING.contains(&tag.as_str()) {
                open_tag(data, " /")
            } else {
                format!("{}</{tag}>", open_tag(data, ""))
            };
            self.line(depth, &line);
            return;
        }

        if self.options.shrink_text
            && let [only] = children
            && let Some(text) = self.tree.as_text(*only)
            && text.chars().count() <= self.options.shrink_limit
        {
            let line = format!("{}{text}</{tag}>", open_tag(data, ""));
            self.line(depth, &line);
            return;
        }

        let open = open_tag(data, "");
        self.line(depth, &open);
        for &child in children {
            self.node(child, depth + 1);
        }
        self.line(depth, &format!("</{tag}>"));
    }
}

/// `<tag attrs{suffix}>`. The doctype is upper-cased and its `"true"`
/// attributes are written bare.
fn open_tag(data: &ElementData, suffix: &str) -> String {
    let is_doctype = data.tag_name == "!doctype";
    let mut tag = String::from("<");
    if is_doctype {
        tag.push_str("!DOCTYPE");
    } else {
        tag.push_str(&data.tag_name);
    }
    for attr in &data.attrs {
        tag.push(' ');
        tag.push_str(&attr.name);
        if !(is_doctype && attr.value == "true") {
            tag.push('=');
            tag.push_str(&quote_value(&attr.value));
        }
    }
    tag.push_str(suffix);
    tag.push('>');
    tag
}

/// Wrap `value` in quotes so that the tokenizer reads it back unchanged.
///
/// Double quotes are preferred; single quotes are used when the value holds
/// `"` but no `'`. A bare enclosing quote is escaped as `\"` (or `\'`). A
/// backslash always pairs with the next character, so a value with a
/// backslash-quote pair can only use the other quote.
fn quote_value(value: &str) -> String {
    let order = if value.contains('"') && !value.contains('\'') {
        ['\'', '"']
    } else {
        ['"', '\'']
    };
    order
        .into_iter()
        .find_map(|quote| escape_value(value, quote))
        .unwrap_or_else(|| format!("\"{value}\""))
}

/// `value` enclosed in `quote`, or `None` when no escaping reads back as
/// `value`: a `\` + `quote` pair, or a trailing backslash that would swallow
/// the closing quote.
fn escape_value(value: &str, quote: char) -> Option<String> {
    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            let next = chars.next().filter(|&next| next != quote)?;
            out.push(c);
            out.push(next);
        } else {
            if c == quote {
                out.push('\\');
            }
            out.push(c);
        }
    }
    out.push(quote);
    Some(out)
}

impl DomTree {
    /// Serialize `start` and its subtree. For [`NodeId::ROOT`] this is the
    /// whole root list, each root node at depth 0.
    #[must_use]
    pub fn write(&self, start: NodeId, options: &WriteOptions) -> String {
        let mut writer = Writer {
            tree: self,
            options,
            out: String::new(),
            at_start: true,
        };
        writer.node(start, 0);
        writer.out
    }
}
