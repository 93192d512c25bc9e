use core::fmt::Write as _;

use strum_macros::Display;
use thicket_common::warning::{LOG_TARGET, warn_once};
use thicket_dom::{Document, DomTree, ElementData, NodeId, NodeType};

use crate::error::{ParseError, PositionCursor, SourcePosition};
use crate::options::ParseOptions;
use crate::tokenizer::{ElementSegment, HTMLTokenizer, Segment};

/// A structural problem that lenient mode recovered from.
///
/// Strict mode turns each of these into a [`ParseError`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum IssueKind {
    /// A close tag with nothing open. Ignored.
    #[strum(to_string = "closing tag at root")]
    CloseTagAtRoot,
    /// A close tag that matched no open element. Dropped.
    #[strum(to_string = "unmatched closing tag")]
    UnmatchedCloseTag,
    /// An element segment that neither opens nor closes. Skipped.
    #[strum(to_string = "unidentified tag")]
    UnidentifiedTag,
    /// An element implicitly closed: by an ancestor's close tag, or by the
    /// end of input.
    #[strum(to_string = "unclosed element")]
    UnclosedElement,
}

/// A recovered problem, recorded for later inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// What was recovered from.
    pub kind: IssueKind,
    /// Human readable description.
    pub message: String,
    /// Where it happened. `None` at end of input.
    pub position: Option<SourcePosition>,
}

/// Result of resolving the children of an open element.
///
/// A close tag that does not match the element is handed back up instead of
/// being consumed, so that an ancestor with that name can claim it.
#[derive(Debug)]
enum Resolution {
    /// The element was closed by its own close tag, or implicitly.
    Resolved,
    /// A close tag for some other element. Not consumed.
    Unresolved(ElementSegment),
}

/// Builds a [`DomTree`] from the segments of an [`HTMLTokenizer`].
///
/// Every open element recurses into its children until its close tag turns
/// up. Nesting depth is bounded only by the call stack.
pub struct HTMLParser<'a> {
    tokenizer: HTMLTokenizer<'a>,
    options: &'a ParseOptions,
    tree: DomTree,
    issues: Vec<ParseIssue>,
    positions: PositionCursor,
}

impl<'a> HTMLParser<'a> {
    /// Create a parser over `input`.
    #[must_use]
    pub fn new(input: &'a str, options: &'a ParseOptions) -> Self {
        Self {
            tokenizer: HTMLTokenizer::new(input, options),
            options,
            tree: DomTree::new(),
            issues: Vec::new(),
            positions: PositionCursor::new(),
        }
    }

    /// Build the document.
    ///
    /// # Errors
    ///
    /// Any [`ParseError`]; in lenient mode only tokenizer failures.
    pub fn run(self) -> Result<Document, ParseError> {
        self.run_with_issues().map(|(document, _)| document)
    }

    /// Build the document and return what lenient mode recovered from.
    ///
    /// # Errors
    ///
    /// See [`run`](Self::run).
    pub fn run_with_issues(mut self) -> Result<(Document, Vec<ParseIssue>), ParseError> {
        while let Some(segment) = self.tokenizer.next_segment()? {
            match segment {
                Segment::Element(element) if element.is_open => {
                    let id = self.insert_element(NodeId::ROOT, &element);
                    if self.has_children(&element)
                        && let Resolution::Unresolved(close) =
                            self.resolve_children(id, &element.name)?
                    {
                        self.unmatched_close(&close, &element.name)?;
                    }
                }
                Segment::Element(element) if element.is_close => {
                    if self.options.is_strict() {
                        return Err(ParseError::CloseTagAtRoot {
                            position: self.tokenizer.locate(element.span.start),
                            name: element.name,
                        });
                    }
                    self.record(
                        IssueKind::CloseTagAtRoot,
                        format!("ignored </{}> with no open element", element.name),
                        Some(element.span.start),
                    );
                }
                Segment::Element(element) => self.unidentified(&element)?,
                segment => self.insert_leaf(NodeId::ROOT, segment),
            }
        }

        let document = Document::from_tree(
            self.tree,
            self.options.is_strict(),
            self.options.keep_comments,
        );
        Ok((document, self.issues))
    }

    /// Pull segments into `parent` until its close tag, a close tag for
    /// someone else, or the end of input.
    fn resolve_children(
        &mut self,
        parent: NodeId,
        parent_name: &str,
    ) -> Result<Resolution, ParseError> {
        while let Some(segment) = self.tokenizer.next_segment()? {
            match segment {
                Segment::Element(element) if element.is_open => {
                    let id = self.insert_element(parent, &element);
                    if !self.has_children(&element) {
                        continue;
                    }
                    if let Resolution::Unresolved(close) = self.resolve_children(id, &element.name)? {
                        if close.name == parent_name {
                            return Ok(Resolution::Resolved);
                        }
                        return Ok(Resolution::Unresolved(close));
                    }
                }
                Segment::Element(element) if element.is_close => {
                    if element.name == parent_name {
                        return Ok(Resolution::Resolved);
                    }
                    return self.mismatched_close(element, parent_name);
                }
                Segment::Element(element) => self.unidentified(&element)?,
                segment => self.insert_leaf(parent, segment),
            }
        }

        if self.options.is_strict() {
            return Err(ParseError::UnexpectedEnd {
                name: parent_name.to_string(),
            });
        }
        self.record(
            IssueKind::UnclosedElement,
            format!("<{parent_name}> closed by the end of input"),
            None,
        );
        Ok(Resolution::Resolved)
    }

    /// A close tag inside `parent_name` naming some other element. Strict mode
    /// fails; lenient mode closes `parent_name` and hands the tag upward.
    fn mismatched_close(
        &mut self,
        close: ElementSegment,
        parent_name: &str,
    ) -> Result<Resolution, ParseError> {
        if self.options.is_strict() {
            return Err(ParseError::UnmatchedCloseTag {
                position: self.tokenizer.locate(close.span.start),
                name: close.name,
                open: parent_name.to_string(),
            });
        }
        self.record(
            IssueKind::UnclosedElement,
            format!("<{parent_name}> closed by </{}>", close.name),
            Some(close.span.start),
        );
        Ok(Resolution::Unresolved(close))
    }

    /// A close tag that made it all the way back to the root level.
    fn unmatched_close(&mut self, close: &ElementSegment, open: &str) -> Result<(), ParseError> {
        if self.options.is_strict() {
            return Err(ParseError::UnmatchedCloseTag {
                name: close.name.clone(),
                open: open.to_string(),
                position: self.tokenizer.locate(close.span.start),
            });
        }
        self.record(
            IssueKind::UnmatchedCloseTag,
            format!("dropped </{}> matching no open element", close.name),
            Some(close.span.start),
        );
        Ok(())
    }

    fn unidentified(&mut self, element: &ElementSegment) -> Result<(), ParseError> {
        if self.options.is_strict() {
            return Err(ParseError::UnidentifiedTag {
                name: element.name.clone(),
                position: self.tokenizer.locate(element.span.start),
            });
        }
        self.record(
            IssueKind::UnidentifiedTag,
            format!("skipped <{}> that neither opens nor closes", element.name),
            Some(element.span.start),
        );
        Ok(())
    }

    /// Whether `element` gets a child-resolution pass.
    fn has_children(&self, element: &ElementSegment) -> bool {
        !element.is_close && !self.options.is_void_tag(&element.name)
    }

    fn insert_element(&mut self, parent: NodeId, element: &ElementSegment) -> NodeId {
        let data = ElementData::new(element.name.clone(), element.attributes.clone());
        let id = self.tree.alloc(NodeType::Element(data));
        self.tree.append_child(parent, id);
        id
    }

    /// Text is always kept; comments only when asked for.
    fn insert_leaf(&mut self, parent: NodeId, segment: Segment) {
        let node_type = match segment {
            Segment::Text(text) => NodeType::Text(text.text),
            Segment::Comment(comment) if self.options.keep_comments => {
                NodeType::Comment(comment.text)
            }
            Segment::Comment(_) | Segment::Element(_) => return,
        };
        let id = self.tree.alloc(node_type);
        self.tree.append_child(parent, id);
    }

    fn record(&mut self, kind: IssueKind, message: String, offset: Option<usize>) {
        let _ = warn_once("HTML Parser", &format!("recovered from {kind}"));
        log::debug!(target: LOG_TARGET, "{kind}: {message}");
        let input = self.tokenizer.input();
        let position = offset.map(|offset| self.positions.locate(input, offset));
        self.issues.push(ParseIssue {
            kind,
            message,
            position,
        });
    }
}

/// Render the subtree at `id` as an indented outline, one node per line.
#[must_use]
pub fn tree_outline(tree: &DomTree, id: NodeId) -> String {
    let mut out = String::new();
    push_outline(tree, id, 0, &mut out);
    out
}

fn push_outline(tree: &DomTree, id: NodeId, indent: usize, out: &mut String) {
    let Some(node) = tree.get(id) else {
        return;
    };
    let prefix = "  ".repeat(indent);
    let _ = match &node.node_type {
        NodeType::Document => writeln!(out, "{prefix}Document"),
        NodeType::Element(data) => {
            let attrs: Vec<String> = data
                .attrs
                .iter()
                .map(|attr| format!(" {}=\"{}\"", attr.name, attr.value))
                .collect();
            writeln!(out, "{prefix}<{}{}>", data.tag_name, attrs.concat())
        }
        NodeType::Text(text) => {
            let display = text.replace('\n', "\\n").replace(' ', "\u{00B7}");
            writeln!(out, "{prefix}\"{display}\"")
        }
        NodeType::Comment(text) => writeln!(out, "{prefix}<!-- {text} -->"),
    };
    for &child in tree.children(id) {
        push_outline(tree, child, indent + 1, out);
    }
}
