//! Fixed-format flattened markup.
//!
//! This is the minimal renderer used for cell text and quick dumps. It has no
//! options; see the `writer` module for the configurable pretty-printer.

use crate::{DomTree, NodeId, NodeType};

impl DomTree {
    /// Markup for `id` and its whole subtree on one line.
    ///
    /// Elements render as `<tag k="v">children</tag>`, or `<tag k="v"/>` when
    /// they have no children. Text renders as-is, comments as `<!-- text -->`.
    /// The document node renders as the concatenation of the root list.
    #[must_use]
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.push_outer_html(id, &mut out);
        out
    }

    /// Concatenated [`outer_html`](Self::outer_html) of the children of `id`.
    #[must_use]
    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        for &child in self.children(id) {
            self.push_outer_html(child, &mut out);
        }
        out
    }

    fn push_outer_html(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.get(id) else {
            return;
        };
        match &node.node_type {
            NodeType::Document => {
                for &child in &node.children {
                    self.push_outer_html(child, out);
                }
            }
            NodeType::Element(data) => {
                out.push('<');
                out.push_str(&data.tag_name);
                for attr in &data.attrs {
                    out.push(' ');
                    out.push_str(&attr.name);
                    out.push_str("=\"");
                    out.push_str(&attr.value);
                    out.push('"');
                }
                if node.children.is_empty() {
                    out.push_str("/>");
                } else {
                    out.push('>');
                    for &child in &node.children {
                        self.push_outer_html(child, out);
                    }
                    out.push_str("</");
                    out.push_str(&data.tag_name);
                    out.push('>');
                }
            }
            NodeType::Text(text) => out.push_str(text),
            NodeType::Comment(text) => {
                out.push_str("<!-- ");
                out.push_str(text);
                out.push_str(" -->");
            }
        }
    }
}
