//! The parsed document and its shortcut references.

use crate::{DomTree, Node, NodeId, SearchOptions, Table, WriteOptions};

/// A parsed document: the tree plus `doctype`, `html`, `head` and `body`
/// shortcuts.
///
/// The shortcuts alias nodes of the root list; they are resolved once when
/// the document is created. In strict mode they must sit at their expected
/// positions (`!doctype` first, `html` first or second, `head` first child of
/// `html`, `body` first or second child); in lenient mode the first matching
/// node anywhere at that level is taken.
#[derive(Debug, Clone)]
pub struct Document {
    tree: DomTree,
    strict: bool,
    keep_comments: bool,
    doctype: Option<NodeId>,
    html: Option<NodeId>,
    head: Option<NodeId>,
    body: Option<NodeId>,
}

impl Document {
    /// Wrap a built tree and resolve the shortcut references.
    #[must_use]
    pub fn from_tree(tree: DomTree, strict: bool, keep_comments: bool) -> Self {
        let mut document = Self {
            tree,
            strict,
            keep_comments,
            doctype: None,
            html: None,
            head: None,
            body: None,
        };
        document.link_nodes();
        document
    }

    fn link_nodes(&mut self) {
        let roots = self.tree.children(NodeId::ROOT);
        self.doctype = self.find_positioned(roots, "!doctype", 0);
        self.html = self.find_positioned(roots, "html", 1);

        if let Some(html) = self.html {
            let children = self.tree.children(html);
            self.head = self.find_positioned(children, "head", 0);
            self.body = self.find_positioned(children, "body", 1);
        }
    }

    /// First element named `tag` among `nodes`, restricted to indices
    /// `0..=last_index` in strict mode.
    fn find_positioned(&self, nodes: &[NodeId], tag: &str, last_index: usize) -> Option<NodeId> {
        nodes
            .iter()
            .enumerate()
            .find(|&(index, &id)| {
                (!self.strict || index <= last_index) && self.tree.is_element_named(id, tag)
            })
            .map(|(_, &id)| id)
    }

    /// The underlying tree.
    #[must_use]
    pub const fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Mutable access to the tree for editing.
    ///
    /// Shortcut references are not re-resolved after edits.
    pub const fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// Give up the document wrapper and keep the tree.
    #[must_use]
    pub fn into_tree(self) -> DomTree {
        self.tree
    }

    /// Whether the document was parsed in strict mode.
    #[must_use]
    pub const fn is_strict(&self) -> bool {
        self.strict
    }

    /// Whether comments were kept during parsing.
    #[must_use]
    pub const fn keeps_comments(&self) -> bool {
        self.keep_comments
    }

    /// Root-level nodes in document order.
    #[must_use]
    pub fn root_list(&self) -> &[NodeId] {
        self.tree.children(NodeId::ROOT)
    }

    /// The `<!DOCTYPE>` element.
    #[must_use]
    pub const fn doctype(&self) -> Option<NodeId> {
        self.doctype
    }

    /// The `html` element.
    #[must_use]
    pub const fn html(&self) -> Option<NodeId> {
        self.html
    }

    /// The `head` element inside `html`.
    #[must_use]
    pub const fn head(&self) -> Option<NodeId> {
        self.head
    }

    /// The `body` element inside `html`.
    #[must_use]
    pub const fn body(&self) -> Option<NodeId> {
        self.body
    }

    /// Every table under `body`. Empty when there is no body.
    #[must_use]
    pub fn tables(&self) -> Vec<Table<'_>> {
        self.body
            .map(|body| self.tree.tables(body))
            .unwrap_or_default()
    }

    /// [`DomTree::search`] over the whole root list. Depth counts from each
    /// root-level node.
    pub fn search<P>(&self, options: SearchOptions, mut predicate: P) -> Vec<NodeId>
    where
        P: FnMut(&Node) -> bool,
    {
        self.tree
            .search_many(self.root_list(), options, &mut predicate)
    }

    /// First element in the document with the given `id` attribute.
    #[must_use]
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree.element_by_id(NodeId::ROOT, id)
    }

    /// Elements in the document whose class list contains `class_name`.
    #[must_use]
    pub fn elements_by_class_name(&self, class_name: &str) -> Vec<NodeId> {
        self.tree.elements_by_class_name(NodeId::ROOT, class_name)
    }

    /// Elements in the document with the given tag name.
    #[must_use]
    pub fn elements_by_tag_name(&self, tag_name: &str) -> Vec<NodeId> {
        self.tree.elements_by_tag_name(NodeId::ROOT, tag_name)
    }

    /// Elements in the document carrying `name`, optionally equal to `value`.
    #[must_use]
    pub fn elements_by_attribute(&self, name: &str, value: Option<&str>) -> Vec<NodeId> {
        self.tree.elements_by_attribute(NodeId::ROOT, name, value)
    }

    /// Elements in the document whose `name` attribute equals `name`.
    #[must_use]
    pub fn elements_by_name(&self, name: &str) -> Vec<NodeId> {
        self.tree.elements_by_name(NodeId::ROOT, name)
    }

    /// Flattened markup of the whole root list.
    #[must_use]
    pub fn outer_html(&self) -> String {
        self.tree.outer_html(NodeId::ROOT)
    }

    /// Serialize the document.
    #[must_use]
    pub fn write(&self, options: &WriteOptions) -> String {
        self.tree.write(NodeId::ROOT, options)
    }
}
