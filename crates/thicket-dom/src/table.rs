//! Read-only table views.
//!
//! A [`Table`] is computed from the current state of the tree every time it
//! is requested. It borrows the tree and owns no structure of its own.

use crate::{DomTree, NodeId};

/// Rows of a table element, sorted into head, body and foot.
#[derive(Debug, Clone)]
pub struct Table<'a> {
    tree: &'a DomTree,
    node: NodeId,
    head: Vec<Row<'a>>,
    body: Vec<Row<'a>>,
    foot: Vec<Row<'a>>,
    rows: Vec<Row<'a>>,
}

/// Which bucket a row lands in.
#[derive(Clone, Copy)]
enum Section {
    Head,
    Body,
    Foot,
}

impl<'a> Table<'a> {
    /// Build the view for the table element `node`.
    ///
    /// When the first child is a `tr`, every direct `tr` child is a row,
    /// sorted by its first cell: `th` rows are head rows, `td` rows body
    /// rows, anything else is skipped. Otherwise `thead`, `tbody` and `tfoot`
    /// are looked for in that order, each at the next position only.
    #[must_use]
    pub fn new(tree: &'a DomTree, node: NodeId) -> Self {
        let mut table = Self {
            tree,
            node,
            head: Vec::new(),
            body: Vec::new(),
            foot: Vec::new(),
            rows: Vec::new(),
        };

        let children = tree.children(node);
        let Some(&first) = children.first() else {
            return table;
        };

        if tree.is_element_named(first, "tr") {
            for &child in children {
                if !tree.is_element_named(child, "tr") {
                    continue;
                }
                let Some(first_cell) = tree.first_child(child) else {
                    continue;
                };
                match tree.tag_name(first_cell) {
                    Some("th") => table.push_row(Section::Head, child),
                    Some("td") => table.push_row(Section::Body, child),
                    _ => {}
                }
            }
        } else {
            let mut position = 0;
            for (tag, section) in [
                ("thead", Section::Head),
                ("tbody", Section::Body),
                ("tfoot", Section::Foot),
            ] {
                let Some(&child) = children.get(position) else {
                    break;
                };
                if !tree.is_element_named(child, tag) {
                    continue;
                }
                for &grandchild in tree.children(child) {
                    if tree.is_element_named(grandchild, "tr") {
                        table.push_row(section, grandchild);
                    }
                }
                position += 1;
            }
        }

        table
    }

    fn push_row(&mut self, section: Section, node: NodeId) {
        let row = Row::new(self.tree, node);
        match section {
            Section::Head => self.head.push(row.clone()),
            Section::Body => self.body.push(row.clone()),
            Section::Foot => self.foot.push(row.clone()),
        }
        self.rows.push(row);
    }

    /// The table element.
    #[must_use]
    pub const fn node(&self) -> NodeId {
        self.node
    }

    /// Header rows.
    #[must_use]
    pub fn head(&self) -> &[Row<'a>] {
        &self.head
    }

    /// Body rows.
    #[must_use]
    pub fn body(&self) -> &[Row<'a>] {
        &self.body
    }

    /// Footer rows. Always empty for tables whose rows are direct children.
    #[must_use]
    pub fn foot(&self) -> &[Row<'a>] {
        &self.foot
    }

    /// All rows in document order.
    #[must_use]
    pub fn rows(&self) -> &[Row<'a>] {
        &self.rows
    }
}

/// A `tr` element and its cells.
#[derive(Debug, Clone)]
pub struct Row<'a> {
    node: NodeId,
    cells: Vec<Cell<'a>>,
}

impl<'a> Row<'a> {
    /// Collect the `th`/`td` children of `node`, in order.
    #[must_use]
    pub fn new(tree: &'a DomTree, node: NodeId) -> Self {
        let cells = tree
            .children(node)
            .iter()
            .filter(|&&child| matches!(tree.tag_name(child), Some("th" | "td")))
            .map(|&child| Cell { tree, node: child })
            .collect();
        Self { node, cells }
    }

    /// The `tr` element.
    #[must_use]
    pub const fn node(&self) -> NodeId {
        self.node
    }

    /// Cells in order.
    #[must_use]
    pub fn cells(&self) -> &[Cell<'a>] {
        &self.cells
    }
}

/// A `th` or `td` element.
#[derive(Debug, Clone, Copy)]
pub struct Cell<'a> {
    tree: &'a DomTree,
    node: NodeId,
}

impl<'a> Cell<'a> {
    /// The cell element.
    #[must_use]
    pub const fn node(&self) -> NodeId {
        self.node
    }

    /// Whether this is a `th` cell.
    #[must_use]
    pub fn is_header(&self) -> bool {
        self.tree.is_element_named(self.node, "th")
    }

    /// Flattened inner markup of the cell.
    #[must_use]
    pub fn text(&self) -> String {
        self.tree.inner_html(self.node)
    }

    /// Child nodes of the cell.
    #[must_use]
    pub fn children(&self) -> &'a [NodeId] {
        self.tree.children(self.node)
    }
}

impl DomTree {
    /// A [`Table`] for every `table` element under `start`, `start` included.
    #[must_use]
    pub fn tables(&self, start: NodeId) -> Vec<Table<'_>> {
        self.elements_by_tag_name(start, "table")
            .into_iter()
            .map(|id| Table::new(self, id))
            .collect()
    }
}
