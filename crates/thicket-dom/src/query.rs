//! Tree search and the convenience lookups built on it.

use crate::{DomTree, ElementData, Node, NodeId, NodeType};

/// Limits for [`DomTree::search`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Generations below the start node to descend into. `Some(0)` tests only
    /// the start node; `None` is unbounded.
    pub max_depth: Option<usize>,
    /// Stop as soon as this many matches are found. `None` is unbounded.
    pub max_results: Option<usize>,
}

impl SearchOptions {
    /// Unbounded search.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_depth: None,
            max_results: None,
        }
    }

    /// Limit the search depth.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Limit the number of results.
    #[must_use]
    pub const fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = Some(max_results);
        self
    }
}

/// Shared state of one search across possibly several start nodes.
struct Search<'p, P> {
    predicate: &'p mut P,
    max_results: Option<usize>,
    results: Vec<NodeId>,
}

impl<P: FnMut(&Node) -> bool> Search<'_, P> {
    fn is_full(&self) -> bool {
        self.max_results.is_some_and(|max| self.results.len() >= max)
    }
}

impl DomTree {
    /// Depth-first, pre-order search from `start`, `start` included.
    ///
    /// `predicate` is called once per visited node. Traversal stops the moment
    /// `options.max_results` matches have been collected, so no node after the
    /// last match is visited. Results are in document order.
    pub fn search<P>(&self, start: NodeId, options: SearchOptions, mut predicate: P) -> Vec<NodeId>
    where
        P: FnMut(&Node) -> bool,
    {
        self.search_many(&[start], options, &mut predicate)
    }

    /// [`search`](Self::search) over several start nodes in order, sharing one
    /// result limit. Depth is measured from each start node.
    pub fn search_many<P>(
        &self,
        starts: &[NodeId],
        options: SearchOptions,
        predicate: &mut P,
    ) -> Vec<NodeId>
    where
        P: FnMut(&Node) -> bool,
    {
        let mut search = Search {
            predicate,
            max_results: options.max_results,
            results: Vec::new(),
        };
        for &start in starts {
            if search.is_full() {
                break;
            }
            self.search_recursive(start, options.max_depth, &mut search);
        }
        search.results
    }

    fn search_recursive<P>(&self, id: NodeId, depth_remaining: Option<usize>, search: &mut Search<'_, P>)
    where
        P: FnMut(&Node) -> bool,
    {
        if search.is_full() {
            return;
        }
        let Some(node) = self.get(id) else {
            return;
        };

        if (search.predicate)(node) {
            search.results.push(id);
        }

        let descends = matches!(node.node_type, NodeType::Element(_) | NodeType::Document);
        let next_depth = match depth_remaining {
            None => None,
            Some(0) => return,
            Some(remaining) => Some(remaining - 1),
        };
        if descends {
            for &child in &node.children {
                if search.is_full() {
                    return;
                }
                self.search_recursive(child, next_depth, search);
            }
        }
    }

    /// First element under `start` whose `id` attribute equals `id`.
    #[must_use]
    pub fn element_by_id(&self, start: NodeId, id: &str) -> Option<NodeId> {
        self.search(start, SearchOptions::new().with_max_results(1), |node| {
            element_of(node).is_some_and(|e| e.id() == Some(id))
        })
        .first()
        .copied()
    }

    /// Every element under `start` whose `id` attribute equals `id`.
    #[must_use]
    pub fn elements_by_id(&self, start: NodeId, id: &str) -> Vec<NodeId> {
        self.search(start, SearchOptions::new(), |node| {
            element_of(node).is_some_and(|e| e.id() == Some(id))
        })
    }

    /// Elements whose class attribute contains `class_name` as a whole token.
    #[must_use]
    pub fn elements_by_class_name(&self, start: NodeId, class_name: &str) -> Vec<NodeId> {
        self.search(start, SearchOptions::new(), |node| {
            element_of(node).is_some_and(|e| e.has_class(class_name))
        })
    }

    /// Elements with the given tag name (ASCII case-insensitive).
    #[must_use]
    pub fn elements_by_tag_name(&self, start: NodeId, tag_name: &str) -> Vec<NodeId> {
        self.search(start, SearchOptions::new(), |node| {
            element_of(node).is_some_and(|e| e.tag_name.eq_ignore_ascii_case(tag_name))
        })
    }

    /// Elements carrying the attribute `name`, optionally with exactly `value`.
    #[must_use]
    pub fn elements_by_attribute(
        &self,
        start: NodeId,
        name: &str,
        value: Option<&str>,
    ) -> Vec<NodeId> {
        self.search(start, SearchOptions::new(), |node| {
            element_of(node).is_some_and(|e| match (e.attrs.get(name), value) {
                (Some(actual), Some(expected)) => actual == expected,
                (Some(_), None) => true,
                (None, _) => false,
            })
        })
    }

    /// Elements whose `name` attribute equals `name`.
    #[must_use]
    pub fn elements_by_name(&self, start: NodeId, name: &str) -> Vec<NodeId> {
        self.elements_by_attribute(start, "name", Some(name))
    }
}

const fn element_of(node: &Node) -> Option<&ElementData> {
    match &node.node_type {
        NodeType::Element(data) => Some(data),
        _ => None,
    }
}
