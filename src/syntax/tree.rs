//! Arena-owned, immutable syntax tree.

use std::ops::Range;

use super::kind::{Field, SyntaxKind};

/// Index of a node inside its [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

/// Inclusive, 1-based line span of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpan {
    pub start: usize,
    pub end: usize,
}

impl LineSpan {
    /// Build a span from tree-sitter rows (0-based, end exclusive in columns).
    ///
    /// A node that ends at column 0 of a later row stops on the previous line.
    pub(crate) fn from_rows(start_row: usize, end_row: usize, end_column: usize) -> Self {
        let end_row = if end_column == 0 && end_row > start_row {
            end_row - 1
        } else {
            end_row
        };
        Self {
            start: start_row + 1,
            end: end_row + 1,
        }
    }

    /// Boundary-inclusive containment.
    pub fn contains(&self, line: usize) -> bool {
        self.start <= line && line <= self.end
    }
}

/// A single node of the tree.
#[derive(Debug, Clone)]
pub struct SyntaxNode {
    pub(crate) kind: SyntaxKind,
    pub(crate) field: Option<Field>,
    pub(crate) span: LineSpan,
    pub(crate) bytes: Range<usize>,
    pub(crate) children: Vec<NodeId>,
}

impl SyntaxNode {
    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    /// The grammar field this node fills in its parent, if any.
    pub fn field(&self) -> Option<Field> {
        self.field
    }

    pub fn span(&self) -> LineSpan {
        self.span
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// A parsed file: the source text and every node, addressed by [`NodeId`].
///
/// Nodes are stored in pre-order, so a parent always precedes its children.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    source: String,
    nodes: Vec<SyntaxNode>,
}

impl SyntaxTree {
    pub(crate) fn new(source: String) -> Self {
        Self {
            source,
            nodes: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, node: SyntaxNode) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub(crate) fn add_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].children.push(child);
    }

    /// The root module node.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &SyntaxNode {
        &self.nodes[id.0]
    }

    pub fn kind(&self, id: NodeId) -> SyntaxKind {
        self.node(id).kind
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// First child of `id` filling the given grammar field.
    pub fn child_by_field(&self, id: NodeId, field: Field) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|&child| self.node(child).field == Some(field))
    }

    /// Verbatim source of the subtree rooted at `id`, trimmed.
    pub fn text(&self, id: NodeId) -> &str {
        self.source[self.node(id).bytes.clone()].trim()
    }

    /// Whether `id` is an operator token with exactly this text.
    pub fn is_operator(&self, id: NodeId, token: &str) -> bool {
        self.kind(id) == SyntaxKind::Operator && self.text(id) == token
    }

    /// Pre-order walk of the subtree rooted at `id`, including `id` itself.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            stack: vec![id],
        }
    }

    /// Drop children of `id` that fail the predicate. Used to build
    /// malformed trees in tests.
    #[cfg(test)]
    pub(crate) fn retain_children(
        &mut self,
        id: NodeId,
        mut keep: impl FnMut(&SyntaxNode) -> bool,
    ) {
        let children = std::mem::take(&mut self.nodes[id.0].children);
        let kept = children
            .into_iter()
            .filter(|child| keep(&self.nodes[child.0]))
            .collect();
        self.nodes[id.0].children = kept;
    }
}

/// Iterator returned by [`SyntaxTree::descendants`].
pub struct Descendants<'t> {
    tree: &'t SyntaxTree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack.extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}
