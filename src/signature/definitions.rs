//! Function and class definitions, and their enumeration per scope.

use crate::syntax::{Field, LineSpan, NodeId, SyntaxKind, SyntaxTree};

/// What kind of construct a [`Definition`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionKind {
    Function,
    Class,
}

/// A function or class definition, borrowed from its tree.
#[derive(Debug, Clone, Copy)]
pub struct Definition<'t> {
    tree: &'t SyntaxTree,
    id: NodeId,
    kind: DefinitionKind,
}

impl<'t> Definition<'t> {
    /// View `id` as a definition, if it is one.
    pub fn new(tree: &'t SyntaxTree, id: NodeId) -> Option<Self> {
        let kind = match tree.kind(id) {
            SyntaxKind::FunctionDefinition => DefinitionKind::Function,
            SyntaxKind::ClassDefinition => DefinitionKind::Class,
            _ => return None,
        };
        Some(Self { tree, id, kind })
    }

    pub fn tree(&self) -> &'t SyntaxTree {
        self.tree
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> DefinitionKind {
        self.kind
    }

    /// The declared identifier, empty if the parser recovered without one.
    pub fn name(&self) -> &'t str {
        self.tree
            .child_by_field(self.id, Field::Name)
            .map(|name| self.tree.text(name))
            .unwrap_or_default()
    }

    pub fn span(&self) -> LineSpan {
        self.tree.node(self.id).span()
    }

    /// The statement block of the definition.
    pub fn body(&self) -> Option<NodeId> {
        self.tree.child_by_field(self.id, Field::Body)
    }

    /// Definitions directly inside this one's body, in source order.
    pub fn nested(&self) -> Vec<Definition<'t>> {
        match self.body() {
            Some(body) => scope_definitions(self.tree, body),
            None => Vec::new(),
        }
    }
}

/// Top-level definitions of a parsed module, in source order.
pub fn top_level_definitions(tree: &SyntaxTree) -> Vec<Definition<'_>> {
    scope_definitions(tree, tree.root())
}

/// Definitions belonging to the scope whose statements live under `scope`.
///
/// Looks through decorators and compound statements (`if`, `try`, ...) but
/// never into another function or class.
pub fn scope_definitions(tree: &SyntaxTree, scope: NodeId) -> Vec<Definition<'_>> {
    let mut out = Vec::new();
    collect_definitions(tree, scope, &mut out);
    out
}

fn collect_definitions<'t>(tree: &'t SyntaxTree, node: NodeId, out: &mut Vec<Definition<'t>>) {
    for &child in tree.children(node) {
        if let Some(definition) = Definition::new(tree, child) {
            out.push(definition);
        } else if tree.kind(child).is_statement_container() {
            collect_definitions(tree, child, out);
        }
    }
}
