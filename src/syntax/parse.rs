//! Tree-sitter adapter: Python source to [`SyntaxTree`].

use tree_sitter::{Parser, TreeCursor};

use crate::error::LookupError;

use super::kind::{Field, SyntaxKind};
use super::tree::{LineSpan, NodeId, SyntaxNode, SyntaxTree};

/// Parse Python source into an arena tree.
///
/// Syntax errors do not fail the parse; they show up as
/// [`SyntaxKind::Error`] nodes. Only a parser that produces no tree at all is
/// reported as [`LookupError::Parse`].
pub fn parse(source: &str) -> Result<SyntaxTree, LookupError> {
    let mut parser = Parser::new();
    parser.set_language(&tree_sitter_python::LANGUAGE.into())?;

    let ts_tree = parser.parse(source, None).ok_or(LookupError::Parse)?;

    let mut tree = SyntaxTree::new(source.to_string());
    lower(&mut tree, &mut ts_tree.walk());

    tracing::trace!(
        bytes = source.len(),
        has_errors = ts_tree.root_node().has_error(),
        "parsed python source"
    );
    Ok(tree)
}

/// Copy every node below the cursor into the arena, in pre-order.
///
/// Open ancestors live on an explicit stack, not the call stack.
fn lower(tree: &mut SyntaxTree, cursor: &mut TreeCursor<'_>) {
    let mut ancestors: Vec<(NodeId, SyntaxKind)> = Vec::new();

    loop {
        let parent = ancestors.last().copied();
        let id = lower_node(tree, cursor, parent.map(|(_, kind)| kind));
        if let Some((parent_id, _)) = parent {
            tree.add_child(parent_id, id);
        }

        if cursor.goto_first_child() {
            ancestors.push((id, tree.kind(id)));
            continue;
        }

        while !cursor.goto_next_sibling() {
            if !cursor.goto_parent() {
                return;
            }
            ancestors.pop();
        }
    }
}

/// Copy the node under the cursor, without its children.
fn lower_node(
    tree: &mut SyntaxTree,
    cursor: &TreeCursor<'_>,
    parent: Option<SyntaxKind>,
) -> NodeId {
    let node = cursor.node();
    let start = node.start_position();
    let end = node.end_position();

    tree.push(SyntaxNode {
        kind: SyntaxKind::classify(&node, parent),
        field: cursor.field_name().and_then(Field::from_name),
        span: LineSpan::from_rows(start.row, end.row, end.column),
        bytes: node.byte_range(),
        children: Vec::new(),
    })
}
