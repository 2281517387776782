//! Python syntax trees.
//!
//! This module provides:
//! - `parse` turning source text into a `SyntaxTree` via tree-sitter-python
//! - `SyntaxTree`, an arena of immutable `SyntaxNode`s addressed by `NodeId`
//! - `SyntaxKind` and `Field`, the closed node classification

mod kind;
mod parse;
mod tree;

pub use kind::{Field, SyntaxKind};
pub use parse::parse;
pub use tree::{Descendants, LineSpan, NodeId, SyntaxNode, SyntaxTree};
