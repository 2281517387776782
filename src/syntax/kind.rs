//! Closed classification of Python syntax nodes.

use tree_sitter::Node;

/// Kind tag of a [`SyntaxNode`](super::SyntaxNode).
///
/// Tree-sitter kind strings are classified once, when the tree is lowered
/// into the arena. Everything downstream matches on this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    /// The root of a parsed file.
    Module,
    /// `def` / `async def`.
    FunctionDefinition,
    /// `class`.
    ClassDefinition,
    /// Decorators wrapping a function or class definition.
    DecoratedDefinition,
    /// An indented statement block.
    Block,
    /// `if`, `for`, `while`, `try`, `with`, `match` and their clauses.
    CompoundStatement,
    /// The parenthesized parameter list of a function.
    Parameters,
    /// A single entry of a parameter list.
    Parameter,
    Identifier,
    Call,
    /// Punctuation such as `->`, `:`, `,` or a bare `*` separator.
    Operator,
    Keyword,
    RaiseStatement,
    /// Any other named node.
    Expression,
    Comment,
    /// Error recovery output of the parser.
    Error,
}

impl SyntaxKind {
    /// Classify a tree-sitter node. `parent` is the already classified kind of
    /// the enclosing node, needed because a bare identifier is a parameter
    /// only when it sits directly in a parameter list.
    pub(crate) fn classify(node: &Node<'_>, parent: Option<SyntaxKind>) -> Self {
        if node.is_error() || (node.is_missing() && node.is_named()) {
            return SyntaxKind::Error;
        }

        if !node.is_named() {
            let token = node.kind();
            return if token.chars().all(|c| c.is_ascii_alphabetic() || c == '_') {
                SyntaxKind::Keyword
            } else {
                SyntaxKind::Operator
            };
        }

        let in_parameters = parent == Some(SyntaxKind::Parameters);
        match node.kind() {
            "module" => SyntaxKind::Module,
            "function_definition" => SyntaxKind::FunctionDefinition,
            "class_definition" => SyntaxKind::ClassDefinition,
            "decorated_definition" => SyntaxKind::DecoratedDefinition,
            "block" => SyntaxKind::Block,
            "if_statement" | "elif_clause" | "else_clause" | "for_statement"
            | "while_statement" | "try_statement" | "except_clause" | "except_group_clause"
            | "finally_clause" | "with_statement" | "match_statement" | "case_clause" => {
                SyntaxKind::CompoundStatement
            }
            "parameters" => SyntaxKind::Parameters,
            "typed_parameter" | "default_parameter" | "typed_default_parameter" => {
                SyntaxKind::Parameter
            }
            "identifier" | "list_splat_pattern" | "dictionary_splat_pattern" if in_parameters => {
                SyntaxKind::Parameter
            }
            "keyword_separator" | "positional_separator" => SyntaxKind::Operator,
            "identifier" => SyntaxKind::Identifier,
            "call" => SyntaxKind::Call,
            "raise_statement" => SyntaxKind::RaiseStatement,
            "comment" => SyntaxKind::Comment,
            _ => SyntaxKind::Expression,
        }
    }

    /// Whether this is a function or class definition.
    pub fn is_definition(self) -> bool {
        matches!(
            self,
            SyntaxKind::FunctionDefinition | SyntaxKind::ClassDefinition
        )
    }

    /// Statement containers scanned when looking for definitions or raise
    /// statements belonging to the current scope.
    pub fn is_statement_container(self) -> bool {
        match self {
            SyntaxKind::Module
            | SyntaxKind::Block
            | SyntaxKind::CompoundStatement
            | SyntaxKind::DecoratedDefinition => true,
            SyntaxKind::FunctionDefinition
            | SyntaxKind::ClassDefinition
            | SyntaxKind::Parameters
            | SyntaxKind::Parameter
            | SyntaxKind::Identifier
            | SyntaxKind::Call
            | SyntaxKind::Operator
            | SyntaxKind::Keyword
            | SyntaxKind::RaiseStatement
            | SyntaxKind::Expression
            | SyntaxKind::Comment
            | SyntaxKind::Error => false,
        }
    }
}

/// Grammar field role of a node within its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Body,
    Type,
    Value,
    Function,
}

impl Field {
    pub(crate) fn from_name(name: &str) -> Option<Self> {
        match name {
            "name" => Some(Field::Name),
            "body" => Some(Field::Body),
            "type" => Some(Field::Type),
            "value" => Some(Field::Value),
            "function" => Some(Field::Function),
            _ => None,
        }
    }
}
