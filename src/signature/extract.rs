//! Signature extraction from a function definition.

use uuid::Uuid;

use crate::error::LookupError;
use crate::syntax::{Field, NodeId, SyntaxKind, SyntaxTree};

use super::definitions::{Definition, DefinitionKind};
use super::record::{Parameter, SignatureRecord};

/// A [`Definition`] known to be a function.
#[derive(Debug, Clone, Copy)]
pub struct FunctionDefinition<'t>(Definition<'t>);

impl<'t> Definition<'t> {
    pub fn as_function(&self) -> Option<FunctionDefinition<'t>> {
        match self.kind() {
            DefinitionKind::Function => Some(FunctionDefinition(*self)),
            DefinitionKind::Class => None,
        }
    }
}

impl<'t> FunctionDefinition<'t> {
    pub fn definition(&self) -> Definition<'t> {
        self.0
    }
}

/// Build the signature record of a function.
///
/// Fails only when the function has no parameter list, which the grammar
/// never produces on its own.
pub fn extract_signature(function: FunctionDefinition<'_>) -> Result<SignatureRecord, LookupError> {
    let definition = function.definition();
    let tree = definition.tree();
    let id = definition.id();

    let parameters = tree
        .children(id)
        .iter()
        .copied()
        .find(|&child| tree.kind(child) == SyntaxKind::Parameters)
        .ok_or_else(|| LookupError::MissingParameters {
            name: definition.name().to_string(),
            line: definition.span().start,
        })?;

    let params = tree
        .children(parameters)
        .iter()
        .copied()
        .filter(|&child| tree.kind(child) == SyntaxKind::Parameter)
        .map(|param| Parameter {
            name: parameter_name(tree, param).to_string(),
            annotation: field_text(tree, param, Field::Type),
            default: field_text(tree, param, Field::Value),
        })
        .collect();

    let raise_types = match definition.body() {
        Some(body) => raised_types(tree, body),
        None => Vec::new(),
    };

    Ok(SignatureRecord {
        func_name: definition.name().to_string(),
        params,
        return_typehint: return_annotation(tree, id),
        raise_types,
        id: Uuid::new_v4(),
    })
}

/// Name of a parameter entry: its `name` field when present, otherwise the
/// first identifier inside it. Stars of `*args` / `**kwargs` are dropped.
fn parameter_name(tree: &SyntaxTree, param: NodeId) -> &str {
    if let Some(name) = tree.child_by_field(param, Field::Name) {
        if tree.kind(name) == SyntaxKind::Identifier {
            return tree.text(name);
        }
    }

    tree.descendants(param)
        .skip(1)
        .find(|&node| tree.kind(node) == SyntaxKind::Identifier)
        .map(|node| tree.text(node))
        .unwrap_or_else(|| tree.text(param))
}

fn field_text(tree: &SyntaxTree, node: NodeId, field: Field) -> Option<String> {
    tree.child_by_field(node, field)
        .map(|child| tree.text(child).to_string())
}

/// The annotation between `->` and `:` among the definition's own children.
///
/// Exactly one node must sit between the delimiters; anything else is
/// treated as no annotation.
fn return_annotation(tree: &SyntaxTree, function: NodeId) -> Option<String> {
    let children = tree.children(function);
    let arrow = children.iter().position(|&c| tree.is_operator(c, "->"))?;
    let colon = arrow
        + 1
        + children[arrow + 1..]
            .iter()
            .position(|&c| tree.is_operator(c, ":"))?;

    let between: Vec<NodeId> = children[arrow + 1..colon]
        .iter()
        .copied()
        .filter(|&c| tree.kind(c) != SyntaxKind::Comment)
        .collect();

    match between.as_slice() {
        [annotation] => Some(tree.text(*annotation).to_string()),
        _ => {
            tracing::debug!(
                nodes = between.len(),
                "ignoring return annotation without exactly one node"
            );
            None
        }
    }
}

/// Exception types raised directly in `body`, in source order.
fn raised_types(tree: &SyntaxTree, body: NodeId) -> Vec<String> {
    let mut out = Vec::new();
    collect_raises(tree, body, &mut out);
    out
}

fn collect_raises(tree: &SyntaxTree, node: NodeId, out: &mut Vec<String>) {
    for &child in tree.children(node) {
        match tree.kind(child) {
            SyntaxKind::RaiseStatement => out.extend(raised_type(tree, child)),
            kind if kind.is_statement_container() => collect_raises(tree, child, out),
            _ => {}
        }
    }
}

/// `raise E(...)` gives `E`, `raise e` gives `e`, bare `raise` gives nothing.
fn raised_type(tree: &SyntaxTree, raise: NodeId) -> Option<String> {
    let exception = tree
        .children(raise)
        .iter()
        .copied()
        .skip_while(|&c| tree.kind(c) == SyntaxKind::Keyword && tree.text(c) == "raise")
        .take_while(|&c| !(tree.kind(c) == SyntaxKind::Keyword && tree.text(c) == "from"))
        .find(|&c| !matches!(tree.kind(c), SyntaxKind::Comment | SyntaxKind::Operator))?;

    let target = match tree.kind(exception) {
        SyntaxKind::Call => tree
            .child_by_field(exception, Field::Function)
            .unwrap_or(exception),
        _ => exception,
    };
    Some(tree.text(target).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::definitions::top_level_definitions;
    use crate::syntax::parse;

    fn signature_of(source: &str) -> SignatureRecord {
        let tree = parse(source).unwrap();
        let function = top_level_definitions(&tree)[0].as_function().unwrap();
        extract_signature(function).unwrap()
    }

    fn param(name: &str, annotation: Option<&str>, default: Option<&str>) -> Parameter {
        Parameter {
            name: name.to_string(),
            annotation: annotation.map(str::to_string),
            default: default.map(str::to_string),
        }
    }

    #[test]
    fn plain_function() {
        let record =
            signature_of("def f(a, b: int = 2) -> str:\n    raise ValueError(\"x\")\n    return b\n");
        assert_eq!(record.func_name, "f");
        assert_eq!(
            record.params,
            vec![param("a", None, None), param("b", Some("int"), Some("2"))]
        );
        assert_eq!(record.return_typehint.as_deref(), Some("str"));
        assert_eq!(record.raise_types, vec!["ValueError"]);
    }

    #[test]
    fn no_parameters_no_return_no_raises() {
        let record = signature_of("def noop():\n    pass\n");
        assert_eq!(record.func_name, "noop");
        assert!(record.params.is_empty());
        assert_eq!(record.return_typehint, None);
        assert!(record.raise_types.is_empty());
    }

    #[test]
    fn every_parameter_shape() {
        let record = signature_of(
            "async def g(self, x, /, y=None, *args: int, z: 'Z' = Z(), **kwargs) -> None:\n    pass\n",
        );
        assert_eq!(
            record.params,
            vec![
                param("self", None, None),
                param("x", None, None),
                param("y", None, Some("None")),
                param("args", Some("int"), None),
                param("z", Some("'Z'"), Some("Z()")),
                param("kwargs", None, None),
            ]
        );
        assert_eq!(record.return_typehint.as_deref(), Some("None"));
    }

    #[test]
    fn keyword_only_separator_is_not_a_parameter() {
        let record = signature_of("def h(a, *, b: bool = False):\n    pass\n");
        let names: Vec<&str> = record.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn multiline_annotations_keep_source_text() {
        let record = signature_of(
            "def f(\n    mapping: Dict[str,\n                  int],\n) -> Optional[\n    int\n]:\n    pass\n",
        );
        assert_eq!(
            record.params[0].annotation.as_deref(),
            Some("Dict[str,\n                  int]")
        );
        assert_eq!(
            record.return_typehint.as_deref(),
            Some("Optional[\n    int\n]")
        );
    }

    #[test]
    fn raises_in_source_order_with_duplicates() {
        let source = "\
def f(x):
    if x:
        raise KeyError(x)
    try:
        pass
    except OSError as err:
        raise RuntimeError('wrapped') from err
    raise KeyError
    raise errors.Custom()
    raise
";
        let record = signature_of(source);
        assert_eq!(
            record.raise_types,
            vec!["KeyError", "RuntimeError", "KeyError", "errors.Custom"]
        );
    }

    #[test]
    fn raises_in_nested_definitions_are_not_collected() {
        let source = "\
def outer():
    def inner():
        raise ValueError
    class Local:
        def method(self):
            raise TypeError
    raise IndexError
";
        let record = signature_of(source);
        assert_eq!(record.raise_types, vec!["IndexError"]);
    }

    #[test]
    fn missing_parameter_list_is_a_fault() {
        let mut tree = parse("def f(a):\n    pass\n").unwrap();
        let id = top_level_definitions(&tree)[0].id();
        tree.retain_children(id, |node| node.kind() != SyntaxKind::Parameters);

        let function = top_level_definitions(&tree)[0].as_function().unwrap();
        let err = extract_signature(function).unwrap_err();
        assert!(matches!(
            err,
            LookupError::MissingParameters { ref name, line: 1 } if name == "f"
        ));
    }

    #[test]
    fn return_delimiters_without_annotation_are_ignored() {
        let mut tree = parse("def f() -> int:\n    pass\n").unwrap();
        let id = top_level_definitions(&tree)[0].id();
        tree.retain_children(id, |node| node.kind() != SyntaxKind::Expression);

        let function = top_level_definitions(&tree)[0].as_function().unwrap();
        let record = extract_signature(function).unwrap();
        assert_eq!(record.return_typehint, None);
    }

    #[test]
    fn classes_are_not_functions() {
        let tree = parse("class C:\n    pass\n").unwrap();
        assert!(top_level_definitions(&tree)[0].as_function().is_none());
    }

    #[test]
    fn every_record_gets_a_fresh_id() {
        let source = "def f():\n    pass\n";
        let a = signature_of(source);
        let b = signature_of(source);
        assert_ne!(a.id, b.id);
        assert!(a.same_signature(&b));
    }
}
