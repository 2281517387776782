//! Signature lookup: from a line of Python source to the signature of the
//! function enclosing it.
//!
//! The pipeline is parse, enumerate top-level definitions, narrow to the
//! innermost definition containing the line, then extract. Lines resolving to
//! a class, or to no definition at all, produce `None`.

mod definitions;
mod extract;
mod record;
mod resolve;

pub use definitions::{scope_definitions, top_level_definitions, Definition, DefinitionKind};
pub use extract::{extract_signature, FunctionDefinition};
pub use record::{Parameter, SignatureRecord};
pub use resolve::resolve_enclosing;

use crate::error::LookupError;
use crate::syntax::{self, SyntaxTree};

/// Signature of the innermost function enclosing `line` (1-based) in `source`.
pub fn lookup_signature(
    source: &str,
    line: usize,
) -> Result<Option<SignatureRecord>, LookupError> {
    let tree = syntax::parse(source)?;
    lookup_in_tree(&tree, line)
}

/// Same as [`lookup_signature`] over an already parsed tree.
pub fn lookup_in_tree(
    tree: &SyntaxTree,
    line: usize,
) -> Result<Option<SignatureRecord>, LookupError> {
    let top = top_level_definitions(tree);
    let Some(definition) = resolve_enclosing(line, &top) else {
        tracing::debug!(line, "no definition encloses line");
        return Ok(None);
    };

    match definition.as_function() {
        Some(function) => extract_signature(function).map(Some),
        None => {
            tracing::debug!(line, class = definition.name(), "line resolves to a class");
            Ok(None)
        }
    }
}
