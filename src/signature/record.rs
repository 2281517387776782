//! Signature records returned to editors.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One entry of a function's parameter list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub annotation: Option<String>,
    pub default: Option<String>,
}

/// Structured description of a function signature.
///
/// `id` is a fresh correlation token per lookup; it carries no meaning across
/// calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureRecord {
    pub func_name: String,
    pub params: Vec<Parameter>,
    pub return_typehint: Option<String>,
    pub raise_types: Vec<String>,
    pub id: Uuid,
}

impl SignatureRecord {
    /// Equality on every field except `id`.
    pub fn same_signature(&self, other: &SignatureRecord) -> bool {
        self.func_name == other.func_name
            && self.params == other.params
            && self.return_typehint == other.return_typehint
            && self.raise_types == other.raise_types
    }
}
