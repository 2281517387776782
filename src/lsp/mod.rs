//! Protocol feature implementations.
//!
//! This module provides the custom JSON-RPC requests served next to the
//! standard LSP lifecycle:
//! - `docstring_info`, the signature of the function enclosing a line
//! - `ping`, a liveness check

mod docstring;

pub use docstring::{docstring_info, document_url, DocstringInfoParams, DOCSTRING_INFO, PING};
