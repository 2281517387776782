//! The `docstring_info` request: signature of the function enclosing a line.
//!
//! Requests name a document by `file://` URL or by path and give a 1-based
//! line. Open documents are answered from the in-memory text, anything else
//! is read from disk.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tower_lsp::jsonrpc::{Error, ErrorCode};
use tower_lsp::lsp_types::Url;

use crate::document::DocumentStore;
use crate::error::LookupError;
use crate::signature::{lookup_signature, SignatureRecord};

/// JSON-RPC method name of the signature request.
pub const DOCSTRING_INFO: &str = "docstring_info";
/// JSON-RPC method name of the liveness check.
pub const PING: &str = "ping";

/// Parameters of a `docstring_info` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocstringInfoParams {
    /// `file://` URL, absolute path, or path relative to the workspace root.
    pub uri: String,
    /// 1-based line number.
    pub line: usize,
}

/// Turn the `uri` of a request into a `file://` URL.
///
/// Anything that doesn't parse as a URL with a real scheme is taken as a
/// path; relative paths are joined onto `root`.
pub fn document_url(uri: &str, root: &Path) -> Result<Url, Error> {
    if let Ok(url) = Url::parse(uri) {
        // `C:\src\x.py` parses with scheme `c`.
        if url.scheme().len() > 1 {
            return Ok(url);
        }
    }

    let path = PathBuf::from(uri);
    let path = if path.is_absolute() {
        path
    } else {
        root.join(path)
    };
    Url::from_file_path(&path)
        .map_err(|()| Error::invalid_params(format!("not a valid document path: {}", uri)))
}

/// Answer a `docstring_info` request against the open documents, falling
/// back to the file on disk.
pub async fn docstring_info(
    documents: &DocumentStore,
    root: &Path,
    params: DocstringInfoParams,
) -> Result<Option<SignatureRecord>, Error> {
    let url = document_url(&params.uri, root)?;

    let result = match documents.get(&url) {
        Some(doc) => doc.signature_at(params.line),
        None => {
            let path = url
                .to_file_path()
                .map_err(|()| Error::invalid_params(format!("not a file URL: {}", url)))?;
            let source = tokio::fs::read_to_string(&path).await.map_err(|e| {
                Error::invalid_params(format!("cannot read {}: {}", path.display(), e))
            })?;
            lookup_signature(&source, params.line)
        }
    };

    result.map_err(|e| {
        tracing::warn!(uri = %url, line = params.line, "signature lookup failed: {}", e);
        to_rpc_error(e)
    })
}

/// Lookup faults surface as internal errors, distinct from a `null` result.
pub fn to_rpc_error(error: LookupError) -> Error {
    Error {
        code: ErrorCode::InternalError,
        message: error.to_string().into(),
        data: None,
    }
}
