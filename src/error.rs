//! Error types.

use thiserror::Error;

/// Failure of a signature lookup.
///
/// "Nothing to describe at this line" is not an error; lookups return
/// `Ok(None)` for it. These variants are faults.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The Python grammar could not be loaded into the parser.
    #[error("failed to load the Python grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    /// The parser returned no tree.
    #[error("parser produced no syntax tree")]
    Parse,

    /// A function definition without a parameter list.
    #[error("function `{name}` at line {line} has no parameter list")]
    MissingParameters { name: String, line: usize },
}

/// Failure to start or run the TCP server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// This registry already holds a server for the address.
    #[error("a server is already registered on {host}:{port}")]
    AlreadyRegistered { host: String, port: u16 },

    /// Another socket is bound to the address.
    #[error("address {host}:{port} is already in use")]
    AddressInUse { host: String, port: u16 },

    #[error("failed to bind {host}:{port}: {source}")]
    Bind {
        host: String,
        port: u16,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to accept connection: {0}")]
    Accept(#[source] std::io::Error),
}
