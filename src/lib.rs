//! Python signature lookup for docstring generation.
//!
//! Given Python source and a line, [`lookup_signature`] finds the innermost
//! function enclosing the line and describes its signature. [`Backend`]
//! serves the same lookup to editors as a JSON-RPC language server.

use std::path::PathBuf;
use std::sync::OnceLock;

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer, LspService};

mod document;
mod error;
mod lsp;
pub mod server;
pub(crate) mod settings;
pub mod signature;
pub mod syntax;

pub use document::{DocumentState, DocumentStore};
pub use error::{LookupError, ServerError};
pub use lsp::{document_url, DocstringInfoParams, DOCSTRING_INFO, PING};
pub use settings::{discover_settings, load_settings, Settings, DEFAULT_HOST, DEFAULT_PORT};
pub use signature::{lookup_in_tree, lookup_signature, Parameter, SignatureRecord};

pub struct Backend {
    client: Client,
    documents: DocumentStore,
    workspace_root: OnceLock<PathBuf>,
}

impl Backend {
    pub(crate) fn new(client: Client) -> Self {
        Self {
            client,
            documents: DocumentStore::new(),
            workspace_root: OnceLock::new(),
        }
    }

    /// Directory relative request paths are resolved against.
    fn root(&self) -> PathBuf {
        self.workspace_root
            .get()
            .cloned()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_default()
    }

    /// Signature of the function enclosing a line of a document.
    pub async fn docstring_info(
        &self,
        params: DocstringInfoParams,
    ) -> Result<Option<SignatureRecord>> {
        tracing::debug!(uri = %params.uri, line = params.line, "docstring_info");
        lsp::docstring_info(&self.documents, &self.root(), params).await
    }

    pub async fn ping(&self) -> Result<String> {
        Ok("pong".to_string())
    }

    pub fn documents(&self) -> &DocumentStore {
        &self.documents
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        // Extract workspace root from params
        let workspace_root = params
            .workspace_folders
            .as_ref()
            .and_then(|folders| folders.first())
            .and_then(|f| f.uri.to_file_path().ok())
            .or_else(|| {
                #[allow(deprecated)]
                params.root_uri.as_ref()?.to_file_path().ok()
            });

        if let Some(root) = workspace_root {
            tracing::info!(root = %root.display(), "workspace root");
            let _ = self.workspace_root.set(root);
        }

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "autodocstring server initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        self.documents.open(
            params.text_document.uri,
            params.text_document.text,
            params.text_document.version,
        );
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        // We use FULL sync, so there's exactly one change with the full text
        if let Some(change) = params.content_changes.into_iter().next() {
            self.documents.open(
                params.text_document.uri,
                change.text,
                params.text_document.version,
            );
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        self.documents.close(&params.text_document.uri);
    }
}

pub fn create_service() -> (LspService<Backend>, tower_lsp::ClientSocket) {
    LspService::build(Backend::new)
        .custom_method(DOCSTRING_INFO, Backend::docstring_info)
        .custom_method(PING, Backend::ping)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_can_be_created() {
        let (_service, _socket) = create_service();
    }

    fn open_params(uri: &Url, text: &str, version: i32) -> DidOpenTextDocumentParams {
        DidOpenTextDocumentParams {
            text_document: TextDocumentItem {
                uri: uri.clone(),
                language_id: "python".to_string(),
                version,
                text: text.to_string(),
            },
        }
    }

    #[tokio::test]
    async fn ping_answers_pong() {
        let (service, _socket) = create_service();
        assert_eq!(service.inner().ping().await.unwrap(), "pong");
    }

    #[tokio::test]
    async fn document_sync_feeds_lookups() {
        let (service, _socket) = create_service();
        let backend = service.inner();
        let uri = Url::parse("file:///workspace/mod.py").unwrap();

        backend
            .did_open(open_params(&uri, "def first(a):\n    pass\n", 1))
            .await;
        let params = DocstringInfoParams {
            uri: uri.to_string(),
            line: 1,
        };
        let record = backend.docstring_info(params.clone()).await.unwrap().unwrap();
        assert_eq!(record.func_name, "first");

        backend
            .did_change(DidChangeTextDocumentParams {
                text_document: VersionedTextDocumentIdentifier {
                    uri: uri.clone(),
                    version: 2,
                },
                content_changes: vec![TextDocumentContentChangeEvent {
                    range: None,
                    range_length: None,
                    text: "class C:\n    pass\n".to_string(),
                }],
            })
            .await;
        assert!(backend.docstring_info(params).await.unwrap().is_none());

        backend
            .did_close(DidCloseTextDocumentParams {
                text_document: TextDocumentIdentifier { uri },
            })
            .await;
        assert!(backend.documents().is_empty());
    }
}
