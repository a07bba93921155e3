//! LSP protocol handler implementations
//!
//! Lifecycle (initialize, initialized, shutdown), document sync (did_open,
//! did_change, did_close) and the three queries (completion, hover,
//! signature_help). Resolution failures are `Ok(None)`, never errors.

use std::sync::Arc;

use tower_lsp::{LanguageServer, jsonrpc};
use tower_lsp::lsp_types::{
    CompletionOptions, CompletionParams, CompletionResponse, DidChangeTextDocumentParams,
    DidCloseTextDocumentParams, DidOpenTextDocumentParams, Hover, HoverParams,
    HoverProviderCapability, InitializeParams, InitializeResult, InitializedParams,
    PositionEncodingKind, ServerCapabilities, ServerInfo, SignatureHelp, SignatureHelpOptions, SignatureHelpParams,
    TextDocumentSyncCapability, TextDocumentSyncKind,
};
use tower_lsp::jsonrpc::Result as LspResult;

use tracing::{debug, info, warn};

use super::state::ScriptBackend;
use crate::config::{InitializationOptions, resolve_debounce};
use crate::lsp::features::completion::trigger::{TriggerSuggest, TriggerSuggestParams};
use crate::lsp::features::completion::dot_insertion_point;
use crate::lsp::models::LspDocument;
use crate::parsers::position_utils::line_prefix;

#[tower_lsp::async_trait]
impl LanguageServer for ScriptBackend {
    /// Handles the LSP initialize request: settles the debounce interval and
    /// advertises capabilities.
    async fn initialize(&self, params: InitializeParams) -> jsonrpc::Result<InitializeResult> {
        info!(
            "Received initialize from {}",
            params.client_info.as_ref().map(|c| c.name.as_str()).unwrap_or("unknown client")
        );

        let options = InitializationOptions::from_value(params.initialization_options.as_ref())
            .unwrap_or_else(|e| {
                warn!("{}", e);
                InitializationOptions::default()
            });
        let debounce = resolve_debounce(options.debounce_ms, self.cli_debounce_ms);
        self.engine.indexes().set_debounce(debounce);
        info!("Index debounce interval: {:?}", debounce);

        let position_encoding = negotiate_position_encoding(&params);
        info!("Position encoding: {:?}", position_encoding.as_ref().map(|kind| kind.as_str()));

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                position_encoding,
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::INCREMENTAL,
                )),
                completion_provider: Some(CompletionOptions {
                    trigger_characters: Some(vec![".".to_string()]),
                    ..Default::default()
                }),
                hover_provider: Some(HoverProviderCapability::Simple(true)),
                signature_help_provider: Some(SignatureHelpOptions {
                    trigger_characters: Some(vec!["(".to_string(), ",".to_string()]),
                    ..Default::default()
                }),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _params: InitializedParams) {
        let catalog = self.engine.catalog();
        info!(
            "Initialized with {} classes, {} functions, {} constants",
            catalog.classes().count(),
            catalog.functions().count(),
            catalog.constants().count()
        );
    }

    async fn shutdown(&self) -> LspResult<()> {
        info!("Received shutdown request");
        Ok(())
    }

    /// Opening a document is a document switch: its index is built right away.
    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;
        let text = params.text_document.text;
        info!("Opening document: URI={}, version={}", uri, version);

        let document = Arc::new(LspDocument::new(self.next_document_id(), &text, version));
        self.documents_by_uri.insert(uri.clone(), document);
        self.engine.open_document(uri.as_str(), &text);
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;
        debug!("textDocument/didChange: URI={}, version={}", uri, version);

        let Some(document) = self.document(&uri) else {
            warn!("Change for unknown document {}", uri);
            return;
        };

        let text = match document.apply(&params.content_changes, version).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Ignoring change to {}: {}", uri, e);
                return;
            }
        };

        self.engine.document_changed(uri.as_str(), text.clone());

        if let Some(position) = dot_insertion_point(&params.content_changes) {
            if self.engine.should_trigger_suggest(line_prefix(&text, position)) {
                debug!("Triggering completion at {}:{:?}", uri, position);
                self.client
                    .send_notification::<TriggerSuggest>(TriggerSuggestParams { uri, position })
                    .await;
            }
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        if let Some((_, document)) = self.documents_by_uri.remove(&uri) {
            info!("Closed document: {}, id: {}", uri, document.id);
        } else {
            warn!("Failed to find document with URI={}", uri);
        }
        self.engine.close_document(uri.as_str());
    }

    async fn completion(&self, params: CompletionParams) -> LspResult<Option<CompletionResponse>> {
        let uri = params.text_document_position.text_document.uri;
        let position = params.text_document_position.position;
        debug!("Completion request at {}:{:?}", uri, position);

        let Some(text) = self.document_text(&uri).await else {
            return Ok(None);
        };
        let items = self.engine.completion(uri.as_str(), &text, position);
        debug!("Returning {} completion items", items.len());
        if items.is_empty() {
            Ok(None)
        } else {
            Ok(Some(CompletionResponse::Array(items)))
        }
    }

    async fn hover(&self, params: HoverParams) -> LspResult<Option<Hover>> {
        let uri = params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;
        debug!("Hover request at {}:{:?}", uri, position);

        let Some(text) = self.document_text(&uri).await else {
            return Ok(None);
        };
        Ok(self.engine.hover(&text, position))
    }

    async fn signature_help(&self, params: SignatureHelpParams) -> LspResult<Option<SignatureHelp>> {
        let uri = params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;
        debug!("Signature help request at {}:{:?}", uri, position);

        let Some(text) = self.document_text(&uri).await else {
            return Ok(None);
        };
        Ok(self.engine.signature_help(uri.as_str(), &text, position))
    }
}

/// Columns are counted in `char`s, which is exactly UTF-32. Clients that do not
/// offer it get the UTF-16 default, where the two agree inside the BMP only.
fn negotiate_position_encoding(params: &InitializeParams) -> Option<PositionEncodingKind> {
    let offered = params
        .capabilities
        .general
        .as_ref()
        .and_then(|general| general.position_encodings.as_ref())?;
    offered
        .contains(&PositionEncodingKind::UTF32)
        .then_some(PositionEncodingKind::UTF32)
}
