//! Backend state
//!
//! The backend owns the open-document store (text as ropes) and the engine,
//! which in turn owns the catalog and the per-document index cache.

use std::sync::Arc;
use std::sync::atomic::AtomicU32;

use dashmap::DashMap;
use tower_lsp::Client;
use tower_lsp::lsp_types::Url;

use crate::engine::Engine;
use crate::lsp::models::LspDocument;

/// The script language server backend, managing state and handling LSP requests.
#[derive(Clone)]
pub struct ScriptBackend {
    pub(super) client: Client,
    pub(super) documents_by_uri: Arc<DashMap<Url, Arc<LspDocument>>>,
    pub(super) serial_document_id: Arc<AtomicU32>,
    pub(super) engine: Engine,
    pub(super) cli_debounce_ms: Option<u64>,
}
