use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use dashmap::DashMap;
use tower_lsp::Client;
use tower_lsp::lsp_types::Url;

use tracing::debug;

use crate::engine::Engine;
use crate::lsp::models::LspDocument;

mod handlers;
pub mod index_manager;
mod state;

pub use state::ScriptBackend;

impl ScriptBackend {
    /// Creates a backend serving `engine`. `cli_debounce_ms` is the
    /// `--debounce-ms` value, kept so `initialize` can re-resolve the interval
    /// once the client's initialization options are known.
    pub fn new(client: Client, engine: Engine, cli_debounce_ms: Option<u64>) -> Self {
        Self {
            client,
            documents_by_uri: Arc::new(DashMap::new()),
            serial_document_id: Arc::new(AtomicU32::new(0)),
            engine,
            cli_debounce_ms,
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub(super) fn next_document_id(&self) -> u32 {
        self.serial_document_id.fetch_add(1, Ordering::SeqCst)
    }

    /// Current text of an open document.
    pub(super) async fn document_text(&self, uri: &Url) -> Option<String> {
        let document = self.documents_by_uri.get(uri).map(|r| Arc::clone(r.value()));
        match document {
            Some(document) => Some(document.text().await),
            None => {
                debug!("Request for unknown document {}", uri);
                None
            }
        }
    }

    pub(super) fn document(&self, uri: &Url) -> Option<Arc<LspDocument>> {
        self.documents_by_uri.get(uri).map(|r| Arc::clone(r.value()))
    }
}
