//! Host-facing facade over the catalog, the index manager and the providers.
//!
//! The LSP backend drives an `Engine`; hosts that do not speak LSP can use it
//! directly with any string as the document key.

use std::sync::Arc;
use std::time::Duration;

use tower_lsp::lsp_types::{CompletionItem, Hover, Position, SignatureHelp};

use crate::catalog::Catalog;
use crate::lsp::backend::index_manager::IndexManager;
use crate::lsp::features::{completion, hover, signature_help};

#[derive(Debug, Clone)]
pub struct Engine {
    catalog: Arc<Catalog>,
    indexes: Arc<IndexManager>,
}

impl Engine {
    pub fn new(catalog: Catalog, debounce: Duration) -> Self {
        Self::with_catalog(Arc::new(catalog), debounce)
    }

    pub fn with_catalog(catalog: Arc<Catalog>, debounce: Duration) -> Self {
        Self {
            catalog,
            indexes: Arc::new(IndexManager::new(debounce)),
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn indexes(&self) -> &Arc<IndexManager> {
        &self.indexes
    }

    /// Document switch (open or focus).
    pub fn open_document(&self, key: &str, text: &str) {
        self.indexes.activate(key, text);
    }

    /// Content change; the index catches up after the debounce interval.
    pub fn document_changed(&self, key: &str, text: String) {
        self.indexes.notify_change(key, text);
    }

    pub fn close_document(&self, key: &str) {
        self.indexes.evict(key);
    }

    pub fn completion(&self, key: &str, text: &str, position: Position) -> Vec<CompletionItem> {
        let index = self.indexes.get_or_build(key, text);
        completion::complete(&self.catalog, &index, text, position)
    }

    pub fn hover(&self, text: &str, position: Position) -> Option<Hover> {
        hover::hover(&self.catalog, text, position)
    }

    pub fn signature_help(&self, key: &str, text: &str, position: Position) -> Option<SignatureHelp> {
        let index = self.indexes.get_or_build(key, text);
        signature_help::signature_help(&self.catalog, &index, text, position)
    }

    /// Whether `line_prefix` (the line up to the cursor) ends in `ClassName.`.
    pub fn should_trigger_suggest(&self, line_prefix: &str) -> bool {
        completion::should_trigger_suggest(&self.catalog, line_prefix)
    }
}
