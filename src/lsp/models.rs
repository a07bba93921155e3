use ropey::Rope;

/// State for an open text document managed by the LSP server.
/// Documents are keyed by URI in the backend's store.
#[derive(Debug)]
pub struct LspDocumentState {
    pub text: Rope,
    pub version: i32,
}

/// LSP document with state for open files.
#[derive(Debug)]
pub struct LspDocument {
    pub id: u32,
    pub state: tokio::sync::RwLock<LspDocumentState>,
}
