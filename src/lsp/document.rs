use ropey::{Rope, RopeSlice};

use tower_lsp::lsp_types::{Position, TextDocumentContentChangeEvent};

use crate::error::DocumentError;

pub use crate::lsp::models::{LspDocument, LspDocumentState};

/// Converts an LSP position to a char index in the Rope, clamped to the text.
/// A column past the end of a line lands before that line's terminator.
fn position_to_char_index(position: &Position, text: &Rope) -> usize {
    let line = (position.line as usize).min(text.len_lines().saturating_sub(1));
    let line_start = text.line_to_char(line);
    line_start + (position.character as usize).min(line_content_len(text.line(line)))
}

/// Length of a line in chars, excluding a trailing `\n` or `\r\n`.
fn line_content_len(line: RopeSlice<'_>) -> usize {
    let mut len = line.len_chars();
    if len > 0 && line.char(len - 1) == '\n' {
        len -= 1;
        if len > 0 && line.char(len - 1) == '\r' {
            len -= 1;
        }
    }
    len
}

impl LspDocumentState {
    pub fn new(text: &str, version: i32) -> Self {
        Self {
            text: Rope::from_str(text),
            version,
        }
    }

    /// Applies a list of content changes in order. Ranged changes edit the rope
    /// in place; a change without a range replaces the whole text.
    pub fn apply(
        &mut self,
        changes: &[TextDocumentContentChangeEvent],
        version: i32,
    ) -> Result<String, DocumentError> {
        if version <= self.version {
            return Err(DocumentError::StaleVersion { version, current: self.version });
        }
        for change in changes {
            if let Some(range) = change.range {
                let start = position_to_char_index(&range.start, &self.text);
                let end = position_to_char_index(&range.end, &self.text).max(start);
                self.text.remove(start..end);
                self.text.insert(start, &change.text);
            } else {
                self.text = Rope::from_str(&change.text);
            }
        }
        self.version = version;
        Ok(self.text.to_string())
    }
}

impl LspDocument {
    pub fn new(id: u32, text: &str, version: i32) -> Self {
        Self {
            id,
            state: tokio::sync::RwLock::new(LspDocumentState::new(text, version)),
        }
    }

    /// Returns the current text of the document as a string.
    pub async fn text(&self) -> String {
        self.state.read().await.text.to_string()
    }

    /// Returns the current version of the document.
    pub async fn version(&self) -> i32 {
        self.state.read().await.version
    }

    /// Returns the number of lines in the document.
    pub async fn num_lines(&self) -> usize {
        self.state.read().await.text.len_lines()
    }

    /// Applies changes to the document, returning the new text.
    pub async fn apply(
        &self,
        changes: &[TextDocumentContentChangeEvent],
        version: i32,
    ) -> Result<String, DocumentError> {
        let mut state = self.state.write().await;
        state.apply(changes, version)
    }
}
