//! Auto-trigger watcher: decides when typing `.` after a catalog class name
//! should pop the completion list open without an explicit request.

use serde::{Deserialize, Serialize};
use tower_lsp::lsp_types::notification::Notification;
use tower_lsp::lsp_types::{Position, TextDocumentContentChangeEvent, Url};

use crate::catalog::Catalog;
use crate::parsers::patterns::is_identifier_char;

/// Server → client request to open the completion list at a position.
#[derive(Debug)]
pub enum TriggerSuggest {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerSuggestParams {
    pub uri: Url,
    pub position: Position,
}

impl Notification for TriggerSuggest {
    type Params = TriggerSuggestParams;
    const METHOD: &'static str = "script/triggerSuggest";
}

/// Cursor position after the most recent change, if that change inserted
/// exactly one `.` through a ranged (incremental) edit.
pub fn dot_insertion_point(changes: &[TextDocumentContentChangeEvent]) -> Option<Position> {
    let last = changes.last()?;
    if last.text != "." {
        return None;
    }
    let range = last.range?;
    let character = range.start.character.checked_add(1)?;
    Some(Position::new(range.start.line, character))
}

/// Whether the line up to the cursor ends in `ClassName.` for a catalog class
/// (case-insensitive, whole word).
pub fn should_trigger_suggest(catalog: &Catalog, line_prefix: &str) -> bool {
    let Some(before_dot) = line_prefix.strip_suffix('.') else {
        return false;
    };
    let word_start = before_dot
        .char_indices()
        .rev()
        .take_while(|(_, c)| is_identifier_char(*c))
        .last()
        .map(|(i, _)| i);
    let Some(word_start) = word_start else {
        return false;
    };
    let word = &before_dot[word_start..];
    if word.starts_with(|c: char| c.is_ascii_digit()) {
        return false;
    }
    catalog.class(word).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tower_lsp::lsp_types::Range;

    fn catalog() -> Catalog {
        Catalog::parse("class Vector:\n    length: float\n")
    }

    fn change(range: Option<Range>, text: &str) -> TextDocumentContentChangeEvent {
        TextDocumentContentChangeEvent {
            range,
            range_length: None,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_dot_after_class_name_triggers() {
        assert!(should_trigger_suggest(&catalog(), "v = Vector."));
        assert!(should_trigger_suggest(&catalog(), "    vector."));
    }

    #[test]
    fn test_partial_word_does_not_trigger() {
        assert!(!should_trigger_suggest(&catalog(), "MyVector."));
        assert!(!should_trigger_suggest(&catalog(), "Vect."));
        assert!(!should_trigger_suggest(&catalog(), "Vector"));
        assert!(!should_trigger_suggest(&catalog(), "."));
    }

    #[test]
    fn test_dot_insertion_point() {
        let range = Range::new(Position::new(3, 6), Position::new(3, 6));
        assert_eq!(
            dot_insertion_point(&[change(Some(range), ".")]),
            Some(Position::new(3, 7))
        );
        assert_eq!(dot_insertion_point(&[change(Some(range), "..")]), None);
        assert_eq!(dot_insertion_point(&[change(None, ".")]), None);
        assert_eq!(dot_insertion_point(&[]), None);
    }

    #[test]
    fn test_dot_at_largest_column_is_ignored() {
        let range = Range::new(Position::new(0, u32::MAX), Position::new(0, u32::MAX));
        assert_eq!(dot_insertion_point(&[change(Some(range), ".")]), None);
    }

    #[test]
    fn test_only_most_recent_change_counts() {
        let range = Range::new(Position::new(0, 0), Position::new(0, 0));
        let changes = [change(Some(range), "."), change(Some(range), "x")];
        assert_eq!(dot_insertion_point(&changes), None);
    }
}
