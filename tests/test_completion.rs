/// Integration tests for code completion
///
/// Tests verify:
/// - Container method completion driven by inferred types
/// - Catalog class member completion (case-insensitive, documented)
/// - Top-level tiers and their sort keys
/// - The auto-trigger watcher

use indoc::indoc;
use script_language_server::engine::Engine;
use script_language_server::catalog::Catalog;
use script_language_server::lsp::features::completion::{dot_insertion_point, sort_key};
use std::time::Duration;
use tower_lsp::lsp_types::{
    CompletionItem, CompletionItemKind, Documentation, Position, Range, TextDocumentContentChangeEvent,
};

const KEY: &str = "file:///tmp/completion.py";

fn engine() -> Engine {
    Engine::new(Catalog::bundled(), Duration::from_millis(300))
}

fn labels(items: &[CompletionItem]) -> Vec<&str> {
    items.iter().map(|i| i.label.as_str()).collect()
}

#[test]
fn test_list_variable_offers_list_methods() {
    let text = indoc! {r#"
        x = []
        x.append(1)
        x.
    "#};
    let items = engine().completion(KEY, text, Position::new(2, 2));

    assert_eq!(labels(&items), vec!["append", "extend", "insert", "pop"]);
    assert!(items.iter().all(|i| i.kind == Some(CompletionItemKind::METHOD)));
    assert_eq!(items[0].preselect, Some(true));
    assert!(items[1..].iter().all(|i| i.preselect != Some(true)));

    let keys: Vec<_> = items.iter().filter_map(|i| i.sort_text.clone()).collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
}

#[test]
fn test_annotated_dict_offers_one_method() {
    let text = "y: dict\ny.";
    let items = engine().completion(KEY, text, Position::new(1, 2));
    assert_eq!(labels(&items), vec!["get"]);
    assert_eq!(items[0].preselect, Some(true));
}

#[test]
fn test_set_methods() {
    let text = "tags = set()\ntags.";
    let items = engine().completion(KEY, text, Position::new(1, 5));
    assert_eq!(labels(&items), vec!["add", "discard"]);
}

#[test]
fn test_catalog_class_members() {
    let text = "sprite.";
    let items = engine().completion(KEY, text, Position::new(0, 7));

    assert_eq!(labels(&items), vec!["position", "visible", "tint", "move", "hide"]);
    assert_eq!(items[0].preselect, Some(true));
    assert_eq!(
        items[1].documentation,
        Some(Documentation::String("Whether the sprite is drawn".to_string()))
    );
    assert!(items[2].documentation.is_none());
}

#[test]
fn test_top_level_completion_tiers() {
    let text = indoc! {r#"
        def spawn(kind):
            pass

    "#};
    let items = engine().completion(KEY, text, Position::new(2, 0));

    assert_eq!(items[0].label, "spawn");
    assert_eq!(items[0].sort_text.as_deref(), Some(sort_key(0, 0).as_str()));

    let class_labels: Vec<_> = items
        .iter()
        .filter(|i| i.kind == Some(CompletionItemKind::CLASS))
        .map(|i| i.label.as_str())
        .collect();
    assert_eq!(class_labels, vec!["Vector", "Color", "Sprite", "Timer"]);

    let last = items.last().unwrap();
    assert_eq!(last.label, "clock");
    assert_eq!(last.kind, Some(CompletionItemKind::CONSTANT));
    assert_eq!(last.sort_text.as_deref(), Some("30002"));

    // 1 local function + 4 classes + 6 functions + 3 constants
    assert_eq!(items.len(), 14);
}

#[test]
fn test_completion_reads_cached_index() {
    let engine = engine();
    engine.open_document(KEY, "x = []\n");

    // The cached index was built from the opened text; a query does not rebuild it.
    let items = engine.completion(KEY, "x = {}\nx.", Position::new(1, 2));
    assert_eq!(labels(&items), vec!["append", "extend", "insert", "pop"]);
    assert_eq!(engine.indexes().stats().builds, 1);
}

#[test]
fn test_watcher_triggers_after_class_name() {
    let engine = engine();
    let change = TextDocumentContentChangeEvent {
        range: Some(Range::new(Position::new(0, 10), Position::new(0, 10))),
        range_length: None,
        text: ".".to_string(),
    };
    let position = dot_insertion_point(&[change]).unwrap();
    assert_eq!(position, Position::new(0, 11));

    assert!(engine.should_trigger_suggest("v = Vector."));
    assert!(engine.should_trigger_suggest("v = color."));
    assert!(!engine.should_trigger_suggest("v = Vectors."));
    assert!(!engine.should_trigger_suggest("items."));
}
