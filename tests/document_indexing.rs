/// Integration tests for the per-document index
///
/// Tests verify:
/// - Local function collection (parameters, labels, declaration order)
/// - Core-type inference from literals, constructors and annotations
/// - Rule-category precedence when one identifier matches several rules

use indoc::indoc;
use script_language_server::index::{CoreType, DocumentIndex};

#[test]
fn test_realistic_script() {
    let text = indoc! {r#"
        enemies = []
        scores = {}
        seen = set()
        title = "Level 1"
        lookup: dict

        def spawn(kind, x, y):
            enemies.append(kind)

        def reset():
            scores.get("best", 0)
    "#};

    let index = DocumentIndex::build(text);

    assert_eq!(index.type_of("enemies"), CoreType::List);
    assert_eq!(index.type_of("scores"), CoreType::Dict);
    assert_eq!(index.type_of("seen"), CoreType::Set);
    assert_eq!(index.type_of("title"), CoreType::Str);
    assert_eq!(index.type_of("lookup"), CoreType::Dict);
    assert_eq!(index.type_of("kind"), CoreType::Unknown);

    let names: Vec<_> = index.functions.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["spawn", "reset"]);

    let spawn = index.function("spawn").unwrap();
    assert_eq!(spawn.params, vec!["kind", "x", "y"]);
    assert_eq!(spawn.label, "spawn(kind, x, y)");
    assert!(index.function("reset").unwrap().params.is_empty());
}

#[test]
fn test_indented_functions_are_not_local_functions() {
    let text = indoc! {r#"
        class Thing:
            def method(self):
                pass
    "#};
    assert!(DocumentIndex::build(text).function("method").is_none());
}

#[test]
fn test_rule_order_beats_source_order() {
    // Dict rules run after list rules, so the earlier dict assignment wins.
    let text = "x = {}\nx = []\n";
    assert_eq!(DocumentIndex::build(text).type_of("x"), CoreType::Dict);
}

#[test]
fn test_rebuild_is_idempotent() {
    let text = indoc! {r#"
        a = [1, 2]
        b: set
        def f(p, q):
            return p
    "#};
    assert_eq!(DocumentIndex::build(text), DocumentIndex::build(text));
}

#[test]
fn test_empty_and_degenerate_text() {
    assert!(DocumentIndex::build("").is_empty());
    assert!(DocumentIndex::build("\n\n   \n").is_empty());
    assert!(DocumentIndex::build("def (broken:\n= []\n").functions.is_empty());
}
