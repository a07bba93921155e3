/// Integration tests for signature help

use indoc::indoc;
use script_language_server::catalog::Catalog;
use script_language_server::engine::Engine;
use script_language_server::lsp::features::signature_help::active_parameter;
use std::time::Duration;
use tower_lsp::lsp_types::{Documentation, ParameterLabel, Position, SignatureHelp};

const KEY: &str = "file:///tmp/signature.py";

fn engine() -> Engine {
    Engine::new(Catalog::bundled(), Duration::from_millis(300))
}

fn help_at_end(engine: &Engine, text: &str) -> Option<SignatureHelp> {
    let lines: Vec<&str> = text.split('\n').collect();
    let line = (lines.len() - 1) as u32;
    let character = lines[lines.len() - 1].chars().count() as u32;
    engine.signature_help(KEY, text, Position::new(line, character))
}

#[test]
fn test_active_parameter_for_three_parameter_function() {
    let engine = engine();
    let cases = [("clamp(a, b, ", 2), ("clamp(", 0), ("clamp(a, b, c, d", 2), ("clamp(x", 0)];

    for (text, expected) in cases {
        let help = help_at_end(&engine, text).unwrap_or_else(|| panic!("no help for {:?}", text));
        assert_eq!(help.active_parameter, Some(expected), "text {:?}", text);
        assert_eq!(help.active_signature, Some(0));
        assert_eq!(help.signatures.len(), 1);
    }
}

#[test]
fn test_catalog_signature_contents() {
    let help = help_at_end(&engine(), "d = distance(").unwrap();
    let signature = &help.signatures[0];

    assert_eq!(signature.label, "distance(a: Vector, b: Vector) -> float");
    assert_eq!(
        signature.documentation,
        Some(Documentation::String("Euclidean distance between two points.".to_string()))
    );
    let params: Vec<_> = signature
        .parameters
        .iter()
        .flatten()
        .map(|p| match &p.label {
            ParameterLabel::Simple(label) => label.clone(),
            ParameterLabel::LabelOffsets(_) => panic!("expected simple labels"),
        })
        .collect();
    assert_eq!(params, vec!["a: Vector", "b: Vector"]);
}

#[test]
fn test_container_method_signature() {
    let text = indoc! {r#"
        lookup = dict()
        lookup.get("k", "#};
    let help = help_at_end(&engine(), text).unwrap();
    assert_eq!(help.signatures[0].label, "get(key, default)");
    assert_eq!(help.active_parameter, Some(1));
}

#[test]
fn test_local_function_signature() {
    let text = indoc! {r#"
        def spawn(kind, x, y):
            pass

        spawn("orc", 3, "#};
    let help = help_at_end(&engine(), text).unwrap();
    assert_eq!(help.signatures[0].label, "spawn(kind, x, y)");
    assert_eq!(help.active_parameter, Some(2));
}

#[test]
fn test_call_spanning_lines() {
    let help = help_at_end(&engine(), "clamp(value,\n      low,\n      ").unwrap();
    assert_eq!(help.active_parameter, Some(2));
}

#[test]
fn test_no_signature_outside_calls() {
    let engine = engine();
    assert!(help_at_end(&engine, "x = 1").is_none());
    assert!(help_at_end(&engine, "clamp(1, 2, 3)").is_none());
    assert!(help_at_end(&engine, "unknown(").is_none());
}

#[test]
fn test_active_parameter_helper() {
    assert_eq!(active_parameter("", 0), 0);
    assert_eq!(active_parameter("a, b", 0), 0);
    assert_eq!(active_parameter("a, b", 5), 2);
}
