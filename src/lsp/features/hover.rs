//! Hover tooltips for catalog vocabulary
//!
//! Resolution order:
//! 1. a `Class.member` token covering the cursor (both halves matched
//!    case-insensitively against the catalog);
//! 2. the bare word under the cursor as a catalog function;
//! 3. the bare word under the cursor as a catalog constant.

use once_cell::sync::Lazy;
use regex::Regex;
use tower_lsp::lsp_types::{Hover, HoverContents, LanguageString, MarkedString, Position, Range};
use tracing::debug;

use crate::catalog::Catalog;
use crate::parsers::position_utils::{line_at, slice_columns, word_span_at};

/// Language tag used to highlight the hovered signature.
pub const HOVER_LANGUAGE: &str = "python";

static QUALIFIED_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z_]\w*\.[A-Za-z_]\w*").expect("valid qualified name pattern")
});

/// Answers a hover query; `None` means "no hover information".
pub fn hover(catalog: &Catalog, text: &str, position: Position) -> Option<Hover> {
    let line = line_at(text, position.line)?;
    let column = position.character as usize;

    if let Some(hover) = hover_member(catalog, line, position.line, column) {
        return Some(hover);
    }

    let (start, end) = word_span_at(line, column)?;
    let word = slice_columns(line, start, end);
    let range = span_range(position.line, start, end);

    if let Some(function) = catalog.function(word) {
        debug!("Hover on catalog function '{}'", word);
        return Some(build_hover(format!("{}()", function.name), function.doc.as_deref(), range));
    }

    if let Some(constant) = catalog.constant(word) {
        debug!("Hover on catalog constant '{}'", word);
        return Some(build_hover(constant.name.clone(), constant.doc.as_deref(), range));
    }

    None
}

/// Resolves the `Class.member` token whose span contains `column`.
fn hover_member(catalog: &Catalog, line: &str, line_number: u32, column: usize) -> Option<Hover> {
    let token = QUALIFIED_NAME.find_iter(line).find_map(|m| {
        let start = line[..m.start()].chars().count();
        let end = start + m.as_str().chars().count();
        (start <= column && column <= end).then_some((m.as_str(), start, end))
    })?;
    let (qualified, start, end) = token;

    let (class_name, member_name) = qualified.split_once('.')?;
    let class = catalog.class(class_name)?;
    let (member, doc) = class.member(member_name)?;

    debug!("Hover on member {}.{}", class.name, member);
    Some(build_hover(
        format!("{}.{}", class.name, member),
        doc,
        span_range(line_number, start, end),
    ))
}

fn span_range(line: u32, start: usize, end: usize) -> Range {
    Range::new(Position::new(line, start as u32), Position::new(line, end as u32))
}

fn build_hover(signature: String, doc: Option<&str>, range: Range) -> Hover {
    let mut contents = vec![MarkedString::LanguageString(LanguageString {
        language: HOVER_LANGUAGE.to_string(),
        value: signature,
    })];
    if let Some(doc) = doc {
        contents.push(MarkedString::String(doc.to_string()));
    }
    Hover {
        contents: HoverContents::Array(contents),
        range: Some(range),
    }
}

/// Display lines of a hover, in order (signature first, then documentation).
pub fn hover_lines(hover: &Hover) -> Vec<String> {
    match &hover.contents {
        HoverContents::Array(items) => items.iter().map(marked_string_text).collect(),
        HoverContents::Scalar(item) => vec![marked_string_text(item)],
        HoverContents::Markup(markup) => vec![markup.value.clone()],
    }
}

fn marked_string_text(item: &MarkedString) -> String {
    match item {
        MarkedString::String(text) => text.clone(),
        MarkedString::LanguageString(ls) => ls.value.clone(),
    }
}
