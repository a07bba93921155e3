//! Conversions between LSP-style (line, character) positions and slices of
//! document text.
//!
//! Columns are counted in `char`s. That is the `utf-32` position encoding,
//! which `initialize` selects whenever the client offers it. Under the UTF-16
//! default a character outside the BMP counts as one column here and two on
//! the client, so positions after it on the same line drift by one.
//!
//! All functions clamp out-of-range positions
//! to the nearest valid boundary instead of failing, since a query position
//! may refer to a snapshot the server has not caught up with yet.

use tower_lsp::lsp_types::Position;

use super::patterns::is_identifier_char;

/// Returns the given line without its terminator, or `None` past the last line.
pub fn line_at(text: &str, line: u32) -> Option<&str> {
    text.split('\n')
        .nth(line as usize)
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
}

/// Byte offset of a char column within a single line (clamped to the line end).
pub fn column_to_byte(line: &str, column: usize) -> usize {
    line.char_indices()
        .nth(column)
        .map(|(byte, _)| byte)
        .unwrap_or(line.len())
}

/// The part of the cursor's line that precedes the cursor.
pub fn line_prefix(text: &str, position: Position) -> &str {
    match line_at(text, position.line) {
        Some(line) => &line[..column_to_byte(line, position.character as usize)],
        None => "",
    }
}

/// Absolute byte offset of a position within the whole text (clamped).
pub fn position_to_offset(text: &str, position: Position) -> usize {
    let mut offset = 0;
    for (index, line) in text.split('\n').enumerate() {
        if index == position.line as usize {
            let content = line.strip_suffix('\r').unwrap_or(line);
            return offset + column_to_byte(content, position.character as usize);
        }
        offset += line.len() + 1;
    }
    text.len()
}

/// All text from the start of the document up to the cursor.
pub fn text_before(text: &str, position: Position) -> &str {
    &text[..position_to_offset(text, position).min(text.len())]
}

/// Char-column span `[start, end)` of the identifier touching `column`.
///
/// A cursor sitting just after the last character of a word still counts as
/// touching it.
pub fn word_span_at(line: &str, column: usize) -> Option<(usize, usize)> {
    let chars: Vec<char> = line.chars().collect();
    let column = column.min(chars.len());

    let mut start = column;
    while start > 0 && is_identifier_char(chars[start - 1]) {
        start -= 1;
    }
    let mut end = column;
    while end < chars.len() && is_identifier_char(chars[end]) {
        end += 1;
    }

    if start == end { None } else { Some((start, end)) }
}

/// Substring of a line between two char columns.
pub fn slice_columns(line: &str, start: usize, end: usize) -> &str {
    &line[column_to_byte(line, start)..column_to_byte(line, end)]
}
