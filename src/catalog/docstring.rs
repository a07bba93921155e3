//! Docstring extraction for the reference catalog.

use crate::parsers::patterns::{indentation, is_blank};

const DELIMITERS: [&str; 2] = ["\"\"\"", "'''"];

/// Reads the docstring that may follow a declaration.
///
/// Scanning starts at `start` and skips blank lines. The first non-blank line
/// must be indented by at least `min_indent` characters and begin with a
/// triple-quote delimiter, otherwise there is no docstring.
///
/// Returns the documentation (if any) and the index of the line where scanning
/// should resume. When no docstring is found the resume index is `start`, so
/// the caller re-examines those lines.
pub fn read_docstring(lines: &[&str], start: usize, min_indent: usize) -> (Option<String>, usize) {
    let mut index = start;
    while index < lines.len() && is_blank(lines[index]) {
        index += 1;
    }
    let Some(first) = lines.get(index) else {
        return (None, start);
    };
    if indentation(first) < min_indent {
        return (None, start);
    }

    let opener = first.trim_start();
    let Some(delimiter) = DELIMITERS.iter().copied().find(|d| opener.starts_with(d)) else {
        return (None, start);
    };
    let rest = &opener[delimiter.len()..];

    if let Some(end) = rest.find(delimiter) {
        return (non_empty(rest[..end].trim()), index + 1);
    }

    let mut collected = Vec::new();
    if !is_blank(rest) {
        collected.push(rest.trim());
    }

    for (offset, line) in lines[index + 1..].iter().enumerate() {
        let content = line.trim_start();
        if let Some(end) = content.find(delimiter) {
            collected.push(&content[..end]);
            return (non_empty(collected.join("\n").trim()), index + offset + 2);
        }
        collected.push(content);
    }

    // Unterminated block: everything to the end of the text is documentation.
    (non_empty(collected.join("\n").trim()), lines.len())
}

fn non_empty(text: &str) -> Option<String> {
    if text.is_empty() { None } else { Some(text.to_string()) }
}
