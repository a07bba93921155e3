//! Line-oriented extraction of the reference catalog.
//!
//! The reference source is a stub file in the scripting dialect: classes with
//! annotated members, top-level functions and module-level singleton
//! constants, each optionally followed by a docstring. The parser is a set of
//! independent line patterns, not a grammar; anything it does not recognise is
//! skipped.

use once_cell::sync::Lazy;
use regex::Regex;

use super::docstring::read_docstring;
use super::{Catalog, ClassEntry, ConstantEntry, FunctionEntry};
use crate::parsers::patterns::{indentation, is_blank};
use crate::parsers::split_params;

static CLASS_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^class\s+([A-Za-z_]\w*)\s*(?:\([^)]*\))?\s*:").expect("valid class pattern")
});

static MEMBER_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\s+)([A-Za-z_]\w*)\s*:\s*\S").expect("valid member pattern")
});

static METHOD_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\s+)def\s+([A-Za-z_]\w*)\s*\(").expect("valid method pattern")
});

static FUNCTION_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^def\s+([A-Za-z_]\w*)\s*\((.*)\)\s*(?:->\s*(.+?))?\s*:.*$")
        .expect("valid function pattern")
});

static CONSTANT_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z_]\w*)\s*=\s*[A-Za-z_][\w.]*\(").expect("valid constant pattern")
});

/// Scope state while walking a class body.
struct ClassScope {
    name: String,
    /// Indentation of the first body line; deeper lines belong to method bodies.
    body_indent: Option<usize>,
}

/// Parses the full reference text into a catalog.
///
/// Single pass: the line index only moves forward, jumping past a docstring
/// once it has been consumed.
pub fn parse_catalog(text: &str) -> Catalog {
    let lines: Vec<&str> = text.lines().collect();
    let mut catalog = Catalog::default();
    let mut scope: Option<ClassScope> = None;
    let mut index = 0;

    while index < lines.len() {
        let line = lines[index];

        if let Some(class) = scope.as_mut() {
            if is_blank(line) {
                index += 1;
                continue;
            }
            let indent = indentation(line);
            if indent == 0 {
                // Leaves the class; the same line is re-evaluated at top level.
                scope = None;
                continue;
            }
            let body_indent = *class.body_indent.get_or_insert(indent);
            if indent != body_indent {
                index += 1;
                continue;
            }

            if let Some(caps) = MEMBER_DECL.captures(line) {
                let (doc, next) = read_docstring(&lines, index + 1, indent);
                catalog.add_member(&class.name, &caps[2], doc);
                index = next.max(index + 1);
                continue;
            }

            if let Some(caps) = METHOD_DECL.captures(line) {
                let name = &caps[2];
                let (doc, next) = read_docstring(&lines, index + 1, indent + 1);
                if !is_dunder(name) {
                    catalog.add_member(&class.name, name, doc);
                }
                index = next.max(index + 1);
                continue;
            }

            index += 1;
            continue;
        }

        if let Some(caps) = CLASS_DECL.captures(line) {
            let name = caps[1].to_string();
            catalog.open_class(&name);
            scope = Some(ClassScope { name, body_indent: None });
            index += 1;
            continue;
        }

        if let Some(caps) = FUNCTION_DECL.captures(line) {
            let name = caps[1].to_string();
            let params_verbatim = caps[2].trim();
            let return_type = caps.get(3).map(|m| m.as_str().trim().to_string());
            let label = match &return_type {
                Some(ret) => format!("{}({}) -> {}", name, params_verbatim, ret),
                None => format!("{}({})", name, params_verbatim),
            };
            let (doc, next) = read_docstring(&lines, index + 1, 1);
            catalog.functions.insert(
                name.clone(),
                FunctionEntry {
                    name,
                    doc,
                    label,
                    params: split_params(params_verbatim),
                    return_type,
                },
            );
            index = next.max(index + 1);
            continue;
        }

        if let Some(caps) = CONSTANT_DECL.captures(line) {
            let name = caps[1].to_string();
            let (doc, next) = read_docstring(&lines, index + 1, 0);
            catalog.constants.insert(name.clone(), ConstantEntry { name, doc });
            index = next.max(index + 1);
            continue;
        }

        index += 1;
    }

    catalog
}

fn is_dunder(name: &str) -> bool {
    name.len() > 4 && name.starts_with("__") && name.ends_with("__")
}

impl Catalog {
    /// Registers a class; re-opening an existing class keeps its members.
    fn open_class(&mut self, name: &str) {
        self.classes
            .entry(name.to_string())
            .or_insert_with(|| ClassEntry {
                name: name.to_string(),
                members: Default::default(),
            });
    }

    fn add_member(&mut self, class: &str, member: &str, doc: Option<String>) {
        if let Some(entry) = self.classes.get_mut(class) {
            entry.members.insert(member.to_string(), doc);
        }
    }
}
