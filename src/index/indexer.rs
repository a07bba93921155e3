//! Lexical declaration rules for document indexing.
//!
//! Each rule is an independent regular expression run over the whole text.
//! Rule categories are applied in a fixed order (annotations, then list, dict,
//! set and str assignments) and a later match for the same identifier
//! replaces an earlier one. Precedence therefore follows rule order rather
//! than source-line order: `x = []` followed by `x = "s"` ends up `Str`, and so
//! does `x = "s"` followed by `x = []`.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{CoreType, DocumentIndex, LocalFunction};
use crate::parsers::split_params;

static FUNCTION_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^def[ \t]+([A-Za-z_]\w*)[ \t]*\(([^)]*)\)").expect("valid function pattern")
});

static ANNOTATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*([A-Za-z_]\w*)[ \t]*:[ \t]*(list|dict|set|str)\b")
        .expect("valid annotation pattern")
});

/// Words that can precede `:` or `=` at line start without being variables.
const KEYWORDS: &[&str] = &[
    "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del", "elif",
    "else", "except", "finally", "for", "from", "global", "if", "import", "in", "is", "lambda",
    "nonlocal", "not", "or", "pass", "raise", "return", "try", "while", "with", "yield",
];

/// A group of assignment patterns that all imply the same core type.
struct TypeRule {
    core_type: CoreType,
    description: &'static str,
    patterns: Vec<Regex>,
}

impl TypeRule {
    fn new(core_type: CoreType, description: &'static str, right_hand_sides: &[&str]) -> Self {
        let patterns = right_hand_sides
            .iter()
            .map(|rhs| {
                Regex::new(&format!(r"(?m)^[ \t]*([A-Za-z_]\w*)[ \t]*=[ \t]*{}", rhs))
                    .expect("valid assignment pattern")
            })
            .collect();
        Self { core_type, description, patterns }
    }
}

/// Assignment rules in application order.
static TYPE_RULES: Lazy<Vec<TypeRule>> = Lazy::new(|| {
    vec![
        TypeRule::new(CoreType::List, "list literal or constructor", &[r"\[", r"list\("]),
        TypeRule::new(
            CoreType::Dict,
            "dict literal or constructor",
            &[r"\{[ \t]*\}", r"\{[^}]*:", r"dict\("],
        ),
        TypeRule::new(CoreType::Set, "set constructor", &[r"set\("]),
        TypeRule::new(
            CoreType::Str,
            "string literal or constructor",
            &[r#"[fFrRuU]?["']"#, r"str\("],
        ),
    ]
});

fn is_keyword(identifier: &str) -> bool {
    KEYWORDS.contains(&identifier)
}

/// Runs every declaration rule over `text` and merges the results.
pub fn index_document(text: &str) -> DocumentIndex {
    let mut index = DocumentIndex::default();

    for caps in FUNCTION_DECL.captures_iter(text) {
        let name = caps[1].to_string();
        let params_verbatim = caps[2].trim();
        let label = format!("{}({})", name, params_verbatim);
        index.functions.insert(
            name,
            LocalFunction {
                params: split_params(params_verbatim),
                label,
            },
        );
    }

    for caps in ANNOTATION.captures_iter(text) {
        let name = &caps[1];
        if is_keyword(name) {
            continue;
        }
        index
            .variables
            .insert(name.to_string(), CoreType::from_annotation(&caps[2]));
    }

    for rule in TYPE_RULES.iter() {
        for pattern in &rule.patterns {
            for caps in pattern.captures_iter(text) {
                let name = &caps[1];
                if is_keyword(name) {
                    continue;
                }
                tracing::trace!("{} is {} ({})", name, rule.core_type, rule.description);
                index.variables.insert(name.to_string(), rule.core_type);
            }
        }
    }

    index
}
