//! Code completion
//!
//! Two branches:
//! - member access (`name.partial`): container methods when `name` has an
//!   inferred list/dict/set type, otherwise the members of a catalog class
//!   whose name matches `name` case-insensitively;
//! - top level: local functions, catalog classes, catalog functions and
//!   catalog constants, in that tier order.
//!
//! Every item carries an explicit sort key so the editor's own sorting keeps
//! the declared order.

pub mod trigger;
pub mod type_methods;

use once_cell::sync::Lazy;
use regex::Regex;
use tower_lsp::lsp_types::{CompletionItem, CompletionItemKind, Documentation, Position};
use tracing::debug;

use crate::catalog::Catalog;
use crate::index::DocumentIndex;
use crate::parsers::position_utils::line_prefix;

pub use trigger::{dot_insertion_point, should_trigger_suggest};
pub use type_methods::{MethodInfo, find_method, get_type_methods};

static MEMBER_ACCESS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([A-Za-z_]\w*)\.(\w*)$").expect("valid member access pattern")
});

/// Tier of a top-level completion item; lower tiers sort first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CompletionTier {
    LocalFunction = 0,
    Class = 1,
    Function = 2,
    Constant = 3,
}

/// Sort key that keeps `position` order within a tier and tier order overall.
pub fn sort_key(tier: u8, position: usize) -> String {
    format!("{}{:04}", tier, position)
}

/// Answers a completion query at `position` in `text`.
pub fn complete(
    catalog: &Catalog,
    index: &DocumentIndex,
    text: &str,
    position: Position,
) -> Vec<CompletionItem> {
    let prefix = line_prefix(text, position);

    if let Some(caps) = MEMBER_ACCESS.captures(prefix) {
        let target = &caps[1];
        let items = member_completions(catalog, index, target);
        if !items.is_empty() {
            debug!("Member completion on '{}': {} items", target, items.len());
            return items;
        }
        debug!("No members for '{}', falling back to top-level completion", target);
    }

    top_level_completions(catalog, index)
}

/// Completions after `target.`; empty when `target` resolves to nothing.
pub fn member_completions(catalog: &Catalog, index: &DocumentIndex, target: &str) -> Vec<CompletionItem> {
    let core_type = index.type_of(target);
    if core_type.is_container() {
        return get_type_methods(core_type)
            .iter()
            .enumerate()
            .map(|(position, method)| CompletionItem {
                label: method.name.to_string(),
                kind: Some(CompletionItemKind::METHOD),
                detail: Some(method.label.to_string()),
                documentation: method.doc.map(|doc| Documentation::String(doc.to_string())),
                insert_text: Some(method.name.to_string()),
                sort_text: Some(sort_key(0, position)),
                preselect: (position == 0).then_some(true),
                ..Default::default()
            })
            .collect();
    }

    let Some(class) = catalog.class(target) else {
        return Vec::new();
    };

    class
        .members
        .iter()
        .enumerate()
        .map(|(position, (member, doc))| CompletionItem {
            label: member.clone(),
            kind: Some(CompletionItemKind::FIELD),
            detail: Some(format!("{}.{}", class.name, member)),
            documentation: doc.clone().map(Documentation::String),
            insert_text: Some(member.clone()),
            sort_text: Some(sort_key(0, position)),
            preselect: (position == 0).then_some(true),
            ..Default::default()
        })
        .collect()
}

/// The four top-level tiers, each in its own declaration order.
pub fn top_level_completions(catalog: &Catalog, index: &DocumentIndex) -> Vec<CompletionItem> {
    let mut items = Vec::new();

    for (position, (name, function)) in index.functions.iter().enumerate() {
        items.push(CompletionItem {
            label: name.clone(),
            kind: Some(CompletionItemKind::FUNCTION),
            detail: Some(function.label.clone()),
            insert_text: Some(name.clone()),
            sort_text: Some(sort_key(CompletionTier::LocalFunction as u8, position)),
            ..Default::default()
        });
    }

    for (position, class) in catalog.classes().enumerate() {
        items.push(CompletionItem {
            label: class.name.clone(),
            kind: Some(CompletionItemKind::CLASS),
            detail: Some("class".to_string()),
            insert_text: Some(class.name.clone()),
            sort_text: Some(sort_key(CompletionTier::Class as u8, position)),
            ..Default::default()
        });
    }

    for (position, function) in catalog.functions().enumerate() {
        items.push(CompletionItem {
            label: function.name.clone(),
            kind: Some(CompletionItemKind::FUNCTION),
            detail: Some(function.label.clone()),
            documentation: function.doc.clone().map(Documentation::String),
            insert_text: Some(function.name.clone()),
            sort_text: Some(sort_key(CompletionTier::Function as u8, position)),
            ..Default::default()
        });
    }

    for (position, constant) in catalog.constants().enumerate() {
        items.push(CompletionItem {
            label: constant.name.clone(),
            kind: Some(CompletionItemKind::CONSTANT),
            documentation: constant.doc.clone().map(Documentation::String),
            insert_text: Some(constant.name.clone()),
            sort_text: Some(sort_key(CompletionTier::Constant as u8, position)),
            ..Default::default()
        });
    }

    items
}
