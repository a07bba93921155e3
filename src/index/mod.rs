//! Per-document structural index: local function declarations and the core
//! types inferred for variables.
//!
//! An index is always built from one full snapshot of a document's text and is
//! never patched afterwards; the index manager swaps in a fresh one instead.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use indexmap::IndexMap;
use tracing::warn;

pub mod indexer;

pub use indexer::index_document;

/// The small fixed set of types used to target method completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CoreType {
    List,
    Dict,
    Set,
    Str,
    #[default]
    Unknown,
}

impl CoreType {
    /// Parses the annotation spelling (`list`, `dict`, `set`, `str`).
    pub fn from_annotation(name: &str) -> Self {
        match name {
            "list" => CoreType::List,
            "dict" => CoreType::Dict,
            "set" => CoreType::Set,
            "str" => CoreType::Str,
            _ => CoreType::Unknown,
        }
    }

    /// Whether the static method table has entries for this type.
    pub fn is_container(self) -> bool {
        matches!(self, CoreType::List | CoreType::Dict | CoreType::Set)
    }
}

impl fmt::Display for CoreType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CoreType::List => "list",
            CoreType::Dict => "dict",
            CoreType::Set => "set",
            CoreType::Str => "str",
            CoreType::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// A function declared in the document itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFunction {
    pub params: Vec<String>,
    /// `name(paramsVerbatim)`
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentIndex {
    pub variables: IndexMap<String, CoreType>,
    pub functions: IndexMap<String, LocalFunction>,
}

impl DocumentIndex {
    /// Builds an index from a document snapshot. A panic inside the pattern
    /// rules degrades to an empty index rather than reaching the caller.
    pub fn build(text: &str) -> Self {
        match panic::catch_unwind(AssertUnwindSafe(|| index_document(text))) {
            Ok(index) => index,
            Err(_) => {
                warn!("Document indexer panicked; using an empty index");
                Self::default()
            }
        }
    }

    /// Inferred type of an identifier; absent identifiers are `Unknown`.
    pub fn type_of(&self, identifier: &str) -> CoreType {
        self.variables.get(identifier).copied().unwrap_or_default()
    }

    pub fn function(&self, name: &str) -> Option<&LocalFunction> {
        self.functions.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty() && self.functions.is_empty()
    }
}
