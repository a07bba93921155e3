//! The static API catalog of the scripting dialect.
//!
//! The catalog is parsed once from an annotated reference source and then
//! shared read-only (`Arc<Catalog>`) by every query. All maps keep declaration
//! order, which is the order completion lists present them in.

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::error::CatalogError;

pub mod docstring;
pub mod parser;

pub use parser::parse_catalog;

/// Reference source compiled into the binary, used when no file is given.
pub const BUNDLED_REFERENCE: &str = include_str!("../../assets/reference.pyi");

/// A class and its documented members.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassEntry {
    pub name: String,
    /// Member name → documentation, in declaration order.
    pub members: IndexMap<String, Option<String>>,
}

impl ClassEntry {
    /// Case-insensitive member lookup returning the canonical member name.
    pub fn member(&self, name: &str) -> Option<(&str, Option<&str>)> {
        if let Some((key, doc)) = self.members.get_key_value(name) {
            return Some((key.as_str(), doc.as_deref()));
        }
        self.members
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(key, doc)| (key.as_str(), doc.as_deref()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionEntry {
    pub name: String,
    pub doc: Option<String>,
    /// Rendered signature, e.g. `clamp(value: float, low: float, high: float) -> float`.
    pub label: String,
    pub params: Vec<String>,
    pub return_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantEntry {
    pub name: String,
    pub doc: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub(crate) classes: IndexMap<String, ClassEntry>,
    pub(crate) functions: IndexMap<String, FunctionEntry>,
    pub(crate) constants: IndexMap<String, ConstantEntry>,
}

impl Catalog {
    /// Parses reference text. Never fails: a panic inside the parser degrades
    /// to an empty catalog.
    pub fn parse(text: &str) -> Self {
        match panic::catch_unwind(AssertUnwindSafe(|| parse_catalog(text))) {
            Ok(catalog) => {
                debug!(
                    "Parsed catalog: {} classes, {} functions, {} constants",
                    catalog.classes.len(),
                    catalog.functions.len(),
                    catalog.constants.len()
                );
                catalog
            }
            Err(_) => {
                warn!("Catalog parser panicked; continuing with an empty catalog");
                Self::default()
            }
        }
    }

    /// Parses the reference source compiled into the binary.
    pub fn bundled() -> Self {
        Self::parse(BUNDLED_REFERENCE)
    }

    /// Reads and parses a reference file from disk.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&text))
    }

    /// Case-insensitive class lookup; an exact-case match wins.
    pub fn class(&self, name: &str) -> Option<&ClassEntry> {
        self.classes.get(name).or_else(|| {
            self.classes
                .values()
                .find(|class| class.name.eq_ignore_ascii_case(name))
        })
    }

    pub fn function(&self, name: &str) -> Option<&FunctionEntry> {
        self.functions.get(name)
    }

    pub fn constant(&self, name: &str) -> Option<&ConstantEntry> {
        self.constants.get(name)
    }

    pub fn classes(&self) -> impl Iterator<Item = &ClassEntry> {
        self.classes.values()
    }

    pub fn functions(&self) -> impl Iterator<Item = &FunctionEntry> {
        self.functions.values()
    }

    pub fn constants(&self) -> impl Iterator<Item = &ConstantEntry> {
        self.constants.values()
    }

    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.functions.is_empty() && self.constants.is_empty()
    }
}
