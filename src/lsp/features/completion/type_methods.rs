//! Method tables for the built-in container types
//!
//! This module defines the methods offered after `name.` when `name` is known
//! to hold a list, dict or set, and the signatures shown for calls to them.
//! The tables are fixed; they are not derived from any document or from the
//! reference catalog.

use crate::index::CoreType;

/// Metadata for one container method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodInfo {
    pub name: &'static str,
    /// Rendered signature label, e.g. `insert(index, item)`.
    pub label: &'static str,
    pub params: &'static [&'static str],
    pub doc: Option<&'static str>,
}

/// List methods, in presentation order
const LIST_METHODS: &[MethodInfo] = &[
    MethodInfo {
        name: "append",
        label: "append(item)",
        params: &["item"],
        doc: Some("Adds an item to the end of the list."),
    },
    MethodInfo {
        name: "extend",
        label: "extend(iterable)",
        params: &["iterable"],
        doc: Some("Appends every item of the iterable to the list."),
    },
    MethodInfo {
        name: "insert",
        label: "insert(index, item)",
        params: &["index", "item"],
        doc: Some("Inserts an item before the given index."),
    },
    MethodInfo {
        name: "pop",
        label: "pop(index)",
        params: &["index"],
        doc: Some("Removes and returns the item at index (default last)."),
    },
];

const DICT_METHODS: &[MethodInfo] = &[MethodInfo {
    name: "get",
    label: "get(key, default)",
    params: &["key", "default"],
    doc: Some("Returns the value for key if present, otherwise default."),
}];

const SET_METHODS: &[MethodInfo] = &[
    MethodInfo {
        name: "add",
        label: "add(item)",
        params: &["item"],
        doc: Some("Adds an item to the set."),
    },
    MethodInfo {
        name: "discard",
        label: "discard(item)",
        params: &["item"],
        doc: Some("Removes an item from the set if it is present."),
    },
];

/// Get all methods for a core type (empty for `str` and `unknown`)
pub fn get_type_methods(core_type: CoreType) -> &'static [MethodInfo] {
    match core_type {
        CoreType::List => LIST_METHODS,
        CoreType::Dict => DICT_METHODS,
        CoreType::Set => SET_METHODS,
        CoreType::Str | CoreType::Unknown => &[],
    }
}

/// Looks up a single method by exact name.
pub fn find_method(core_type: CoreType, name: &str) -> Option<&'static MethodInfo> {
    get_type_methods(core_type).iter().find(|m| m.name == name)
}
