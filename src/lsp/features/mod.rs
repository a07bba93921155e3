//! Query providers
//!
//! Each provider is a pure function of the catalog, the cached document index,
//! the current text and a cursor position. None of them mutate shared state or
//! schedule work; the backend supplies the snapshots.

pub mod completion;
pub mod hover;
pub mod signature_help;

pub use completion::complete;
pub use hover::hover;
pub use signature_help::signature_help;
