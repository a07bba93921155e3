pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod index;
pub mod logging;
pub mod lsp;
pub mod parsers;
