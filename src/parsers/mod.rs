//! Lexical building blocks shared by the catalog parser, the document indexer
//! and the query providers.

pub mod patterns;
pub mod position_utils;

pub use patterns::split_params;
