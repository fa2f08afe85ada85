//! Source front end: tree-sitter parsing, lowering into syntax trees and
//! conversion of whole source trees into one property graph

pub mod attributes;
pub mod config;
pub mod discover;
pub mod error;
pub mod indexer;
pub mod languages;
pub mod lower;
pub mod parser;

#[cfg(test)]
mod tests;

pub use attributes::SourceAttributes;
pub use config::{IndexerConfig, CONFIG_FILE};
pub use discover::discover_sources;
pub use error::{IndexError, Result};
pub use indexer::Indexer;
pub use languages::LanguageRules;
pub use lower::lower;
pub use parser::{FileType, SourceParser};
