//! Indexer errors

use std::path::PathBuf;

use thiserror::Error;
use treegraph_core::ConversionError;

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("unsupported source file: {}", .0.display())]
    UnsupportedLanguage(PathBuf),

    #[error("failed to load grammar: {0}")]
    Grammar(#[from] tree_sitter::LanguageError),

    #[error("parser produced no tree for {0}")]
    ParseFailed(String),

    #[error("syntax error in {path} at {line}:{column}")]
    Syntax { path: String, line: u32, column: u32 },

    #[error("source is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("invalid exclude pattern: {0}")]
    Glob(#[from] globset::Error),

    #[error("{path}: {source}")]
    Conversion {
        path: String,
        #[source]
        source: ConversionError,
    },
}

pub type Result<T> = std::result::Result<T, IndexError>;
