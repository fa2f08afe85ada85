//! Tree-sitter parsing for the supported source languages

use std::path::Path;

use tree_sitter::{Language, Parser, Tree};

use crate::error::{IndexError, Result};
use crate::languages::{go::GO, java::JAVA, python::PYTHON, rust::RUST, LanguageRules};

/// Supported file types for parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    Java,
    Python,
    Rust,
    Go,
}

impl FileType {
    /// Determine file type from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        match ext {
            "java" => Some(FileType::Java),
            "py" | "pyi" => Some(FileType::Python),
            "rs" => Some(FileType::Rust),
            "go" => Some(FileType::Go),
            _ => None,
        }
    }

    /// Get the tree-sitter language for this file type
    pub fn language(&self) -> Language {
        match self {
            FileType::Java => tree_sitter_java::LANGUAGE.into(),
            FileType::Python => tree_sitter_python::LANGUAGE.into(),
            FileType::Rust => tree_sitter_rust::LANGUAGE.into(),
            FileType::Go => tree_sitter_go::LANGUAGE.into(),
        }
    }

    pub fn rules(&self) -> &'static LanguageRules {
        match self {
            FileType::Java => &JAVA,
            FileType::Python => &PYTHON,
            FileType::Rust => &RUST,
            FileType::Go => &GO,
        }
    }

    pub fn name(&self) -> &'static str {
        self.rules().name
    }
}

/// A tree-sitter parser that switches grammar on demand.
pub struct SourceParser {
    parser: Parser,
    current: Option<FileType>,
}

impl SourceParser {
    pub fn new() -> Self {
        SourceParser {
            parser: Parser::new(),
            current: None,
        }
    }

    pub fn parse(&mut self, file_type: FileType, source: &str, label: &str) -> Result<Tree> {
        if self.current != Some(file_type) {
            self.parser.set_language(&file_type.language())?;
            self.current = Some(file_type);
            tracing::trace!("Parser switched to {}", file_type.name());
        }
        self.parser
            .parse(source, None)
            .ok_or_else(|| IndexError::ParseFailed(label.to_string()))
    }
}

impl Default for SourceParser {
    fn default() -> Self {
        Self::new()
    }
}
