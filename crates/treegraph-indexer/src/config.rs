//! Indexer configuration, read from `treegraph.toml`

use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use treegraph_core::RelationKind;

use crate::error::{IndexError, Result};

/// Config file looked up at the root of the indexed path.
pub const CONFIG_FILE: &str = "treegraph.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct IndexerConfig {
    /// Keep unnamed grammar tokens (punctuation, keywords) as AST nodes.
    pub include_anonymous: bool,
    /// Fail on syntax errors instead of converting the recovered tree.
    pub strict: bool,
    /// Emit line/column/byte attributes on every vertex.
    pub spans: bool,
    /// Semantic links the lowering pass should not produce.
    pub disabled_relations: Vec<RelationKind>,
    /// Glob patterns, relative to the indexed root, of paths to skip.
    pub exclude: Vec<String>,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        IndexerConfig {
            include_anonymous: false,
            strict: false,
            spans: true,
            disabled_relations: Vec::new(),
            exclude: Vec::new(),
        }
    }
}

impl IndexerConfig {
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| IndexError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `treegraph.toml` next to `root` (or in it, for a directory),
    /// falling back to defaults when there is none.
    pub fn discover(root: &Path) -> Result<Self> {
        let dir = if root.is_dir() {
            root
        } else {
            root.parent().unwrap_or(Path::new("."))
        };
        let candidate = dir.join(CONFIG_FILE);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Whether the lowering pass links nodes with `kind`. The tree shape
    /// itself can not be switched off.
    pub fn emits(&self, kind: RelationKind) -> bool {
        kind == RelationKind::Structural || !self.disabled_relations.contains(&kind)
    }

    pub fn exclude_set(&self) -> Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.exclude {
            builder.add(Glob::new(pattern)?);
        }
        Ok(builder.build()?)
    }
}
