//! Parse, lower and convert source files into one property graph

use std::path::{Path, PathBuf};

use treegraph_core::{GraphBuilder, PropertyGraph, SyntaxTree};

use crate::attributes::SourceAttributes;
use crate::config::IndexerConfig;
use crate::discover::discover_sources;
use crate::error::{IndexError, Result};
use crate::lower::lower;
use crate::parser::{FileType, SourceParser};

pub struct Indexer {
    config: IndexerConfig,
    parser: SourceParser,
}

impl Indexer {
    pub fn new(config: IndexerConfig) -> Self {
        Indexer {
            config,
            parser: SourceParser::new(),
        }
    }

    pub fn config(&self) -> &IndexerConfig {
        &self.config
    }

    /// Lower in-memory source. `label` names the file in errors and in the
    /// root's `file` attribute.
    pub fn parse_source(&mut self, file_type: FileType, source: &str, label: &str) -> Result<SyntaxTree> {
        let tree = self.parser.parse(file_type, source, label)?;
        lower(&tree, source, file_type.rules(), &self.config, label)
    }

    pub fn parse_file(&mut self, path: &Path) -> Result<SyntaxTree> {
        let file_type =
            FileType::from_path(path).ok_or_else(|| IndexError::UnsupportedLanguage(path.to_path_buf()))?;
        let bytes = std::fs::read(path).map_err(|source| IndexError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let source = std::str::from_utf8(&bytes)?;
        self.parse_source(file_type, source, &path.display().to_string())
    }

    /// Convert every file, in the given order, as one root of a single graph.
    /// Vertex ids are unique across files. The first failing file aborts the
    /// whole build.
    pub fn build_graph(&mut self, paths: &[PathBuf]) -> Result<PropertyGraph> {
        let mut builder = GraphBuilder::with_extractor(SourceAttributes::new(self.config.spans));

        for path in paths {
            let tree = self.parse_file(path)?;
            let Some(root) = tree.root() else {
                continue;
            };
            builder.process(&root).map_err(|source| IndexError::Conversion {
                path: path.display().to_string(),
                source,
            })?;
            tracing::debug!("Converted {} ({} nodes)", path.display(), tree.len());
        }

        let graph = builder.finish();
        tracing::debug!(
            files = paths.len(),
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            "Graph built"
        );
        Ok(graph)
    }

    /// Discover the sources under `root` and build their graph.
    pub fn index(&mut self, root: &Path) -> Result<PropertyGraph> {
        let paths = discover_sources(root, &self.config)?;
        self.build_graph(&paths)
    }
}

impl Default for Indexer {
    fn default() -> Self {
        Self::new(IndexerConfig::default())
    }
}
