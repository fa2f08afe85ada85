//! Source file discovery

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::config::IndexerConfig;
use crate::error::Result;
use crate::parser::FileType;

/// Supported source files under `root`, sorted by path.
///
/// `.gitignore` rules apply even outside a git checkout. `exclude` patterns
/// match paths relative to `root`. A file given directly is returned as is
/// when its language is supported.
pub fn discover_sources(root: &Path, config: &IndexerConfig) -> Result<Vec<PathBuf>> {
    if root.is_file() {
        return Ok(FileType::from_path(root)
            .map(|_| vec![root.to_path_buf()])
            .unwrap_or_default());
    }

    let excludes = config.exclude_set()?;
    let mut builder = WalkBuilder::new(root);
    builder
        .hidden(true)
        .git_ignore(true)
        .git_exclude(true)
        .require_git(false);

    let mut files: Vec<PathBuf> = builder
        .build()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .map(|entry| entry.into_path())
        .filter(|path| FileType::from_path(path).is_some())
        .filter(|path| {
            let relative = path.strip_prefix(root).unwrap_or(path.as_path());
            !excludes.is_match(relative)
        })
        .collect();
    files.sort();

    tracing::debug!("Discovered {} source files under {}", files.len(), root.display());
    Ok(files)
}
