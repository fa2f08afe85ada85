//! CLI command implementations

use anyhow::Context;
use std::path::Path;
use treegraph_core::{export, PropertyGraph};
use treegraph_indexer::{Indexer, IndexerConfig};

use crate::Format;

pub fn convert(
    path: &Path,
    output: Option<&Path>,
    format: Format,
    config: Option<&Path>,
) -> anyhow::Result<()> {
    let graph = build(path, config)?;

    let rendered = match format {
        Format::Json => export::to_json(&graph).context("Failed to serialize graph")?,
        Format::Dot => export::to_dot(&graph),
    };

    match output {
        Some(output) => {
            std::fs::write(output, rendered)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            tracing::info!("Graph written to {}", output.display());
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

pub fn stats(path: &Path, config: Option<&Path>) -> anyhow::Result<()> {
    let graph = build(path, config)?;

    println!("vertices: {}", graph.vertex_count());
    println!("edges: {}", graph.edge_count());
    for (label, count) in graph.edge_label_counts() {
        println!("  {}: {}", label, count);
    }
    Ok(())
}

fn build(path: &Path, config: Option<&Path>) -> anyhow::Result<PropertyGraph> {
    let config = match config {
        Some(file) => IndexerConfig::load(file)?,
        None => IndexerConfig::discover(path)?,
    };

    tracing::info!("Converting {}", path.display());
    let graph = Indexer::new(config)
        .index(path)
        .with_context(|| format!("Failed to convert {}", path.display()))?;

    tracing::info!("Built {} vertices, {} edges", graph.vertex_count(), graph.edge_count());
    Ok(graph)
}
