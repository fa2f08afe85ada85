//! Graph serialization for downstream tools

use crate::graph::PropertyGraph;
use crate::model::{Edge, Vertex};
use petgraph::dot::Dot;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Format version written into every document.
pub const FORMAT_VERSION: u32 = 1;

/// Flat, serializable view of a graph: vertices and edges in creation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    pub version: u32,
    pub vertices: Vec<Vertex>,
    pub edges: Vec<Edge>,
}

impl GraphDocument {
    pub fn from_graph(graph: &PropertyGraph) -> Self {
        GraphDocument {
            version: FORMAT_VERSION,
            vertices: graph.vertices().cloned().collect(),
            edges: graph.edges().cloned().collect(),
        }
    }

    /// Rebuild a graph. Edges whose endpoints are missing are rejected.
    pub fn into_graph(self) -> anyhow::Result<PropertyGraph> {
        let mut graph = PropertyGraph::new();
        let mut handles = std::collections::HashMap::new();
        for vertex in self.vertices {
            let id = vertex.id;
            handles.insert(id, graph.add_vertex(vertex));
        }
        for edge in self.edges {
            let (Some(&from), Some(&to)) = (handles.get(&edge.source), handles.get(&edge.target))
            else {
                anyhow::bail!(
                    "edge {} references unknown vertex ({} -> {})",
                    edge.label,
                    edge.source,
                    edge.target
                );
            };
            let handle = graph.add_edge(from, to, &edge.label);
            if let Some(stored) = graph.edge_mut(handle) {
                stored.properties = edge.properties;
            }
        }
        Ok(graph)
    }
}

/// Serialize a graph to pretty-printed JSON.
pub fn to_json(graph: &PropertyGraph) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&GraphDocument::from_graph(graph))
}

/// Write a graph as JSON to `path`.
pub fn write_json(graph: &PropertyGraph, path: &Path) -> anyhow::Result<()> {
    let json_str = to_json(graph)?;
    std::fs::write(path, json_str)?;

    tracing::debug!("Graph written: {}", path.display());
    Ok(())
}

/// Load a graph previously written with [`write_json`].
pub fn read_json(path: &Path) -> anyhow::Result<PropertyGraph> {
    let json_str = std::fs::read_to_string(path)?;
    let document: GraphDocument = serde_json::from_str(&json_str)?;
    if document.version != FORMAT_VERSION {
        anyhow::bail!(
            "unsupported graph format version {} in {}",
            document.version,
            path.display()
        );
    }

    tracing::debug!("Graph loaded from: {}", path.display());
    document.into_graph()
}

/// Render a graph in Graphviz DOT. Vertices show `id kind`, edges their label.
pub fn to_dot(graph: &PropertyGraph) -> String {
    format!("{}", Dot::new(graph.inner()))
}
