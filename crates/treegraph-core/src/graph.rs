//! Property graph wrapper using petgraph::StableDiGraph

use crate::model::*;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::HashMap;

/// Handle to a vertex inside one [`PropertyGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexHandle(NodeIndex);

/// Handle to an edge inside one [`PropertyGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeHandle(EdgeIndex);

/// The AST graph, a directed multigraph of attributed vertices and labelled edges.
pub struct PropertyGraph {
    inner: StableDiGraph<Vertex, Edge>,
    by_id: HashMap<VertexId, NodeIndex>,
}

impl std::fmt::Debug for PropertyGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyGraph")
            .field("vertex_count", &self.inner.node_count())
            .field("edge_count", &self.inner.edge_count())
            .finish()
    }
}

impl PropertyGraph {
    pub fn new() -> Self {
        PropertyGraph {
            inner: StableDiGraph::new(),
            by_id: HashMap::new(),
        }
    }

    /// Add a vertex. A vertex already registered under the same id is shadowed
    /// in id lookups; callers are expected to hand out unique ids.
    pub fn add_vertex(&mut self, vertex: Vertex) -> VertexHandle {
        let id = vertex.id;
        let idx = self.inner.add_node(vertex);
        self.by_id.insert(id, idx);
        VertexHandle(idx)
    }

    /// Add an edge between two existing vertices, with no properties yet.
    pub fn add_edge(&mut self, from: VertexHandle, to: VertexHandle, label: &str) -> EdgeHandle {
        let source = self.inner[from.0].id;
        let target = self.inner[to.0].id;
        let idx = self
            .inner
            .add_edge(from.0, to.0, Edge::new(label, source, target));
        EdgeHandle(idx)
    }

    pub fn vertex(&self, handle: VertexHandle) -> Option<&Vertex> {
        self.inner.node_weight(handle.0)
    }

    pub fn vertex_mut(&mut self, handle: VertexHandle) -> Option<&mut Vertex> {
        self.inner.node_weight_mut(handle.0)
    }

    /// Get a vertex by its assigned id.
    pub fn vertex_by_id(&self, id: VertexId) -> Option<&Vertex> {
        self.by_id
            .get(&id)
            .and_then(|&idx| self.inner.node_weight(idx))
    }

    pub fn edge(&self, handle: EdgeHandle) -> Option<&Edge> {
        self.inner.edge_weight(handle.0)
    }

    pub fn edge_mut(&mut self, handle: EdgeHandle) -> Option<&mut Edge> {
        self.inner.edge_weight_mut(handle.0)
    }

    /// Total number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Iterate over all vertices in creation order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.inner
            .node_indices()
            .filter_map(move |idx| self.inner.node_weight(idx))
    }

    /// Iterate over all edges in creation order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.inner
            .edge_indices()
            .filter_map(move |idx| self.inner.edge_weight(idx))
    }

    /// Outgoing edges of a vertex, in creation order.
    pub fn edges_from(&self, source: VertexId) -> Vec<&Edge> {
        self.directed_edges(source, Direction::Outgoing)
    }

    /// Incoming edges of a vertex, in creation order.
    pub fn edges_to(&self, target: VertexId) -> Vec<&Edge> {
        self.directed_edges(target, Direction::Incoming)
    }

    fn directed_edges(&self, id: VertexId, direction: Direction) -> Vec<&Edge> {
        let Some(&idx) = self.by_id.get(&id) else {
            return Vec::new();
        };
        // petgraph walks adjacency lists newest first
        let mut indices: Vec<EdgeIndex> = self
            .inner
            .edges_directed(idx, direction)
            .map(|edge_ref| edge_ref.id())
            .collect();
        indices.sort();
        indices
            .into_iter()
            .filter_map(|e| self.inner.edge_weight(e))
            .collect()
    }

    /// All edges with the given label.
    pub fn edges_labeled<'g>(&'g self, label: &str) -> impl Iterator<Item = &'g Edge> {
        self.edges().filter(move |e| e.label == label)
    }

    /// Check if an edge with the given label exists between two vertices.
    pub fn has_edge_between(&self, source: VertexId, target: VertexId, label: &str) -> bool {
        self.edges_from(source)
            .iter()
            .any(|e| e.target == target && e.label == label)
    }

    /// All vertices whose string property `key` equals `value`.
    pub fn vertices_where<'g>(&'g self, key: &str, value: &str) -> impl Iterator<Item = &'g Vertex> {
        self.vertices()
            .filter(move |v| v.str_property(key) == Some(value))
    }

    /// Count edges per label, sorted by label.
    pub fn edge_label_counts(&self) -> Vec<(String, usize)> {
        let mut counts = std::collections::BTreeMap::new();
        for edge in self.edges() {
            *counts.entry(edge.label.clone()).or_insert(0usize) += 1;
        }
        counts.into_iter().collect()
    }

    pub(crate) fn inner(&self) -> &StableDiGraph<Vertex, Edge> {
        &self.inner
    }
}

impl Default for PropertyGraph {
    fn default() -> Self {
        Self::new()
    }
}
