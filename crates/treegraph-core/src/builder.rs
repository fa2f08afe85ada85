//! Two-phase conversion of an AST into a property graph
//!
//! The vertex phase walks the collected node sequence and creates one vertex
//! per node, keyed by node identity. The edge phase then walks the tree again
//! from the root and turns every recorded relationship into edges, resolving
//! both endpoints from the vertex cache. Keeping the phases separate lets
//! semantic links point anywhere in the tree, including nodes the edge walk
//! has not reached yet.

use std::collections::HashMap;

use anyhow::anyhow;

use crate::ast::{AstNode, NodeIdentity, Relation, RelationKind};
use crate::attributes::{AttributeExtractor, NoAttributes};
use crate::collector::collect_nodes;
use crate::error::{ConversionError, Result, UnresolvedReason};
use crate::graph::{PropertyGraph, VertexHandle};
use crate::model::{keys, Vertex, VertexId};

/// Builds one [`PropertyGraph`] from one or more AST roots.
///
/// Vertex ids are owned by the builder: they start at 1 and keep increasing
/// across [`GraphBuilder::process`] calls until the builder is reset.
pub struct GraphBuilder<E = NoAttributes> {
    extractor: E,
    graph: PropertyGraph,
    vertex_cache: HashMap<NodeIdentity, VertexHandle>,
    next_id: u64,
}

impl GraphBuilder<NoAttributes> {
    pub fn new() -> Self {
        GraphBuilder::with_extractor(NoAttributes)
    }
}

impl Default for GraphBuilder<NoAttributes> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> GraphBuilder<E> {
    pub fn with_extractor(extractor: E) -> Self {
        GraphBuilder {
            extractor,
            graph: PropertyGraph::new(),
            vertex_cache: HashMap::new(),
            next_id: 1,
        }
    }

    /// The graph built so far.
    pub fn graph(&self) -> &PropertyGraph {
        &self.graph
    }

    /// Drop the graph, the cache and restart ids at 1.
    pub fn reset(&mut self) {
        self.graph = PropertyGraph::new();
        self.vertex_cache.clear();
        self.next_id = 1;
    }

    /// Hand over the graph and leave the builder reset.
    pub fn take_graph(&mut self) -> PropertyGraph {
        let graph = std::mem::take(&mut self.graph);
        self.reset();
        graph
    }

    pub fn finish(self) -> PropertyGraph {
        self.graph
    }

    /// Convert the tree under `root` into vertices and edges of the builder's
    /// graph.
    ///
    /// On error the builder is reset: whatever was built so far, including
    /// roots processed by earlier successful calls, is discarded.
    pub fn process<N>(&mut self, root: &N) -> Result<()>
    where
        N: AstNode,
        E: AttributeExtractor<N>,
    {
        let vertices_before = self.graph.vertex_count();
        let edges_before = self.graph.edge_count();

        let result = self.try_process(root);
        match &result {
            Ok(()) => tracing::debug!(
                root = root.kind(),
                vertices = self.graph.vertex_count() - vertices_before,
                edges = self.graph.edge_count() - edges_before,
                "Converted tree"
            ),
            Err(e) => {
                tracing::debug!(root = root.kind(), error = %e, "Conversion aborted");
                self.reset();
            }
        }
        result
    }

    fn try_process<N>(&mut self, root: &N) -> Result<()>
    where
        N: AstNode,
        E: AttributeExtractor<N>,
    {
        let nodes = collect_nodes(root);
        tracing::trace!(count = nodes.len(), "Collected nodes");
        self.create_and_cache_vertices(&nodes)?;
        self.process_edges(root)
    }

    fn create_and_cache_vertices<N>(&mut self, nodes: &[N]) -> Result<()>
    where
        N: AstNode,
        E: AttributeExtractor<N>,
    {
        for node in nodes {
            let identity = node.identity();
            if self.vertex_cache.contains_key(&identity) {
                return Err(ConversionError::DuplicateNode {
                    kind: node.kind().to_string(),
                    identity,
                });
            }
            let handle = self.create_vertex(node)?;
            self.vertex_cache.insert(identity, handle);
        }
        Ok(())
    }

    fn create_vertex<N>(&mut self, node: &N) -> Result<VertexHandle>
    where
        N: AstNode,
        E: AttributeExtractor<N>,
    {
        let mut vertex = Vertex::new(VertexId(self.next_id));
        vertex.set_property(keys::TYPE, node.kind());
        if let Some(parent) = node.parent() {
            vertex.set_property(keys::PARENT_TYPE, parent.kind());
        }
        vertex.set_property(keys::TEXT, node.text());

        for (name, value) in self.extractor.attributes(node)? {
            if keys::RESERVED.contains(&name.as_str()) {
                return Err(ConversionError::Collaborator(anyhow!(
                    "attribute extractor produced reserved property '{}' for {} node",
                    name,
                    node.kind()
                )));
            }
            vertex.set_property(name, value);
        }

        self.next_id += 1;
        Ok(self.graph.add_vertex(vertex))
    }

    /// Edge phase over an explicit stack, so tree depth is not bounded by the
    /// call stack. A STRUCTURAL child's subtree is finished before the edge
    /// to its next sibling is added.
    fn process_edges<N: AstNode>(&mut self, root: &N) -> Result<()> {
        let from = self.cached_vertex(root, RelationKind::Structural, root.kind())?;
        let mut stack = vec![EdgeFrame::new(root.clone(), from)];

        while let Some(frame) = stack.last_mut() {
            let Some(Relation { kind, targets }) = frame.relations.get(frame.relation) else {
                stack.pop();
                continue;
            };
            let kind = *kind;

            match kind {
                RelationKind::Type => {
                    let names = targets
                        .iter()
                        .map(|target| {
                            target.simple_name().map(str::to_string).ok_or_else(|| {
                                ConversionError::UnresolvedReference {
                                    relation: kind,
                                    source_kind: frame.node.kind().to_string(),
                                    reason: UnresolvedReason::UnexpectedKind(
                                        target.kind().to_string(),
                                    ),
                                }
                            })
                        })
                        .collect::<Result<Vec<_>>>()?;
                    let from = frame.vertex;
                    frame.advance();
                    self.set_reference(from, names.join(","));
                }
                RelationKind::Structural => {
                    let Some(child) = targets.get(frame.target).cloned() else {
                        frame.advance();
                        continue;
                    };
                    frame.target += 1;
                    let from = frame.vertex;
                    let to = self.cached_vertex(&child, kind, frame.node.kind())?;
                    self.add_edge(from, to, kind);
                    stack.push(EdgeFrame::new(child, to));
                }
                RelationKind::ResolvesTo
                | RelationKind::Declares
                | RelationKind::Calls
                | RelationKind::Overrides => {
                    let from = frame.vertex;
                    let resolved = targets
                        .iter()
                        .map(|target| self.cached_vertex(target, kind, frame.node.kind()))
                        .collect::<Result<Vec<_>>>()?;
                    frame.advance();
                    for to in resolved {
                        self.add_edge(from, to, kind);
                    }
                }
            }
        }
        Ok(())
    }

    fn cached_vertex<N: AstNode>(
        &self,
        target: &N,
        relation: RelationKind,
        source_kind: &str,
    ) -> Result<VertexHandle> {
        self.vertex_cache
            .get(&target.identity())
            .copied()
            .ok_or_else(|| ConversionError::UnresolvedReference {
                relation,
                source_kind: source_kind.to_string(),
                reason: UnresolvedReason::MissingTarget(target.kind().to_string()),
            })
    }

    fn add_edge(&mut self, from: VertexHandle, to: VertexHandle, kind: RelationKind) {
        let handle = self.graph.add_edge(from, to, kind.name());
        if let Some(edge) = self.graph.edge_mut(handle) {
            edge.set_property(keys::TYPE, kind.name());
        }
    }

    fn set_reference(&mut self, vertex: VertexHandle, reference: String) {
        if let Some(vertex) = self.graph.vertex_mut(vertex) {
            vertex.set_property(keys::REFERENCE, reference);
        }
    }
}

/// Progress of the edge phase through one node's relations.
struct EdgeFrame<N> {
    node: N,
    vertex: VertexHandle,
    relations: Vec<Relation<N>>,
    relation: usize,
    target: usize,
}

impl<N: AstNode> EdgeFrame<N> {
    fn new(node: N, vertex: VertexHandle) -> Self {
        let relations = node.relations();
        EdgeFrame {
            node,
            vertex,
            relations,
            relation: 0,
            target: 0,
        }
    }

    fn advance(&mut self) {
        self.relation += 1;
        self.target = 0;
    }
}

/// Convert a single tree with a fresh builder.
pub fn convert<N, E>(root: &N, extractor: E) -> Result<PropertyGraph>
where
    N: AstNode,
    E: AttributeExtractor<N>,
{
    let mut builder = GraphBuilder::with_extractor(extractor);
    builder.process(root)?;
    Ok(builder.finish())
}
