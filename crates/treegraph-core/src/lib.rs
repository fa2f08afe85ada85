//! Treegraph Core: AST model, property graph and the AST-to-graph builder

pub mod ast;
pub mod attributes;
pub mod builder;
pub mod collector;
pub mod error;
pub mod export;
pub mod graph;
pub mod model;


#[cfg(test)]
pub mod test_utils;

pub use ast::{AstNode, NodeData, NodeIdentity, NodeKey, NodeRef, Relation, RelationKind, Span, SyntaxTree};
pub use attributes::{AttributeExtractor, Attributes, NoAttributes};
pub use builder::{convert, GraphBuilder};
pub use collector::collect_nodes;
pub use error::{ConversionError, UnresolvedReason};
pub use export::{GraphDocument, read_json, to_dot, to_json, write_json};
pub use graph::{EdgeHandle, PropertyGraph, VertexHandle};
pub use model::{keys, Edge, Properties, PropertyValue, Vertex, VertexId};
