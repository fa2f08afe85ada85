//! Vertex and edge records of the property graph

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Property names written by the builder itself.
pub mod keys {
    pub const ID: &str = "id";
    pub const TYPE: &str = "type";
    pub const PARENT_TYPE: &str = "parentType";
    pub const TEXT: &str = "text";
    pub const REFERENCE: &str = "reference";

    /// Names an attribute extractor may never produce.
    pub const RESERVED: [&str; 5] = [ID, TYPE, PARENT_TYPE, TEXT, REFERENCE];
}

/// Vertex identifier, assigned densely from 1 in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VertexId(pub u64);

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A property value. The graph only stores strings and integers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Int(i64),
    Str(String),
}

impl PropertyValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::Str(s) => Some(s),
            PropertyValue::Int(_) => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            PropertyValue::Int(i) => Some(*i),
            PropertyValue::Str(_) => None,
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Str(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Str(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        PropertyValue::Int(value)
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Int(i) => write!(f, "{}", i),
            PropertyValue::Str(s) => f.write_str(s),
        }
    }
}

pub type Properties = BTreeMap<String, PropertyValue>;

/// One vertex per AST node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub id: VertexId,
    #[serde(default)]
    pub properties: Properties,
}

impl Vertex {
    pub fn new(id: VertexId) -> Self {
        Vertex {
            id,
            properties: Properties::new(),
        }
    }

    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    pub fn str_property(&self, key: &str) -> Option<&str> {
        self.property(key).and_then(PropertyValue::as_str)
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.properties.insert(key.into(), value.into());
    }

    /// Node kind the vertex was created from.
    pub fn kind(&self) -> Option<&str> {
        self.str_property(keys::TYPE)
    }

    pub fn parent_kind(&self) -> Option<&str> {
        self.str_property(keys::PARENT_TYPE)
    }

    pub fn text(&self) -> Option<&str> {
        self.str_property(keys::TEXT)
    }

    /// Comma-joined type names collapsed from TYPE relations.
    pub fn reference(&self) -> Option<&str> {
        self.str_property(keys::REFERENCE)
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.id, self.kind().unwrap_or("?"))
    }
}

/// A labelled, directed edge between two vertices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub label: String,
    pub source: VertexId,
    pub target: VertexId,
    #[serde(default)]
    pub properties: Properties,
}

impl Edge {
    pub fn new(label: impl Into<String>, source: VertexId, target: VertexId) -> Self {
        Edge {
            label: label.into(),
            source,
            target,
            properties: Properties::new(),
        }
    }

    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.properties.insert(key.into(), value.into());
    }

    /// The `type` property, mirrored from the label for filtering.
    pub fn edge_type(&self) -> Option<&str> {
        self.property(keys::TYPE).and_then(PropertyValue::as_str)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}
