//! AST abstraction consumed by the graph builder, plus an arena-backed tree

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use serde::{Deserialize, Serialize};

/// Stable fingerprint of an AST node. Only used as a cache key, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIdentity(pub u64);

impl fmt::Display for NodeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:x}", self.0)
    }
}

/// Category of a link between two AST nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationKind {
    // ── Tree shape ──────────────────────────────────────────
    Structural,

    // ── Collapsed into vertex data ──────────────────────────
    Type,

    // ── Semantic links ──────────────────────────────────────
    ResolvesTo,
    Declares,
    Calls,
    Overrides,
}

impl RelationKind {
    pub const ALL: [RelationKind; 6] = [
        RelationKind::Structural,
        RelationKind::Type,
        RelationKind::ResolvesTo,
        RelationKind::Declares,
        RelationKind::Calls,
        RelationKind::Overrides,
    ];

    /// Name used as edge label and as the edge `type` property.
    pub fn name(self) -> &'static str {
        match self {
            RelationKind::Structural => "STRUCTURAL",
            RelationKind::Type => "TYPE",
            RelationKind::ResolvesTo => "RESOLVES_TO",
            RelationKind::Declares => "DECLARES",
            RelationKind::Calls => "CALLS",
            RelationKind::Overrides => "OVERRIDES",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered set of nodes related to a source node under one kind.
#[derive(Debug, Clone)]
pub struct Relation<N> {
    pub kind: RelationKind,
    pub targets: Vec<N>,
}

/// A node of a parsed source tree, as seen by the graph builder.
///
/// Implementations are cheap handles (`Clone` is expected to be a copy of a
/// reference or index). `relations` must list kinds in a stable order, and
/// within a kind the targets in their declared order.
pub trait AstNode: Clone {
    fn identity(&self) -> NodeIdentity;

    fn kind(&self) -> &str;

    fn parent(&self) -> Option<Self>;

    fn text(&self) -> &str;

    /// The identifier if this node is a simple-name kind.
    fn simple_name(&self) -> Option<&str>;

    fn relations(&self) -> Vec<Relation<Self>>;

    /// Nodes related under a single kind. Empty if the node has none.
    fn related(&self, kind: RelationKind) -> Vec<Self> {
        self.relations()
            .into_iter()
            .find(|r| r.kind == kind)
            .map(|r| r.targets)
            .unwrap_or_default()
    }

    /// Tree children, i.e. the STRUCTURAL relation.
    fn children(&self) -> Vec<Self> {
        self.related(RelationKind::Structural)
    }
}

/// Source position of a node. Lines and columns are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Span {
    pub start_line: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
    pub start_byte: usize,
    pub end_byte: usize,
}

/// Index of a node inside a [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey(pub u32);

/// Payload for a new [`SyntaxTree`] node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    pub kind: String,
    pub text: String,
    pub simple_name: bool,
    pub span: Option<Span>,
    /// Role of the node under its parent (grammar field name).
    pub field: Option<String>,
}

impl NodeData {
    pub fn new(kind: impl Into<String>, text: impl Into<String>) -> Self {
        NodeData {
            kind: kind.into(),
            text: text.into(),
            simple_name: false,
            span: None,
            field: None,
        }
    }

    /// Shorthand for a simple-name node whose text is the identifier.
    pub fn name(kind: impl Into<String>, identifier: impl Into<String>) -> Self {
        NodeData::new(kind, identifier).simple()
    }

    pub fn simple(mut self) -> Self {
        self.simple_name = true;
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

#[derive(Debug, Clone)]
struct SyntaxNode {
    data: NodeData,
    parent: Option<NodeKey>,
    relations: Vec<(RelationKind, Vec<NodeKey>)>,
}

static NEXT_TREE_ID: AtomicU32 = AtomicU32::new(0);

/// Arena-backed AST. Nodes never move, so a [`NodeKey`] stays valid for the
/// lifetime of the tree.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    tree_id: u32,
    nodes: Vec<SyntaxNode>,
    root: Option<NodeKey>,
    source_path: Option<String>,
}

impl SyntaxTree {
    pub fn new() -> Self {
        SyntaxTree {
            tree_id: NEXT_TREE_ID.fetch_add(1, Ordering::Relaxed),
            nodes: Vec::new(),
            root: None,
            source_path: None,
        }
    }

    /// Add a detached node. The first node added becomes the root unless
    /// [`SyntaxTree::set_root`] says otherwise.
    pub fn add_node(&mut self, data: NodeData) -> NodeKey {
        let key = NodeKey(self.nodes.len() as u32);
        self.nodes.push(SyntaxNode {
            data,
            parent: None,
            relations: Vec::new(),
        });
        if self.root.is_none() {
            self.root = Some(key);
        }
        key
    }

    pub fn set_root(&mut self, key: NodeKey) {
        self.root = Some(key);
    }

    /// Append `child` to the STRUCTURAL children of `parent`. The child's
    /// parent is only set the first time it is attached.
    pub fn add_child(&mut self, parent: NodeKey, child: NodeKey) {
        self.link(parent, RelationKind::Structural, child);
        let node = &mut self.nodes[child.0 as usize];
        if node.parent.is_none() {
            node.parent = Some(parent);
        }
    }

    /// Record `from -kind-> to`. Linking the same pair twice is a no-op.
    pub fn link(&mut self, from: NodeKey, kind: RelationKind, to: NodeKey) {
        let relations = &mut self.nodes[from.0 as usize].relations;
        match relations.iter_mut().find(|(k, _)| *k == kind) {
            Some((_, targets)) => {
                if !targets.contains(&to) {
                    targets.push(to);
                }
            }
            None => relations.push((kind, vec![to])),
        }
    }

    pub fn root(&self) -> Option<NodeRef<'_>> {
        self.root.map(|key| self.node(key))
    }

    /// Handle to a node. Panics if `key` does not belong to this tree.
    pub fn node(&self, key: NodeKey) -> NodeRef<'_> {
        assert!((key.0 as usize) < self.nodes.len(), "node key out of range");
        NodeRef { tree: self, key }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = NodeKey> + '_ {
        (0..self.nodes.len() as u32).map(NodeKey)
    }

    pub fn source_path(&self) -> Option<&str> {
        self.source_path.as_deref()
    }

    pub fn set_source_path(&mut self, path: impl Into<String>) {
        self.source_path = Some(path.into());
    }
}

impl Default for SyntaxTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Borrowed handle to a node of a [`SyntaxTree`].
#[derive(Clone, Copy)]
pub struct NodeRef<'t> {
    tree: &'t SyntaxTree,
    key: NodeKey,
}

impl<'t> NodeRef<'t> {
    pub fn key(&self) -> NodeKey {
        self.key
    }

    pub fn tree(&self) -> &'t SyntaxTree {
        self.tree
    }

    pub fn span(&self) -> Option<Span> {
        self.node().data.span
    }

    pub fn field(&self) -> Option<&'t str> {
        self.node().data.field.as_deref()
    }

    /// First STRUCTURAL child playing the given field role.
    pub fn child_by_field(&self, field: &str) -> Option<NodeRef<'t>> {
        self.children()
            .into_iter()
            .find(|child| child.field() == Some(field))
    }

    fn node(&self) -> &'t SyntaxNode {
        &self.tree.nodes[self.key.0 as usize]
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("key", &self.key)
            .field("kind", &self.node().data.kind)
            .finish()
    }
}

impl AstNode for NodeRef<'_> {
    fn identity(&self) -> NodeIdentity {
        NodeIdentity((u64::from(self.tree.tree_id) << 32) | u64::from(self.key.0))
    }

    fn kind(&self) -> &str {
        &self.node().data.kind
    }

    fn parent(&self) -> Option<Self> {
        self.node().parent.map(|key| self.tree.node(key))
    }

    fn text(&self) -> &str {
        &self.node().data.text
    }

    fn simple_name(&self) -> Option<&str> {
        let data = &self.node().data;
        data.simple_name.then_some(data.text.as_str())
    }

    fn relations(&self) -> Vec<Relation<Self>> {
        self.node()
            .relations
            .iter()
            .map(|(kind, targets)| Relation {
                kind: *kind,
                targets: targets.iter().map(|&key| self.tree.node(key)).collect(),
            })
            .collect()
    }
}
