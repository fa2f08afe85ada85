//! Lowering of a tree-sitter tree into a [`SyntaxTree`]
//!
//! The tree shape is copied node by node. Semantic links (DECLARES, TYPE,
//! RESOLVES_TO, CALLS) are then derived per file from the language tables;
//! they only ever point at nodes of the same file.

use std::collections::{HashMap, HashSet};

use tree_sitter::{Node, Tree};
use treegraph_core::{NodeData, NodeKey, RelationKind, Span, SyntaxTree};

use crate::config::IndexerConfig;
use crate::error::{IndexError, Result};
use crate::languages::LanguageRules;

/// A declaration found in the file, with the node that declares it.
struct Declaration<'a> {
    node: Node<'a>,
    name: &'a str,
    owner: NodeKey,
}

struct Lowering<'a> {
    source: &'a str,
    rules: &'static LanguageRules,
    config: &'a IndexerConfig,
    tree: SyntaxTree,
    keys: HashMap<usize, NodeKey>,
    /// Kept nodes in pre-order.
    kept: Vec<Node<'a>>,
}

/// Lower `tree` (parsed from `source`) into a [`SyntaxTree`] labelled `path`.
pub fn lower(
    tree: &Tree,
    source: &str,
    rules: &'static LanguageRules,
    config: &IndexerConfig,
    path: &str,
) -> Result<SyntaxTree> {
    let root = tree.root_node();
    if root.has_error() {
        report_syntax_errors(root, config.strict, path)?;
    }

    let mut lowering = Lowering {
        source,
        rules,
        config,
        tree: SyntaxTree::new(),
        keys: HashMap::new(),
        kept: Vec::new(),
    };
    lowering.tree.set_source_path(path);
    lowering.copy_shape(root)?;
    lowering.link_semantics();

    tracing::trace!(
        path,
        nodes = lowering.tree.len(),
        language = rules.name,
        "Lowered syntax tree"
    );
    Ok(lowering.tree)
}

/// Fail on the first error node in strict mode, otherwise warn once.
fn report_syntax_errors(root: Node<'_>, strict: bool, path: &str) -> Result<()> {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            let position = node.start_position();
            let (line, column) = (position.row as u32 + 1, position.column as u32 + 1);
            if strict {
                return Err(IndexError::Syntax {
                    path: path.to_string(),
                    line,
                    column,
                });
            }
            tracing::warn!("Syntax error in {} at {}:{}, converting recovered tree", path, line, column);
            return Ok(());
        }
        let mut cursor = node.walk();
        let mut children: Vec<_> = node.children(&mut cursor).collect();
        children.reverse();
        stack.extend(children);
    }
    Ok(())
}

fn span_of(node: Node<'_>) -> Span {
    let start = node.start_position();
    let end = node.end_position();
    Span {
        start_line: start.row as u32 + 1,
        start_column: start.column as u32 + 1,
        end_line: end.row as u32 + 1,
        end_column: end.column as u32 + 1,
        start_byte: node.start_byte(),
        end_byte: node.end_byte(),
    }
}

impl<'a> Lowering<'a> {
    fn keep(&self, node: Node<'_>) -> bool {
        !node.is_missing() && (node.is_named() || self.config.include_anonymous)
    }

    fn text(&self, node: Node<'a>) -> Result<&'a str> {
        Ok(node.utf8_text(self.source.as_bytes())?)
    }

    fn key(&self, node: Node<'_>) -> Option<NodeKey> {
        self.keys.get(&node.id()).copied()
    }

    /// Copy kept nodes in pre-order, attaching each to its nearest kept ancestor.
    fn copy_shape(&mut self, root: Node<'a>) -> Result<()> {
        let mut stack: Vec<(Node<'a>, Option<NodeKey>, Option<&'static str>)> = vec![(root, None, None)];

        while let Some((node, parent, field)) = stack.pop() {
            let mut attach_to = parent;
            if self.keep(node) || parent.is_none() {
                let mut data = NodeData::new(node.kind(), self.text(node)?).with_span(span_of(node));
                if self.rules.is_simple_name(node.kind()) {
                    data = data.simple();
                }
                if let Some(field) = field {
                    data = data.with_field(field);
                }
                let key = self.tree.add_node(data);
                if let Some(parent) = parent {
                    self.tree.add_child(parent, key);
                }
                self.keys.insert(node.id(), key);
                self.kept.push(node);
                attach_to = Some(key);
            }

            let mut children = Vec::new();
            let mut cursor = node.walk();
            if cursor.goto_first_child() {
                loop {
                    children.push((cursor.node(), attach_to, cursor.field_name()));
                    if !cursor.goto_next_sibling() {
                        break;
                    }
                }
            }
            children.reverse();
            stack.extend(children);
        }
        Ok(())
    }

    fn link(&mut self, from: Node<'_>, kind: RelationKind, to: Node<'_>) {
        if let (Some(from), Some(to)) = (self.key(from), self.key(to)) {
            self.tree.link(from, kind, to);
        }
    }

    fn link_semantics(&mut self) {
        let declarations = self.declarations();
        let name_nodes: HashSet<usize> = declarations
            .iter()
            .filter_map(|d| d.node.child_by_field_name("name"))
            .map(|n| n.id())
            .collect();
        let mut by_name: HashMap<&str, Vec<&Declaration<'a>>> = HashMap::new();
        for declaration in &declarations {
            by_name.entry(declaration.name).or_default().push(declaration);
        }

        let kept = self.kept.clone();

        if self.config.emits(RelationKind::Declares) {
            for declaration in &declarations {
                let owner = declaration.owner;
                if let Some(key) = self.key(declaration.node) {
                    self.tree.link(owner, RelationKind::Declares, key);
                }
            }
        }

        for &node in &kept {
            if self.config.emits(RelationKind::Type) {
                if let Some(type_node) = self
                    .rules
                    .type_field(node.kind())
                    .and_then(|field| node.child_by_field_name(field))
                {
                    for name in self.type_names(type_node) {
                        self.link(node, RelationKind::Type, name);
                    }
                }
            }

            if self.config.emits(RelationKind::ResolvesTo)
                && self.rules.is_reference(node.kind())
                && !name_nodes.contains(&node.id())
            {
                let target = self
                    .source_text(node)
                    .and_then(|name| by_name.get(name))
                    .and_then(|candidates| self.visible(node, candidates, |_| true));
                if let Some(target) = target {
                    self.link(node, RelationKind::ResolvesTo, target);
                }
            }

            if self.config.emits(RelationKind::Calls) {
                let target = self
                    .callee_name(node)
                    .and_then(|name| by_name.get(name))
                    .and_then(|candidates| {
                        self.visible(node, candidates, |d| self.rules.is_callable(d.node.kind()))
                    });
                if let Some(target) = target {
                    self.link(node, RelationKind::Calls, target);
                }
            }
        }
    }

    fn source_text(&self, node: Node<'a>) -> Option<&'a str> {
        node.utf8_text(self.source.as_bytes()).ok()
    }

    /// Named declarations in pre-order, each with its owning declaration (or
    /// the root) as the scope it is visible in.
    fn declarations(&self) -> Vec<Declaration<'a>> {
        let Some(&root) = self.kept.first() else {
            return Vec::new();
        };
        let Some(root_key) = self.key(root) else {
            return Vec::new();
        };

        self.kept
            .iter()
            .filter(|node| self.rules.is_declaration(node.kind()))
            .filter_map(|&node| {
                let name = node
                    .child_by_field_name("name")
                    .and_then(|n| self.source_text(n))?;
                let owner = ancestors(node)
                    .find(|a| self.rules.is_declaration(a.kind()))
                    .and_then(|a| self.key(a))
                    .unwrap_or(root_key);
                Some(Declaration { node, name, owner })
            })
            .collect()
    }

    /// Type-name nodes inside a type expression, in source order. A
    /// qualified type contributes only its last segment.
    fn type_names(&self, type_node: Node<'a>) -> Vec<Node<'a>> {
        let mut names = Vec::new();
        let mut stack = vec![type_node];
        while let Some(node) = stack.pop() {
            if self.rules.is_type_name(node.kind()) {
                names.push(node);
                continue;
            }
            if self.rules.is_qualified_type(node.kind()) {
                let last = node.named_child(node.named_child_count().saturating_sub(1));
                if let Some(last) = last.filter(|n| self.rules.is_type_name(n.kind())) {
                    names.push(last);
                }
                continue;
            }
            let mut cursor = node.walk();
            let mut children: Vec<_> = node.named_children(&mut cursor).collect();
            children.reverse();
            stack.extend(children);
        }
        names
    }

    /// Name of the function a call site invokes, if the node is a call site.
    fn callee_name(&self, node: Node<'a>) -> Option<&'a str> {
        let callee = self
            .rules
            .callee_field(node.kind())
            .and_then(|field| node.child_by_field_name(field))?;
        if self.rules.is_simple_name(callee.kind()) {
            return self.source_text(callee);
        }
        self.rules
            .callee_name_fields
            .iter()
            .filter_map(|field| callee.child_by_field_name(field))
            .find(|n| self.rules.is_simple_name(n.kind()))
            .and_then(|n| self.source_text(n))
    }

    /// Of the candidates passing `accept`, the one owned by the nearest
    /// ancestor of `node`.
    fn visible(
        &self,
        node: Node<'a>,
        candidates: &[&Declaration<'a>],
        accept: impl Fn(&Declaration<'a>) -> bool,
    ) -> Option<Node<'a>> {
        ancestors(node)
            .filter_map(|a| self.key(a))
            .find_map(|scope| {
                candidates
                    .iter()
                    .find(|d| d.owner == scope && accept(**d))
                    .map(|d| d.node)
            })
    }
}

fn ancestors(node: Node<'_>) -> impl Iterator<Item = Node<'_>> {
    std::iter::successors(node.parent(), |n| n.parent())
}
