//! Test utilities for treegraph-core

use crate::ast::{NodeData, NodeKey, RelationKind, SyntaxTree};
use crate::graph::PropertyGraph;

/// A small class-shaped tree with every relationship kind the builder handles.
///
/// ```text
/// CompilationUnit
/// └── ClassOrInterfaceDeclaration        DECLARES -> run, helper
///     ├── SimpleName "Shop"
///     ├── FieldDeclaration               TYPE -> [Map, Item]
///     │   ├── ClassOrInterfaceType
///     │   │   ├── SimpleName "Map"
///     │   │   └── SimpleName "Item"
///     │   └── SimpleName "items"
///     ├── MethodDeclaration (run)
///     │   ├── SimpleName "run"
///     │   └── BlockStmt
///     │       └── MethodCallExpr         RESOLVES_TO -> helper
///     │           └── SimpleName "helper"
///     └── MethodDeclaration (helper)
///         └── SimpleName "helper"
/// ```
pub struct ClassFixture {
    pub tree: SyntaxTree,
    pub unit: NodeKey,
    pub class: NodeKey,
    pub field: NodeKey,
    pub run: NodeKey,
    pub call: NodeKey,
    pub helper: NodeKey,
}

pub const CLASS_NODE_COUNT: usize = 15;

pub fn class_fixture() -> ClassFixture {
    let mut tree = SyntaxTree::new();
    let unit = tree.add_node(NodeData::new(
        "CompilationUnit",
        "class Shop { Map<Item> items; void run() { helper(); } void helper() {} }",
    ));
    let class = tree.add_node(NodeData::new(
        "ClassOrInterfaceDeclaration",
        "class Shop { Map<Item> items; void run() { helper(); } void helper() {} }",
    ));
    tree.add_child(unit, class);
    let class_name = tree.add_node(NodeData::name("SimpleName", "Shop"));
    tree.add_child(class, class_name);

    let field = tree.add_node(NodeData::new("FieldDeclaration", "Map<Item> items;"));
    tree.add_child(class, field);
    let field_type = tree.add_node(NodeData::new("ClassOrInterfaceType", "Map<Item>"));
    tree.add_child(field, field_type);
    let map = tree.add_node(NodeData::name("SimpleName", "Map"));
    let item = tree.add_node(NodeData::name("SimpleName", "Item"));
    tree.add_child(field_type, map);
    tree.add_child(field_type, item);
    let field_name = tree.add_node(NodeData::name("SimpleName", "items"));
    tree.add_child(field, field_name);

    let run = tree.add_node(NodeData::new("MethodDeclaration", "void run() { helper(); }"));
    tree.add_child(class, run);
    let run_name = tree.add_node(NodeData::name("SimpleName", "run"));
    tree.add_child(run, run_name);
    let block = tree.add_node(NodeData::new("BlockStmt", "{ helper(); }"));
    tree.add_child(run, block);
    let call = tree.add_node(NodeData::new("MethodCallExpr", "helper()"));
    tree.add_child(block, call);
    let call_name = tree.add_node(NodeData::name("SimpleName", "helper"));
    tree.add_child(call, call_name);

    let helper = tree.add_node(NodeData::new("MethodDeclaration", "void helper() {}"));
    tree.add_child(class, helper);
    let helper_name = tree.add_node(NodeData::name("SimpleName", "helper"));
    tree.add_child(helper, helper_name);

    tree.link(class, RelationKind::Declares, run);
    tree.link(class, RelationKind::Declares, helper);
    tree.link(field, RelationKind::Type, map);
    tree.link(field, RelationKind::Type, item);
    tree.link(call, RelationKind::ResolvesTo, helper);

    ClassFixture {
        tree,
        unit,
        class,
        field,
        run,
        call,
        helper,
    }
}

/// Root with two leaf children, `C1` and `C2`.
pub fn two_leaves() -> SyntaxTree {
    let mut tree = SyntaxTree::new();
    let root = tree.add_node(NodeData::new("Root", "root"));
    let first = tree.add_node(NodeData::new("C1", "first"));
    let second = tree.add_node(NodeData::new("C2", "second"));
    tree.add_child(root, first);
    tree.add_child(root, second);
    tree
}

/// A linear chain of `depth` nodes, each the only child of the previous one.
pub fn chain(depth: usize) -> SyntaxTree {
    let mut tree = SyntaxTree::new();
    let mut parent = tree.add_node(NodeData::new("Link", "0"));
    for i in 1..depth {
        let child = tree.add_node(NodeData::new("Link", i.to_string()));
        tree.add_child(parent, child);
        parent = child;
    }
    tree
}

/// One line per edge, `source -LABEL-> target`, in creation order.
pub fn render_edges(graph: &PropertyGraph) -> String {
    graph
        .edges()
        .map(|e| format!("{} -{}-> {}", e.source, e.label, e.target))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_fixture_size() {
        let fixture = class_fixture();
        assert_eq!(fixture.tree.len(), CLASS_NODE_COUNT);
        assert_eq!(fixture.tree.root().unwrap().key(), fixture.unit);
    }

    #[test]
    fn test_chain_depth() {
        assert_eq!(chain(5).len(), 5);
    }
}
