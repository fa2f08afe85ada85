//! Pre-order enumeration of a tree along STRUCTURAL links

use std::collections::HashSet;

use crate::ast::AstNode;

/// Collect `root` followed by every node reachable through STRUCTURAL
/// children, depth-first, parent before children, children in declared order.
///
/// The output is not deduplicated: a node reachable through two paths shows
/// up twice. Such a node is only expanded the first time, which keeps a
/// structural cycle from looping forever.
pub fn collect_nodes<N: AstNode>(root: &N) -> Vec<N> {
    let mut nodes = Vec::new();
    let mut expanded = HashSet::new();
    let mut stack = vec![root.clone()];

    while let Some(node) = stack.pop() {
        if expanded.insert(node.identity()) {
            let mut children = node.children();
            children.reverse();
            stack.extend(children);
        }
        nodes.push(node);
    }

    nodes
}
