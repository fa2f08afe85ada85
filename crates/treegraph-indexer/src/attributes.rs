//! Source-level vertex attributes for lowered trees

use treegraph_core::{AstNode, AttributeExtractor, Attributes, NodeRef};

/// Adds source positions, the field role and declared names to every vertex.
///
/// Positions are 1-based; byte offsets are 0-based and end-exclusive.
#[derive(Debug, Clone, Copy)]
pub struct SourceAttributes {
    pub spans: bool,
}

impl SourceAttributes {
    pub fn new(spans: bool) -> Self {
        SourceAttributes { spans }
    }
}

impl<'t> AttributeExtractor<NodeRef<'t>> for SourceAttributes {
    fn attributes(&self, node: &NodeRef<'t>) -> anyhow::Result<Attributes> {
        let mut attributes = Attributes::new();

        if self.spans {
            if let Some(span) = node.span() {
                attributes.insert("line".to_string(), span.start_line.to_string());
                attributes.insert("column".to_string(), span.start_column.to_string());
                attributes.insert("endLine".to_string(), span.end_line.to_string());
                attributes.insert("endColumn".to_string(), span.end_column.to_string());
                attributes.insert("startByte".to_string(), span.start_byte.to_string());
                attributes.insert("endByte".to_string(), span.end_byte.to_string());
            }
        }

        if let Some(field) = node.field() {
            attributes.insert("field".to_string(), field.to_string());
        }

        let declared = node
            .child_by_field("name")
            .and_then(|name| name.simple_name().map(str::to_string));
        if let Some(name) = declared {
            attributes.insert("name".to_string(), name);
        }

        if node.parent().is_none() {
            if let Some(path) = node.tree().source_path() {
                attributes.insert("file".to_string(), path.to_string());
            }
        }

        Ok(attributes)
    }
}
