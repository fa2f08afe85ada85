//! Attribute extractor trait definition

use std::collections::BTreeMap;

/// Extra vertex attributes for one node, name to value.
pub type Attributes = BTreeMap<String, String>;

/// Supplies per-node attributes beyond the ones the builder sets itself.
///
/// Returned names must not collide with [`crate::model::keys::RESERVED`].
pub trait AttributeExtractor<N> {
    fn attributes(&self, node: &N) -> anyhow::Result<Attributes>;
}

/// Extractor that adds nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAttributes;

impl<N> AttributeExtractor<N> for NoAttributes {
    fn attributes(&self, _node: &N) -> anyhow::Result<Attributes> {
        Ok(Attributes::new())
    }
}

impl<N, F> AttributeExtractor<N> for F
where
    F: Fn(&N) -> anyhow::Result<Attributes>,
{
    fn attributes(&self, node: &N) -> anyhow::Result<Attributes> {
        self(node)
    }
}
