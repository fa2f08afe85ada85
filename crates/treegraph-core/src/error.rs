//! Conversion failures. Every variant aborts the whole conversion.

use thiserror::Error;

use crate::ast::{NodeIdentity, RelationKind};

#[derive(Debug, Error)]
pub enum ConversionError {
    /// A node was reached through more than one structural path.
    #[error("not a tree: {kind} node {identity} reached twice")]
    DuplicateNode { kind: String, identity: NodeIdentity },

    #[error("unresolved {relation} reference from {source_kind} node: {reason}")]
    UnresolvedReference {
        relation: RelationKind,
        source_kind: String,
        reason: UnresolvedReason,
    },

    /// Failure surfaced by a parser or attribute collaborator.
    #[error(transparent)]
    Collaborator(#[from] anyhow::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnresolvedReason {
    #[error("expected a simple name, found {0}")]
    UnexpectedKind(String),

    #[error("{0} target is outside the converted tree")]
    MissingTarget(String),
}

pub type Result<T> = std::result::Result<T, ConversionError>;
