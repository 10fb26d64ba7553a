use crate::{NodeId, NodeUid};
use thiserror::Error;

/// Errors from structural edits and document loading.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("node {0:?} is not part of this tree")]
    UnknownNode(NodeId),

    #[error("no node with uid {0}")]
    UnknownUid(NodeUid),

    #[error("the root canvas cannot be removed or reparented")]
    RootImmutable,

    #[error("cannot move {node:?} under its own descendant {parent:?}")]
    Cycle { node: NodeId, parent: NodeId },

    #[error("duplicate node uid {0}")]
    DuplicateUid(NodeUid),

    #[error("invalid layout document: {0}")]
    Document(#[from] serde_json::Error),
}
