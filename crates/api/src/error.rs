use layout::{LayoutError, NodeUid};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("no node with uid {0}")]
    UnknownUid(NodeUid),

    #[error("no node named {0:?}")]
    UnknownName(String),

    #[error("nothing is selected")]
    NoSelection,

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error("invalid script: {0}")]
    Script(#[from] serde_json::Error),
}
