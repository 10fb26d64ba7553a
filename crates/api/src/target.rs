//! Node references for commands and queries.
//!
//! Arena handles are not stable across sessions, so scripts name nodes by
//! their persistent uid, by name, or through the current selection.

use crate::ApiError;
use editor::Editor;
use layout::{NodeId, NodeUid};
use serde::{Deserialize, Serialize};

/// Which node a command or query refers to.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeRef {
    /// The current selection.
    #[default]
    Selection,

    /// The root canvas.
    Root,

    /// A node by its stable uid.
    Uid(NodeUid),

    /// The first node in tree order with this name.
    Name(String),
}

impl From<NodeUid> for NodeRef {
    fn from(uid: NodeUid) -> Self {
        Self::Uid(uid)
    }
}

impl NodeRef {
    pub fn resolve(&self, editor: &Editor) -> Result<NodeId, ApiError> {
        let tree = editor.tree();
        match self {
            NodeRef::Selection => editor.selected().ok_or(ApiError::NoSelection),
            NodeRef::Root => Ok(tree.root()),
            NodeRef::Uid(uid) => tree.find_by_uid(*uid).ok_or(ApiError::UnknownUid(*uid)),
            NodeRef::Name(name) => tree
                .find_by_name(name)
                .ok_or_else(|| ApiError::UnknownName(name.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_serializes_as_plain_string() {
        let json = serde_json::to_value(NodeRef::Selection).unwrap();
        assert_eq!(json, "selection");
    }

    #[test]
    fn uid_and_name_use_single_key_objects() {
        let by_name: NodeRef = serde_json::from_str(r#"{"name": "panel"}"#).unwrap();
        assert_eq!(by_name, NodeRef::Name("panel".into()));

        let uid = NodeUid::from_u128(7);
        let json = serde_json::to_value(NodeRef::Uid(uid)).unwrap();
        assert_eq!(json["uid"], "00000000-0000-0000-0000-000000000007");
    }
}
