use serde::{Deserialize, Serialize};
use std::fmt;

slotmap::new_key_type! {
    /// Arena handle of a node inside a [`LayoutTree`](crate::LayoutTree).
    ///
    /// Handles are generational: a handle to a removed node never resolves
    /// to a node inserted later.
    pub struct NodeId;
}

/// Stable identity of a node, preserved across save and load.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeUid(uuid::Uuid);

impl NodeUid {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Create a NodeUid from a u128 (useful for tests).
    pub fn from_u128(value: u128) -> Self {
        Self(uuid::Uuid::from_u128(value))
    }

    /// Parse a full UUID string.
    pub fn parse(s: &str) -> Option<Self> {
        uuid::Uuid::parse_str(s).ok().map(Self)
    }
}

impl Default for NodeUid {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for NodeUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeUid({})", &self.0.to_string()[..8])
    }
}

impl fmt::Display for NodeUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}
