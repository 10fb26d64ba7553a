use layout::NodeId;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
    Middle,
}

/// Things the host should react to after an input or edit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorEvent {
    SelectionChanged(Option<NodeId>),
    /// Geometry of a node changed through a drag or resize.
    NodeChanged(NodeId),
    NodeAdded(NodeId),
    NodeRemoved(NodeId),
    /// Zoom, pan, grid, snap or preset changed.
    ViewChanged,
    /// The preview surface was (re)created.
    SurfaceRebuilt,
    RedrawNeeded,
}
