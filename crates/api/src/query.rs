//! Read-only access to editor state.

use crate::NodeRef;
use editor::{DevicePreset, Overlay};
use glam::{UVec2, Vec2};
use layout::{Bounds, NodeUid};
use serde::{Deserialize, Serialize};

/// A query for editor state.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Query {
    /// Get the current selection.
    GetSelection,

    /// Get a node's geometry.
    GetNode {
        #[serde(default)]
        target: NodeRef,
    },

    /// Get zoom, pan and the other view settings.
    GetViewport,

    /// Get the overlay the host would draw this frame.
    GetOverlay,

    /// Get the active pointer interaction.
    GetInteraction,
}

/// Response to a query.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QueryResult {
    Selection {
        uid: Option<NodeUid>,
        name: Option<String>,
    },

    Node { node: NodeInfo },

    Viewport {
        zoom: f32,
        pan_offset: Vec2,
        grid_size: u32,
        snap_enabled: bool,
        snap_threshold: f32,
        preset: DevicePreset,
        resolution: UVec2,
        /// Preview rectangle in workspace pixels, absent without a surface.
        preview: Option<Bounds>,
    },

    Overlay { overlay: Option<Overlay> },

    Interaction {
        /// One of `idle`, `dragging`, `resizing`, `panning`.
        state: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        node: Option<NodeUid>,
    },

    Error { message: String },
}

/// Serializable node geometry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeInfo {
    pub uid: NodeUid,
    pub name: String,
    pub active: bool,
    pub anchored_position: Vec2,
    pub size_delta: Vec2,
    /// Layout-space size after anchoring.
    pub size: Vec2,
    /// World rectangle, Y up.
    pub world: Bounds,
    /// Rectangle in workspace pixels, Y down. Absent without a surface.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace: Option<Bounds>,
    pub children: Vec<NodeUid>,
}

impl QueryResult {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}
