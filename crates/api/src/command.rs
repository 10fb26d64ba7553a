//! Editor commands: every operation that changes editor state.
//!
//! Pointer commands are expressed in workspace pixels (Y down), the same
//! coordinates a host window would forward. Commands serialize as tagged
//! JSON so they can be recorded, scripted and replayed.

use crate::NodeRef;
use editor::{DevicePreset, PointerButton};
use glam::Vec2;
use layout::{NodeTemplate, NodeUid};
use serde::{Deserialize, Serialize};
use theme::ThemePreset;

/// A command that modifies editor state.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    // === Pointer ===
    /// Press a pointer button.
    PointerDown {
        position: Vec2,
        #[serde(default)]
        button: PointerButton,
        /// Press time in milliseconds. Defaults to the session clock.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        time_ms: Option<u64>,
    },

    /// Move the pointer while `button` is held.
    PointerMove {
        position: Vec2,
        #[serde(default)]
        button: PointerButton,
    },

    /// Release a pointer button.
    PointerUp {
        #[serde(default)]
        button: PointerButton,
    },

    /// Scroll-wheel zoom. Positive (scrolling down) zooms out.
    Scroll { delta: f32 },

    /// Pan the preview by a middle-button drag of `delta` pixels.
    Pan { delta: Vec2 },

    /// Advance the session clock and run a redraw tick.
    Wait { ms: u64 },

    // === View ===
    /// Place the workspace inside the host window.
    SetWorkspace { origin: Vec2, size: Vec2 },

    /// Set the grid size in layout units, 0 disables the grid.
    SetGrid { size: u32 },

    /// Toggle alignment snapping, optionally changing the threshold.
    SetSnap {
        enabled: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        threshold: Option<f32>,
    },

    /// Switch the device resolution preset.
    SetPreset { preset: DevicePreset },

    /// Zoom back to 100% and drop the pan.
    ResetView,

    /// Recreate the preview surface.
    Rebuild,

    /// Switch the active theme.
    SetTheme { preset: ThemePreset },

    // === Selection ===
    /// Select a node as a hierarchy panel would.
    Select { target: NodeRef },

    ClearSelection,

    // === Structure ===
    /// Graft a template subtree under `parent` (the root by default) and
    /// select its top node.
    Instantiate {
        #[serde(default = "default_parent")]
        parent: NodeRef,
        template: NodeTemplate,
    },

    /// Delete a node and its subtree.
    Delete {
        #[serde(default)]
        target: NodeRef,
    },

    /// Move a node under a new parent.
    Reparent { target: NodeRef, parent: NodeRef },

    /// Run several commands in order.
    Batch { commands: Vec<Command> },
}

fn default_parent() -> NodeRef {
    NodeRef::Root
}

/// Outcome of a command.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CommandResult {
    Success {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        created: Vec<NodeUid>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        modified: Vec<NodeUid>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        deleted: Vec<NodeUid>,
        /// Set when the selection changed.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        selection: Option<SelectionChange>,
    },
    Error {
        message: String,
    },
}

/// New selection after a command, `uid: None` when it was cleared.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelectionChange {
    pub uid: Option<NodeUid>,
}

impl CommandResult {
    pub fn success() -> Self {
        Self::Success {
            created: vec![],
            modified: vec![],
            deleted: vec![],
            selection: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Fold another result into this one. Errors win.
    pub fn merge(self, other: CommandResult) -> Self {
        match (self, other) {
            (
                Self::Success {
                    mut created,
                    mut modified,
                    mut deleted,
                    selection,
                },
                Self::Success {
                    created: more_created,
                    modified: more_modified,
                    deleted: more_deleted,
                    selection: later_selection,
                },
            ) => {
                created.extend(more_created);
                for uid in more_modified {
                    if !modified.contains(&uid) {
                        modified.push(uid);
                    }
                }
                deleted.extend(more_deleted);
                Self::Success {
                    created,
                    modified,
                    deleted,
                    selection: later_selection.or(selection),
                }
            }
            (error @ Self::Error { .. }, _) | (_, error @ Self::Error { .. }) => error,
        }
    }
}
