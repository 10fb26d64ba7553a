//! Layout tree for the editor.
//!
//! Nodes live in an arena owned by [`LayoutTree`]. Each node is positioned
//! against its parent's rectangle through normalized anchors, an anchored
//! position and a size delta; world rectangles are derived on demand by
//! walking the anchor chain up to the root canvas.
//!
//! Layout and world space both have Y pointing up.

mod bounds;
mod document;
mod error;
mod node;
mod node_id;
mod tree;

pub use bounds::Bounds;
pub use document::{LayoutDocument, NodeTemplate};
pub use error::LayoutError;
pub use node::{UiNode, UI_LAYER};
pub use node_id::{NodeId, NodeUid};
pub use tree::{DepthFirst, LayoutTree};
