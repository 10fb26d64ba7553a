use crate::{NodeId, NodeUid};
use glam::Vec2;
use theme::{Color, ColorRole, Theme};

/// Render layer UI nodes live on by default.
pub const UI_LAYER: u8 = 5;

/// A rectangle in the layout hierarchy.
///
/// Geometry is expressed against the parent's rectangle:
///
/// - `anchor_min` / `anchor_max` pick a sub-rectangle of the parent in
///   normalized (0..1) coordinates.
/// - The node's size is the anchor rectangle's size plus `size_delta`.
/// - The node's center sits at the anchor rectangle's midpoint offset by
///   `anchored_position`.
///
/// Geometry is only mutable through [`LayoutTree`](crate::LayoutTree) so the
/// tree can track revisions for derived caches.
#[derive(Clone, Debug)]
pub struct UiNode {
    pub uid: NodeUid,
    pub name: String,

    /// Inactive nodes are neither rendered, hit nor used as snap targets.
    pub active: bool,
    pub layer: u8,

    /// Theme slot this node is filled from, if any.
    pub fill: Option<ColorRole>,
    /// Resolved fill color; `None` paints nothing.
    pub color: Option<Color>,

    // Hierarchy
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,

    // Geometry
    pub(crate) anchor_min: Vec2,
    pub(crate) anchor_max: Vec2,
    pub(crate) anchored_position: Vec2,
    pub(crate) size_delta: Vec2,

    pub(crate) revision: u64,
}

impl UiNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            uid: NodeUid::new(),
            name: name.into(),
            active: true,
            layer: UI_LAYER,
            fill: None,
            color: None,
            parent: None,
            children: Vec::new(),
            anchor_min: Vec2::ZERO,
            anchor_max: Vec2::ZERO,
            anchored_position: Vec2::ZERO,
            size_delta: Vec2::ZERO,
            revision: 0,
        }
    }

    /// A fixed-size node anchored at its parent's bottom-left corner, with its
    /// center at `center`.
    pub fn rect(name: impl Into<String>, center: Vec2, size: Vec2) -> Self {
        Self::new(name)
            .with_anchored_position(center)
            .with_size_delta(size)
    }

    pub fn with_uid(mut self, uid: NodeUid) -> Self {
        self.uid = uid;
        self
    }

    pub fn with_anchors(mut self, min: Vec2, max: Vec2) -> Self {
        self.anchor_min = min.clamp(Vec2::ZERO, Vec2::ONE);
        self.anchor_max = max.clamp(Vec2::ZERO, Vec2::ONE);
        self
    }

    pub fn with_anchored_position(mut self, position: Vec2) -> Self {
        self.anchored_position = position;
        self
    }

    pub fn with_size_delta(mut self, size_delta: Vec2) -> Self {
        self.size_delta = size_delta;
        self
    }

    pub fn with_fill(mut self, role: ColorRole) -> Self {
        self.fill = Some(role);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn anchor_min(&self) -> Vec2 {
        self.anchor_min
    }

    pub fn anchor_max(&self) -> Vec2 {
        self.anchor_max
    }

    pub fn anchored_position(&self) -> Vec2 {
        self.anchored_position
    }

    pub fn size_delta(&self) -> Vec2 {
        self.size_delta
    }

    /// Revision stamp of the last geometric change to this node.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Re-resolve the fill color from `theme`.
    pub fn apply_theme(&mut self, theme: &Theme) {
        if let Some(role) = self.fill {
            self.color = Some(theme.color(role));
        }
    }
}
