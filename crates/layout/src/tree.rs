use crate::{Bounds, LayoutError, NodeId, NodeUid, UiNode};
use glam::{Vec2, Vec3};
use slotmap::SlotMap;
use theme::Theme;

/// Arena-backed layout hierarchy with a single root canvas.
///
/// The tree owns every node; parent links are plain [`NodeId`]s into the
/// arena, so there are no ownership cycles. Removing a node removes its whole
/// subtree from the arena, which is what invalidates any handle to it.
///
/// The root canvas is laid out in layout units of `root_size`. World space is
/// layout space scaled by the canvas `scale_factor`, with the root's
/// bottom-left corner at the world origin.
pub struct LayoutTree {
    nodes: SlotMap<NodeId, UiNode>,
    root: NodeId,
    root_size: Vec2,
    scale_factor: f32,

    /// Bumped on every insert, remove and reparent.
    structure_revision: u64,
    /// Source of per-node geometry revisions.
    revision_counter: u64,
}

impl LayoutTree {
    pub fn new(root_size: Vec2, scale_factor: f32) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(UiNode::new("Canvas"));
        Self {
            nodes,
            root,
            root_size: root_size.max(Vec2::ZERO),
            scale_factor: sanitize_scale(scale_factor),
            structure_revision: 0,
            revision_counter: 0,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn root_size(&self) -> Vec2 {
        self.root_size
    }

    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    pub fn set_root_size(&mut self, size: Vec2) {
        self.root_size = size.max(Vec2::ZERO);
        self.bump(self.root);
    }

    pub fn set_scale_factor(&mut self, scale_factor: f32) {
        self.scale_factor = sanitize_scale(scale_factor);
        self.bump(self.root);
    }

    /// Resize the root canvas so that it covers `resolution` pixels at the
    /// current scale factor.
    pub fn fit_root_to_resolution(&mut self, resolution: Vec2) {
        self.set_root_size(resolution / self.scale_factor);
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root canvas cannot be removed.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn get(&self, id: NodeId) -> Option<&UiNode> {
        self.nodes.get(id)
    }

    /// Mutable access for non-geometric fields (name, fill, active...).
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut UiNode> {
        self.nodes.get_mut(id)
    }

    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|node| node.parent)
    }

    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn find_by_uid(&self, uid: NodeUid) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|(_, node)| node.uid == uid)
            .map(|(id, _)| id)
    }

    /// First node named `name` in depth-first order.
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.depth_first()
            .find(|&id| self.nodes.get(id).is_some_and(|node| node.name == name))
    }

    /// True if `ancestor` is a strict ancestor of `node`.
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.parent_of(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent_of(id);
        }
        false
    }

    /// True if the node and all of its ancestors are active.
    pub fn is_active_in_hierarchy(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(id) = current {
            match self.nodes.get(id) {
                Some(node) if node.active => current = node.parent,
                _ => return false,
            }
        }
        true
    }

    /// Depth-first traversal of the whole tree, root first, parents before
    /// children, siblings in child-list order.
    pub fn depth_first(&self) -> DepthFirst<'_> {
        self.descendants(self.root)
    }

    /// Depth-first traversal of the subtree rooted at `id` (inclusive).
    pub fn descendants(&self, id: NodeId) -> DepthFirst<'_> {
        let stack = if self.contains(id) { vec![id] } else { Vec::new() };
        DepthFirst { tree: self, stack }
    }

    // === Structure ===

    /// Append `node` as the last child of `parent`.
    pub fn insert(&mut self, parent: NodeId, mut node: UiNode) -> Result<NodeId, LayoutError> {
        if !self.contains(parent) {
            return Err(LayoutError::UnknownNode(parent));
        }
        if self.find_by_uid(node.uid).is_some() {
            return Err(LayoutError::DuplicateUid(node.uid));
        }

        node.parent = Some(parent);
        node.children.clear();
        let id = self.nodes.insert(node);
        self.nodes[parent].children.push(id);
        self.bump(id);
        self.structure_revision += 1;
        tracing::debug!(?id, ?parent, "node inserted");
        Ok(id)
    }

    /// Remove a node and its whole subtree. Returns the removed handles,
    /// `id` first.
    pub fn remove(&mut self, id: NodeId) -> Result<Vec<NodeId>, LayoutError> {
        if id == self.root {
            return Err(LayoutError::RootImmutable);
        }
        let parent = self.parent_of(id).ok_or(LayoutError::UnknownNode(id))?;

        let removed: Vec<NodeId> = self.descendants(id).collect();
        self.nodes[parent].children.retain(|&child| child != id);
        for &gone in &removed {
            self.nodes.remove(gone);
        }
        self.structure_revision += 1;
        tracing::debug!(?id, count = removed.len(), "subtree removed");
        Ok(removed)
    }

    /// Move `id` to the end of `new_parent`'s children. Anchor state is kept
    /// as is, so the node is laid out against its new parent.
    pub fn reparent(&mut self, id: NodeId, new_parent: NodeId) -> Result<(), LayoutError> {
        if id == self.root {
            return Err(LayoutError::RootImmutable);
        }
        if !self.contains(new_parent) {
            return Err(LayoutError::UnknownNode(new_parent));
        }
        let old_parent = self.parent_of(id).ok_or(LayoutError::UnknownNode(id))?;
        if new_parent == id || self.is_ancestor(id, new_parent) {
            return Err(LayoutError::Cycle {
                node: id,
                parent: new_parent,
            });
        }

        self.nodes[old_parent].children.retain(|&child| child != id);
        self.nodes[new_parent].children.push(id);
        self.nodes[id].parent = Some(new_parent);
        self.bump(id);
        self.structure_revision += 1;
        Ok(())
    }

    /// Revision counter for structural edits.
    pub fn structure_revision(&self) -> u64 {
        self.structure_revision
    }

    /// Latest geometry revision along the node's ancestor chain (inclusive).
    ///
    /// A node's size depends on every ancestor's size, so this changes
    /// whenever anything that affects the node's layout space changes.
    pub fn chain_revision(&self, id: NodeId) -> u64 {
        let mut revision = 0;
        let mut current = Some(id);
        while let Some(id) = current {
            match self.nodes.get(id) {
                Some(node) => {
                    revision = revision.max(node.revision);
                    current = node.parent;
                }
                None => break,
            }
        }
        revision
    }

    // === Geometry edits ===

    pub fn set_anchored_position(&mut self, id: NodeId, position: Vec2) -> bool {
        self.edit(id, |node| node.anchored_position = position)
    }

    pub fn set_size_delta(&mut self, id: NodeId, size_delta: Vec2) -> bool {
        self.edit(id, |node| node.size_delta = size_delta)
    }

    pub fn set_anchors(&mut self, id: NodeId, min: Vec2, max: Vec2) -> bool {
        self.edit(id, |node| {
            node.anchor_min = min.clamp(Vec2::ZERO, Vec2::ONE);
            node.anchor_max = max.clamp(Vec2::ZERO, Vec2::ONE);
        })
    }

    fn edit(&mut self, id: NodeId, f: impl FnOnce(&mut UiNode)) -> bool {
        if id == self.root {
            return false;
        }
        match self.nodes.get_mut(id) {
            Some(node) => {
                f(node);
                self.bump(id);
                true
            }
            None => false,
        }
    }

    fn bump(&mut self, id: NodeId) {
        self.revision_counter += 1;
        if let Some(node) = self.nodes.get_mut(id) {
            node.revision = self.revision_counter;
        }
    }

    // === Derived geometry ===

    /// Width and height of a node in layout units.
    pub fn layout_size(&self, id: NodeId) -> Option<Vec2> {
        self.resolve(id).map(|rect| rect.size())
    }

    /// Node rectangle in its parent's layout space (origin at the parent's
    /// bottom-left corner).
    pub fn local_bounds(&self, id: NodeId) -> Option<Bounds> {
        let node = self.nodes.get(id)?;
        self.local_bounds_at(id, node.anchored_position)
    }

    /// Like [`local_bounds`](Self::local_bounds) but with a hypothetical
    /// anchored position, without mutating the node.
    pub fn local_bounds_at(&self, id: NodeId, anchored_position: Vec2) -> Option<Bounds> {
        if id == self.root {
            return Some(Bounds::from_origin_size(Vec2::ZERO, self.root_size));
        }
        let node = self.nodes.get(id)?;
        let parent_size = self.layout_size(node.parent?)?;
        Some(place(node, parent_size, anchored_position))
    }

    /// Node rectangle in world space.
    pub fn world_bounds(&self, id: NodeId) -> Option<Bounds> {
        self.resolve(id).map(|rect| rect.scale(self.scale_factor))
    }

    /// World-space corners, bottom-left, top-left, top-right, bottom-right.
    pub fn world_corners(&self, id: NodeId) -> Option<[Vec3; 4]> {
        let bounds = self.world_bounds(id)?;
        Some(bounds.corners().map(|corner| corner.extend(0.0)))
    }

    /// Combined scale from layout units of `id`'s parent space to world units.
    pub fn scale_factor_of(&self, id: NodeId) -> Option<f32> {
        self.contains(id).then_some(self.scale_factor)
    }

    /// Map a point in `parent`'s layout space to world space.
    pub fn local_to_world(&self, parent: NodeId, point: Vec2) -> Option<Vec2> {
        let origin = self.resolve(parent)?.min;
        Some((origin + point) * self.scale_factor)
    }

    /// Rectangle of `id` in root layout space, computed from the anchor chain.
    fn resolve(&self, id: NodeId) -> Option<Bounds> {
        let mut path = Vec::new();
        let mut current = Some(id);
        while let Some(id) = current {
            let node = self.nodes.get(id)?;
            path.push(id);
            current = node.parent;
        }

        let mut rect = Bounds::from_origin_size(Vec2::ZERO, self.root_size);
        // path ends with the root
        for &id in path.iter().rev().skip(1) {
            let node = &self.nodes[id];
            let local = place(node, rect.size(), node.anchored_position);
            rect = local.translate(rect.min);
        }
        Some(rect)
    }

    // === Theme ===

    /// Re-resolve fill colors for the subtree rooted at `id`.
    pub fn apply_theme(&mut self, id: NodeId, theme: &Theme) {
        let subtree: Vec<NodeId> = self.descendants(id).collect();
        for id in subtree {
            if let Some(node) = self.nodes.get_mut(id) {
                node.apply_theme(theme);
            }
        }
    }
}

impl theme::ThemeObserver for LayoutTree {
    fn on_theme_changed(&mut self, theme: &Theme) {
        self.apply_theme(self.root, theme);
    }
}

/// Place `node` inside a parent of `parent_size`.
fn place(node: &UiNode, parent_size: Vec2, anchored_position: Vec2) -> Bounds {
    let anchor_lo = parent_size * node.anchor_min;
    let anchor_hi = parent_size * node.anchor_max;
    let size = (anchor_hi - anchor_lo) + node.size_delta;
    let reference = (anchor_lo + anchor_hi) * 0.5;
    Bounds::from_center_size(reference + anchored_position, size)
}

fn sanitize_scale(scale_factor: f32) -> f32 {
    if scale_factor.is_finite() && scale_factor > 0.0 {
        scale_factor
    } else {
        1.0
    }
}

/// Pre-order iterator over a subtree.
pub struct DepthFirst<'a> {
    tree: &'a LayoutTree,
    stack: Vec<NodeId>,
}

impl Iterator for DepthFirst<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children_of(id).iter().rev().copied());
        Some(id)
    }
}
