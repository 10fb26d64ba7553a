//! Per-frame overlay geometry.
//!
//! Everything drawn on top of the preview is recomputed from the current
//! editor state every frame. Nothing here is stored between frames.

use crate::handles::{handles_for, Handle};
use crate::mapper::CoordinateMapper;
use crate::settings::EditorSettings;
use crate::snap::{Axis, SnapGuide};
use glam::Vec2;
use layout::{Bounds, LayoutTree, NodeId};
use serde::{Deserialize, Serialize};

/// Grid lines closer than this many workspace pixels are not drawn.
pub const MIN_GRID_SPACING: f32 = 4.0;

/// A line segment in workspace pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub from: Vec2,
    pub to: Vec2,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Overlay {
    pub preview: Bounds,
    pub grid_lines: Vec<Line>,
    pub selection: Option<Bounds>,
    /// Outline of the selection's parent, unless the parent is the root.
    pub parent: Option<Bounds>,
    pub siblings: Vec<Bounds>,
    pub handles: Vec<Handle>,
    pub guides: Vec<Line>,
}

/// Inputs to one overlay computation.
pub struct OverlayInput<'a> {
    pub tree: &'a LayoutTree,
    pub root: NodeId,
    pub mapper: &'a CoordinateMapper,
    pub settings: &'a EditorSettings,
    pub grid_size: u32,
    pub selected: Option<NodeId>,
    pub guides: &'a [SnapGuide],
}

pub fn compute_overlay(input: &OverlayInput) -> Overlay {
    let OverlayInput {
        tree,
        root,
        mapper,
        settings,
        grid_size,
        selected,
        guides,
    } = *input;

    let mut overlay = Overlay {
        preview: mapper.preview,
        ..Default::default()
    };
    let Some(root_world) = tree.world_bounds(root) else {
        return overlay;
    };

    overlay.grid_lines = grid_lines(tree, mapper, &root_world, grid_size);

    if let Some(selected) = selected.filter(|&id| id != root && tree.contains(id)) {
        let project = |id: NodeId| {
            tree.world_bounds(id)
                .map(|world| mapper.world_to_viewport_bounds(&world))
        };

        if let Some(rect) = project(selected) {
            overlay.selection = Some(rect);
            overlay.handles =
                handles_for(&rect, settings.handle_size, settings.rotate_handle_offset).to_vec();
        }
        if let Some(parent) = tree.parent_of(selected) {
            if parent != root {
                overlay.parent = project(parent);
            }
            overlay.siblings = tree
                .children_of(parent)
                .iter()
                .filter(|&&id| id != selected && tree.is_active_in_hierarchy(id))
                .filter_map(|&id| project(id))
                .collect();
        }
    }

    overlay.guides = guides
        .iter()
        .filter(|guide| guide.visible)
        .map(|guide| guide_line(mapper, &root_world, guide))
        .collect();

    overlay
}

fn grid_lines(
    tree: &LayoutTree,
    mapper: &CoordinateMapper,
    root_world: &Bounds,
    grid_size: u32,
) -> Vec<Line> {
    if grid_size == 0 || root_world.is_degenerate() {
        return Vec::new();
    }
    let step = grid_size as f32 * tree.scale_factor();
    let spacing = mapper.world_to_viewport(Vec2::new(step, 0.0).extend(0.0)).x
        - mapper.world_to_viewport(Vec2::ZERO.extend(0.0)).x;
    if spacing.abs() < MIN_GRID_SPACING {
        return Vec::new();
    }

    let mut lines = Vec::new();
    let columns = (root_world.width() / step).floor() as u32;
    for i in 0..=columns {
        let x = root_world.min.x + i as f32 * step;
        lines.push(world_line(
            mapper,
            Vec2::new(x, root_world.min.y),
            Vec2::new(x, root_world.max.y),
        ));
    }
    let rows = (root_world.height() / step).floor() as u32;
    for i in 0..=rows {
        let y = root_world.min.y + i as f32 * step;
        lines.push(world_line(
            mapper,
            Vec2::new(root_world.min.x, y),
            Vec2::new(root_world.max.x, y),
        ));
    }
    lines
}

fn guide_line(mapper: &CoordinateMapper, root_world: &Bounds, guide: &SnapGuide) -> Line {
    match guide.axis {
        Axis::X => world_line(
            mapper,
            Vec2::new(guide.position, root_world.min.y),
            Vec2::new(guide.position, root_world.max.y),
        ),
        Axis::Y => world_line(
            mapper,
            Vec2::new(root_world.min.x, guide.position),
            Vec2::new(root_world.max.x, guide.position),
        ),
    }
}

fn world_line(mapper: &CoordinateMapper, from: Vec2, to: Vec2) -> Line {
    Line {
        from: mapper.world_to_viewport(from.extend(0.0)),
        to: mapper.world_to_viewport(to.extend(0.0)),
    }
}
