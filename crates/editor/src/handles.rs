//! Resize and rotate handles around the selection.

use glam::Vec2;
use layout::Bounds;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum HandleType {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
    /// Placeholder for rotation. Hit-testable, but dragging it changes
    /// nothing.
    Rotate,
}

impl HandleType {
    /// Which edges a handle moves, per axis in layout space (Y up): `-1` for
    /// the left/bottom edge, `1` for the right/top edge, `0` if the axis is
    /// untouched.
    pub fn edge_signs(&self) -> Vec2 {
        match self {
            HandleType::TopLeft => Vec2::new(-1.0, 1.0),
            HandleType::Top => Vec2::new(0.0, 1.0),
            HandleType::TopRight => Vec2::new(1.0, 1.0),
            HandleType::Right => Vec2::new(1.0, 0.0),
            HandleType::BottomRight => Vec2::new(1.0, -1.0),
            HandleType::Bottom => Vec2::new(0.0, -1.0),
            HandleType::BottomLeft => Vec2::new(-1.0, -1.0),
            HandleType::Left => Vec2::new(-1.0, 0.0),
            HandleType::Rotate => Vec2::ZERO,
        }
    }

    pub fn is_resize(&self) -> bool {
        *self != HandleType::Rotate
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Handle {
    pub handle_type: HandleType,
    /// Workspace pixels, Y down.
    pub rect: Bounds,
}

/// Place the nine handles around `selection`, a workspace rectangle.
///
/// Handles are squares of `size` centered on the corners and edge midpoints;
/// the rotate handle sits `rotate_offset` above the top one.
pub fn handles_for(selection: &Bounds, size: f32, rotate_offset: f32) -> [Handle; 9] {
    let center = selection.center();
    let (left, right) = (selection.min.x, selection.max.x);
    // Workspace Y points down, so the top edge is min.y
    let (top, bottom) = (selection.min.y, selection.max.y);
    let square = Vec2::splat(size);

    let at = |handle_type, x: f32, y: f32| Handle {
        handle_type,
        rect: Bounds::from_center_size(Vec2::new(x, y), square),
    };

    [
        at(HandleType::TopLeft, left, top),
        at(HandleType::Top, center.x, top),
        at(HandleType::TopRight, right, top),
        at(HandleType::Right, right, center.y),
        at(HandleType::BottomRight, right, bottom),
        at(HandleType::Bottom, center.x, bottom),
        at(HandleType::BottomLeft, left, bottom),
        at(HandleType::Left, left, center.y),
        at(HandleType::Rotate, center.x, top - rotate_offset),
    ]
}

/// First handle containing `point`.
pub fn hit_handle(handles: &[Handle], point: Vec2) -> Option<HandleType> {
    handles
        .iter()
        .find(|handle| handle.rect.contains_point(point))
        .map(|handle| handle.handle_type)
}

/// New `(size_delta, anchored_position)` after dragging `handle` by `delta`
/// layout units.
///
/// The edge opposite the handle stays put: the size changes by the signed
/// delta and the center moves by half of it. The size never goes below zero.
pub fn apply_resize(
    handle: HandleType,
    size: Vec2,
    size_delta: Vec2,
    anchored_position: Vec2,
    delta: Vec2,
) -> (Vec2, Vec2) {
    let signs = handle.edge_signs();
    let mut size_delta = size_delta;
    let mut position = anchored_position;

    for axis in 0..2 {
        let sign = signs[axis];
        if sign == 0.0 {
            continue;
        }
        let change = (sign * delta[axis]).max(-size[axis].max(0.0));
        size_delta[axis] += change;
        position[axis] += sign * change * 0.5;
    }
    (size_delta, position)
}
