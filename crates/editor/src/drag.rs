use crate::handles::HandleType;
use crate::mapper::CoordinateMapper;
use glam::Vec2;
use layout::NodeId;

/// Snap `position` to the nearest multiple of `grid_size` on each axis,
/// rounding halves away from zero. A grid size of 0 leaves it untouched.
pub fn quantize(position: Vec2, grid_size: u32) -> Vec2 {
    if grid_size == 0 {
        return position;
    }
    let grid = grid_size as f32;
    (position / grid).round() * grid
}

/// Convert a pointer delta in workspace pixels to layout units of a node
/// whose coordinate scale factor is `scale_factor`.
pub fn pointer_delta_to_layout(mapper: &CoordinateMapper, delta: Vec2, scale_factor: f32) -> Vec2 {
    mapper.viewport_delta_to_world(delta) / scale_factor.max(f32::EPSILON)
}

/// One step of a drag: where the pointer wants the node to be.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragStep {
    /// Grid-quantized position, before alignment snapping.
    pub proposal: Vec2,
    /// Layout-space pointer motion since the previous step.
    pub motion: Vec2,
}

/// An in-progress move of a single node.
///
/// The session accumulates the unsnapped position the pointer has carried
/// the node to, so grid and alignment snapping never hold the node back.
#[derive(Clone, Debug, PartialEq)]
pub struct DragSession {
    pub node: NodeId,
    last_pointer: Vec2,
    raw_position: Vec2,
}

impl DragSession {
    pub fn begin(node: NodeId, pointer: Vec2, anchored_position: Vec2) -> Self {
        tracing::debug!(?node, "drag started");
        Self {
            node,
            last_pointer: pointer,
            raw_position: anchored_position,
        }
    }

    pub fn raw_position(&self) -> Vec2 {
        self.raw_position
    }

    /// Advance the drag to `pointer`. Pointer samples outside the preview
    /// are ignored and do not move the reference point.
    pub fn update(
        &mut self,
        pointer: Vec2,
        mapper: &CoordinateMapper,
        scale_factor: f32,
        grid_size: u32,
    ) -> Option<DragStep> {
        if !mapper.preview.contains_point(pointer) || mapper.preview.is_degenerate() {
            return None;
        }
        let motion = pointer_delta_to_layout(mapper, pointer - self.last_pointer, scale_factor);
        self.last_pointer = pointer;
        self.raw_position += motion;
        Some(DragStep {
            proposal: quantize(self.raw_position, grid_size),
            motion,
        })
    }
}

/// An in-progress resize through one of the selection handles.
#[derive(Clone, Debug, PartialEq)]
pub struct ResizeSession {
    pub node: NodeId,
    pub handle: HandleType,
    last_pointer: Vec2,
}

impl ResizeSession {
    pub fn begin(node: NodeId, handle: HandleType, pointer: Vec2) -> Self {
        tracing::debug!(?node, %handle, "resize started");
        Self {
            node,
            handle,
            last_pointer: pointer,
        }
    }

    /// Layout-space delta since the previous sample.
    pub fn update(
        &mut self,
        pointer: Vec2,
        mapper: &CoordinateMapper,
        scale_factor: f32,
    ) -> Vec2 {
        let delta = pointer_delta_to_layout(mapper, pointer - self.last_pointer, scale_factor);
        self.last_pointer = pointer;
        delta
    }
}
