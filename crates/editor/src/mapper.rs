//! Conversions between world space, surface pixels and workspace pixels.
//!
//! - World: layout space scaled by the root canvas, Y up.
//! - Surface: pixels of the render surface, origin bottom-left, Y up.
//! - Workspace (viewport): host pixels, origin top-left, Y down. The preview
//!   image occupies `preview` inside it.

use crate::camera::VirtualCamera;
use glam::{UVec2, Vec2, Vec3};
use layout::Bounds;

/// Snapshot of everything needed to map between the three spaces for one
/// frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateMapper {
    pub camera: VirtualCamera,
    pub resolution: UVec2,
    pub preview: Bounds,
}

impl CoordinateMapper {
    pub fn new(camera: VirtualCamera, resolution: UVec2, preview: Bounds) -> Self {
        Self {
            camera,
            resolution: resolution.max(UVec2::ONE),
            preview,
        }
    }

    pub fn world_to_viewport(&self, point: Vec3) -> Vec2 {
        let screen = self.camera.world_to_screen(point, self.resolution);
        let normalized = screen.truncate() / self.resolution.as_vec2();
        Vec2::new(
            self.preview.min.x + normalized.x * self.preview.width(),
            self.preview.max.y - normalized.y * self.preview.height(),
        )
    }

    /// Map a workspace point onto the surface, or `None` if it lies outside
    /// the preview.
    pub fn viewport_to_surface_pixel(&self, point: Vec2) -> Option<Vec2> {
        if self.preview.is_degenerate() || !self.preview.contains_point(point) {
            return None;
        }
        let normalized = Vec2::new(
            (point.x - self.preview.min.x) / self.preview.width(),
            1.0 - (point.y - self.preview.min.y) / self.preview.height(),
        );
        Some(normalized * self.resolution.as_vec2())
    }

    pub fn surface_pixel_to_world(&self, pixel: Vec2) -> Vec2 {
        self.camera.screen_to_world(pixel, self.resolution)
    }

    pub fn viewport_to_world(&self, point: Vec2) -> Option<Vec2> {
        self.viewport_to_surface_pixel(point)
            .map(|pixel| self.surface_pixel_to_world(pixel))
    }

    /// Convert a pointer delta in workspace pixels to a world-space delta.
    pub fn viewport_delta_to_world(&self, delta: Vec2) -> Vec2 {
        if self.preview.is_degenerate() {
            return Vec2::ZERO;
        }
        let resolution = self.resolution.as_vec2();
        let surface_delta = Vec2::new(
            delta.x / self.preview.width() * resolution.x,
            -delta.y / self.preview.height() * resolution.y,
        );
        surface_delta * self.camera.world_per_pixel(self.resolution)
    }

    /// Project a world rectangle to surface pixels.
    pub fn world_to_surface_bounds(&self, world: &Bounds) -> Bounds {
        let min = self.camera.world_to_screen(world.min.extend(0.0), self.resolution);
        let max = self.camera.world_to_screen(world.max.extend(0.0), self.resolution);
        Bounds::from_corners(min.truncate(), max.truncate())
    }

    /// Project a world rectangle into the workspace.
    pub fn world_to_viewport_bounds(&self, world: &Bounds) -> Bounds {
        let a = self.world_to_viewport(world.min.extend(0.0));
        let b = self.world_to_viewport(world.max.extend(0.0));
        Bounds::from_corners(a, b)
    }
}
