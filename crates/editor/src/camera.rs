use glam::{UVec2, Vec2, Vec3};
use layout::{Bounds, UI_LAYER};
use theme::{rgba, Color};

pub const DEFAULT_NEAR: f32 = -50.0;
pub const DEFAULT_FAR: f32 = 50.0;

/// Orthographic camera the preview surface is rendered through.
///
/// Screen coordinates are surface pixels with the origin at the bottom-left
/// corner and Y pointing up, matching world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VirtualCamera {
    /// World point at the center of the view.
    pub center: Vec2,
    /// Half of the visible world height.
    pub ortho_size: f32,
    /// Width over height of the target surface.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// Bit set of render layers this camera draws.
    pub layer_mask: u32,
    pub background: Color,
}

impl Default for VirtualCamera {
    fn default() -> Self {
        Self {
            center: Vec2::ZERO,
            ortho_size: 1.0,
            aspect: 1.0,
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
            layer_mask: 1 << UI_LAYER,
            background: rgba(0.1, 0.1, 0.1, 1.0),
        }
    }
}

impl VirtualCamera {
    /// A camera sized for a surface of `resolution`.
    pub fn for_surface(resolution: UVec2) -> Self {
        Self {
            aspect: aspect_of(resolution),
            ..Self::default()
        }
    }

    /// Center the camera on `bounds` and size it so the whole rectangle is
    /// visible.
    pub fn frame(&mut self, bounds: &Bounds) {
        self.center = bounds.center();
        let half_height = bounds.height() * 0.5;
        let half_width = bounds.width() * 0.5 / self.aspect;
        self.ortho_size = half_height.max(half_width).max(f32::EPSILON);
    }

    pub fn renders_layer(&self, layer: u8) -> bool {
        layer < 32 && self.layer_mask & (1 << layer) != 0
    }

    /// Visible world rectangle.
    pub fn view_bounds(&self) -> Bounds {
        let half = Vec2::new(self.ortho_size * self.aspect, self.ortho_size);
        Bounds::new(self.center - half, self.center + half)
    }

    /// World units covered by one surface pixel.
    pub fn world_per_pixel(&self, resolution: UVec2) -> f32 {
        2.0 * self.ortho_size / resolution.y.max(1) as f32
    }

    /// Project a world point to surface pixels. `z` carries the view depth.
    pub fn world_to_screen(&self, point: Vec3, resolution: UVec2) -> Vec3 {
        let view = self.view_bounds();
        let normalized = (point.truncate() - view.min) / view.size();
        (normalized * resolution.as_vec2()).extend(point.z)
    }

    pub fn screen_to_world(&self, screen: Vec2, resolution: UVec2) -> Vec2 {
        let view = self.view_bounds();
        let normalized = screen / resolution.max(UVec2::ONE).as_vec2();
        view.min + normalized * view.size()
    }

    /// True if `z` lies between the near and far planes.
    pub fn in_depth_range(&self, z: f32) -> bool {
        z >= self.near && z <= self.far
    }
}

fn aspect_of(resolution: UVec2) -> f32 {
    let resolution = resolution.max(UVec2::ONE).as_vec2();
    resolution.x / resolution.y
}
