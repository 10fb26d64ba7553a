use crate::settings::EditorSettings;
use glam::{UVec2, Vec2};
use layout::{Bounds, NodeId};

/// Camera/viewport state for the editor workspace.
///
/// The workspace is the pixel area below the toolbar where the preview and
/// its overlays are drawn. Workspace coordinates have Y pointing down.
#[derive(Clone, Debug)]
pub struct ViewportState {
    /// Zoom level (1.0 = 100%)
    pub zoom: f32,
    /// Pan offset in workspace pixels
    pub pan_offset: Vec2,
    pub selected: Option<NodeId>,
    /// Grid spacing in layout units, 0 disables the grid
    pub grid_size: u32,
    pub snap_enabled: bool,
    pub snap_threshold: f32,
    /// Workspace rectangle in host window pixels
    pub workspace: Bounds,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::from_settings(&EditorSettings::default())
    }
}

impl ViewportState {
    pub fn from_settings(settings: &EditorSettings) -> Self {
        Self {
            zoom: 1.0,
            pan_offset: Vec2::ZERO,
            selected: None,
            grid_size: settings.grid_size,
            snap_enabled: settings.snap_enabled,
            snap_threshold: settings.snap_threshold,
            workspace: Bounds::from_origin_size(
                Vec2::new(0.0, settings.toolbar_height),
                Vec2::new(1280.0, 720.0),
            ),
        }
    }

    /// Where the preview image sits inside the workspace: centered, offset by
    /// the pan, sized by zoom and keeping the surface aspect ratio.
    pub fn preview_rect(&self, resolution: UVec2, preview_scale: f32) -> Bounds {
        let resolution = resolution.max(UVec2::ONE).as_vec2();
        let width = resolution.x * self.zoom * preview_scale;
        let height = width * resolution.y / resolution.x;
        Bounds::from_center_size(
            self.workspace.center() + self.pan_offset,
            Vec2::new(width, height),
        )
    }

    /// Apply a scroll-wheel delta. Scrolling down zooms out.
    pub fn zoom_by(&mut self, scroll_delta: f32, settings: &EditorSettings) -> bool {
        let old_zoom = self.zoom;
        self.zoom = (self.zoom - scroll_delta * settings.zoom_step)
            .clamp(settings.min_zoom, settings.max_zoom);
        self.zoom != old_zoom
    }

    /// Pan the preview by a delta in workspace pixels.
    pub fn pan(&mut self, delta: Vec2) {
        self.pan_offset += delta;
    }

    /// Reset to default view.
    pub fn reset_view(&mut self) {
        self.pan_offset = Vec2::ZERO;
        self.zoom = 1.0;
    }
}
