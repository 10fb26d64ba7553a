//! Editor configuration.
//!
//! Settings are plain JSON; every field is optional and falls back to the
//! defaults below.

use glam::UVec2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Grid sizes offered by the toolbar. `0` disables the grid.
pub const GRID_SIZES: [u32; 7] = [0, 4, 8, 10, 16, 32, 64];

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Device resolution the preview surface is rendered at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DevicePreset {
    #[default]
    Pc,
    Phone,
    Tablet,
    Square,
    Custom {
        width: u32,
        height: u32,
    },
}

impl DevicePreset {
    pub const BUILT_IN: [DevicePreset; 4] = [
        DevicePreset::Pc,
        DevicePreset::Phone,
        DevicePreset::Tablet,
        DevicePreset::Square,
    ];

    pub fn resolution(&self) -> UVec2 {
        match *self {
            DevicePreset::Pc => UVec2::new(1920, 1080),
            DevicePreset::Phone => UVec2::new(1080, 1920),
            DevicePreset::Tablet => UVec2::new(1536, 2048),
            DevicePreset::Square => UVec2::new(1024, 1024),
            DevicePreset::Custom { width, height } => UVec2::new(width.max(1), height.max(1)),
        }
    }
}

impl fmt::Display for DevicePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DevicePreset::Pc => "PC",
            DevicePreset::Phone => "Phone",
            DevicePreset::Tablet => "Tablet",
            DevicePreset::Square => "Square",
            DevicePreset::Custom { .. } => "Custom",
        };
        let resolution = self.resolution();
        write!(f, "{label} {}x{}", resolution.x, resolution.y)
    }
}

/// How strongly a snap match pulls the node onto the aligned edge.
///
/// With a threshold of 10, a node whose right edge is proposed at 205 next
/// to a sibling edge at 200 lands at 202.5 under `Linear` and at exactly 200
/// under `Hard`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapFalloff {
    /// Pull fades linearly from full strength at distance 0 to nothing at
    /// the threshold.
    #[default]
    Linear,
    /// Any match within the threshold lands exactly on the aligned edge.
    Hard,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    pub min_zoom: f32,
    pub max_zoom: f32,
    /// Zoom change per scroll-wheel unit.
    pub zoom_step: f32,
    /// Preview width in workspace pixels is `resolution.x * zoom * preview_scale`.
    pub preview_scale: f32,
    /// Height of the toolbar strip above the workspace.
    pub toolbar_height: f32,

    pub double_click_interval_ms: u64,
    pub redraw_interval_ms: u64,

    pub handle_size: f32,
    /// Distance of the rotate handle above the top-middle handle.
    pub rotate_handle_offset: f32,

    pub snap_enabled: bool,
    pub snap_threshold: f32,
    pub snap_falloff: SnapFalloff,
    pub grid_size: u32,

    pub device_preset: DevicePreset,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            min_zoom: 0.01,
            max_zoom: 4.0,
            zoom_step: 0.02,
            preview_scale: 0.25,
            toolbar_height: 20.0,
            double_click_interval_ms: 250,
            redraw_interval_ms: 33,
            handle_size: 10.0,
            rotate_handle_offset: 20.0,
            snap_enabled: true,
            snap_threshold: 10.0,
            snap_falloff: SnapFalloff::Linear,
            grid_size: 0,
            device_preset: DevicePreset::Pc,
        }
    }
}

impl EditorSettings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    /// Clamp values into ranges the editor can work with. Non-finite values
    /// fall back to their defaults.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        self.min_zoom = finite_or(self.min_zoom, defaults.min_zoom).max(f32::EPSILON);
        self.max_zoom = finite_or(self.max_zoom, defaults.max_zoom).max(self.min_zoom);
        self.zoom_step = finite_or(self.zoom_step, defaults.zoom_step).max(0.0);
        self.preview_scale =
            finite_or(self.preview_scale, defaults.preview_scale).max(f32::EPSILON);
        self.toolbar_height = finite_or(self.toolbar_height, defaults.toolbar_height).max(0.0);
        self.handle_size = finite_or(self.handle_size, defaults.handle_size).max(1.0);
        self.rotate_handle_offset =
            finite_or(self.rotate_handle_offset, defaults.rotate_handle_offset);
        self.snap_threshold = finite_or(self.snap_threshold, defaults.snap_threshold).max(0.0);
        self
    }

    pub fn double_click_interval(&self) -> Duration {
        Duration::from_millis(self.double_click_interval_ms)
    }

    pub fn redraw_interval(&self) -> Duration {
        Duration::from_millis(self.redraw_interval_ms)
    }
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}
