//! Theming for laid-out UI nodes and the editor chrome.
//!
//! Provides the color roles nodes can be filled with, the light and dark
//! themes, and the [`ThemeManager`] registry that broadcasts the active
//! theme to registered observers.

mod manager;

pub use manager::{ThemeManager, ThemeObserver};

use palette::{FromColor, Hsla, Srgba};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Color type used throughout the editor.
pub type Color = Srgba;

/// The theme slot a node pulls its fill color from.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ColorRole {
    #[default]
    Primary,
    Secondary,
    Background,
    Accent,
    Text,
}

/// Named theme presets.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ThemePreset {
    #[default]
    Light,
    Dark,
}

/// Theme colors for themed nodes and the editor overlay.
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    pub name: String,

    // Node fills
    pub primary: Color,
    pub secondary: Color,
    pub background: Color,
    pub text: Color,
    pub accent: Color,

    /// Corner radius hint for themed components.
    pub border_radius: f32,
    pub shadow_strength: f32,

    // Editor chrome
    /// Clear color of the preview camera
    pub canvas_background: Color,

    /// Outline of the selected node
    pub selection: Color,

    /// Outline of the selection's parent and siblings
    pub hierarchy: Color,

    /// Alignment guides
    pub guide: Color,

    pub handle: Color,
    pub rotate_handle: Color,

    /// Grid lines (if shown)
    pub grid: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light".into(),
            primary: rgba(1.0, 1.0, 1.0, 1.0),
            secondary: rgba(0.5, 0.5, 0.5, 1.0),
            background: rgba(0.5, 0.5, 0.5, 1.0),
            text: rgba(1.0, 1.0, 1.0, 1.0),
            accent: rgba(0.2, 0.5, 1.0, 1.0),
            border_radius: 8.0,
            shadow_strength: 0.4,
            canvas_background: rgba(0.1, 0.1, 0.1, 1.0),
            selection: rgba(1.0, 0.92, 0.016, 1.0), // Yellow
            hierarchy: rgba(0.7, 0.7, 0.7, 1.0),
            guide: rgba(1.0, 0.2, 0.2, 0.9),
            handle: rgba(1.0, 1.0, 1.0, 1.0),
            rotate_handle: rgba(0.4, 0.8, 1.0, 1.0),
            grid: rgba(0.0, 0.0, 0.0, 0.1),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark".into(),
            primary: hsla(0.0, 0.0, 0.16, 1.0),
            secondary: hsla(0.0, 0.0, 0.3, 1.0),
            background: hsla(0.0, 0.0, 0.1, 1.0),
            text: hsla(0.0, 0.0, 0.9, 1.0),
            accent: hsla(0.58, 0.9, 0.5, 1.0), // Blue
            ..Self::light()
        }
    }

    pub fn from_preset(preset: ThemePreset) -> Self {
        match preset {
            ThemePreset::Light => Self::light(),
            ThemePreset::Dark => Self::dark(),
        }
    }

    /// Resolve a node color role against this theme.
    pub fn color(&self, role: ColorRole) -> Color {
        match role {
            ColorRole::Primary => self.primary,
            ColorRole::Secondary => self.secondary,
            ColorRole::Background => self.background,
            ColorRole::Accent => self.accent,
            ColorRole::Text => self.text,
        }
    }
}

/// Helper to create a color from hue (in turns), saturation, lightness and alpha.
pub fn hsla(h: f32, s: f32, l: f32, a: f32) -> Color {
    let color: Hsla = Hsla::new(h * 360.0, s, l, a);
    Srgba::from_color(color)
}

/// Helper to create a color from sRGB components in `0..=1`.
pub fn rgba(r: f32, g: f32, b: f32, a: f32) -> Color {
    Srgba::new(r, g, b, a)
}

/// Convert a color to 8-bit RGBA.
pub fn to_rgba8(color: Color) -> [u8; 4] {
    let (r, g, b, a) = color.into_format::<u8, u8>().into_components();
    [r, g, b, a]
}
