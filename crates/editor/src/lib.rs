//! Interactive viewport editor for layout trees.
//!
//! The [`Editor`] renders a [`layout::LayoutTree`] into an offscreen preview
//! and lets a pointer select, drag and resize nodes with grid quantization
//! and sibling alignment snapping. It has no windowing of its own: the host
//! feeds it pointer events in workspace pixels and draws the preview image
//! and [`Overlay`] it hands back.
//!
//! Per pointer-down the order is fixed: selection handles first, then the
//! double-click parent promotion, then the node hit test.

mod camera;
mod drag;
mod editor;
mod handles;
mod input;
mod mapper;
mod overlay;
mod pipeline;
mod settings;
mod snap;
mod viewport;

pub use camera::VirtualCamera;
pub use drag::{pointer_delta_to_layout, quantize, DragSession, DragStep, ResizeSession};
pub use editor::{Editor, Interaction};
pub use handles::{apply_resize, handles_for, hit_handle, Handle, HandleType};
pub use hit_test::{hit_test, ClickTracker};
pub use input::{EditorEvent, PointerButton};
pub use mapper::CoordinateMapper;
pub use overlay::{compute_overlay, Line, Overlay, OverlayInput};
pub use pipeline::{PreviewRenderPipeline, RenderSurface};
pub use settings::{DevicePreset, EditorSettings, SettingsError, SnapFalloff, GRID_SIZES};
pub use snap::{AlignmentSnapEngine, Axis, SiblingCache, SnapGuide, SnapGuides, SnapResult};
pub use viewport::ViewportState;
