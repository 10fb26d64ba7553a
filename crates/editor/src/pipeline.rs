//! Offscreen preview rendering.
//!
//! The pipeline owns the render surface and the camera that draws the layout
//! tree into it. Both are optional: before [`PreviewRenderPipeline::ensure_surface`]
//! and after [`PreviewRenderPipeline::teardown`] there is nothing to map
//! against, and callers treat that as "no result".

use crate::camera::VirtualCamera;
use glam::UVec2;
use image::{Pixel, Rgba, RgbaImage};
use layout::{Bounds, LayoutTree, NodeId};
use theme::{to_rgba8, Color};

/// Offscreen pixel buffer the preview is rasterized into.
pub struct RenderSurface {
    resolution: UVec2,
    image: RgbaImage,
}

impl RenderSurface {
    pub fn new(resolution: UVec2) -> Self {
        let resolution = resolution.max(UVec2::ONE);
        Self {
            resolution,
            image: RgbaImage::new(resolution.x, resolution.y),
        }
    }

    pub fn resolution(&self) -> UVec2 {
        self.resolution
    }

    /// Rendered pixels, top row first.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    fn clear(&mut self, color: Color) {
        let pixel = Rgba(to_rgba8(color));
        for dst in self.image.pixels_mut() {
            *dst = pixel;
        }
    }

    /// Blend `color` over every pixel whose center lies in `rect`, given in
    /// surface pixels with Y up.
    fn fill_rect(&mut self, rect: &Bounds, color: Color) {
        let width = self.resolution.x as f32;
        let height = self.resolution.y as f32;
        let x0 = rect.min.x.round().clamp(0.0, width) as u32;
        let x1 = rect.max.x.round().clamp(0.0, width) as u32;
        let y0 = rect.min.y.round().clamp(0.0, height) as u32;
        let y1 = rect.max.y.round().clamp(0.0, height) as u32;

        let src = Rgba(to_rgba8(color));
        for y in y0..y1 {
            // image rows grow downward
            let row = self.resolution.y - 1 - y;
            for x in x0..x1 {
                let dst = self.image.get_pixel_mut(x, row);
                if src[3] == u8::MAX {
                    *dst = src;
                } else {
                    dst.blend(&src);
                }
            }
        }
    }
}

#[derive(Default)]
pub struct PreviewRenderPipeline {
    surface: Option<RenderSurface>,
    camera: Option<VirtualCamera>,
    root: Option<NodeId>,
    background: Option<Color>,
    /// Bumped every time the surface or camera is replaced.
    generation: u64,
}

impl PreviewRenderPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure a surface of `resolution` and a camera exist. Returns true if
    /// anything had to be created or replaced.
    pub fn ensure_surface(&mut self, resolution: UVec2) -> bool {
        let resolution = resolution.max(UVec2::ONE);
        let surface_ok = self
            .surface
            .as_ref()
            .is_some_and(|surface| surface.resolution == resolution);
        if surface_ok && self.camera.is_some() {
            return false;
        }

        if !surface_ok {
            self.surface = Some(RenderSurface::new(resolution));
        }
        let mut camera = VirtualCamera::for_surface(resolution);
        if let Some(previous) = self.camera.take() {
            camera.background = previous.background;
        } else if let Some(background) = self.background {
            camera.background = background;
        }
        self.camera = Some(camera);
        self.generation += 1;
        tracing::info!(
            width = resolution.x,
            height = resolution.y,
            generation = self.generation,
            "preview surface created"
        );
        true
    }

    /// Destroy and recreate the surface and camera at `resolution`, then bind
    /// the previously bound root again.
    pub fn rebuild(&mut self, resolution: UVec2, tree: &LayoutTree) {
        let root = self.root;
        self.teardown();
        self.ensure_surface(resolution);
        if let Some(root) = root {
            self.bind_root(tree, root);
        }
        tracing::info!(generation = self.generation, "preview rebuilt");
    }

    /// Release the surface and camera. Safe to call in any state.
    pub fn teardown(&mut self) {
        let had_surface = self.surface.take().is_some();
        let had_camera = self.camera.take().is_some();
        self.root = None;
        if had_surface || had_camera {
            tracing::info!("preview torn down");
        }
    }

    /// Render `root` through the camera, framing its world rectangle. Returns
    /// false if there is no camera or the root is unknown.
    pub fn bind_root(&mut self, tree: &LayoutTree, root: NodeId) -> bool {
        let Some(bounds) = tree.world_bounds(root) else {
            return false;
        };
        let Some(camera) = self.camera.as_mut() else {
            tracing::warn!("cannot bind a root without a camera");
            return false;
        };
        camera.frame(&bounds);
        self.root = Some(root);
        true
    }

    /// Re-frame the bound root after its size changed.
    pub fn reframe(&mut self, tree: &LayoutTree) {
        if let Some(root) = self.root {
            self.bind_root(tree, root);
        }
    }

    pub fn set_background(&mut self, background: Color) {
        self.background = Some(background);
        if let Some(camera) = self.camera.as_mut() {
            camera.background = background;
        }
    }

    pub fn bound_root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn surface(&self) -> Option<&RenderSurface> {
        self.surface.as_ref()
    }

    pub fn camera(&self) -> Option<&VirtualCamera> {
        self.camera.as_ref()
    }

    pub fn resolution(&self) -> Option<UVec2> {
        self.surface.as_ref().map(RenderSurface::resolution)
    }

    pub fn is_ready(&self) -> bool {
        self.surface.is_some() && self.camera.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Rasterize the bound root's subtree. Nodes are painted in tree order,
    /// so later nodes cover earlier ones.
    pub fn render(&mut self, tree: &LayoutTree) -> bool {
        let (Some(surface), Some(camera), Some(root)) =
            (self.surface.as_mut(), self.camera.as_ref(), self.root)
        else {
            return false;
        };
        if !tree.contains(root) {
            tracing::warn!(?root, "bound root no longer exists");
            return false;
        }

        surface.clear(camera.background);
        let resolution = surface.resolution;
        let mut painted = 0usize;
        for id in tree.descendants(root).skip(1) {
            let Some(node) = tree.get(id) else { continue };
            let Some(color) = node.color else { continue };
            if !camera.renders_layer(node.layer) || !tree.is_active_in_hierarchy(id) {
                continue;
            }
            let Some(world) = tree.world_bounds(id) else {
                continue;
            };
            let min = camera.world_to_screen(world.min.extend(0.0), resolution);
            let max = camera.world_to_screen(world.max.extend(0.0), resolution);
            if !camera.in_depth_range(min.z) {
                continue;
            }
            surface.fill_rect(&Bounds::from_corners(min.truncate(), max.truncate()), color);
            painted += 1;
        }
        tracing::trace!(painted, "preview rendered");
        true
    }
}
