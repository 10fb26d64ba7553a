use crate::drag::{DragSession, ResizeSession};
use crate::handles::{apply_resize, handles_for, hit_handle, Handle};
use crate::hit_test::{hit_test, ClickTracker};
use crate::input::{EditorEvent, PointerButton};
use crate::mapper::CoordinateMapper;
use crate::overlay::{compute_overlay, Overlay, OverlayInput};
use crate::pipeline::PreviewRenderPipeline;
use crate::settings::{DevicePreset, EditorSettings};
use crate::snap::{AlignmentSnapEngine, SnapGuide, SnapGuides};
use crate::viewport::ViewportState;
use glam::{UVec2, Vec2};
use image::RgbaImage;
use layout::{Bounds, LayoutError, LayoutTree, NodeId, NodeTemplate, UiNode};
use std::time::Duration;
use theme::{Theme, ThemeManager, ThemeObserver};

/// Active pointer interaction.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Interaction {
    #[default]
    Idle,
    /// Moving the selected node
    Dragging(DragSession),
    /// Resizing the selected node through a handle
    Resizing(ResizeSession),
    /// Panning the preview with the middle button
    Panning { last_pointer: Vec2 },
}

impl Interaction {
    /// Node being dragged or resized, if any.
    pub fn node(&self) -> Option<NodeId> {
        match self {
            Interaction::Dragging(session) => Some(session.node),
            Interaction::Resizing(session) => Some(session.node),
            _ => None,
        }
    }
}

/// Live editor for one layout tree.
///
/// The editor owns the tree for the editing session together with the
/// viewport, the preview pipeline and the interaction state. Input handlers
/// run synchronously and return the events they produced.
pub struct Editor {
    pub settings: EditorSettings,
    pub viewport: ViewportState,

    tree: LayoutTree,
    pipeline: PreviewRenderPipeline,
    snap: AlignmentSnapEngine,
    interaction: Interaction,
    clicks: ClickTracker,
    guides: SnapGuides,
    theme: Theme,

    dirty: bool,
    last_redraw: Option<Duration>,
    events: Vec<EditorEvent>,
}

impl Editor {
    /// Open an editor on `tree`, creating the preview surface for the
    /// configured device preset.
    pub fn new(tree: LayoutTree, settings: EditorSettings) -> Self {
        let settings = settings.sanitized();
        let mut editor = Self {
            viewport: ViewportState::from_settings(&settings),
            snap: AlignmentSnapEngine::new(settings.snap_falloff),
            settings,
            tree,
            pipeline: PreviewRenderPipeline::new(),
            interaction: Interaction::Idle,
            clicks: ClickTracker::default(),
            guides: SnapGuides::new(),
            theme: Theme::default(),
            dirty: true,
            last_redraw: None,
            events: Vec::new(),
        };
        editor.open();
        editor
    }

    fn open(&mut self) {
        let resolution = self.settings.device_preset.resolution();
        self.pipeline.set_background(self.theme.canvas_background);
        self.pipeline.ensure_surface(resolution);
        self.tree.fit_root_to_resolution(resolution.as_vec2());
        let root = self.tree.root();
        self.pipeline.bind_root(&self.tree, root);
        self.render();
    }

    /// Release the preview and end any interaction. The editor stays usable
    /// as a tree holder; mapping and hit tests return nothing until
    /// [`Editor::rebuild_preview`].
    pub fn close(&mut self) {
        self.end_interaction();
        self.pipeline.teardown();
    }

    // === Accessors ===

    pub fn tree(&self) -> &LayoutTree {
        &self.tree
    }

    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.viewport.selected
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    /// Guides of the current drag step.
    pub fn guides(&self) -> &[SnapGuide] {
        &self.guides
    }

    pub fn pipeline(&self) -> &PreviewRenderPipeline {
        &self.pipeline
    }

    pub fn snap_engine(&self) -> &AlignmentSnapEngine {
        &self.snap
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// The rendered preview, if a surface exists.
    pub fn image(&self) -> Option<&RgbaImage> {
        self.pipeline.surface().map(|surface| surface.image())
    }

    pub fn resolution(&self) -> UVec2 {
        self.settings.device_preset.resolution()
    }

    /// Mapping for the current frame, or `None` without a surface.
    pub fn mapper(&self) -> Option<CoordinateMapper> {
        let camera = *self.pipeline.camera()?;
        let resolution = self.pipeline.resolution()?;
        let preview = self
            .viewport
            .preview_rect(resolution, self.settings.preview_scale);
        Some(CoordinateMapper::new(camera, resolution, preview))
    }

    /// Selection outline in workspace pixels.
    pub fn selection_rect(&self) -> Option<Bounds> {
        let selected = self.viewport.selected?;
        let world = self.tree.world_bounds(selected)?;
        Some(self.mapper()?.world_to_viewport_bounds(&world))
    }

    pub fn handles(&self) -> Option<[Handle; 9]> {
        let rect = self.selection_rect()?;
        Some(handles_for(
            &rect,
            self.settings.handle_size,
            self.settings.rotate_handle_offset,
        ))
    }

    pub fn overlay(&self) -> Option<Overlay> {
        let mapper = self.mapper()?;
        Some(compute_overlay(&OverlayInput {
            tree: &self.tree,
            root: self.tree.root(),
            mapper: &mapper,
            settings: &self.settings,
            grid_size: self.viewport.grid_size,
            selected: self.viewport.selected,
            guides: &self.guides,
        }))
    }

    // === Pointer input ===

    /// `now` is the host's monotonic time, used for double-click detection.
    pub fn pointer_down(
        &mut self,
        pointer: Vec2,
        button: PointerButton,
        now: Duration,
    ) -> Vec<EditorEvent> {
        match button {
            PointerButton::Primary => self.primary_down(pointer, now),
            PointerButton::Middle => {
                if self.interaction.node().is_none() {
                    self.interaction = Interaction::Panning {
                        last_pointer: pointer,
                    };
                }
            }
            PointerButton::Secondary => {}
        }
        self.take_events()
    }

    fn primary_down(&mut self, pointer: Vec2, now: Duration) {
        let Some(mapper) = self.mapper() else {
            tracing::warn!("pointer down without a preview surface");
            return;
        };

        // Handles take priority over everything under them
        if let (Some(selected), Some(handles)) = (self.viewport.selected, self.handles()) {
            if let Some(handle) = hit_handle(&handles, pointer) {
                tracing::debug!(%handle, "handle hit");
                self.interaction = Interaction::Resizing(ResizeSession::begin(
                    selected, handle, pointer,
                ));
                return;
            }
        }

        if mapper.viewport_to_surface_pixel(pointer).is_none() {
            return;
        }

        let root = self.tree.root();
        let interval = self.settings.double_click_interval();
        if let Some(parent) = self.clicks.promotion(&self.tree, root, now, interval) {
            tracing::debug!(?parent, "selection promoted to parent");
            self.clicks.record(Some(parent), now);
            self.interaction = Interaction::Idle;
            self.set_selection(Some(parent));
            return;
        }

        let hit = hit_test(&self.tree, root, &mapper, pointer);
        self.clicks.record(hit, now);
        self.set_selection(hit);
        self.interaction = match hit.and_then(|id| Some((id, self.tree.get(id)?))) {
            Some((id, node)) => {
                Interaction::Dragging(DragSession::begin(id, pointer, node.anchored_position()))
            }
            None => Interaction::Idle,
        };
    }

    pub fn pointer_move(&mut self, pointer: Vec2, button: PointerButton) -> Vec<EditorEvent> {
        let mapper = self.mapper();
        match (&mut self.interaction, button) {
            (Interaction::Dragging(session), PointerButton::Primary) => {
                let node = session.node;
                let (Some(mapper), Some(scale)) = (mapper, self.tree.scale_factor_of(node))
                else {
                    return self.take_events();
                };
                let Some(step) =
                    session.update(pointer, &mapper, scale, self.viewport.grid_size)
                else {
                    return self.take_events();
                };

                let position = if self.viewport.snap_enabled {
                    let threshold = self.viewport.snap_threshold / scale;
                    let result =
                        self.snap
                            .snap(&self.tree, node, step.proposal, threshold, step.motion);
                    self.guides = result.guides;
                    result.position
                } else {
                    self.guides.clear();
                    step.proposal
                };

                if self.tree.set_anchored_position(node, position) {
                    self.node_changed(node);
                }
            }
            (Interaction::Resizing(session), PointerButton::Primary) => {
                let node = session.node;
                let (Some(mapper), Some(scale)) = (mapper, self.tree.scale_factor_of(node))
                else {
                    return self.take_events();
                };
                let delta = session.update(pointer, &mapper, scale);
                if !session.handle.is_resize() {
                    return self.take_events();
                }
                let (Some(size), Some(current)) =
                    (self.tree.layout_size(node), self.tree.get(node))
                else {
                    return self.take_events();
                };
                let (size_delta, position) = apply_resize(
                    session.handle,
                    size,
                    current.size_delta(),
                    current.anchored_position(),
                    delta,
                );
                self.tree.set_size_delta(node, size_delta);
                self.tree.set_anchored_position(node, position);
                self.node_changed(node);
            }
            (Interaction::Panning { last_pointer }, PointerButton::Middle) => {
                let delta = pointer - *last_pointer;
                *last_pointer = pointer;
                self.viewport.pan(delta);
                self.emit(EditorEvent::ViewChanged);
            }
            _ => {}
        }
        self.take_events()
    }

    /// Releasing the primary button ends a drag or resize wherever the
    /// pointer is.
    pub fn pointer_up(&mut self, button: PointerButton) -> Vec<EditorEvent> {
        match button {
            PointerButton::Primary => {
                if self.interaction.node().is_some() {
                    self.interaction = Interaction::Idle;
                    self.emit(EditorEvent::RedrawNeeded);
                }
                self.clear_guides();
            }
            PointerButton::Middle => {
                if matches!(self.interaction, Interaction::Panning { .. }) {
                    self.interaction = Interaction::Idle;
                }
            }
            PointerButton::Secondary => {}
        }
        self.take_events()
    }

    pub fn scroll(&mut self, delta_y: f32) -> Vec<EditorEvent> {
        if self.viewport.zoom_by(delta_y, &self.settings) {
            self.emit(EditorEvent::ViewChanged);
        }
        self.take_events()
    }

    // === View settings ===

    pub fn set_workspace(&mut self, workspace: Bounds) -> Vec<EditorEvent> {
        self.viewport.workspace = workspace;
        self.emit(EditorEvent::ViewChanged);
        self.take_events()
    }

    pub fn set_grid_size(&mut self, grid_size: u32) -> Vec<EditorEvent> {
        self.viewport.grid_size = grid_size;
        self.emit(EditorEvent::ViewChanged);
        self.take_events()
    }

    pub fn set_snap_enabled(&mut self, enabled: bool) -> Vec<EditorEvent> {
        self.viewport.snap_enabled = enabled;
        if !enabled {
            self.clear_guides();
        }
        self.emit(EditorEvent::ViewChanged);
        self.take_events()
    }

    pub fn set_snap_threshold(&mut self, threshold: f32) -> Vec<EditorEvent> {
        self.viewport.snap_threshold = threshold.max(0.0);
        self.emit(EditorEvent::ViewChanged);
        self.take_events()
    }

    pub fn reset_view(&mut self) -> Vec<EditorEvent> {
        self.viewport.reset_view();
        self.emit(EditorEvent::ViewChanged);
        self.take_events()
    }

    /// Switch the preview resolution. The root canvas is refit to the new
    /// resolution. A closed editor only records the preset; the surface is
    /// created by the next [`Editor::rebuild_preview`].
    pub fn set_device_preset(&mut self, preset: DevicePreset) -> Vec<EditorEvent> {
        self.settings.device_preset = preset;
        let resolution = preset.resolution();
        tracing::info!(%preset, "device preset changed");
        self.tree.fit_root_to_resolution(resolution.as_vec2());
        if self.pipeline.bound_root().is_some() {
            if self.pipeline.ensure_surface(resolution) {
                self.emit(EditorEvent::SurfaceRebuilt);
            }
            self.pipeline.reframe(&self.tree);
        }
        self.clear_guides();
        self.emit(EditorEvent::ViewChanged);
        self.mark_dirty();
        self.take_events()
    }

    /// Recreate the preview surface and camera from scratch.
    pub fn rebuild_preview(&mut self) -> Vec<EditorEvent> {
        let resolution = self.resolution();
        let root = self.tree.root();
        self.pipeline.rebuild(resolution, &self.tree);
        if self.pipeline.bound_root().is_none() {
            self.pipeline.bind_root(&self.tree, root);
        }
        self.emit(EditorEvent::SurfaceRebuilt);
        self.mark_dirty();
        self.take_events()
    }

    // === Selection ===

    /// Select a node on behalf of the host, e.g. from a hierarchy panel.
    /// Nodes outside the edited tree and the root itself are ignored.
    pub fn select(&mut self, node: Option<NodeId>) -> Vec<EditorEvent> {
        match node {
            Some(id) if !self.tree.is_ancestor(self.tree.root(), id) => {
                tracing::debug!(?id, "ignoring selection outside the edited root");
            }
            _ => {
                self.clicks.set_node(node);
                self.set_selection(node);
            }
        }
        self.take_events()
    }

    fn set_selection(&mut self, node: Option<NodeId>) {
        self.clear_guides();
        if self.viewport.selected != node {
            self.viewport.selected = node;
            tracing::debug!(?node, "selection changed");
            self.emit(EditorEvent::SelectionChanged(node));
            self.emit(EditorEvent::RedrawNeeded);
        }
    }

    // === Structural edits ===

    pub fn add_node(&mut self, parent: NodeId, node: UiNode) -> Result<NodeId, LayoutError> {
        let id = self.tree.insert(parent, node)?;
        self.tree.apply_theme(id, &self.theme);
        self.structure_changed();
        self.emit(EditorEvent::NodeAdded(id));
        Ok(id)
    }

    /// Graft `template` under `parent` and reapply the active theme of
    /// `themes` to the new subtree.
    pub fn instantiate(
        &mut self,
        parent: NodeId,
        template: &NodeTemplate,
        themes: &ThemeManager,
    ) -> Result<NodeId, LayoutError> {
        let id = self.tree.instantiate(parent, template)?;
        self.tree.apply_theme(id, themes.active_theme());
        tracing::debug!(?id, name = %template.name, "template instantiated");
        self.structure_changed();
        self.emit(EditorEvent::NodeAdded(id));
        Ok(id)
    }

    pub fn remove_node(&mut self, id: NodeId) -> Result<(), LayoutError> {
        let removed = self.tree.remove(id)?;
        for &gone in &removed {
            if self.interaction.node() == Some(gone) {
                tracing::warn!(node = ?gone, "node removed mid-interaction, ending it");
                self.end_interaction();
            }
            if self.viewport.selected == Some(gone) {
                self.set_selection(None);
            }
            self.clicks.forget(gone);
        }
        self.structure_changed();
        self.emit(EditorEvent::NodeRemoved(id));
        Ok(())
    }

    /// Move `id` under `new_parent`, keeping its anchored position. A drag or
    /// resize of `id` keeps going in the new parent's space, and the
    /// selection is kept.
    pub fn reparent(&mut self, id: NodeId, new_parent: NodeId) -> Result<(), LayoutError> {
        self.tree.reparent(id, new_parent)?;
        self.structure_changed();
        self.emit(EditorEvent::NodeChanged(id));
        Ok(())
    }

    /// Events produced by the structural edits above since the last call.
    pub fn take_events(&mut self) -> Vec<EditorEvent> {
        std::mem::take(&mut self.events)
    }

    // === Rendering ===

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Rasterize the tree into the preview surface.
    pub fn render(&mut self) -> bool {
        let rendered = self.pipeline.render(&self.tree);
        if rendered {
            self.dirty = false;
        }
        rendered
    }

    /// Fixed-rate redraw. Returns true (after re-rendering) when a redraw
    /// was due at `now`.
    pub fn tick(&mut self, now: Duration) -> bool {
        if self.pipeline.bound_root().is_none() {
            return false;
        }
        let interval = self.settings.redraw_interval();
        let due = match self.last_redraw {
            Some(last) => now.saturating_sub(last) >= interval,
            None => true,
        };
        if due {
            self.last_redraw = Some(now);
            self.render();
        }
        due
    }

    // === Internals ===

    fn end_interaction(&mut self) {
        self.interaction = Interaction::Idle;
        self.clear_guides();
    }

    fn clear_guides(&mut self) {
        if !self.guides.is_empty() {
            self.guides.clear();
            self.emit(EditorEvent::RedrawNeeded);
        }
    }

    fn structure_changed(&mut self) {
        self.snap.invalidate();
        self.mark_dirty();
    }

    fn node_changed(&mut self, node: NodeId) {
        self.emit(EditorEvent::NodeChanged(node));
        self.mark_dirty();
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
        self.emit(EditorEvent::RedrawNeeded);
    }

    fn emit(&mut self, event: EditorEvent) {
        if !self.events.contains(&event) {
            self.events.push(event);
        }
    }
}

impl ThemeObserver for Editor {
    fn on_theme_changed(&mut self, theme: &Theme) {
        self.theme = theme.clone();
        let root = self.tree.root();
        self.tree.apply_theme(root, theme);
        self.pipeline.set_background(theme.canvas_background);
        self.mark_dirty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use theme::ColorRole;

    fn editor() -> Editor {
        let tree = LayoutTree::new(Vec2::new(1920.0, 1080.0), 1.0);
        let mut editor = Editor::new(tree, EditorSettings::default());
        editor.viewport.zoom = 4.0;
        editor.set_workspace(Bounds::from_origin_size(Vec2::ZERO, Vec2::new(1920.0, 1080.0)));
        editor
    }

    /// Workspace point over world point `world` in the 1:1 setup above.
    fn at(world: Vec2) -> Vec2 {
        Vec2::new(world.x, 1080.0 - world.y)
    }

    #[test]
    fn test_open_creates_surface() {
        let editor = editor();
        assert!(editor.pipeline().is_ready());
        assert_eq!(editor.image().unwrap().dimensions(), (1920, 1080));
        let preview = editor.mapper().unwrap().preview;
        assert_eq!(preview.size(), Vec2::new(1920.0, 1080.0));
    }

    #[test]
    fn test_click_empty_space_clears_selection() {
        let mut editor = editor();
        let root = editor.root();
        let a = editor
            .add_node(root, UiNode::rect("a", Vec2::new(100.0, 100.0), Vec2::new(50.0, 50.0)))
            .unwrap();
        editor.select(Some(a));

        let events = editor.pointer_down(at(Vec2::new(500.0, 500.0)), PointerButton::Primary, Duration::ZERO);
        assert!(events.contains(&EditorEvent::SelectionChanged(None)));
        assert_eq!(editor.selected(), None);
        assert_eq!(editor.interaction(), &Interaction::Idle);
    }

    #[test]
    fn test_click_outside_preview_is_ignored() {
        let mut editor = editor();
        let root = editor.root();
        let a = editor
            .add_node(root, UiNode::rect("a", Vec2::new(100.0, 100.0), Vec2::new(50.0, 50.0)))
            .unwrap();
        editor.select(Some(a));
        editor.pointer_down(Vec2::new(-500.0, 10.0), PointerButton::Primary, Duration::ZERO);
        assert_eq!(editor.selected(), Some(a));
    }

    #[test]
    fn test_external_selection_rules() {
        let mut editor = editor();
        let root = editor.root();
        assert!(editor.select(Some(root)).is_empty());
        assert_eq!(editor.selected(), None);

        let a = editor.add_node(root, UiNode::new("a")).unwrap();
        let events = editor.select(Some(a));
        assert!(events.contains(&EditorEvent::NodeAdded(a)));
        assert!(events.contains(&EditorEvent::SelectionChanged(Some(a))));
        assert_eq!(editor.selected(), Some(a));
    }

    #[test]
    fn test_middle_drag_pans() {
        let mut editor = editor();
        editor.pointer_down(Vec2::new(10.0, 10.0), PointerButton::Middle, Duration::ZERO);
        let events = editor.pointer_move(Vec2::new(30.0, 5.0), PointerButton::Middle);
        assert_eq!(events, vec![EditorEvent::ViewChanged]);
        assert_eq!(editor.viewport.pan_offset, Vec2::new(20.0, -5.0));
        editor.pointer_up(PointerButton::Middle);
        assert_eq!(editor.interaction(), &Interaction::Idle);
    }

    #[test]
    fn test_scroll_zooms() {
        let mut editor = editor();
        editor.scroll(10.0);
        assert!((editor.viewport.zoom - 3.8).abs() < 1e-5);
        editor.reset_view();
        assert_eq!(editor.viewport.zoom, 1.0);
    }

    #[test]
    fn test_preset_change_refits_root() {
        let mut editor = editor();
        let before = editor.pipeline().generation();
        let events = editor.set_device_preset(DevicePreset::Phone);
        assert!(events.contains(&EditorEvent::SurfaceRebuilt));
        assert!(editor.pipeline().generation() > before);
        assert_eq!(editor.tree().root_size(), Vec2::new(1080.0, 1920.0));
        assert_eq!(editor.image().unwrap().dimensions(), (1080, 1920));
    }

    #[test]
    fn test_close_and_rebuild() {
        let mut editor = editor();
        editor.close();
        editor.close();
        assert!(editor.mapper().is_none());
        assert!(editor
            .pointer_down(Vec2::new(10.0, 10.0), PointerButton::Primary, Duration::ZERO)
            .is_empty());
        assert!(!editor.tick(Duration::from_secs(1)));

        editor.rebuild_preview();
        assert!(editor.pipeline().is_ready());
        assert_eq!(editor.pipeline().bound_root(), Some(editor.root()));
    }

    #[test]
    fn test_preset_change_while_closed() {
        let mut editor = editor();
        editor.close();
        let events = editor.set_device_preset(DevicePreset::Phone);
        assert!(!events.contains(&EditorEvent::SurfaceRebuilt));
        assert!(!editor.pipeline().is_ready());
        assert!(editor.mapper().is_none());
        assert!(!editor.render());

        editor.rebuild_preview();
        assert_eq!(editor.pipeline().bound_root(), Some(editor.root()));
        assert_eq!(editor.image().unwrap().dimensions(), (1080, 1920));

        // The rebuilt camera frames the refit root, so a click on a node lands
        let root = editor.root();
        let node = editor
            .add_node(
                root,
                UiNode::rect("card", Vec2::new(540.0, 960.0), Vec2::new(400.0, 400.0)),
            )
            .unwrap();
        let world = editor.tree().world_bounds(node).unwrap();
        let center = editor
            .mapper()
            .unwrap()
            .world_to_viewport(world.center().extend(0.0));
        editor.pointer_down(center, PointerButton::Primary, Duration::ZERO);
        assert_eq!(editor.selected(), Some(node));
        assert!(editor.render());
    }

    #[test]
    fn test_tick_redraw_interval() {
        let mut editor = editor();
        assert!(editor.tick(Duration::from_millis(0)));
        assert!(!editor.tick(Duration::from_millis(10)));
        assert!(editor.tick(Duration::from_millis(40)));
    }

    #[test]
    fn test_theme_observer_recolors_tree() {
        let tree = LayoutTree::new(Vec2::new(100.0, 100.0), 1.0);
        let editor = Rc::new(RefCell::new(Editor::new(tree, EditorSettings::default())));
        let root = editor.borrow().root();
        let a = editor
            .borrow_mut()
            .add_node(root, UiNode::new("a").with_fill(ColorRole::Accent))
            .unwrap();

        let mut themes = ThemeManager::default();
        themes.register(&editor);
        themes.set_theme(Theme::dark());

        let editor = editor.borrow();
        assert_eq!(editor.tree().get(a).unwrap().color, Some(Theme::dark().accent));
        assert_eq!(
            editor.pipeline().camera().unwrap().background,
            Theme::dark().canvas_background
        );
    }

    #[test]
    fn test_instantiate_applies_active_theme() {
        let mut editor = editor();
        let root = editor.root();
        let themes = ThemeManager::new(Theme::dark());
        let mut template = NodeTemplate::new("button");
        template.fill = Some(ColorRole::Primary);

        let id = editor.instantiate(root, &template, &themes).unwrap();
        assert_eq!(editor.tree().get(id).unwrap().color, Some(Theme::dark().primary));
        assert!(editor.take_events().contains(&EditorEvent::NodeAdded(id)));
    }
}
