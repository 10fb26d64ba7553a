//! Command and query execution against a [`Session`].
//!
//! Commands are translated into editor calls; the events the editor hands
//! back are folded into a [`CommandResult`] naming nodes by uid.

use crate::{
    ApiError, Command, CommandResult, NodeInfo, Query, QueryResult, SelectionChange, Session,
};
use editor::{Editor, EditorEvent, Interaction, PointerButton};
use layout::{Bounds, NodeId, NodeUid};
use std::time::Duration;
use theme::Theme;

/// Execute a command. Failures are reported as [`CommandResult::Error`].
pub fn execute_command(session: &mut Session, command: Command) -> CommandResult {
    match apply(session, command) {
        Ok(result) => result,
        Err(err) => {
            tracing::warn!(%err, "command failed");
            CommandResult::error(err.to_string())
        }
    }
}

fn apply(session: &mut Session, command: Command) -> Result<CommandResult, ApiError> {
    let events = match command {
        Command::PointerDown {
            position,
            button,
            time_ms,
        } => {
            let now = time_ms.map_or(session.clock(), Duration::from_millis);
            session.editor_mut().pointer_down(position, button, now)
        }

        Command::PointerMove { position, button } => {
            session.editor_mut().pointer_move(position, button)
        }

        Command::PointerUp { button } => session.editor_mut().pointer_up(button),

        Command::Scroll { delta } => session.editor_mut().scroll(delta),

        Command::Pan { delta } => {
            let now = session.clock();
            let mut editor = session.editor_mut();
            let start = editor.viewport.workspace.center();
            let mut events = editor.pointer_down(start, PointerButton::Middle, now);
            events.extend(editor.pointer_move(start + delta, PointerButton::Middle));
            events.extend(editor.pointer_up(PointerButton::Middle));
            events
        }

        Command::Wait { ms } => {
            session.advance(Duration::from_millis(ms));
            let now = session.clock();
            session.editor_mut().tick(now);
            Vec::new()
        }

        Command::SetWorkspace { origin, size } => session
            .editor_mut()
            .set_workspace(Bounds::from_origin_size(origin, size)),

        Command::SetGrid { size } => session.editor_mut().set_grid_size(size),

        Command::SetSnap { enabled, threshold } => {
            let mut editor = session.editor_mut();
            let mut events = editor.set_snap_enabled(enabled);
            if let Some(threshold) = threshold {
                events.extend(editor.set_snap_threshold(threshold));
            }
            events
        }

        Command::SetPreset { preset } => session.editor_mut().set_device_preset(preset),

        Command::ResetView => session.editor_mut().reset_view(),

        Command::Rebuild => session.editor_mut().rebuild_preview(),

        Command::SetTheme { preset } => {
            session.set_theme(Theme::from_preset(preset));
            session.editor_mut().take_events()
        }

        Command::Select { target } => {
            let id = target.resolve(&session.editor())?;
            session.editor_mut().select(Some(id))
        }

        Command::ClearSelection => session.editor_mut().select(None),

        Command::Instantiate { parent, template } => {
            let parent = parent.resolve(&session.editor())?;
            let id = session.instantiate(parent, &template)?;
            session.editor_mut().select(Some(id))
        }

        Command::Delete { target } => {
            let (id, uid) = {
                let editor = session.editor();
                let id = target.resolve(&editor)?;
                (id, uid_of(&editor, id))
            };
            let events = {
                let mut editor = session.editor_mut();
                editor.remove_node(id)?;
                editor.take_events()
            };
            let mut result = summarize(&session.editor(), &events);
            if let (CommandResult::Success { deleted, .. }, Some(uid)) = (&mut result, uid) {
                deleted.push(uid);
            }
            return Ok(result);
        }

        Command::Reparent { target, parent } => {
            let (id, parent) = {
                let editor = session.editor();
                (target.resolve(&editor)?, parent.resolve(&editor)?)
            };
            let mut editor = session.editor_mut();
            editor.reparent(id, parent)?;
            editor.take_events()
        }

        Command::Batch { commands } => {
            let mut result = CommandResult::success();
            for command in commands {
                result = result.merge(execute_command(session, command));
                if !result.is_success() {
                    break;
                }
            }
            return Ok(result);
        }
    };

    Ok(summarize(&session.editor(), &events))
}

/// Fold editor events into a result. Removed nodes are skipped: their uids
/// are gone from the tree by the time the events arrive.
fn summarize(editor: &Editor, events: &[EditorEvent]) -> CommandResult {
    let mut created = Vec::new();
    let mut modified = Vec::new();
    let mut selection = None;
    for event in events {
        match *event {
            EditorEvent::NodeAdded(id) => created.extend(uid_of(editor, id)),
            EditorEvent::NodeChanged(id) => modified.extend(uid_of(editor, id)),
            EditorEvent::SelectionChanged(node) => {
                selection = Some(SelectionChange {
                    uid: node.and_then(|id| uid_of(editor, id)),
                })
            }
            _ => {}
        }
    }
    CommandResult::Success {
        created,
        modified,
        deleted: Vec::new(),
        selection,
    }
}

fn uid_of(editor: &Editor, id: NodeId) -> Option<NodeUid> {
    editor.tree().get(id).map(|node| node.uid)
}

/// Execute a read-only query.
pub fn execute_query(session: &Session, query: Query) -> QueryResult {
    let editor = session.editor();
    match query {
        Query::GetSelection => {
            let node = editor.selected().and_then(|id| editor.tree().get(id));
            QueryResult::Selection {
                uid: node.map(|node| node.uid),
                name: node.map(|node| node.name.clone()),
            }
        }

        Query::GetNode { target } => match target.resolve(&editor) {
            Ok(id) => match node_info(&editor, id) {
                Some(node) => QueryResult::Node { node },
                None => QueryResult::error(format!("node {id:?} has no geometry")),
            },
            Err(err) => QueryResult::error(err.to_string()),
        },

        Query::GetViewport => {
            let viewport = &editor.viewport;
            QueryResult::Viewport {
                zoom: viewport.zoom,
                pan_offset: viewport.pan_offset,
                grid_size: viewport.grid_size,
                snap_enabled: viewport.snap_enabled,
                snap_threshold: viewport.snap_threshold,
                preset: editor.settings.device_preset,
                resolution: editor.resolution(),
                preview: editor.mapper().map(|mapper| mapper.preview),
            }
        }

        Query::GetOverlay => QueryResult::Overlay {
            overlay: editor.overlay(),
        },

        Query::GetInteraction => {
            let interaction = editor.interaction();
            let state = match interaction {
                Interaction::Idle => "idle",
                Interaction::Dragging(_) => "dragging",
                Interaction::Resizing(_) => "resizing",
                Interaction::Panning { .. } => "panning",
            };
            QueryResult::Interaction {
                state: state.to_string(),
                node: interaction.node().and_then(|id| uid_of(&editor, id)),
            }
        }
    }
}

fn node_info(editor: &Editor, id: NodeId) -> Option<NodeInfo> {
    let tree = editor.tree();
    let node = tree.get(id)?;
    let world = tree.world_bounds(id)?;
    Some(NodeInfo {
        uid: node.uid,
        name: node.name.clone(),
        active: node.active,
        anchored_position: node.anchored_position(),
        size_delta: node.size_delta(),
        size: tree.layout_size(id)?,
        world,
        workspace: editor
            .mapper()
            .map(|mapper| mapper.world_to_viewport_bounds(&world)),
        children: tree
            .children_of(id)
            .iter()
            .filter_map(|&child| uid_of(editor, child))
            .collect(),
    })
}
