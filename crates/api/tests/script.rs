use api::{parse_script, Command, CommandResult, NodeRef, Query, QueryResult, Session};
use editor::{DevicePreset, EditorSettings, PointerButton};
use glam::Vec2;
use layout::{LayoutDocument, NodeUid};
use theme::{Theme, ThemePreset};

const DOCUMENT: &str = r#"{
    "root_size": [1920, 1080],
    "nodes": [
        {
            "uid": "00000000-0000-0000-0000-000000000001",
            "name": "a",
            "anchored_position": [100, 100],
            "size_delta": [100, 50],
            "fill": "primary"
        },
        {
            "uid": "00000000-0000-0000-0000-000000000002",
            "name": "b",
            "anchored_position": [300, 100],
            "size_delta": [100, 50]
        },
        {
            "uid": "00000000-0000-0000-0000-000000000003",
            "name": "group",
            "anchored_position": [800, 500],
            "size_delta": [200, 200],
            "children": [
                {
                    "uid": "00000000-0000-0000-0000-000000000004",
                    "name": "leaf",
                    "anchored_position": [100, 100],
                    "size_delta": [40, 40]
                }
            ]
        }
    ]
}"#;

fn uid(n: u128) -> NodeUid {
    NodeUid::from_u128(n)
}

/// Session whose 1920x1080 preview covers the workspace 1:1, so a workspace
/// pixel is a layout unit with Y flipped.
fn session() -> Session {
    let document = LayoutDocument::from_json(DOCUMENT).unwrap();
    let mut session = Session::from_document(&document, EditorSettings::default()).unwrap();
    session.execute(Command::SetWorkspace {
        origin: Vec2::ZERO,
        size: Vec2::new(1920.0, 1080.0),
    });
    // Zoom clamps at the 4x maximum, where the preview is 1920 pixels wide
    session.execute(Command::Scroll { delta: -200.0 });
    session
}

fn at(x: f32, y: f32) -> Vec2 {
    Vec2::new(x, 1080.0 - y)
}

fn down(position: Vec2, time_ms: u64) -> Command {
    Command::PointerDown {
        position,
        button: PointerButton::Primary,
        time_ms: Some(time_ms),
    }
}

fn node_position(session: &Session, n: u128) -> Vec2 {
    match session.query(Query::GetNode {
        target: NodeRef::Uid(uid(n)),
    }) {
        QueryResult::Node { node } => node.anchored_position,
        other => panic!("unexpected {other:?}"),
    }
}

fn selected(session: &Session) -> Option<NodeUid> {
    match session.query(Query::GetSelection) {
        QueryResult::Selection { uid, .. } => uid,
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn viewport_reflects_view_commands() {
    let mut session = session();
    session.execute(Command::SetGrid { size: 16 });
    session.execute(Command::SetSnap {
        enabled: false,
        threshold: Some(4.0),
    });

    match session.query(Query::GetViewport) {
        QueryResult::Viewport {
            zoom,
            grid_size,
            snap_enabled,
            snap_threshold,
            preview,
            ..
        } => {
            assert_eq!(zoom, 4.0);
            assert_eq!(grid_size, 16);
            assert!(!snap_enabled);
            assert_eq!(snap_threshold, 4.0);
            let preview = preview.unwrap();
            assert!((preview.min - Vec2::ZERO).length() < 1e-3);
            assert!((preview.max - Vec2::new(1920.0, 1080.0)).length() < 1e-3);
        }
        other => panic!("unexpected {other:?}"),
    }

    session.execute(Command::Pan {
        delta: Vec2::new(30.0, -10.0),
    });
    session.execute(Command::ResetView);
    match session.query(Query::GetViewport) {
        QueryResult::Viewport {
            zoom, pan_offset, ..
        } => {
            assert_eq!(zoom, 1.0);
            assert_eq!(pan_offset, Vec2::ZERO);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn pan_moves_the_preview() {
    let mut session = session();
    session.execute(Command::Pan {
        delta: Vec2::new(30.0, -10.0),
    });
    match session.query(Query::GetViewport) {
        QueryResult::Viewport { pan_offset, .. } => assert_eq!(pan_offset, Vec2::new(30.0, -10.0)),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn drag_reports_modified_node() {
    let mut session = session();

    let result = session.execute(down(at(100.0, 100.0), 0));
    match result {
        CommandResult::Success { selection, .. } => {
            assert_eq!(selection.map(|change| change.uid), Some(Some(uid(1))));
        }
        other => panic!("unexpected {other:?}"),
    }

    let result = session.execute(Command::PointerMove {
        position: at(110.0, 100.0),
        button: PointerButton::Primary,
    });
    match result {
        CommandResult::Success { modified, .. } => assert_eq!(modified, vec![uid(1)]),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(
        session.query(Query::GetInteraction),
        QueryResult::Interaction {
            state: "dragging".into(),
            node: Some(uid(1)),
        }
    );

    session.execute(Command::PointerUp {
        button: PointerButton::Primary,
    });
    assert!((node_position(&session, 1) - Vec2::new(110.0, 100.0)).length() < 1e-3);
    assert_eq!(
        session.query(Query::GetInteraction),
        QueryResult::Interaction {
            state: "idle".into(),
            node: None,
        }
    );
}

#[test]
fn double_click_promotes_to_parent() {
    let mut session = session();
    session.execute(down(at(800.0, 500.0), 0));
    session.execute(Command::PointerUp {
        button: PointerButton::Primary,
    });
    assert_eq!(selected(&session), Some(uid(4)));

    session.execute(down(at(800.0, 500.0), 100));
    assert_eq!(selected(&session), Some(uid(3)));
}

#[test]
fn select_by_name_and_clear() {
    let mut session = session();
    let result = session.execute(Command::Select {
        target: NodeRef::Name("leaf".into()),
    });
    assert!(result.is_success());
    assert_eq!(selected(&session), Some(uid(4)));

    match session.query(Query::GetNode {
        target: NodeRef::Selection,
    }) {
        QueryResult::Node { node } => {
            assert_eq!(node.name, "leaf");
            // Centered inside the group at (800, 500)
            assert!((node.world.center() - Vec2::new(800.0, 500.0)).length() < 1e-3);
            let workspace = node.workspace.unwrap();
            assert!((workspace.center() - at(800.0, 500.0)).length() < 1e-3);
        }
        other => panic!("unexpected {other:?}"),
    }

    match session.query(Query::GetOverlay) {
        QueryResult::Overlay { overlay } => {
            let overlay = overlay.unwrap();
            assert!(overlay.selection.is_some());
            assert!(overlay.parent.is_some());
            assert_eq!(overlay.handles.len(), 9);
        }
        other => panic!("unexpected {other:?}"),
    }

    session.execute(Command::ClearSelection);
    assert_eq!(selected(&session), None);
}

#[test]
fn unknown_targets_are_errors() {
    let mut session = session();
    let result = session.execute(Command::Select {
        target: NodeRef::Uid(uid(99)),
    });
    assert!(matches!(result, CommandResult::Error { .. }));

    let result = session.execute(Command::Delete {
        target: NodeRef::Selection,
    });
    assert!(matches!(result, CommandResult::Error { .. }));

    let result = session.execute(Command::Delete {
        target: NodeRef::Root,
    });
    assert!(matches!(result, CommandResult::Error { .. }));
}

#[test]
fn instantiate_delete_and_reparent() {
    let mut session = session();
    let template = serde_json::from_str(
        r#"{"name": "badge", "anchored_position": [20, 20], "size_delta": [10, 10]}"#,
    )
    .unwrap();
    let result = session.execute(Command::Instantiate {
        parent: NodeRef::Name("group".into()),
        template,
    });
    let badge = match result {
        CommandResult::Success {
            created, selection, ..
        } => {
            assert_eq!(created.len(), 1);
            assert_eq!(selection.and_then(|change| change.uid), Some(created[0]));
            created[0]
        }
        other => panic!("unexpected {other:?}"),
    };

    let result = session.execute(Command::Reparent {
        target: NodeRef::Uid(badge),
        parent: NodeRef::Root,
    });
    match result {
        CommandResult::Success { modified, .. } => assert_eq!(modified, vec![badge]),
        other => panic!("unexpected {other:?}"),
    }

    let result = session.execute(Command::Delete {
        target: NodeRef::Uid(uid(2)),
    });
    match result {
        CommandResult::Success { deleted, .. } => assert_eq!(deleted, vec![uid(2)]),
        other => panic!("unexpected {other:?}"),
    }
    assert!(matches!(
        session.query(Query::GetNode {
            target: NodeRef::Uid(uid(2)),
        }),
        QueryResult::Error { .. }
    ));
}

#[test]
fn batch_stops_at_first_failure() {
    let mut session = session();
    let result = session.execute(Command::Batch {
        commands: vec![
            Command::SetGrid { size: 8 },
            Command::Select {
                target: NodeRef::Name("missing".into()),
            },
            Command::SetGrid { size: 32 },
        ],
    });
    assert!(!result.is_success());
    match session.query(Query::GetViewport) {
        QueryResult::Viewport { grid_size, .. } => assert_eq!(grid_size, 8),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn preset_and_theme_commands() {
    let mut session = session();
    session.execute(Command::SetPreset {
        preset: DevicePreset::Phone,
    });
    session.execute(Command::SetTheme {
        preset: ThemePreset::Dark,
    });

    let editor = session.editor();
    assert_eq!(editor.resolution().to_array(), [1080, 1920]);
    assert_eq!(editor.tree().root_size(), Vec2::new(1080.0, 1920.0));
    assert_eq!(editor.theme(), &Theme::dark());
}

#[test]
fn replays_json_script() {
    let script = r#"[
        {"command": {"type": "set_workspace", "origin": [0, 0], "size": [1920, 1080]}},
        {"command": {"type": "scroll", "delta": -200}},
        {"command": {"type": "set_snap", "enabled": false}},
        {"command": {"type": "set_grid", "size": 10}},
        {"command": {"type": "pointer_down", "position": [100, 980]}},
        {"query": {"type": "get_selection"}},
        {"command": {"type": "pointer_move", "position": [113, 973]}},
        {"command": {"type": "pointer_up"}},
        {"command": {"type": "select", "target": {"name": "missing"}}},
        {"query": {"type": "get_node", "target": {"uid": "00000000-0000-0000-0000-000000000001"}}},
        {"command": {"type": "wait", "ms": 500}},
        {"query": {"type": "get_interaction"}}
    ]"#;

    let document = LayoutDocument::from_json(DOCUMENT).unwrap();
    let mut session = Session::from_document(&document, EditorSettings::default()).unwrap();
    let results = session.run_script(parse_script(script).unwrap());

    assert_eq!(results.len(), 3);
    assert_eq!(
        results[0],
        QueryResult::Selection {
            uid: Some(uid(1)),
            name: Some("a".into()),
        }
    );
    match &results[1] {
        // Raw (113, 107) rounds onto the 10 unit grid
        QueryResult::Node { node } => {
            assert!((node.anchored_position - Vec2::new(110.0, 110.0)).length() < 1e-3)
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(
        results[2],
        QueryResult::Interaction {
            state: "idle".into(),
            node: None,
        }
    );
    assert_eq!(session.clock().as_millis(), 500);
}
