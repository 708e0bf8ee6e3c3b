//! Frame-level integration tests driven through the headless host.

use dockyard::*;

fn layout() -> DockingParams {
    DockingParams::new("Default")
        .with_splits(vec![
            DockingSplit::new(MAIN_DOCK_SPACE, "Side", Direction::Left, 0.25),
            DockingSplit::new(MAIN_DOCK_SPACE, "Bottom", Direction::Down, 0.3),
        ])
        .with_windows(vec![
            DockableWindow::new("Scene", MAIN_DOCK_SPACE).with_can_be_closed(false),
            DockableWindow::new("Logs", "Bottom"),
        ])
}

fn run_frames(runner: &mut DockingRunner, host: &mut HeadlessHost, frames: usize) -> FrameReport {
    let mut last = FrameReport::default();
    for _ in 0..frames {
        host.new_frame();
        last = runner.frame(host);
    }
    last
}

#[test]
fn test_runtime_window_docks_into_side() {
    let mut runner = DockingRunner::new(DockingOptions::default(), layout()).unwrap();
    let mut host = HeadlessHost::new();
    run_frames(&mut runner, &mut host, 2);
    let side = runner.dock_space_id_from_name("Side").unwrap();

    runner.request_add(DockableWindow::new("Tool", "Side"), false);
    let report = run_frames(&mut runner, &mut host, 1);
    assert_eq!(report.probed, 1);
    assert_eq!(host.placement_of("Tool"), Some(side));
    assert!(runner.dockable_window_of_name("Tool").is_none());

    let report = run_frames(&mut runner, &mut host, 1);
    assert_eq!(report.pre_frame.attached.len(), 1);
    assert_eq!(report.pre_frame.attached[0].1, InsertionPoint::SplitOwner);
    let mut copies = 0;
    runner.params().for_each_window(&mut |w| {
        if w.label.matches("Tool") {
            copies += 1;
        }
    });
    assert_eq!(copies, 1);
    assert!(runner.session().lifecycle().is_idle());
    assert_eq!(host.placement_of("Tool"), Some(side));

    // Windows in the root keep their leftover node once splits are built.
    let main = runner.dock_space_id_from_name(MAIN_DOCK_SPACE).unwrap();
    run_frames(&mut runner, &mut host, 2);
    assert_eq!(runner.dock_space_id_from_name(MAIN_DOCK_SPACE), Some(main));
    assert_eq!(host.placement_of("Scene"), Some(main));
}

#[test]
fn test_removal_requested_before_attach_wins() {
    let mut runner = DockingRunner::new(DockingOptions::default(), layout()).unwrap();
    let mut host = HeadlessHost::new();
    run_frames(&mut runner, &mut host, 2);

    runner.request_add(DockableWindow::new("W", "Side"), false);
    run_frames(&mut runner, &mut host, 1);
    runner.request_remove("W");
    let report = run_frames(&mut runner, &mut host, 3);
    assert!(runner.dockable_window_of_name("W").is_none());
    assert!(runner.session().lifecycle().is_idle());
    assert!(report.pre_frame.attached.is_empty());
}

#[test]
fn test_window_closed_by_user_can_be_reopened_from_menu() {
    let mut runner = DockingRunner::new(DockingOptions::default(), layout()).unwrap();
    let mut host = HeadlessHost::new();
    run_frames(&mut runner, &mut host, 2);

    host.click_close("Logs");
    run_frames(&mut runner, &mut host, 1);
    assert!(!runner.dockable_window_of_name("Logs").unwrap().is_visible);

    runner
        .apply_view_menu_action(&ViewMenuAction::ToggleWindow("Logs".into()))
        .unwrap();
    assert!(runner.dockable_window_of_name("Logs").unwrap().is_visible);
}

#[test]
fn test_restore_default_layout_rebuilds() {
    let mut runner = DockingRunner::new(DockingOptions::default(), layout()).unwrap();
    let mut host = HeadlessHost::new();
    run_frames(&mut runner, &mut host, 2);
    let bottom = runner.dock_space_id_from_name("Bottom").unwrap();

    // The user drags the log window elsewhere, then restores the layout.
    let side = runner.dock_space_id_from_name("Side").unwrap();
    host.drag_window_to("Logs", side);
    runner
        .apply_view_menu_action(&ViewMenuAction::RestoreDefaultLayout)
        .unwrap();
    let report = run_frames(&mut runner, &mut host, 1);
    assert!(report.layout.rebuilt);
    let new_bottom = runner.dock_space_id_from_name("Bottom").unwrap();
    assert_ne!(new_bottom, bottom);
    assert_eq!(host.placement_of("Logs"), Some(new_bottom));
}

#[test]
fn test_stable_label_survives_rename() {
    let params = DockingParams::new("Default").with_windows(vec![DockableWindow::new(
        "Scene###scene",
        MAIN_DOCK_SPACE,
    )]);
    let mut runner = DockingRunner::new(DockingOptions::default(), params).unwrap();
    let mut host = HeadlessHost::new();
    run_frames(&mut runner, &mut host, 2);

    assert!(runner.dockable_window_of_name("scene").is_none());
    let window = runner.dockable_window_of_name_mut("Scene").unwrap();
    window.label = WindowLabel::new("Scene (modified)###scene");
    assert_eq!(window.label.display(), "Scene (modified)");
    assert!(runner.dockable_window_of_name("Scene (modified)").is_some());
    assert_eq!(
        runner
            .dockable_window_of_name("Scene (modified)###scene")
            .map(|w| w.label.stable_key()),
        Some(Some("scene"))
    );
}

#[test]
fn test_focus_request_brings_hidden_window_back() {
    let mut runner = DockingRunner::new(DockingOptions::default(), layout()).unwrap();
    let mut host = HeadlessHost::new();
    run_frames(&mut runner, &mut host, 2);
    runner.dockable_window_of_name_mut("Logs").unwrap().is_visible = false;

    assert!(runner.focus_dockable_window("Logs"));
    host.take_commands();
    run_frames(&mut runner, &mut host, 1);
    assert!(runner.dockable_window_of_name("Logs").unwrap().is_visible);
    assert!(host
        .commands()
        .contains(&HostCommand::FocusWindow("Logs".into())));
}

#[test]
fn test_nested_dock_host_layout() {
    let editor_layout = DockingParams::new("editor")
        .with_splits(vec![DockingSplit::new(
            "Editor",
            "EditorBottom",
            Direction::Down,
            0.3,
        )])
        .with_windows(vec![DockableWindow::new("Console", "EditorBottom")]);
    let params = DockingParams::new("Default").with_windows(vec![DockableWindow::new(
        "Editor",
        MAIN_DOCK_SPACE,
    )
    .with_docking_params(editor_layout)]);
    let mut runner = DockingRunner::new(DockingOptions::default(), params).unwrap();
    let mut host = HeadlessHost::new();

    let report = run_frames(&mut runner, &mut host, 2);
    assert_eq!(report.nested_layouts.len(), 1);
    assert_eq!(report.nested_layouts[0].0, "Editor");
    let bottom = runner.dock_space_id_from_name("EditorBottom").unwrap();
    assert_eq!(host.placement_of("Console"), Some(bottom));

    // A window added into the nested host's split lands in its tree.
    runner.request_add(DockableWindow::new("Output", "EditorBottom"), false);
    run_frames(&mut runner, &mut host, 2);
    let editor = runner.dockable_window_of_name("Editor").unwrap();
    assert_eq!(editor.docking_params.dockable_windows.len(), 2);
    assert_eq!(host.placement_of("Output"), Some(bottom));
}
