#![allow(clippy::too_many_lines)]
//! Docking demonstration driven by the headless host.
//!
//! This demo shows:
//! - A default layout with two splits and an alternative layout
//! - A nested dock host with its own splits
//! - Windows added and removed from inside gui callbacks
//! - Switching layouts through the view menu model
//! - Saving and restoring settings
//!
//! Run with: `RUST_LOG=debug cargo run --example docking_demo`

use dockyard::*;

fn default_layout() -> DockingParams {
    let editor_layout = DockingParams::new("editor")
        .with_splits(vec![DockingSplit::new(
            "Editor###editor",
            "EditorConsole",
            Direction::Down,
            0.3,
        )])
        .with_windows(vec![DockableWindow::new("Console", "EditorConsole")]);

    let mut spawned = 0u32;
    let launcher = DockableWindow::new("Launcher", "CommandSpace")
        .with_category("Tools")
        .with_gui(move |ctx| {
            if spawned < 2 {
                spawned += 1;
                ctx.add_dockable_window(
                    DockableWindow::new(format!("Result {spawned}"), "MiscSpace"),
                    false,
                );
            }
        });

    DockingParams::new("Default")
        .with_splits(vec![
            DockingSplit::new(MAIN_DOCK_SPACE, "CommandSpace", Direction::Down, 0.25),
            DockingSplit::new(MAIN_DOCK_SPACE, "MiscSpace", Direction::Left, 0.3)
                .with_node_flags(DockNodeFlags::AUTO_HIDE_TAB_BAR),
        ])
        .with_windows(vec![
            DockableWindow::new("Editor###editor", MAIN_DOCK_SPACE)
                .with_can_be_closed(false)
                .with_docking_params(editor_layout),
            launcher,
            DockableWindow::new("Logs", "CommandSpace").with_category("Tools"),
        ])
}

fn compact_layout() -> DockingParams {
    DockingParams::new("Compact").with_windows(vec![
        DockableWindow::new("Editor###editor", MAIN_DOCK_SPACE).with_can_be_closed(false),
        DockableWindow::new("Logs", MAIN_DOCK_SPACE),
    ])
}

fn run_frame(runner: &mut DockingRunner, host: &mut HeadlessHost) {
    host.new_frame();
    let report = runner.frame(host);
    log::info!(
        "frame {}: rebuilt={} docked={} probed={} attached={}",
        host.frame_count(),
        report.layout.rebuilt,
        report.layout.windows_docked,
        report.probed,
        report.pre_frame.attached.len()
    );
}

fn main() -> Result<()> {
    init_logging();

    let settings_path = std::env::temp_dir().join("dockyard_demo.ini");
    let options = DockingOptions::default().with_settings_path(&settings_path);
    let mut runner = DockingRunner::new(options, default_layout())?
        .with_alternative_layouts(vec![compact_layout()])?;
    runner.load_settings()?;

    let mut host = HeadlessHost::new();
    for _ in 0..5 {
        run_frame(&mut runner, &mut host);
    }

    for name in ["Result 1", "Result 2", "Console"] {
        let placement = runner
            .dock_space_id_from_name("MiscSpace")
            .zip(host.placement_of(name));
        log::info!("'{name}' placed: {placement:?}");
    }

    runner.request_remove("Result 1");
    run_frame(&mut runner, &mut host);

    let menu = runner.view_menu();
    for group in &menu.categories {
        let entries: Vec<&str> = group.entries.iter().map(|e| e.display.as_str()).collect();
        log::info!("view menu [{}]: {entries:?}", group.name);
    }

    runner.apply_view_menu_action(&ViewMenuAction::SelectLayout("Compact".into()))?;
    run_frame(&mut runner, &mut host);
    log::info!("active layout: {}", runner.params().layout_name);

    runner.save_settings()?;
    log::info!("settings written to {}", settings_path.display());
    Ok(())
}
