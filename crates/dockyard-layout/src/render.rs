//! Per-frame rendering of the dock tree.

use std::collections::HashSet;

use dockyard_core::{DockHost, DockableWindow, GuiContext, SplitRegistry, WindowRequests};

use crate::applier::{apply_dock_layout, ApplyReport};

/// Everything a render pass needs besides the windows themselves.
pub struct RenderPass<'a, H: DockHost + ?Sized> {
    pub host: &'a mut H,
    pub registry: &'a mut SplitRegistry,
    /// Receives structural requests made from gui functions.
    pub requests: &'a mut dyn WindowRequests,
    /// Labels of dock-host windows whose layout was already seeded.
    pub nested_hosts: &'a mut HashSet<String>,
    /// Reports of nested layouts applied during this pass.
    pub nested_layouts: Vec<(String, ApplyReport)>,
}

impl<'a, H: DockHost + ?Sized> RenderPass<'a, H> {
    pub fn new(
        host: &'a mut H,
        registry: &'a mut SplitRegistry,
        requests: &'a mut dyn WindowRequests,
        nested_hosts: &'a mut HashSet<String>,
    ) -> Self {
        Self {
            host,
            registry,
            requests,
            nested_hosts,
            nested_layouts: Vec::new(),
        }
    }
}

/// Renders windows in order, depth-first into nested dock hosts.
///
/// Hidden windows are skipped together with their children. Gui functions
/// may only enqueue structural changes through their [`GuiContext`]; the
/// tree itself is not modified here except for per-window flags.
pub fn show_dockable_windows<H: DockHost + ?Sized>(
    windows: &mut [DockableWindow],
    pass: &mut RenderPass<'_, H>,
) {
    // Focus requests are honoured once every window had a first frame.
    let all_windows_seen = pass.host.frame_count() > 1;
    for window in windows.iter_mut() {
        show_window(window, all_windows_seen, pass);
    }
}

fn show_window<H: DockHost + ?Sized>(
    window: &mut DockableWindow,
    all_windows_seen: bool,
    pass: &mut RenderPass<'_, H>,
) {
    let focus = window.focus_window_at_next_frame && all_windows_seen;
    if focus {
        window.is_visible = true;
    }
    if !window.is_visible {
        return;
    }

    if !window.call_begin_end {
        run_gui(window, pass.requests);
        return;
    }

    let expanded = if window.can_be_closed {
        pass.host
            .begin_window(window.label.as_str(), Some(&mut window.is_visible))
    } else {
        pass.host.begin_window(window.label.as_str(), None)
    };
    if expanded {
        run_gui(window, pass.requests);
    }

    if window.is_dock_host() {
        provide_nested_dock_space(window, pass);
    }
    if !window.docking_params.dockable_windows.is_empty() {
        show_dockable_windows(&mut window.docking_params.dockable_windows, pass);
    }
    pass.host.end_window();

    if focus {
        if !pass.host.focus_window(window.label.as_str()) {
            log::debug!("focused window '{}' has no dock node yet", window.label);
        }
        window.focus_window_at_next_frame = false;
    }
}

fn run_gui(window: &mut DockableWindow, requests: &mut dyn WindowRequests) {
    if let Some(gui) = window.gui_function.as_mut() {
        let mut ctx = GuiContext::new(&window.label, requests, &mut window.wants_close);
        gui(&mut ctx);
    }
}

/// Submits the dock space hosted by a window and applies its layout.
///
/// The nested layout is reset the first time each host is seen.
fn provide_nested_dock_space<H: DockHost + ?Sized>(
    window: &mut DockableWindow,
    pass: &mut RenderPass<'_, H>,
) {
    let space_name = window.label.as_str();
    let space = pass.host.space_id_for(space_name);
    if !pass.registry.contains(space_name) {
        pass.registry.set_id(space_name, space);
    }
    pass.host
        .submit_dock_space(space, window.docking_params.main_dock_space_node_flags);

    if pass.nested_hosts.insert(space_name.to_string()) {
        log::debug!("first frame of nested dock host '{space_name}'");
        window.docking_params.layout_reset = true;
    }
    let report = apply_dock_layout(
        &mut window.docking_params,
        space_name,
        pass.host,
        pass.registry,
    );
    pass.nested_layouts.push((space_name.to_string(), report));
}
