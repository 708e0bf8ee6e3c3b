//! Docking session: per-application docking state driven once per frame.

use std::collections::HashSet;

use dockyard_core::{
    DockHost, DockNodeFlags, DockableWindow, DockingOptions, DockingParams, SpaceId,
    SplitRegistry,
};

use crate::applier::{apply_dock_layout, ApplyReport};
use crate::lifecycle::{PreFrameReport, WindowLifecycle};
use crate::render::{show_dockable_windows, RenderPass};

/// What happened during one [`DockingSession::frame`].
#[derive(Debug, Default)]
pub struct FrameReport {
    pub pre_frame: PreFrameReport,
    /// Layout applied under the root dock space.
    pub layout: ApplyReport,
    /// Layouts applied under nested dock hosts, by host label.
    pub nested_layouts: Vec<(String, ApplyReport)>,
    /// Pending windows that reached the host during this frame.
    pub probed: usize,
}

/// Docking state that survives between frames.
///
/// A session is created explicitly and passed to every operation, so several
/// independent docking contexts can live in one process.
#[derive(Debug)]
pub struct DockingSession {
    root_space_name: String,
    registry: SplitRegistry,
    lifecycle: WindowLifecycle,
    nested_hosts: HashSet<String>,
}

impl DockingSession {
    pub fn new(root_space_name: impl Into<String>) -> Self {
        Self {
            root_space_name: root_space_name.into(),
            registry: SplitRegistry::new(),
            lifecycle: WindowLifecycle::new(),
            nested_hosts: HashSet::new(),
        }
    }

    pub fn from_options(options: &DockingOptions) -> Self {
        Self::new(options.main_dock_space_name.clone())
    }

    pub fn root_space_name(&self) -> &str {
        &self.root_space_name
    }

    pub fn registry(&self) -> &SplitRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut SplitRegistry {
        &mut self.registry
    }

    pub fn lifecycle(&self) -> &WindowLifecycle {
        &self.lifecycle
    }

    /// Queues a window for insertion at a safe point.
    pub fn request_add(&mut self, window: DockableWindow, force_replace: bool) {
        self.lifecycle.request_add(window, force_replace);
    }

    /// Queues the removal of a window.
    pub fn request_remove(&mut self, label: impl Into<String>) {
        self.lifecycle.request_remove(label);
    }

    /// Submits the root dock space and registers its id.
    ///
    /// Once the layout's splits have renumbered the root name to its leftover
    /// node the registry entry is kept; a rebuild re-anchors it.
    pub fn provide_root_dock_space<H: DockHost + ?Sized>(
        &mut self,
        host: &mut H,
        flags: DockNodeFlags,
    ) -> SpaceId {
        let id = host.space_id_for(&self.root_space_name);
        host.submit_dock_space(id, flags);
        if !self.registry.contains(&self.root_space_name) {
            self.registry.set_id(&self.root_space_name, id);
        }
        id
    }

    /// Forgets which nested dock hosts were seeded, so their layouts are
    /// reset the next time they are shown.
    pub fn reset_nested_hosts(&mut self) {
        self.nested_hosts.clear();
    }

    /// Runs one frame: pending changes, layout, windows, then probing.
    ///
    /// Pending changes are applied at the start of the frame and new windows
    /// are probed at its end, so a window requested between two frames is
    /// probed by the next call and attached to the tree by the one after.
    pub fn frame<H: DockHost + ?Sized>(
        &mut self,
        host: &mut H,
        params: &mut DockingParams,
    ) -> FrameReport {
        let mut report = FrameReport {
            pre_frame: self.lifecycle.process_pending_pre_frame(
                host,
                &self.registry,
                params,
                &self.root_space_name,
            ),
            ..FrameReport::default()
        };

        self.provide_root_dock_space(host, params.main_dock_space_node_flags);
        report.layout = apply_dock_layout(params, &self.root_space_name, host, &mut self.registry);

        let mut pass = RenderPass::new(
            host,
            &mut self.registry,
            &mut self.lifecycle,
            &mut self.nested_hosts,
        );
        show_dockable_windows(&mut params.dockable_windows, &mut pass);
        report.nested_layouts = pass.nested_layouts;

        report.probed = self
            .lifecycle
            .process_pending_during_render(host, &self.registry);
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessHost;
    use dockyard_core::{AdditionState, Direction, DockingSplit, MAIN_DOCK_SPACE};

    fn layout() -> DockingParams {
        DockingParams::new("Default")
            .with_splits(vec![DockingSplit::new(
                MAIN_DOCK_SPACE,
                "Side",
                Direction::Left,
                0.25,
            )])
            .with_windows(vec![DockableWindow::new("Tools", "Side")])
    }

    fn run_frame(
        session: &mut DockingSession,
        host: &mut HeadlessHost,
        params: &mut DockingParams,
    ) -> FrameReport {
        host.new_frame();
        session.frame(host, params)
    }

    #[test]
    fn test_layout_applied_from_second_frame() {
        let mut session = DockingSession::new(MAIN_DOCK_SPACE);
        let mut host = HeadlessHost::new();
        let mut params = layout();

        let first = run_frame(&mut session, &mut host, &mut params);
        assert!(first.layout.skipped_first_frame);
        assert!(session.registry().contains(MAIN_DOCK_SPACE));
        assert!(!session.registry().contains("Side"));

        let second = run_frame(&mut session, &mut host, &mut params);
        assert!(second.layout.rebuilt);
        let side = session.registry().get_id("Side").unwrap();
        assert_eq!(host.placement_of("Tools"), Some(side));
    }

    #[test]
    fn test_root_window_placement_is_stable() {
        let mut session = DockingSession::new(MAIN_DOCK_SPACE);
        let mut host = HeadlessHost::new();
        let mut params =
            layout().with_windows(vec![DockableWindow::new("Scene", MAIN_DOCK_SPACE)]);

        run_frame(&mut session, &mut host, &mut params);
        run_frame(&mut session, &mut host, &mut params);
        let leftover = session.registry().get_id(MAIN_DOCK_SPACE).unwrap();
        let root = host.space_id_for(MAIN_DOCK_SPACE);
        assert_ne!(leftover, root);
        assert_eq!(host.placement_of("Scene"), Some(leftover));

        for _ in 0..2 {
            let report = run_frame(&mut session, &mut host, &mut params);
            assert!(!report.layout.rebuilt);
            assert_eq!(session.registry().get_id(MAIN_DOCK_SPACE).unwrap(), leftover);
            assert_eq!(host.placement_of("Scene"), Some(leftover));
            assert!(host.children_of(leftover).is_empty());
        }
    }

    #[test]
    fn test_window_added_at_runtime_reaches_its_space() {
        let mut session = DockingSession::new(MAIN_DOCK_SPACE);
        let mut host = HeadlessHost::new();
        let mut params = layout();
        run_frame(&mut session, &mut host, &mut params);
        run_frame(&mut session, &mut host, &mut params);

        session.request_add(DockableWindow::new("Tool", "Side"), false);
        assert!(params.dockable_window_of_name("Tool").is_none());

        let report = run_frame(&mut session, &mut host, &mut params);
        assert_eq!(report.probed, 1);
        assert_eq!(session.lifecycle().state_of("Tool"), Some(AdditionState::Probed));
        let side = session.registry().get_id("Side").unwrap();
        assert_eq!(host.placement_of("Tool"), Some(side));

        let report = run_frame(&mut session, &mut host, &mut params);
        assert_eq!(report.pre_frame.resolved.len(), 1);
        assert!(session.lifecycle().is_idle());
        assert!(params.dockable_window_of_name("Tool").is_some());
        assert_eq!(host.placement_of("Tool"), Some(side));
    }

    #[test]
    fn test_gui_callback_can_spawn_and_close() {
        let mut session = DockingSession::new(MAIN_DOCK_SPACE);
        let mut host = HeadlessHost::new();
        let spawner = DockableWindow::new("Spawner", "Side").with_gui(|ctx| {
            ctx.add_dockable_window(DockableWindow::new("Child", "Side"), false);
            ctx.request_close();
        });
        let mut params = layout().with_windows(vec![spawner]);

        run_frame(&mut session, &mut host, &mut params);
        // The tree is untouched while it is being rendered.
        assert_eq!(params.window_count(), 1);
        assert_eq!(session.lifecycle().pending_additions().len(), 1);

        let report = run_frame(&mut session, &mut host, &mut params);
        assert_eq!(report.pre_frame.pruned.len(), 1);
        run_frame(&mut session, &mut host, &mut params);
        assert!(params.dockable_window_of_name("Spawner").is_none());
        assert!(params.dockable_window_of_name("Child").is_some());
    }

    #[test]
    fn test_floating_window_resolves() {
        let mut session = DockingSession::new(MAIN_DOCK_SPACE);
        let mut host = HeadlessHost::new();
        let mut params = DockingParams::default();
        session.request_add(DockableWindow::new("Floating", ""), false);

        let report = run_frame(&mut session, &mut host, &mut params);
        assert_eq!(report.probed, 1);
        let report = run_frame(&mut session, &mut host, &mut params);
        assert_eq!(report.pre_frame.resolved.len(), 1);
        assert_eq!(host.placement_of("Floating"), None);
    }

    #[test]
    fn test_from_options_uses_configured_root() {
        let options = DockingOptions {
            main_dock_space_name: "Workspace".to_string(),
            ..DockingOptions::default()
        };
        let mut session = DockingSession::from_options(&options);
        let mut host = HeadlessHost::new();
        let id = session.provide_root_dock_space(&mut host, DockNodeFlags::NONE);
        assert_eq!(session.root_space_name(), "Workspace");
        assert_eq!(session.registry().get_id("Workspace").ok(), Some(id));
    }
}
