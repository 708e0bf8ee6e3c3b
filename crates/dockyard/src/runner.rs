//! Application-level driver: current layout, alternatives and settings.

use dockyard_core::{
    DockError, DockHost, DockableWindow, DockingOptions, DockingParams, SpaceId,
};
use dockyard_layout::{DockingSession, FrameReport};
use dockyard_settings::{
    has_layout_settings, restore_misc, restore_split_registry, restore_user_pref,
    restore_visibility, store_misc, store_split_registry, store_user_pref, store_visibility,
    MiscSettings, SettingsDocument,
};
use dockyard_ui::{apply_view_menu_action, build_view_menu, ViewMenu, ViewMenuAction};

use crate::error::Result;

/// Owns the docking state of an application.
///
/// The runner holds the active [`DockingParams`], any alternative layouts the
/// user can switch to, the [`DockingSession`] and the settings document.
#[derive(Debug)]
pub struct DockingRunner {
    options: DockingOptions,
    params: DockingParams,
    alternatives: Vec<DockingParams>,
    /// Every layout name seen so far, in first-seen order.
    layout_order: Vec<String>,
    session: DockingSession,
    settings: SettingsDocument,
}

impl DockingRunner {
    /// Creates a runner for a validated layout.
    pub fn new(options: DockingOptions, params: DockingParams) -> Result<Self> {
        params.validate()?;
        let session = DockingSession::from_options(&options);
        Ok(Self {
            options,
            layout_order: vec![params.layout_name.clone()],
            params,
            alternatives: Vec::new(),
            session,
            settings: SettingsDocument::new(),
        })
    }

    /// Adds layouts the user can switch to.
    pub fn with_alternative_layouts(mut self, layouts: Vec<DockingParams>) -> Result<Self> {
        for layout in layouts {
            layout.validate()?;
            self.remember_layout_name(&layout.layout_name);
            self.alternatives.push(layout);
        }
        Ok(self)
    }

    fn remember_layout_name(&mut self, name: &str) {
        if !self.layout_order.iter().any(|n| n == name) {
            self.layout_order.push(name.to_string());
        }
    }

    pub fn options(&self) -> &DockingOptions {
        &self.options
    }

    pub fn params(&self) -> &DockingParams {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut DockingParams {
        &mut self.params
    }

    pub fn session(&self) -> &DockingSession {
        &self.session
    }

    pub fn settings(&self) -> &SettingsDocument {
        &self.settings
    }

    /// Reads settings and restores what they hold.
    ///
    /// Each section is restored independently; a corrupt section is logged
    /// and skipped. Only reading the file itself can fail.
    pub fn load_settings(&mut self) -> Result<()> {
        if let Some(path) = &self.options.settings_path {
            self.settings = SettingsDocument::load(path)?;
        }

        if let Err(err) = restore_split_registry(&self.settings, self.session.registry_mut()) {
            log::warn!("ignoring saved split ids: {err}");
        }

        if self.options.remember_selected_layout {
            match restore_misc(&self.settings) {
                Ok(Some(MiscSettings {
                    layout_name: Some(name),
                })) if name != self.params.layout_name => {
                    // The outgoing layout still holds defaults; its saved
                    // section must not be overwritten.
                    if let Err(err) = self.activate_layout(&name) {
                        log::warn!("cannot restore selected layout: {err}");
                    }
                }
                Ok(_) => {}
                Err(err) => log::warn!("ignoring saved misc settings: {err}"),
            }
        }

        if self.options.restore_visibility {
            if let Err(err) = restore_visibility(&self.settings, &mut self.params) {
                log::warn!("ignoring saved visibility: {err}");
            }
        }

        let has_user_settings = has_layout_settings(&self.settings, &self.params.layout_name);
        if self.params.needs_initial_reset(has_user_settings) {
            self.params.layout_reset = true;
        }
        log::info!(
            "settings loaded, layout '{}'{}",
            self.params.layout_name,
            if self.params.layout_reset { " (reset)" } else { "" }
        );
        Ok(())
    }

    /// Stores the current state and writes the settings file if configured.
    pub fn save_settings(&mut self) -> Result<()> {
        store_split_registry(&mut self.settings, self.session.registry())?;
        store_visibility(&mut self.settings, &self.params)?;
        let misc = MiscSettings {
            layout_name: self
                .options
                .remember_selected_layout
                .then(|| self.params.layout_name.clone()),
        };
        store_misc(&mut self.settings, &misc)?;
        if let Some(path) = &self.options.settings_path {
            self.settings.write(path)?;
        }
        Ok(())
    }

    /// Makes the named alternative the current layout.
    ///
    /// Visibility of the outgoing layout is kept in the settings document and
    /// the incoming layout's saved visibility is restored. The new layout is
    /// rebuilt at the next frame.
    pub fn switch_layout(&mut self, name: &str) -> Result<()> {
        if name == self.params.layout_name {
            return Ok(());
        }
        if !self.alternatives.iter().any(|l| l.layout_name == name) {
            return Err(DockError::LayoutNotFound(name.to_string()).into());
        }

        store_visibility(&mut self.settings, &self.params)?;
        self.activate_layout(name)?;
        if let Err(err) = restore_visibility(&self.settings, &mut self.params) {
            log::warn!("ignoring saved visibility of '{name}': {err}");
        }
        log::info!("switched to layout '{name}'");
        Ok(())
    }

    /// Swaps the named alternative in and schedules its rebuild.
    fn activate_layout(&mut self, name: &str) -> Result<()> {
        let index = self
            .alternatives
            .iter()
            .position(|l| l.layout_name == name)
            .ok_or_else(|| DockError::LayoutNotFound(name.to_string()))?;
        std::mem::swap(&mut self.params, &mut self.alternatives[index]);
        self.params.layout_reset = true;
        self.session.reset_nested_hosts();
        Ok(())
    }

    /// Runs one frame on the host.
    pub fn frame<H: DockHost + ?Sized>(&mut self, host: &mut H) -> FrameReport {
        self.session.frame(host, &mut self.params)
    }

    /// Queues a window for insertion; see [`DockingSession::request_add`].
    pub fn request_add(&mut self, window: DockableWindow, force_replace: bool) {
        self.session.request_add(window, force_replace);
    }

    /// Queues the removal of a window.
    pub fn request_remove(&mut self, label: impl Into<String>) {
        self.session.request_remove(label);
    }

    pub fn dockable_window_of_name(&self, name: &str) -> Option<&DockableWindow> {
        self.params.dockable_window_of_name(name)
    }

    pub fn dockable_window_of_name_mut(&mut self, name: &str) -> Option<&mut DockableWindow> {
        self.params.dockable_window_of_name_mut(name)
    }

    /// Brings a window to front at the next frame. Returns false if unknown.
    pub fn focus_dockable_window(&mut self, name: &str) -> bool {
        self.params.focus_dockable_window(name)
    }

    /// Host id of a dock space, once the layout has been applied.
    pub fn dock_space_id_from_name(&self, name: &str) -> Option<SpaceId> {
        self.session.registry().try_get_id(name)
    }

    /// Names of available layouts, in a stable order that does not change
    /// when switching.
    pub fn layout_names(&self) -> Vec<String> {
        self.layout_order
            .iter()
            .filter(|name| {
                **name == self.params.layout_name
                    || self.alternatives.iter().any(|l| l.layout_name == **name)
            })
            .cloned()
            .collect()
    }

    pub fn view_menu(&self) -> ViewMenu {
        build_view_menu(&self.params, &self.layout_names())
    }

    /// Applies a view menu choice, switching layouts when asked.
    pub fn apply_view_menu_action(&mut self, action: &ViewMenuAction) -> Result<()> {
        if let Some(name) = apply_view_menu_action(&mut self.params, action) {
            self.switch_layout(&name)?;
        }
        Ok(())
    }

    /// Stores a free-form preference in the settings document.
    pub fn set_user_pref(&mut self, name: &str, content: &str) {
        store_user_pref(&mut self.settings, name, content);
    }

    pub fn user_pref(&self, name: &str) -> Option<String> {
        restore_user_pref(&self.settings, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dockyard_core::{Direction, DockingSplit, LayoutCondition, MAIN_DOCK_SPACE};
    use dockyard_layout::HeadlessHost;

    fn default_layout() -> DockingParams {
        DockingParams::new("Default")
            .with_splits(vec![DockingSplit::new(
                MAIN_DOCK_SPACE,
                "Side",
                Direction::Left,
                0.25,
            )])
            .with_windows(vec![
                DockableWindow::new("Tools", "Side"),
                DockableWindow::new("Scene", MAIN_DOCK_SPACE),
            ])
    }

    fn alternative_layout() -> DockingParams {
        DockingParams::new("Alternative")
            .with_splits(vec![DockingSplit::new(
                MAIN_DOCK_SPACE,
                "Bottom",
                Direction::Down,
                0.3,
            )])
            .with_windows(vec![
                DockableWindow::new("Tools", "Bottom"),
                DockableWindow::new("Scene", MAIN_DOCK_SPACE),
            ])
    }

    fn runner() -> DockingRunner {
        DockingRunner::new(DockingOptions::default(), default_layout())
            .unwrap()
            .with_alternative_layouts(vec![alternative_layout()])
            .unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_layout() {
        let params = DockingParams::new("Broken").with_windows(vec![
            DockableWindow::new("Twin", ""),
            DockableWindow::new("Twin", ""),
        ]);
        assert!(DockingRunner::new(DockingOptions::default(), params).is_err());
    }

    #[test]
    fn test_layout_names_keep_order_across_switches() {
        let mut runner = runner();
        assert_eq!(runner.layout_names(), vec!["Default", "Alternative"]);
        runner.switch_layout("Alternative").unwrap();
        assert_eq!(runner.params().layout_name, "Alternative");
        assert!(runner.params().layout_reset);
        assert_eq!(runner.layout_names(), vec!["Default", "Alternative"]);
        assert!(runner.switch_layout("Missing").is_err());
    }

    #[test]
    fn test_switch_keeps_visibility_per_layout() {
        let mut runner = runner();
        runner.dockable_window_of_name_mut("Tools").unwrap().is_visible = false;
        runner.switch_layout("Alternative").unwrap();
        assert!(runner.dockable_window_of_name("Tools").unwrap().is_visible);
        runner.switch_layout("Default").unwrap();
        assert!(!runner.dockable_window_of_name("Tools").unwrap().is_visible);
    }

    #[test]
    fn test_view_menu_selects_layout() {
        let mut runner = runner();
        let menu = runner.view_menu();
        assert_eq!(menu.layouts.len(), 2);
        runner
            .apply_view_menu_action(&ViewMenuAction::SelectLayout("Alternative".into()))
            .unwrap();
        assert_eq!(runner.params().layout_name, "Alternative");
    }

    #[test]
    fn test_load_without_settings_requests_reset() {
        let mut runner = runner();
        runner.load_settings().unwrap();
        assert!(runner.params().layout_reset);

        let params = default_layout().with_layout_condition(LayoutCondition::Never);
        let mut runner = DockingRunner::new(DockingOptions::default(), params).unwrap();
        runner.load_settings().unwrap();
        assert!(!runner.params().layout_reset);
    }

    #[test]
    fn test_dock_space_ids_after_frames() {
        let mut runner = runner();
        let mut host = HeadlessHost::new();
        assert!(runner.dock_space_id_from_name("Side").is_none());
        for _ in 0..2 {
            host.new_frame();
            runner.frame(&mut host);
        }
        let side = runner.dock_space_id_from_name("Side").unwrap();
        assert_eq!(host.placement_of("Tools"), Some(side));
    }

    #[test]
    fn test_user_prefs() {
        let mut runner = runner();
        assert!(runner.user_pref("theme").is_none());
        runner.set_user_pref("theme", "dark");
        assert_eq!(runner.user_pref("theme").as_deref(), Some("dark"));
    }
}
