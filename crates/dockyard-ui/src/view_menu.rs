//! View menu model.
//!
//! [`build_view_menu`] snapshots the dock tree into a plain data structure
//! that any UI toolkit can render. User choices come back as
//! [`ViewMenuAction`]s and are applied with [`apply_view_menu_action`], so
//! the tree is never borrowed while the menu is drawn.

use dockyard_core::{DockableWindow, DockingParams};

/// One window in the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowEntry {
    /// Full label, used to identify the window in actions.
    pub label: String,
    /// Text shown to the user.
    pub display: String,
    pub is_visible: bool,
    /// Whether the visibility can be toggled.
    pub enabled: bool,
    /// Nested windows shown as a submenu instead of a toggle.
    pub children: Vec<WindowEntry>,
}

/// Windows sharing a category. The uncategorised group has an empty name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup {
    pub name: String,
    pub entries: Vec<WindowEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutEntry {
    pub name: String,
    pub selected: bool,
}

/// Snapshot of everything the view menu displays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewMenu {
    /// "Restore default layout" is offered.
    pub can_restore_default: bool,
    /// Layout selector entries; empty when there is a single layout.
    pub layouts: Vec<LayoutEntry>,
    /// Window groups; empty when the layout has no windows.
    pub categories: Vec<CategoryGroup>,
}

impl ViewMenu {
    pub fn has_window_section(&self) -> bool {
        !self.categories.is_empty()
    }
}

/// A choice made in the view menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewMenuAction {
    RestoreDefaultLayout,
    SelectLayout(String),
    ToggleWindow(String),
    ShowAll,
    HideAll,
}

fn window_entry(window: &DockableWindow) -> WindowEntry {
    let nested = &window.docking_params.dockable_windows;
    let children = if window.is_visible && !nested.is_empty() {
        window_entries(nested)
    } else {
        Vec::new()
    };
    WindowEntry {
        label: window.label.as_str().to_string(),
        display: window.label.display().to_string(),
        is_visible: window.is_visible,
        enabled: window.can_be_closed,
        children,
    }
}

fn window_entries(windows: &[DockableWindow]) -> Vec<WindowEntry> {
    windows
        .iter()
        .filter(|w| w.include_in_view_menu)
        .map(window_entry)
        .collect()
}

/// Builds the menu for the current layout.
///
/// `layout_names` lists every available layout in a stable order; the
/// selector is only offered when there is more than one.
pub fn build_view_menu(current: &DockingParams, layout_names: &[String]) -> ViewMenu {
    let layouts = if layout_names.len() > 1 {
        layout_names
            .iter()
            .map(|name| LayoutEntry {
                name: name.clone(),
                selected: *name == current.layout_name,
            })
            .collect()
    } else {
        Vec::new()
    };

    let mut categories: Vec<CategoryGroup> = Vec::new();
    for window in current
        .dockable_windows
        .iter()
        .filter(|w| w.include_in_view_menu)
    {
        let entry = window_entry(window);
        match categories.iter_mut().find(|g| g.name == window.category) {
            Some(group) => group.entries.push(entry),
            None => categories.push(CategoryGroup {
                name: window.category.clone(),
                entries: vec![entry],
            }),
        }
    }
    // The empty name sorts first.
    categories.sort_by(|a, b| a.name.cmp(&b.name));

    ViewMenu {
        can_restore_default: !current.dockable_windows.is_empty(),
        layouts,
        categories,
    }
}

/// Applies a menu choice to the tree.
///
/// Returns the name of the layout to switch to, if the action asks for a
/// different layout.
pub fn apply_view_menu_action(
    params: &mut DockingParams,
    action: &ViewMenuAction,
) -> Option<String> {
    match action {
        ViewMenuAction::RestoreDefaultLayout => {
            log::info!("restoring default layout '{}'", params.layout_name);
            params.layout_reset = true;
            None
        }
        ViewMenuAction::SelectLayout(name) => (*name != params.layout_name).then(|| name.clone()),
        ViewMenuAction::ToggleWindow(label) => {
            match params.dockable_window_of_name_mut(label) {
                Some(window) if window.can_be_closed => window.is_visible = !window.is_visible,
                Some(_) => log::debug!("window '{label}' cannot be hidden"),
                None => log::warn!("view menu: window '{label}' not found"),
            }
            None
        }
        ViewMenuAction::ShowAll | ViewMenuAction::HideAll => {
            let visible = *action == ViewMenuAction::ShowAll;
            for window in &mut params.dockable_windows {
                if window.can_be_closed && window.include_in_view_menu {
                    window.is_visible = visible;
                }
            }
            None
        }
    }
}
