//! egui rendering of the view menu.

use egui::{Checkbox, RichText, Ui};

use crate::view_menu::{ViewMenu, ViewMenuAction, WindowEntry};

/// Draws a "View" menu button and returns the actions chosen this frame.
pub fn show_view_menu(ui: &mut Ui, menu: &ViewMenu) -> Vec<ViewMenuAction> {
    let mut actions = Vec::new();
    ui.menu_button("View", |ui| show_view_menu_contents(ui, menu, &mut actions));
    actions
}

/// Draws the menu content into an already open menu.
pub fn show_view_menu_contents(ui: &mut Ui, menu: &ViewMenu, actions: &mut Vec<ViewMenuAction>) {
    if !menu.layouts.is_empty() {
        ui.label(RichText::new("Layouts").weak());
    }
    if menu.can_restore_default && ui.button("Restore default layout").clicked() {
        actions.push(ViewMenuAction::RestoreDefaultLayout);
        ui.close_menu();
    }
    if !menu.layouts.is_empty() {
        ui.menu_button("Select Layout", |ui| {
            for layout in &menu.layouts {
                if ui.radio(layout.selected, layout.name.as_str()).clicked() {
                    actions.push(ViewMenuAction::SelectLayout(layout.name.clone()));
                    ui.close_menu();
                }
            }
        });
    }

    if !menu.has_window_section() {
        return;
    }
    ui.separator();
    ui.label(RichText::new("Windows").weak());
    if ui.button("View All").clicked() {
        actions.push(ViewMenuAction::ShowAll);
    }
    if ui.button("Hide All").clicked() {
        actions.push(ViewMenuAction::HideAll);
    }
    for group in &menu.categories {
        if group.name.is_empty() {
            show_entries(ui, &group.entries, actions);
        } else {
            ui.menu_button(group.name.as_str(), |ui| {
                show_entries(ui, &group.entries, actions);
            });
        }
    }
}

fn show_entries(ui: &mut Ui, entries: &[WindowEntry], actions: &mut Vec<ViewMenuAction>) {
    for entry in entries {
        if entry.children.is_empty() {
            let mut visible = entry.is_visible;
            let response = ui.add_enabled(
                entry.enabled,
                Checkbox::new(&mut visible, entry.display.as_str()),
            );
            if response.clicked() {
                actions.push(ViewMenuAction::ToggleWindow(entry.label.clone()));
            }
        } else {
            ui.menu_button(entry.display.as_str(), |ui| {
                show_entries(ui, &entry.children, actions);
            });
        }
    }
}
