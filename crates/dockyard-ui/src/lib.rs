//! UI layer for dockyard.
//!
//! The view menu is built as plain data by [`build_view_menu`] and drawn with
//! egui by [`show_view_menu`]. Choices are returned as [`ViewMenuAction`]s.

#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]

pub mod egui_menu;
pub mod view_menu;

pub use egui_menu::{show_view_menu, show_view_menu_contents};
pub use view_menu::{
    apply_view_menu_action, build_view_menu, CategoryGroup, LayoutEntry, ViewMenu,
    ViewMenuAction, WindowEntry,
};
