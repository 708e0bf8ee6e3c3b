//! The dock tree: splits, dockable windows and their nesting.
//!
//! A [`DockingParams`] node owns its windows exclusively. Any window may carry
//! its own nested [`DockingParams`], turning it into a dock host. Cross
//! references (a window's target dock space, a split's initial dock) are plain
//! names resolved through the split registry, never pointers.

use std::collections::HashSet;
use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{DockError, Result};
use crate::host::{Direction, DockNodeFlags};
use crate::identity::WindowLabel;

/// Name of a region of the screen into which windows can be docked.
pub type DockSpaceName = String;

/// Default name of the root dock space.
pub const MAIN_DOCK_SPACE: &str = "MainDockSpace";

/// Describes how a new dock space is created by splitting an existing one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DockingSplit {
    /// Space to split. Must exist (or be created by an earlier split).
    pub initial_dock: DockSpaceName,
    /// Name of the space created by this split.
    pub new_dock: DockSpaceName,
    /// Side of `initial_dock` on which the new space appears.
    pub direction: Direction,
    /// Fraction of `initial_dock` given to `new_dock`, in (0, 1).
    pub ratio: f32,
    /// Flags applied to the new node.
    pub node_flags: DockNodeFlags,
    /// Advisory size hint.
    pub default_size: Vec2,
}

impl DockingSplit {
    pub fn new(
        initial_dock: impl Into<String>,
        new_dock: impl Into<String>,
        direction: Direction,
        ratio: f32,
    ) -> Self {
        Self {
            initial_dock: initial_dock.into(),
            new_dock: new_dock.into(),
            direction,
            ratio,
            node_flags: DockNodeFlags::NONE,
            default_size: Vec2::new(10.0, 10.0),
        }
    }

    #[must_use]
    pub fn with_node_flags(mut self, flags: DockNodeFlags) -> Self {
        self.node_flags = flags;
        self
    }
}

/// When a layout is (re)applied at start-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LayoutCondition {
    /// Apply once, then keep the user's modifications.
    #[default]
    ApplyOnce,
    /// Re-apply at every application start.
    ApplyAlways,
    /// Never apply automatically.
    Never,
}

/// Lifecycle state of a window added at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AdditionState {
    /// Queued, not yet seen by the host.
    Pending,
    /// The host has observed the window and received its placement.
    Probed,
    /// Grafted into the dock tree, placement not yet confirmed.
    Attached,
    /// Fully placed. Windows declared up-front start here.
    #[default]
    Resolved,
}

/// Queue of structural requests, usable from inside render callbacks.
///
/// Implementors must never touch the live tree; requests are applied between
/// frames.
pub trait WindowRequests {
    /// Queues a window for insertion.
    fn add_dockable_window(&mut self, window: DockableWindow, force_replace: bool);

    /// Queues the removal of the window matching `label`.
    fn remove_dockable_window(&mut self, label: &str);
}

/// What a window's gui function receives each frame.
pub struct GuiContext<'a> {
    label: &'a WindowLabel,
    requests: &'a mut dyn WindowRequests,
    wants_close: &'a mut bool,
}

impl<'a> GuiContext<'a> {
    pub fn new(
        label: &'a WindowLabel,
        requests: &'a mut dyn WindowRequests,
        wants_close: &'a mut bool,
    ) -> Self {
        Self {
            label,
            requests,
            wants_close,
        }
    }

    /// Label of the window being rendered.
    pub fn label(&self) -> &WindowLabel {
        self.label
    }

    /// Queues a new dockable window.
    pub fn add_dockable_window(&mut self, window: DockableWindow, force_replace: bool) {
        self.requests.add_dockable_window(window, force_replace);
    }

    /// Queues the removal of a dockable window.
    pub fn remove_dockable_window(&mut self, label: &str) {
        self.requests.remove_dockable_window(label);
    }

    /// Asks for this window to be pruned before the next layout pass.
    pub fn request_close(&mut self) {
        *self.wants_close = true;
    }
}

/// Render hook of a dockable window.
pub type GuiFunction = Box<dyn FnMut(&mut GuiContext<'_>)>;

/// A unit of UI content that can be docked.
pub struct DockableWindow {
    /// Window identity; see [`WindowLabel`].
    pub label: WindowLabel,
    /// Dock space the window is placed into on (re)insertion.
    pub dock_space_name: DockSpaceName,
    /// Grouping key for the view menu.
    pub category: String,
    /// Content callback.
    pub gui_function: Option<GuiFunction>,
    pub is_visible: bool,
    /// Persist `is_visible` across runs.
    pub remember_is_visible: bool,
    pub can_be_closed: bool,
    /// When false, the gui function is called without a host window around it.
    pub call_begin_end: bool,
    pub include_in_view_menu: bool,
    pub focus_window_at_next_frame: bool,
    /// Nested layout, making this window a dock host.
    pub docking_params: DockingParams,
    pub addition_state: AdditionState,
    /// Set to have the window pruned before the next layout pass.
    pub wants_close: bool,
}

impl DockableWindow {
    pub fn new(label: impl Into<WindowLabel>, dock_space_name: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            dock_space_name: dock_space_name.into(),
            category: String::new(),
            gui_function: None,
            is_visible: true,
            remember_is_visible: true,
            can_be_closed: true,
            call_begin_end: true,
            include_in_view_menu: true,
            focus_window_at_next_frame: false,
            docking_params: DockingParams::default(),
            addition_state: AdditionState::default(),
            wants_close: false,
        }
    }

    #[must_use]
    pub fn with_gui(mut self, gui: impl FnMut(&mut GuiContext<'_>) + 'static) -> Self {
        self.gui_function = Some(Box::new(gui));
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.is_visible = visible;
        self
    }

    #[must_use]
    pub fn with_remember_is_visible(mut self, remember: bool) -> Self {
        self.remember_is_visible = remember;
        self
    }

    #[must_use]
    pub fn with_can_be_closed(mut self, can_be_closed: bool) -> Self {
        self.can_be_closed = can_be_closed;
        self
    }

    #[must_use]
    pub fn with_include_in_view_menu(mut self, include: bool) -> Self {
        self.include_in_view_menu = include;
        self
    }

    #[must_use]
    pub fn with_docking_params(mut self, params: DockingParams) -> Self {
        self.docking_params = params;
        self
    }

    /// Returns true if this window hosts a nested dock space.
    #[must_use]
    pub fn is_dock_host(&self) -> bool {
        !self.docking_params.docking_splits.is_empty()
    }
}

impl fmt::Debug for DockableWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DockableWindow")
            .field("label", &self.label)
            .field("dock_space_name", &self.dock_space_name)
            .field("category", &self.category)
            .field("has_gui", &self.gui_function.is_some())
            .field("is_visible", &self.is_visible)
            .field("remember_is_visible", &self.remember_is_visible)
            .field("can_be_closed", &self.can_be_closed)
            .field("include_in_view_menu", &self.include_in_view_menu)
            .field("docking_params", &self.docking_params)
            .field("addition_state", &self.addition_state)
            .field("wants_close", &self.wants_close)
            .finish_non_exhaustive()
    }
}

/// A node of the dock tree: splits plus the windows it owns.
#[derive(Debug)]
pub struct DockingParams {
    /// Displayed name of the layout.
    pub layout_name: String,
    pub docking_splits: Vec<DockingSplit>,
    pub dockable_windows: Vec<DockableWindow>,
    /// Flags for the node this layout is rooted at.
    pub main_dock_space_node_flags: DockNodeFlags,
    pub layout_condition: LayoutCondition,
    /// Re-derive all split ids on the next frame; cleared once applied.
    pub layout_reset: bool,
}

impl Default for DockingParams {
    fn default() -> Self {
        Self {
            layout_name: "Default".to_string(),
            docking_splits: Vec::new(),
            dockable_windows: Vec::new(),
            main_dock_space_node_flags: DockNodeFlags::PASSTHRU_CENTRAL_NODE,
            layout_condition: LayoutCondition::default(),
            layout_reset: false,
        }
    }
}

impl DockingParams {
    /// Creates an empty layout with the given name.
    pub fn new(layout_name: impl Into<String>) -> Self {
        Self {
            layout_name: layout_name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_splits(mut self, splits: Vec<DockingSplit>) -> Self {
        self.docking_splits = splits;
        self
    }

    #[must_use]
    pub fn with_windows(mut self, windows: Vec<DockableWindow>) -> Self {
        self.dockable_windows = windows;
        self
    }

    #[must_use]
    pub fn with_layout_condition(mut self, condition: LayoutCondition) -> Self {
        self.layout_condition = condition;
        self
    }

    /// Appends a window to this node, rejecting a duplicate label at this level.
    pub fn add_window(&mut self, window: DockableWindow) -> Result<()> {
        if self
            .dockable_windows
            .iter()
            .any(|w| w.label == window.label)
        {
            return Err(DockError::DuplicateLabel(window.label.to_string()));
        }
        self.dockable_windows.push(window);
        Ok(())
    }

    /// Finds a window anywhere in the tree by label.
    pub fn dockable_window_of_name(&self, name: &str) -> Option<&DockableWindow> {
        for window in &self.dockable_windows {
            if window.label.matches(name) {
                return Some(window);
            }
            if let Some(found) = window.docking_params.dockable_window_of_name(name) {
                return Some(found);
            }
        }
        None
    }

    /// Mutable variant of [`DockingParams::dockable_window_of_name`].
    pub fn dockable_window_of_name_mut(&mut self, name: &str) -> Option<&mut DockableWindow> {
        for window in &mut self.dockable_windows {
            if window.label.matches(name) {
                return Some(window);
            }
            if let Some(found) = window.docking_params.dockable_window_of_name_mut(name) {
                return Some(found);
            }
        }
        None
    }

    /// Focuses a window at the next frame, making its tab visible.
    pub fn focus_dockable_window(&mut self, name: &str) -> bool {
        match self.dockable_window_of_name_mut(name) {
            Some(window) => {
                window.focus_window_at_next_frame = true;
                true
            }
            None => false,
        }
    }

    /// Finds the node whose splits create `space`.
    pub fn split_owner_mut(&mut self, space: &str) -> Option<&mut DockingParams> {
        if self.docking_splits.iter().any(|s| s.new_dock == space) {
            return Some(self);
        }
        for window in &mut self.dockable_windows {
            if let Some(found) = window.docking_params.split_owner_mut(space) {
                return Some(found);
            }
        }
        None
    }

    /// Removes the first window matching `label`, searching depth-first.
    pub fn remove_window(&mut self, label: &str) -> Option<DockableWindow> {
        if let Some(pos) = self
            .dockable_windows
            .iter()
            .position(|w| w.label.matches(label))
        {
            return Some(self.dockable_windows.remove(pos));
        }
        for window in &mut self.dockable_windows {
            if let Some(removed) = window.docking_params.remove_window(label) {
                return Some(removed);
            }
        }
        None
    }

    /// Drops every window with `wants_close` set, at any depth.
    ///
    /// Returns the labels of the pruned windows.
    pub fn prune_closed_windows(&mut self) -> Vec<WindowLabel> {
        let mut pruned = Vec::new();
        self.dockable_windows.retain(|window| {
            if window.wants_close {
                pruned.push(window.label.clone());
                false
            } else {
                true
            }
        });
        for window in &mut self.dockable_windows {
            pruned.extend(window.docking_params.prune_closed_windows());
        }
        pruned
    }

    /// Visits every window in the tree, parents before children.
    pub fn for_each_window(&self, f: &mut impl FnMut(&DockableWindow)) {
        for window in &self.dockable_windows {
            f(window);
            window.docking_params.for_each_window(f);
        }
    }

    /// Mutable variant of [`DockingParams::for_each_window`].
    pub fn for_each_window_mut(&mut self, f: &mut impl FnMut(&mut DockableWindow)) {
        for window in &mut self.dockable_windows {
            f(window);
            window.docking_params.for_each_window_mut(f);
        }
    }

    /// Number of windows in the whole tree.
    #[must_use]
    pub fn window_count(&self) -> usize {
        let mut count = 0;
        self.for_each_window(&mut |_| count += 1);
        count
    }

    /// Whether the layout should be reset when it is first shown.
    #[must_use]
    pub fn needs_initial_reset(&self, has_user_settings: bool) -> bool {
        match self.layout_condition {
            LayoutCondition::ApplyOnce => !has_user_settings,
            LayoutCondition::ApplyAlways => true,
            LayoutCondition::Never => false,
        }
    }

    /// Checks structural invariants of the whole tree.
    ///
    /// Labels must be unique per nesting level, and no dock space may be
    /// created by two splits reachable from this root.
    pub fn validate(&self) -> Result<()> {
        let mut new_docks = HashSet::new();
        self.validate_rec(&mut new_docks)
    }

    fn validate_rec<'a>(&'a self, new_docks: &mut HashSet<&'a str>) -> Result<()> {
        for split in &self.docking_splits {
            if !new_docks.insert(split.new_dock.as_str()) {
                return Err(DockError::DuplicateDockSpace(split.new_dock.clone()));
            }
        }
        let mut labels = HashSet::new();
        for window in &self.dockable_windows {
            if !labels.insert(window.label.as_str()) {
                return Err(DockError::DuplicateLabel(window.label.to_string()));
            }
            window.docking_params.validate_rec(new_docks)?;
        }
        Ok(())
    }
}
