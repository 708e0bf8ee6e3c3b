//! Headless host for dockyard.
//!
//! [`HeadlessHost`] implements [`DockHost`] entirely in memory: it allocates
//! dock node ids, tracks the node hierarchy and window placements, and logs
//! every command it receives. It is used by the tests and the demo, and is
//! handy for driving layouts without a window or GPU.

use std::collections::{HashMap, HashSet};

use dockyard_core::{Direction, DockHost, DockNodeFlags, SpaceId};

/// A command received by the headless host.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCommand {
    BeginWindow(String),
    EndWindow,
    SplitSpace {
        space: SpaceId,
        direction: Direction,
        ratio: f32,
        leftover: SpaceId,
        new: SpaceId,
    },
    DockWindow {
        identity: String,
        space: SpaceId,
    },
    RemoveChildSpaces(SpaceId),
    SubmitDockSpace(SpaceId),
    SetNodeFlags(SpaceId, DockNodeFlags),
    FocusWindow(String),
}

/// In-memory [`DockHost`].
#[derive(Debug)]
pub struct HeadlessHost {
    frame: u64,
    next_id: u32,
    named_spaces: HashMap<String, SpaceId>,
    /// child -> parent
    parents: HashMap<SpaceId, SpaceId>,
    node_flags: HashMap<SpaceId, DockNodeFlags>,
    placements: HashMap<String, SpaceId>,
    known_windows: HashSet<String>,
    collapsed: HashSet<String>,
    close_requests: HashSet<String>,
    open_windows: Vec<String>,
    commands: Vec<HostCommand>,
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessHost {
    /// Creates a host that has not rendered any frame yet.
    pub fn new() -> Self {
        Self {
            frame: 0,
            next_id: 0x100,
            named_spaces: HashMap::new(),
            parents: HashMap::new(),
            node_flags: HashMap::new(),
            placements: HashMap::new(),
            known_windows: HashSet::new(),
            collapsed: HashSet::new(),
            close_requests: HashSet::new(),
            open_windows: Vec::new(),
            commands: Vec::new(),
        }
    }

    /// Starts a new frame.
    pub fn new_frame(&mut self) {
        if !self.open_windows.is_empty() {
            log::warn!(
                "headless host: {} window(s) left open at end of frame {}",
                self.open_windows.len(),
                self.frame
            );
            self.open_windows.clear();
        }
        self.frame += 1;
    }

    /// Pretends a previous run left settings for this window.
    pub fn add_prior_placement(&mut self, identity: impl Into<String>) {
        self.known_windows.insert(identity.into());
    }

    /// Makes [`DockHost::begin_window`] report the window as collapsed.
    pub fn set_collapsed(&mut self, identity: impl Into<String>, collapsed: bool) {
        let identity = identity.into();
        if collapsed {
            self.collapsed.insert(identity);
        } else {
            self.collapsed.remove(&identity);
        }
    }

    /// Simulates a click on the window's close button, seen at its next begin.
    pub fn click_close(&mut self, identity: impl Into<String>) {
        self.close_requests.insert(identity.into());
    }

    /// Simulates the user dragging a window into another dock node.
    pub fn drag_window_to(&mut self, identity: impl Into<String>, space: SpaceId) {
        self.placements.insert(identity.into(), space);
    }

    /// Commands received so far.
    pub fn commands(&self) -> &[HostCommand] {
        &self.commands
    }

    /// Returns and clears the command log.
    pub fn take_commands(&mut self) -> Vec<HostCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Dock node the window is currently placed in.
    pub fn placement_of(&self, identity: &str) -> Option<SpaceId> {
        self.placements.get(identity).copied()
    }

    /// Parent node of a split node.
    pub fn parent_of(&self, space: SpaceId) -> Option<SpaceId> {
        self.parents.get(&space).copied()
    }

    /// Direct children of a node, in creation order.
    pub fn children_of(&self, space: SpaceId) -> Vec<SpaceId> {
        let mut children: Vec<SpaceId> = self
            .parents
            .iter()
            .filter(|(_, parent)| **parent == space)
            .map(|(child, _)| *child)
            .collect();
        children.sort();
        children
    }

    /// Local flags last applied to a node.
    pub fn node_flags(&self, space: SpaceId) -> Option<DockNodeFlags> {
        self.node_flags.get(&space).copied()
    }

    /// Returns true if the node exists (named root or live split child).
    pub fn space_exists(&self, space: SpaceId) -> bool {
        self.parents.contains_key(&space) || self.named_spaces.values().any(|s| *s == space)
    }

    fn allocate(&mut self) -> SpaceId {
        let id = SpaceId(self.next_id);
        self.next_id += 1;
        id
    }

    fn descendants_of(&self, space: SpaceId) -> Vec<SpaceId> {
        let mut result = Vec::new();
        let mut stack = vec![space];
        while let Some(current) = stack.pop() {
            for child in self.children_of(current) {
                result.push(child);
                stack.push(child);
            }
        }
        result
    }
}

impl DockHost for HeadlessHost {
    fn begin_window(&mut self, identity: &str, open: Option<&mut bool>) -> bool {
        self.commands.push(HostCommand::BeginWindow(identity.to_string()));
        self.known_windows.insert(identity.to_string());
        self.open_windows.push(identity.to_string());
        if let Some(open) = open {
            if self.close_requests.remove(identity) {
                *open = false;
            }
        }
        !self.collapsed.contains(identity)
    }

    fn end_window(&mut self) {
        self.commands.push(HostCommand::EndWindow);
        if self.open_windows.pop().is_none() {
            log::warn!("headless host: end_window without matching begin_window");
        }
    }

    fn has_prior_placement(&self, identity: &str) -> bool {
        self.known_windows.contains(identity)
    }

    fn split_space(
        &mut self,
        space: SpaceId,
        direction: Direction,
        ratio: f32,
    ) -> (SpaceId, SpaceId) {
        let new = self.allocate();
        let leftover = self.allocate();
        self.parents.insert(new, space);
        self.parents.insert(leftover, space);
        // Windows docked in the split node move to the leftover side.
        for placed in self.placements.values_mut() {
            if *placed == space {
                *placed = leftover;
            }
        }
        self.commands.push(HostCommand::SplitSpace {
            space,
            direction,
            ratio,
            leftover,
            new,
        });
        (leftover, new)
    }

    fn dock_window_to_space(&mut self, identity: &str, space: SpaceId) {
        self.commands.push(HostCommand::DockWindow {
            identity: identity.to_string(),
            space,
        });
        self.known_windows.insert(identity.to_string());
        self.placements.insert(identity.to_string(), space);
    }

    fn remove_child_spaces(&mut self, space: SpaceId) {
        self.commands.push(HostCommand::RemoveChildSpaces(space));
        let removed: HashSet<SpaceId> = self.descendants_of(space).into_iter().collect();
        for id in &removed {
            self.parents.remove(id);
            self.node_flags.remove(id);
        }
        for placed in self.placements.values_mut() {
            if removed.contains(placed) {
                *placed = space;
            }
        }
    }

    fn frame_count(&self) -> u64 {
        self.frame
    }

    fn space_id_for(&mut self, name: &str) -> SpaceId {
        if let Some(id) = self.named_spaces.get(name) {
            return *id;
        }
        let id = self.allocate();
        self.named_spaces.insert(name.to_string(), id);
        id
    }

    fn submit_dock_space(&mut self, space: SpaceId, flags: DockNodeFlags) {
        self.commands.push(HostCommand::SubmitDockSpace(space));
        self.node_flags.entry(space).or_insert(flags);
    }

    fn set_node_flags(&mut self, space: SpaceId, flags: DockNodeFlags) {
        self.commands.push(HostCommand::SetNodeFlags(space, flags));
        self.node_flags.insert(space, flags);
    }

    fn focus_window(&mut self, identity: &str) -> bool {
        self.commands.push(HostCommand::FocusWindow(identity.to_string()));
        self.placements.contains_key(identity)
    }
}
