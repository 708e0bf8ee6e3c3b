//! Boundary with the immediate-mode host renderer.
//!
//! Dockyard never talks to a rendering backend directly. Everything it needs
//! from the host (window begin/end, dock-node splitting, docking a window into
//! a node) goes through [`DockHost`], which is implemented once per backend
//! and by the headless host used in tests.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier the host assigns to a dock space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpaceId(pub u32);

impl fmt::Display for SpaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

/// Direction in which a dock space is split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Direction {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

bitflags::bitflags! {
    /// Dock node flags, passed through to the host untouched.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct DockNodeFlags: u32 {
        const NONE = 0;
        const KEEP_ALIVE_ONLY = 1 << 0;
        const NO_DOCKING_OVER_CENTRAL_NODE = 1 << 2;
        const PASSTHRU_CENTRAL_NODE = 1 << 3;
        const NO_DOCKING_SPLIT = 1 << 4;
        const NO_RESIZE = 1 << 5;
        const AUTO_HIDE_TAB_BAR = 1 << 6;
        const NO_UNDOCKING = 1 << 7;
    }
}

/// Operations the host renderer exposes to the docking core.
///
/// All methods are called from the render loop on a single thread.
pub trait DockHost {
    /// Opens a window by identity.
    ///
    /// Returns false if the window is collapsed; [`DockHost::end_window`] must
    /// still be called. When `open` is given the host shows a close button and
    /// clears the flag when the user closes the window.
    fn begin_window(&mut self, identity: &str, open: Option<&mut bool>) -> bool;

    /// Closes the window opened by the last [`DockHost::begin_window`].
    fn end_window(&mut self);

    /// True if the host's persisted settings already know this window.
    fn has_prior_placement(&self, identity: &str) -> bool;

    /// Splits `space`, returning `(leftover, new)`; the leftover id may differ
    /// from `space`.
    fn split_space(
        &mut self,
        space: SpaceId,
        direction: Direction,
        ratio: f32,
    ) -> (SpaceId, SpaceId);

    /// Binds a window identity to a dock space.
    fn dock_window_to_space(&mut self, identity: &str, space: SpaceId);

    /// Destroys every child node of `space`.
    fn remove_child_spaces(&mut self, space: SpaceId);

    /// Number of frames rendered so far, starting at 1 for the first frame.
    fn frame_count(&self) -> u64;

    /// Id the host derives for a named dock space in the current id scope.
    fn space_id_for(&mut self, name: &str) -> SpaceId;

    /// Submits a dock space node for this frame.
    fn submit_dock_space(&mut self, space: SpaceId, flags: DockNodeFlags);

    /// Applies local flags to an existing dock node.
    fn set_node_flags(&mut self, space: SpaceId, flags: DockNodeFlags);

    /// Makes the window's tab visible in its dock node. Returns false if the
    /// window is not docked.
    fn focus_window(&mut self, identity: &str) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_combine() {
        let flags = DockNodeFlags::NO_RESIZE | DockNodeFlags::AUTO_HIDE_TAB_BAR;
        assert!(flags.contains(DockNodeFlags::NO_RESIZE));
        assert!(!flags.contains(DockNodeFlags::NO_UNDOCKING));
        assert!(DockNodeFlags::NONE.is_empty());
        assert_eq!(flags.bits(), (1 << 5) | (1 << 6));
    }

    #[test]
    fn test_flags_serialize_by_name() {
        let flags = DockNodeFlags::NO_RESIZE | DockNodeFlags::AUTO_HIDE_TAB_BAR;
        let json = serde_json::to_string(&flags).unwrap();
        assert_eq!(json, "\"NO_RESIZE | AUTO_HIDE_TAB_BAR\"");
        let back: DockNodeFlags = serde_json::from_str(&json).unwrap();
        assert_eq!(back, flags);
    }

    #[test]
    fn test_space_id_display() {
        assert_eq!(SpaceId(0xabc).to_string(), "0x00000abc");
    }
}
