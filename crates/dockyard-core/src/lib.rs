//! Core abstractions for dockyard.
//!
//! This crate provides the data model shared by the other dockyard crates:
//! - [`DockingParams`] / [`DockableWindow`] / [`DockingSplit`]: the dock tree
//! - [`WindowLabel`]: window identity with an optional stable key
//! - [`SplitRegistry`]: dock-space names to host-assigned ids
//! - [`DockHost`]: the boundary with the immediate-mode host renderer
//! - Configuration options and the error type

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Window and options structs legitimately have many boolean flags
#![allow(clippy::struct_excessive_bools)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod error;
pub mod host;
pub mod identity;
pub mod options;
pub mod split_registry;
pub mod tree;

pub use error::{DockError, Result};
pub use host::{Direction, DockHost, DockNodeFlags, SpaceId};
pub use identity::{display_part, normalize_space_name, WindowLabel, STABLE_ID_MARKER};
pub use options::DockingOptions;
pub use split_registry::SplitRegistry;
pub use tree::{
    AdditionState, DockSpaceName, DockableWindow, DockingParams, DockingSplit, GuiContext,
    GuiFunction, LayoutCondition, WindowRequests, MAIN_DOCK_SPACE,
};

// Re-export glam types for convenience
pub use glam::Vec2;
