//! Layout engine for dockyard.
//!
//! This crate turns a [`dockyard_core::DockingParams`] tree into host dock
//! nodes and drives it frame by frame:
//! - [`apply_dock_layout`]: splits and window placement
//! - [`WindowLifecycle`]: deferred window addition and removal
//! - [`show_dockable_windows`]: per-frame rendering with nested dock hosts
//! - [`DockingSession`]: the state tying these together
//! - [`HeadlessHost`]: an in-memory host for tests and tooling

#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
// Reports carry a flat set of flags and counters
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::module_name_repetitions)]

pub mod applier;
pub mod headless;
pub mod lifecycle;
pub mod render;
pub mod session;

pub use applier::{
    apply_dock_layout, dock_window, needs_rebuild, propagate_layout_reset, ApplyReport,
};
pub use headless::{HeadlessHost, HostCommand};
pub use lifecycle::{
    insert_dockable_window, InsertionPoint, PendingAddition, PreFrameReport, WindowLifecycle,
};
pub use render::{show_dockable_windows, RenderPass};
pub use session::{DockingSession, FrameReport};
