//! dockyard: docking layouts and dockable windows for immediate-mode GUIs.
//!
//! dockyard describes an application's workspace as a tree of dock spaces and
//! windows, realizes it on an immediate-mode host and lets windows come and go
//! while the tree is being rendered.
//!
//! # Quick Start
//!
//! ```
//! use dockyard::*;
//!
//! fn main() -> Result<()> {
//!     init_logging();
//!
//!     let layout = DockingParams::new("Default")
//!         .with_splits(vec![DockingSplit::new(MAIN_DOCK_SPACE, "Side", Direction::Left, 0.25)])
//!         .with_windows(vec![DockableWindow::new("Tools", "Side")]);
//!     let mut runner = DockingRunner::new(DockingOptions::default(), layout)?;
//!     runner.load_settings()?;
//!
//!     let mut host = HeadlessHost::new();
//!     for _ in 0..3 {
//!         host.new_frame();
//!         runner.frame(&mut host);
//!     }
//!     assert!(runner.dock_space_id_from_name("Side").is_some());
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`dockyard_core`]: the dock tree, window identity, split registry and
//!   the [`DockHost`] boundary with the renderer
//! - [`dockyard_layout`]: layout application, window lifecycle and the
//!   per-frame [`DockingSession`]
//! - [`dockyard_settings`]: the sectioned settings document
//! - [`dockyard_ui`]: the view menu

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]

mod error;
mod runner;

pub use error::{Error, Result};
pub use runner::DockingRunner;

// Re-export core types
pub use dockyard_core::{
    display_part, normalize_space_name, AdditionState, Direction, DockError, DockHost,
    DockNodeFlags, DockSpaceName, DockableWindow, DockingOptions, DockingParams, DockingSplit,
    GuiContext, GuiFunction, LayoutCondition, SpaceId, SplitRegistry, Vec2, WindowLabel,
    WindowRequests, MAIN_DOCK_SPACE, STABLE_ID_MARKER,
};

// Re-export layout engine
pub use dockyard_layout::{
    apply_dock_layout, insert_dockable_window, ApplyReport, DockingSession, FrameReport,
    HeadlessHost, HostCommand, InsertionPoint, PreFrameReport, WindowLifecycle,
};

// Re-export settings
pub use dockyard_settings::{sanitize_key, MiscSettings, SettingsDocument, SettingsError};

// Re-export UI
pub use dockyard_ui::{build_view_menu, show_view_menu, ViewMenu, ViewMenuAction};

/// Initializes `env_logger` once; later calls are ignored.
pub fn init_logging() {
    let _ = env_logger::try_init();
}
