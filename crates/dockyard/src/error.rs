//! Error type of the dockyard facade.

use thiserror::Error;

/// Errors returned by [`crate::DockingRunner`].
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Dock(#[from] dockyard_core::DockError),

    #[error(transparent)]
    Settings(#[from] dockyard_settings::SettingsError),
}

/// A specialized Result type for runner operations.
pub type Result<T> = std::result::Result<T, Error>;
