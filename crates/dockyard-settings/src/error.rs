//! Error types for settings persistence.

use thiserror::Error;

/// Errors raised while reading or writing settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// A section exists but its content could not be decoded.
    #[error("settings section '{name}' is malformed: {source}")]
    MalformedSection {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// Split ids could not be restored.
    #[error(transparent)]
    Dock(#[from] dockyard_core::DockError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;
