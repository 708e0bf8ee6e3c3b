//! Error types for dockyard.

use thiserror::Error;

/// The main error type for dockyard operations.
#[derive(Error, Debug)]
pub enum DockError {
    /// A split names an initial dock space that has never been registered.
    #[error("dock space '{0}' is unknown - it must be created before it can be split")]
    UnknownDockSpace(String),

    /// A dock space name is not present in the split registry.
    #[error("split id for dock space '{0}' not found")]
    SplitIdNotFound(String),

    /// A dockable window with the given label was not found.
    #[error("dockable window '{0}' not found")]
    WindowNotFound(String),

    /// A dockable window with the same label already lives at this nesting level.
    #[error("dockable window '{0}' already exists at this level")]
    DuplicateLabel(String),

    /// The same dock space is created by more than one split.
    #[error("dock space '{0}' is created by more than one split")]
    DuplicateDockSpace(String),

    /// A layout with the given name was not found.
    #[error("layout '{0}' not found")]
    LayoutNotFound(String),

    /// Persisted data could not be decoded.
    #[error("parse error: {0}")]
    ParseError(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for dockyard operations.
pub type Result<T> = std::result::Result<T, DockError>;
