//! Configuration options for dockyard.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::tree::MAIN_DOCK_SPACE;

/// Global configuration options for a docking runner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DockingOptions {
    /// Name of the root dock space provided every frame.
    pub main_dock_space_name: String,

    /// Where the settings document is read from and written to.
    ///
    /// `None` keeps settings in memory only.
    pub settings_path: Option<PathBuf>,

    /// Whether the selected layout is restored at the next start.
    pub remember_selected_layout: bool,

    /// Whether window visibility is restored at the next start.
    pub restore_visibility: bool,
}

impl Default for DockingOptions {
    fn default() -> Self {
        Self {
            main_dock_space_name: MAIN_DOCK_SPACE.to_string(),
            settings_path: None,
            remember_selected_layout: true,
            restore_visibility: true,
        }
    }
}

impl DockingOptions {
    /// Parses options from JSON; missing fields take their default value.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads options from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    #[must_use]
    pub fn with_settings_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings_path = Some(path.into());
        self
    }
}
