//! Split registry: stable dock-space names to host-assigned ids.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{DockError, Result};
use crate::host::SpaceId;
use crate::identity::normalize_space_name;

/// Serialized form of the registry.
#[derive(Debug, Serialize, Deserialize)]
struct SplitIdsDump {
    split_ids: BTreeMap<String, SpaceId>,
}

/// Registry mapping dock-space names to the ids the host assigned to them.
///
/// Entries are only ever produced while a layout is being realized (root
/// dock space submission, splits, nested dock hosts). Names are normalized
/// with [`normalize_space_name`] before every operation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SplitRegistry {
    ids: BTreeMap<String, SpaceId>,
}

impl SplitRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks whether a dock space with the given name has been registered.
    pub fn contains(&self, name: &str) -> bool {
        self.ids.contains_key(normalize_space_name(name))
    }

    /// Gets the id of a registered dock space.
    pub fn get_id(&self, name: &str) -> Result<SpaceId> {
        self.try_get_id(name)
            .ok_or_else(|| DockError::SplitIdNotFound(name.to_string()))
    }

    /// Gets the id of a dock space, if registered.
    pub fn try_get_id(&self, name: &str) -> Option<SpaceId> {
        self.ids.get(normalize_space_name(name)).copied()
    }

    /// Registers (or overwrites) the id of a dock space.
    pub fn set_id(&mut self, name: &str, id: SpaceId) {
        let key = normalize_space_name(name);
        if self.ids.insert(key.to_string(), id) != Some(id) {
            log::debug!("split id '{key}' -> {id}");
        }
    }

    /// Returns the registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.ids.keys().map(String::as_str)
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Returns the number of registered dock spaces.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Serializes the whole registry.
    pub fn save_all(&self) -> Result<String> {
        let dump = SplitIdsDump {
            split_ids: self.ids.clone(),
        };
        Ok(serde_json::to_string(&dump)?)
    }

    /// Replaces the registry content with a previously saved blob.
    ///
    /// On malformed input the registry is left unchanged.
    pub fn load_all(&mut self, blob: &str) -> Result<()> {
        let dump: SplitIdsDump =
            serde_json::from_str(blob).map_err(|e| DockError::ParseError(e.to_string()))?;
        self.ids = dump.split_ids;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut registry = SplitRegistry::new();
        assert!(!registry.contains("MainDockSpace"));
        assert!(matches!(
            registry.get_id("MainDockSpace"),
            Err(DockError::SplitIdNotFound(_))
        ));

        registry.set_id("MainDockSpace", SpaceId(7));
        registry.set_id("MainDockSpace", SpaceId(8));
        assert!(registry.contains("MainDockSpace"));
        assert_eq!(registry.get_id("MainDockSpace").ok(), Some(SpaceId(8)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_names_are_normalized() {
        let mut registry = SplitRegistry::new();
        registry.set_id("Viewer###viewer", SpaceId(3));
        assert!(registry.contains("Renamed viewer###viewer"));
        assert!(!registry.contains("Viewer"));
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["###viewer"]);
    }

    #[test]
    fn test_save_load_round_trip() {
        let mut registry = SplitRegistry::new();
        registry.set_id("MainDockSpace", SpaceId(1));
        registry.set_id("Side", SpaceId(2));
        let blob = registry.save_all().unwrap();

        let mut restored = SplitRegistry::new();
        restored.load_all(&blob).unwrap();
        assert_eq!(restored, registry);
    }

    #[test]
    fn test_malformed_blob_leaves_registry_unchanged() {
        let mut registry = SplitRegistry::new();
        registry.set_id("Side", SpaceId(2));
        let before = registry.clone();

        assert!(matches!(
            registry.load_all("{not json"),
            Err(DockError::ParseError(_))
        ));
        assert!(registry.load_all(r#"{"other": 1}"#).is_err());
        assert_eq!(registry, before);
    }
}
