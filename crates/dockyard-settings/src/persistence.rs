//! Layout persistence on top of [`SettingsDocument`].
//!
//! Each concern lives in its own section so a corrupt or missing section
//! never prevents the others from being restored:
//!
//! | section                   | content                              |
//! |---------------------------|--------------------------------------|
//! | `SplitIds`                | split registry                       |
//! | `Layout_<key>`            | window visibility of one layout      |
//! | `DockyardMisc`            | selected layout                      |
//! | `UserPref_<key>`          | free-form application preference     |

use std::collections::BTreeMap;

use dockyard_core::{
    normalize_space_name, DockableWindow, DockingParams, SplitRegistry, WindowLabel,
};
use serde::{Deserialize, Serialize};

use crate::document::SettingsDocument;
use crate::error::{Result, SettingsError};

pub const SPLIT_IDS_SECTION: &str = "SplitIds";
pub const MISC_SECTION: &str = "DockyardMisc";

/// Visibility of windows, keyed by [`visibility_key`].
pub type VisibilityMap = BTreeMap<String, bool>;

/// Turns an arbitrary name into a stable settings key.
///
/// The key is the first 8 hex digits of the name's blake3 digest followed by
/// the name with every non-alphanumeric character replaced by `_`. Names
/// differing only in punctuation still get distinct keys.
pub fn sanitize_key(name: &str) -> String {
    let hash = blake3::hash(name.as_bytes());
    let readable: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{}_{readable}", &hash.to_hex()[..8])
}

/// Settings key of a window. Labels with a stable key are stored under it,
/// so renaming the displayed part keeps the saved value.
pub fn visibility_key(label: &WindowLabel) -> String {
    sanitize_key(normalize_space_name(label.as_str()))
}

pub fn layout_section_name(layout_name: &str) -> String {
    format!("Layout_{}", sanitize_key(layout_name))
}

pub fn user_pref_section_name(name: &str) -> String {
    format!("UserPref_{}", sanitize_key(name))
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct LayoutSection {
    visibility: VisibilityMap,
}

/// Application-level settings stored alongside layouts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MiscSettings {
    /// Layout that was active when settings were saved.
    pub layout_name: Option<String>,
}

fn collect_visibility(windows: &[DockableWindow], map: &mut VisibilityMap) {
    for window in windows {
        if window.remember_is_visible {
            map.insert(visibility_key(&window.label), window.is_visible);
        }
        collect_visibility(&window.docking_params.dockable_windows, map);
    }
}

/// Captures the visibility of every window that asks to remember it.
pub fn save_visibility(params: &DockingParams) -> VisibilityMap {
    let mut map = VisibilityMap::new();
    collect_visibility(&params.dockable_windows, &mut map);
    map
}

/// Applies saved visibility. Unknown keys are ignored and windows without a
/// saved value keep their current visibility.
///
/// Returns the number of windows updated.
pub fn load_visibility(params: &mut DockingParams, map: &VisibilityMap) -> usize {
    let mut applied = 0;
    params.for_each_window_mut(&mut |window| {
        if !window.remember_is_visible {
            return;
        }
        if let Some(visible) = map.get(&visibility_key(&window.label)) {
            window.is_visible = *visible;
            applied += 1;
        }
    });
    applied
}

fn decode_section<T: for<'de> Deserialize<'de>>(
    doc: &SettingsDocument,
    name: &str,
) -> Result<Option<T>> {
    let Some(content) = doc.section(name) else {
        return Ok(None);
    };
    serde_json::from_str(content)
        .map(Some)
        .map_err(|source| SettingsError::MalformedSection {
            name: name.to_string(),
            source,
        })
}

/// Stores the visibility of a layout's windows in its own section.
pub fn store_visibility(doc: &mut SettingsDocument, params: &DockingParams) -> Result<()> {
    let section = LayoutSection {
        visibility: save_visibility(params),
    };
    doc.set_section(
        &layout_section_name(&params.layout_name),
        &serde_json::to_string(&section)?,
    );
    Ok(())
}

/// Restores a layout's visibility. Returns `Ok(None)` when nothing was saved.
pub fn restore_visibility(
    doc: &SettingsDocument,
    params: &mut DockingParams,
) -> Result<Option<usize>> {
    let section: Option<LayoutSection> =
        decode_section(doc, &layout_section_name(&params.layout_name))?;
    Ok(section.map(|section| load_visibility(params, &section.visibility)))
}

/// Returns true if settings were saved for the named layout.
pub fn has_layout_settings(doc: &SettingsDocument, layout_name: &str) -> bool {
    doc.has_section(&layout_section_name(layout_name))
}

pub fn store_split_registry(doc: &mut SettingsDocument, registry: &SplitRegistry) -> Result<()> {
    doc.set_section(SPLIT_IDS_SECTION, &registry.save_all()?);
    Ok(())
}

/// Restores split ids. Returns false when nothing was saved; on a corrupt
/// section the registry is left untouched.
pub fn restore_split_registry(
    doc: &SettingsDocument,
    registry: &mut SplitRegistry,
) -> Result<bool> {
    let Some(content) = doc.section(SPLIT_IDS_SECTION) else {
        return Ok(false);
    };
    registry.load_all(content)?;
    log::debug!("restored {} split ids", registry.len());
    Ok(true)
}

pub fn store_misc(doc: &mut SettingsDocument, misc: &MiscSettings) -> Result<()> {
    doc.set_section(MISC_SECTION, &serde_json::to_string(misc)?);
    Ok(())
}

pub fn restore_misc(doc: &SettingsDocument) -> Result<Option<MiscSettings>> {
    decode_section(doc, MISC_SECTION)
}

/// Stores a free-form preference. The content is kept verbatim.
pub fn store_user_pref(doc: &mut SettingsDocument, name: &str, content: &str) {
    doc.set_section(&user_pref_section_name(name), content);
}

/// Loads a preference stored with [`store_user_pref`].
pub fn restore_user_pref(doc: &SettingsDocument, name: &str) -> Option<String> {
    doc.section(&user_pref_section_name(name))
        .map(|content| content.strip_suffix('\n').unwrap_or(content).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dockyard_core::SpaceId;
    use proptest::prelude::*;

    fn params() -> DockingParams {
        let nested = DockingParams::new("inner").with_windows(vec![
            DockableWindow::new("Console###console", ""),
            DockableWindow::new("Scratch", "").with_remember_is_visible(false),
        ]);
        DockingParams::new("Default").with_windows(vec![
            DockableWindow::new("Tools", ""),
            DockableWindow::new("Editor", "").with_docking_params(nested),
        ])
    }

    #[test]
    fn test_sanitize_key() {
        let key = sanitize_key("My Layout/1");
        let (hash, readable) = key.split_at(8);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(readable, "_My_Layout_1");
        assert_eq!(sanitize_key("My Layout/1"), key);
        assert_ne!(sanitize_key("a b"), sanitize_key("a_b"));
    }

    #[test]
    fn test_save_visibility_skips_unremembered() {
        let mut params = params();
        if let Some(w) = params.dockable_window_of_name_mut("Console") {
            w.is_visible = false;
        }
        let map = save_visibility(&params);
        assert_eq!(map.len(), 3);
        assert_eq!(map.get(&sanitize_key("###console")), Some(&false));
        assert!(!map.contains_key(&sanitize_key("Scratch")));
    }

    #[test]
    fn test_load_visibility_ignores_unknown_and_missing() {
        let mut params = params();
        let mut map = VisibilityMap::new();
        map.insert(sanitize_key("Tools"), false);
        map.insert(sanitize_key("Gone"), false);
        map.insert(sanitize_key("Scratch"), false);

        assert_eq!(load_visibility(&mut params, &map), 1);
        assert!(!params.dockable_window_of_name("Tools").unwrap().is_visible);
        assert!(params.dockable_window_of_name("Editor").unwrap().is_visible);
        assert!(params.dockable_window_of_name("Scratch").unwrap().is_visible);
    }

    #[test]
    fn test_renamed_window_keeps_visibility() {
        let mut params = params();
        if let Some(w) = params.dockable_window_of_name_mut("Console") {
            w.is_visible = false;
        }
        let map = save_visibility(&params);

        let mut renamed = self::params();
        if let Some(w) = renamed.dockable_window_of_name_mut("Console") {
            w.label = WindowLabel::new("Console (3 errors)###console");
        }
        load_visibility(&mut renamed, &map);
        assert!(!renamed.dockable_window_of_name("Console (3 errors)").unwrap().is_visible);
    }

    #[test]
    fn test_sections_are_isolated() {
        let mut doc = SettingsDocument::new();
        let mut registry = SplitRegistry::new();
        registry.set_id("Side", SpaceId(4));
        store_split_registry(&mut doc, &registry).unwrap();
        store_misc(
            &mut doc,
            &MiscSettings {
                layout_name: Some("Alt".into()),
            },
        )
        .unwrap();
        doc.set_section(&layout_section_name("Default"), "{ broken");

        let mut params = params();
        assert!(matches!(
            restore_visibility(&doc, &mut params),
            Err(SettingsError::MalformedSection { .. })
        ));
        let mut restored = SplitRegistry::new();
        assert!(restore_split_registry(&doc, &mut restored).unwrap());
        assert_eq!(restored, registry);
        assert_eq!(
            restore_misc(&doc).unwrap().and_then(|m| m.layout_name).as_deref(),
            Some("Alt")
        );
    }

    #[test]
    fn test_corrupt_split_ids_leave_registry_untouched() {
        let mut doc = SettingsDocument::new();
        doc.set_section(SPLIT_IDS_SECTION, "not json");
        let mut registry = SplitRegistry::new();
        registry.set_id("Side", SpaceId(9));
        let before = registry.clone();
        assert!(restore_split_registry(&doc, &mut registry).is_err());
        assert_eq!(registry, before);
    }

    #[test]
    fn test_missing_sections() {
        let doc = SettingsDocument::new();
        let mut params = params();
        assert!(restore_visibility(&doc, &mut params).unwrap().is_none());
        assert!(restore_misc(&doc).unwrap().is_none());
        assert!(!restore_split_registry(&doc, &mut SplitRegistry::new()).unwrap());
        assert!(restore_user_pref(&doc, "theme").is_none());
        assert!(!has_layout_settings(&doc, "Default"));
    }

    #[test]
    fn test_user_pref_round_trip() {
        let mut doc = SettingsDocument::new();
        store_user_pref(&mut doc, "recent files", "a.txt\nb.txt");
        let doc = SettingsDocument::parse(&doc.to_string());
        assert_eq!(restore_user_pref(&doc, "recent files").as_deref(), Some("a.txt\nb.txt"));
    }

    proptest! {
        #[test]
        fn prop_visibility_round_trip(flags in prop::collection::vec(any::<bool>(), 1..8)) {
            let windows = flags
                .iter()
                .enumerate()
                .map(|(i, visible)| {
                    DockableWindow::new(format!("Window {i}"), "").with_visible(*visible)
                })
                .collect();
            let saved = DockingParams::new("Default").with_windows(windows);

            let mut doc = SettingsDocument::new();
            store_visibility(&mut doc, &saved).unwrap();
            let doc = SettingsDocument::parse(&doc.to_string());

            let mut restored = DockingParams::new("Default").with_windows(
                (0..flags.len()).map(|i| DockableWindow::new(format!("Window {i}"), "")).collect(),
            );
            restore_visibility(&doc, &mut restored).unwrap();
            for (window, visible) in restored.dockable_windows.iter().zip(&flags) {
                prop_assert_eq!(window.is_visible, *visible);
            }
        }
    }
}
