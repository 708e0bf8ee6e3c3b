//! Settings persistence for dockyard.
//!
//! Layout-related state is saved into a [`SettingsDocument`]: a single text
//! file split into named sections, each owned by one concern (split ids,
//! per-layout window visibility, selected layout, user preferences).

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]

pub mod document;
pub mod error;
pub mod persistence;

pub use document::SettingsDocument;
pub use error::{Result, SettingsError};
pub use persistence::{
    has_layout_settings, layout_section_name, load_visibility, restore_misc,
    restore_split_registry, restore_user_pref, restore_visibility, sanitize_key, save_visibility,
    store_misc, store_split_registry, store_user_pref, store_visibility, user_pref_section_name,
    visibility_key, MiscSettings, VisibilityMap, MISC_SECTION, SPLIT_IDS_SECTION,
};
