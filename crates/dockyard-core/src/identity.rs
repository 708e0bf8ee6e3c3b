//! Window identity and dock-space name normalization.
//!
//! Labels may carry a stable id after the [`STABLE_ID_MARKER`], so that the
//! visible title can change without changing the identity seen by the host:
//! `"Scene (3 objects)###scene"` and `"Scene (4 objects)###scene"` are the same
//! window as far as the host is concerned.

use std::fmt;

/// Reserved substring separating a visible label from its stable id.
pub const STABLE_ID_MARKER: &str = "###";

/// Returns the part of `s` before the stable-id marker (or `s` itself).
pub fn display_part(s: &str) -> &str {
    s.find(STABLE_ID_MARKER).map_or(s, |pos| &s[..pos])
}

/// Normalizes a dock-space name for registry lookups.
///
/// Everything before the stable-id marker is stripped; the marker itself is
/// kept, so `"Viewer###v1"` and `"Renamed###v1"` share one registry slot.
pub fn normalize_space_name(name: &str) -> &str {
    name.find(STABLE_ID_MARKER).map_or(name, |pos| &name[pos..])
}

/// Identity of a dockable window: a display label plus an optional stable key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct WindowLabel {
    full: String,
    marker: Option<usize>,
}

impl WindowLabel {
    /// Parses a label such as `"Foo"` or `"Foo###abc123"`.
    pub fn new(label: impl Into<String>) -> Self {
        let full = label.into();
        let marker = full.find(STABLE_ID_MARKER);
        Self { full, marker }
    }

    /// The full label, as handed to the host.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.full
    }

    /// The human-visible part of the label.
    #[must_use]
    pub fn display(&self) -> &str {
        match self.marker {
            Some(pos) => &self.full[..pos],
            None => &self.full,
        }
    }

    /// The stable key following the marker, if any.
    #[must_use]
    pub fn stable_key(&self) -> Option<&str> {
        self.marker
            .map(|pos| &self.full[pos + STABLE_ID_MARKER.len()..])
    }

    /// Returns true if a lookup by `query` designates this window.
    ///
    /// `query` may be the full label, the display part of a label carrying a
    /// stable key, or a stable-keyed form of a plain label. A bare stable key
    /// never matches.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        if query == self.full {
            return true;
        }
        if self.marker.is_some() && query == self.display() {
            return true;
        }
        display_part(query) == self.full
    }
}

impl fmt::Display for WindowLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full)
    }
}

impl From<&str> for WindowLabel {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for WindowLabel {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl PartialEq<str> for WindowLabel {
    fn eq(&self, other: &str) -> bool {
        self.full == other
    }
}

impl PartialEq<&str> for WindowLabel {
    fn eq(&self, other: &&str) -> bool {
        self.full == *other
    }
}
