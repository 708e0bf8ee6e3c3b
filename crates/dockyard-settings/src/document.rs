//! Settings document made of independently named sections.
//!
//! The on-disk format is plain text. Each section starts with a header line
//! `;;;<<<NAME>>>;;;` and runs until the next header. Text before the first
//! header is ignored, so the file may start with a comment.

use std::fmt;
use std::path::Path;

use crate::error::Result;

const HEADER_OPEN: &str = ";;;<<<";
const HEADER_CLOSE: &str = ">>>;;;";
const PREAMBLE: &str = ";;; This file is managed by dockyard and stores several sections, \
each introduced by a line like\n;;;     ;;;<<<SECTION_NAME>>>;;;\n\n";

#[derive(Debug, Clone, PartialEq, Eq)]
struct Section {
    name: String,
    content: String,
}

/// An ordered list of named sections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsDocument {
    sections: Vec<Section>,
}

fn header_name(line: &str) -> Option<&str> {
    line.strip_prefix(HEADER_OPEN)?.strip_suffix(HEADER_CLOSE)
}

impl SettingsDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Splits text into sections. Never fails; unrecognised text before the
    /// first header is dropped.
    pub fn parse(text: &str) -> Self {
        let mut sections: Vec<Section> = Vec::new();
        for line in text.lines() {
            if let Some(name) = header_name(line) {
                sections.push(Section {
                    name: name.to_string(),
                    content: String::new(),
                });
            } else if let Some(current) = sections.last_mut() {
                current.content.push_str(line);
                current.content.push('\n');
            }
        }
        Self { sections }
    }

    /// Reads a document from disk. A missing file yields an empty document.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => Ok(Self::parse(&text)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no settings file at {}", path.display());
                Ok(Self::new())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Writes the document to disk, replacing the file.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_string())?;
        log::info!("saved settings to {}", path.display());
        Ok(())
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.sections.iter().any(|s| s.name == name)
    }

    /// Content of a section, including its trailing newline.
    pub fn section(&self, name: &str) -> Option<&str> {
        self.sections
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.content.as_str())
    }

    /// Replaces a section's content, appending the section if it is new.
    ///
    /// Content is stored line by line, so a line shaped like a section
    /// header would start a new section when the document is read back.
    pub fn set_section(&mut self, name: &str, content: &str) {
        let mut content = content.to_string();
        if !content.is_empty() && !content.ends_with('\n') {
            content.push('\n');
        }
        if let Some(section) = self.sections.iter_mut().find(|s| s.name == name) {
            section.content = content;
        } else {
            self.sections.push(Section {
                name: name.to_string(),
                content,
            });
        }
    }

    /// Removes a section. Returns false if it did not exist.
    pub fn remove_section(&mut self, name: &str) -> bool {
        let before = self.sections.len();
        self.sections.retain(|s| s.name != name);
        self.sections.len() != before
    }

    /// Section names in document order.
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl fmt::Display for SettingsDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(PREAMBLE)?;
        for section in &self.sections {
            writeln!(f, "{HEADER_OPEN}{}{HEADER_CLOSE}", section.name)?;
            f.write_str(&section.content)?;
        }
        Ok(())
    }
}
