use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const IMAGE_EXTENSIONS: [&str; 7] = ["jpg", "jpeg", "png", "gif", "webp", "bmp", "svg"];

/// A single file or folder record supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub name: String,
    pub path: String,
    pub is_directory: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl Entry {
    /// Create a new entry
    pub fn new(name: impl Into<String>, path: impl Into<String>, is_directory: bool) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            is_directory,
            updated_at: None,
            size: None,
        }
    }

    /// Create a new directory entry
    pub fn new_dir(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(name, path, true)
    }

    /// Create a new file entry
    pub fn new_file(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(name, path, false)
    }

    /// Set the modification timestamp
    pub fn with_updated_at(mut self, updated_at: impl Into<String>) -> Self {
        self.updated_at = Some(updated_at.into());
        self
    }

    /// Set the size in bytes
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// Lowercased last `.`-separated piece of the name
    ///
    /// A name without a dot is its own extension, so `png` reads as `png`
    /// and `.bashrc` as `bashrc`. Only a trailing dot yields `None`.
    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit('.')
            .next()
            .filter(|ext| !ext.is_empty())
            .map(str::to_lowercase)
    }

    /// Whether the entry can be shown as an image preview
    pub fn is_image(&self) -> bool {
        !self.is_directory
            && self
                .extension()
                .map(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
                .unwrap_or(false)
    }

    /// `updated_at` parsed as RFC 3339, `None` when absent or malformed
    pub fn updated_at_utc(&self) -> Option<DateTime<Utc>> {
        let raw = self.updated_at.as_deref()?;
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
    }
}
