//! Selection, clipboard and file operation requests.
//!
//! Nothing here touches a filesystem. Requests are validated against the
//! current snapshot and then reported to a [`FileActionHandler`], which owns
//! the real I/O and refreshes the file list when it is done.

use crate::config::UploadConfig;
use crate::entry::Entry;
use crate::error::{FileManagerError, Result};
use crate::navigator::NavigatorEvent;
use crate::path::{is_same_or_descendant, parent_path};
use crate::store::FileSnapshot;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClipboardMode {
    Copy,
    Cut,
}

/// A request reported to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileOperation {
    CreateFolder { name: String, parent: Option<Entry> },
    Rename { entry: Entry, new_name: String },
    Delete(Vec<Entry>),
    Copy(Vec<Entry>),
    Cut(Vec<Entry>),
    Paste {
        entries: Vec<Entry>,
        destination: Option<Entry>,
        mode: ClipboardMode,
    },
    Download(Vec<Entry>),
    Open(Entry),
    Upload {
        name: String,
        size: u64,
        destination: Option<Entry>,
    },
    Refresh,
}

/// Receives validated requests and validation failures
#[cfg_attr(test, mockall::automock)]
pub trait FileActionHandler {
    fn on_operation(&mut self, operation: FileOperation);
    fn on_error(&mut self, error: &FileManagerError);
}

/// Ordered set of selected entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    entries: Vec<Entry>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.iter().any(|entry| entry.path == path)
    }

    /// Replace the selection with a single entry
    pub fn select(&mut self, entry: Entry) {
        self.entries = vec![entry];
    }

    /// Add or remove one entry
    pub fn toggle(&mut self, entry: Entry) {
        if let Some(index) = self.entries.iter().position(|e| e.path == entry.path) {
            self.entries.remove(index);
        } else {
            self.entries.push(entry);
        }
    }

    pub fn select_all(&mut self, entries: &[Entry]) {
        self.entries = entries.to_vec();
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drop entries that are gone from a newer file list
    pub fn retain_existing(&mut self, snapshot: &FileSnapshot) {
        self.entries.retain(|entry| snapshot.contains_path(&entry.path));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clipboard {
    entries: Vec<Entry>,
    mode: ClipboardMode,
}

impl Default for Clipboard {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            mode: ClipboardMode::Copy,
        }
    }
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn mode(&self) -> ClipboardMode {
        self.mode
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.mode = ClipboardMode::Copy;
    }

    /// Whether `path` is waiting to be moved
    pub fn is_cut(&self, path: &str) -> bool {
        self.mode == ClipboardMode::Cut && self.entries.iter().any(|entry| entry.path == path)
    }
}

/// Validates requests and forwards them to the handler
#[derive(Debug)]
pub struct FileActions<H: FileActionHandler> {
    handler: H,
}

impl<H: FileActionHandler> FileActions<H> {
    pub fn new(handler: H) -> Self {
        Self { handler }
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn into_handler(self) -> H {
        self.handler
    }

    pub fn create_folder(&mut self, snapshot: &FileSnapshot, parent: Option<&Entry>, name: &str) -> Result<()> {
        let name = name.trim();
        let parent_dir = parent.map(|p| p.path.as_str()).unwrap_or("");

        if let Err(err) = validate_name(name) {
            return self.fail(err);
        }
        if let Some(parent) = parent {
            if !parent.is_directory {
                return self.fail(FileManagerError::InvalidDestination {
                    destination: parent.path.clone(),
                    reason: "not a folder".to_string(),
                });
            }
        }
        if has_sibling_named(snapshot, parent_dir, name, None) {
            return self.fail(FileManagerError::NameConflict {
                name: name.to_string(),
                parent: parent_dir.to_string(),
            });
        }

        self.report(FileOperation::CreateFolder {
            name: name.to_string(),
            parent: parent.cloned(),
        });
        Ok(())
    }

    pub fn rename(&mut self, snapshot: &FileSnapshot, entry: &Entry, new_name: &str) -> Result<()> {
        let new_name = new_name.trim();
        if let Err(err) = validate_name(new_name) {
            return self.fail(err);
        }
        if new_name == entry.name {
            return self.fail(FileManagerError::InvalidName(new_name.to_string()));
        }

        let parent = parent_path(&entry.path);
        if has_sibling_named(snapshot, &parent, new_name, Some(&entry.path)) {
            return self.fail(FileManagerError::NameConflict {
                name: new_name.to_string(),
                parent,
            });
        }

        self.report(FileOperation::Rename {
            entry: entry.clone(),
            new_name: new_name.to_string(),
        });
        Ok(())
    }

    pub fn delete(&mut self, selection: &Selection) -> Result<()> {
        let entries = self.require_selection(selection)?;
        self.report(FileOperation::Delete(entries));
        Ok(())
    }

    pub fn download(&mut self, selection: &Selection) -> Result<()> {
        let entries = self.require_selection(selection)?;
        self.report(FileOperation::Download(entries));
        Ok(())
    }

    pub fn copy(&mut self, clipboard: &mut Clipboard, selection: &Selection) -> Result<()> {
        let entries = self.require_selection(selection)?;
        clipboard.entries = entries.clone();
        clipboard.mode = ClipboardMode::Copy;
        self.report(FileOperation::Copy(entries));
        Ok(())
    }

    pub fn cut(&mut self, clipboard: &mut Clipboard, selection: &Selection) -> Result<()> {
        let entries = self.require_selection(selection)?;
        clipboard.entries = entries.clone();
        clipboard.mode = ClipboardMode::Cut;
        self.report(FileOperation::Cut(entries));
        Ok(())
    }

    /// Paste the clipboard into `destination` (`None` is the root)
    ///
    /// A cut clipboard is emptied once the paste is reported.
    pub fn paste(&mut self, clipboard: &mut Clipboard, destination: Option<&Entry>) -> Result<()> {
        if clipboard.is_empty() {
            return self.fail(FileManagerError::EmptyClipboard);
        }

        if let Some(destination) = destination {
            if !destination.is_directory {
                return self.fail(FileManagerError::InvalidDestination {
                    destination: destination.path.clone(),
                    reason: "not a folder".to_string(),
                });
            }
            let into_own_subtree = clipboard
                .entries
                .iter()
                .any(|entry| entry.is_directory && is_same_or_descendant(&destination.path, &entry.path));
            if into_own_subtree {
                return self.fail(FileManagerError::InvalidDestination {
                    destination: destination.path.clone(),
                    reason: "destination is inside a pasted folder".to_string(),
                });
            }
        }

        let mode = clipboard.mode;
        self.report(FileOperation::Paste {
            entries: clipboard.entries.clone(),
            destination: destination.cloned(),
            mode,
        });
        if mode == ClipboardMode::Cut {
            clipboard.clear();
        }
        Ok(())
    }

    /// Report the open request; folders also yield the navigation to follow
    pub fn open(&mut self, entry: &Entry) -> Option<NavigatorEvent> {
        self.report(FileOperation::Open(entry.clone()));
        if entry.is_directory {
            Some(NavigatorEvent::SetCurrentPath(entry.path.clone()))
        } else {
            None
        }
    }

    pub fn refresh(&mut self) {
        self.report(FileOperation::Refresh);
    }

    pub fn request_upload(
        &mut self,
        config: &UploadConfig,
        destination: Option<&Entry>,
        name: &str,
        size: u64,
    ) -> Result<()> {
        if let Err(err) = validate_name(name) {
            return self.fail(err);
        }
        if let Some(max) = config.max_file_size {
            if size > max {
                return self.fail(FileManagerError::UploadRejected {
                    name: name.to_string(),
                    reason: format!("{} bytes exceeds the {} byte limit", size, max),
                });
            }
        }
        if !config.accepted_file_types.is_empty() {
            let extension = name
                .rsplit_once('.')
                .map(|(_, ext)| ext.to_lowercase())
                .unwrap_or_default();
            if !config.accepted_file_types.iter().any(|accepted| accepted == &extension) {
                return self.fail(FileManagerError::UploadRejected {
                    name: name.to_string(),
                    reason: "file type not accepted".to_string(),
                });
            }
        }
        if let Some(destination) = destination {
            if !destination.is_directory {
                return self.fail(FileManagerError::InvalidDestination {
                    destination: destination.path.clone(),
                    reason: "not a folder".to_string(),
                });
            }
        }

        self.report(FileOperation::Upload {
            name: name.to_string(),
            size,
            destination: destination.cloned(),
        });
        Ok(())
    }

    fn require_selection(&mut self, selection: &Selection) -> Result<Vec<Entry>> {
        if selection.is_empty() {
            return self.fail(FileManagerError::EmptySelection);
        }
        Ok(selection.entries().to_vec())
    }

    fn report(&mut self, operation: FileOperation) {
        log::debug!("FileActions: reporting {:?}", operation);
        self.handler.on_operation(operation);
    }

    fn fail<T>(&mut self, error: FileManagerError) -> Result<T> {
        log::warn!("FileActions: rejected request: {}", error);
        self.handler.on_error(&error);
        Err(error)
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() || name == "." || name == ".." || name.contains('/') {
        return Err(FileManagerError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Another entry directly inside `parent` already uses `name`
fn has_sibling_named(snapshot: &FileSnapshot, parent: &str, name: &str, except_path: Option<&str>) -> bool {
    snapshot.files().iter().any(|entry| {
        entry.name == name && parent_path(&entry.path) == parent && Some(entry.path.as_str()) != except_path
    })
}
