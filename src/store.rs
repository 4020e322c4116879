//! Generational ownership of the flat file list and the tree built from it.
//!
//! Every replacement of the file list produces a fresh [`FileSnapshot`]. A
//! snapshot never changes after it is built, so a reader holding one keeps
//! seeing exactly the generation it took, whatever happens to the store.

use crate::entry::Entry;
use crate::error::Result;
use crate::path::join_path;
use crate::search::search_by_path;
use crate::tree::{FileTree, TreeNode};
use std::sync::Arc;

/// One immutable generation of files plus their tree
#[derive(Debug, Clone, Default)]
pub struct FileSnapshot {
    generation: u64,
    files: Arc<Vec<Entry>>,
    tree: Arc<FileTree>,
}

impl FileSnapshot {
    /// Build a snapshot, deriving the tree from `files`
    pub fn new(generation: u64, files: Vec<Entry>) -> Self {
        let tree = FileTree::build(&files);
        Self {
            generation,
            files: Arc::new(files),
            tree: Arc::new(tree),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn files(&self) -> &[Entry] {
        &self.files
    }

    pub fn tree(&self) -> &FileTree {
        &self.tree
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Whether two snapshots share the same underlying generation
    pub fn same_generation(&self, other: &FileSnapshot) -> bool {
        self.generation == other.generation && Arc::ptr_eq(&self.files, &other.files)
    }

    pub fn node_by_path(&self, path: &str) -> Option<&TreeNode> {
        self.tree.find_node_by_path(path)
    }

    /// Entry whose path is exactly `path`
    pub fn find_entry(&self, path: &str) -> Option<&Entry> {
        self.files.iter().find(|entry| entry.path == path)
    }

    pub fn contains_path(&self, path: &str) -> bool {
        self.files.iter().any(|entry| entry.path == path)
    }

    /// Direct children of a directory entry, read from the flat list
    pub fn children_of(&self, entry: &Entry) -> Vec<Entry> {
        if !entry.is_directory {
            return Vec::new();
        }
        self.files
            .iter()
            .filter(|child| child.path == join_path(&entry.path, &child.name))
            .cloned()
            .collect()
    }

    /// Whole-list case-insensitive search on paths
    pub fn search_by_path(&self, query: &str) -> Vec<Entry> {
        search_by_path(&self.files, query)
    }
}

/// Owner of the current snapshot
#[derive(Debug, Default)]
pub struct FileStore {
    current: FileSnapshot,
}

impl FileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that starts from `files`
    pub fn with_files(files: Vec<Entry>) -> Self {
        let mut store = Self::new();
        store.replace_files(files);
        store
    }

    /// Load a JSON array of entries from disk
    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let files: Vec<Entry> = serde_json::from_str(&content)?;
        log::info!("Loaded {} entries from {}", files.len(), path);
        Ok(Self::with_files(files))
    }

    /// Replace the file list and rebuild the whole tree
    pub fn replace_files(&mut self, files: Vec<Entry>) -> FileSnapshot {
        let generation = self.current.generation + 1;
        log::debug!("FileStore: building generation {} from {} entries", generation, files.len());
        self.current = FileSnapshot::new(generation, files);
        self.current.clone()
    }

    /// Cheap handle on the current generation
    pub fn snapshot(&self) -> FileSnapshot {
        self.current.clone()
    }
}
