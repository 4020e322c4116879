use crate::entry::Entry;
use crate::path::{parent_path, path_segments};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::time::Instant;

/// Represents a single node in the file tree
///
/// A node owns its children and never points back at its parent; the parent
/// of a node is found again from its path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    #[serde(flatten)]
    pub entry: Entry,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Create a new leaf node wrapping an entry
    pub fn new(entry: Entry) -> Self {
        Self {
            entry,
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.entry.name
    }

    pub fn path(&self) -> &str {
        &self.entry.path
    }

    pub fn is_directory(&self) -> bool {
        self.entry.is_directory
    }

    /// Add a child node, keeping insertion order
    pub fn add_child(&mut self, child: TreeNode) {
        self.children.push(child);
    }

    /// Find a direct child by its stored path
    pub fn find_child(&self, path: &str) -> Option<&TreeNode> {
        self.children.iter().find(|child| child.entry.path == path)
    }

    /// Check if this node has children
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Number of nodes below this one
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }

    /// Paths of this node and every descendant
    pub fn subtree_paths(&self) -> HashSet<String> {
        let mut paths = HashSet::new();
        paths.insert(self.entry.path.clone());
        Self::collect_paths(self, &mut paths);
        paths
    }

    fn collect_paths(node: &TreeNode, paths: &mut HashSet<String>) {
        for child in &node.children {
            paths.insert(child.entry.path.clone());
            Self::collect_paths(child, paths);
        }
    }

    /// Pre-order walk over this node and its descendants
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a TreeNode, usize)) {
        self.walk_at(0, visit);
    }

    fn walk_at<'a>(&'a self, depth: usize, visit: &mut impl FnMut(&'a TreeNode, usize)) {
        visit(self, depth);
        for child in &self.children {
            child.walk_at(depth + 1, visit);
        }
    }
}

/// A forest of nodes built from one flat list of entries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileTree {
    pub roots: Vec<TreeNode>,
}

impl FileTree {
    /// Create a new empty file tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the forest from a flat list of entries
    ///
    /// Entries are indexed by path (a later duplicate replaces an earlier one),
    /// then each entry is attached to the entry owning its parent path.
    /// Entries whose parent path is empty or unknown become roots. Both roots
    /// and children keep the order of `entries`; a duplicated path appears once
    /// per occurrence, every copy carrying the last entry's fields.
    pub fn build(entries: &[Entry]) -> Self {
        if entries.is_empty() {
            return Self::new();
        }

        let start_time = Instant::now();

        // First pass: index every entry by path, last write wins
        let mut index_by_path: HashMap<&str, usize> = HashMap::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            if let Some(previous) = index_by_path.insert(entry.path.as_str(), index) {
                log::warn!(
                    "FileTree::build: duplicate path {:?} (entry {} replaces entry {})",
                    entry.path,
                    index,
                    previous
                );
            }
        }

        // Second pass: link every entry to its parent or to the roots
        let mut root_indices = Vec::new();
        let mut child_indices: Vec<Vec<usize>> = vec![Vec::new(); entries.len()];
        let mut orphans = 0usize;

        for entry in entries {
            // Every occurrence of a duplicated path places the surviving node
            let node_index = index_by_path[entry.path.as_str()];

            let parent = parent_path(&entry.path);
            if parent.is_empty() {
                root_indices.push(node_index);
                continue;
            }

            match index_by_path.get(parent.as_str()) {
                Some(&parent_index) => child_indices[parent_index].push(node_index),
                None => {
                    orphans += 1;
                    root_indices.push(node_index);
                }
            }
        }

        let roots = root_indices
            .into_iter()
            .map(|index| Self::materialize(index, entries, &child_indices))
            .collect::<Vec<_>>();

        log::debug!(
            "FileTree::build: {} entries -> {} roots ({} orphans) in {:?}",
            entries.len(),
            roots.len(),
            orphans,
            start_time.elapsed()
        );

        Self { roots }
    }

    /// Turn an arena index and its child lists into an owned node
    fn materialize(index: usize, entries: &[Entry], child_indices: &[Vec<usize>]) -> TreeNode {
        TreeNode {
            entry: entries[index].clone(),
            children: child_indices[index]
                .iter()
                .map(|&child| Self::materialize(child, entries, child_indices))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Resolve a path by walking one segment per level
    ///
    /// At each depth the candidate must carry exactly the stored path made of
    /// the segments consumed so far, so a node whose stored path disagrees
    /// with its position is never found.
    pub fn find_node_by_path(&self, target_path: &str) -> Option<&TreeNode> {
        let segments = path_segments(target_path);
        if segments.is_empty() {
            return None;
        }

        let mut current: Option<&TreeNode> = None;
        let mut current_path = String::new();

        for segment in segments {
            if !current_path.is_empty() {
                current_path.push('/');
            }
            current_path.push_str(segment);

            let candidates = match current {
                None => &self.roots,
                Some(node) => &node.children,
            };
            current = Some(
                candidates
                    .iter()
                    .find(|node| node.entry.path == current_path)?,
            );
        }

        current
    }

    /// Total number of nodes across all levels
    pub fn node_count(&self) -> usize {
        self.roots
            .iter()
            .map(|root| 1 + root.descendant_count())
            .sum()
    }

    /// Pre-order walk over the whole forest
    pub fn walk<'a>(&'a self, mut visit: impl FnMut(&'a TreeNode, usize)) {
        for root in &self.roots {
            root.walk(&mut visit);
        }
    }

    /// Get tree statistics
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        self.walk(|node, depth| {
            if node.is_directory() {
                stats.directories += 1;
            } else {
                stats.files += 1;
            }
            stats.total_nodes += 1;
            stats.max_depth = stats.max_depth.max(depth);
        });
        stats
    }
}

/// Statistics about the file tree
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub files: usize,
    pub directories: usize,
    pub max_depth: usize,
}
