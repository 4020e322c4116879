//! Substring search over a subtree or over the whole flat list.

use crate::entry::Entry;
use crate::tree::TreeNode;

/// Folds text into a comparable form before root-level matching
///
/// Implementations may strip diacritics or apply locale rules; the
/// navigator treats the result as opaque.
#[cfg_attr(test, mockall::automock)]
pub trait SearchNormalizer {
    fn normalize(&self, text: &str) -> String;
}

/// Unicode lowercasing
#[derive(Debug, Clone, Copy, Default)]
pub struct CaseFoldNormalizer;

impl SearchNormalizer for CaseFoldNormalizer {
    fn normalize(&self, text: &str) -> String {
        text.to_lowercase()
    }
}

/// Leaves text untouched, for case-sensitive matching
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityNormalizer;

impl SearchNormalizer for IdentityNormalizer {
    fn normalize(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Find every node at or below `root` whose path or name contains `keyword`
///
/// Matching is ASCII case-insensitive. Results come in pre-order (parents
/// before children, siblings in source order) with children stripped.
pub fn search_in_subtree(root: &TreeNode, keyword: &str) -> Vec<Entry> {
    let query = keyword.trim().to_ascii_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    let mut results = Vec::new();
    root.walk(&mut |node: &TreeNode, _depth| {
        let path_match = node.entry.path.to_ascii_lowercase().contains(&query);
        let name_match = node.entry.name.to_ascii_lowercase().contains(&query);
        if path_match || name_match {
            results.push(node.entry.clone());
        }
    });

    log::debug!(
        "search_in_subtree: {:?} under {:?} -> {} matches",
        query,
        root.entry.path,
        results.len()
    );
    results
}

/// Filter the flat list by normalized path or name, keeping list order
pub fn search_entries(entries: &[Entry], keyword: &str, normalizer: &dyn SearchNormalizer) -> Vec<Entry> {
    let trimmed = keyword.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let query = normalizer.normalize(trimmed);
    entries
        .iter()
        .filter(|entry| {
            normalizer.normalize(&entry.path).contains(&query)
                || normalizer.normalize(&entry.name).contains(&query)
        })
        .cloned()
        .collect()
}

/// Case-insensitive match on the path only
pub fn search_by_path(entries: &[Entry], keyword: &str) -> Vec<Entry> {
    let query = keyword.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    entries
        .iter()
        .filter(|entry| entry.path.to_lowercase().contains(&query))
        .cloned()
        .collect()
}
