//! Navigation state derivation
//!
//! The navigator is a reducer: every [`NavigatorEvent`] produces a new
//! [`NavigationState`] from the previous one. Any change of the file list,
//! the current path or the search term re-runs the whole derivation of the
//! current folder and the display list; nothing is diffed.

use crate::config::Config;
use crate::entry::Entry;
use crate::path::{join_path, parent_path};
use crate::search::{search_entries, search_in_subtree, CaseFoldNormalizer, IdentityNormalizer, SearchNormalizer};
use crate::sort::{DefaultSorter, FileSorter};
use crate::store::FileSnapshot;
use std::time::Instant;

/// Events that can be sent to the navigator
#[derive(Debug, Clone)]
pub enum NavigatorEvent {
    /// A new generation of the file list is available
    FilesChanged(FileSnapshot),
    SetCurrentPath(String),
    /// Move to the parent of the current path
    NavigateUp,
    SetSearchTerm(String),
    ClearSearch,
    /// Overwrite the current folder until the next derivation
    SetCurrentFolder(Option<Entry>),
    /// Overwrite the display list until the next derivation
    SetCurrentPathFiles(Vec<Entry>),
}

/// Everything the file list view needs to render one folder or one search
#[derive(Debug, Clone, Default)]
pub struct NavigationState {
    snapshot: FileSnapshot,
    initialized: bool,
    current_path: String,  // "" is the root
    current_folder: Option<Entry>,
    current_path_files: Vec<Entry>,
    search_term: String,
}

impl NavigationState {
    pub fn snapshot(&self) -> &FileSnapshot {
        &self.snapshot
    }

    /// Whether the initial path has been applied
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    pub fn current_folder(&self) -> Option<&Entry> {
        self.current_folder.as_ref()
    }

    pub fn current_path_files(&self) -> &[Entry] {
        &self.current_path_files
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn is_searching(&self) -> bool {
        !self.search_term.trim().is_empty()
    }

    fn fingerprint(&self) -> (u64, bool, &str, Option<&Entry>, &[Entry], &str) {
        (
            self.snapshot.generation(),
            self.initialized,
            &self.current_path,
            self.current_folder.as_ref(),
            &self.current_path_files,
            &self.search_term,
        )
    }
}

/// Drives [`NavigationState`] with the sorting and normalization collaborators
pub struct Navigator {
    state: NavigationState,
    initial_path: String,
    sorter: Box<dyn FileSorter>,
    normalizer: Box<dyn SearchNormalizer>,
}

impl std::fmt::Debug for Navigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigator")
            .field("state", &self.state)
            .field("initial_path", &self.initial_path)
            .finish_non_exhaustive()
    }
}

impl Navigator {
    /// Create a navigator with the collaborators described by `config`
    pub fn new(config: &Config) -> Self {
        let normalizer: Box<dyn SearchNormalizer> = if config.search.case_sensitive {
            Box::new(IdentityNormalizer)
        } else {
            Box::new(CaseFoldNormalizer)
        };
        Self::with_collaborators(
            config.initial_path.clone(),
            Box::new(DefaultSorter::from(&config.sort)),
            normalizer,
        )
    }

    pub fn with_collaborators(
        initial_path: impl Into<String>,
        sorter: Box<dyn FileSorter>,
        normalizer: Box<dyn SearchNormalizer>,
    ) -> Self {
        Self {
            state: NavigationState::default(),
            initial_path: initial_path.into(),
            sorter,
            normalizer,
        }
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    /// Handle an event and return whether the state changed
    pub fn handle_event(&mut self, event: NavigatorEvent) -> bool {
        let before = self.state.clone();
        let state = std::mem::take(&mut self.state);
        self.state = self.reduce(state, event);
        before.fingerprint() != self.state.fingerprint()
    }

    /// Apply one event to `state`
    pub fn reduce(&self, mut state: NavigationState, event: NavigatorEvent) -> NavigationState {
        match event {
            NavigatorEvent::FilesChanged(snapshot) => {
                state.snapshot = snapshot;
                if !state.initialized && !state.snapshot.is_empty() {
                    state.current_path = if state.snapshot.contains_path(&self.initial_path) {
                        self.initial_path.clone()
                    } else {
                        String::new()
                    };
                    state.initialized = true;
                    log::debug!("Navigator: initial path set to {:?}", state.current_path);
                }
                self.derive(state)
            }
            NavigatorEvent::SetCurrentPath(path) => {
                state.current_path = path;
                self.derive(state)
            }
            NavigatorEvent::NavigateUp => {
                state.current_path = parent_path(&state.current_path);
                self.derive(state)
            }
            NavigatorEvent::SetSearchTerm(term) => {
                state.search_term = term;
                self.derive(state)
            }
            NavigatorEvent::ClearSearch => {
                state.search_term.clear();
                self.derive(state)
            }
            NavigatorEvent::SetCurrentFolder(folder) => {
                state.current_folder = folder;
                state
            }
            NavigatorEvent::SetCurrentPathFiles(files) => {
                state.current_path_files = files;
                state
            }
        }
    }

    /// Recompute the current folder and the display list
    fn derive(&self, mut state: NavigationState) -> NavigationState {
        let start = Instant::now();
        let snapshot = &state.snapshot;
        let term = state.search_term.trim();

        let (files, folder) = if !term.is_empty() {
            let files = if state.current_path.is_empty() {
                let matched = search_entries(snapshot.files(), term, self.normalizer.as_ref());
                self.sorter.sort(matched)
            } else {
                match snapshot.node_by_path(&state.current_path) {
                    Some(node) => self.sorter.sort(search_in_subtree(node, &state.search_term)),
                    None => {
                        log::debug!("Navigator: {:?} not in tree, nothing to search", state.current_path);
                        Vec::new()
                    }
                }
            };
            (files, None)
        } else {
            let children = snapshot
                .files()
                .iter()
                .filter(|entry| is_direct_child(&state.current_path, entry))
                .cloned()
                .collect();
            (
                self.sorter.sort(children),
                snapshot.find_entry(&state.current_path).cloned(),
            )
        };

        log::debug!(
            "Navigator: derived {} items for {:?} (search {:?}) in {:?}",
            files.len(),
            state.current_path,
            state.search_term,
            start.elapsed()
        );

        state.current_path_files = files;
        state.current_folder = folder;
        state
    }
}

/// Entry sits exactly one level below `folder`
///
/// At the root both `name` and the slash-prefixed `/name` form are accepted.
fn is_direct_child(folder: &str, entry: &Entry) -> bool {
    if entry.path == join_path(folder, &entry.name) {
        return true;
    }
    folder.is_empty()
        && entry
            .path
            .strip_prefix('/')
            .map(|rest| rest == entry.name)
            .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::MockSearchNormalizer;
    use crate::sort::MockFileSorter;
    use crate::store::FileStore;

    fn create_test_files() -> Vec<Entry> {
        vec![
            Entry::new_dir("catalog", "catalog"),
            Entry::new_dir("category", "catalog/category"),
            Entry::new_file("cat.png", "catalog/category/cat.png"),
            Entry::new_dir("product", "catalog/product"),
            Entry::new_file("dog", "dog"),
            Entry::new_dir("other", "other"),
            Entry::new_file("x", "other/x"),
        ]
    }

    fn loaded_navigator(initial_path: &str) -> Navigator {
        let mut config = Config::default();
        config.initial_path = initial_path.to_string();
        let mut navigator = Navigator::new(&config);
        let snapshot = FileStore::with_files(create_test_files()).snapshot();
        navigator.handle_event(NavigatorEvent::FilesChanged(snapshot));
        navigator
    }

    fn display_paths(navigator: &Navigator) -> Vec<&str> {
        navigator
            .state()
            .current_path_files()
            .iter()
            .map(|e| e.path.as_str())
            .collect()
    }

    #[test]
    fn test_navigator_state_creation() {
        let navigator = Navigator::new(&Config::default());
        let state = navigator.state();
        assert!(!state.is_initialized());
        assert_eq!(state.current_path(), "");
        assert!(state.current_folder().is_none());
        assert!(state.current_path_files().is_empty());
        assert!(!state.is_searching());
    }

    #[test]
    fn test_root_listing() {
        let navigator = loaded_navigator("");
        assert!(navigator.state().is_initialized());
        assert_eq!(display_paths(&navigator), vec!["catalog", "other", "dog"]);
        assert!(navigator.state().current_folder().is_none());
    }

    #[test]
    fn test_root_listing_accepts_leading_slash() {
        let mut navigator = Navigator::new(&Config::default());
        let snapshot = FileStore::with_files(vec![
            Entry::new_dir("Pictures", "/Pictures"),
            Entry::new_file("a.png", "/Pictures/a.png"),
        ])
        .snapshot();
        navigator.handle_event(NavigatorEvent::FilesChanged(snapshot));
        assert_eq!(display_paths(&navigator), vec!["/Pictures"]);
    }

    #[test]
    fn test_folder_listing() {
        let mut navigator = loaded_navigator("");
        let changed = navigator.handle_event(NavigatorEvent::SetCurrentPath("catalog".to_string()));
        assert!(changed);
        assert_eq!(display_paths(&navigator), vec!["catalog/category", "catalog/product"]);
        assert_eq!(navigator.state().current_folder().unwrap().path, "catalog");
    }

    #[test]
    fn test_root_search_uses_flat_list() {
        let mut navigator = loaded_navigator("");
        navigator.handle_event(NavigatorEvent::SetSearchTerm("  CAT ".to_string()));
        assert_eq!(
            display_paths(&navigator),
            vec!["catalog", "catalog/category", "catalog/product", "catalog/category/cat.png"]
        );
        assert!(navigator.state().current_folder().is_none());
    }

    #[test]
    fn test_subtree_search() {
        let mut navigator = loaded_navigator("catalog/category");
        assert_eq!(navigator.state().current_folder().unwrap().name, "category");

        navigator.handle_event(NavigatorEvent::SetSearchTerm("png".to_string()));
        assert_eq!(display_paths(&navigator), vec!["catalog/category/cat.png"]);
        assert!(navigator.state().current_folder().is_none());

        navigator.handle_event(NavigatorEvent::ClearSearch);
        assert_eq!(display_paths(&navigator), vec!["catalog/category/cat.png"]);
        assert_eq!(navigator.state().current_folder().unwrap().path, "catalog/category");
    }

    #[test]
    fn test_search_in_unknown_folder_is_empty() {
        let mut navigator = loaded_navigator("");
        navigator.handle_event(NavigatorEvent::SetCurrentPath("missing".to_string()));
        assert!(navigator.state().current_path_files().is_empty());
        assert!(navigator.state().current_folder().is_none());

        navigator.handle_event(NavigatorEvent::SetSearchTerm("x".to_string()));
        assert!(navigator.state().current_path_files().is_empty());
        assert!(navigator.state().current_folder().is_none());
    }

    #[test]
    fn test_initial_path_applied_once() {
        let mut navigator = loaded_navigator("catalog");
        assert_eq!(navigator.state().current_path(), "catalog");

        navigator.handle_event(NavigatorEvent::SetCurrentPath("other".to_string()));
        let snapshot = FileStore::with_files(create_test_files()).snapshot();
        navigator.handle_event(NavigatorEvent::FilesChanged(snapshot));

        // A later file list never re-applies the initial path
        assert_eq!(navigator.state().current_path(), "other");
        assert_eq!(display_paths(&navigator), vec!["other/x"]);
    }

    #[test]
    fn test_unknown_initial_path_falls_back_to_root() {
        let navigator = loaded_navigator("nowhere");
        assert!(navigator.state().is_initialized());
        assert_eq!(navigator.state().current_path(), "");
    }

    #[test]
    fn test_empty_file_list_defers_initialization() {
        let mut config = Config::default();
        config.initial_path = "catalog".to_string();
        let mut navigator = Navigator::new(&config);

        navigator.handle_event(NavigatorEvent::FilesChanged(FileStore::new().snapshot()));
        assert!(!navigator.state().is_initialized());
        assert!(navigator.state().current_path_files().is_empty());

        navigator.handle_event(NavigatorEvent::FilesChanged(
            FileStore::with_files(create_test_files()).snapshot(),
        ));
        assert!(navigator.state().is_initialized());
        assert_eq!(navigator.state().current_path(), "catalog");
    }

    #[test]
    fn test_navigate_up() {
        let mut navigator = loaded_navigator("catalog/category");
        navigator.handle_event(NavigatorEvent::NavigateUp);
        assert_eq!(navigator.state().current_path(), "catalog");
        navigator.handle_event(NavigatorEvent::NavigateUp);
        assert_eq!(navigator.state().current_path(), "");
        assert!(!navigator.handle_event(NavigatorEvent::NavigateUp));
    }

    #[test]
    fn test_direct_setters_skip_derivation() {
        let mut navigator = loaded_navigator("catalog");
        let custom = vec![Entry::new_file("pinned", "pinned")];

        navigator.handle_event(NavigatorEvent::SetCurrentPathFiles(custom.clone()));
        navigator.handle_event(NavigatorEvent::SetCurrentFolder(None));
        assert_eq!(navigator.state().current_path_files(), custom.as_slice());
        assert!(navigator.state().current_folder().is_none());

        // The next derivation overwrites both
        navigator.handle_event(NavigatorEvent::SetSearchTerm(String::new()));
        assert_eq!(navigator.state().current_folder().unwrap().path, "catalog");
        assert_eq!(navigator.state().current_path_files().len(), 2);
    }

    #[test]
    fn test_unchanged_event_reports_no_change() {
        let mut navigator = loaded_navigator("catalog");
        assert!(!navigator.handle_event(NavigatorEvent::SetCurrentPath("catalog".to_string())));
        assert!(!navigator.handle_event(NavigatorEvent::ClearSearch));
    }

    #[test]
    fn test_reduce_leaves_input_state_alone() {
        let navigator = loaded_navigator("");
        let before = navigator.state().clone();
        let after = navigator.reduce(before.clone(), NavigatorEvent::SetCurrentPath("other".to_string()));
        assert_eq!(before.current_path(), "");
        assert_eq!(after.current_path(), "other");
        assert_eq!(navigator.state().current_path(), "");
    }

    #[test]
    fn test_sorter_invoked_for_every_display_list() {
        let mut sorter = MockFileSorter::new();
        // files loaded, root search, subtree search, listing after clearing
        sorter.expect_sort().times(4).returning(|entries| entries);
        let mut normalizer = MockSearchNormalizer::new();
        normalizer.expect_normalize().returning(|text| text.to_lowercase());

        let mut navigator = Navigator::with_collaborators("", Box::new(sorter), Box::new(normalizer));
        navigator.handle_event(NavigatorEvent::FilesChanged(
            FileStore::with_files(create_test_files()).snapshot(),
        ));
        navigator.handle_event(NavigatorEvent::SetSearchTerm("cat".to_string()));
        navigator.handle_event(NavigatorEvent::SetCurrentPath("catalog".to_string()));
        // Unresolved subtree: empty list, sorter not consulted
        navigator.handle_event(NavigatorEvent::SetCurrentPath("missing".to_string()));
        navigator.handle_event(NavigatorEvent::SetCurrentFolder(None));
        // Leaving search in the missing folder lists its (absent) children
        navigator.handle_event(NavigatorEvent::ClearSearch);
    }

    #[test]
    fn test_normalizer_only_used_at_root() {
        let sorter = DefaultSorter::default();
        let mut normalizer = MockSearchNormalizer::new();
        normalizer.expect_normalize().never();

        let mut navigator = Navigator::with_collaborators("catalog", Box::new(sorter), Box::new(normalizer));
        navigator.handle_event(NavigatorEvent::FilesChanged(
            FileStore::with_files(create_test_files()).snapshot(),
        ));
        navigator.handle_event(NavigatorEvent::SetSearchTerm("CAT".to_string()));
        assert_eq!(display_paths(&navigator).len(), 4);
    }

    #[test]
    fn test_case_sensitive_root_search() {
        let mut config = Config::default();
        config.search.case_sensitive = true;
        let mut navigator = Navigator::new(&config);
        navigator.handle_event(NavigatorEvent::FilesChanged(
            FileStore::with_files(create_test_files()).snapshot(),
        ));
        navigator.handle_event(NavigatorEvent::SetSearchTerm("CAT".to_string()));
        assert!(navigator.state().current_path_files().is_empty());
    }
}
