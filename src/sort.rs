use crate::config::SortConfig;
use crate::entry::Entry;
use std::cmp::Ordering;

/// Orders a display list
#[cfg_attr(test, mockall::automock)]
pub trait FileSorter {
    fn sort(&self, entries: Vec<Entry>) -> Vec<Entry>;
}

/// Directories first, then by name, with the path breaking ties
#[derive(Debug, Clone)]
pub struct DefaultSorter {
    pub directories_first: bool,
    pub case_sensitive: bool,
}

impl Default for DefaultSorter {
    fn default() -> Self {
        Self {
            directories_first: true,
            case_sensitive: false,
        }
    }
}

impl From<&SortConfig> for DefaultSorter {
    fn from(config: &SortConfig) -> Self {
        Self {
            directories_first: config.directories_first,
            case_sensitive: config.case_sensitive,
        }
    }
}

impl DefaultSorter {
    fn compare(&self, a: &Entry, b: &Entry) -> Ordering {
        if self.directories_first {
            match (a.is_directory, b.is_directory) {
                (true, false) => return Ordering::Less,
                (false, true) => return Ordering::Greater,
                _ => {}
            }
        }

        let by_name = if self.case_sensitive {
            a.name.cmp(&b.name)
        } else {
            a.name.to_lowercase().cmp(&b.name.to_lowercase())
        };
        by_name.then_with(|| a.path.cmp(&b.path))
    }
}

impl FileSorter for DefaultSorter {
    fn sort(&self, mut entries: Vec<Entry>) -> Vec<Entry> {
        entries.sort_by(|a, b| self.compare(a, b));
        entries
    }
}
