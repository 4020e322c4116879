//! Slash-separated path helpers.
//!
//! Paths are plain strings: `"catalog/category/a"`. The conceptual root is `""`.

/// Everything before the last `/`, or `""` when the path has no `/`.
pub fn parent_path(path: &str) -> String {
    match path.rfind('/') {
        Some(index) => path[..index].to_string(),
        None => String::new(),
    }
}

/// Join a parent path and a leaf name. The root parent yields the bare name.
pub fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}

/// Non-empty `/`-separated segments of a path.
pub fn path_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|segment| !segment.is_empty()).collect()
}

/// True when `path` is `ancestor` itself or lies somewhere below it.
pub fn is_same_or_descendant(path: &str, ancestor: &str) -> bool {
    if ancestor.is_empty() {
        return true;
    }
    path == ancestor
        || (path.len() > ancestor.len()
            && path.starts_with(ancestor)
            && path.as_bytes()[ancestor.len()] == b'/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_path() {
        assert_eq!(parent_path("a/b/c"), "a/b");
        assert_eq!(parent_path("a/b"), "a");
        assert_eq!(parent_path("a"), "");
        assert_eq!(parent_path(""), "");
        // Trailing slash: the leaf is empty, the parent is what precedes it
        assert_eq!(parent_path("a/"), "a");
        assert_eq!(parent_path("/a"), "");
    }

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("", "catalog"), "catalog");
        assert_eq!(join_path("catalog", "category"), "catalog/category");
    }

    #[test]
    fn test_path_segments() {
        assert_eq!(path_segments("a/b/c"), vec!["a", "b", "c"]);
        assert_eq!(path_segments("/a//b/"), vec!["a", "b"]);
        assert!(path_segments("").is_empty());
        assert!(path_segments("///").is_empty());
    }

    #[test]
    fn test_is_same_or_descendant() {
        assert!(is_same_or_descendant("a", "a"));
        assert!(is_same_or_descendant("a/b/c", "a"));
        assert!(is_same_or_descendant("anything", ""));
        assert!(!is_same_or_descendant("ab", "a"));
        assert!(!is_same_or_descendant("a", "a/b"));
    }
}
