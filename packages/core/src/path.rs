//! Slash-separated virtual path helpers.
//!
//! Virtual paths always use `/` regardless of the host OS. These helpers are
//! purely lexical: they never touch the filesystem.

use std::path::{Path, PathBuf};

/// Lexically normalize a slash-separated path.
///
/// - Repeated slashes collapse to one.
/// - `.` components are dropped.
/// - `..` removes the preceding component; at the root of a rooted path it is
///   dropped, in a relative path it is kept when nothing precedes it.
/// - A trailing slash is removed (except for `/` itself).
/// - An empty result becomes `.`.
///
/// ```rust
/// use embedfs_core::path::clean;
///
/// assert_eq!(clean("/app//css/./site.css"), "/app/css/site.css");
/// assert_eq!(clean("/app/css/../js/"), "/app/js");
/// assert_eq!(clean("/.."), "/");
/// assert_eq!(clean(""), ".");
/// ```
pub fn clean(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();

    for component in path.split('/') {
        match component {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&"..") | None => {
                    if !rooted {
                        parts.push("..");
                    }
                }
                Some(_) => {
                    parts.pop();
                }
            },
            other => parts.push(other),
        }
    }

    let joined = parts.join("/");
    match (rooted, joined.is_empty()) {
        (true, _) => format!("/{}", joined),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

/// Directory portion of a path, cleaned. Mirrors `dirname`.
///
/// ```rust
/// use embedfs_core::path::dir;
///
/// assert_eq!(dir("/app/css/site.css"), "/app/css");
/// assert_eq!(dir("/app"), "/");
/// assert_eq!(dir("site.css"), ".");
/// ```
pub fn dir(path: &str) -> String {
    match path.rfind('/') {
        Some(idx) => clean(&path[..=idx]),
        None => ".".to_string(),
    }
}

/// Last element of a path. Trailing slashes are ignored.
///
/// ```rust
/// use embedfs_core::path::base;
///
/// assert_eq!(base("/app/css/"), "css");
/// assert_eq!(base("/"), "/");
/// assert_eq!(base(""), ".");
/// ```
pub fn base(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/".to_string();
    }
    match trimmed.rfind('/') {
        Some(idx) => trimmed[idx + 1..].to_string(),
        None => trimmed.to_string(),
    }
}

/// Join two slash paths and clean the result.
pub fn join(prefix: &str, suffix: &str) -> String {
    if suffix.is_empty() {
        return clean(prefix);
    }
    if prefix.is_empty() {
        return clean(suffix);
    }
    clean(&format!("{}/{}", prefix, suffix))
}

/// Strip `root` from `path` on a segment boundary.
///
/// Both inputs must already be cleaned. Returns the remainder without a
/// leading slash (`""` when `path == root`), or `None` when `path` is not
/// inside `root`.
pub fn strip_root<'a>(path: &'a str, root: &str) -> Option<&'a str> {
    if root == "/" {
        return path.strip_prefix('/');
    }
    let rest = path.strip_prefix(root)?;
    if rest.is_empty() {
        Some(rest)
    } else {
        rest.strip_prefix('/')
    }
}

/// Split a relative slash path into its non-empty segments.
pub fn segments(relative: &str) -> impl Iterator<Item = &str> {
    relative.split('/').filter(|s| !s.is_empty())
}

/// Map a relative slash path below `root` onto a host path.
pub fn to_physical(root: &Path, relative: &str) -> PathBuf {
    root.components()
        .map(|c| c.as_os_str().to_owned())
        .chain(segments(relative).map(Into::into))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_collapses_and_resolves() {
        assert_eq!(clean("/"), "/");
        assert_eq!(clean("//"), "/");
        assert_eq!(clean("/a/b/"), "/a/b");
        assert_eq!(clean("/a/./b"), "/a/b");
        assert_eq!(clean("/a/b/../c"), "/a/c");
        assert_eq!(clean("/a/../../b"), "/b");
        assert_eq!(clean("a/../.."), "..");
        assert_eq!(clean("../a"), "../a");
        assert_eq!(clean("a//b"), "a/b");
        assert_eq!(clean("./"), ".");
    }

    #[test]
    fn dir_and_base() {
        assert_eq!(dir("/a/b/c"), "/a/b");
        assert_eq!(dir("/a/b/"), "/a/b");
        assert_eq!(dir("/"), "/");
        assert_eq!(base("/a/b/c.txt"), "c.txt");
        assert_eq!(base("c.txt"), "c.txt");
    }

    #[test]
    fn join_cleans() {
        assert_eq!(join("/app", "css/site.css"), "/app/css/site.css");
        assert_eq!(join("/app", "/css"), "/app/css");
        assert_eq!(join("/app", ""), "/app");
        assert_eq!(join("/", "a"), "/a");
    }

    #[test]
    fn strip_root_respects_segments() {
        assert_eq!(strip_root("/app/css", "/app"), Some("css"));
        assert_eq!(strip_root("/app", "/app"), Some(""));
        assert_eq!(strip_root("/application", "/app"), None);
        assert_eq!(strip_root("/other/app", "/app"), None);
        assert_eq!(strip_root("/a/b", "/"), Some("a/b"));
        assert_eq!(strip_root("/", "/"), Some(""));
    }

    #[test]
    fn physical_mapping() {
        let root = Path::new("/srv/static");
        assert_eq!(
            to_physical(root, "css/site.css"),
            PathBuf::from("/srv/static/css/site.css")
        );
        assert_eq!(to_physical(root, ""), PathBuf::from("/srv/static"));
    }
}
