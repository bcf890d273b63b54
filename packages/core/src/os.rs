//! Read-only access to the physical filesystem.
//!
//! These primitives back the mount fallback and [`OsFs`]. Errors are the
//! untouched `std::io::Error` values produced by `std::fs`, except for the
//! directory/file mismatches that `std::fs` does not report uniformly across
//! platforms.

use std::fs;
use std::io;
use std::path::Path;

use globset::{GlobBuilder, GlobMatcher};

use crate::error::{is_a_directory, is_a_file, PathError};
use crate::file::{File, PhysicalFile};
use crate::info::FileInfo;
use crate::traits::FileSystem;

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

pub fn open(path: &Path) -> io::Result<PhysicalFile> {
    PhysicalFile::open(path)
}

pub fn stat(path: &Path) -> io::Result<FileInfo> {
    Ok(FileInfo::from_metadata(display_name(path), &fs::metadata(path)?))
}

pub fn lstat(path: &Path) -> io::Result<FileInfo> {
    Ok(FileInfo::from_metadata(
        display_name(path),
        &fs::symlink_metadata(path)?,
    ))
}

/// Read a whole file. Directories fail with `IsADirectory`.
pub fn read_file(path: &Path, name: &str) -> io::Result<Vec<u8>> {
    if fs::metadata(path)?.is_dir() {
        return Err(is_a_directory("read", name));
    }
    fs::read(path)
}

/// List a directory sorted by name.
pub fn read_dir(path: &Path) -> io::Result<Vec<FileInfo>> {
    let mut entries = fs::read_dir(path)?
        .map(|entry| {
            let entry = entry?;
            let metadata = entry.metadata()?;
            Ok(FileInfo::from_metadata(
                entry.file_name().to_string_lossy().into_owned(),
                &metadata,
            ))
        })
        .collect::<io::Result<Vec<FileInfo>>>()?;
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// List a directory, failing with `NotADirectory` on a file.
pub(crate) fn read_dir_checked(path: &Path, name: &str) -> io::Result<Vec<FileInfo>> {
    if !fs::metadata(path)?.is_dir() {
        return Err(is_a_file("read", name));
    }
    read_dir(path)
}

/// Compile a shell pattern over slash paths. `*` does not cross `/`.
pub(crate) fn glob_matcher(pattern: &str) -> io::Result<GlobMatcher> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|e| {
            PathError::new("glob", pattern, format!("syntax error in pattern: {}", e))
                .into_io(io::ErrorKind::InvalidInput)
        })
}

/// Walk `root` and report entries whose slash path, as produced by
/// `to_slash`, matches `matcher`. Unreadable entries are ignored.
pub(crate) fn glob_under(
    root: &Path,
    matcher: &GlobMatcher,
    to_slash: impl Fn(&str) -> String,
) -> Vec<String> {
    let mut matches: Vec<String> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter_map(|entry| {
            let relative = entry.path().strip_prefix(root).ok()?;
            let relative = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<String>>()
                .join("/");
            let candidate = to_slash(&relative);
            matcher.is_match(&candidate).then_some(candidate)
        })
        .collect();
    matches.sort();
    matches
}

/// The host filesystem behind the same [`FileSystem`] surface as a mount.
///
/// Names are host paths written with `/` separators.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFs;

impl FileSystem for OsFs {
    fn open(&self, name: &str) -> io::Result<Box<dyn File + '_>> {
        Ok(Box::new(open(Path::new(name))?))
    }

    fn lstat(&self, name: &str) -> io::Result<FileInfo> {
        lstat(Path::new(name))
    }

    fn stat(&self, name: &str) -> io::Result<FileInfo> {
        stat(Path::new(name))
    }

    fn read_file(&self, name: &str) -> io::Result<Vec<u8>> {
        read_file(Path::new(name), name)
    }

    fn read_dir(&self, name: &str) -> io::Result<Vec<FileInfo>> {
        read_dir_checked(Path::new(name), name)
    }

    fn glob(&self, pattern: &str) -> io::Result<Vec<String>> {
        let matcher = glob_matcher(pattern)?;
        let root = static_prefix(pattern);
        Ok(glob_under(Path::new(&root), &matcher, |relative| {
            crate::path::join(&root, relative)
        }))
    }
}

/// Longest leading run of pattern segments without glob metacharacters.
pub(crate) fn static_prefix(pattern: &str) -> String {
    let mut prefix: Vec<&str> = Vec::new();
    let segments: Vec<&str> = pattern.split('/').collect();
    for segment in &segments[..segments.len().saturating_sub(1)] {
        if segment.contains(['*', '?', '[', '{', '\\']) {
            break;
        }
        prefix.push(segment);
    }
    let joined = prefix.join("/");
    if joined.is_empty() {
        if pattern.starts_with('/') {
            "/".to_string()
        } else {
            ".".to_string()
        }
    } else {
        joined
    }
}
