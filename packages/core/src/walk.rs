//! Depth-first traversal over any [`FileSystem`].

use std::io;

use crate::info::FileInfo;
use crate::path;
use crate::traits::FileSystem;

/// What [`walk`] does after visiting an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkControl {
    Continue,
    /// Do not descend into this directory. Ignored for files.
    SkipDir,
}

/// Visit `root` and everything below it, siblings in name order.
///
/// The visitor receives each entry's path and metadata; an error it returns
/// stops the walk. Errors from the filesystem are returned as-is.
///
/// ```rust
/// use embedfs_core::{walk, NodeInfo, Vfs, WalkControl, ZERO_TIME};
///
/// let mut vfs = Vfs::new();
/// let m = vfs.add_mount("/app", "/nonexistent").unwrap();
/// m.add_dir("/app/css", NodeInfo::dir(ZERO_TIME)).unwrap();
/// m.add_file("/app/css/site.css", NodeInfo::file(0, ZERO_TIME), "").unwrap();
///
/// let mut seen = Vec::new();
/// walk(&vfs, "/app", |path, _| {
///     seen.push(path.to_string());
///     Ok(WalkControl::Continue)
/// })
/// .unwrap();
/// assert_eq!(seen, vec!["/app", "/app/css", "/app/css/site.css"]);
/// ```
pub fn walk<F>(fs: &dyn FileSystem, root: &str, mut visit: F) -> io::Result<()>
where
    F: FnMut(&str, &FileInfo) -> io::Result<WalkControl>,
{
    let root = path::clean(root);
    let info = fs.lstat(&root)?;
    walk_entry(fs, &root, &info, &mut visit)
}

fn walk_entry<F>(fs: &dyn FileSystem, name: &str, info: &FileInfo, visit: &mut F) -> io::Result<()>
where
    F: FnMut(&str, &FileInfo) -> io::Result<WalkControl>,
{
    let control = visit(name, info)?;
    if !info.is_dir || control == WalkControl::SkipDir {
        return Ok(());
    }
    for entry in fs.read_dir(name)? {
        let child = path::join(name, &entry.name);
        walk_entry(fs, &child, &entry, visit)?;
    }
    Ok(())
}
