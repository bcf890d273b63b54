//! A virtual tree mounted over a physical directory.
//!
//! Every read consults the tree first. A path the tree does not know is mapped
//! below the physical root and served by the host filesystem, with the host's
//! error returned untouched. Listings are never merged: a directory present in
//! the tree shows only its virtual children.

use std::io;
use std::path::{Path, PathBuf};

use crate::error::{invalid, is_a_directory, is_a_file, not_found, Result, VfsError};
use crate::file::{File, PhysicalFile, VirtualFile};
use crate::info::{FileInfo, NodeInfo, Payload};
use crate::node::{Node, NodeId, Tree};
use crate::os;
use crate::path;
use crate::traits::FileSystem;

/// Where a path resolved to.
enum Target<'a> {
    Virtual(&'a Tree, NodeId),
    Physical(PathBuf),
}

/// A virtual root backed by an in-memory tree and a physical fallback.
///
/// `Mount::default()` has no tree; every operation on it fails with
/// `InvalidInput` (reads) or [`VfsError::Uninitialized`] (population).
#[derive(Debug, Clone, Default)]
pub struct Mount {
    virtual_root: String,
    physical_root: PathBuf,
    tree: Option<Tree>,
}

impl Mount {
    /// Create a mount with an empty tree anchored at `virtual_root`.
    pub fn new(virtual_root: &str, physical_root: impl Into<PathBuf>) -> Self {
        let virtual_root = path::clean(virtual_root);
        let tree = Tree::new(&virtual_root);
        Self {
            virtual_root,
            physical_root: physical_root.into(),
            tree: Some(tree),
        }
    }

    pub fn virtual_root(&self) -> &str {
        &self.virtual_root
    }

    pub fn physical_root(&self) -> &Path {
        &self.physical_root
    }

    pub fn tree(&self) -> Option<&Tree> {
        self.tree.as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.tree.is_some()
    }

    /// The virtual node at `name`, if the tree holds one.
    pub fn node(&self, name: &str) -> Option<&Node> {
        let tree = self.tree.as_ref()?;
        let cleaned = path::clean(name);
        let relative = path::strip_root(&cleaned, &self.virtual_root)?;
        tree.find(relative).map(|id| tree.node(id))
    }

    /// Add a directory. Its parent must already exist.
    pub fn add_dir(&mut self, name: &str, info: NodeInfo) -> Result<()> {
        if !info.is_dir {
            return Err(VfsError::InvalidPath {
                path: name.to_string(),
                message: "add_dir requires directory info".to_string(),
            });
        }
        self.insert(name, info, Payload::EMPTY)
    }

    /// Add a file with its payload. Its parent must already exist.
    ///
    /// The stored size is the payload length.
    pub fn add_file(&mut self, name: &str, info: NodeInfo, payload: impl Into<Payload>) -> Result<()> {
        if info.is_dir {
            return Err(VfsError::InvalidPath {
                path: name.to_string(),
                message: "add_file requires file info".to_string(),
            });
        }
        let payload = payload.into();
        if payload.len() as u64 != info.size {
            log::warn!(
                "{}: declared size {} differs from payload length {}",
                name,
                info.size,
                payload.len()
            );
        }
        self.insert(name, info, payload)
    }

    /// Mark a directory as filtered out at build time.
    ///
    /// Later insertions below it are dropped without error.
    pub fn skip_dir(&mut self, name: &str) -> Result<()> {
        let tree = self.tree.as_mut().ok_or_else(|| VfsError::Uninitialized {
            mount: self.virtual_root.clone(),
        })?;
        let cleaned = path::clean(name);
        let relative = path::strip_root(&cleaned, &self.virtual_root).ok_or_else(|| {
            VfsError::InvalidPath {
                path: cleaned.clone(),
                message: format!("outside mount {}", self.virtual_root),
            }
        })?;
        log::debug!("skipping {}", cleaned);
        tree.skip(relative);
        Ok(())
    }

    fn insert(&mut self, name: &str, info: NodeInfo, payload: Payload) -> Result<()> {
        let tree = self.tree.as_mut().ok_or_else(|| VfsError::Uninitialized {
            mount: self.virtual_root.clone(),
        })?;
        let cleaned = path::clean(name);
        let relative = path::strip_root(&cleaned, &self.virtual_root).ok_or_else(|| {
            VfsError::InvalidPath {
                path: cleaned.clone(),
                message: format!("outside mount {}", self.virtual_root),
            }
        })?;
        if relative.is_empty() {
            return Err(VfsError::conflict(&cleaned, "the mount root already exists"));
        }
        let parent_dir = path::dir(relative);
        match tree.find_parent(&parent_dir, &cleaned)? {
            Some(parent) => {
                tree.insert(parent, &cleaned, &info, payload)?;
            }
            None => log::trace!("dropping {} below a skipped directory", cleaned),
        }
        Ok(())
    }

    /// Resolve `name` against the tree, falling back to the physical root.
    fn resolve(&self, op: &'static str, name: &str) -> io::Result<(String, Target<'_>)> {
        let tree = self.tree.as_ref().ok_or_else(|| invalid(op, name))?;
        let cleaned = path::clean(name);
        let relative = match path::strip_root(&cleaned, &self.virtual_root) {
            Some(relative) => relative,
            None => return Err(not_found(op, &cleaned)),
        };
        let target = match tree.find(relative) {
            Some(id) => Target::Virtual(tree, id),
            None => {
                let physical = path::to_physical(&self.physical_root, relative);
                log::debug!("{} {}: falling back to {}", op, cleaned, physical.display());
                Target::Physical(physical)
            }
        };
        Ok((cleaned, target))
    }
}

impl FileSystem for Mount {
    fn open(&self, name: &str) -> io::Result<Box<dyn File + '_>> {
        match self.resolve("open", name)?.1 {
            Target::Virtual(tree, id) => Ok(Box::new(VirtualFile::new(tree, id))),
            Target::Physical(physical) => Ok(Box::new(PhysicalFile::open(&physical)?)),
        }
    }

    fn lstat(&self, name: &str) -> io::Result<FileInfo> {
        match self.resolve("lstat", name)?.1 {
            Target::Virtual(tree, id) => Ok(tree.node(id).info()),
            Target::Physical(physical) => os::lstat(&physical),
        }
    }

    fn stat(&self, name: &str) -> io::Result<FileInfo> {
        match self.resolve("stat", name)?.1 {
            Target::Virtual(tree, id) => Ok(tree.node(id).info()),
            Target::Physical(physical) => os::stat(&physical),
        }
    }

    fn read_file(&self, name: &str) -> io::Result<Vec<u8>> {
        let (cleaned, target) = self.resolve("read", name)?;
        match target {
            Target::Virtual(tree, id) => {
                let node = tree.node(id);
                if node.is_dir() {
                    return Err(is_a_directory("read", &cleaned));
                }
                Ok(node.data().to_vec())
            }
            Target::Physical(physical) => os::read_file(&physical, &cleaned),
        }
    }

    fn read_dir(&self, name: &str) -> io::Result<Vec<FileInfo>> {
        let (cleaned, target) = self.resolve("read", name)?;
        match target {
            Target::Virtual(tree, id) => {
                if !tree.node(id).is_dir() {
                    return Err(is_a_file("read", &cleaned));
                }
                Ok(tree
                    .sorted_children(id)
                    .into_iter()
                    .map(Node::info)
                    .collect())
            }
            Target::Physical(physical) => os::read_dir_checked(&physical, &cleaned),
        }
    }

    fn glob(&self, pattern: &str) -> io::Result<Vec<String>> {
        let tree = self.tree.as_ref().ok_or_else(|| invalid("glob", pattern))?;
        let matcher = os::glob_matcher(pattern)?;
        let mut matches: Vec<String> = tree
            .iter()
            .map(Node::path)
            .filter(|candidate| matcher.is_match(candidate))
            .map(str::to_string)
            .collect();
        if matches.is_empty() {
            log::debug!("glob {}: no virtual match, walking {}", pattern, self.physical_root.display());
            return Ok(os::glob_under(&self.physical_root, &matcher, |relative| {
                path::join(&self.virtual_root, relative)
            }));
        }
        matches.sort();
        Ok(matches)
    }
}
