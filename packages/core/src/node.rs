//! The in-memory node tree and its path resolver.
//!
//! Nodes live in an arena owned by [`Tree`] and refer to each other by
//! [`NodeId`]. Children are owned through the arena; the parent link is a
//! plain index used to rebuild paths, never for ownership.

use std::borrow::Cow;
use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use crate::error::{Result, VfsError};
use crate::info::{FileInfo, NodeInfo, Payload, ZERO_TIME};
use crate::path;

/// Stable index of a node inside its [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The root of every tree.
    pub const ROOT: NodeId = NodeId(0);
}

/// A single directory or file entry.
#[derive(Debug, Clone)]
pub struct Node {
    name: String,
    path: String,
    is_dir: bool,
    mod_time: DateTime<Utc>,
    size: u64,
    data: Option<Cow<'static, [u8]>>,
    children: IndexMap<String, NodeId>,
    parent: Option<NodeId>,
}

impl Node {
    fn new(path: &str, info: &NodeInfo, data: Option<Cow<'static, [u8]>>) -> Self {
        let size = if info.is_dir {
            0
        } else {
            data.as_ref().map_or(0, |d| d.len() as u64)
        };
        Self {
            name: path::base(path),
            path: path.to_string(),
            is_dir: info.is_dir,
            mod_time: info.mod_time,
            size,
            data,
            children: IndexMap::new(),
            parent: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    pub fn mod_time(&self) -> DateTime<Utc> {
        self.mod_time
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Stored payload. Empty for directories and zero-size files.
    pub fn data(&self) -> &[u8] {
        self.data.as_deref().unwrap_or_default()
    }

    pub fn info(&self) -> FileInfo {
        FileInfo {
            name: self.name.clone(),
            size: self.size,
            is_dir: self.is_dir,
            is_symlink: false,
            mod_time: self.mod_time,
        }
    }
}

/// An arena-backed directory tree anchored at a virtual root.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
    skipped: BTreeSet<String>,
}

impl Tree {
    /// Create a tree holding only its root directory.
    pub fn new(root: &str) -> Self {
        let root = path::clean(root);
        Self {
            nodes: vec![Node::new(&root, &NodeInfo::dir(ZERO_TIME), None)],
            skipped: BTreeSet::new(),
        }
    }

    pub fn root(&self) -> &Node {
        &self.nodes[NodeId::ROOT.0]
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when only the root exists.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Locate the node at `relative`, a root-relative slash path.
    ///
    /// An empty path (or `.`) resolves to the root. Descending through a
    /// file or a missing name yields `None`.
    pub fn find(&self, relative: &str) -> Option<NodeId> {
        let mut current = NodeId::ROOT;
        for segment in path::segments(relative) {
            if segment == "." {
                continue;
            }
            current = *self.nodes[current.0].children.get(segment)?;
        }
        Some(current)
    }

    /// Resolve the directory that will receive a new entry.
    ///
    /// Returns `Ok(None)` when the directory was deliberately skipped, in which
    /// case the insertion must be dropped silently.
    pub(crate) fn find_parent(&self, relative_dir: &str, target: &str) -> Result<Option<NodeId>> {
        if self.is_skipped(relative_dir) {
            return Ok(None);
        }
        let id = self.find(relative_dir).ok_or_else(|| {
            VfsError::conflict(
                target,
                format!("parent directory {:?} does not exist", relative_dir),
            )
        })?;
        if !self.node(id).is_dir {
            return Err(VfsError::conflict(
                target,
                format!("parent {:?} is not a directory", relative_dir),
            ));
        }
        Ok(Some(id))
    }

    /// Attach a new node below `parent`.
    pub(crate) fn insert(
        &mut self,
        parent: NodeId,
        path: &str,
        info: &NodeInfo,
        payload: Payload,
    ) -> Result<NodeId> {
        let data = if info.is_dir {
            None
        } else {
            payload.into_data()
        };
        let mut node = Node::new(path, info, data);
        if self.nodes[parent.0].children.contains_key(&node.name) {
            return Err(VfsError::conflict(path, "entry already exists"));
        }
        let id = NodeId(self.nodes.len());
        node.parent = Some(parent);
        self.nodes[parent.0].children.insert(node.name.clone(), id);
        self.nodes.push(node);
        Ok(id)
    }

    /// Record `relative_dir` as intentionally filtered out.
    pub(crate) fn skip(&mut self, relative_dir: &str) {
        self.skipped.insert(path::clean(relative_dir));
    }

    /// True when `relative_dir` or one of its ancestors was skipped.
    fn is_skipped(&self, relative_dir: &str) -> bool {
        let mut current = path::clean(relative_dir);
        loop {
            if self.skipped.contains(&current) {
                return true;
            }
            if current == "." || current == "/" || current.is_empty() {
                return false;
            }
            current = path::dir(&current);
        }
    }

    /// Children of `id` in insertion order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &Node> + '_ {
        self.nodes[id.0]
            .children
            .values()
            .map(move |child| &self.nodes[child.0])
    }

    /// Children of `id` sorted by name.
    pub fn sorted_children(&self, id: NodeId) -> Vec<&Node> {
        let mut children: Vec<&Node> = self.children(id).collect();
        children.sort_by(|a, b| a.name.cmp(&b.name));
        children
    }

    /// Depth-first iterator over every node, root first, siblings by name.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            tree: self,
            stack: vec![NodeId::ROOT],
        }
    }
}

/// Depth-first traversal returned by [`Tree::iter`].
pub struct Iter<'a> {
    tree: &'a Tree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = self.tree.node(id);
        let mut children: Vec<(&String, &NodeId)> = node.children.iter().collect();
        children.sort_by(|a, b| b.0.cmp(a.0));
        self.stack.extend(children.into_iter().map(|(_, child)| *child));
        Some(node)
    }
}
