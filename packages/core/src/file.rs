//! File handles returned by `FileSystem::open`.

use std::fmt;
use std::fs;
use std::io::{self, Cursor, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use crate::error::{is_a_directory, is_a_file, PathError};
use crate::info::FileInfo;
use crate::node::{Node, NodeId, Tree};
use crate::os;

/// RFC 1952 member header: ID1, ID2 and the deflate compression method.
pub const GZIP_MEMBER_HEADER: [u8; 3] = [0x1F, 0x8B, 0x08];

/// Payload inspection for embedded files.
///
/// Payloads may be gzip-compressed at build time; decompression is left to
/// the caller.
pub trait Gzip {
    /// True when the payload starts with [`GZIP_MEMBER_HEADER`].
    fn is_gzip(&self) -> bool {
        self.raw_bytes().starts_with(&GZIP_MEMBER_HEADER)
    }

    /// The stored payload, unmodified.
    fn raw_bytes(&self) -> &[u8];
}

impl Gzip for Node {
    fn raw_bytes(&self) -> &[u8] {
        self.data()
    }
}

/// An open file or directory. Closed when dropped.
pub trait File: Read + Seek + fmt::Debug {
    /// List directory entries, sorted by name.
    ///
    /// `None` returns every remaining entry. `Some(n)` returns at most `n`
    /// entries and fails with `UnexpectedEof` once the listing is exhausted;
    /// `Some(0)` behaves like `None`.
    fn readdir(&mut self, limit: Option<usize>) -> io::Result<Vec<FileInfo>>;

    /// Like [`File::readdir`], returning names only.
    fn readdir_names(&mut self, limit: Option<usize>) -> io::Result<Vec<String>> {
        Ok(self.readdir(limit)?.into_iter().map(|info| info.name).collect())
    }

    fn stat(&self) -> io::Result<FileInfo>;

    /// Gzip inspection, available on handles backed by an in-memory payload.
    fn as_gzip(&self) -> Option<&dyn Gzip> {
        None
    }
}

/// Take the next page of a sorted listing.
fn next_page(
    entries: &[FileInfo],
    offset: &mut usize,
    limit: Option<usize>,
    path: &str,
) -> io::Result<Vec<FileInfo>> {
    let remaining = &entries[(*offset).min(entries.len())..];
    let take = match limit {
        Some(n) if n > 0 => {
            if remaining.is_empty() {
                return Err(PathError::new("readdir", path, "end of directory")
                    .into_io(io::ErrorKind::UnexpectedEof));
            }
            n.min(remaining.len())
        }
        _ => remaining.len(),
    };
    *offset += take;
    Ok(remaining[..take].to_vec())
}

/// Handle over a node of an in-memory tree.
pub struct VirtualFile<'a> {
    tree: &'a Tree,
    id: NodeId,
    cursor: Cursor<&'a [u8]>,
    listing: Option<Vec<FileInfo>>,
    offset: usize,
}

impl<'a> VirtualFile<'a> {
    pub(crate) fn new(tree: &'a Tree, id: NodeId) -> Self {
        Self {
            tree,
            id,
            cursor: Cursor::new(tree.node(id).data()),
            listing: None,
            offset: 0,
        }
    }

    pub fn node(&self) -> &'a Node {
        self.tree.node(self.id)
    }
}

impl fmt::Debug for VirtualFile<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualFile")
            .field("path", &self.node().path())
            .field("position", &self.cursor.position())
            .finish()
    }
}

impl Read for VirtualFile<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.node().is_dir() {
            return Err(is_a_directory("read", self.node().path()));
        }
        self.cursor.read(buf)
    }
}

impl Seek for VirtualFile<'_> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.cursor.seek(pos)
    }
}

impl File for VirtualFile<'_> {
    fn readdir(&mut self, limit: Option<usize>) -> io::Result<Vec<FileInfo>> {
        let node = self.node();
        if !node.is_dir() {
            return Err(is_a_file("readdir", node.path()));
        }
        let tree = self.tree;
        let id = self.id;
        let listing = self.listing.get_or_insert_with(|| {
            tree.sorted_children(id)
                .into_iter()
                .map(Node::info)
                .collect()
        });
        next_page(listing, &mut self.offset, limit, node.path())
    }

    fn stat(&self) -> io::Result<FileInfo> {
        Ok(self.node().info())
    }

    fn as_gzip(&self) -> Option<&dyn Gzip> {
        Some(self)
    }
}

impl Gzip for VirtualFile<'_> {
    fn raw_bytes(&self) -> &[u8] {
        self.node().data()
    }
}

/// Handle over a file or directory on disk.
pub struct PhysicalFile {
    file: fs::File,
    path: PathBuf,
    listing: Option<Vec<FileInfo>>,
    offset: usize,
}

impl PhysicalFile {
    pub fn open(path: &Path) -> io::Result<Self> {
        Ok(Self {
            file: fs::File::open(path)?,
            path: path.to_path_buf(),
            listing: None,
            offset: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Debug for PhysicalFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhysicalFile")
            .field("path", &self.path)
            .finish()
    }
}

impl Read for PhysicalFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

impl Seek for PhysicalFile {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.file.seek(pos)
    }
}

impl File for PhysicalFile {
    fn readdir(&mut self, limit: Option<usize>) -> io::Result<Vec<FileInfo>> {
        let display = self.path.to_string_lossy().into_owned();
        if self.listing.is_none() {
            if !self.file.metadata()?.is_dir() {
                return Err(is_a_file("readdir", &display));
            }
            self.listing = Some(os::read_dir(&self.path)?);
        }
        let listing = self.listing.as_deref().unwrap_or_default();
        next_page(listing, &mut self.offset, limit, &display)
    }

    fn stat(&self) -> io::Result<FileInfo> {
        let name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.to_string_lossy().into_owned());
        Ok(FileInfo::from_metadata(name, &self.file.metadata()?))
    }
}
