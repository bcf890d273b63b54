//! The read-only filesystem surface shared by mounts, the VFS and the host.

use std::io;

use crate::file::File;
use crate::info::FileInfo;

/// Read-only, path-addressed file access.
///
/// Paths are slash separated. Errors are `std::io::Error` values; test them
/// with [`io::Error::kind`] whichever store produced them.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `&dyn FileSystem` or
/// `Box<dyn FileSystem>`.
pub trait FileSystem: Send + Sync {
    /// Open a file or directory for reading.
    fn open(&self, name: &str) -> io::Result<Box<dyn File + '_>>;

    /// Describe an entry without following a final symlink.
    fn lstat(&self, name: &str) -> io::Result<FileInfo>;

    /// Describe an entry.
    fn stat(&self, name: &str) -> io::Result<FileInfo>;

    /// Read the whole content of a file.
    fn read_file(&self, name: &str) -> io::Result<Vec<u8>>;

    /// List a directory, sorted by name.
    fn read_dir(&self, name: &str) -> io::Result<Vec<FileInfo>>;

    /// Paths matching a shell pattern, sorted.
    ///
    /// An overlay answers from its in-memory tree and walks the physical root
    /// only when the tree yields no match at all. A pattern with some tree
    /// matches therefore omits disk-only paths it would also match, so
    /// results are not consistent with per-path reads.
    fn glob(&self, pattern: &str) -> io::Result<Vec<String>>;

    /// True unless `lstat` reports the entry as missing.
    ///
    /// Other failures (permissions, an uninitialized mount) count as existing.
    fn is_exists(&self, name: &str) -> bool {
        match self.lstat(name) {
            Ok(_) => true,
            Err(e) => e.kind() != io::ErrorKind::NotFound,
        }
    }
}

// Blanket implementations for references and boxes

impl<T: FileSystem + ?Sized> FileSystem for &T {
    fn open(&self, name: &str) -> io::Result<Box<dyn File + '_>> {
        (**self).open(name)
    }

    fn lstat(&self, name: &str) -> io::Result<FileInfo> {
        (**self).lstat(name)
    }

    fn stat(&self, name: &str) -> io::Result<FileInfo> {
        (**self).stat(name)
    }

    fn read_file(&self, name: &str) -> io::Result<Vec<u8>> {
        (**self).read_file(name)
    }

    fn read_dir(&self, name: &str) -> io::Result<Vec<FileInfo>> {
        (**self).read_dir(name)
    }

    fn glob(&self, pattern: &str) -> io::Result<Vec<String>> {
        (**self).glob(pattern)
    }

    fn is_exists(&self, name: &str) -> bool {
        (**self).is_exists(name)
    }
}

impl<T: FileSystem + ?Sized> FileSystem for Box<T> {
    fn open(&self, name: &str) -> io::Result<Box<dyn File + '_>> {
        (**self).open(name)
    }

    fn lstat(&self, name: &str) -> io::Result<FileInfo> {
        (**self).lstat(name)
    }

    fn stat(&self, name: &str) -> io::Result<FileInfo> {
        (**self).stat(name)
    }

    fn read_file(&self, name: &str) -> io::Result<Vec<u8>> {
        (**self).read_file(name)
    }

    fn read_dir(&self, name: &str) -> io::Result<Vec<FileInfo>> {
        (**self).read_dir(name)
    }

    fn glob(&self, pattern: &str) -> io::Result<Vec<String>> {
        (**self).glob(pattern)
    }

    fn is_exists(&self, name: &str) -> bool {
        (**self).is_exists(name)
    }
}
