//! A registry of mounts routed by virtual path prefix.

use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;

use crate::config::VfsConfig;
use crate::error::{not_found, Result, VfsError};
use crate::file::File;
use crate::info::FileInfo;
use crate::mount::Mount;
use crate::path;
use crate::traits::FileSystem;

/// Mounts keyed by virtual root.
///
/// Reads go to the mount with the longest virtual root that contains the
/// path, on segment boundaries: `/app/x` belongs to `/app`, never to `/ap`.
///
/// # Example
///
/// ```rust
/// use embedfs_core::{FileSystem, NodeInfo, Vfs, ZERO_TIME};
///
/// let mut vfs = Vfs::new();
/// let m = vfs.add_mount("/app", "/nonexistent").unwrap();
/// m.add_file("/app/hello.txt", NodeInfo::file(2, ZERO_TIME), "hi").unwrap();
///
/// assert_eq!(vfs.read_file("/app/hello.txt").unwrap(), b"hi");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Vfs {
    mounts: BTreeMap<String, Mount>,
}

impl Vfs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create one empty mount per configured entry.
    pub fn from_config(config: &VfsConfig) -> Result<Self> {
        let mut vfs = Self::new();
        for mount in &config.mounts {
            vfs.add_mount(&mount.path, mount.physical.clone())?;
        }
        Ok(vfs)
    }

    /// Register an empty mount and return it for population.
    pub fn add_mount(
        &mut self,
        virtual_root: &str,
        physical_root: impl Into<PathBuf>,
    ) -> Result<&mut Mount> {
        self.insert_mount(Mount::new(virtual_root, physical_root))
    }

    /// Register an existing mount under its virtual root.
    pub fn insert_mount(&mut self, mount: Mount) -> Result<&mut Mount> {
        let key = mount.virtual_root().to_string();
        if self.mounts.contains_key(&key) {
            return Err(VfsError::AlreadyMounted { path: key });
        }
        log::debug!(
            "mounting {} over {}",
            key,
            mount.physical_root().display()
        );
        Ok(self.mounts.entry(key).or_insert(mount))
    }

    /// The mount registered exactly at `virtual_root`.
    pub fn mount(&self, virtual_root: &str) -> Option<&Mount> {
        self.mounts.get(&path::clean(virtual_root))
    }

    /// Mutable access for population. Used by generated `register` functions.
    pub fn mount_mut(&mut self, virtual_root: &str) -> Option<&mut Mount> {
        self.mounts.get_mut(&path::clean(virtual_root))
    }

    /// The mount owning `name`.
    pub fn find_mount(&self, name: &str) -> Option<&Mount> {
        let cleaned = path::clean(name);
        self.mounts
            .values()
            .filter(|mount| path::strip_root(&cleaned, mount.virtual_root()).is_some())
            .max_by_key(|mount| mount.virtual_root().len())
    }

    /// All mounts, ordered by virtual root.
    pub fn mounts(&self) -> impl Iterator<Item = &Mount> {
        self.mounts.values()
    }

    fn route(&self, op: &'static str, name: &str) -> io::Result<&Mount> {
        self.find_mount(name)
            .ok_or_else(|| not_found(op, &path::clean(name)))
    }
}

impl FileSystem for Vfs {
    fn open(&self, name: &str) -> io::Result<Box<dyn File + '_>> {
        self.route("open", name)?.open(name)
    }

    fn lstat(&self, name: &str) -> io::Result<FileInfo> {
        self.route("lstat", name)?.lstat(name)
    }

    fn stat(&self, name: &str) -> io::Result<FileInfo> {
        self.route("stat", name)?.stat(name)
    }

    fn read_file(&self, name: &str) -> io::Result<Vec<u8>> {
        self.route("read", name)?.read_file(name)
    }

    fn read_dir(&self, name: &str) -> io::Result<Vec<FileInfo>> {
        self.route("read", name)?.read_dir(name)
    }

    /// Union of every mount's matches, sorted and deduplicated.
    ///
    /// A match is kept only from the mount that owns it, so every result can
    /// be opened through this `Vfs`.
    fn glob(&self, pattern: &str) -> io::Result<Vec<String>> {
        if self.mounts.is_empty() {
            // Still report a malformed pattern.
            crate::os::glob_matcher(pattern)?;
            return Ok(Vec::new());
        }
        let mut matches = Vec::new();
        for mount in self.mounts.values() {
            let owner = mount.virtual_root();
            matches.extend(mount.glob(pattern)?.into_iter().filter(|found| {
                self.find_mount(found).map(Mount::virtual_root) == Some(owner)
            }));
        }
        matches.sort();
        matches.dedup();
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MountConfig;
    use crate::info::{NodeInfo, ZERO_TIME};

    fn vfs() -> Vfs {
        let mut vfs = Vfs::new();
        let app = vfs.add_mount("/app", "/nonexistent/app").unwrap();
        app.add_file("/app/a.txt", NodeInfo::file(1, ZERO_TIME), "a").unwrap();
        let nested = vfs.add_mount("/app/static", "/nonexistent/static").unwrap();
        nested
            .add_file("/app/static/s.css", NodeInfo::file(1, ZERO_TIME), "s")
            .unwrap();
        vfs
    }

    #[test]
    fn routes_to_longest_prefix() {
        let vfs = vfs();
        assert_eq!(vfs.find_mount("/app/a.txt").unwrap().virtual_root(), "/app");
        assert_eq!(
            vfs.find_mount("/app/static/s.css").unwrap().virtual_root(),
            "/app/static"
        );
        assert_eq!(vfs.find_mount("/app/staticx").unwrap().virtual_root(), "/app");
        assert!(vfs.find_mount("/other").is_none());

        assert_eq!(vfs.read_file("/app/static/s.css").unwrap(), b"s");
        assert_eq!(vfs.read_file("/app/a.txt").unwrap(), b"a");
    }

    #[test]
    fn unrouted_path_is_not_found() {
        let vfs = vfs();
        let err = vfs.stat("/other/x").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(!vfs.is_exists("/other/x"));
    }

    #[test]
    fn duplicate_mount_is_rejected() {
        let mut vfs = vfs();
        let err = vfs.add_mount("/app/", "/elsewhere").unwrap_err();
        assert!(matches!(err, VfsError::AlreadyMounted { .. }));
    }

    #[test]
    fn exact_lookup() {
        let mut vfs = vfs();
        assert!(vfs.mount("/app").is_some());
        assert!(vfs.mount_mut("/app/static/").is_some());
        assert!(vfs.mount("/ap").is_none());
        let roots: Vec<&str> = vfs.mounts().map(Mount::virtual_root).collect();
        assert_eq!(roots, vec!["/app", "/app/static"]);
    }

    #[test]
    fn glob_unions_mounts() {
        let vfs = vfs();
        assert_eq!(
            vfs.glob("/app/**/*.*").unwrap(),
            vec!["/app/a.txt", "/app/static/s.css"]
        );
        let empty = Vfs::new();
        assert!(empty.glob("/*").unwrap().is_empty());
        assert_eq!(
            empty.glob("[").unwrap_err().kind(),
            io::ErrorKind::InvalidInput
        );
    }

    #[test]
    fn glob_drops_matches_shadowed_by_nested_mount() {
        let outer = tempfile::tempdir().unwrap();
        std::fs::create_dir(outer.path().join("static")).unwrap();
        std::fs::write(outer.path().join("static/ghost.css"), b"g").unwrap();

        let mut vfs = Vfs::new();
        vfs.add_mount("/app", outer.path()).unwrap();
        let nested = vfs.add_mount("/app/static", "/nonexistent/static").unwrap();
        nested
            .add_file("/app/static/real.css", NodeInfo::file(1, ZERO_TIME), "r")
            .unwrap();

        let found = vfs.glob("/app/static/*.css").unwrap();
        assert_eq!(found, vec!["/app/static/real.css"]);
        for name in &found {
            vfs.read_file(name).unwrap();
        }
        assert_eq!(
            vfs.read_file("/app/static/ghost.css").unwrap_err().kind(),
            io::ErrorKind::NotFound
        );
    }

    #[test]
    fn from_config_creates_empty_mounts() {
        let config = VfsConfig {
            mounts: vec![
                MountConfig::new("/app", "assets"),
                MountConfig::new("/docs", "docs"),
            ],
        };
        let vfs = Vfs::from_config(&config).unwrap();
        assert_eq!(vfs.mounts().count(), 2);
        assert!(vfs.mount("/docs").unwrap().tree().unwrap().is_empty());
    }
}
