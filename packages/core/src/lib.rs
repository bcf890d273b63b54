//! embedfs core: a read-only virtual filesystem overlay
//!
//! A [`Mount`] serves a virtual root from an in-memory node tree and falls
//! back to a physical directory for every path the tree does not hold:
//! - `Tree`: arena of directory and file nodes, populated once
//! - `Mount`: tree-first dispatch with a physical fallback
//! - `Vfs`: mounts routed by longest virtual prefix
//! - `File`: seekable handles with paged directory listing
//!
//! Trees are usually populated by source emitted from `embedfs-compiler`,
//! which calls [`Vfs::mount_mut`] and then [`Mount::add_dir`] /
//! [`Mount::add_file`] with payloads embedded in the binary.
//!
//! # Example
//!
//! ```rust
//! use std::io::Read;
//! use embedfs_core::{FileSystem, NodeInfo, Vfs, ZERO_TIME};
//!
//! let mut vfs = Vfs::new();
//! let m = vfs.add_mount("/app", "./public").unwrap();
//! m.add_dir("/app/css", NodeInfo::dir(ZERO_TIME)).unwrap();
//! m.add_file("/app/css/site.css", NodeInfo::file(4, ZERO_TIME), b"body").unwrap();
//!
//! let mut f = vfs.open("/app/css/site.css").unwrap();
//! let mut text = String::new();
//! f.read_to_string(&mut text).unwrap();
//! assert_eq!(text, "body");
//! assert!(vfs.stat("/app/css").unwrap().is_dir);
//! ```

mod config;
mod error;
mod file;
mod info;
mod mount;
mod node;
pub mod os;
pub mod path;
mod traits;
mod vfs;
mod walk;

pub use config::{MountConfig, VfsConfig};
pub use error::{PathError, Result, VfsError};
pub use file::{File, Gzip, PhysicalFile, VirtualFile, GZIP_MEMBER_HEADER};
pub use info::{utc_date, FileInfo, NodeInfo, Payload, ZERO_TIME};
pub use mount::Mount;
pub use node::{Iter, Node, NodeId, Tree};
pub use os::OsFs;
pub use traits::FileSystem;
pub use vfs::Vfs;
pub use walk::{walk, WalkControl};
