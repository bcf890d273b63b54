//! The `assets/` directory, embedded at build time and mounted at `/app`.
//!
//! Files excluded by the build script (`*.tmp`) stay reachable through the
//! physical fallback while the source tree is present.

use std::path::PathBuf;

use embedfs_core::{Result, Vfs};

mod generated {
    include!(concat!(env!("OUT_DIR"), "/assets.rs"));
}

/// Virtual root of the embedded assets.
pub const MOUNT: &str = "/app";

/// Directory the assets were compiled from.
pub fn assets_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets")
}

/// Populate the mount at [`MOUNT`], which must already exist in `vfs`.
///
/// # Panics
///
/// When `vfs` has no mount at [`MOUNT`].
pub fn register_into(vfs: &mut Vfs) -> Result<()> {
    generated::register(vfs)
}

/// Build a VFS with the embedded assets registered.
pub fn assets() -> Result<Vfs> {
    let mut vfs = Vfs::new();
    vfs.add_mount(MOUNT, assets_dir())?;
    register_into(&mut vfs)?;
    Ok(vfs)
}
