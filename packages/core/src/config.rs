//! JSON configuration describing a set of mounts.
//!
//! ```json
//! {
//!   "mounts": [
//!     {"path": "/app", "physical": "./assets", "exclude": ["*.tmp", ".git"]},
//!     {"path": "/docs", "physical": "./docs", "name": "docs"}
//!   ]
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, VfsError};
use crate::path;

/// Configuration for a single mount point.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MountConfig {
    /// Virtual root, e.g. `/app`.
    pub path: String,
    /// Directory backing the mount.
    pub physical: PathBuf,
    /// Base-name globs left out when compiling this mount.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
    /// Stem of the generated file. Derived from `path` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl MountConfig {
    pub fn new(path: impl Into<String>, physical: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            physical: physical.into(),
            exclude: Vec::new(),
            name: None,
        }
    }

    /// File stem for generated source: the explicit name, or the virtual
    /// path's segments joined with `_` (`root` for `/`).
    pub fn output_name(&self) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        let cleaned = path::clean(&self.path);
        let stem = path::segments(&cleaned)
            .map(|segment| {
                segment
                    .chars()
                    .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
                    .collect::<String>()
            })
            .collect::<Vec<String>>()
            .join("_");
        if stem.is_empty() {
            "root".to_string()
        } else {
            stem
        }
    }
}

/// The full set of mounts for a [`Vfs`](crate::Vfs).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VfsConfig {
    #[serde(default)]
    pub mounts: Vec<MountConfig>,
}

impl VfsConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| VfsError::Config {
            message: e.to_string(),
        })
    }

    /// Read and parse a config file.
    ///
    /// Relative physical roots are resolved against the file's directory.
    pub fn load(file: &Path) -> Result<Self> {
        let text = fs::read_to_string(file).map_err(|e| VfsError::Config {
            message: format!("{}: {}", file.display(), e),
        })?;
        let mut config = Self::from_json(&text)?;
        if let Some(base) = file.parent() {
            for mount in &mut config.mounts {
                if mount.physical.is_relative() {
                    mount.physical = base.join(&mount.physical);
                }
            }
        }
        log::debug!("loaded {} mount(s) from {}", config.mounts.len(), file.display());
        Ok(config)
    }
}
