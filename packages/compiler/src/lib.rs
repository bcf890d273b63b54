//! embedfs compiler: embed a directory tree as Rust source
//!
//! [`compile`] walks a physical directory and emits a `register` function
//! that rebuilds the tree inside an `embedfs_core::Mount`, with every file's
//! bytes inlined. The output is meant for `include!`, typically from a build
//! script:
//!
//! ```rust,no_run
//! use std::path::Path;
//! use embedfs_compiler::{compile, GlobExcludes};
//!
//! let excludes = GlobExcludes::new(vec!["*.tmp".to_string()]);
//! let source = compile("/app", Path::new("assets"), &excludes).unwrap();
//! std::fs::write("assets.rs", source).unwrap();
//! ```
//!
//! At run time the mount must exist before `register` is called:
//!
//! ```rust,ignore
//! let mut vfs = embedfs_core::Vfs::new();
//! vfs.add_mount("/app", "assets")?;
//! register(&mut vfs)?;
//! ```

mod binary;
mod error;
mod exclude;
mod format;
pub mod template;

pub use binary::compile;
pub use error::{CompileError, Result};
pub use exclude::{Exclusion, GlobExcludes, NoExcludes};
pub use format::format_source;
