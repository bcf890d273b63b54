//! Compile a physical directory into a `register` function.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use embedfs_core::{path, ZERO_TIME};
use walkdir::WalkDir;

use crate::error::{CompileError, Result};
use crate::exclude::Exclusion;
use crate::format::format_source;
use crate::template::{render, Template};

/// A regular file retained by the walk.
struct Collected {
    virtual_path: String,
    physical_path: PathBuf,
    mod_time: DateTime<Utc>,
}

/// Generate source that rebuilds `physical_path` inside the mount registered
/// at `mount_path`.
///
/// The output defines `pub fn register(vfs: &mut embedfs_core::Vfs)`, meant to
/// be pulled in with `include!`. It looks the mount up with
/// `Vfs::mount_mut` and panics when it is missing. Directories are emitted in
/// walk order so that parents precede children; files follow, sorted by
/// virtual path, each with its content inlined as a byte string.
///
/// Entries whose base name matches `exclusions` are left out; an excluded
/// directory is not descended. Only directories and regular files are
/// emitted. Identical input trees produce identical output.
///
/// `physical_path` must be a directory.
pub fn compile(
    mount_path: &str,
    physical_path: &Path,
    exclusions: &dyn Exclusion,
) -> Result<Vec<u8>> {
    exclusions.validate()?;

    let root = fs::metadata(physical_path).map_err(|e| CompileError::io(physical_path, e))?;
    if !root.is_dir() {
        return Err(CompileError::io(
            physical_path,
            io::Error::new(io::ErrorKind::NotADirectory, "not a directory"),
        ));
    }

    let mount_path = path::clean(mount_path);
    log::debug!(
        "compiling {} into mount {}",
        physical_path.display(),
        mount_path
    );

    let mut source = render(&Template::Preamble {
        mount_path: &mount_path,
    });
    let mut files = Vec::new();

    let walker = WalkDir::new(physical_path)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0 || !exclusions.matches(&entry.file_name().to_string_lossy())
        });

    for entry in walker {
        let entry = entry?;
        let metadata = entry.metadata()?;
        let virtual_path = virtual_path(&mount_path, physical_path, entry.path());
        let mod_time = metadata
            .modified()
            .map(DateTime::<Utc>::from)
            .unwrap_or(ZERO_TIME);
        log::trace!("{} -> {}", entry.path().display(), virtual_path);

        if metadata.is_dir() {
            if entry.depth() > 0 {
                source.push_str(&render(&Template::Directory {
                    path: &virtual_path,
                    mod_time,
                }));
            }
        } else if metadata.is_file() {
            files.push(Collected {
                virtual_path,
                physical_path: entry.into_path(),
                mod_time,
            });
        } else {
            log::debug!("skipping special file {}", entry.path().display());
        }
    }

    files.sort_by(|a, b| a.virtual_path.cmp(&b.virtual_path));
    for file in &files {
        let data = fs::read(&file.physical_path)
            .map_err(|e| CompileError::io(&file.physical_path, e))?;
        source.push_str(&render(&Template::File {
            path: &file.virtual_path,
            size: data.len() as u64,
            mod_time: file.mod_time,
            data: &data,
        }));
    }

    source.push_str(&render(&Template::Epilogue));
    let formatted = format_source(&source)?;
    log::debug!(
        "compiled {} file(s) for {} ({} bytes of source)",
        files.len(),
        mount_path,
        formatted.len()
    );
    Ok(formatted.into_bytes())
}

/// Virtual path of `entry`, a path below `root`.
fn virtual_path(mount_path: &str, root: &Path, entry: &Path) -> String {
    let relative = entry
        .strip_prefix(root)
        .map(|relative| {
            relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<String>>()
                .join("/")
        })
        .unwrap_or_default();
    path::join(mount_path, &relative)
}
