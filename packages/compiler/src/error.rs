//! Error types for the compiler.

use std::io;
use std::path::PathBuf;

/// Errors raised while compiling a directory into source.
///
/// Any error aborts the compilation; no partial output is returned.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// An exclusion pattern failed to compile.
    #[error("invalid exclude pattern {pattern:?}: {reason}")]
    InvalidExclude { pattern: String, reason: String },

    /// The directory walk failed.
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Reading a file or its metadata failed.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The rendered source did not parse.
    #[error("format error: {message}")]
    Format { message: String },
}

impl CompileError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CompileError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for compiler operations.
pub type Result<T> = std::result::Result<T, CompileError>;
