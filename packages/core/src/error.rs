//! Error types for embedfs.
//!
//! Read operations speak `std::io::Error` so a caller cannot tell a virtual
//! result from a physical one by its error type. Virtual failures carry a
//! [`PathError`] payload inside an `io::Error` of the matching kind.
//! Population failures use [`VfsError`].

use std::io;

/// Operation, path and reason of a failed virtual read.
///
/// Rendered as `<op> <path>: <message>`, e.g. `read /app/css: is a directory`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{op} {path}: {message}")]
pub struct PathError {
    pub op: &'static str,
    pub path: String,
    pub message: String,
}

impl PathError {
    pub fn new(op: &'static str, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            op,
            path: path.into(),
            message: message.into(),
        }
    }

    /// Wrap into an `io::Error` of the given kind.
    pub fn into_io(self, kind: io::ErrorKind) -> io::Error {
        io::Error::new(kind, self)
    }
}

pub(crate) fn not_found(op: &'static str, path: &str) -> io::Error {
    PathError::new(op, path, "file does not exist").into_io(io::ErrorKind::NotFound)
}

pub(crate) fn is_a_directory(op: &'static str, path: &str) -> io::Error {
    PathError::new(op, path, "is a directory").into_io(io::ErrorKind::IsADirectory)
}

pub(crate) fn is_a_file(op: &'static str, path: &str) -> io::Error {
    PathError::new(op, path, "is a file").into_io(io::ErrorKind::NotADirectory)
}

pub(crate) fn invalid(op: &'static str, path: &str) -> io::Error {
    PathError::new(op, path, "invalid argument").into_io(io::ErrorKind::InvalidInput)
}

/// Errors raised while building or registering a virtual tree.
#[derive(Debug, thiserror::Error)]
pub enum VfsError {
    /// The parent directory of an inserted path is missing, is a file, or the
    /// name is already taken.
    #[error("cannot insert {path}: {reason}")]
    InsertionConflict { path: String, reason: String },

    /// The mount has no tree to operate on.
    #[error("mount {mount:?} is not initialized")]
    Uninitialized { mount: String },

    /// A path does not belong to the mount it was given to.
    #[error("invalid path {path}: {message}")]
    InvalidPath { path: String, message: String },

    /// A mount is already registered at this virtual root.
    #[error("a mount already exists at {path}")]
    AlreadyMounted { path: String },

    /// The configuration could not be read or parsed.
    #[error("config error: {message}")]
    Config { message: String },

    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

impl VfsError {
    pub(crate) fn conflict(path: &str, reason: impl Into<String>) -> Self {
        VfsError::InsertionConflict {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for population operations.
pub type Result<T> = std::result::Result<T, VfsError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn path_error_display() {
        let e = PathError::new("read", "/app/css", "is a directory");
        assert_eq!(e.to_string(), "read /app/css: is a directory");
    }

    #[test]
    fn io_wrappers_carry_kind_and_payload() {
        let e = is_a_directory("read", "/app");
        assert_eq!(e.kind(), io::ErrorKind::IsADirectory);
        let inner = e
            .get_ref()
            .and_then(|inner| inner.downcast_ref::<PathError>())
            .unwrap();
        assert_eq!(inner.path, "/app");

        assert_eq!(is_a_file("read", "/x").kind(), io::ErrorKind::NotADirectory);
        assert_eq!(not_found("open", "/x").kind(), io::ErrorKind::NotFound);
        assert_eq!(invalid("open", "/x").kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn insertion_conflict_display() {
        let e = VfsError::conflict("/app/a/b.txt", "parent directory /app/a does not exist");
        let display = e.to_string();
        assert!(display.contains("/app/a/b.txt"));
        assert!(display.contains("does not exist"));
    }

    #[test]
    fn io_error_source() {
        let e: VfsError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(e, VfsError::Io(_)));
        assert!(StdError::source(&e).is_some());
    }
}
