use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by every fallible operation of the crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FsError {
    #[error("file exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("no such file or directory: {}", .0.display())]
    NotFound(PathBuf),

    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("is a directory: {}", .0.display())]
    IsADirectory(PathBuf),

    #[error("directory not empty: {}", .0.display())]
    DirectoryNotEmpty(PathBuf),

    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("illegal mode {mode:#o}: expected three octal digits")]
    InvalidMode { mode: u32 },

    #[error("invalid argument for {}: {reason}", path.display())]
    InvalidArgument { path: PathBuf, reason: &'static str },

    #[error("'{operation}' is not supported on this platform")]
    Unsupported { operation: &'static str },
}

impl FsError {
    /// The closest `std::io::ErrorKind` for this error.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            FsError::AlreadyExists(_) => io::ErrorKind::AlreadyExists,
            FsError::NotFound(_) => io::ErrorKind::NotFound,
            FsError::NotADirectory(_) => io::ErrorKind::NotADirectory,
            FsError::IsADirectory(_) => io::ErrorKind::IsADirectory,
            FsError::DirectoryNotEmpty(_) => io::ErrorKind::DirectoryNotEmpty,
            FsError::PermissionDenied(_) => io::ErrorKind::PermissionDenied,
            FsError::InvalidMode { .. } | FsError::InvalidArgument { .. } => {
                io::ErrorKind::InvalidInput
            }
            FsError::Unsupported { .. } => io::ErrorKind::Unsupported,
        }
    }
}

impl From<FsError> for io::Error {
    fn from(err: FsError) -> Self {
        io::Error::new(err.kind(), err)
    }
}

pub type Result<T> = std::result::Result<T, FsError>;
