//! Filesystem error types.

use std::io;
use thiserror::Error;

/// Error type for node operations.
///
/// Failures reported by the host are carried in [`FsError::Io`] unmodified;
/// the other variants are conditions the library itself detects.
#[derive(Debug, Error)]
pub enum FsError {
    /// Destination of a copy, move or rename is already taken.
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// A link or alias resolved, but its destination is not a usable node.
    #[error("target missing: {0}")]
    TargetMissing(String),

    /// Name is not a single path component.
    #[error("invalid name: {0}")]
    InvalidName(String),

    /// No mount point could be found for the path.
    #[error("no volume for path: {0}")]
    NotAVolume(String),

    /// The operation is disabled or unavailable on this host.
    #[error("unsupported: {0}")]
    Unsupported(String),

    /// Config file could not be parsed.
    #[error("config parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),

    /// I/O error reported by the host.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl FsError {
    /// Create an AlreadyExists error.
    pub fn already_exists(path: impl ToString) -> Self {
        Self::AlreadyExists(path.to_string())
    }

    /// Create a TargetMissing error.
    pub fn target_missing(path: impl ToString) -> Self {
        Self::TargetMissing(path.to_string())
    }

    /// Create an InvalidName error.
    pub fn invalid_name(name: impl ToString) -> Self {
        Self::InvalidName(name.to_string())
    }

    /// Create a NotAVolume error.
    pub fn not_a_volume(path: impl ToString) -> Self {
        Self::NotAVolume(path.to_string())
    }

    /// Create an Unsupported error.
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported(msg.into())
    }

    /// The host error kind, if this came from the host.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            FsError::Io(e) => Some(e.kind()),
            _ => None,
        }
    }
}

/// Convert FsError to std::io::Error for compatibility.
impl From<FsError> for io::Error {
    fn from(e: FsError) -> Self {
        match e {
            FsError::AlreadyExists(msg) => io::Error::new(io::ErrorKind::AlreadyExists, msg),
            FsError::TargetMissing(msg) => io::Error::new(io::ErrorKind::NotFound, msg),
            FsError::InvalidName(msg) => io::Error::new(io::ErrorKind::InvalidInput, msg),
            FsError::NotAVolume(msg) => io::Error::new(io::ErrorKind::NotFound, msg),
            FsError::Unsupported(msg) => io::Error::new(io::ErrorKind::Unsupported, msg),
            FsError::Ron(e) => io::Error::new(io::ErrorKind::InvalidData, e),
            FsError::Io(e) => e,
        }
    }
}

/// Result type for node operations.
pub type FsResult<T> = Result<T, FsError>;
