//! Error types for scanning operations.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that abort a scan.
///
/// Only problems with the scan root itself are fatal; anything that goes
/// wrong below it is reported as a [`ScanWarning`].
#[derive(Debug, Error)]
pub enum ScanError {
    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Root is neither a regular file nor a directory.
    #[error("Unsupported file type at scan root: {path}")]
    UnsupportedRoot { path: PathBuf },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl ScanError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }
}

/// Kind of scan warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// Entry disappeared between enumeration and inspection.
    Vanished,
    /// Permission was denied.
    PermissionDenied,
    /// Error reading file contents or directory listing.
    ReadError,
    /// Ignore pattern could not be compiled and was skipped.
    InvalidPattern,
    /// Entry is neither a regular file nor a directory.
    UnsupportedType,
    /// Entry name is not valid UTF-8 and decodes to a sibling's key.
    DuplicateName,
}

/// Non-fatal warning encountered during scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanWarning {
    /// Path where the warning occurred.
    pub path: PathBuf,
    /// Human-readable message.
    pub message: String,
    /// Kind of warning.
    pub kind: WarningKind,
}

impl ScanWarning {
    /// Create a new scan warning.
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            kind,
        }
    }

    /// Classify an I/O failure on a single entry.
    pub fn io(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        let path = path.into();
        match error.kind() {
            std::io::ErrorKind::NotFound => Self {
                message: format!("Vanished during scan: {}", path.display()),
                path,
                kind: WarningKind::Vanished,
            },
            std::io::ErrorKind::PermissionDenied => Self::permission_denied(path),
            _ => Self::read_error(path, error),
        }
    }

    /// Create a permission denied warning.
    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            message: format!("Permission denied: {}", path.display()),
            path,
            kind: WarningKind::PermissionDenied,
        }
    }

    /// Create a read error warning.
    pub fn read_error(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        let path = path.into();
        Self {
            message: format!("Read error: {error}"),
            path,
            kind: WarningKind::ReadError,
        }
    }

    /// Create a warning for an ignore pattern that failed to compile.
    pub fn invalid_pattern(
        path: impl Into<PathBuf>,
        line: usize,
        pattern: &str,
        error: impl std::fmt::Display,
    ) -> Self {
        Self {
            path: path.into(),
            message: format!("Skipping ignore pattern on line {line} ({pattern:?}): {error}"),
            kind: WarningKind::InvalidPattern,
        }
    }

    /// Create a warning for a special file (socket, fifo, device).
    pub fn unsupported_type(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            message: format!("Not a regular file or directory: {}", path.display()),
            path,
            kind: WarningKind::UnsupportedType,
        }
    }

    /// Create a warning for an entry whose decoded name is already taken.
    pub fn duplicate_name(path: impl Into<PathBuf>, key: &str) -> Self {
        let path = path.into();
        Self {
            message: format!("Name {key:?} already used by a sibling: {}", path.display()),
            path,
            kind: WarningKind::DuplicateName,
        }
    }
}
