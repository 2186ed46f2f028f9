//! Failure types recorded during a walk.
//!
//! Every variant carries the path it is about so a [`WalkOutcome`](crate::WalkOutcome) can be
//! reported without re-querying the filesystem.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why an entry was refused as an unsupported type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unsupported {
    /// Regular file whose extension is not in `supported_extensions`.
    Extension,
    /// Symlink (or alias) while `follow_symlinks` is off.
    Symlink,
    /// Fifo, socket, or device node.
    Special,
}

impl fmt::Display for Unsupported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Unsupported::Extension => "unsupported file extension",
            Unsupported::Symlink => "symbolic link not followed",
            Unsupported::Special => "not a regular file or directory",
        };
        f.write_str(s)
    }
}

/// Plain tag for matching on a [`WalkError`] without destructuring it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    NotFound,
    Unreadable,
    UnsupportedType,
    DirectoryListingFailed,
    IgnoreFileParseFailed,
    SymlinkLoop,
    ProcessFailed,
    CommitFailed,
}

/// Errors while reading or parsing an ignore file.
#[derive(Error, Debug)]
pub enum IgnoreFileError {
    #[error("unable to read ignore file: {0}")]
    Read(#[from] std::io::Error),

    #[error("ignore file is not valid UTF-8")]
    InvalidUtf8,

    #[error("invalid entry on line {line}")]
    InvalidEntry { line: usize },
}

/// One recorded failure. Only the root-level variants ever stop a walk from starting.
#[derive(Error, Debug)]
pub enum WalkError {
    #[error("file not found at {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("unable to read {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{reason} at {}", .path.display())]
    UnsupportedType { path: PathBuf, reason: Unsupported },

    #[error("unable to list directory {}: {source}", .path.display())]
    DirectoryListingFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse ignore file in {}: {source}", .path.display())]
    IgnoreFileParseFailed {
        path: PathBuf,
        #[source]
        source: IgnoreFileError,
    },

    #[error("symbolic link {} points back into its own ancestor {}", .path.display(), .target.display())]
    SymlinkLoop { path: PathBuf, target: PathBuf },

    #[error("error processing {}: {source:#}", .path.display())]
    ProcessFailed {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("error committing {}: {source:#}", .path.display())]
    CommitFailed {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}

impl WalkError {
    /// Path the failure is about.
    pub fn path(&self) -> &Path {
        match self {
            WalkError::NotFound { path }
            | WalkError::Unreadable { path, .. }
            | WalkError::UnsupportedType { path, .. }
            | WalkError::DirectoryListingFailed { path, .. }
            | WalkError::IgnoreFileParseFailed { path, .. }
            | WalkError::SymlinkLoop { path, .. }
            | WalkError::ProcessFailed { path, .. }
            | WalkError::CommitFailed { path, .. } => path,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            WalkError::NotFound { .. } => ErrorKind::NotFound,
            WalkError::Unreadable { .. } => ErrorKind::Unreadable,
            WalkError::UnsupportedType { .. } => ErrorKind::UnsupportedType,
            WalkError::DirectoryListingFailed { .. } => ErrorKind::DirectoryListingFailed,
            WalkError::IgnoreFileParseFailed { .. } => ErrorKind::IgnoreFileParseFailed,
            WalkError::SymlinkLoop { .. } => ErrorKind::SymlinkLoop,
            WalkError::ProcessFailed { .. } => ErrorKind::ProcessFailed,
            WalkError::CommitFailed { .. } => ErrorKind::CommitFailed,
        }
    }
}
