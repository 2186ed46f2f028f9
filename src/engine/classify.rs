//! Entry classification and symlink resolution. Reads only; never mutates the filesystem.

use std::fs::{self, FileType};
use std::io;
use std::path::{Path, PathBuf};

use crate::EntryClassification;
use crate::error::WalkError;

fn from_file_type(ft: FileType) -> EntryClassification {
    if ft.is_symlink() {
        EntryClassification::SymlinkOrAlias
    } else if ft.is_dir() {
        EntryClassification::Directory
    } else if ft.is_file() {
        EntryClassification::RegularFile
    } else {
        EntryClassification::Special
    }
}

/// Stat `path` without following a final symlink.
///
/// `Missing` when nothing exists at the path, `Unreadable` when something exists but its
/// attributes could not be read (e.g. permission denied on a parent).
pub fn classify(path: &Path) -> EntryClassification {
    match fs::symlink_metadata(path) {
        Ok(meta) => from_file_type(meta.file_type()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => EntryClassification::Missing,
        Err(e) => EntryClassification::Unreadable(e),
    }
}

/// Fully resolve a symlink (every component) to its target.
pub fn resolve_symlink(path: &Path) -> io::Result<PathBuf> {
    fs::canonicalize(path)
}

/// Turn a failed stat or resolve on `path` into the matching recorded failure.
pub fn io_failure(path: &Path, err: io::Error) -> WalkError {
    if err.kind() == io::ErrorKind::NotFound {
        WalkError::NotFound {
            path: path.to_path_buf(),
        }
    } else {
        WalkError::Unreadable {
            path: path.to_path_buf(),
            source: err,
        }
    }
}
