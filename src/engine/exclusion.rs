//! Exclusion prefixes and per-directory ignore files.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::IgnoreFileError;
use crate::utils::config::PackagePaths;

/// Source of extra exclusions for a directory (the ignore-file collaborator).
///
/// Returns absolute prefixes to skip below `dir`, or an empty list when the directory declares
/// none. An error is recorded by the walker; the directory is still walked without the additions.
pub trait IgnoreSource: Sync {
    fn additions(&self, dir: &Path) -> Result<Vec<PathBuf>, IgnoreFileError>;
}

/// Default collaborator: reads the package ignore file (`.deferwalk-ignore`) in each directory.
#[derive(Clone, Copy, Debug, Default)]
pub struct IgnoreFile;

impl IgnoreSource for IgnoreFile {
    fn additions(&self, dir: &Path) -> Result<Vec<PathBuf>, IgnoreFileError> {
        let path = dir.join(PackagePaths::get().ignore_filename());
        match fs::read(&path) {
            Ok(bytes) => parse_ignore_file(dir, &bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(IgnoreFileError::Read(e)),
        }
    }
}

/// Parse ignore-file contents: one path per line, relative to `dir` unless absolute.
/// Blank lines and `#` comments are skipped.
pub fn parse_ignore_file(dir: &Path, contents: &[u8]) -> Result<Vec<PathBuf>, IgnoreFileError> {
    let text = std::str::from_utf8(contents).map_err(|_| IgnoreFileError::InvalidUtf8)?;
    let mut paths = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.contains('\0') {
            return Err(IgnoreFileError::InvalidEntry { line: idx + 1 });
        }
        // join() keeps absolute lines as-is
        paths.push(dir.join(line));
    }
    Ok(paths)
}

/// Ordered, absolute path prefixes excluded from the walk.
///
/// Copy-on-descent: [`Self::extended`] returns a new set for a directory's subtree, so additions
/// never leak to siblings or ancestors. Cloning shares the underlying list.
#[derive(Clone, Debug, Default)]
pub struct ExclusionSet {
    prefixes: Arc<Vec<PathBuf>>,
}

impl ExclusionSet {
    pub fn new<I>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = PathBuf>,
    {
        Self {
            prefixes: Arc::new(prefixes.into_iter().collect()),
        }
    }

    /// True iff some prefix in the set is a leading run of components of `candidate`
    /// (`/a/b` excludes `/a/b` and `/a/b/c`, not `/a/bc`).
    pub fn is_excluded(&self, candidate: &Path) -> bool {
        self.prefixes.iter().any(|p| candidate.starts_with(p))
    }

    /// This set plus `additions`, for use below the directory that declared them.
    pub fn extended(&self, additions: Vec<PathBuf>) -> Self {
        if additions.is_empty() {
            return self.clone();
        }
        let mut prefixes = Vec::with_capacity(self.prefixes.len() + additions.len());
        prefixes.extend(self.prefixes.iter().cloned());
        prefixes.extend(additions);
        Self {
            prefixes: Arc::new(prefixes),
        }
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.prefixes.iter().map(PathBuf::as_path)
    }
}
