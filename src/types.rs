//! Public and internal types for the deferwalk API and pipeline.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::engine::exclusion::{IgnoreFile, IgnoreSource};
use crate::error::WalkError;

/// Deferred side effect produced by `process` for one matched file. Runs once, on the thread
/// that called [`walk`](crate::walk), after every discovery task has finished. Owns what it
/// needs (it outlives the `process` call that built it).
pub type CommitAction = Box<dyn FnOnce() -> anyhow::Result<()> + Send>;

/// Read-side step run for every matched file as `(input_path, output_path)`. May run on any
/// worker, concurrently with other files.
pub type ProcessFn<'a> = dyn Fn(&Path, &Path) -> anyhow::Result<CommitAction> + Sync + 'a;

/// Called on the walking thread with the number of commits just finished (always 1).
pub type OnCommitFn<'a> = dyn Fn(usize) + 'a;

/// What a single stat of a filesystem entry found. Produced fresh for each entry, never cached.
#[derive(Debug)]
pub enum EntryClassification {
    RegularFile,
    Directory,
    SymlinkOrAlias,
    /// Fifo, socket, or device node.
    Special,
    Missing,
    /// Exists but its attributes could not be read.
    Unreadable(std::io::Error),
}

/// File selection options. Copied into every step of the walk and never changed mid-walk.
#[derive(Clone, Debug)]
pub struct FileOptions {
    /// Resolve symlinks and walk their targets. When false, each symlink is recorded as a skipped entry.
    pub follow_symlinks: bool,
    /// Extensions (without the dot) that make a regular file a match. Case-sensitive.
    pub supported_extensions: HashSet<String>,
    /// Also skip entries whose name starts with `.`. OS clutter files (`.DS_Store`, `Thumbs.db`, ...) are always skipped.
    pub skip_dotfiles: bool,
    /// Override worker thread count for concurrent walks. When None, derived from rayon and the FD limit.
    pub num_threads: Option<usize>,
}

impl Default for FileOptions {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            supported_extensions: HashSet::from(["xml".to_string()]),
            skip_dotfiles: false,
            num_threads: None,
        }
    }
}

impl FileOptions {
    /// Replace the supported extensions. Leading dots are stripped (`.xml` and `xml` are the same).
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.supported_extensions = extensions
            .into_iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_string())
            .collect();
        self
    }
}

/// Everything one call to [`walk`](crate::walk) needs. Owned by the call, never mutated by it.
pub struct WalkRequest<'a> {
    /// Where the walk starts: a directory or a single file.
    pub root: PathBuf,
    /// Path prefixes to skip. Relative entries are taken relative to the current directory.
    pub excluded: Vec<PathBuf>,
    /// Mirror each matched file's path under this root. None means outputs are in place.
    pub output_root: Option<PathBuf>,
    pub options: FileOptions,
    /// Fan out directory entries onto a worker pool. When false the whole walk runs on the caller's thread.
    pub concurrent: bool,
    pub process: &'a ProcessFn<'a>,
    /// Per-directory ignore-file collaborator. Defaults to [`IgnoreFile`].
    pub ignore: &'a dyn IgnoreSource,
    /// Progress hook for the commit phase.
    pub on_commit: Option<&'a OnCommitFn<'a>>,
}

impl<'a> WalkRequest<'a> {
    /// Concurrent, in-place walk of `root` with default options and no exclusions.
    pub fn new(root: impl Into<PathBuf>, process: &'a ProcessFn<'a>) -> Self {
        Self {
            root: root.into(),
            excluded: Vec::new(),
            output_root: None,
            options: FileOptions::default(),
            concurrent: true,
            process,
            ignore: &IgnoreFile,
            on_commit: None,
        }
    }
}

/// Result of a walk: every recorded failure plus counts. Empty `errors` means full success.
///
/// Discovery failures (stat, listing, ignore files, skipped symlinks) come first, then process and
/// commit failures in the order their files were queued.
#[derive(Debug, Default)]
pub struct WalkOutcome {
    pub errors: Vec<WalkError>,
    /// Files handed to `process`.
    pub matched: usize,
    /// Commit actions that ran and succeeded.
    pub committed: usize,
}

impl WalkOutcome {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Outcome for a root that failed validation: exactly one error, nothing processed.
    pub fn root_failure(err: WalkError) -> Self {
        Self {
            errors: vec![err],
            ..Self::default()
        }
    }
}

/// Full options for the CLI (file config + flags). Library callers use [`FileOptions`] and [`WalkRequest`].
#[derive(Clone, Debug)]
pub struct Opts {
    /// Copy matched files under this directory. When None, matched paths are listed.
    pub output: Option<PathBuf>,
    /// Path prefixes to skip.
    pub exclude: Vec<PathBuf>,
    /// Extensions to match (without the dot).
    pub extensions: Vec<String>,
    /// Follow symbolic links.
    pub follow_links: bool,
    /// Walk on the calling thread only.
    pub serial: bool,
    /// Skip dotfiles and dot-directories.
    pub skip_dotfiles: bool,
    /// Print failures as a JSON array.
    pub json: bool,
    /// Debug logging and commit progress bar.
    pub verbose: bool,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            output: None,
            exclude: Vec::new(),
            extensions: vec!["xml".to_string()],
            follow_links: false,
            serial: false,
            skip_dotfiles: false,
            json: false,
            verbose: false,
        }
    }
}

impl From<&Opts> for FileOptions {
    fn from(o: &Opts) -> Self {
        FileOptions {
            follow_symlinks: o.follow_links,
            skip_dotfiles: o.skip_dotfiles,
            ..FileOptions::default()
        }
        .with_extensions(&o.extensions)
    }
}
