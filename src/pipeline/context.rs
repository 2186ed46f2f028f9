//! Walk context: shared, read-only data handed to every visit, plus the per-node state that is
//! copied on descent.

use crossbeam_channel::Sender;
use std::path::PathBuf;
use std::sync::Arc;

use crate::engine::exclusion::{ExclusionSet, IgnoreSource};
use crate::{FileOptions, ProcessFn};

use super::aggregator::WalkItem;

/// Shared context for one walk. Borrowed by every task; only `sink` is used to report results.
pub struct WalkContext<'a> {
    /// Absolute logical root; output paths are mapped relative to it.
    pub root: PathBuf,
    pub output_root: Option<PathBuf>,
    pub options: FileOptions,
    pub process: &'a ProcessFn<'a>,
    pub ignore: &'a dyn IgnoreSource,
    pub sink: Sender<WalkItem>,
}

/// One entry waiting to be visited.
///
/// `logical` is the path as seen under the root (drives output mapping); `physical` is where it
/// actually lives (differs below a followed symlink). Both are absolute.
#[derive(Clone, Debug)]
pub struct WalkNode {
    pub logical: PathBuf,
    pub physical: PathBuf,
    pub exclusions: ExclusionSet,
    /// Physical directories on this branch; only tracked when following symlinks.
    pub ancestors: Arc<Vec<PathBuf>>,
}

impl WalkNode {
    pub fn root(logical: PathBuf, physical: PathBuf, exclusions: ExclusionSet) -> Self {
        Self {
            logical,
            physical,
            exclusions,
            ancestors: Arc::new(Vec::new()),
        }
    }

    /// Either form of the path is under an excluded prefix.
    pub fn is_excluded(&self) -> bool {
        self.exclusions.is_excluded(&self.logical)
            || (self.physical != self.logical && self.exclusions.is_excluded(&self.physical))
    }

    /// Same logical entry, now read from `target`.
    pub fn retarget(&self, target: PathBuf) -> Self {
        Self {
            physical: target,
            ..self.clone()
        }
    }

    /// Child named `name` inside this directory.
    pub fn child(
        &self,
        name: &std::ffi::OsStr,
        exclusions: &ExclusionSet,
        ancestors: &Arc<Vec<PathBuf>>,
    ) -> Self {
        Self {
            logical: self.logical.join(name),
            physical: self.physical.join(name),
            exclusions: exclusions.clone(),
            ancestors: Arc::clone(ancestors),
        }
    }
}
