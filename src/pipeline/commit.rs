//! Deferred commit phase: runs queued commit actions one at a time on the calling thread.

use log::{debug, warn};

use crate::OnCommitFn;
use crate::error::WalkError;

use super::aggregator::PendingResult;

/// Run every pending commit in queue order, appending failures to `errors`.
/// A failed commit never stops the ones after it. Returns the number that succeeded.
pub fn run_commits(
    pending: Vec<PendingResult>,
    errors: &mut Vec<WalkError>,
    on_commit: Option<&OnCommitFn<'_>>,
) -> usize {
    let total = pending.len();
    let mut committed = 0_usize;
    for result in pending {
        match result {
            PendingResult::Commit { path, action } => match action() {
                Ok(()) => committed += 1,
                Err(source) => {
                    let err = WalkError::CommitFailed { path, source };
                    warn!("{}", err);
                    errors.push(err);
                }
            },
            PendingResult::Failed(err) => {
                warn!("{}", err);
                errors.push(err);
            }
        }
        if let Some(f) = on_commit {
            f(1);
        }
    }
    debug!("commit phase done: {}/{} committed", committed, total);
    committed
}
