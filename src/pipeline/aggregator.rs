//! Result aggregation: every task reports over one channel; the walking thread drains it only
//! after the join barrier.

use crossbeam_channel::{Receiver, Sender, unbounded};
use log::warn;
use std::path::PathBuf;

use crate::CommitAction;
use crate::error::WalkError;

/// What `process` left behind for one matched file, in the order it was queued.
pub enum PendingResult {
    Commit { path: PathBuf, action: CommitAction },
    /// `process` failed; stands in for a commit that always fails.
    Failed(WalkError),
}

/// One message from a walk task.
pub enum WalkItem {
    /// Stat, listing, ignore-file, or symlink failure found during discovery.
    Discovery(WalkError),
    Pending(PendingResult),
}

/// Everything reported during discovery, split by kind, each in arrival order.
#[derive(Default)]
pub struct Collected {
    pub errors: Vec<WalkError>,
    pub pending: Vec<PendingResult>,
}

/// Single serialization point for walk results. Tasks get a [`Sender`] via [`Self::sender`];
/// [`Self::finish`] must only be called once every task has returned.
pub struct Aggregator {
    tx: Sender<WalkItem>,
    rx: Receiver<WalkItem>,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl Aggregator {
    pub fn new() -> Self {
        // Unbounded: producers never block, the consumer only runs after the join.
        let (tx, rx) = unbounded::<WalkItem>();
        Self { tx, rx }
    }

    pub fn sender(&self) -> Sender<WalkItem> {
        self.tx.clone()
    }

    /// Drain everything sent so far. Non-blocking: relies on the caller having joined all producers.
    pub fn finish(self) -> Collected {
        let Aggregator { tx, rx } = self;
        drop(tx);
        let mut collected = Collected::default();
        for item in rx.try_iter() {
            match item {
                WalkItem::Discovery(err) => {
                    warn!("{}", err);
                    collected.errors.push(err);
                }
                WalkItem::Pending(p) => collected.pending.push(p),
            }
        }
        collected
    }
}
