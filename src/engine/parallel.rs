//! Shared helpers for parallel processing.

use log::debug;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};

pub fn parallel_walk_handler(parallel_walk: bool) {
    if parallel_walk {
        debug!("Walking in parallel");
    } else {
        debug!("Walking serially");
    }
}

/// Dedicated pool for one concurrent walk, so a walk's width never depends on what else shares
/// the global rayon pool.
pub fn build_walk_pool(num_threads: usize) -> Result<ThreadPool, ThreadPoolBuildError> {
    ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .thread_name(|i| format!("{}-walk-{}", env!("CARGO_PKG_NAME"), i))
        .build()
}
