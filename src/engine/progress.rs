//! Progress bar utilities for the commit phase

use kdam::{Animation, Bar, BarExt};
use std::sync::{Arc, Mutex};

/// Create a counter for unknown total (shows count without percentage). The number of commits
/// is only known once the walk has joined, so the CLI never has a total up front.
pub fn create_counter(desc: &'static str) -> Arc<Mutex<Bar>> {
    Arc::new(Mutex::new(kdam::tqdm!(
        total = 0,
        desc = desc,
        animation = Animation::Classic,
        position = 0,
        unit = " files"
    )))
}

/// Update progress bar if available. Uses try_lock so a contended bar never blocks the caller.
pub fn update_progress_bar(pb: &Arc<Mutex<Bar>>, n: usize) {
    if let Ok(mut pb) = pb.try_lock() {
        let _ = pb.update(n);
    }
}

/// Final redraw and newline so following output starts on a clean line.
pub fn finish_progress_bar(pb: &Arc<Mutex<Bar>>) {
    if let Ok(mut pb) = pb.lock() {
        let _ = pb.refresh();
        eprintln!();
    }
}
