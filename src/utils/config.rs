//! Application configuration constants.
//! Names and worker limits in one place.

use std::sync::OnceLock;

use crate::utils::fd_limit::max_workers_by_fd_limit;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived file names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    pkg_name: &'static str,
    ignore_filename: String,
    config_filename: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                pkg_name: pkg,
                ignore_filename: format!(".{pkg}-ignore"),
                config_filename: format!(".{pkg}.toml"),
            }
        })
    }

    pub fn pkg_name(&self) -> &str {
        self.pkg_name
    }

    /// Per-directory ignore file (e.g. `.deferwalk-ignore`).
    pub fn ignore_filename(&self) -> &str {
        &self.ignore_filename
    }

    /// CLI settings file looked up in the walked directory (e.g. `.deferwalk.toml`).
    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }
}

// ---- Worker threads ----

/// Thread limits for the concurrent walk pool.
/// Use [`WorkerThreadLimits::current()`] to fill `all_threads` from rayon; the rest are const.
#[derive(Clone, Copy, Debug)]
pub struct WorkerThreadLimits {
    /// Available threads (from rayon); set by [`WorkerThreadLimits::current()`].
    pub all_threads: usize,
    /// Never go below this, even under a tight FD limit.
    pub floor: usize,
    /// Upper bound regardless of core count; the walk is I/O bound past this.
    pub max: usize,
}

impl Default for WorkerThreadLimits {
    fn default() -> Self {
        Self {
            all_threads: 0, // use current() to set from rayon
            floor: Self::FLOOR_THREADS,
            max: Self::MAX_THREADS,
        }
    }
}

impl WorkerThreadLimits {
    pub const FLOOR_THREADS: usize = 1;
    pub const MAX_THREADS: usize = 64;

    /// Build limits with `all_threads` set from `rayon::current_num_threads()`.
    pub fn current() -> Self {
        Self {
            all_threads: rayon::current_num_threads(),
            ..Self::default()
        }
    }

    /// Worker count for a walk: the override when given, else available threads;
    /// capped by the FD limit and clamped to `floor..=max`.
    pub fn threads_for_walk(&self, requested: Option<usize>) -> usize {
        let wanted = requested.unwrap_or(self.all_threads);
        let capped = match max_workers_by_fd_limit() {
            Some(fd_cap) if fd_cap < wanted => {
                log::debug!("Capping threads {} -> {} (FD limit ~80%)", wanted, fd_cap);
                fd_cap
            }
            _ => wanted,
        };
        capped.clamp(self.floor, self.max)
    }
}
