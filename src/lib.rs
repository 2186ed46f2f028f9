//! Deferwalk: concurrent, fault-tolerant directory walker with deferred two-phase side effects.
//!
//! Files under a root are discovered and handed to a caller's `process` step, concurrently when
//! asked to. Each `process` call returns a [`CommitAction`]; commits run one at a time on the
//! calling thread, in queue order, only after the whole walk has joined. Nothing but an invalid
//! root stops a walk: every other failure is collected into the [`WalkOutcome`].

pub mod engine;
pub mod error;
pub mod pipeline;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use error::{ErrorKind, IgnoreFileError, Unsupported, WalkError};
pub use types::*;

pub use engine::exclusion::{ExclusionSet, IgnoreFile, IgnoreSource};

/// Walk `request.root` and run every produced commit. Returns all recorded failures.
///
/// - Root missing, unreadable, a symlink (when not following), or a file with an unsupported
///   extension: returns that single failure without walking.
/// - Anything else that goes wrong is recorded and ends only its own branch.
///
/// ```ignore
/// let process = |input: &Path, output: &Path| -> anyhow::Result<deferwalk::CommitAction> {
///     let bytes = std::fs::read(input)?;
///     let output = output.to_path_buf();
///     Ok(Box::new(move || Ok(std::fs::write(output, bytes)?)))
/// };
/// let mut request = deferwalk::WalkRequest::new("layouts", &process);
/// request.output_root = Some("out".into());
/// let outcome = deferwalk::walk(request);
/// ```
pub fn walk(request: WalkRequest<'_>) -> WalkOutcome {
    log::debug!(
        "{} walk: root={} output={:?} concurrent={} options={:?}",
        env!("CARGO_PKG_NAME").to_uppercase(),
        request.root.display(),
        request.output_root,
        request.concurrent,
        request.options
    );
    pipeline::run_walk(request)
}
