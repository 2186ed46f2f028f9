//! Pipeline components: walk context, tree walk, result aggregation, commit phase.

pub mod aggregator;
pub mod commit;
pub mod context;
pub mod orchestrator;
pub mod walk;

pub use aggregator::{Aggregator, Collected, PendingResult, WalkItem};
pub use commit::run_commits;
pub use context::{WalkContext, WalkNode};
pub use orchestrator::run_walk;
pub use walk::{validate_root, visit};
