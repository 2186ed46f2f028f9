use log::{debug, warn};
use std::time::Instant;

use crate::engine::exclusion::ExclusionSet;
use crate::engine::parallel::{build_walk_pool, parallel_walk_handler};
use crate::engine::tools::absolutize;
use crate::utils::config::WorkerThreadLimits;
use crate::{WalkOutcome, WalkRequest};

use super::aggregator::Aggregator;
use super::commit::run_commits;
use super::context::{WalkContext, WalkNode};
use super::walk::{validate_root, visit};

/// Main orchestrator: validate the root, walk (concurrently or not), join, then commit.
///
/// Root → (pool scope | inline) visits → channel → join → drain → serial commits.
pub fn run_walk(request: WalkRequest<'_>) -> WalkOutcome {
    let start = Instant::now();
    let WalkRequest {
        root,
        excluded,
        output_root,
        options,
        concurrent,
        process,
        ignore,
        on_commit,
    } = request;

    let root = absolutize(&root);
    let exclusions = ExclusionSet::new(excluded.iter().map(|p| absolutize(p)));
    let aggregator = Aggregator::new();
    let ctx = WalkContext {
        root: root.clone(),
        output_root: output_root.as_deref().map(absolutize),
        options,
        process,
        ignore,
        sink: aggregator.sender(),
    };

    let root_node = WalkNode::root(root.clone(), root, exclusions);
    let root_node = match validate_root(&ctx, &root_node) {
        Ok(Some(physical)) => root_node.retarget(physical),
        Ok(None) => {
            debug!("root {} is excluded, nothing to walk", ctx.root.display());
            return WalkOutcome::default();
        }
        Err(err) => {
            warn!("{}", err);
            return WalkOutcome::root_failure(err);
        }
    };

    parallel_walk_handler(concurrent);
    if concurrent {
        let threads = WorkerThreadLimits::current().threads_for_walk(ctx.options.num_threads);
        debug!("Walk pool: {} threads", threads);
        match build_walk_pool(threads) {
            Ok(pool) => pool.scope(|s| visit(&ctx, root_node, Some(s))),
            Err(e) => {
                warn!("could not build walk pool ({}), using the global pool", e);
                rayon::scope(|s| visit(&ctx, root_node, Some(s)));
            }
        }
    } else {
        visit(&ctx, root_node, None);
    }
    // Every task has returned: the scope above is the join barrier.
    drop(ctx);

    let collected = aggregator.finish();
    let mut errors = collected.errors;
    let matched = collected.pending.len();
    debug!(
        "discovery done in {:?}: {} matched, {} discovery failures",
        start.elapsed(),
        matched,
        errors.len()
    );

    let committed = run_commits(collected.pending, &mut errors, on_commit);
    if !errors.is_empty() {
        warn!("{} failures recorded", errors.len());
    }
    WalkOutcome {
        errors,
        matched,
        committed,
    }
}
