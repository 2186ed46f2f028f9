//! The tree walk: classify each entry, apply exclusions, expand directories, follow or skip
//! symlinks, and hand matched files to `process`.
//!
//! Concurrent walks fan each directory entry out as a task on a [`rayon::Scope`]; the scope is
//! the join barrier. Serial walks recurse on the calling thread. Both report through the same
//! channel, so nothing here touches shared mutable state directly.

use log::trace;
use rayon::Scope;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::EntryClassification;
use crate::engine::classify::{classify, io_failure, resolve_symlink};
use crate::engine::tools::{
    has_supported_extension, is_hidden_name, is_os_hidden_file, map_output_path,
};
use crate::error::{Unsupported, WalkError};

use super::aggregator::{PendingResult, WalkItem};
use super::context::{WalkContext, WalkNode};

fn report(ctx: &WalkContext<'_>, item: WalkItem) {
    // The aggregator owns the receiver until after the join, so this cannot fail
    let _ = ctx.sink.send(item);
}

fn report_discovery(ctx: &WalkContext<'_>, err: WalkError) {
    report(ctx, WalkItem::Discovery(err));
}

/// Visit one entry. With `scope` set, child entries are spawned onto it; otherwise they are
/// visited inline. Never fails: every problem is reported and ends only this branch.
pub fn visit<'s, 'a: 's>(
    ctx: &'s WalkContext<'a>,
    node: WalkNode,
    scope: Option<&Scope<'s>>,
) {
    if node.is_excluded() {
        trace!("excluded: {}", node.logical.display());
        return;
    }
    match classify(&node.physical) {
        EntryClassification::RegularFile => {
            if has_supported_extension(&node.physical, &ctx.options.supported_extensions) {
                process_file(ctx, &node);
            } else {
                trace!("skipped (extension): {}", node.physical.display());
            }
        }
        EntryClassification::Directory => expand_dir(ctx, node, scope),
        EntryClassification::SymlinkOrAlias if ctx.options.follow_symlinks => {
            follow_symlink(ctx, node, scope)
        }
        EntryClassification::SymlinkOrAlias => report_discovery(
            ctx,
            WalkError::UnsupportedType {
                path: node.physical,
                reason: Unsupported::Symlink,
            },
        ),
        EntryClassification::Special => {
            trace!("skipped (special file): {}", node.physical.display());
        }
        EntryClassification::Missing => report_discovery(
            ctx,
            WalkError::NotFound {
                path: node.physical,
            },
        ),
        EntryClassification::Unreadable(source) => report_discovery(
            ctx,
            WalkError::Unreadable {
                path: node.physical,
                source,
            },
        ),
    }
}

/// Run `process` for a matched file and queue what it returns.
fn process_file(ctx: &WalkContext<'_>, node: &WalkNode) {
    let output = map_output_path(&ctx.root, ctx.output_root.as_deref(), &node.logical);
    let pending = match (ctx.process)(&node.physical, &output) {
        Ok(action) => PendingResult::Commit {
            path: node.physical.clone(),
            action,
        },
        Err(source) => PendingResult::Failed(WalkError::ProcessFailed {
            path: node.physical.clone(),
            source,
        }),
    };
    report(ctx, WalkItem::Pending(pending));
}

/// Resolve a symlink and visit its target under the link's logical path.
fn follow_symlink<'s, 'a: 's>(
    ctx: &'s WalkContext<'a>,
    node: WalkNode,
    scope: Option<&Scope<'s>>,
) {
    let target = match resolve_symlink(&node.physical) {
        Ok(t) => t,
        Err(e) => return report_discovery(ctx, io_failure(&node.physical, e)),
    };
    if node.ancestors.iter().any(|a| a == &target) {
        return report_discovery(
            ctx,
            WalkError::SymlinkLoop {
                path: node.physical,
                target,
            },
        );
    }
    trace!("following {} -> {}", node.physical.display(), target.display());
    visit(ctx, node.retarget(target), scope);
}

/// Pick up ignore-file additions, list the directory, and visit or spawn each child.
fn expand_dir<'s, 'a: 's>(
    ctx: &'s WalkContext<'a>,
    node: WalkNode,
    scope: Option<&Scope<'s>>,
) {
    // An unlistable directory says nothing about its ignore file
    let entries = match fs::read_dir(&node.physical) {
        Ok(rd) => rd,
        Err(source) => {
            return report_discovery(
                ctx,
                WalkError::DirectoryListingFailed {
                    path: node.physical,
                    source,
                },
            );
        }
    };

    let exclusions = match ctx.ignore.additions(&node.physical) {
        Ok(additions) => node.exclusions.extended(additions),
        Err(source) => {
            report_discovery(
                ctx,
                WalkError::IgnoreFileParseFailed {
                    path: node.physical.clone(),
                    source,
                },
            );
            node.exclusions.clone()
        }
    };

    let ancestors = if ctx.options.follow_symlinks {
        let mut v = Vec::with_capacity(node.ancestors.len() + 1);
        v.extend(node.ancestors.iter().cloned());
        v.push(node.physical.clone());
        Arc::new(v)
    } else {
        Arc::clone(&node.ancestors)
    };

    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(source) => {
                report_discovery(
                    ctx,
                    WalkError::DirectoryListingFailed {
                        path: node.physical.clone(),
                        source,
                    },
                );
                continue;
            }
        };
        let name = entry.file_name();
        if is_skipped_name(ctx, &name.to_string_lossy()) {
            continue;
        }
        let child = node.child(&name, &exclusions, &ancestors);
        match scope {
            Some(s) => s.spawn(move |s| visit(ctx, child, Some(s))),
            None => visit(ctx, child, None),
        }
    }
}

/// OS clutter is always skipped; other dotfiles only when `skip_dotfiles` is set.
fn is_skipped_name(ctx: &WalkContext<'_>, name: &str) -> bool {
    if ctx.options.skip_dotfiles {
        is_hidden_name(name)
    } else {
        is_os_hidden_file(name)
    }
}

/// Whether the walk can start at `root`, and from which physical path.
///
/// Ok(None) means the root itself is excluded (nothing to do). Errors are root-level failures
/// reported before any task is spawned.
pub fn validate_root(
    ctx: &WalkContext<'_>,
    node: &WalkNode,
) -> Result<Option<PathBuf>, WalkError> {
    if node.is_excluded() {
        return Ok(None);
    }
    let root = node.physical.as_path();
    let physical = match classify(root) {
        EntryClassification::SymlinkOrAlias if ctx.options.follow_symlinks => {
            resolve_symlink(root).map_err(|e| io_failure(root, e))?
        }
        EntryClassification::SymlinkOrAlias => {
            return Err(unsupported(root, Unsupported::Symlink));
        }
        EntryClassification::Missing => {
            return Err(WalkError::NotFound {
                path: root.to_path_buf(),
            });
        }
        EntryClassification::Unreadable(source) => {
            return Err(WalkError::Unreadable {
                path: root.to_path_buf(),
                source,
            });
        }
        EntryClassification::Special => return Err(unsupported(root, Unsupported::Special)),
        // Canonical from the start so the loop guard compares like with like
        EntryClassification::RegularFile | EntryClassification::Directory
            if ctx.options.follow_symlinks =>
        {
            resolve_symlink(root).map_err(|e| io_failure(root, e))?
        }
        EntryClassification::RegularFile | EntryClassification::Directory => root.to_path_buf(),
    };
    // The resolved target of a root symlink gets the same checks
    match classify(&physical) {
        EntryClassification::Directory => Ok(Some(physical)),
        EntryClassification::RegularFile => {
            if has_supported_extension(&physical, &ctx.options.supported_extensions) {
                Ok(Some(physical))
            } else {
                Err(unsupported(&physical, Unsupported::Extension))
            }
        }
        EntryClassification::Missing => Err(WalkError::NotFound { path: physical }),
        EntryClassification::Unreadable(source) => Err(WalkError::Unreadable {
            path: physical,
            source,
        }),
        EntryClassification::SymlinkOrAlias | EntryClassification::Special => {
            Err(unsupported(&physical, Unsupported::Special))
        }
    }
}

fn unsupported(path: &Path, reason: Unsupported) -> WalkError {
    WalkError::UnsupportedType {
        path: path.to_path_buf(),
        reason,
    }
}
