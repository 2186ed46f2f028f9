//! CLI command handler: list matched files by default; copy them when --output is given.

use anyhow::{Context, Result};
use log::{debug, info};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::engine::arg_parser::Cli;
use crate::engine::progress::{create_counter, finish_progress_bar, update_progress_bar};
use crate::engine::report::write_failures;
use crate::engine::tools::absolutize;
use crate::utils::{apply_file_to_opts, load_deferwalk_toml, setup_logging};
use crate::{CommitAction, FileOptions, Opts, WalkOutcome, WalkRequest, walk};

/// Merge `.deferwalk.toml` (if any) and CLI flags into Opts; flags win.
fn setup_opts(cli: &Cli) -> Opts {
    let mut opts = Opts::default();
    let config_dir = if cli.dir.is_file() {
        cli.dir.parent().map(Path::to_path_buf).unwrap_or_default()
    } else {
        cli.dir.clone()
    };
    if let Some(file) = load_deferwalk_toml(&config_dir) {
        apply_file_to_opts(&file, &config_dir, &mut opts);
    }
    if cli.output.is_some() {
        opts.output = cli.output.clone();
    }
    if !cli.exclude.is_empty() {
        opts.exclude = cli.exclude.clone();
    }
    if !cli.extensions.is_empty() {
        opts.extensions = cli.extensions.clone();
    }
    opts.follow_links = cli.follow_links.unwrap_or(opts.follow_links);
    opts.serial = cli.serial.unwrap_or(opts.serial);
    opts.skip_dotfiles = cli.skip_dotfiles.unwrap_or(opts.skip_dotfiles);
    opts.verbose = cli.verbose.unwrap_or(opts.verbose);
    opts.json = cli.json;
    opts
}

/// List mode: check the file opens now, print its path at commit time.
fn list_process(input: &Path, _output: &Path) -> Result<CommitAction> {
    File::open(input).with_context(|| format!("open {}", input.display()))?;
    let path = input.to_path_buf();
    Ok(Box::new(move || {
        writeln!(io::stdout().lock(), "{}", path.display()).context("write to stdout")
    }))
}

/// Copy mode: read during the walk, write (creating parents) at commit time.
fn copy_process(input: &Path, output: &Path) -> Result<CommitAction> {
    let bytes = fs::read(input).with_context(|| format!("read {}", input.display()))?;
    let output = output.to_path_buf();
    Ok(Box::new(move || write_output(&output, &bytes)))
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create output directory {}", parent.display()))?;
    }
    fs::write(path, bytes).with_context(|| format!("write {}", path.display()))
}

/// Output root for copy mode. A single input file copied into an existing directory keeps its name.
fn resolve_output_root(dir: &Path, output: &Path) -> PathBuf {
    if dir.is_file()
        && output.is_dir()
        && let Some(name) = dir.file_name()
    {
        return output.join(name);
    }
    output.to_path_buf()
}

/// Run the walk described by `cli`. Returns the outcome after failures have been reported;
/// the caller decides the exit status.
pub fn handle_run(cli: &Cli) -> Result<WalkOutcome> {
    let opts = setup_opts(cli);
    setup_logging(opts.verbose);
    debug!("{} CONFIG:{:#?}", env!("CARGO_PKG_NAME").to_uppercase(), opts);

    let copy_mode = opts.output.is_some();
    let process: &crate::ProcessFn<'_> = if copy_mode {
        &copy_process
    } else {
        &list_process
    };

    let mut request = WalkRequest::new(&cli.dir, process);
    request.options = FileOptions::from(&opts);
    request.excluded = opts.exclude.clone();
    // Listing prints in commit order, keep it reproducible
    request.concurrent = copy_mode && !opts.serial;
    if let Some(output) = &opts.output {
        let output_root = resolve_output_root(&cli.dir, output);
        // Outputs written into the walked tree must not be picked up by the next run
        if absolutize(&output_root).starts_with(absolutize(&cli.dir)) {
            request.excluded.push(output_root.clone());
        }
        request.output_root = Some(output_root);
    }

    let bar = (opts.verbose && copy_mode).then(|| create_counter("Committing"));
    let on_commit = bar.as_ref().map(|bar| {
        let bar = bar.clone();
        move |n: usize| update_progress_bar(&bar, n)
    });
    request.on_commit = on_commit.as_ref().map(|f| f as &crate::OnCommitFn<'_>);

    let outcome = walk(request);
    if let Some(bar) = &bar {
        finish_progress_bar(bar);
    }

    if opts.json {
        write_failures(&mut io::stdout().lock(), &outcome, true)?;
    } else {
        write_failures(&mut io::stderr().lock(), &outcome, false)?;
    }
    info!(
        "{} matched, {} committed, {} failures",
        outcome.matched,
        outcome.committed,
        outcome.errors.len()
    );
    Ok(outcome)
}
