//! Deferwalk CLI: list matched files, or copy them under --output.

use anyhow::Result;
use clap::Parser;
use deferwalk::engine::arg_parser::Cli;
use deferwalk::engine::handle_run;
use std::process::ExitCode;
use std::time::Instant;

fn main() -> Result<ExitCode> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    let outcome = handle_run(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
