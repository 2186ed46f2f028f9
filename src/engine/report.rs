//! Failure reporting for the CLI: plain lines or a JSON array.

use colored::Colorize;
use serde::Serialize;
use std::io::{self, Write};

use crate::WalkOutcome;
use crate::error::{ErrorKind, WalkError};

/// One failure as written by `--json`.
#[derive(Debug, Serialize)]
pub struct FailureRecord {
    pub kind: ErrorKind,
    pub path: String,
    pub message: String,
}

impl From<&WalkError> for FailureRecord {
    fn from(err: &WalkError) -> Self {
        FailureRecord {
            kind: err.kind(),
            path: err.path().display().to_string(),
            message: err.to_string(),
        }
    }
}

pub fn failures_to_json(outcome: &WalkOutcome) -> serde_json::Result<String> {
    let records: Vec<FailureRecord> = outcome.errors.iter().map(FailureRecord::from).collect();
    serde_json::to_string_pretty(&records)
}

/// Write failures to `out`, one per line (or as JSON), followed by nothing else.
pub fn write_failures<W: Write>(out: &mut W, outcome: &WalkOutcome, json: bool) -> io::Result<()> {
    if json {
        let s = failures_to_json(outcome).map_err(io::Error::other)?;
        return writeln!(out, "{}", s);
    }
    for err in &outcome.errors {
        writeln!(out, "{} {}", "error:".red().bold(), err)?;
    }
    Ok(())
}
