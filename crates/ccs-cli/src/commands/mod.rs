//! CLI command handlers
//!
//! Profile commands, project commands, and the web UI server each live in
//! their own module.

pub mod profile;
pub mod project;
pub mod ui;

use std::process::Command;

use anyhow::{bail, Context, Result};

/// Build a command from a string like `code -w`, appending `arg`
fn command_line(line: &str, arg: &str) -> Result<Command> {
    let mut parts = line.split_whitespace();
    let program = parts
        .next()
        .with_context(|| format!("Empty command: '{line}'"))?;
    let mut command = Command::new(program);
    command.args(parts).arg(arg);
    Ok(command)
}

/// Run a command to completion, failing on a non-zero exit status
fn run_to_completion(mut command: Command, what: &str) -> Result<()> {
    let status = command
        .status()
        .with_context(|| format!("Failed to start {what}"))?;
    if !status.success() {
        bail!("{what} exited with {status}");
    }
    Ok(())
}
