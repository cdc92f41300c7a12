//! Refactor command implementation.

use anyhow::Result;
use std::path::Path;
use std::process::ExitCode;

use super::{build_gate, load_config, GateArgs};
use crate::OutputFormat;

/// Runs the refactor command. The advisory never changes the exit code.
pub fn run(
    path: &Path,
    tests_run: bool,
    args: &GateArgs,
    format: OutputFormat,
    config_path: Option<&Path>,
) -> Result<ExitCode> {
    let config = load_config(args, config_path)?;
    let (engine, ctx) = build_gate(&config)?;

    let decision = engine.validate_refactor(path, tests_run, &ctx)?;
    super::output::print("refactor", path, &decision, format)?;

    Ok(ExitCode::SUCCESS)
}
