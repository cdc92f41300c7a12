//! Check command implementation.

use anyhow::Result;
use std::path::Path;
use std::process::ExitCode;
use tdd_gate::Operation;

use super::{build_gate, load_config, GateArgs};
use crate::OutputFormat;

/// Runs the check command.
///
/// Exits 0 when the operation is allowed and 1 when it is blocked.
pub fn run(
    operation: &str,
    path: &Path,
    args: &GateArgs,
    format: OutputFormat,
    config_path: Option<&Path>,
) -> Result<ExitCode> {
    let operation: Operation = operation.parse()?;
    let config = load_config(args, config_path)?;
    let (engine, ctx) = build_gate(&config)?;

    let decision = engine.validate(operation, path, &ctx)?;
    super::output::print(operation.as_str(), path, &decision, format)?;

    if decision.allowed {
        Ok(ExitCode::SUCCESS)
    } else {
        tracing::info!("Blocked {} on {}", operation, path.display());
        Ok(ExitCode::from(1))
    }
}
