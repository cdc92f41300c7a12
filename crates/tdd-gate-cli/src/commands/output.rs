//! Shared output formatting for gate decisions.

use anyhow::Result;
use serde::Serialize;
use std::path::Path;
use tdd_gate::Decision;

use crate::OutputFormat;

#[derive(Serialize)]
struct Outcome<'a> {
    operation: &'a str,
    path: &'a Path,
    #[serde(flatten)]
    decision: &'a Decision,
}

/// Prints a decision for `operation` on `path` to stdout.
pub fn print(operation: &str, path: &Path, decision: &Decision, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", render_text(operation, path, decision)),
        OutputFormat::Json => println!("{}", render_json(operation, path, decision)?),
    }
    Ok(())
}

/// `OK: <op> on <path>` when allowed, followed by any advisory; otherwise the
/// rendered violation.
fn render_text(operation: &str, path: &Path, decision: &Decision) -> String {
    let mut out = String::new();
    if decision.allowed {
        out.push_str(&format!("OK: {operation} on {}\n", path.display()));
    }
    if let Some(violation) = &decision.violation {
        out.push_str(&violation.to_string());
    }
    out
}

fn render_json(operation: &str, path: &Path, decision: &Decision) -> Result<String> {
    let outcome = Outcome {
        operation,
        path,
        decision,
    };
    Ok(serde_json::to_string_pretty(&outcome)?)
}
