//! tdd-gate CLI tool.
//!
//! Usage:
//! ```bash
//! tdd-gate check <write|edit|delete> <PATH> [OPTIONS]
//! tdd-gate refactor <PATH> [--tests-run]
//! tdd-gate list-rules
//! tdd-gate list-languages
//! tdd-gate init
//! ```
//!
//! Exit codes: 0 allowed, 1 blocked by a rule, 2 the gate could not decide
//! (bad input or configuration).

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tdd_gate::GateError;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

use commands::GateArgs;

/// Test-first gate for file writes, edits and deletes
#[derive(Parser)]
#[command(name = "tdd-gate")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "TDD_GATE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a file operation is allowed
    Check {
        /// Operation: write, edit or delete
        operation: String,

        /// File the operation targets (relative to the project root, or absolute)
        path: PathBuf,

        #[command(flatten)]
        gate: GateFlags,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Report a refactor; advises when tests were not run
    Refactor {
        /// File being refactored
        path: PathBuf,

        /// Tests were run after the refactor
        #[arg(long)]
        tests_run: bool,

        #[command(flatten)]
        gate: GateFlags,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// List available rules
    ListRules,

    /// List configured languages and their test conventions
    ListLanguages {
        /// Project root used to find the config file
        #[arg(long)]
        root: Option<PathBuf>,
    },

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args)]
struct GateFlags {
    /// Project root (default: `[gate] root`, else current directory)
    #[arg(long, env = "TDD_GATE_ROOT")]
    root: Option<PathBuf>,

    /// Treat a missing test as an error instead of a warning
    #[arg(long, env = "TDD_GATE_STRICT")]
    strict: bool,

    /// Skip pattern; replaces the default list (can be specified multiple times)
    #[arg(long)]
    skip: Vec<String>,
}

impl From<GateFlags> for GateArgs {
    fn from(flags: GateFlags) -> Self {
        Self {
            root: flags.root,
            strict: flags.strict,
            skip: flags.skip,
        }
    }
}

/// Output format for gate decisions.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(code) => code,
        Err(err) => report(err),
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Check {
            operation,
            path,
            gate,
            format,
        } => commands::check::run(&operation, &path, &gate.into(), format, config_path),
        Commands::Refactor {
            path,
            tests_run,
            gate,
            format,
        } => commands::refactor::run(&path, tests_run, &gate.into(), format, config_path),
        Commands::ListRules => {
            commands::list_rules::run();
            Ok(ExitCode::SUCCESS)
        }
        Commands::ListLanguages { root } => {
            let args = GateArgs {
                root,
                ..GateArgs::default()
            };
            let config = commands::load_config(&args, config_path)?;
            commands::list_languages::run(&config)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Init { force } => {
            commands::init::run(force)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Renders a failure to stderr. Gate errors get the full diagnostic.
fn report(err: anyhow::Error) -> ExitCode {
    match err.downcast::<GateError>() {
        Ok(gate) => eprintln!("{:?}", miette::Report::new(gate)),
        Err(other) => eprintln!("Error: {other:?}"),
    }
    ExitCode::from(2)
}
