//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# tdd-gate configuration

[gate]
# Project root (default: current directory)
# root = "."

# Block source writes without tests (error) instead of warning
strict = false

# Glob patterns the gate ignores. Setting this replaces the built-in list:
#   **/*.md, **/*.json, **/*.yaml, **/*.yml, **/config/**, **/migrations/**,
#   **/fixtures/**, **/mock*/**, **/node_modules/**, **/.venv/**, **/venv/**,
#   **/__pycache__/**
# skip = ["**/*.md", "**/generated/**"]

# Add a language, or replace a built-in one with the same id.
# [[languages]]
# id = "kotlin"
# test_patterns = ["*Test.kt"]
# source_patterns = ["*.kt"]
# test_dir = "src/test/kotlin"
"#;

/// Runs the init command in the current directory.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new("tdd-gate.toml"), force)?;

    println!("Created tdd-gate.toml");
    println!("\nNext steps:");
    println!("  1. Edit tdd-gate.toml to set strict mode and skip patterns");
    println!("  2. Run: tdd-gate check write <PATH>");

    Ok(())
}

fn write_config(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tdd_gate::GateConfig;
    use tempfile::TempDir;

    #[test]
    fn default_config_parses() {
        let config = GateConfig::parse(DEFAULT_CONFIG).unwrap();
        assert!(!config.gate.strict);
        assert!(config.gate.skip.is_none());
        assert!(config.languages.is_empty());
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tdd-gate.toml");
        std::fs::write(&path, "# mine").unwrap();

        assert!(write_config(&path, false).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine");

        write_config(&path, true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    }
}
