//! Subcommand implementations.

pub mod check;
pub mod init;
pub mod list_languages;
pub mod list_rules;
pub mod output;
pub mod refactor;

use anyhow::Result;
use std::path::{Path, PathBuf};
use tdd_gate::{GateConfig, RuleEngine, ValidationContext};

use crate::config_resolver;

/// Flags shared by the commands that evaluate a file.
#[derive(Debug, Default)]
pub struct GateArgs {
    /// `--root`; overrides `[gate] root`.
    pub root: Option<PathBuf>,
    /// `--strict`; ORed with `[gate] strict`.
    pub strict: bool,
    /// `--skip`; when non-empty, replaces `[gate] skip`.
    pub skip: Vec<String>,
}

/// Loads the configuration for `args.root` (or the current directory).
pub fn load_config(args: &GateArgs, config_path: Option<&Path>) -> Result<GateConfig> {
    let project_dir = args.root.as_deref().unwrap_or_else(|| Path::new("."));
    let mut config = config_resolver::load(project_dir, config_path)?;

    if let Some(root) = &args.root {
        config.gate.root.clone_from(root);
    }
    config.gate.strict |= args.strict;
    if !args.skip.is_empty() {
        config.gate.skip = Some(args.skip.clone());
    }
    Ok(config)
}

/// Builds the engine and context from merged configuration.
///
/// Errors here are [`tdd_gate::GateError`]s, left unwrapped so `main` can
/// render them as diagnostics.
pub fn build_gate(config: &GateConfig) -> Result<(RuleEngine, ValidationContext)> {
    let engine = RuleEngine::builder().registry(config.registry()?).build();
    let ctx = ValidationContext::from_config(config)?;
    tracing::debug!(
        "root={} strict={} languages={}",
        ctx.root().display(),
        ctx.is_strict(),
        engine.registry().len()
    );
    Ok((engine, ctx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn flags_override_project_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("tdd-gate.toml"),
            "[gate]\nskip = [\"**/*.md\"]\n",
        )
        .unwrap();

        let args = GateArgs {
            root: Some(tmp.path().to_path_buf()),
            strict: true,
            skip: vec!["**/gen/**".to_string()],
        };
        let config = load_config(&args, None).unwrap();

        assert_eq!(config.gate.root, tmp.path());
        assert!(config.gate.strict);
        assert_eq!(config.gate.skip, Some(vec!["**/gen/**".to_string()]));
    }

    #[test]
    fn file_skip_list_kept_without_flags() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("tdd-gate.toml"),
            "[gate]\nstrict = true\nskip = [\"**/*.md\"]\n",
        )
        .unwrap();

        let args = GateArgs {
            root: Some(tmp.path().to_path_buf()),
            ..GateArgs::default()
        };
        let config = load_config(&args, None).unwrap();

        assert!(config.gate.strict);
        assert_eq!(config.gate.skip, Some(vec!["**/*.md".to_string()]));
    }

    #[test]
    fn config_root_followed_from_another_directory() {
        let project = TempDir::new().unwrap();
        fs::create_dir(project.path().join("app")).unwrap();
        let config_path = project.path().join("tdd-gate.toml");
        fs::write(&config_path, "[gate]\nroot = \"app\"\n").unwrap();

        let config = load_config(&GateArgs::default(), Some(&config_path)).unwrap();
        let (_, ctx) = build_gate(&config).unwrap();

        assert_eq!(ctx.root(), project.path().join("app"));
    }

    #[test]
    fn build_gate_rejects_bad_skip_glob() {
        let tmp = TempDir::new().unwrap();
        let mut config = GateConfig::default();
        config.gate.root = tmp.path().to_path_buf();
        config.gate.skip = Some(vec!["[".to_string()]);

        let Err(err) = build_gate(&config) else {
            panic!("expected a skip-pattern error");
        };
        assert!(err.downcast_ref::<tdd_gate::GateError>().is_some());
    }
}
