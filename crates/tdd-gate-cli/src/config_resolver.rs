//! Finds the `tdd-gate.toml` that applies to a project and loads it.
//!
//! A `--config` path always wins. Otherwise the project directory is searched
//! for `tdd-gate.toml` then `.tdd-gate.toml`, and finally the user-wide
//! `config.toml` under [`global_config_dir`]. With none of these, the built-in
//! defaults apply.
//!
//! A relative `[gate] root` in a project or `--config` file is anchored at
//! the file's own directory, so the gate evaluates the same tree whatever
//! directory the command runs from. The user-wide file is shared by every
//! project, so its relative root stays relative to the working directory.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tdd_gate::GateConfig;

/// File names searched for in the project directory, in order.
pub const PROJECT_CONFIG_NAMES: &[&str] = &["tdd-gate.toml", ".tdd-gate.toml"];

const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// How a config file was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// `--config` / `$TDD_GATE_CONFIG`.
    Flag,
    /// The project directory.
    Project,
    /// The user-wide config directory.
    Global,
}

/// A config file chosen for this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    /// How the file was found.
    pub origin: Origin,
    /// Path to the file.
    pub path: PathBuf,
}

impl ConfigFile {
    fn new(origin: Origin, path: PathBuf) -> Self {
        Self { origin, path }
    }

    /// Reads the file, anchoring a relative root where the origin calls for it.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or is not a valid gate config.
    pub fn load(&self) -> Result<GateConfig> {
        let mut config = GateConfig::from_file(&self.path)
            .with_context(|| format!("Failed to load config: {}", self.path.display()))?;

        if self.origin == Origin::Global {
            tracing::info!("Using global config: {}", self.path.display());
        } else if config.gate.root.is_relative() {
            let base = self
                .path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            config.gate.root = base.join(&config.gate.root);
        }

        tracing::debug!(
            "Loaded {:?} config {} (root {})",
            self.origin,
            self.path.display(),
            config.gate.root.display()
        );
        Ok(config)
    }
}

/// Picks the config file for `project_dir`, if there is one.
#[must_use]
pub fn locate(project_dir: &Path, flag: Option<&Path>) -> Option<ConfigFile> {
    locate_with(project_dir, flag, global_config_dir().as_deref())
}

/// Loads the applicable config, or the defaults when no file exists.
///
/// # Errors
///
/// See [`ConfigFile::load`].
pub fn load(project_dir: &Path, flag: Option<&Path>) -> Result<GateConfig> {
    locate(project_dir, flag).map_or_else(|| Ok(GateConfig::default()), |file| file.load())
}

fn locate_with(
    project_dir: &Path,
    flag: Option<&Path>,
    global_dir: Option<&Path>,
) -> Option<ConfigFile> {
    if let Some(path) = flag {
        return Some(ConfigFile::new(Origin::Flag, path.to_path_buf()));
    }

    let in_project = PROJECT_CONFIG_NAMES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|path| path.is_file())
        .map(|path| ConfigFile::new(Origin::Project, path));
    if in_project.is_some() {
        return in_project;
    }

    global_dir
        .map(|dir| dir.join(GLOBAL_CONFIG_NAME))
        .filter(|path| path.is_file())
        .map(|path| ConfigFile::new(Origin::Global, path))
}

/// The user-wide config directory: `$TDD_GATE_CONFIG_DIR`, else
/// `~/.tdd-gate`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    match std::env::var_os("TDD_GATE_CONFIG_DIR") {
        Some(dir) => Some(PathBuf::from(dir)),
        None => home::home_dir().map(|home| home.join(".tdd-gate")),
    }
}
