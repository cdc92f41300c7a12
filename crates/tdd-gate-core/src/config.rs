//! Configuration types for tdd-gate.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::GateError;
use crate::language::{LanguageRegistry, LanguageSpec};

/// Top-level configuration, usually loaded from `tdd-gate.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GateConfig {
    /// Gate settings.
    #[serde(default)]
    pub gate: GateSection,

    /// Extra or replacement language definitions.
    #[serde(default)]
    pub languages: Vec<LanguageConfig>,
}

impl GateConfig {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Builds the language registry: built-ins, overridden by `[[languages]]`.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::InvalidLanguagePattern`] if a configured pattern
    /// is not a valid glob.
    pub fn registry(&self) -> Result<LanguageRegistry, GateError> {
        let overrides = self
            .languages
            .iter()
            .map(LanguageConfig::to_spec)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(LanguageRegistry::builtin().override_with(overrides))
    }
}

/// The `[gate]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GateSection {
    /// Project root (default: current directory).
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Escalate missing tests from warning to error.
    #[serde(default)]
    pub strict: bool,

    /// Skip patterns. When set, replaces the default list.
    #[serde(default)]
    pub skip: Option<Vec<String>>,
}

impl Default for GateSection {
    fn default() -> Self {
        Self {
            root: default_root(),
            strict: false,
            skip: None,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

/// A `[[languages]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LanguageConfig {
    /// Language identifier; replaces a built-in language with the same id.
    pub id: String,
    /// Test file name patterns (e.g., `*Test.kt`).
    pub test_patterns: Vec<String>,
    /// Source file name patterns (e.g., `*.kt`).
    pub source_patterns: Vec<String>,
    /// Conventional test directory; empty for co-located tests.
    #[serde(default)]
    pub test_dir: String,
}

impl LanguageConfig {
    /// Compiles this entry into a [`LanguageSpec`].
    ///
    /// # Errors
    ///
    /// Returns [`GateError::InvalidLanguagePattern`] for invalid globs.
    pub fn to_spec(&self) -> Result<LanguageSpec, GateError> {
        LanguageSpec::new(
            self.id.clone(),
            &self.test_patterns,
            &self.source_patterns,
            self.test_dir.clone(),
        )
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GateConfig::default();
        assert_eq!(config.gate.root, PathBuf::from("."));
        assert!(!config.gate.strict);
        assert!(config.gate.skip.is_none());
        assert!(config.languages.is_empty());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[gate]
root = "./app"
strict = true
skip = ["**/generated/**"]

[[languages]]
id = "kotlin"
test_patterns = ["*Test.kt"]
source_patterns = ["*.kt"]
test_dir = "src/test/kotlin"
"#;

        let config = GateConfig::parse(toml).expect("Failed to parse");
        assert_eq!(config.gate.root, PathBuf::from("./app"));
        assert!(config.gate.strict);
        assert_eq!(config.gate.skip, Some(vec!["**/generated/**".to_string()]));

        let registry = config.registry().unwrap();
        let kotlin = registry.get("kotlin").unwrap();
        assert_eq!(kotlin.test_dir(), Some("src/test/kotlin"));
        assert!(registry.get("python").is_some());
    }

    #[test]
    fn test_empty_config_parses() {
        let config = GateConfig::parse("").unwrap();
        assert!(!config.gate.strict);
    }

    #[test]
    fn test_parse_error() {
        let err = GateConfig::parse("[gate]\nstrict = \"yes\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_misplaced_key_rejected() {
        // `skip` belongs under `[gate]`.
        let err = GateConfig::parse("skip = [\"**/*.md\"]\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_misspelled_gate_key_rejected() {
        let err = GateConfig::parse("[gate]\nstrcit = true\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_invalid_language_pattern() {
        let toml = r#"
[[languages]]
id = "broken"
test_patterns = ["[*.x"]
source_patterns = ["*.x"]
"#;
        let config = GateConfig::parse(toml).unwrap();
        assert!(matches!(
            config.registry(),
            Err(GateError::InvalidLanguagePattern { .. })
        ));
    }
}
