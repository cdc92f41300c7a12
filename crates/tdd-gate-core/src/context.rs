//! Context types for rule execution.

use std::path::{Path, PathBuf};

use crate::config::GateConfig;
use crate::error::GateError;
use crate::skip::SkipFilter;
use crate::utils::paths::{normalize, relative_to, resolve_against};

/// Per-call configuration handed to every rule.
///
/// Holds the absolute project root, the strict-mode flag and the skip list.
/// The engine keeps no state between calls; everything a rule needs comes
/// from here.
#[derive(Debug, Clone)]
pub struct ValidationContext {
    root: PathBuf,
    strict: bool,
    skip: SkipFilter,
}

impl ValidationContext {
    /// Creates a context rooted at `root` with default settings.
    ///
    /// Relative roots are resolved against the current directory.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::RootNotFound`] or [`GateError::RootNotDirectory`]
    /// if the root is unusable, or [`GateError::Io`] if it cannot be read.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, GateError> {
        let root = root.as_ref();
        let root = if root.is_absolute() {
            normalize(root)
        } else {
            normalize(&std::env::current_dir()?.join(root))
        };

        match std::fs::metadata(&root) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => return Err(GateError::RootNotDirectory(root)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(GateError::RootNotFound(root));
            }
            Err(e) => return Err(GateError::Io(e)),
        }

        Ok(Self {
            root,
            strict: false,
            skip: SkipFilter::default(),
        })
    }

    /// Builds a context from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the root is unusable or a skip pattern is invalid.
    pub fn from_config(config: &GateConfig) -> Result<Self, GateError> {
        let skip = SkipFilter::from_override(config.gate.skip.as_deref())?;
        Ok(Self::new(&config.gate.root)?
            .with_strict(config.gate.strict)
            .with_skip_filter(skip))
    }

    /// Sets strict mode.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Replaces the skip filter.
    #[must_use]
    pub fn with_skip_filter(mut self, skip: SkipFilter) -> Self {
        self.skip = skip;
        self
    }

    /// Absolute project root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether missing tests are escalated to errors.
    #[must_use]
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// The active skip filter.
    #[must_use]
    pub fn skip_filter(&self) -> &SkipFilter {
        &self.skip
    }

    /// Resolves `path` into a [`TargetFile`].
    ///
    /// # Errors
    ///
    /// Returns [`GateError::PathOutsideRoot`] if `path` is not under the root.
    pub fn target(&self, path: impl AsRef<Path>) -> Result<TargetFile, GateError> {
        let given = path.as_ref();
        let relative_path = relative_to(given, &self.root)?;
        Ok(TargetFile {
            given: given.to_path_buf(),
            path: resolve_against(&self.root, given),
            relative_path,
        })
    }

    /// Whether the skip filter excludes `target`.
    #[must_use]
    pub fn is_skipped(&self, target: &TargetFile) -> bool {
        self.skip.should_skip(&target.relative_path)
    }
}

/// A file submitted to the gate, resolved against the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetFile {
    /// The path exactly as the caller gave it (used in messages).
    pub given: PathBuf,
    /// Absolute, normalized path.
    pub path: PathBuf,
    /// Path relative to the project root.
    pub relative_path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_relative_root_is_made_absolute() {
        let ctx = ValidationContext::new(".").unwrap();
        assert!(ctx.root().is_absolute());
        assert!(!ctx.is_strict());
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let err = ValidationContext::new(tmp.path().join("missing")).unwrap_err();
        assert!(matches!(err, GateError::RootNotFound(_)));
    }

    #[test]
    fn test_file_root_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("file.txt");
        std::fs::write(&file, "").unwrap();
        let err = ValidationContext::new(&file).unwrap_err();
        assert!(matches!(err, GateError::RootNotDirectory(_)));
    }

    #[test]
    fn test_target_resolution() {
        let tmp = TempDir::new().unwrap();
        let ctx = ValidationContext::new(tmp.path()).unwrap();

        let target = ctx.target("src/../src/calc.py").unwrap();
        assert_eq!(target.given, PathBuf::from("src/../src/calc.py"));
        assert_eq!(target.path, tmp.path().join("src/calc.py"));
        assert_eq!(target.relative_path, PathBuf::from("src/calc.py"));

        let absolute = ctx.target(tmp.path().join("lib/a.py")).unwrap();
        assert_eq!(absolute.relative_path, PathBuf::from("lib/a.py"));
    }

    #[test]
    fn test_target_outside_root() {
        let tmp = TempDir::new().unwrap();
        let ctx = ValidationContext::new(tmp.path()).unwrap();
        assert!(matches!(
            ctx.target("../escape.py"),
            Err(GateError::PathOutsideRoot { .. })
        ));
    }

    #[test]
    fn test_from_config_applies_skip_override() {
        let tmp = TempDir::new().unwrap();
        let mut config = GateConfig::default();
        config.gate.root = tmp.path().to_path_buf();
        config.gate.strict = true;
        config.gate.skip = Some(vec!["**/legacy/**".to_string()]);

        let ctx = ValidationContext::from_config(&config).unwrap();
        assert!(ctx.is_strict());
        assert!(ctx.is_skipped(&ctx.target("legacy/old.py").unwrap()));
        assert!(!ctx.is_skipped(&ctx.target("README.md").unwrap()));
    }
}
