//! Locates the test files expected for a source file.

use std::path::{Component, Path, PathBuf};
use tracing::debug;

use crate::error::GateError;
use crate::language::LanguageRegistry;
use crate::utils::paths::{file_stem_str, normalize, relative_to, resolve_against};

/// Computes candidate test locations for source files.
///
/// Candidates come from two places:
///
/// 1. Co-located: the source file's own directory.
/// 2. The language's test directory, mirroring the source's root-relative
///    directory. After the full mirror, leading directories are dropped one
///    at a time, so `src/calc.py` is looked up as `tests/src/test_calc.py`
///    and then `tests/test_calc.py`.
#[derive(Debug, Clone, Copy)]
pub struct TestLocator<'a> {
    registry: &'a LanguageRegistry,
}

impl<'a> TestLocator<'a> {
    /// Creates a locator over `registry`.
    #[must_use]
    pub fn new(registry: &'a LanguageRegistry) -> Self {
        Self { registry }
    }

    /// Returns every candidate test path for `source`, existing or not.
    ///
    /// Co-located candidates come first in pattern order, followed by the
    /// test-directory candidates per pattern, deepest mirror first.
    /// Untracked file types have no candidates.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::PathOutsideRoot`] when the language has a test
    /// directory and `source` is not under `root`.
    pub fn candidates(&self, source: &Path, root: &Path) -> Result<Vec<PathBuf>, GateError> {
        let Some(spec) = self.registry.detect_language(source) else {
            return Ok(Vec::new());
        };

        let root = normalize(root);
        let source = resolve_against(&root, source);
        let stem = file_stem_str(&source);
        let names: Vec<String> = spec
            .test_patterns()
            .iter()
            .map(|p| p.instantiate(stem))
            .collect();

        let parent = source.parent().unwrap_or(&root);
        let mut candidates: Vec<PathBuf> = names.iter().map(|n| parent.join(n)).collect();

        if let Some(test_dir) = spec.test_dir() {
            let relative = relative_to(&source, &root)?;
            let rel_dir = relative.parent().unwrap_or_else(|| Path::new(""));
            let test_root = root.join(test_dir);
            let mirrors = mirror_dirs(rel_dir);

            for name in &names {
                for mirror in &mirrors {
                    candidates.push(test_root.join(mirror).join(name));
                }
            }
        }

        Ok(candidates)
    }

    /// Returns the candidates that exist on disk, in discovery order.
    ///
    /// Duplicates are kept; callers only rely on emptiness.
    ///
    /// # Errors
    ///
    /// See [`TestLocator::candidates`].
    pub fn find_test_files(&self, source: &Path, root: &Path) -> Result<Vec<PathBuf>, GateError> {
        let found: Vec<PathBuf> = self
            .candidates(source, root)?
            .into_iter()
            .filter(|c| c.exists())
            .collect();

        debug!(
            "Found {} test file(s) for {}",
            found.len(),
            source.display()
        );
        Ok(found)
    }
}

/// `a/b/c` → `[a/b/c, b/c, c, ""]`.
fn mirror_dirs(rel_dir: &Path) -> Vec<PathBuf> {
    let parts: Vec<Component<'_>> = rel_dir
        .components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .collect();

    (0..=parts.len())
        .map(|skip| parts[skip..].iter().collect())
        .collect()
}
