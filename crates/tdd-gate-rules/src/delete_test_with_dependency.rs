//! TDD002: Forbids deleting a test that source code depends on.

use std::path::Path;

use tdd_gate_core::utils::paths::file_name_str;
use tdd_gate_core::{
    DependencyFinder, RuleId, Severity, TargetFile, ValidationContext, Violation,
};
use tracing::debug;

/// Test file suffixes of the supported languages.
const TEST_FILE_SUFFIXES: &[&str] = &[
    "_test.py",
    ".test.js",
    ".test.ts",
    ".spec.js",
    ".spec.ts",
    "_test.dart",
    "Test.java",
    "_test.go",
];

/// Whether a file looks like a test by name alone.
///
/// Independent of the language registry: a file is a test if its name
/// contains `test` (any case) or ends with a known test suffix.
#[must_use]
pub fn is_test_file(path: &Path) -> bool {
    let name = file_name_str(path);
    name.to_lowercase().contains("test") || TEST_FILE_SUFFIXES.iter().any(|s| name.ends_with(s))
}

/// Rule that blocks deleting tests that other files depend on.
///
/// Dependents come from the configured [`DependencyFinder`]. With the default
/// finder nothing depends on anything, so deletion is always allowed.
pub struct DeleteTestWithDependency<'a> {
    finder: &'a dyn DependencyFinder,
}

impl<'a> DeleteTestWithDependency<'a> {
    /// Rule identifier.
    pub const ID: RuleId = RuleId::DeleteTestWithDependency;

    /// Creates the rule backed by `finder`.
    #[must_use]
    pub fn new(finder: &'a dyn DependencyFinder) -> Self {
        Self { finder }
    }

    /// Checks a deletion of `target`.
    #[must_use]
    pub fn check(&self, target: &TargetFile, ctx: &ValidationContext) -> Option<Violation> {
        if ctx.is_skipped(target) || !is_test_file(&target.path) {
            return None;
        }

        let dependencies = self.finder.find_dependents(&target.path, ctx.root());
        if dependencies.is_empty() {
            debug!(
                "{}: no dependents, deletion allowed",
                target.relative_path.display()
            );
            return None;
        }

        Some(
            Violation::new(
                Self::ID,
                Severity::Error,
                format!(
                    "Cannot delete test: Source code depends on {}",
                    target.given.display()
                ),
                "1. Remove or update dependent code first\n2. Then delete the test",
            )
            .with_dependencies(dependencies),
        )
    }
}
