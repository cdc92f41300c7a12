//! TDD001: Forbids writing source code before a test exists.

use std::fmt::Write;
use std::path::Path;

use tdd_gate_core::utils::paths::file_name_str;
use tdd_gate_core::{
    GateError, LanguageRegistry, LanguageSpec, RuleId, Severity, TargetFile, TestLocator,
    ValidationContext, Violation,
};
use tracing::debug;

/// Rule that blocks writes and edits to source files without a test.
///
/// # Detection
///
/// - Skipped files and untracked file types always pass.
/// - Files named like a test of their language always pass.
/// - Any other source file passes only if [`TestLocator`] finds at least one
///   existing test for it.
///
/// # Severity
///
/// `error` in strict mode, `warning` otherwise.
#[derive(Debug, Clone, Copy)]
pub struct NoTestBeforeCode<'a> {
    registry: &'a LanguageRegistry,
}

impl<'a> NoTestBeforeCode<'a> {
    /// Rule identifier.
    pub const ID: RuleId = RuleId::NoTestBeforeCode;

    /// Creates the rule over `registry`.
    #[must_use]
    pub fn new(registry: &'a LanguageRegistry) -> Self {
        Self { registry }
    }

    /// Severity for the given mode.
    #[must_use]
    pub fn severity(strict: bool) -> Severity {
        if strict {
            Severity::Error
        } else {
            Severity::Warning
        }
    }

    /// Checks a write or edit of `target`.
    ///
    /// # Errors
    ///
    /// Propagates [`GateError::PathOutsideRoot`] from the locator.
    pub fn check(
        &self,
        target: &TargetFile,
        ctx: &ValidationContext,
    ) -> Result<Option<Violation>, GateError> {
        if ctx.is_skipped(target) {
            return Ok(None);
        }

        let Some(spec) = self.registry.detect_language(&target.path) else {
            debug!("{}: untracked file type", target.relative_path.display());
            return Ok(None);
        };

        if spec.matches_test(file_name_str(&target.path)) {
            debug!("{}: test file, writing allowed", target.relative_path.display());
            return Ok(None);
        }

        let locator = TestLocator::new(self.registry);
        if !locator.find_test_files(&target.path, ctx.root())?.is_empty() {
            return Ok(None);
        }

        let candidates = locator.candidates(&target.path, ctx.root())?;
        let suggestion = suggestion(spec, &candidates, ctx.root());

        Ok(Some(Violation::new(
            Self::ID,
            Self::severity(ctx.is_strict()),
            format!(
                "Writing source code without corresponding test: {}",
                target.given.display()
            ),
            suggestion,
        )))
    }
}

fn suggestion(spec: &LanguageSpec, candidates: &[std::path::PathBuf], root: &Path) -> String {
    let mut text = String::from(
        "1. Create a failing test first (RED phase)\n\
         2. Run test to confirm failure\n\
         3. Then write implementation code\n\n",
    );
    let _ = write!(
        text,
        "Expected test location: Based on {} conventions",
        spec.id()
    );
    for candidate in candidates {
        let shown = candidate.strip_prefix(root).unwrap_or(candidate);
        let _ = write!(text, "\n  - {}", shown.display());
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, ValidationContext, LanguageRegistry) {
        let tmp = TempDir::new().unwrap();
        let ctx = ValidationContext::new(tmp.path()).unwrap();
        (tmp, ctx, LanguageRegistry::builtin())
    }

    fn check(
        registry: &LanguageRegistry,
        ctx: &ValidationContext,
        path: &str,
    ) -> Option<Violation> {
        let target = ctx.target(path).unwrap();
        NoTestBeforeCode::new(registry).check(&target, ctx).unwrap()
    }

    #[test]
    fn test_missing_test_is_warning_by_default() {
        let (_tmp, ctx, registry) = setup();
        let v = check(&registry, &ctx, "src/calc.py").expect("violation");
        assert_eq!(v.rule, RuleId::NoTestBeforeCode);
        assert_eq!(v.severity, Severity::Warning);
        assert_eq!(
            v.message,
            "Writing source code without corresponding test: src/calc.py"
        );
        assert!(v.suggestion.starts_with("1. Create a failing test first (RED phase)"));
        assert!(v.suggestion.contains("Based on python conventions"));
        assert!(v.suggestion.contains("  - tests/test_calc.py"));
    }

    #[test]
    fn test_missing_test_is_error_in_strict_mode() {
        let (_tmp, ctx, registry) = setup();
        let ctx = ctx.with_strict(true);
        let v = check(&registry, &ctx, "src/calc.py").expect("violation");
        assert_eq!(v.severity, Severity::Error);
    }

    #[test]
    fn test_existing_test_passes() {
        let (tmp, ctx, registry) = setup();
        fs::create_dir_all(tmp.path().join("tests")).unwrap();
        fs::write(tmp.path().join("tests/test_calc.py"), "").unwrap();
        assert!(check(&registry, &ctx, "src/calc.py").is_none());
    }

    #[test]
    fn test_test_files_always_pass() {
        let (_tmp, ctx, registry) = setup();
        assert!(check(&registry, &ctx, "tests/test_calc.py").is_none());
        assert!(check(&registry, &ctx, "web/app.spec.ts").is_none());
        assert!(check(&registry, &ctx, "pkg/calc_test.go").is_none());
    }

    #[test]
    fn test_untracked_and_skipped_pass() {
        let (_tmp, ctx, registry) = setup();
        assert!(check(&registry, &ctx, "notes.txt").is_none());
        assert!(check(&registry, &ctx, "config/settings.py").is_none());
        assert!(check(&registry, &ctx, "web/node_modules/x/index.js").is_none());
    }
}
