//! Rule engine orchestrating skip filter, language registry and rules.

use std::fmt;
use std::path::Path;

use tdd_gate_core::{
    Decision, DependencyFinder, DependencyFinderBox, GateError, LanguageRegistry,
    NoDependencyFinder, Operation, ValidationContext,
};
use tdd_gate_rules::{DeleteTestWithDependency, NoTestBeforeCode, RefactorWithoutTests};
use tracing::debug;

/// Builder for configuring a [`RuleEngine`].
#[derive(Default)]
pub struct RuleEngineBuilder {
    registry: Option<LanguageRegistry>,
    finder: Option<DependencyFinderBox>,
}

impl RuleEngineBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the language registry (default: built-in languages).
    #[must_use]
    pub fn registry(mut self, registry: LanguageRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Sets the dependency finder used by the deletion rule.
    #[must_use]
    pub fn dependency_finder<F: DependencyFinder + 'static>(mut self, finder: F) -> Self {
        self.finder = Some(Box::new(finder));
        self
    }

    /// Sets a boxed dependency finder.
    #[must_use]
    pub fn dependency_finder_box(mut self, finder: DependencyFinderBox) -> Self {
        self.finder = Some(finder);
        self
    }

    /// Builds the engine.
    #[must_use]
    pub fn build(self) -> RuleEngine {
        RuleEngine {
            registry: self.registry.unwrap_or_default(),
            finder: self
                .finder
                .unwrap_or_else(|| Box::new(NoDependencyFinder)),
        }
    }
}

/// Evaluates file operations against the TDD rules.
///
/// The engine is immutable once built and holds no per-call state, so one
/// instance can serve any number of calls, from any thread.
///
/// | Operation | Rule |
/// |-----------|------|
/// | `write`, `edit` | `no_test_before_code` |
/// | `delete` | `delete_test_with_dependency` |
/// | refactor ([`RuleEngine::validate_refactor`]) | `refactor_without_tests` |
pub struct RuleEngine {
    registry: LanguageRegistry,
    finder: DependencyFinderBox,
}

impl fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleEngine")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        RuleEngineBuilder::new().build()
    }
}

impl RuleEngine {
    /// Creates a new builder for configuring an engine.
    #[must_use]
    pub fn builder() -> RuleEngineBuilder {
        RuleEngineBuilder::new()
    }

    /// The language registry in use.
    #[must_use]
    pub fn registry(&self) -> &LanguageRegistry {
        &self.registry
    }

    /// Validates a write, edit or delete of `path`.
    ///
    /// Returns an allowed decision when no rule fires, and a blocked decision
    /// carrying the violation otherwise. The refactor rule is never consulted
    /// here; see [`RuleEngine::validate_refactor`].
    ///
    /// # Errors
    ///
    /// Returns [`GateError::PathOutsideRoot`] if `path` is not under the
    /// context's root.
    pub fn validate(
        &self,
        operation: Operation,
        path: impl AsRef<Path>,
        ctx: &ValidationContext,
    ) -> Result<Decision, GateError> {
        let target = ctx.target(path)?;

        let violation = match operation {
            Operation::Write | Operation::Edit => {
                NoTestBeforeCode::new(&self.registry).check(&target, ctx)?
            }
            Operation::Delete => {
                DeleteTestWithDependency::new(&*self.finder).check(&target, ctx)
            }
        };

        match &violation {
            Some(v) => debug!(
                "{} {}: {} ({})",
                operation,
                target.relative_path.display(),
                v.rule,
                v.severity
            ),
            None => debug!("{} {}: allowed", operation, target.relative_path.display()),
        }

        Ok(Decision::from_violation(violation))
    }

    /// Validates a refactor of `path`.
    ///
    /// Always allowed; when `tests_run` is false the decision carries an
    /// `info` advisory.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::PathOutsideRoot`] if `path` is not under the
    /// context's root.
    pub fn validate_refactor(
        &self,
        path: impl AsRef<Path>,
        tests_run: bool,
        ctx: &ValidationContext,
    ) -> Result<Decision, GateError> {
        let target = ctx.target(path)?;
        Ok(RefactorWithoutTests::new()
            .check(&target, ctx, tests_run)
            .map_or_else(Decision::allow, Decision::advise))
    }
}

/// Validates a file operation with the built-in languages, the default skip
/// list and no dependency analysis.
///
/// `operation` is one of `write`, `edit` or `delete`.
///
/// # Errors
///
/// Returns [`GateError::UnknownOperation`] for other operations, a root error
/// if `root_dir` is unusable, or [`GateError::PathOutsideRoot`].
///
/// # Example
///
/// ```ignore
/// let (ok, violation) = tdd_gate::validate("write", "src/calc.py", ".", false)?.into_parts();
/// ```
pub fn validate(
    operation: &str,
    file_path: impl AsRef<Path>,
    root_dir: impl AsRef<Path>,
    strict_mode: bool,
) -> Result<Decision, GateError> {
    let operation: Operation = operation.parse()?;
    let ctx = ValidationContext::new(root_dir)?.with_strict(strict_mode);
    RuleEngine::default().validate(operation, file_path, &ctx)
}

/// Validates a refactor with default settings.
///
/// # Errors
///
/// Returns a root error if `root_dir` is unusable, or
/// [`GateError::PathOutsideRoot`].
pub fn validate_refactor(
    file_path: impl AsRef<Path>,
    root_dir: impl AsRef<Path>,
    tests_run: bool,
) -> Result<Decision, GateError> {
    let ctx = ValidationContext::new(root_dir)?;
    RuleEngine::default().validate_refactor(file_path, tests_run, &ctx)
}
