//! # tdd-gate-rules
//!
//! Built-in TDD rules for tdd-gate.
//!
//! ## Available Rules
//!
//! | Code | Name | Triggered by |
//! |------|------|--------------|
//! | TDD001 | `no_test_before_code` | write / edit of a source file with no test |
//! | TDD002 | `delete_test_with_dependency` | delete of a test other code depends on |
//! | TDD003 | `refactor_without_tests` | refactor reported without a test run (advisory) |
//!
//! Each rule is a plain struct with its own `check`. There is no shared rule
//! trait: the rules take different inputs (a language registry, a
//! [`DependencyFinder`](tdd_gate_core::DependencyFinder), a `tests_run` flag)
//! and each operation runs exactly one of them, so the engine dispatches on
//! [`Operation`](tdd_gate_core::Operation) directly.
//!
//! ## Usage
//!
//! ```ignore
//! use tdd_gate_core::{LanguageRegistry, ValidationContext};
//! use tdd_gate_rules::NoTestBeforeCode;
//!
//! let registry = LanguageRegistry::builtin();
//! let ctx = ValidationContext::new(".")?.with_strict(true);
//! let target = ctx.target("src/calc.py")?;
//! let violation = NoTestBeforeCode::new(&registry).check(&target, &ctx)?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod delete_test_with_dependency;
mod no_test_before_code;

pub use delete_test_with_dependency::{is_test_file, DeleteTestWithDependency};
pub use no_test_before_code::NoTestBeforeCode;
pub use refactor_without_tests::RefactorWithoutTests;

/// Re-export core types for convenience.
pub use tdd_gate_core::{RuleId, Severity, Violation};

/// Returns every built-in rule identifier, in code order.
#[must_use]
pub fn all_rules() -> &'static [RuleId] {
    &RuleId::ALL
}
