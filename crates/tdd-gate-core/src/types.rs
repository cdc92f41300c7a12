//! Core types for gate decisions and violations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::GateError;

/// Severity level for gate violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Advisory message, never blocks.
    Info,
    /// Blocks in the default mode.
    Warning,
    /// Blocks and must be fixed.
    Error,
}

impl Severity {
    /// Returns the lowercase name of this severity.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier of a built-in gate rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    /// Source code written before its test exists.
    NoTestBeforeCode,
    /// A test deleted while other code still depends on it.
    DeleteTestWithDependency,
    /// A refactor performed without running tests.
    RefactorWithoutTests,
}

impl RuleId {
    /// All rule identifiers, in code order.
    pub const ALL: [Self; 3] = [
        Self::NoTestBeforeCode,
        Self::DeleteTestWithDependency,
        Self::RefactorWithoutTests,
    ];

    /// Returns the snake_case rule identifier (e.g., `no_test_before_code`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoTestBeforeCode => "no_test_before_code",
            Self::DeleteTestWithDependency => "delete_test_with_dependency",
            Self::RefactorWithoutTests => "refactor_without_tests",
        }
    }

    /// Returns the rule code (e.g., `TDD001`).
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::NoTestBeforeCode => "TDD001",
            Self::DeleteTestWithDependency => "TDD002",
            Self::RefactorWithoutTests => "TDD003",
        }
    }

    /// Returns a brief description of what the rule checks.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::NoTestBeforeCode => "Source files may only be written once a test exists",
            Self::DeleteTestWithDependency => {
                "Tests may not be deleted while source code depends on them"
            }
            Self::RefactorWithoutTests => "Refactors should be followed by a test run",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file operation submitted to the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Creating or overwriting a file.
    Write,
    /// Modifying an existing file.
    Edit,
    /// Removing a file.
    Delete,
}

impl Operation {
    /// Returns the lowercase operation name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Write => "write",
            Self::Edit => "edit",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = GateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "write" => Ok(Self::Write),
            "edit" => Ok(Self::Edit),
            "delete" => Ok(Self::Delete),
            _ => Err(GateError::UnknownOperation(s.to_string())),
        }
    }
}

/// A TDD policy violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Rule that produced this violation.
    pub rule: RuleId,
    /// Severity of this violation.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// Remediation steps, possibly empty.
    pub suggestion: String,
    /// Files depending on the target (deletion rule only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<PathBuf>,
}

impl Violation {
    /// Creates a new violation.
    #[must_use]
    pub fn new(
        rule: RuleId,
        severity: Severity,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self {
            rule,
            severity,
            message: message.into(),
            suggestion: suggestion.into(),
            dependencies: Vec::new(),
        }
    }

    /// Attaches the files that depend on the target.
    #[must_use]
    pub fn with_dependencies(mut self, dependencies: Vec<PathBuf>) -> Self {
        self.dependencies = dependencies;
        self
    }

    /// Returns the rule code (e.g., `TDD001`).
    #[must_use]
    pub fn code(&self) -> &'static str {
        self.rule.code()
    }
}

/// Renders the violation block shown to the user.
///
/// ```text
/// [WARNING] Writing source code without corresponding test: src/calc.py
/// Suggestion:
/// 1. Create a failing test first (RED phase)
/// ...
/// ```
impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "[{}] {}",
            self.severity.as_str().to_ascii_uppercase(),
            self.message
        )?;
        if !self.suggestion.is_empty() {
            writeln!(f, "Suggestion:")?;
            writeln!(f, "{}", self.suggestion)?;
        }
        if !self.dependencies.is_empty() {
            writeln!(f, "Dependencies:")?;
            for dep in &self.dependencies {
                writeln!(f, "  - {}", dep.display())?;
            }
        }
        Ok(())
    }
}

/// Outcome of one gate evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// Whether the operation may proceed.
    pub allowed: bool,
    /// The violation found, if any.
    pub violation: Option<Violation>,
}

impl Decision {
    /// An allowed operation with nothing to report.
    #[must_use]
    pub fn allow() -> Self {
        Self {
            allowed: true,
            violation: None,
        }
    }

    /// A blocked operation.
    #[must_use]
    pub fn deny(violation: Violation) -> Self {
        Self {
            allowed: false,
            violation: Some(violation),
        }
    }

    /// An allowed operation carrying an advisory.
    #[must_use]
    pub fn advise(violation: Violation) -> Self {
        Self {
            allowed: true,
            violation: Some(violation),
        }
    }

    /// Blocks when a violation is present, allows otherwise.
    #[must_use]
    pub fn from_violation(violation: Option<Violation>) -> Self {
        violation.map_or_else(Self::allow, Self::deny)
    }

    /// Splits the decision into the `(is_valid, violation)` pair.
    #[must_use]
    pub fn into_parts(self) -> (bool, Option<Violation>) {
        (self.allowed, self.violation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_violation(severity: Severity) -> Violation {
        Violation::new(
            RuleId::NoTestBeforeCode,
            severity,
            "Writing source code without corresponding test: src/calc.py",
            "1. Create a failing test first (RED phase)",
        )
    }

    #[test]
    fn severity_ordering() {
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
    }

    #[test]
    fn operation_parses_case_insensitively() {
        assert_eq!("write".parse::<Operation>().ok(), Some(Operation::Write));
        assert_eq!("EDIT".parse::<Operation>().ok(), Some(Operation::Edit));
        assert_eq!(" delete ".parse::<Operation>().ok(), Some(Operation::Delete));
        assert!(matches!(
            "rename".parse::<Operation>(),
            Err(GateError::UnknownOperation(op)) if op == "rename"
        ));
    }

    #[test]
    fn violation_serializes_rule_and_severity_names() {
        let json = serde_json::to_value(make_violation(Severity::Warning)).unwrap();
        assert_eq!(json["rule"], "no_test_before_code");
        assert_eq!(json["severity"], "warning");
        assert!(json.get("dependencies").is_none());
    }

    #[test]
    fn display_renders_severity_and_suggestion() {
        let rendered = make_violation(Severity::Warning).to_string();
        assert!(rendered.starts_with("[WARNING] Writing source code"));
        assert!(rendered.contains("Suggestion:\n1. Create a failing test first"));
        assert!(!rendered.contains("Dependencies:"));
    }

    #[test]
    fn display_omits_empty_suggestion() {
        let v = Violation::new(RuleId::RefactorWithoutTests, Severity::Info, "msg", "");
        assert_eq!(v.to_string(), "[INFO] msg\n");
    }

    #[test]
    fn display_lists_dependencies() {
        let v = Violation::new(
            RuleId::DeleteTestWithDependency,
            Severity::Error,
            "Cannot delete test",
            "",
        )
        .with_dependencies(vec![PathBuf::from("src/a.py"), PathBuf::from("src/b.py")]);
        let rendered = v.to_string();
        assert!(rendered.contains("Dependencies:\n  - src/a.py\n  - src/b.py\n"));
    }

    #[test]
    fn decision_from_violation() {
        assert_eq!(Decision::from_violation(None), Decision::allow());
        let blocked = Decision::from_violation(Some(make_violation(Severity::Error)));
        assert!(!blocked.allowed);
        let (ok, violation) = Decision::advise(make_violation(Severity::Info)).into_parts();
        assert!(ok);
        assert!(violation.is_some());
    }
}
