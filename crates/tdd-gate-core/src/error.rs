//! Errors raised when the gate cannot evaluate a request.
//!
//! These are distinct from policy violations: a [`Violation`](crate::Violation)
//! means "the operation is disallowed", a [`GateError`] means "the gate could
//! not decide".

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Input and setup errors for gate evaluation.
#[derive(Debug, Error, Diagnostic)]
pub enum GateError {
    /// The file path does not live under the project root.
    #[error("path {path} is outside project root {root}")]
    #[diagnostic(
        code(tdd_gate::path_outside_root),
        help("pass a path relative to the project root, or an absolute path inside it")
    )]
    PathOutsideRoot {
        /// The offending path.
        path: PathBuf,
        /// The project root.
        root: PathBuf,
    },

    /// The project root does not exist.
    #[error("project root {0} does not exist")]
    #[diagnostic(code(tdd_gate::root_not_found))]
    RootNotFound(PathBuf),

    /// The project root exists but is not a directory.
    #[error("project root {0} is not a directory")]
    #[diagnostic(code(tdd_gate::root_not_directory))]
    RootNotDirectory(PathBuf),

    /// The operation string is not one of `write`, `edit`, `delete`.
    #[error("unknown operation `{0}`")]
    #[diagnostic(
        code(tdd_gate::unknown_operation),
        help("expected one of: write, edit, delete")
    )]
    UnknownOperation(String),

    /// A skip pattern failed to compile.
    #[error("invalid skip pattern `{pattern}`: {reason}")]
    #[diagnostic(code(tdd_gate::invalid_skip_pattern))]
    InvalidSkipPattern {
        /// The raw pattern.
        pattern: String,
        /// Why compilation failed.
        reason: String,
    },

    /// A language test or source pattern failed to compile.
    #[error("invalid pattern `{pattern}` for language `{language}`: {reason}")]
    #[diagnostic(code(tdd_gate::invalid_language_pattern))]
    InvalidLanguagePattern {
        /// Language identifier.
        language: String,
        /// The raw pattern.
        pattern: String,
        /// Why compilation failed.
        reason: String,
    },

    /// IO error while resolving the project root.
    #[error("IO error: {0}")]
    #[diagnostic(code(tdd_gate::io))]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_outside_root_display() {
        let err = GateError::PathOutsideRoot {
            path: PathBuf::from("/elsewhere/calc.py"),
            root: PathBuf::from("/project"),
        };
        assert_eq!(
            err.to_string(),
            "path /elsewhere/calc.py is outside project root /project"
        );
    }

    #[test]
    fn unknown_operation_has_help() {
        let err = GateError::UnknownOperation("rename".to_string());
        assert_eq!(err.to_string(), "unknown operation `rename`");
        let help = err.help().map(|h| h.to_string());
        assert_eq!(help.as_deref(), Some("expected one of: write, edit, delete"));
    }
}
