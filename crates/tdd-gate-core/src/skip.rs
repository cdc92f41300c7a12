//! Glob-based exclusion list consulted before any rule runs.

use std::path::Path;
use tracing::debug;

use crate::error::GateError;
use crate::utils::paths::{file_name_str, to_slash_string};

/// Files the gate never inspects: docs, data/config formats, generated or
/// fixture directories, and dependency or virtualenv trees.
pub const DEFAULT_SKIP_PATTERNS: &[&str] = &[
    "**/*.md",
    "**/*.json",
    "**/*.yaml",
    "**/*.yml",
    "**/config/**",
    "**/migrations/**",
    "**/fixtures/**",
    "**/mock*/**",
    "**/node_modules/**",
    "**/.venv/**",
    "**/venv/**",
    "**/__pycache__/**",
];

#[derive(Debug, Clone, PartialEq, Eq)]
struct SkipPattern {
    raw: String,
    compiled: glob::Pattern,
    /// For `dir/**` patterns, the `dir` part matched against ancestors.
    dir: Option<glob::Pattern>,
}

impl SkipPattern {
    fn matches(&self, rel: &str, name: &str) -> bool {
        if self.compiled.matches(rel) || self.compiled.matches(name) {
            return true;
        }
        // `glob::Pattern` is not consistent about `**` at the end of a pattern,
        // so `dir/**` also matches when any ancestor directory matches `dir`.
        let Some(dir) = &self.dir else {
            return false;
        };
        rel.match_indices('/')
            .any(|(idx, _)| dir.matches(&rel[..idx]))
    }
}

/// Compiled skip list.
///
/// An explicit list replaces the defaults entirely; it is never merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipFilter {
    patterns: Vec<SkipPattern>,
}

impl Default for SkipFilter {
    fn default() -> Self {
        let mut patterns = Vec::with_capacity(DEFAULT_SKIP_PATTERNS.len());
        for raw in DEFAULT_SKIP_PATTERNS {
            match compile(raw) {
                Ok(pattern) => patterns.push(pattern),
                Err(e) => debug_assert!(false, "default skip pattern is invalid: {e}"),
            }
        }
        Self { patterns }
    }
}

fn compile(pattern: &str) -> Result<SkipPattern, GateError> {
    let compiled = glob::Pattern::new(pattern).map_err(|e| GateError::InvalidSkipPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })?;
    let dir = pattern
        .strip_suffix("/**")
        .and_then(|prefix| glob::Pattern::new(prefix).ok());
    Ok(SkipPattern {
        raw: pattern.to_string(),
        compiled,
        dir,
    })
}

impl SkipFilter {
    /// Builds a filter from an explicit pattern list.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::InvalidSkipPattern`] for the first pattern that
    /// is not a valid glob.
    pub fn new<I, S>(patterns: I) -> Result<Self, GateError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| compile(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Uses `overrides` when present, the defaults otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::InvalidSkipPattern`] if an override is invalid.
    pub fn from_override(overrides: Option<&[String]>) -> Result<Self, GateError> {
        match overrides {
            Some(list) => Self::new(list),
            None => Ok(Self::default()),
        }
    }

    /// Raw patterns, in configuration order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|p| p.raw.as_str())
    }

    /// Whether the root-relative `path`, or its bare file name, matches any
    /// skip pattern.
    #[must_use]
    pub fn should_skip(&self, relative: &Path) -> bool {
        let rel = to_slash_string(relative);
        let name = file_name_str(relative);

        let hit = self
            .patterns
            .iter()
            .find(|p| p.matches(&rel, name));

        if let Some(pattern) = hit {
            debug!("Skipping {} (matched {})", rel, pattern.raw);
            return true;
        }
        false
    }
}
