//! Language registry mapping file names to test conventions.
//!
//! A [`LanguageRegistry`] is an immutable, ordered list of [`LanguageSpec`]s.
//! Order matters: [`LanguageRegistry::detect_language`] returns the first
//! language whose source patterns match.

use glob::MatchOptions;
use std::path::Path;
use tracing::debug;

use crate::error::GateError;
use crate::utils::paths::file_name_str;

/// Options for source pattern matching (extension case is ignored).
const SOURCE_MATCH: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Options for test pattern matching (`FooTest.java` is not `Footest.java`).
const TEST_MATCH: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// How a file is classified for its detected language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Matches one of the language's test patterns.
    Test,
    /// Matches the language's source patterns but no test pattern.
    Source,
    /// No registered language matches.
    Untracked,
}

/// A file-name glob compiled once at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePattern {
    raw: String,
    compiled: glob::Pattern,
}

impl FilePattern {
    fn new(language: &str, pattern: &str) -> Result<Self, GateError> {
        let compiled =
            glob::Pattern::new(pattern).map_err(|e| GateError::InvalidLanguagePattern {
                language: language.to_string(),
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            raw: pattern.to_string(),
            compiled,
        })
    }

    /// Returns the raw pattern.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Substitutes `stem` for the wildcard, producing a concrete file name.
    ///
    /// `test_*.py` with stem `calc` yields `test_calc.py`.
    #[must_use]
    pub fn instantiate(&self, stem: &str) -> String {
        self.raw.replace('*', stem)
    }

    fn matches_with(&self, file_name: &str, options: MatchOptions) -> bool {
        self.compiled.matches_with(file_name, options)
    }
}

/// Test conventions for one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageSpec {
    id: String,
    test_patterns: Vec<FilePattern>,
    source_patterns: Vec<FilePattern>,
    test_dir: String,
}

impl LanguageSpec {
    /// Creates a language spec.
    ///
    /// An empty `test_dir` means tests live beside their sources only.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::InvalidLanguagePattern`] if any pattern is not a
    /// valid glob.
    pub fn new<T, S>(
        id: impl Into<String>,
        test_patterns: T,
        source_patterns: S,
        test_dir: impl Into<String>,
    ) -> Result<Self, GateError>
    where
        T: IntoIterator,
        T::Item: AsRef<str>,
        S: IntoIterator,
        S::Item: AsRef<str>,
    {
        let id = id.into();
        let test_patterns = test_patterns
            .into_iter()
            .map(|p| FilePattern::new(&id, p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        let source_patterns = source_patterns
            .into_iter()
            .map(|p| FilePattern::new(&id, p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id,
            test_patterns,
            source_patterns,
            test_dir: test_dir.into(),
        })
    }

    /// Language identifier (e.g., `python`).
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Test file patterns, in lookup order.
    #[must_use]
    pub fn test_patterns(&self) -> &[FilePattern] {
        &self.test_patterns
    }

    /// Source file patterns.
    #[must_use]
    pub fn source_patterns(&self) -> &[FilePattern] {
        &self.source_patterns
    }

    /// Conventional test directory relative to the project root, if any.
    #[must_use]
    pub fn test_dir(&self) -> Option<&str> {
        if self.test_dir.is_empty() {
            None
        } else {
            Some(&self.test_dir)
        }
    }

    /// Whether a bare file name is one of this language's sources.
    #[must_use]
    pub fn matches_source(&self, file_name: &str) -> bool {
        self.source_patterns
            .iter()
            .any(|p| p.matches_with(file_name, SOURCE_MATCH))
    }

    /// Whether a bare file name follows one of this language's test conventions.
    #[must_use]
    pub fn matches_test(&self, file_name: &str) -> bool {
        self.test_patterns
            .iter()
            .any(|p| p.matches_with(file_name, TEST_MATCH))
    }
}

/// Built-in language table: `(id, test patterns, source patterns, test dir)`.
const BUILTIN: &[(&str, &[&str], &[&str], &str)] = &[
    ("python", &["test_*.py", "*_test.py"], &["*.py"], "tests"),
    ("javascript", &["*.test.js", "*.spec.js"], &["*.js"], "__tests__"),
    ("typescript", &["*.test.ts", "*.spec.ts"], &["*.ts"], "__tests__"),
    ("dart", &["*_test.dart"], &["*.dart"], "test"),
    ("java", &["*Test.java"], &["*.java"], "src/test/java"),
    ("go", &["*_test.go"], &["*.go"], ""),
];

/// Ordered, immutable collection of language specs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageRegistry {
    languages: Vec<LanguageSpec>,
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl LanguageRegistry {
    /// Registry with the built-in languages: python, javascript, typescript,
    /// dart, java and go.
    #[must_use]
    pub fn builtin() -> Self {
        let mut languages = Vec::with_capacity(BUILTIN.len());
        for (id, tests, sources, dir) in BUILTIN {
            match LanguageSpec::new(*id, tests.iter(), sources.iter(), *dir) {
                Ok(spec) => languages.push(spec),
                Err(e) => debug_assert!(false, "built-in language `{id}` is invalid: {e}"),
            }
        }
        Self { languages }
    }

    /// Registry with exactly the given languages, in order.
    #[must_use]
    pub fn with_languages(languages: Vec<LanguageSpec>) -> Self {
        Self { languages }
    }

    /// Replaces languages sharing an id with `overrides` and appends the rest.
    #[must_use]
    pub fn override_with(mut self, overrides: Vec<LanguageSpec>) -> Self {
        for spec in overrides {
            if let Some(slot) = self.languages.iter_mut().find(|l| l.id == spec.id) {
                *slot = spec;
            } else {
                self.languages.push(spec);
            }
        }
        self
    }

    /// Iterates over languages in detection order.
    pub fn iter(&self) -> impl Iterator<Item = &LanguageSpec> {
        self.languages.iter()
    }

    /// Number of registered languages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    /// Whether the registry has no languages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    /// Looks up a language by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&LanguageSpec> {
        self.languages.iter().find(|l| l.id == id)
    }

    /// Detects the language of `path` from its file name.
    ///
    /// Returns `None` for untracked file types.
    #[must_use]
    pub fn detect_language(&self, path: &Path) -> Option<&LanguageSpec> {
        let file_name = file_name_str(path);
        let detected = self.languages.iter().find(|l| l.matches_source(file_name));
        debug!(
            "Detected language for {}: {}",
            path.display(),
            detected.map_or("<none>", LanguageSpec::id)
        );
        detected
    }

    /// Test patterns for `language`, empty when unknown.
    #[must_use]
    pub fn test_patterns(&self, language: &str) -> &[FilePattern] {
        match self.get(language) {
            Some(spec) => spec.test_patterns(),
            None => &[],
        }
    }

    /// Classifies `path` as a test, a source or untracked.
    #[must_use]
    pub fn classify(&self, path: &Path) -> FileKind {
        match self.detect_language(path) {
            None => FileKind::Untracked,
            Some(spec) if spec.matches_test(file_name_str(path)) => FileKind::Test,
            Some(_) => FileKind::Source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(registry: &LanguageRegistry) -> Vec<&str> {
        registry.iter().map(LanguageSpec::id).collect()
    }

    #[test]
    fn test_builtin_languages_all_compile() {
        let registry = LanguageRegistry::builtin();
        assert_eq!(
            ids(&registry),
            vec!["python", "javascript", "typescript", "dart", "java", "go"]
        );
    }

    #[test]
    fn test_builtin_table_entries_are_valid() {
        for (id, tests, sources, dir) in BUILTIN {
            if let Err(e) = LanguageSpec::new(*id, tests.iter(), sources.iter(), *dir) {
                panic!("built-in `{id}` failed to compile: {e}");
            }
        }
    }

    #[test]
    fn test_detect_language_by_extension() {
        let registry = LanguageRegistry::builtin();
        let detect = |p: &str| registry.detect_language(Path::new(p)).map(LanguageSpec::id);

        assert_eq!(detect("src/calc.py"), Some("python"));
        assert_eq!(detect("web/app.js"), Some("javascript"));
        assert_eq!(detect("web/app.ts"), Some("typescript"));
        assert_eq!(detect("lib/widget.dart"), Some("dart"));
        assert_eq!(detect("src/main/java/Foo.java"), Some("java"));
        assert_eq!(detect("cmd/main.go"), Some("go"));
        assert_eq!(detect("notes.txt"), None);
        assert_eq!(detect("Makefile"), None);
    }

    #[test]
    fn test_detect_language_ignores_extension_case() {
        let registry = LanguageRegistry::builtin();
        let spec = registry.detect_language(Path::new("src/CALC.PY"));
        assert_eq!(spec.map(LanguageSpec::id), Some("python"));
    }

    #[test]
    fn test_classify() {
        let registry = LanguageRegistry::builtin();
        let classify = |p: &str| registry.classify(Path::new(p));

        assert_eq!(classify("tests/test_calc.py"), FileKind::Test);
        assert_eq!(classify("src/calc_test.py"), FileKind::Test);
        assert_eq!(classify("src/calc.py"), FileKind::Source);
        assert_eq!(classify("src/calc.spec.ts"), FileKind::Test);
        assert_eq!(classify("src/CalcTest.java"), FileKind::Test);
        assert_eq!(classify("src/Calctest.java"), FileKind::Source);
        assert_eq!(classify("pkg/calc_test.go"), FileKind::Test);
        assert_eq!(classify("README"), FileKind::Untracked);
    }

    #[test]
    fn test_test_patterns_lookup() {
        let registry = LanguageRegistry::builtin();
        let patterns: Vec<&str> = registry
            .test_patterns("python")
            .iter()
            .map(FilePattern::as_str)
            .collect();
        assert_eq!(patterns, vec!["test_*.py", "*_test.py"]);
        assert!(registry.test_patterns("cobol").is_empty());
    }

    #[test]
    fn test_instantiate_pattern() {
        let registry = LanguageRegistry::builtin();
        let java = registry.get("java").unwrap();
        assert_eq!(java.test_patterns()[0].instantiate("Calc"), "CalcTest.java");
        assert_eq!(java.test_dir(), Some("src/test/java"));
        assert_eq!(registry.get("go").unwrap().test_dir(), None);
    }

    #[test]
    fn test_override_replaces_and_appends() {
        let go = LanguageSpec::new("go", ["*_test.go"], ["*.go"], "test").unwrap();
        let kotlin =
            LanguageSpec::new("kotlin", ["*Test.kt"], ["*.kt"], "src/test/kotlin").unwrap();
        let registry = LanguageRegistry::builtin().override_with(vec![go, kotlin]);

        assert_eq!(registry.len(), 7);
        assert_eq!(registry.get("go").unwrap().test_dir(), Some("test"));
        assert_eq!(ids(&registry).last(), Some(&"kotlin"));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let err = LanguageSpec::new("bad", ["[*.x"], ["*.x"], "").unwrap_err();
        assert!(matches!(err, GateError::InvalidLanguagePattern { .. }));
    }
}
