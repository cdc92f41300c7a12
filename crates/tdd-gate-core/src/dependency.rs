//! Dependency lookup for test deletion.
//!
//! [`DependencyFinder`] is the extension point for real dependency analysis.
//! The gate ships with [`NoDependencyFinder`], which never reports
//! dependents, so test deletion is always allowed until a static-analysis
//! backend is plugged in.

use std::path::{Path, PathBuf};

/// Finds source files that depend on a test file.
///
/// # Example
///
/// ```ignore
/// use tdd_gate_core::DependencyFinder;
///
/// struct ImportScanner;
///
/// impl DependencyFinder for ImportScanner {
///     fn find_dependents(&self, test_file: &Path, root: &Path) -> Vec<PathBuf> {
///         scan_imports(root, test_file)
///     }
/// }
/// ```
pub trait DependencyFinder: Send + Sync {
    /// Returns files under `root` that depend on `test_file`, in a stable order.
    fn find_dependents(&self, test_file: &Path, root: &Path) -> Vec<PathBuf>;
}

/// Type alias for boxed `DependencyFinder` trait objects.
pub type DependencyFinderBox = Box<dyn DependencyFinder>;

/// Finder that never reports dependents.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDependencyFinder;

impl DependencyFinder for NoDependencyFinder {
    fn find_dependents(&self, _test_file: &Path, _root: &Path) -> Vec<PathBuf> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_dependency_finder_is_empty() {
        let finder = NoDependencyFinder;
        assert!(finder
            .find_dependents(Path::new("tests/test_calc.py"), Path::new("."))
            .is_empty());
    }

    #[test]
    fn test_finder_is_object_safe() {
        struct Fixed;
        impl DependencyFinder for Fixed {
            fn find_dependents(&self, _test_file: &Path, _root: &Path) -> Vec<PathBuf> {
                vec![PathBuf::from("src/calc.py")]
            }
        }

        let finder: DependencyFinderBox = Box::new(Fixed);
        assert_eq!(
            finder.find_dependents(Path::new("tests/test_calc.py"), Path::new(".")),
            vec![PathBuf::from("src/calc.py")]
        );
    }
}
