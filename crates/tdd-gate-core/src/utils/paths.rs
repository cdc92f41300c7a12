//! Path utilities for resolving files against a project root.

use std::path::{Component, Path, PathBuf};

use crate::error::GateError;

/// Lexically normalizes a path, folding `.` and `..` components.
///
/// Does not touch the filesystem, so symlinks are not resolved. A `..` that
/// would climb above the first component is kept as-is.
///
/// # Example
///
/// ```ignore
/// assert_eq!(normalize(Path::new("/p/src/../tests/./a.py")), PathBuf::from("/p/tests/a.py"));
/// ```
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }

    out.iter().collect()
}

/// Makes `path` absolute against `root` and normalizes it.
///
/// Relative paths are interpreted as root-relative.
#[must_use]
pub fn resolve_against(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&root.join(path))
    }
}

/// Computes `path` relative to `root`.
///
/// Both paths are normalized first; relative inputs are taken as
/// root-relative.
///
/// # Errors
///
/// Returns [`GateError::PathOutsideRoot`] when `path` does not live under
/// `root`.
pub fn relative_to(path: &Path, root: &Path) -> Result<PathBuf, GateError> {
    let root = normalize(root);
    let absolute = resolve_against(&root, path);

    absolute
        .strip_prefix(&root)
        .map(Path::to_path_buf)
        .map_err(|_| GateError::PathOutsideRoot {
            path: path.to_path_buf(),
            root,
        })
}

/// Returns the file name as a UTF-8 string, or an empty string.
#[must_use]
pub fn file_name_str(path: &Path) -> &str {
    path.file_name().and_then(|n| n.to_str()).unwrap_or_default()
}

/// Returns the file stem (name without the last extension), or an empty string.
#[must_use]
pub fn file_stem_str(path: &Path) -> &str {
    path.file_stem().and_then(|n| n.to_str()).unwrap_or_default()
}

/// Converts a relative path to a `/`-separated string for glob matching.
#[must_use]
pub fn to_slash_string(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
