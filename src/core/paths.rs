//! Path utilities
//!
//! Canonicalization for include deduplication, include target resolution and
//! display normalization.

use std::io;
use std::path::{Component, Path, PathBuf};

/// Normalize a path to use '/' as separator (for cross-platform consistency)
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Resolve an include target against the directory of the file that contains it.
///
/// Absolute targets are returned unchanged.
pub fn resolve_include(including_file: &Path, target: &str) -> PathBuf {
    let target = Path::new(target);
    if target.is_absolute() {
        return target.to_path_buf();
    }

    match including_file.parent() {
        Some(dir) => dir.join(target),
        None => target.to_path_buf(),
    }
}

/// Canonicalize a path so that two spellings of the same file compare equal.
///
/// Falls back to a lexically normalized absolute path when the OS primitive
/// fails on a path that nevertheless exists. Symlinked duplicates are not
/// detected on that fallback.
pub fn canonical_path(path: &Path) -> io::Result<PathBuf> {
    match path.canonicalize() {
        Ok(canonical) => Ok(canonical),
        Err(err) if err.kind() != io::ErrorKind::NotFound && path.exists() => {
            Ok(normalize_lexically(&absolute(path)?))
        }
        Err(err) => Err(err),
    }
}

fn absolute(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

/// Remove `.` components and fold `..` into their parent, without touching the filesystem
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_normalize_path() {
        let path = Path::new("deck/main.dat");
        assert_eq!(normalize_path(path), "deck/main.dat");
    }

    #[test]
    fn test_resolve_include_relative_to_including_file() {
        let resolved = resolve_include(Path::new("/deck/bulk/grid.dat"), "../props.dat");
        assert_eq!(resolved, PathBuf::from("/deck/bulk/../props.dat"));
    }

    #[test]
    fn test_resolve_include_absolute_target() {
        let resolved = resolve_include(Path::new("/deck/main.dat"), "/shared/mat.dat");
        assert_eq!(resolved, PathBuf::from("/shared/mat.dat"));
    }

    #[test]
    fn test_resolve_include_bare_file_name() {
        let resolved = resolve_include(Path::new("main.dat"), "sub.dat");
        assert_eq!(resolved, PathBuf::from("sub.dat"));
    }

    #[test]
    fn test_normalize_lexically() {
        assert_eq!(
            normalize_lexically(Path::new("/a/./b/../c.dat")),
            PathBuf::from("/a/c.dat")
        );
        assert_eq!(
            normalize_lexically(Path::new("../x.dat")),
            PathBuf::from("../x.dat")
        );
    }

    #[test]
    fn test_canonical_path_equal_for_two_spellings() {
        let temp = tempfile::tempdir().unwrap();
        fs::create_dir(temp.path().join("bulk")).unwrap();
        fs::write(temp.path().join("sub.dat"), "CARD").unwrap();

        let direct = canonical_path(&temp.path().join("sub.dat")).unwrap();
        let indirect = canonical_path(&temp.path().join("bulk/../sub.dat")).unwrap();
        assert_eq!(direct, indirect);
        assert!(direct.is_absolute());
    }

    #[test]
    fn test_canonical_path_missing_file() {
        let temp = tempfile::tempdir().unwrap();
        let err = canonical_path(&temp.path().join("missing.dat")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
