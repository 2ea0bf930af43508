//! Include graph resolution
//!
//! Walks the include tree breadth-first from the root file. Every file is
//! opened at most once, however many times it is included.

use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};

use crate::core::file_reader::LineReader;
use crate::core::paths::{canonical_path, resolve_include};
use crate::engine::directive::parse_include_target;
use crate::engine::error::EngineError;

/// Outcome of resolving an include tree
#[derive(Debug, Default)]
pub struct Resolution {
    /// Successfully opened files, root first, in open order
    pub files: Vec<PathBuf>,

    /// Files that could not be opened or includes that could not be resolved
    pub errors: Vec<EngineError>,

    /// Visited files whose read failed part way; their error is already recorded
    pub unreadable: HashSet<PathBuf>,
}

/// Resolve every file reachable from `root` through INCLUDE directives
pub fn resolve(root: &Path) -> Resolution {
    let mut resolution = Resolution::default();
    let mut queue = VecDeque::new();
    let mut seen = HashSet::new();

    match canonical_path(root) {
        Ok(canonical) => {
            seen.insert(canonical.clone());
            queue.push_back(canonical);
        }
        Err(source) => {
            record(
                &mut resolution.errors,
                EngineError::Open {
                    path: root.to_path_buf(),
                    source,
                },
            );
            return resolution;
        }
    }

    while let Some(path) = queue.pop_front() {
        let lines = match LineReader::open(&path) {
            Ok(lines) => lines,
            Err(source) => {
                record(&mut resolution.errors, EngineError::Open { path, source });
                continue;
            }
        };

        tracing::debug!("opened {}", path.display());
        resolution.files.push(path.clone());

        for (index, line) in lines.enumerate() {
            let line_number = index + 1;
            let line = match line {
                Ok(line) => line,
                Err(source) => {
                    record(
                        &mut resolution.errors,
                        EngineError::Read {
                            path: path.clone(),
                            line: line_number,
                            source,
                        },
                    );
                    resolution.unreadable.insert(path.clone());
                    break;
                }
            };

            let Some(target) = parse_include_target(&line) else {
                continue;
            };

            match canonical_path(&resolve_include(&path, target)) {
                Ok(included) => {
                    if seen.insert(included.clone()) {
                        tracing::debug!(
                            "{}:{} includes {}",
                            path.display(),
                            line_number,
                            included.display()
                        );
                        queue.push_back(included);
                    }
                }
                Err(source) => record(
                    &mut resolution.errors,
                    EngineError::Include {
                        target: target.to_string(),
                        from: path.clone(),
                        line: line_number,
                        source,
                    },
                ),
            }
        }
    }

    resolution
}

fn record(errors: &mut Vec<EngineError>, error: EngineError) {
    tracing::warn!("{}", error);
    errors.push(error);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    fn canonical(path: &Path) -> PathBuf {
        path.canonicalize().unwrap()
    }

    #[test]
    fn test_single_file_without_includes() {
        let temp = tempdir().unwrap();
        let root = write(temp.path(), "main.dat", "GRID 1\nGRID 2\n");

        let resolution = resolve(&root);
        assert_eq!(resolution.files, vec![canonical(&root)]);
        assert!(resolution.errors.is_empty());
    }

    #[test]
    fn test_breadth_first_order() {
        let temp = tempdir().unwrap();
        let root = write(
            temp.path(),
            "main.dat",
            "INCLUDE 'a.dat'\nINCLUDE 'b.dat'\n",
        );
        let a = write(temp.path(), "a.dat", "INCLUDE 'c.dat'\n");
        let b = write(temp.path(), "b.dat", "B\n");
        let c = write(temp.path(), "c.dat", "C\n");

        let resolution = resolve(&root);
        assert_eq!(
            resolution.files,
            vec![canonical(&root), canonical(&a), canonical(&b), canonical(&c)]
        );
    }

    #[test]
    fn test_targets_are_relative_to_including_file() {
        let temp = tempdir().unwrap();
        let root = write(temp.path(), "main.dat", "INCLUDE 'bulk/grid.dat'\n");
        let grid = write(temp.path(), "bulk/grid.dat", "INCLUDE 'nodes.dat'\n");
        let nodes = write(temp.path(), "bulk/nodes.dat", "GRID\n");

        let resolution = resolve(&root);
        assert_eq!(
            resolution.files,
            vec![canonical(&root), canonical(&grid), canonical(&nodes)]
        );
    }

    #[test]
    fn test_absolute_target() {
        let temp = tempdir().unwrap();
        let shared = write(temp.path(), "shared/mat.dat", "MAT1\n");
        let root = write(
            temp.path(),
            "deck/main.dat",
            &format!("INCLUDE '{}'\n", shared.display()),
        );

        let resolution = resolve(&root);
        assert_eq!(resolution.files, vec![canonical(&root), canonical(&shared)]);
    }

    #[test]
    fn test_self_inclusion_visits_once() {
        let temp = tempdir().unwrap();
        let root = write(temp.path(), "main.dat", "INCLUDE 'main.dat'\nINCLUDE './main.dat'\n");

        let resolution = resolve(&root);
        assert_eq!(resolution.files, vec![canonical(&root)]);
        assert!(resolution.errors.is_empty());
    }

    #[test]
    fn test_cycle_visits_each_file_once() {
        let temp = tempdir().unwrap();
        let root = write(temp.path(), "main.dat", "INCLUDE 'sub/a.dat'\n");
        let a = write(temp.path(), "sub/a.dat", "INCLUDE 'b.dat'\n");
        let b = write(temp.path(), "sub/b.dat", "INCLUDE '../main.dat'\nINCLUDE 'a.dat'\n");

        let resolution = resolve(&root);
        assert_eq!(
            resolution.files,
            vec![canonical(&root), canonical(&a), canonical(&b)]
        );
    }

    #[test]
    fn test_duplicate_spellings_visit_once() {
        let temp = tempdir().unwrap();
        fs::create_dir(temp.path().join("dir")).unwrap();
        let root = write(
            temp.path(),
            "main.dat",
            "INCLUDE 'sub.dat'\nINCLUDE \"./dir/../sub.dat\"\n",
        );
        let sub = write(temp.path(), "sub.dat", "CARD1 DATA\n");

        let resolution = resolve(&root);
        assert_eq!(resolution.files, vec![canonical(&root), canonical(&sub)]);
    }

    #[test]
    fn test_missing_include_is_recorded_and_traversal_continues() {
        let temp = tempdir().unwrap();
        let root = write(
            temp.path(),
            "main.dat",
            "INCLUDE 'missing.dat'\nINCLUDE 'present.dat'\n",
        );
        let present = write(temp.path(), "present.dat", "X\n");

        let resolution = resolve(&root);
        assert_eq!(resolution.files, vec![canonical(&root), canonical(&present)]);
        assert_eq!(resolution.errors.len(), 1);
        assert!(matches!(
            &resolution.errors[0],
            EngineError::Include { target, line: 1, .. } if target == "missing.dat"
        ));
    }

    #[test]
    fn test_missing_root() {
        let temp = tempdir().unwrap();
        let resolution = resolve(&temp.path().join("nope.dat"));
        assert!(resolution.files.is_empty());
        assert_eq!(resolution.errors.len(), 1);
        assert!(matches!(resolution.errors[0], EngineError::Open { .. }));
    }

    #[test]
    fn test_directory_target_is_an_open_failure() {
        let temp = tempdir().unwrap();
        fs::create_dir(temp.path().join("folder")).unwrap();
        let root = write(temp.path(), "main.dat", "INCLUDE 'folder'\n");

        let resolution = resolve(&root);
        assert_eq!(resolution.files, vec![canonical(&root)]);
        assert_eq!(resolution.errors.len(), 1);
        assert!(matches!(resolution.errors[0], EngineError::Open { .. }));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_read_failure_keeps_file_and_records_one_error() {
        let temp = tempdir().unwrap();
        let root = write(temp.path(), "main.dat", "INCLUDE '/proc/self/mem'
");

        let resolution = resolve(&root);
        assert_eq!(resolution.files.len(), 2);
        let mem = &resolution.files[1];
        assert_eq!(resolution.unreadable.len(), 1);
        assert!(resolution.unreadable.contains(mem));
        assert_eq!(resolution.errors.len(), 1);
        assert!(matches!(
            &resolution.errors[0],
            EngineError::Read { path, line: 1, .. } if path == mem
        ));
        assert!(resolution.errors[0].to_string().contains("at line 1"));
    }

    #[test]
    fn test_malformed_directives_are_ignored() {
        let temp = tempdir().unwrap();
        let root = write(
            temp.path(),
            "main.dat",
            "  INCLUDE 'sub.dat'\nINCLUDE'sub.dat'\nINCLUDE \"sub.dat\n$INCLUDE 'sub.dat'\n",
        );
        write(temp.path(), "sub.dat", "X\n");

        let resolution = resolve(&root);
        assert_eq!(resolution.files, vec![canonical(&root)]);
        assert!(resolution.errors.is_empty());
    }
}
