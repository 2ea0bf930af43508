//! Errors recorded while resolving and searching an include tree

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// One entry of the error list.
///
/// None of these abort a search; they are collected and reported.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("cannot open '{}': {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("cannot read '{}' at line {line}: {source}", .path.display())]
    Read {
        path: PathBuf,
        /// 1-based line whose read failed
        line: usize,
        source: io::Error,
    },

    #[error("cannot resolve include '{target}' ('{}', line {line}): {source}", .from.display())]
    Include {
        target: String,
        from: PathBuf,
        line: usize,
        source: io::Error,
    },

    #[error("cannot search '{}': {source}", .path.display())]
    Search { path: PathBuf, source: io::Error },
}

impl EngineError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::Open { .. } => "OPEN_FAILED",
            EngineError::Read { .. } => "READ_FAILED",
            EngineError::Include { .. } => "INCLUDE_UNRESOLVED",
            EngineError::Search { .. } => "SEARCH_FAILED",
        }
    }

    /// File the error is about
    pub fn path(&self) -> &PathBuf {
        match self {
            EngineError::Open { path, .. }
            | EngineError::Read { path, .. }
            | EngineError::Search { path, .. } => path,
            EngineError::Include { from, .. } => from,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn not_found() -> io::Error {
        io::Error::new(io::ErrorKind::NotFound, "No such file or directory")
    }

    #[test]
    fn test_open_message() {
        let err = EngineError::Open {
            path: PathBuf::from("/deck/main.dat"),
            source: not_found(),
        };
        assert_eq!(
            err.to_string(),
            "cannot open '/deck/main.dat': No such file or directory"
        );
        assert_eq!(err.code(), "OPEN_FAILED");
    }

    #[test]
    fn test_include_message_names_target_and_origin() {
        let err = EngineError::Include {
            target: "missing.dat".to_string(),
            from: PathBuf::from("/deck/main.dat"),
            line: 3,
            source: not_found(),
        };
        let message = err.to_string();
        assert!(message.contains("'missing.dat'"));
        assert!(message.contains("/deck/main.dat"));
        assert!(message.contains("line 3"));
        assert_eq!(err.path(), &PathBuf::from("/deck/main.dat"));
    }

    #[test]
    fn test_codes_are_distinct() {
        let read = EngineError::Read {
            path: PathBuf::from("a"),
            line: 1,
            source: not_found(),
        };
        let search = EngineError::Search {
            path: PathBuf::from("a"),
            source: not_found(),
        };
        assert_eq!(read.code(), "READ_FAILED");
        assert_eq!(read.to_string(), "cannot read 'a' at line 1: No such file or directory");
        assert_eq!(search.code(), "SEARCH_FAILED");
    }
}
