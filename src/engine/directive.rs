//! INCLUDE directive parsing
//!
//! A directive starts at column one:
//! INCLUDE 'path/to/file.dat'   $ trailing text is ignored
//! include "path/to/file.dat"

use once_cell::sync::Lazy;
use regex::Regex;

/// Static regex for the directive: keyword, at least one blank, then a quoted
/// literal closed by the same quote character.
pub static INCLUDE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^(?i:INCLUDE)[ \t]+(?:'([^']*)'|"([^"]*)")"#).expect("Invalid INCLUDE_RE regex")
});

/// Extract the quoted target of an INCLUDE directive.
///
/// Returns `None` for ordinary lines, malformed directives and empty targets alike.
pub fn parse_include_target(line: &str) -> Option<&str> {
    let caps = INCLUDE_RE.captures(line)?;
    let target = caps.get(1).or_else(|| caps.get(2))?.as_str();
    if target.is_empty() {
        None
    } else {
        Some(target)
    }
}
