//! Watch exclusion rules
//!
//! The watcher skips paths matching a fixed set of patterns: version-control
//! internals, dependency directories, editor/OS metadata, temporary and log
//! files, and wayfarer's own state directory. Config may extend the set but
//! never replace it.

use lazy_static::lazy_static;
use regex::Regex;
use std::path::{Component, Path};

use crate::config::CONFIG_DIR;

/// Glob patterns matched against each path component
const BUILTIN_GLOBS: &[&str] = &[
    ".git",
    CONFIG_DIR,
    "node_modules",
    "target",
    "dist",
    ".idea",
    ".vscode",
    ".DS_Store",
    "Thumbs.db",
    "*.tmp",
    "*.log",
    "*.swp",
    "*.swo",
    "*~",
];

lazy_static! {
    static ref BUILTIN_PATTERNS: Vec<Regex> = BUILTIN_GLOBS
        .iter()
        .map(|glob| glob_to_regex(glob).expect("built-in ignore pattern must compile"))
        .collect();
}

/// Translate a component glob (`*` wildcard only) into an anchored regex
fn glob_to_regex(glob: &str) -> Result<Regex, regex::Error> {
    let pattern = format!("^{}$", regex::escape(glob).replace(r"\*", ".*"));
    Regex::new(&pattern)
}

/// Compiled set of exclusion patterns
#[derive(Debug, Clone)]
pub struct IgnoreSet {
    patterns: Vec<Regex>,
}

impl IgnoreSet {
    /// The fixed built-in set
    pub fn builtin() -> Self {
        Self {
            patterns: BUILTIN_PATTERNS.clone(),
        }
    }

    /// The built-in set extended with additional component globs.
    /// Patterns that fail to compile are skipped with a warning.
    pub fn with_extra(extra: &[String]) -> Self {
        let mut patterns = BUILTIN_PATTERNS.clone();
        for glob in extra {
            match glob_to_regex(glob) {
                Ok(re) => patterns.push(re),
                Err(e) => eprintln!("Skipping invalid ignore pattern '{}': {}", glob, e),
            }
        }
        Self { patterns }
    }

    /// True when any component of `path` matches an exclusion pattern
    pub fn is_ignored<P: AsRef<Path>>(&self, path: P) -> bool {
        path.as_ref().components().any(|component| {
            if let Component::Normal(name) = component {
                let name = name.to_string_lossy();
                self.patterns.iter().any(|re| re.is_match(&name))
            } else {
                false
            }
        })
    }
}

impl Default for IgnoreSet {
    fn default() -> Self {
        Self::builtin()
    }
}
