//! File and directory ignore pattern handling for templates.
//! Processes `.bakeignore` files to exclude specific paths from rendering,
//! similar to `.gitignore`.

use crate::config::CONFIG_FILES;
use crate::error::Result;
use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;
use std::{fs::read_to_string, path::Path};

/// Ignore file name
pub const IGNORE_FILE: &str = ".bakeignore";

/// Patterns that are always ignored.
pub const DEFAULT_IGNORE_PATTERNS: &[&str] =
    &[".git/**", ".git", ".hg/**", ".svn/**", "**/.DS_Store", "**/__pycache__", "**/__pycache__/**", "**/*.pyc"];

/// Reads the `.bakeignore` file of a template and builds the set of ignored
/// paths. The ignore file itself, the manifest and the default patterns are
/// always part of the set.
///
/// # Errors
/// * `Error::GlobSetParseError` for an invalid pattern
///
/// # Example
/// ```ignore
/// # Contents of .bakeignore:
/// *.orig
/// docs/**
/// ```
pub fn parse_bakeignore_file<P: AsRef<Path>>(template_root: P) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    let ignore_path = template_root.as_ref().join(IGNORE_FILE);

    for pattern in DEFAULT_IGNORE_PATTERNS.iter().copied().chain(CONFIG_FILES).chain([IGNORE_FILE]) {
        builder.add(Glob::new(pattern)?);
    }

    if let Ok(contents) = read_to_string(&ignore_path) {
        for line in contents.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            builder.add(Glob::new(line)?);
        }
    } else {
        debug!("No {} in template", IGNORE_FILE);
    }

    Ok(builder.build()?)
}
