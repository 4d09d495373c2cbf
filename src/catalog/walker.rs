//! Recursive discovery of candidate example files.
//!
//! Walks the catalog root and collects every file whose extension is in the
//! recognized set. Traversal order is unspecified; downstream stages treat
//! the output as an unordered candidate set. Any walk error (missing root,
//! unreadable directory) aborts the whole scan.

use anyhow::{Context, Result};
use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// Extensions recognized as example files when none are configured.
pub const EXAMPLE_EXTENSIONS: &[&str] = &["c", "py"];

/// Collect all candidate example files under `root`.
///
/// Walk errors are fatal to the catalog request and propagated to the caller.
pub fn walk_examples(root: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root) {
        let entry =
            entry.with_context(|| format!("Failed to walk catalog root: {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let recognized = entry
            .path()
            .extension()
            .and_then(OsStr::to_str)
            .is_some_and(|ext| extensions.iter().any(|e| e == ext));

        if recognized {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}
