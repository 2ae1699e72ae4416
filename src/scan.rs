//! Source tree traversal.
//!
//! Walks the source directory recursively and collects every file whose
//! name matches the suffix filter, as [`SourceEntry`] values ready for
//! planning.
//!
//! Ordering matters downstream: duplicate-name indexes are assigned in
//! first-encounter order, so within each directory the matching files are
//! collected first (sorted by name), then sub-directories are visited
//! (sorted by name). `fs::read_dir` order is platform-defined; sorting
//! makes repeated runs over the same tree see the same input order.
//!
//! Hidden (dot-prefixed) files and directories are scanned like any other.
//! Symlinks are never followed, which also rules out traversal loops;
//! special files (sockets, devices) are skipped with a warning.

use crate::error::{Error, Result};
use crate::options::GatherOptions;
use crate::plan::SourceEntry;
use crate::suffix::SuffixFilter;
use std::fs;
use std::path::Path;

/// Scan `root` recursively for files matching `filter`.
///
/// The root is canonicalized once so every collected path is absolute (the
/// manifest records absolute source paths).
///
/// # Errors
///
/// Returns [`Error::SourceNotFound`] / [`Error::NotADirectory`] for a bad
/// root, [`Error::InvalidPath`] if a matched file's path cannot be broken
/// into parent directory and base name, and [`Error::Io`] for directory
/// read failures.
pub fn scan(root: &Path, filter: &SuffixFilter, options: &GatherOptions) -> Result<Vec<SourceEntry>> {
    if !root.exists() {
        return Err(Error::SourceNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(Error::NotADirectory(root.to_path_buf()));
    }
    let root = fs::canonicalize(root)?;

    let mut entries = Vec::new();
    scan_dir(&root, filter, options, &mut entries)?;
    Ok(entries)
}

fn scan_dir(
    dir: &Path,
    filter: &SuffixFilter,
    options: &GatherOptions,
    out: &mut Vec<SourceEntry>,
) -> Result<()> {
    let mut children: Vec<fs::DirEntry> = fs::read_dir(dir)?.collect::<std::io::Result<_>>()?;
    children.sort_by_key(fs::DirEntry::file_name);

    let mut subdirs = Vec::new();

    for child in children {
        let path = child.path();
        // Check symlink FIRST (is_dir/is_file would follow it)
        let file_type = child.file_type()?;

        if file_type.is_symlink() {
            options.warn(&format!("Skipping symlink: {}", path.display()));
        } else if file_type.is_dir() {
            subdirs.push(path);
        } else if file_type.is_file() {
            if filter.matches(&child.file_name()) {
                out.push(SourceEntry::new(path)?);
            }
        } else {
            options.warn(&format!("Skipping special file: {}", path.display()));
        }
    }

    for subdir in subdirs {
        scan_dir(&subdir, filter, options, out)?;
    }

    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
