//! Path utilities for cross-platform compatibility.
//!
//! On Windows, the default maximum path length is 260 characters
//! (MAX_PATH). Prefixing with `\\?\` lifts that limit to 32,767
//! characters; destination trees built from deeply nested source trees can
//! exceed MAX_PATH easily, so every path handed to a create/persist
//! operation goes through [`safe_path`] first.

use std::path::{Path, PathBuf};

/// Convert a path to extended-length form on Windows.
///
/// - Paths already in `\\?\` form are returned unchanged
/// - UNC paths like `\\server\share\path` become `\\?\UNC\server\share\path`
/// - Relative paths are made absolute first, then prefixed
#[cfg(windows)]
pub fn to_extended_length_path(path: &Path) -> PathBuf {
    let path_str = path.as_os_str().to_string_lossy();
    if path_str.starts_with(r"\\?\") {
        return path.to_path_buf();
    }

    if path_str.starts_with(r"\\") {
        let without_prefix = &path_str[2..];
        let extended = format!(r"\\?\UNC{}", without_prefix);
        return PathBuf::from(extended);
    }

    let absolute_path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match std::fs::canonicalize(path) {
            Ok(canonical) => canonical,
            Err(_) => match std::env::current_dir() {
                Ok(cwd) => cwd.join(path),
                Err(_) => path.to_path_buf(),
            },
        }
    };

    let extended = format!(r"\\?\{}", absolute_path.display());
    PathBuf::from(extended)
}

/// Convert a path to extended-length form on Windows.
///
/// On non-Windows platforms, this simply returns a clone of the input path.
#[cfg(not(windows))]
#[allow(dead_code)]
pub fn to_extended_length_path(path: &Path) -> PathBuf {
    path.to_path_buf()
}

/// Convert a path for safe use with file operations.
///
/// On Windows this always returns the extended-length form, so paths stay
/// valid even when a temp-file name or subdirectory pushes them past
/// MAX_PATH. On other platforms it returns the path unchanged.
#[cfg(windows)]
pub fn safe_path(path: &Path) -> PathBuf {
    to_extended_length_path(path)
}

/// Convert a path for safe use with file operations.
///
/// On non-Windows platforms, this simply returns a clone of the input path.
#[cfg(not(windows))]
pub fn safe_path(path: &Path) -> PathBuf {
    path.to_path_buf()
}
