//! Error types for mediagather.
//!
//! This module provides the [`Error`] enum containing all possible errors
//! that can occur while planning and executing a gather run, and the
//! [`Result`] type alias.
//!
//! # Error Categories
//!
//! | Category | Errors |
//! |----------|--------|
//! | Input | [`Error::InvalidPath`], [`Error::SourceNotFound`], [`Error::NotADirectory`] |
//! | Planner invariant | [`Error::DirectoryConflict`] |
//! | IO | [`Error::Copy`], [`Error::Io`] |
//! | Partial | [`Error::PartialCopy`] |
//! | Control | [`Error::Cancelled`] |

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for mediagather operations.
///
/// This is a type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Check if an IO error indicates "no space left on device".
///
/// This helper function detects storage-full conditions across platforms.
///
/// # Platform Support
///
/// | Platform | Error Detection |
/// |----------|-----------------|
/// | Unix | `ENOSPC` (errno 28) |
/// | Windows | `ERROR_DISK_FULL` (0x70) |
///
/// # Example
///
/// ```no_run
/// use std::io;
/// use mediagather::is_no_space_error;
///
/// let error = io::Error::new(io::ErrorKind::StorageFull, "disk full");
/// if is_no_space_error(&error) {
///     println!("Destination has no space!");
/// }
/// ```
pub fn is_no_space_error(error: &io::Error) -> bool {
    if error.kind() == io::ErrorKind::StorageFull {
        return true;
    }

    #[cfg(unix)]
    {
        // ENOSPC = 28 on most Unix systems; the raw OS error might be
        // available even if kind() isn't StorageFull
        if let Some(raw_error) = error.raw_os_error() {
            const ENOSPC: i32 = 28;
            return raw_error == ENOSPC;
        }
    }

    #[cfg(windows)]
    {
        if let Some(raw_error) = error.raw_os_error() {
            const ERROR_DISK_FULL: i32 = 112;
            return raw_error == ERROR_DISK_FULL;
        }
    }

    false
}

/// Errors that can occur while planning or executing a gather run.
///
/// All errors include relevant path information to aid debugging.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Input path is malformed (no file name, no parent directory, or a
    /// parent name that is not valid UTF-8)
    ///
    /// Planning aborts entirely on this error; a partial mapping is never
    /// returned.
    #[error("Invalid source path: {0}")]
    InvalidPath(PathBuf),

    /// Scan root does not exist
    #[error("Source path does not exist: {0}")]
    SourceNotFound(PathBuf),

    /// Scan root is not a directory
    #[error("Source is not a directory: {0}")]
    NotADirectory(PathBuf),

    /// A planned destination directory already exists.
    ///
    /// The executor creates every destination directory exactly once; a
    /// directory that is already present means the plan's uniqueness
    /// invariant was broken (or the destination root was pre-populated with
    /// a colliding name). Files are never merged into an existing
    /// directory.
    #[error("Destination directory already exists: {0}")]
    DirectoryConflict(PathBuf),

    /// IO failure while copying a specific file
    #[error("Failed to copy {path}: {source}")]
    Copy {
        /// Source file that failed to copy
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// One or more files failed to copy in best-effort mode.
    ///
    /// Every remaining file was still attempted; `failures` lists each
    /// failed source path with the rendered cause.
    #[error("Failed to copy {failed} of {total} files")]
    PartialCopy {
        /// Number of files that failed to copy
        failed: usize,
        /// Total number of files
        total: usize,
        /// Each failed source path with its cause
        failures: Vec<(PathBuf, String)>,
    },

    /// IO error outside of a per-file copy (scan, directory creation,
    /// manifest write)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Operation was cancelled via the cancellation token.
    ///
    /// Carries partial statistics so the caller knows what completed
    /// before cancellation.
    #[error("Operation cancelled ({files_copied} files copied, {bytes_copied} bytes)")]
    Cancelled {
        /// Number of files successfully copied before cancellation
        files_copied: u64,
        /// Total bytes copied before cancellation
        bytes_copied: u64,
    },
}
