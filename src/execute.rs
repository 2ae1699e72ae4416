//! Copy execution.
//!
//! Consumes a [`CopyPlan`] in three phases:
//!
//! 1. Create every planned destination directory exactly once (sequential
//!    prefix step; a directory that already exists is a fatal
//!    [`Error::DirectoryConflict`], never a merge).
//! 2. Copy files in parallel with controlled concurrency. Each copy is
//!    atomic: temp file in the destination directory, then rename. File
//!    timestamps are preserved.
//! 3. Optionally write a manifest of the copied source paths at the
//!    destination root.
//!
//! Copies share no mutable state once the directories exist, so they run
//! independently across a bounded rayon pool. Cancellation is cooperative
//! and checked between files; in-flight files always finish.

use crate::error::{Error, Result};
use crate::options::{GatherOptions, OnError};
use crate::plan::CopyPlan;
use crate::utils::path::safe_path;
use rayon::prelude::*;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Name of the manifest file written at the destination root.
///
/// One absolute source path per line, written once after all copies
/// complete.
pub const MANIFEST_FILE_NAME: &str = "filepathlist.txt";

/// Statistics from an executed plan.
///
/// # Example
///
/// ```no_run
/// use mediagather::{execute, plan, GatherOptions};
/// use std::path::Path;
///
/// let plan = plan(Vec::new(), Path::new("dst"))?;
/// let stats = execute(&plan, &GatherOptions::default())?;
/// println!("Copied {} files ({} bytes)", stats.files_copied, stats.bytes_copied);
/// # Ok::<(), mediagather::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecStats {
    /// Number of files successfully copied
    pub files_copied: u64,
    /// Total bytes copied
    pub bytes_copied: u64,
    /// Number of destination directories created
    pub dirs_created: u64,
    /// Duration of the execution
    pub duration: std::time::Duration,
}

/// Execute a copy plan.
///
/// See [`execute_with_progress`] for the variant with a per-file progress
/// hook.
///
/// # Errors
///
/// Returns an error if:
/// - A planned destination directory already exists ([`Error::DirectoryConflict`])
/// - A file fails to copy ([`Error::Copy`] in fail-fast mode,
///   [`Error::PartialCopy`] in best-effort mode)
/// - The run is cancelled ([`Error::Cancelled`])
/// - Directory creation or the manifest write fails ([`Error::Io`])
pub fn execute(plan: &CopyPlan, options: &GatherOptions) -> Result<ExecStats> {
    execute_with_progress(plan, options, || {})
}

/// Execute a copy plan, invoking `on_file` after each completed file copy.
///
/// The hook is called from worker threads; a progress bar's `inc` is the
/// intended use.
///
/// # Errors
///
/// Same as [`execute`].
pub fn execute_with_progress(
    plan: &CopyPlan,
    options: &GatherOptions,
    on_file: impl Fn() + Send + Sync,
) -> Result<ExecStats> {
    let start_time = Instant::now();

    // Phase 1: directory creation, sequential, happens-before all copies.
    // The destination root itself may be freshly created; each planned
    // directory must not exist yet.
    fs::create_dir_all(safe_path(plan.dest_root()))?;

    let mut dirs_created = 0u64;
    for dir in plan.dest_dirs() {
        if options.is_cancelled() {
            return Err(Error::Cancelled {
                files_copied: 0,
                bytes_copied: 0,
            });
        }

        let safe_dst = safe_path(dir);
        if safe_dst.exists() {
            return Err(Error::DirectoryConflict(dir.clone()));
        }
        fs::create_dir(&safe_dst)?;
        dirs_created += 1;
    }

    // Phase 2: parallel file copies.
    let total = plan.len();
    let files_copied = AtomicU64::new(0);
    let bytes_copied = AtomicU64::new(0);

    match options.on_error {
        OnError::FailFast => {
            let copy_all = || -> Result<()> {
                plan.assignments().par_iter().try_for_each(|assignment| {
                    if options.is_cancelled() {
                        return Err(cancelled(&files_copied, &bytes_copied));
                    }
                    let bytes =
                        copy_file_atomic(assignment.source().path(), &assignment.dest_file(), options)
                            .map_err(|source| Error::Copy {
                                path: assignment.source().path().to_path_buf(),
                                source,
                            })?;
                    files_copied.fetch_add(1, Ordering::Relaxed);
                    bytes_copied.fetch_add(bytes, Ordering::Relaxed);
                    on_file();
                    Ok(())
                })
            };
            in_pool(options, copy_all)?;
        }
        OnError::BestEffort => {
            let copy_all = || -> Vec<(PathBuf, String)> {
                plan.assignments()
                    .par_iter()
                    .filter_map(|assignment| {
                        if options.is_cancelled() {
                            return None;
                        }
                        match copy_file_atomic(
                            assignment.source().path(),
                            &assignment.dest_file(),
                            options,
                        ) {
                            Ok(bytes) => {
                                files_copied.fetch_add(1, Ordering::Relaxed);
                                bytes_copied.fetch_add(bytes, Ordering::Relaxed);
                                on_file();
                                None
                            }
                            Err(e) => {
                                options.warn(&format!(
                                    "Failed to copy {}: {}",
                                    assignment.source().path().display(),
                                    e
                                ));
                                Some((assignment.source().path().to_path_buf(), e.to_string()))
                            }
                        }
                    })
                    .collect()
            };
            let failures = in_pool(options, copy_all);

            if options.is_cancelled() {
                return Err(cancelled(&files_copied, &bytes_copied));
            }
            if !failures.is_empty() {
                return Err(Error::PartialCopy {
                    failed: failures.len(),
                    total,
                    failures,
                });
            }
        }
    }

    if options.is_cancelled() {
        return Err(cancelled(&files_copied, &bytes_copied));
    }

    // Phase 3: manifest, written once after all copies complete.
    if options.manifest {
        write_manifest(plan)?;
    }

    Ok(ExecStats {
        files_copied: files_copied.load(Ordering::Relaxed),
        bytes_copied: bytes_copied.load(Ordering::Relaxed),
        dirs_created,
        duration: start_time.elapsed(),
    })
}

fn cancelled(files_copied: &AtomicU64, bytes_copied: &AtomicU64) -> Error {
    Error::Cancelled {
        files_copied: files_copied.load(Ordering::Relaxed),
        bytes_copied: bytes_copied.load(Ordering::Relaxed),
    }
}

/// Run `f` on a pool sized to `options.parallel`, falling back to the
/// global pool if the custom pool cannot be built.
fn in_pool<R: Send>(options: &GatherOptions, f: impl FnOnce() -> R + Send) -> R {
    if options.parallel == rayon::current_num_threads() {
        return f();
    }
    match rayon::ThreadPoolBuilder::new()
        .num_threads(options.parallel)
        .build()
    {
        Ok(pool) => pool.install(f),
        Err(e) => {
            options.warn(&format!(
                "Failed to create thread pool ({e}), using global pool"
            ));
            f()
        }
    }
}

/// Copy a single file atomically into its (already created) destination
/// directory, preserving permissions and, if configured, timestamps.
///
/// Uses a temp file + rename so no partial file is ever visible at the
/// destination path.
fn copy_file_atomic(src: &Path, dst: &Path, options: &GatherOptions) -> io::Result<u64> {
    let src_meta = fs::metadata(src)?;
    let file_len = src_meta.len();

    let src_file = File::open(src)?;

    let dst_parent = dst.parent().unwrap_or(Path::new("."));
    let safe_dst_parent = safe_path(dst_parent);
    let temp_file = tempfile::NamedTempFile::new_in(&safe_dst_parent)?;

    let bytes_copied = copy_file_contents(&src_file, temp_file.as_file(), file_len)?;

    if options.fsync {
        temp_file.as_file().sync_all()?;
    }

    fs::set_permissions(temp_file.path(), src_meta.permissions())?;

    // The destination directory is freshly created, so the target name is
    // free unless something else raced us; noclobber turns that race into
    // an error instead of an overwrite.
    let safe_dst = safe_path(dst);
    temp_file.persist_noclobber(&safe_dst).map_err(|e| e.error)?;

    if options.preserve_timestamps {
        let mtime = filetime::FileTime::from_last_modification_time(&src_meta);
        let atime = filetime::FileTime::from_last_access_time(&src_meta);
        // Timestamp errors are not critical
        let _ = filetime::set_file_times(&safe_dst, atime, mtime);
    }

    Ok(bytes_copied)
}

/// Efficiently copy file contents using the best available method.
///
/// On Linux, uses `copy_file_range` for kernel-to-kernel transfer and
/// falls back to a userspace copy where the filesystem does not support
/// it.
fn copy_file_contents(src: &File, dst: &File, len: u64) -> io::Result<u64> {
    #[cfg(target_os = "linux")]
    {
        copy_file_range_all(src, dst, len)
    }
    #[cfg(not(target_os = "linux"))]
    {
        use std::io::BufReader;
        let _ = len; // unused on non-Linux
        io::copy(&mut BufReader::new(src), &mut &*dst)
    }
}

#[cfg(target_os = "linux")]
fn copy_file_range_all(src: &File, dst: &File, len: u64) -> io::Result<u64> {
    use std::os::unix::io::AsRawFd;

    let src_fd = src.as_raw_fd();
    let dst_fd = dst.as_raw_fd();
    let mut remaining = len;
    let mut copied: u64 = 0;

    while remaining > 0 {
        // 128MB chunks keep single syscalls bounded
        let chunk_size = remaining.min(128 * 1024 * 1024) as usize;

        // SAFETY: valid file descriptors, null offsets mean current position
        let result = unsafe {
            libc::copy_file_range(
                src_fd,
                std::ptr::null_mut(),
                dst_fd,
                std::ptr::null_mut(),
                chunk_size,
                0,
            )
        };

        if result < 0 {
            let err = io::Error::last_os_error();
            // EXDEV: cross-device, ENOSYS: not supported, EINVAL: fs
            // doesn't support it; fall back to userspace copy
            if copied == 0
                && matches!(
                    err.raw_os_error(),
                    Some(libc::EXDEV)
                        | Some(libc::ENOSYS)
                        | Some(libc::EINVAL)
                        | Some(libc::EOPNOTSUPP)
                )
            {
                use std::io::BufReader;
                return io::copy(&mut BufReader::new(src), &mut &*dst);
            }
            return Err(err);
        }

        if result == 0 {
            // EOF (file may have been truncated under us)
            break;
        }

        let bytes_copied = result as u64;
        copied += bytes_copied;
        remaining = remaining.saturating_sub(bytes_copied);
    }

    Ok(copied)
}

fn write_manifest(plan: &CopyPlan) -> Result<()> {
    let path = plan.dest_root().join(MANIFEST_FILE_NAME);
    let mut out = BufWriter::new(File::create(safe_path(&path))?);
    for assignment in plan.assignments() {
        writeln!(out, "{}", assignment.source().path().display())?;
    }
    out.flush()?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
