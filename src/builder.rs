//! Builder API for ergonomic gather runs.
//!
//! [`Gatherer`] wires the three stages together: scan the source tree,
//! plan destination directories, execute the copies.
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```no_run
//! use mediagather::Gatherer;
//!
//! let stats = Gatherer::new("src", "dst").run()?;
//! println!("Copied {} of {} files", stats.files_copied, stats.files_found);
//! # Ok::<(), mediagather::Error>(())
//! ```
//!
//! ## With Options
//!
//! ```no_run
//! use mediagather::Gatherer;
//!
//! let stats = Gatherer::new("src", "dst")
//!     .suffixes(["jpg", "png"])  // Only these extensions
//!     .parallel(8)               // Use 8 copy workers
//!     .best_effort()             // Report all failures at the end
//!     .run()?;
//! # Ok::<(), mediagather::Error>(())
//! ```
//!
//! ## Dry Run
//!
//! ```no_run
//! use mediagather::Gatherer;
//!
//! // Inspect the planned directory layout without copying anything
//! let plan = Gatherer::new("src", "dst").plan()?;
//! for dir in plan.dest_dirs() {
//!     println!("{}", dir.display());
//! }
//! # Ok::<(), mediagather::Error>(())
//! ```

use crate::error::Result;
use crate::execute::{ExecStats, execute};
use crate::options::{GatherOptions, OnError};
use crate::plan::{CopyPlan, plan};
use crate::scan::scan;
use crate::suffix::SuffixFilter;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

/// Statistics from a complete gather run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GatherStats {
    /// Number of matching files found in the source tree
    pub files_found: u64,
    /// Number of files successfully copied
    pub files_copied: u64,
    /// Total bytes copied
    pub bytes_copied: u64,
    /// Number of destination directories created
    pub dirs_created: u64,
    /// Duration of the copy phase
    pub duration: std::time::Duration,
}

impl GatherStats {
    fn from_exec(files_found: u64, exec: ExecStats) -> Self {
        Self {
            files_found,
            files_copied: exec.files_copied,
            bytes_copied: exec.bytes_copied,
            dirs_created: exec.dirs_created,
            duration: exec.duration,
        }
    }
}

/// A builder for configuring and executing a gather run.
///
/// # Example
///
/// ```no_run
/// use mediagather::Gatherer;
///
/// let stats = Gatherer::new("/phone/DCIM", "/backup/media")
///     .parallel(16)
///     .run()?;
/// # Ok::<(), mediagather::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Gatherer {
    src: PathBuf,
    dst: PathBuf,
    filter: SuffixFilter,
    options: GatherOptions,
}

impl Gatherer {
    /// Create a new `Gatherer` for the given source and destination roots.
    ///
    /// Uses the default media suffix filter and default options
    /// (parallel=16, fail-fast, preserve timestamps, write manifest).
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst: Q) -> Self {
        Self {
            src: src.as_ref().to_path_buf(),
            dst: dst.as_ref().to_path_buf(),
            filter: SuffixFilter::default(),
            options: GatherOptions::default(),
        }
    }

    /// Replace the suffix filter with an explicit list of extensions.
    #[must_use]
    pub fn suffixes<I, S>(mut self, suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.filter = SuffixFilter::new(suffixes);
        self
    }

    /// Set the number of parallel copy workers.
    #[must_use]
    pub fn parallel(mut self, workers: usize) -> Self {
        self.options = self.options.with_parallel(workers);
        self
    }

    /// Attempt every file and report all failures at the end, instead of
    /// aborting on the first one.
    #[must_use]
    pub fn best_effort(mut self) -> Self {
        self.options = self.options.with_on_error(OnError::BestEffort);
        self
    }

    /// Disable timestamp preservation.
    #[must_use]
    pub fn no_timestamps(mut self) -> Self {
        self.options = self.options.without_timestamps();
        self
    }

    /// Disable fsync after writing files.
    #[must_use]
    pub fn no_fsync(mut self) -> Self {
        self.options = self.options.without_fsync();
        self
    }

    /// Do not write the manifest file.
    #[must_use]
    pub fn no_manifest(mut self) -> Self {
        self.options = self.options.without_manifest();
        self
    }

    /// Set a cancellation token checked between file copies.
    #[must_use]
    pub fn cancel_token(mut self, token: Arc<AtomicBool>) -> Self {
        self.options = self.options.with_cancel_token(token);
        self
    }

    /// Set a warning handler for non-fatal issues.
    #[must_use]
    pub fn on_warning(mut self, handler: fn(&str)) -> Self {
        self.options = self.options.with_warn_handler(handler);
        self
    }

    /// Get a reference to the current options.
    pub fn options(&self) -> &GatherOptions {
        &self.options
    }

    /// Scan and plan without copying anything.
    ///
    /// # Errors
    ///
    /// Returns scan/planning errors; the filesystem is only read.
    pub fn plan(&self) -> Result<CopyPlan> {
        let sources = scan(&self.src, &self.filter, &self.options)?;
        plan(sources, &self.dst)
    }

    /// Scan, plan and execute.
    ///
    /// # Errors
    ///
    /// Returns any scan, planning or execution error; see
    /// [`execute`](crate::execute::execute).
    pub fn run(self) -> Result<GatherStats> {
        let plan = self.plan()?;
        let files_found = plan.len() as u64;
        let exec = execute(&plan, &self.options)?;
        Ok(GatherStats::from_exec(files_found, exec))
    }
}
