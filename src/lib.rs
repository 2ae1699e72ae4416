//! # mediagather
//!
//! Collect media files scattered across a directory tree into per-folder
//! buckets under a destination root, with deterministic name
//! disambiguation.
//!
//! ## What it does
//!
//! The source tree is scanned for files matching a suffix filter
//! (image/video extensions by default). Each file is copied into a
//! sub-directory of the destination root named after the file's immediate
//! parent directory, so `jane.doe/holiday/lena.png` lands in
//! `dst/holiday/lena.png`. When several distinct source directories share
//! a base name, the planner assigns unique destinations instead of
//! merging them:
//!
//! - **Literal duplicates** (`a/photos` and `b/photos`) get `_<n>`
//!   suffixes: `photos`, `photos_1`.
//! - **Pseudo duplicates** (`Holiday` vs `holiday`, which collide on
//!   case-insensitive filesystems) get ` (<k>)` suffixes: `holiday`,
//!   `Holiday (1)`.
//!
//! Index numbers follow the order directories are first encountered, so a
//! given scan order always produces the same layout. This is a one-shot
//! copy tool: it never diffs content or skips files based on a previous
//! run.
//!
//! ## Quick Start
//!
//! ```no_run
//! use mediagather::Gatherer;
//!
//! let stats = Gatherer::new("/phone/DCIM", "/backup/media").run()?;
//! println!("Copied {} files ({} bytes)", stats.files_copied, stats.bytes_copied);
//! # Ok::<(), mediagather::Error>(())
//! ```
//!
//! ## Staged API
//!
//! The three stages are exposed separately for callers that want to
//! inspect the plan before copying:
//!
//! ```no_run
//! use mediagather::{scan, plan, execute, GatherOptions, SuffixFilter};
//! use std::path::Path;
//!
//! let options = GatherOptions::default().with_parallel(8);
//! let sources = scan(Path::new("src"), &SuffixFilter::default(), &options)?;
//! let plan = plan(sources, Path::new("dst"))?;
//! for dir in plan.dest_dirs() {
//!     println!("will create {}", dir.display());
//! }
//! let stats = execute(&plan, &options)?;
//! println!("{} files copied", stats.files_copied);
//! # Ok::<(), mediagather::Error>(())
//! ```
//!
//! ## Guarantees
//!
//! - Every discovered file is assigned exactly one destination directory;
//!   files from the same source directory always share one.
//! - No two distinct source directories ever share a destination, even
//!   compared case-insensitively.
//! - Destination directories are created exactly once, before any copy
//!   into them. A destination directory that already exists aborts the
//!   run ([`Error::DirectoryConflict`]) rather than merging silently.
//! - File copies are atomic (temp file + rename) and preserve timestamps.
//! - Failures are never silently skipped: fail-fast by default, or one
//!   aggregate report listing every failed path in best-effort mode.
//!
//! ## Optional Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `progress` | Progress bar support with indicatif |
//! | `tracing` | Structured logging with the tracing crate |
//! | `serde` | Serialize/Deserialize for [`GatherOptions`] |
//! | `full` | Enable all optional features |

#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod error;
mod execute;
mod options;
mod plan;
mod scan;
mod suffix;
mod utils;

#[cfg(feature = "progress")]
mod progress;

pub use builder::{Gatherer, GatherStats};
pub use error::{Error, Result, is_no_space_error};
pub use execute::{ExecStats, MANIFEST_FILE_NAME, execute, execute_with_progress};
pub use options::{GatherOptions, OnError};
pub use plan::{Assignment, CopyPlan, SourceEntry, plan};
pub use scan::scan;
pub use suffix::{DEFAULT_SUFFIXES, SuffixFilter};

#[cfg(feature = "progress")]
#[cfg_attr(docsrs, doc(cfg(feature = "progress")))]
pub use progress::create_progress_bar;
