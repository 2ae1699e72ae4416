//! Configuration options for gather runs.
//!
//! This module provides [`GatherOptions`] for configuring scan/copy behavior
//! and [`OnError`] for choosing the failure policy.
//!
//! # Example
//!
//! ```
//! use mediagather::{GatherOptions, OnError};
//!
//! let options = GatherOptions::default()
//!     .with_parallel(8)
//!     .with_on_error(OnError::BestEffort)
//!     .without_fsync();
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Failure policy for the copy phase.
///
/// # Default
///
/// The default is [`OnError::FailFast`]: the first failed copy aborts the
/// remaining copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OnError {
    /// Abort remaining copies on the first failure (default).
    #[default]
    FailFast,
    /// Attempt every remaining copy and report all failures afterward in
    /// one aggregate [`Error::PartialCopy`](crate::Error::PartialCopy).
    ///
    /// A failed copy is still reported, never silently skipped.
    BestEffort,
}

/// Options for a gather run.
///
/// Use [`Default::default()`] to get sensible defaults, then customize
/// using the builder methods.
///
/// # Default Values
///
/// | Field | Default | Description |
/// |-------|---------|-------------|
/// | `parallel` | 16 | Concurrent file copies |
/// | `on_error` | `FailFast` | Abort on first copy failure |
/// | `preserve_timestamps` | `true` | Copy file timestamps (mtime/atime) |
/// | `fsync` | `true` | Sync to disk after each write |
/// | `manifest` | `true` | Write `filepathlist.txt` at the destination root |
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GatherOptions {
    /// Number of parallel copy operations (default: 16)
    pub parallel: usize,

    /// Failure policy for the copy phase
    pub on_error: OnError,

    /// Whether to preserve file timestamps (default: true)
    ///
    /// When enabled, the modification time (mtime) and access time (atime)
    /// of copied files are set to match the source files.
    pub preserve_timestamps: bool,

    /// Whether to sync files to disk after writing (default: true)
    ///
    /// This ensures durability but may slow down copies.
    pub fsync: bool,

    /// Whether to write a manifest of copied source paths (default: true)
    ///
    /// The manifest is a plain-text file at the destination root, one
    /// absolute source path per line, written once after all copies
    /// complete.
    pub manifest: bool,

    /// Cooperative cancellation token (optional)
    ///
    /// Checked between file copies; in-flight files always finish.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub cancel_token: Option<Arc<AtomicBool>>,

    /// Callback for warnings (optional)
    ///
    /// If not set and the `tracing` feature is enabled, warnings are logged
    /// via tracing. Otherwise, warnings are silently ignored.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub warn_handler: Option<fn(&str)>,
}

impl Default for GatherOptions {
    fn default() -> Self {
        Self {
            parallel: 16,
            on_error: OnError::FailFast,
            preserve_timestamps: true,
            fsync: true,
            manifest: true,
            cancel_token: None,
            warn_handler: None,
        }
    }
}

impl GatherOptions {
    /// Set the number of parallel copy operations
    ///
    /// Value is clamped to at least 1 to prevent panics.
    #[must_use]
    pub fn with_parallel(mut self, n: usize) -> Self {
        self.parallel = n.max(1);
        self
    }

    /// Set the failure policy
    #[must_use]
    pub fn with_on_error(mut self, on_error: OnError) -> Self {
        self.on_error = on_error;
        self
    }

    /// Disable fsync for faster (but less durable) copies
    #[must_use]
    pub fn without_fsync(mut self) -> Self {
        self.fsync = false;
        self
    }

    /// Disable timestamp preservation
    #[must_use]
    pub fn without_timestamps(mut self) -> Self {
        self.preserve_timestamps = false;
        self
    }

    /// Disable the manifest file
    #[must_use]
    pub fn without_manifest(mut self) -> Self {
        self.manifest = false;
        self
    }

    /// Set a cancellation token
    #[must_use]
    pub fn with_cancel_token(mut self, token: Arc<AtomicBool>) -> Self {
        self.cancel_token = Some(token);
        self
    }

    /// Set a warning handler
    #[must_use]
    pub fn with_warn_handler(mut self, handler: fn(&str)) -> Self {
        self.warn_handler = Some(handler);
        self
    }

    /// Whether the cancellation token has been set to `true`.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel_token
            .as_ref()
            .is_some_and(|token| token.load(Ordering::Relaxed))
    }

    pub(crate) fn warn(&self, msg: &str) {
        if let Some(handler) = self.warn_handler {
            handler(msg);
        } else {
            #[cfg(feature = "tracing")]
            tracing::warn!("{}", msg);
        }
    }
}
