//! Destination planning.
//!
//! This module computes, for an ordered list of discovered source files, the
//! destination directory each file will be copied into. Every file lands in a
//! sub-directory of the destination root named after the file's immediate
//! parent directory, and name collisions between distinct source directories
//! are resolved deterministically:
//!
//! 1. **Literal duplicates** — distinct source directories sharing the same
//!    base name get `_<n>` suffixes in first-encounter order.
//! 2. **Pseudo duplicates** — names that only differ by letter case (which
//!    collide on case-insensitive filesystems) additionally get ` (<k>)`
//!    suffixes.
//!
//! The two passes compose (`name_<n> (<k>)`) and planning is a pure function
//! over in-memory data: no filesystem access, no global index, near-linear
//! cost via incrementally maintained name tables.

use crate::error::{Error, Result};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// A discovered source file, with the parent-directory attributes the
/// planner works from.
///
/// # Example
///
/// ```
/// use mediagather::SourceEntry;
///
/// let entry = SourceEntry::new("/data/jane.doe/holiday/lena.png")?;
/// assert_eq!(entry.parent_name(), "holiday");
/// # Ok::<(), mediagather::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    path: PathBuf,
    parent: PathBuf,
    parent_name: String,
}

impl SourceEntry {
    /// Create an entry from a file path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if the path has no file name, no
    /// parent directory, or a parent base name that is not valid UTF-8.
    /// The suffix arithmetic below is string-based; a lossy conversion
    /// could silently merge two distinct parents.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if path.file_name().is_none() {
            return Err(Error::InvalidPath(path));
        }
        let Some(parent) = path.parent().map(Path::to_path_buf) else {
            return Err(Error::InvalidPath(path));
        };
        let Some(parent_name) = parent.file_name().and_then(|n| n.to_str()) else {
            return Err(Error::InvalidPath(path));
        };
        let parent_name = parent_name.to_owned();
        Ok(Self {
            path,
            parent,
            parent_name,
        })
    }

    /// Full path of the source file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the immediate parent directory.
    #[must_use]
    pub fn parent(&self) -> &Path {
        &self.parent
    }

    /// Base name of the immediate parent directory.
    #[must_use]
    pub fn parent_name(&self) -> &str {
        &self.parent_name
    }
}

/// One planned copy: a source file and the directory it will land in.
///
/// The file keeps its own name on copy; `dest_dir` is a directory, not a
/// full file path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    source: SourceEntry,
    dest_dir: PathBuf,
}

impl Assignment {
    /// The source entry this assignment covers.
    #[must_use]
    pub fn source(&self) -> &SourceEntry {
        &self.source
    }

    /// The destination directory the file will be copied into.
    #[must_use]
    pub fn dest_dir(&self) -> &Path {
        &self.dest_dir
    }

    /// Full destination file path (`dest_dir` joined with the source file
    /// name).
    #[must_use]
    pub fn dest_file(&self) -> PathBuf {
        match self.source.path.file_name() {
            Some(name) => self.dest_dir.join(name),
            // SourceEntry::new rejects paths without a file name
            None => self.dest_dir.clone(),
        }
    }
}

/// The complete file → destination-directory mapping for one run.
///
/// Produced by [`plan`], consumed exactly once by
/// [`execute`](crate::execute::execute). Nothing is mutated afterward.
#[derive(Debug, Clone)]
pub struct CopyPlan {
    dest_root: PathBuf,
    assignments: Vec<Assignment>,
    dest_dirs: Vec<PathBuf>,
}

impl CopyPlan {
    /// The destination root all planned directories live under.
    #[must_use]
    pub fn dest_root(&self) -> &Path {
        &self.dest_root
    }

    /// All planned copies, in discovery order.
    #[must_use]
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// The distinct destination directories, in first-encounter order.
    ///
    /// Each corresponds to exactly one distinct source parent directory.
    #[must_use]
    pub fn dest_dirs(&self) -> &[PathBuf] {
        &self.dest_dirs
    }

    /// Number of planned file copies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Whether the plan contains no files.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

/// Compute a destination directory for every source entry.
///
/// Entries sharing a source parent directory always map to the same
/// destination directory; distinct parents never share one, even under
/// case-insensitive comparison. Index assignment follows first-encounter
/// order of the input, so the mapping is deterministic for a given input
/// order (a differently-ordered input may number duplicates differently).
///
/// # Errors
///
/// Planning itself cannot fail; errors only come from
/// [`SourceEntry::new`]-style path validation performed upstream. The
/// `Result` is kept for symmetry with the executor and future-proofing of
/// the public API.
pub fn plan(sources: Vec<SourceEntry>, dest_root: &Path) -> Result<CopyPlan> {
    // Stage 1: group entries by source parent directory in first-encounter
    // order. The last-seen pair short-circuits the common case of many
    // files from one folder arriving back to back; the full map covers
    // revisits after an interleave.
    let mut parent_slots: HashMap<PathBuf, usize> = HashMap::new();
    let mut groups: Vec<(PathBuf, String)> = Vec::new();
    let mut entry_slots: Vec<usize> = Vec::with_capacity(sources.len());
    let mut last_seen: Option<(PathBuf, usize)> = None;

    for entry in &sources {
        let slot = match &last_seen {
            Some((parent, slot)) if parent == entry.parent() => *slot,
            _ => match parent_slots.get(entry.parent()) {
                Some(slot) => *slot,
                None => {
                    let slot = groups.len();
                    groups.push((entry.parent().to_path_buf(), entry.parent_name().to_owned()));
                    parent_slots.insert(entry.parent().to_path_buf(), slot);
                    slot
                }
            },
        };
        last_seen = Some((entry.parent().to_path_buf(), slot));
        entry_slots.push(slot);
    }

    // Pass A: literal duplicates. Each distinct parent whose base name is
    // already taken gets `_<n>`, with the per-name counter advancing past
    // any name a real directory already claimed.
    let mut taken: HashSet<String> = HashSet::with_capacity(groups.len());
    let mut counters: HashMap<String, u32> = HashMap::new();
    let mut pass_a: Vec<String> = Vec::with_capacity(groups.len());

    for (_, base) in &groups {
        let name = if taken.contains(base) {
            let n = counters.entry(base.clone()).or_insert(1);
            loop {
                let candidate = format!("{base}_{n}");
                *n += 1;
                if !taken.contains(&candidate) {
                    break candidate;
                }
            }
        } else {
            base.clone()
        };
        taken.insert(name.clone());
        pass_a.push(name);
    }

    // Pass B: pseudo duplicates. Names that fold to the same lowercase
    // form would collide on case-insensitive filesystems; the first
    // encounter keeps its name, later ones get ` (<k>)`.
    let mut folded_taken: HashSet<String> = HashSet::with_capacity(pass_a.len());
    let mut dest_dirs: Vec<PathBuf> = Vec::with_capacity(pass_a.len());

    for name in pass_a {
        let folded = name.to_lowercase();
        let final_name = if folded_taken.contains(&folded) {
            let mut k = 1u32;
            loop {
                let candidate = format!("{name} ({k})");
                if !folded_taken.contains(&candidate.to_lowercase()) {
                    break candidate;
                }
                k += 1;
            }
        } else {
            name
        };
        folded_taken.insert(final_name.to_lowercase());
        dest_dirs.push(dest_root.join(final_name));
    }

    let assignments = sources
        .into_iter()
        .zip(entry_slots)
        .map(|(source, slot)| Assignment {
            source,
            dest_dir: dest_dirs[slot].clone(),
        })
        .collect();

    Ok(CopyPlan {
        dest_root: dest_root.to_path_buf(),
        assignments,
        dest_dirs,
    })
}

// =============================================================================
// Tests
// =============================================================================
