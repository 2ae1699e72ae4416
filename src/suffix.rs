//! Suffix filtering for media files.
//!
//! A [`SuffixFilter`] holds an explicit list of file-name suffixes and
//! matches them case-insensitively against the end of a file name, so
//! `IMG_0001.JPG` matches `.jpg`.

use std::ffi::OsStr;

/// File-name suffixes recognized as media files by default.
///
/// Image formats first, then video formats.
pub const DEFAULT_SUFFIXES: &[&str] = &[
    ".bmp", ".gif", ".ico", ".jpeg", ".jpg", ".png", ".tif", ".tiff", ".svg", ".3g2", ".3gp",
    ".avi", ".asf", ".flv", ".m4v", ".mov", ".mp4", ".mpg", ".mpeg", ".wmv", ".rm",
];

/// Case-insensitive file-name suffix filter.
///
/// # Example
///
/// ```
/// use mediagather::SuffixFilter;
///
/// let filter = SuffixFilter::new(["jpg", ".PNG"]);
/// assert!(filter.matches("holiday.JPG".as_ref()));
/// assert!(filter.matches("lena.png".as_ref()));
/// assert!(!filter.matches("notes.txt".as_ref()));
/// ```
#[derive(Debug, Clone)]
pub struct SuffixFilter {
    suffixes: Vec<String>,
}

impl SuffixFilter {
    /// Create a filter from an explicit list of suffixes.
    ///
    /// Each suffix is normalized: lowercased, and given a leading dot if
    /// missing, so `"jpg"`, `".jpg"` and `".JPG"` are equivalent.
    pub fn new<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let suffixes = suffixes
            .into_iter()
            .map(|s| {
                let s = s.as_ref().to_lowercase();
                if s.starts_with('.') { s } else { format!(".{s}") }
            })
            .collect();
        Self { suffixes }
    }

    /// Check whether a file name ends with one of the filter's suffixes.
    ///
    /// The comparison lowercases the file name first; a name that is not
    /// valid UTF-8 never matches.
    #[must_use]
    pub fn matches(&self, file_name: &OsStr) -> bool {
        let Some(name) = file_name.to_str() else {
            return false;
        };
        let name = name.to_lowercase();
        self.suffixes.iter().any(|s| name.ends_with(s.as_str()))
    }

    /// The normalized suffixes in this filter.
    #[must_use]
    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }
}

impl Default for SuffixFilter {
    /// The default media filter, covering [`DEFAULT_SUFFIXES`].
    fn default() -> Self {
        Self::new(DEFAULT_SUFFIXES)
    }
}
