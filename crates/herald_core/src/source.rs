//! Text source files.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Extension of the text files the content selector picks from.
pub const TEXT_EXTENSION: &str = "md";

/// A text file read fully into memory.
///
/// Source files are never mutated or moved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct SourceText {
    /// Full path of the file
    path: PathBuf,
    /// Base name of the file (e.g. "promo.md")
    file_name: String,
    /// Entire file content
    content: String,
}

impl SourceText {
    /// Create a source text from a path and its content.
    ///
    /// # Examples
    ///
    /// ```
    /// use herald_core::SourceText;
    ///
    /// let text = SourceText::new("content/md_files/promo.md", "Fresh pasta daily");
    /// assert_eq!(text.file_name(), "promo.md");
    /// ```
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        let path = path.into();
        let file_name = base_name(&path);
        Self {
            path,
            file_name,
            content: content.into(),
        }
    }
}

pub(crate) fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
