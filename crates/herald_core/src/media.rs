//! Image assets.

use crate::source::base_name;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Image extensions eligible for posting, compared case-insensitively.
pub const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

/// An image waiting in the image directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct ImageAsset {
    /// Full path of the image
    path: PathBuf,
    /// Base name, kept when the image is archived
    file_name: String,
}

impl ImageAsset {
    /// Create an asset for the image at `path`.
    ///
    /// # Examples
    ///
    /// ```
    /// use herald_core::ImageAsset;
    ///
    /// let image = ImageAsset::new("content/images/a.jpg");
    /// assert_eq!(image.file_name(), "a.jpg");
    /// ```
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = base_name(&path);
        Self { path, file_name }
    }

    /// MIME type guessed from the extension.
    pub fn mime_type(&self) -> &'static str {
        let ext = self
            .path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "png" => "image/png",
            "webp" => "image/webp",
            _ => "image/jpeg",
        }
    }
}

/// Whether `path` has one of `extensions`, ignoring ASCII case.
///
/// # Examples
///
/// ```
/// use herald_core::{has_extension, IMAGE_EXTENSIONS};
///
/// assert!(has_extension("a.JPG".as_ref(), &IMAGE_EXTENSIONS));
/// assert!(!has_extension("notes.txt".as_ref(), &IMAGE_EXTENSIONS));
/// ```
pub fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}
