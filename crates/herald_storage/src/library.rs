//! Random selection from the content and image directories.

use herald_core::{IMAGE_EXTENSIONS, ImageAsset, SourceText, TEXT_EXTENSION, has_extension};
use herald_error::{StorageError, StorageErrorKind, StorageResult};
use rand::Rng;
use rand::seq::SliceRandom;
use std::path::{Path, PathBuf};

/// The directories a run draws its text and image from.
///
/// Listing is non-recursive and only regular files (or symlinks to them)
/// are considered. Listings are sorted before the random pick so a seeded
/// RNG always selects the same file.
#[derive(Debug, Clone)]
pub struct ContentLibrary {
    content_dir: PathBuf,
    image_dir: PathBuf,
}

impl ContentLibrary {
    /// Create a library over the given directories.
    pub fn new(content_dir: impl Into<PathBuf>, image_dir: impl Into<PathBuf>) -> Self {
        Self {
            content_dir: content_dir.into(),
            image_dir: image_dir.into(),
        }
    }

    /// Directory holding the source text files.
    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    /// Directory holding images waiting to be posted.
    pub fn image_dir(&self) -> &Path {
        &self.image_dir
    }

    /// Check that both directories exist and can be listed.
    ///
    /// Run once at startup; an unreadable directory is a configuration
    /// problem, not something a run recovers from.
    #[tracing::instrument(skip(self), fields(content_dir = %self.content_dir.display(), image_dir = %self.image_dir.display()))]
    pub fn verify(&self) -> StorageResult<()> {
        for dir in [&self.content_dir, &self.image_dir] {
            if !dir.is_dir() {
                return Err(StorageError::new(StorageErrorKind::NotFound(
                    dir.display().to_string(),
                )));
            }
            std::fs::read_dir(dir).map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryRead(format!(
                    "{}: {}",
                    dir.display(),
                    e
                )))
            })?;
        }
        tracing::debug!("Content directories verified");
        Ok(())
    }

    /// Text files eligible for selection, sorted by path.
    pub async fn list_text_files(&self) -> StorageResult<Vec<PathBuf>> {
        list_matching(&self.content_dir, &[TEXT_EXTENSION]).await
    }

    /// Images eligible for selection, sorted by path.
    pub async fn list_images(&self) -> StorageResult<Vec<PathBuf>> {
        list_matching(&self.image_dir, &IMAGE_EXTENSIONS).await
    }

    /// Pick one text file uniformly at random and read it.
    ///
    /// Returns `Ok(None)` when the content directory holds no text files.
    #[tracing::instrument(skip(self, rng), fields(dir = %self.content_dir.display()))]
    pub async fn select_text<R>(&self, rng: &mut R) -> StorageResult<Option<SourceText>>
    where
        R: Rng + Send + ?Sized,
    {
        let files = self.list_text_files().await?;
        let Some(path) = files.choose(rng) else {
            tracing::info!("No text files found");
            return Ok(None);
        };

        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileRead(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;

        tracing::debug!(
            path = %path.display(),
            candidates = files.len(),
            bytes = content.len(),
            "Selected text file"
        );
        Ok(Some(SourceText::new(path.clone(), content)))
    }

    /// Pick one image uniformly at random.
    ///
    /// Returns `Ok(None)` when the image directory holds no images.
    #[tracing::instrument(skip(self, rng), fields(dir = %self.image_dir.display()))]
    pub async fn select_image<R>(&self, rng: &mut R) -> StorageResult<Option<ImageAsset>>
    where
        R: Rng + Send + ?Sized,
    {
        let images = self.list_images().await?;
        let Some(path) = images.choose(rng) else {
            tracing::info!("No images found");
            return Ok(None);
        };

        tracing::debug!(path = %path.display(), candidates = images.len(), "Selected image");
        Ok(Some(ImageAsset::new(path.clone())))
    }
}

async fn list_matching(dir: &Path, extensions: &[&str]) -> StorageResult<Vec<PathBuf>> {
    let read_err = |e: std::io::Error| {
        StorageError::new(StorageErrorKind::DirectoryRead(format!(
            "{}: {}",
            dir.display(),
            e
        )))
    };

    let mut entries = tokio::fs::read_dir(dir).await.map_err(read_err)?;
    let mut matches = Vec::new();

    while let Some(entry) = entries.next_entry().await.map_err(read_err)? {
        let path = entry.path();
        if !has_extension(&path, extensions) {
            continue;
        }
        // follows symlinks, unlike DirEntry::file_type
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => matches.push(path),
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable entry");
            }
        }
    }

    matches.sort();
    Ok(matches)
}
