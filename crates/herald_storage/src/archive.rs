//! History directory for posted images.

use herald_core::ImageAsset;
use herald_error::{StorageError, StorageErrorKind, StorageResult};
use std::path::{Path, PathBuf};

/// Result of archiving an image.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ArchiveOutcome {
    /// Image moved to the contained path
    #[display("moved to {}", _0.display())]
    Moved(PathBuf),
    /// Image was no longer in the image directory
    #[display("already archived")]
    AlreadyArchived,
}

/// Moves successfully posted images into the history directory.
///
/// Archiving is idempotent: a source that is already gone reports
/// [`ArchiveOutcome::AlreadyArchived`] instead of failing.
#[derive(Debug, Clone)]
pub struct ImageArchive {
    history_dir: PathBuf,
}

impl ImageArchive {
    /// Create the archive, creating the history directory if absent.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created.
    #[tracing::instrument(skip(history_dir))]
    pub fn new(history_dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let history_dir = history_dir.into();

        std::fs::create_dir_all(&history_dir).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                history_dir.display(),
                e
            )))
        })?;

        tracing::info!(path = %history_dir.display(), "Using history directory");
        Ok(Self { history_dir })
    }

    /// The history directory.
    pub fn history_dir(&self) -> &Path {
        &self.history_dir
    }

    /// Where `image` ends up once archived.
    pub fn destination(&self, image: &ImageAsset) -> PathBuf {
        self.history_dir.join(image.file_name())
    }

    /// Move `image` into the history directory under the same base name.
    #[tracing::instrument(skip(self, image), fields(image = %image.path().display()))]
    pub async fn archive(&self, image: &ImageAsset) -> StorageResult<ArchiveOutcome> {
        if image.file_name().is_empty() {
            return Err(StorageError::new(StorageErrorKind::InvalidPath(
                image.path().display().to_string(),
            )));
        }

        if !tokio::fs::try_exists(image.path()).await.unwrap_or(false) {
            tracing::debug!("Image already moved");
            return Ok(ArchiveOutcome::AlreadyArchived);
        }

        let destination = self.destination(image);

        if let Err(rename_err) = tokio::fs::rename(image.path(), &destination).await {
            if !tokio::fs::try_exists(image.path()).await.unwrap_or(false) {
                tracing::debug!("Image moved concurrently");
                return Ok(ArchiveOutcome::AlreadyArchived);
            }

            // rename cannot cross filesystems; fall back to copy + remove
            tracing::debug!(error = %rename_err, "Rename failed, copying instead");
            let move_err = |e: std::io::Error| {
                StorageError::new(StorageErrorKind::FileMove(format!(
                    "{} -> {}: {}",
                    image.path().display(),
                    destination.display(),
                    e
                )))
            };
            tokio::fs::copy(image.path(), &destination)
                .await
                .map_err(move_err)?;
            tokio::fs::remove_file(image.path())
                .await
                .map_err(move_err)?;
        }

        tracing::info!(destination = %destination.display(), "Archived image");
        Ok(ArchiveOutcome::Moved(destination))
    }
}
