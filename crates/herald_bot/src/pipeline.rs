//! One posting run: select, caption, publish.

use crate::CaptionGenerator;
use chrono::{DateTime, Local};
use derive_getters::Getters;
use herald_core::{PublishOutcome, RunContext};
use herald_error::HeraldResult;
use herald_interface::Publisher;
use herald_storage::{ArchiveOutcome, ContentLibrary, ImageArchive};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

/// What one run did.
#[derive(Debug, Clone, Getters)]
pub struct RunReport {
    /// When the run started
    started_at: DateTime<Local>,
    /// When the run finished
    finished_at: DateTime<Local>,
    /// Everything the run selected, generated and published
    context: RunContext,
    /// Where the image went, when at least one network published it
    archived: Option<ArchiveOutcome>,
}

impl RunReport {
    /// Report for a run started at `started_at` that finished now.
    pub fn new(
        started_at: DateTime<Local>,
        context: RunContext,
        archived: Option<ArchiveOutcome>,
    ) -> Self {
        Self {
            started_at,
            finished_at: Local::now(),
            context,
            archived,
        }
    }

    /// Outcome recorded for `platform`.
    pub fn outcome(&self, platform: &str) -> Option<&PublishOutcome> {
        self.context.result(platform)
    }

    /// Number of networks the post went live on.
    pub fn published_count(&self) -> usize {
        self.context
            .results()
            .values()
            .filter(|outcome| outcome.is_published())
            .count()
    }
}

/// Select text and image, generate a caption, publish everywhere.
///
/// Every run starts from an empty [`RunContext`]. All steps always run:
/// a step whose inputs are missing does nothing, and publishers without a
/// caption or image report [`PublishOutcome::Skipped`]. Publishers are
/// called one after another in registration order. The image is moved to
/// history once, after the last publisher, if any of them published it.
pub struct PostingPipeline {
    library: ContentLibrary,
    archive: ImageArchive,
    captions: CaptionGenerator,
    publishers: Vec<Arc<dyn Publisher>>,
    rng: Mutex<StdRng>,
}

impl PostingPipeline {
    /// Pipeline with no publishers and an entropy-seeded RNG.
    pub fn new(library: ContentLibrary, archive: ImageArchive, captions: CaptionGenerator) -> Self {
        Self {
            library,
            archive,
            captions,
            publishers: Vec::new(),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Register a publisher after those already registered.
    pub fn with_publisher(mut self, publisher: Arc<dyn Publisher>) -> Self {
        self.publishers.push(publisher);
        self
    }

    /// Make file selection reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    /// Registered platform names, in publish order.
    pub fn platforms(&self) -> Vec<String> {
        self.publishers
            .iter()
            .map(|p| p.platform_name().to_string())
            .collect()
    }

    /// Content library files are drawn from.
    pub fn library(&self) -> &ContentLibrary {
        &self.library
    }

    /// History directory published images are moved to.
    pub fn archive(&self) -> &ImageArchive {
        &self.archive
    }

    /// Execute one run.
    ///
    /// # Errors
    ///
    /// Returns the first storage, generation or transport error; later
    /// steps of that run do not execute.
    #[instrument(skip(self))]
    pub async fn run(&self) -> HeraldResult<RunReport> {
        let started_at = Local::now();
        info!(started_at = %started_at.to_rfc3339(), "Starting posting run");

        let mut context = RunContext::new();
        self.select_content(&mut context).await?;
        self.select_image(&mut context).await?;
        self.generate_caption(&mut context).await?;
        self.publish(&mut context).await?;
        let archived = self.archive_image(&context).await?;

        Ok(RunReport::new(started_at, context, archived))
    }

    async fn select_content(&self, context: &mut RunContext) -> HeraldResult<()> {
        let mut rng = self.rng.lock().await;
        match self.library.select_text(&mut *rng).await? {
            Some(source) => {
                info!(file = %source.file_name(), "Selected content file");
                context.set_source(source);
            }
            None => warn!(dir = %self.library.content_dir().display(), "No content files"),
        }
        Ok(())
    }

    async fn select_image(&self, context: &mut RunContext) -> HeraldResult<()> {
        let mut rng = self.rng.lock().await;
        match self.library.select_image(&mut *rng).await? {
            Some(image) => {
                info!(image = %image.file_name(), "Selected image");
                context.set_image(image);
            }
            None => warn!(dir = %self.library.image_dir().display(), "No images"),
        }
        Ok(())
    }

    async fn generate_caption(&self, context: &mut RunContext) -> HeraldResult<()> {
        let Some(source) = context.source() else {
            debug!("No content selected, skipping caption");
            return Ok(());
        };

        if let Some(caption) = self.captions.generate(source).await? {
            debug!(caption = %caption, "Caption ready");
            context.set_caption(caption);
        }
        Ok(())
    }

    async fn publish(&self, context: &mut RunContext) -> HeraldResult<()> {
        let inputs = context
            .publish_inputs()
            .map(|(caption, image)| (caption.to_string(), image.clone()));

        for publisher in &self.publishers {
            let platform = publisher.platform_name().to_string();

            let outcome = match &inputs {
                Some((caption, image)) => publisher.publish(caption, image).await?,
                None => {
                    debug!(platform = %platform, "Caption or image missing, skipping");
                    PublishOutcome::Skipped
                }
            };

            info!(platform = %platform, outcome = %outcome, "Publish result");
            context.record_result(platform, outcome);
        }
        Ok(())
    }

    async fn archive_image(&self, context: &RunContext) -> HeraldResult<Option<ArchiveOutcome>> {
        let Some(image) = context.image() else {
            return Ok(None);
        };

        if !context.results().values().any(PublishOutcome::is_published) {
            debug!(image = %image.file_name(), "Not published anywhere, keeping image");
            return Ok(None);
        }

        let archived = self.archive.archive(image).await?;
        info!(image = %image.file_name(), archive = %archived, "Image archived");
        Ok(Some(archived))
    }
}

impl std::fmt::Debug for PostingPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostingPipeline")
            .field("library", &self.library)
            .field("archive", &self.archive)
            .field("captions", &self.captions)
            .field("platforms", &self.platforms())
            .finish()
    }
}
