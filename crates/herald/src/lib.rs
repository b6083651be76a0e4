//! Wiring for the `herald` binary.
//!
//! Turns a [`HeraldConfig`] into a ready [`PostingPipeline`]: content
//! library, Ollama caption generator, and one publisher per network with
//! complete credentials.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod observability;

use herald_bot::{CaptionGenerator, HeraldConfig, PostingPipeline};
use herald_error::{ConfigError, HeraldResult};
use herald_interface::Publisher;
use herald_models::OllamaClient;
use herald_social::{FacebookPublisher, GraphApi, GraphTransport, InstagramPublisher, ReqwestTransport};
use herald_storage::{ContentLibrary, ImageArchive};
use std::sync::Arc;
use tracing::{info, warn};

/// Ollama client for the configured host and model.
///
/// # Errors
///
/// Returns error for an empty model name or unparseable host.
pub fn build_generator(config: &HeraldConfig, http: reqwest::Client) -> HeraldResult<OllamaClient> {
    let generation = config.generation();
    let client = OllamaClient::new_with_url(generation.model(), generation.host())?.with_client(http);
    Ok(client)
}

/// Publishers for every network whose credentials are complete.
///
/// Facebook comes first, then Instagram. A network with missing
/// credentials is left out with a warning.
///
/// # Errors
///
/// Returns error if a publisher rejects its credentials.
pub fn build_publishers(
    config: &HeraldConfig,
    transport: Arc<dyn GraphTransport>,
) -> HeraldResult<Vec<Arc<dyn Publisher>>> {
    let api = GraphApi::new(config.graph().base_url(), config.graph().api_version());
    let mut publishers: Vec<Arc<dyn Publisher>> = Vec::new();

    match config.facebook().credentials() {
        Some((page_id, token)) => {
            let facebook = FacebookPublisher::new(transport.clone(), api.clone(), page_id, token)?;
            info!(page_id = %facebook.page_id(), "Facebook publishing enabled");
            publishers.push(Arc::new(facebook));
        }
        None => warn!("Facebook credentials missing, not publishing to Facebook"),
    }

    match config.instagram().credentials() {
        Some((account_id, token)) => {
            let mut instagram = InstagramPublisher::new(transport, api, account_id, token)?;
            if let Some(base_url) = config.instagram().public_base_url() {
                instagram = instagram.with_public_base_url(base_url.as_str());
            }
            info!(account_id = %instagram.account_id(), "Instagram publishing enabled");
            publishers.push(Arc::new(instagram));
        }
        None => warn!("Instagram credentials missing, not publishing to Instagram"),
    }

    Ok(publishers)
}

/// Assemble the pipeline described by `config`.
///
/// Creates the history directory if needed.
///
/// # Errors
///
/// Returns a configuration error if the content or image directory is
/// missing or unreadable, or any component fails to build.
pub fn build_pipeline(config: &HeraldConfig, http: reqwest::Client) -> HeraldResult<PostingPipeline> {
    let paths = config.paths();

    let library = ContentLibrary::new(paths.content_dir(), paths.image_dir());
    library
        .verify()
        .map_err(|e| ConfigError::new(format!("Content directories unavailable: {}", e)))?;

    let archive = ImageArchive::new(paths.history_dir())?;

    let generator = build_generator(config, http.clone())?;
    let captions = CaptionGenerator::new(Arc::new(generator)).with_sampling(
        *config.generation().temperature(),
        *config.generation().max_tokens(),
    );

    let transport: Arc<dyn GraphTransport> = Arc::new(ReqwestTransport::with_client(http));
    let publishers = build_publishers(config, transport)?;
    if publishers.is_empty() {
        warn!("No publishers configured: runs will select and caption but post nowhere");
    }

    let pipeline = publishers
        .into_iter()
        .fold(PostingPipeline::new(library, archive, captions), |pipeline, publisher| {
            pipeline.with_publisher(publisher)
        });

    info!(platforms = ?pipeline.platforms(), "Pipeline ready");
    Ok(pipeline)
}
