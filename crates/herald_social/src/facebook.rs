//! Facebook Page photo publisher.

use crate::{GraphApi, GraphCredentials, GraphTransport, ImageUpload};
use async_trait::async_trait;
use herald_core::{ImageAsset, PublishOutcome};
use herald_error::{HeraldResult, PublishError, PublishErrorKind, PublishResult};
use herald_interface::Publisher;
use std::sync::Arc;

const PLATFORM: &str = "facebook";

/// Publishes a photo with caption to a Facebook Page.
///
/// One multipart `POST /{page_id}/photos` carrying the image bytes in the
/// `source` field. The image file is left in place.
pub struct FacebookPublisher {
    transport: Arc<dyn GraphTransport>,
    api: GraphApi,
    credentials: GraphCredentials,
}

impl FacebookPublisher {
    /// Create a publisher for the page `page_id`.
    ///
    /// # Errors
    ///
    /// Returns error if `page_id` or `access_token` is empty.
    #[tracing::instrument(skip_all, fields(page_id))]
    pub fn new(
        transport: Arc<dyn GraphTransport>,
        api: GraphApi,
        page_id: impl Into<String>,
        access_token: impl Into<String>,
    ) -> PublishResult<Self> {
        let credentials = GraphCredentials::new(PLATFORM, page_id, access_token)?;
        tracing::Span::current().record("page_id", credentials.id());
        tracing::debug!("Created Facebook publisher");

        Ok(Self {
            transport,
            api,
            credentials,
        })
    }

    /// Page the photos are posted to.
    pub fn page_id(&self) -> &str {
        self.credentials.id()
    }
}

#[async_trait]
impl Publisher for FacebookPublisher {
    #[tracing::instrument(skip(self, caption, image), fields(page_id = %self.credentials.id(), image = %image.file_name()))]
    async fn publish(&self, caption: &str, image: &ImageAsset) -> HeraldResult<PublishOutcome> {
        let bytes = tokio::fs::read(image.path()).await.map_err(|e| {
            PublishError::new(PublishErrorKind::ImageRead {
                path: image.path().display().to_string(),
                message: e.to_string(),
            })
        })?;

        let url = self.api.endpoint(self.credentials.id(), "photos");
        let query = vec![
            ("access_token".to_string(), self.credentials.access_token().to_string()),
            ("caption".to_string(), caption.to_string()),
            ("published".to_string(), "true".to_string()),
        ];
        let upload = ImageUpload::new("source", image.file_name(), image.mime_type(), bytes);

        tracing::debug!("Uploading photo");
        let response = self
            .transport
            .post_multipart(&url, &query, upload)
            .await
            .map_err(|e| {
                PublishError::new(PublishErrorKind::Transport {
                    platform: PLATFORM.to_string(),
                    message: e.message,
                })
            })?;

        let status = *response.status();
        if !response.is_ok() {
            tracing::warn!(status, body = %response.body(), "Facebook rejected the photo");
            return Ok(PublishOutcome::Rejected {
                status,
                body: response.into_body(),
            });
        }

        tracing::info!(status, "Posted to Facebook");

        Ok(PublishOutcome::Published {
            status,
            body: response.into_body(),
        })
    }

    fn platform_name(&self) -> &str {
        PLATFORM
    }
}
