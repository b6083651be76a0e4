//! Instagram two-phase media publisher.

use crate::{GraphApi, GraphCredentials, GraphTransport};
use async_trait::async_trait;
use herald_core::{ImageAsset, PublishOutcome};
use herald_error::{HeraldResult, HttpError, PublishError, PublishErrorKind, PublishResult};
use herald_interface::Publisher;
use std::sync::Arc;

const PLATFORM: &str = "instagram";

/// Publishes an image with caption to an Instagram business account.
///
/// First `POST /{account_id}/media` creates a container from an image URL,
/// then `POST /{account_id}/media_publish` publishes it. A container whose
/// response lacks an `id` stops the sequence. The two calls are not
/// transactional: a container may be created and never published.
pub struct InstagramPublisher {
    transport: Arc<dyn GraphTransport>,
    api: GraphApi,
    credentials: GraphCredentials,
    public_base_url: Option<String>,
}

impl InstagramPublisher {
    /// Create a publisher for the account `account_id`.
    ///
    /// # Errors
    ///
    /// Returns error if `account_id` or `access_token` is empty.
    #[tracing::instrument(skip_all, fields(account_id))]
    pub fn new(
        transport: Arc<dyn GraphTransport>,
        api: GraphApi,
        account_id: impl Into<String>,
        access_token: impl Into<String>,
    ) -> PublishResult<Self> {
        let credentials = GraphCredentials::new(PLATFORM, account_id, access_token)?;
        tracing::Span::current().record("account_id", credentials.id());
        tracing::debug!("Created Instagram publisher");

        Ok(Self {
            transport,
            api,
            credentials,
            public_base_url: None,
        })
    }

    /// Serve images to Instagram from `base_url` instead of `file://` paths.
    ///
    /// Instagram fetches the image itself, so production use needs the
    /// image directory exposed at a public URL.
    pub fn with_public_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let trimmed = base_url.trim().trim_end_matches('/');
        self.public_base_url = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    /// Account the media is published to.
    pub fn account_id(&self) -> &str {
        self.credentials.id()
    }

    /// URL Instagram is given for `image`.
    pub fn image_url(&self, image: &ImageAsset) -> String {
        match &self.public_base_url {
            Some(base) => format!("{}/{}", base, image.file_name()),
            None => format!("file://{}", image.path().display()),
        }
    }

    fn transport_error(e: HttpError) -> PublishError {
        PublishError::new(PublishErrorKind::Transport {
            platform: PLATFORM.to_string(),
            message: e.message,
        })
    }
}

#[async_trait]
impl Publisher for InstagramPublisher {
    #[tracing::instrument(skip(self, caption, image), fields(account_id = %self.credentials.id(), image = %image.file_name()))]
    async fn publish(&self, caption: &str, image: &ImageAsset) -> HeraldResult<PublishOutcome> {
        let token = self.credentials.access_token().to_string();

        let media_url = self.api.endpoint(self.credentials.id(), "media");
        let media_query = vec![
            ("access_token".to_string(), token.clone()),
            ("image_url".to_string(), self.image_url(image)),
            ("caption".to_string(), caption.to_string()),
        ];

        tracing::debug!("Creating media container");
        let created = self
            .transport
            .post_form(&media_url, &media_query)
            .await
            .map_err(Self::transport_error)?;

        let Some(creation_id) = created.id() else {
            let status = *created.status();
            tracing::warn!(status, body = %created.body(), "Instagram returned no media id");
            return Ok(PublishOutcome::Aborted {
                stage: "media".to_string(),
                status,
                body: created.into_body(),
            });
        };

        let publish_url = self.api.endpoint(self.credentials.id(), "media_publish");
        let publish_query = vec![
            ("access_token".to_string(), token),
            ("creation_id".to_string(), creation_id.clone()),
        ];

        tracing::debug!(creation_id = %creation_id, "Publishing media container");
        let response = self
            .transport
            .post_form(&publish_url, &publish_query)
            .await
            .map_err(Self::transport_error)?;

        let status = *response.status();
        if !response.is_ok() {
            tracing::warn!(status, body = %response.body(), "Instagram rejected the container");
            return Ok(PublishOutcome::Rejected {
                status,
                body: response.into_body(),
            });
        }

        tracing::info!(status, "Posted to Instagram");

        Ok(PublishOutcome::Published {
            status,
            body: response.into_body(),
        })
    }

    fn platform_name(&self) -> &str {
        PLATFORM
    }
}
