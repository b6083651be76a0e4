//! Trait definitions for text generation and social publishing.

use async_trait::async_trait;
use herald_core::{GenerateRequest, GenerateResponse, ImageAsset, PublishOutcome};
use herald_error::HeraldResult;

/// A text-completion backend.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for a single prompt.
    ///
    /// # Errors
    ///
    /// Returns error if the service is unreachable or answers with an
    /// error. Callers do not retry.
    async fn generate(&self, request: &GenerateRequest) -> HeraldResult<GenerateResponse>;

    /// Provider name (e.g., "ollama").
    fn provider_name(&self) -> &'static str;

    /// Model identifier used when a request does not name one.
    fn model_name(&self) -> &str;
}

/// A social network that can publish a captioned image.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Publish `image` with `caption`.
    ///
    /// The image file must be left where it is; other networks may still
    /// need it. A non-success answer from the network is returned as an
    /// outcome, not an error.
    ///
    /// # Errors
    ///
    /// Returns error only when the request could not be made or read
    /// (transport failure, unreadable image).
    async fn publish(&self, caption: &str, image: &ImageAsset) -> HeraldResult<PublishOutcome>;

    /// Platform name used as the result key (e.g., "facebook").
    fn platform_name(&self) -> &str;
}
