//! Ollama LLM client implementation.

use super::dto::{OllamaGenerateRequest, OllamaGenerateResponse, OllamaTagsResponse};
use herald_core::{GenerateRequest, GenerateResponse};
use herald_error::{GenerationError, GenerationErrorKind, GenerationResult, HeraldResult};
use herald_interface::TextGenerator;
use tracing::{debug, info, instrument, warn};

/// Address of a default local Ollama install.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Ollama LLM client for local model execution.
///
/// Requests are sent without a timeout: a hung server blocks the caller.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    /// Shared HTTP client
    client: reqwest::Client,

    /// Model name (e.g., "llama3.1:latest")
    model_name: String,

    /// Ollama server URL without trailing slash
    base_url: String,
}

impl OllamaClient {
    /// Create a new Ollama client with default localhost connection.
    #[instrument(name = "ollama_client_new", skip(model_name))]
    pub fn new(model_name: impl Into<String>) -> GenerationResult<Self> {
        Self::new_with_url(model_name, DEFAULT_OLLAMA_URL)
    }

    /// Create a new Ollama client with custom server URL.
    ///
    /// # Errors
    ///
    /// Returns error if the model name is empty or the URL does not parse.
    #[instrument(name = "ollama_client_new_with_url", skip_all)]
    pub fn new_with_url(
        model_name: impl Into<String>,
        base_url: impl Into<String>,
    ) -> GenerationResult<Self> {
        let model_name = model_name.into();
        let base_url = base_url.into().trim_end_matches('/').to_string();

        if model_name.trim().is_empty() {
            return Err(GenerationError::new(
                GenerationErrorKind::InvalidConfiguration("model name cannot be empty".into()),
            ));
        }

        reqwest::Url::parse(&base_url).map_err(|e| {
            GenerationError::new(GenerationErrorKind::InvalidConfiguration(format!(
                "invalid Ollama URL {}: {}",
                base_url, e
            )))
        })?;

        info!(
            model = %model_name,
            url = %base_url,
            "Creating Ollama client"
        );

        Ok(Self {
            client: reqwest::Client::new(),
            model_name,
            base_url,
        })
    }

    /// Use a preconfigured HTTP client (timeouts, proxies).
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Server base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check if Ollama server is running and model is available.
    #[instrument(skip(self), fields(model = %self.model_name))]
    pub async fn validate(&self) -> GenerationResult<()> {
        debug!("Validating Ollama server and model availability");

        let url = format!("{}/api/tags", self.base_url);
        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!(error = %e, "Failed to connect to Ollama server");
            GenerationError::new(GenerationErrorKind::ServerUnreachable {
                url: self.base_url.clone(),
                message: e.to_string(),
            })
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::new(GenerationErrorKind::Api {
                status: status.as_u16(),
                body,
            }));
        }

        let tags: OllamaTagsResponse = response.json().await.map_err(|e| {
            GenerationError::new(GenerationErrorKind::InvalidResponse(e.to_string()))
        })?;

        debug!(count = tags.models.len(), "Found local models");

        let names: Vec<&str> = tags.models.iter().map(|m| m.name.as_str()).collect();
        if !model_available(&self.model_name, &names) {
            warn!(
                model = %self.model_name,
                available = ?names,
                "Model not found locally"
            );
            return Err(GenerationError::new(GenerationErrorKind::ModelNotFound(
                self.model_name.clone(),
            )));
        }

        info!("Ollama server and model validated");
        Ok(())
    }

    /// Send one completion request.
    #[instrument(skip(self, request), fields(model = %request.model(), prompt_length = request.prompt().len()))]
    pub async fn complete(&self, request: &GenerateRequest) -> GenerationResult<GenerateResponse> {
        let url = format!("{}/api/generate", self.base_url);
        let body = OllamaGenerateRequest::from(request);

        debug!(url = %url, "Generating with Ollama");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                GenerationError::new(GenerationErrorKind::ServerUnreachable {
                    url: self.base_url.clone(),
                    message: e.to_string(),
                })
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %text, "Ollama returned error");
            if status == reqwest::StatusCode::NOT_FOUND && text.contains("not found") {
                return Err(GenerationError::new(GenerationErrorKind::ModelNotFound(
                    request.model().clone(),
                )));
            }
            return Err(GenerationError::new(GenerationErrorKind::Api {
                status: status.as_u16(),
                body: text,
            }));
        }

        let parsed: OllamaGenerateResponse = response.json().await.map_err(|e| {
            GenerationError::new(GenerationErrorKind::InvalidResponse(e.to_string()))
        })?;

        debug!(
            response_length = parsed.response.len(),
            done = parsed.done,
            "Received response from Ollama"
        );

        Ok(GenerateResponse::new(parsed.response))
    }
}

#[async_trait::async_trait]
impl TextGenerator for OllamaClient {
    async fn generate(&self, request: &GenerateRequest) -> HeraldResult<GenerateResponse> {
        Ok(self.complete(request).await?)
    }

    fn provider_name(&self) -> &'static str {
        "ollama"
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

/// Whether `model` is among the installed `names`; a bare name matches its
/// `:latest` tag.
fn model_available(model: &str, names: &[&str]) -> bool {
    names.iter().any(|name| {
        *name == model || (!model.contains(':') && *name == format!("{}:latest", model))
    })
}
