//! Wire types for the Ollama REST API.

use herald_core::GenerateRequest;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/generate`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct OllamaGenerateRequest {
    pub model: String,
    pub prompt: String,
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<OllamaOptions>,
}

/// Sampling options. `num_predict` caps the generated token count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct OllamaOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_predict: Option<u32>,
}

/// Non-streaming reply of `POST /api/generate`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct OllamaGenerateResponse {
    pub response: String,
    #[serde(default)]
    pub done: bool,
}

/// Reply of `GET /api/tags`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct OllamaTagsResponse {
    #[serde(default)]
    pub models: Vec<OllamaModelTag>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct OllamaModelTag {
    pub name: String,
}

impl From<&GenerateRequest> for OllamaGenerateRequest {
    fn from(request: &GenerateRequest) -> Self {
        let options = if request.temperature().is_none() && request.max_tokens().is_none() {
            None
        } else {
            Some(OllamaOptions {
                temperature: *request.temperature(),
                num_predict: *request.max_tokens(),
            })
        };

        Self {
            model: request.model().clone(),
            prompt: request.prompt().clone(),
            stream: false,
            options,
        }
    }
}
