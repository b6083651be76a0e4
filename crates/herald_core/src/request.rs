//! Request and response types for caption generation.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Single-prompt text completion request.
///
/// # Examples
///
/// ```
/// use herald_core::GenerateRequest;
///
/// let request = GenerateRequest::builder()
///     .model("llama3.1:latest")
///     .prompt("Write a post")
///     .temperature(Some(0.7))
///     .max_tokens(Some(100))
///     .build()
///     .unwrap();
///
/// assert_eq!(*request.max_tokens(), Some(100));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct GenerateRequest {
    /// Model identifier to use
    model: String,
    /// Prompt text
    prompt: String,
    /// Sampling temperature
    #[builder(default)]
    temperature: Option<f32>,
    /// Maximum number of tokens to generate
    #[builder(default)]
    max_tokens: Option<u32>,
}

impl GenerateRequest {
    /// Start building a request.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }
}

/// Generated text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct GenerateResponse {
    /// Raw completion text, untrimmed
    text: String,
}

impl GenerateResponse {
    /// Wrap completion text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Take the completion text.
    pub fn into_text(self) -> String {
        self.text
    }
}
