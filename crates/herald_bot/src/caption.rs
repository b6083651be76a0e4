//! Caption generation from a source text file.

use herald_core::{GenerateRequest, SourceText};
use herald_error::{GenerationError, GenerationErrorKind, HeraldResult};
use herald_interface::TextGenerator;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Appended to a caption that came back without any hashtag.
pub const FALLBACK_HASHTAGS: &str = " #Foodie #RestaurantVibes #Gourmet #DiningExperience";

const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_MAX_TOKENS: u32 = 100;

/// Prompt asking for a restaurant promo post based on `content`.
///
/// The 280 character ceiling is requested, not enforced.
pub fn caption_prompt(filename: &str, content: &str) -> String {
    format!(
        "You are a social media manager for a high-end restaurant. Based on the following \
         content from a file named '{filename}', create a vibrant, engaging social media post \
         (max 280 characters) that promotes the restaurant's food, quality, prestige, vibe, and \
         warm atmosphere. Use emojis and a positive tone. Include 3-5 relevant hashtags to \
         target food enthusiasts.\n\nContent:\n{content}\n\nPost:\n"
    )
}

/// Trim `text` and append [`FALLBACK_HASHTAGS`] when it has no `#`.
///
/// # Examples
///
/// ```
/// use herald_bot::ensure_hashtags;
///
/// assert_eq!(ensure_hashtags("  Try it #Pasta \n"), "Try it #Pasta");
/// assert_eq!(
///     ensure_hashtags("Try it"),
///     "Try it #Foodie #RestaurantVibes #Gourmet #DiningExperience"
/// );
/// ```
pub fn ensure_hashtags(text: &str) -> String {
    let caption = text.trim();
    if caption.contains('#') {
        caption.to_string()
    } else {
        format!("{caption}{FALLBACK_HASHTAGS}")
    }
}

/// Turns a source text into a post caption with a [`TextGenerator`].
#[derive(Clone)]
pub struct CaptionGenerator {
    generator: Arc<dyn TextGenerator>,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl CaptionGenerator {
    /// Generator using the backend's own model at temperature 0.7, 100 tokens.
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        let model = generator.model_name().to_string();
        Self {
            generator,
            model,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Override sampling temperature and generation cap.
    pub fn with_sampling(mut self, temperature: f32, max_tokens: u32) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    /// Model named in each request.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate a caption for `source`.
    ///
    /// Returns `Ok(None)` without calling the backend when the file is empty.
    ///
    /// # Errors
    ///
    /// Backend failures are returned unchanged; there is no retry.
    #[instrument(skip(self, source), fields(file = %source.file_name(), provider = self.generator.provider_name(), model = %self.model))]
    pub async fn generate(&self, source: &SourceText) -> HeraldResult<Option<String>> {
        if source.content().is_empty() {
            debug!("Source text is empty, skipping caption");
            return Ok(None);
        }

        let request = GenerateRequest::builder()
            .model(self.model.clone())
            .prompt(caption_prompt(source.file_name(), source.content()))
            .temperature(Some(self.temperature))
            .max_tokens(Some(self.max_tokens))
            .build()
            .map_err(|e| {
                GenerationError::new(GenerationErrorKind::InvalidConfiguration(e.to_string()))
            })?;

        let response = self.generator.generate(&request).await?;
        let caption = ensure_hashtags(response.text());

        info!(caption_length = caption.chars().count(), "Generated caption");
        Ok(Some(caption))
    }
}

impl std::fmt::Debug for CaptionGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptionGenerator")
            .field("provider", &self.generator.provider_name())
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}
