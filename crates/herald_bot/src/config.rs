//! Layered herald configuration.
//!
//! Sources, later overriding earlier:
//! - Bundled defaults (include_str! from herald.toml)
//! - User file: `--config <path>`, or `./herald.toml` if present
//! - Environment variables for credentials and the Ollama endpoint

use crate::ScheduleType;
use config::{Config, File, FileFormat};
use derive_getters::Getters;
use herald_error::{ConfigError, HeraldResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../herald.toml");

/// Environment variables and the keys they override.
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("OLLAMA_HOST", "generation.host"),
    ("OLLAMA_MODEL", "generation.model"),
    ("FACEBOOK_PAGE_ID", "facebook.page_id"),
    ("FACEBOOK_ACCESS_TOKEN", "facebook.access_token"),
    ("INSTAGRAM_ACCOUNT_ID", "instagram.account_id"),
    ("INSTAGRAM_ACCESS_TOKEN", "instagram.access_token"),
    ("INSTAGRAM_PUBLIC_BASE_URL", "instagram.public_base_url"),
];

/// Directory layout.
#[derive(Debug, Clone, Serialize, Deserialize, Getters)]
pub struct PathsConfig {
    /// Markdown source files
    #[serde(default = "default_content_dir")]
    content_dir: PathBuf,
    /// Candidate images
    #[serde(default = "default_image_dir")]
    image_dir: PathBuf,
    /// Where posted images are moved
    #[serde(default = "default_history_dir")]
    history_dir: PathBuf,
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("./content/md_files")
}

fn default_image_dir() -> PathBuf {
    PathBuf::from("./content/images")
}

fn default_history_dir() -> PathBuf {
    PathBuf::from("./content/history")
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            content_dir: default_content_dir(),
            image_dir: default_image_dir(),
            history_dir: default_history_dir(),
        }
    }
}

/// Caption model settings.
#[derive(Debug, Clone, Serialize, Deserialize, Getters)]
pub struct GenerationConfig {
    /// Ollama server URL
    #[serde(default = "default_ollama_host")]
    host: String,
    /// Model name
    #[serde(default = "default_ollama_model")]
    model: String,
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    temperature: f32,
    /// Generation cap in tokens
    #[serde(default = "default_max_tokens")]
    max_tokens: u32,
}

fn default_ollama_host() -> String {
    "http://localhost:11434".to_string()
}

fn default_ollama_model() -> String {
    "llama3.1:latest".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    100
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            host: default_ollama_host(),
            model: default_ollama_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// Graph API endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Getters)]
pub struct GraphConfig {
    /// Host URL
    #[serde(default = "default_graph_url")]
    base_url: String,
    /// Version path segment
    #[serde(default = "default_graph_version")]
    api_version: String,
}

fn default_graph_url() -> String {
    "https://graph.facebook.com".to_string()
}

fn default_graph_version() -> String {
    "v20.0".to_string()
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            base_url: default_graph_url(),
            api_version: default_graph_version(),
        }
    }
}

/// Facebook Page credentials.
#[derive(Clone, Default, Serialize, Deserialize, Getters)]
pub struct FacebookConfig {
    /// Page id
    #[serde(default)]
    page_id: Option<String>,
    /// Page access token
    #[serde(default)]
    access_token: Option<String>,
}

impl FacebookConfig {
    /// Page id and token, when both are set and non-empty.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        Some((non_empty(&self.page_id)?, non_empty(&self.access_token)?))
    }
}

impl std::fmt::Debug for FacebookConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FacebookConfig")
            .field("page_id", &self.page_id)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Instagram business account credentials.
#[derive(Clone, Default, Serialize, Deserialize, Getters)]
pub struct InstagramConfig {
    /// Instagram account id
    #[serde(default)]
    account_id: Option<String>,
    /// Access token
    #[serde(default)]
    access_token: Option<String>,
    /// Public URL the image directory is served from
    #[serde(default)]
    public_base_url: Option<String>,
}

impl InstagramConfig {
    /// Account id and token, when both are set and non-empty.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        Some((non_empty(&self.account_id)?, non_empty(&self.access_token)?))
    }
}

impl std::fmt::Debug for InstagramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstagramConfig")
            .field("account_id", &self.account_id)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("public_base_url", &self.public_base_url)
            .finish()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Scheduler settings.
#[derive(Debug, Clone, Serialize, Deserialize, Getters)]
pub struct ScheduleConfig {
    /// When runs happen
    #[serde(default)]
    trigger: ScheduleType,
    /// Longest sleep between wall-clock checks, in seconds
    #[serde(default = "default_poll_seconds")]
    poll_seconds: u64,
    /// Stop the loop when a run fails
    #[serde(default = "default_halt_on_error")]
    halt_on_error: bool,
}

fn default_poll_seconds() -> u64 {
    30
}

fn default_halt_on_error() -> bool {
    true
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            trigger: ScheduleType::default(),
            poll_seconds: default_poll_seconds(),
            halt_on_error: default_halt_on_error(),
        }
    }
}

impl ScheduleConfig {
    /// Settings with an explicit trigger.
    pub fn new(trigger: ScheduleType, poll_seconds: u64, halt_on_error: bool) -> Self {
        Self {
            trigger,
            poll_seconds,
            halt_on_error,
        }
    }
}

/// Complete herald configuration.
///
/// # Example
///
/// ```no_run
/// use herald_bot::HeraldConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = HeraldConfig::load(None)?;
/// for warning in config.validate() {
///     eprintln!("warning: {}", warning);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, Getters)]
pub struct HeraldConfig {
    /// Directory layout
    #[serde(default)]
    paths: PathsConfig,
    /// Caption model
    #[serde(default)]
    generation: GenerationConfig,
    /// Graph API endpoint
    #[serde(default)]
    graph: GraphConfig,
    /// Facebook credentials
    #[serde(default)]
    facebook: FacebookConfig,
    /// Instagram credentials
    #[serde(default)]
    instagram: InstagramConfig,
    /// Scheduler
    #[serde(default)]
    schedule: ScheduleConfig,
}

impl HeraldConfig {
    /// Load configuration using the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit `path` cannot be read, or any
    /// source fails to parse.
    pub fn load(path: Option<&Path>) -> HeraldResult<Self> {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    /// Load configuration, reading environment values through `lookup`.
    ///
    /// Empty values are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit `path` cannot be read, or any
    /// source fails to parse.
    pub fn load_with<F>(path: Option<&Path>, lookup: F) -> HeraldResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        builder = match path {
            Some(path) => builder.add_source(File::from(path).format(FileFormat::Toml)),
            None => builder.add_source(File::with_name("herald").required(false)),
        };

        for (variable, key) in ENV_OVERRIDES {
            let value = lookup(variable).filter(|v| !v.trim().is_empty());
            if value.is_some() {
                tracing::debug!(variable, key, "Configuration overridden from environment");
            }
            builder = builder
                .set_override_option(*key, value)
                .map_err(|e| ConfigError::invalid_setting(variable, e))?;
        }

        let config: Self = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;

        Ok(config)
    }

    /// Problems that do not stop startup.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.facebook.credentials().is_none() {
            warnings.push(
                "Facebook disabled: FACEBOOK_PAGE_ID and FACEBOOK_ACCESS_TOKEN are required"
                    .to_string(),
            );
        }

        if self.instagram.credentials().is_none() {
            warnings.push(
                "Instagram disabled: INSTAGRAM_ACCOUNT_ID and INSTAGRAM_ACCESS_TOKEN are required"
                    .to_string(),
            );
        } else if non_empty(&self.instagram.public_base_url).is_none() {
            warnings.push(
                "Instagram will be sent file:// image URLs; set INSTAGRAM_PUBLIC_BASE_URL for production"
                    .to_string(),
            );
        }

        if matches!(self.schedule.trigger, ScheduleType::Interval { seconds: 0 }) {
            warnings.push("Schedule interval is 0 seconds: runs back to back".to_string());
        }

        if let Err(e) = self.schedule.trigger.validate() {
            warnings.push(e.message);
        }

        if self.schedule.poll_seconds == 0 {
            warnings.push("poll_seconds is 0: treated as 1 second".to_string());
        }

        if !(0.0..=2.0).contains(&self.generation.temperature) {
            warnings.push(format!(
                "Unusual generation temperature {}",
                self.generation.temperature
            ));
        }

        warnings
    }
}
