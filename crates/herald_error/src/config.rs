//! Startup configuration failures.

/// Configuration that herald cannot start with.
///
/// Raised while loading `herald.toml` and its environment overrides, or
/// when the content or image directory is unusable. Missing network
/// credentials are not errors; that network is simply left out.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// What is wrong, naming the file, setting or directory involved
    pub message: String,
    /// Line that raised the error
    pub line: u32,
    /// File that raised the error
    pub file: &'static str,
}

impl ConfigError {
    /// Record a configuration failure at the caller's location.
    ///
    /// # Examples
    ///
    /// ```
    /// use herald_error::ConfigError;
    ///
    /// let err = ConfigError::new("Content directories unavailable: ./content/md_files");
    /// assert!(err.message.starts_with("Content directories unavailable"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }

    /// A setting, such as an environment override, that could not be applied.
    ///
    /// ```
    /// use herald_error::ConfigError;
    ///
    /// let err = ConfigError::invalid_setting("OLLAMA_MODEL", "key is empty");
    /// assert_eq!(err.message, "Failed to apply OLLAMA_MODEL: key is empty");
    /// ```
    #[track_caller]
    pub fn invalid_setting(setting: &str, reason: impl std::fmt::Display) -> Self {
        Self::new(format!("Failed to apply {}: {}", setting, reason))
    }
}
