//! Transport failures talking to Ollama or the Graph API.

/// A request that never produced an HTTP response.
///
/// Covers connection, DNS and TLS failures and unreadable bodies. Status
/// codes are not errors at this level: a 4xx or 5xx from the Graph API is
/// reported as a rejected publish instead. Graph API URLs carry the access
/// token, so callers build the message from an error whose URL has been
/// stripped.
///
/// # Examples
///
/// ```
/// use herald_error::HttpError;
///
/// let err = HttpError::new("error sending request: tcp connect error");
/// assert_eq!(err.message, "error sending request: tcp connect error");
/// assert!(!err.to_string().contains("access_token"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("HTTP Error: {} at line {} in {}", message, line, file)]
pub struct HttpError {
    /// Client error text, without the request URL
    pub message: String,
    /// Line that raised the error
    pub line: u32,
    /// File that raised the error
    pub file: &'static str,
}

impl HttpError {
    /// Record a transport failure at the caller's location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
