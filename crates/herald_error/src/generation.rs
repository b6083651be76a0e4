//! Text generation errors.

/// Generation-service error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum GenerationErrorKind {
    /// Generation server could not be reached
    #[display("Generation server not reachable at {}: {}", url, message)]
    ServerUnreachable {
        /// Base URL that was contacted
        url: String,
        /// Transport error message
        message: String,
    },

    /// Server answered with a non-success status
    #[display("Generation API error ({}): {}", status, body)]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body as text
        body: String,
    },

    /// Requested model is not installed on the server
    #[display("Model not found: {}", _0)]
    ModelNotFound(String),

    /// Response body did not match the expected shape
    #[display("Invalid generation response: {}", _0)]
    InvalidResponse(String),

    /// Invalid client configuration
    #[display("Invalid configuration: {}", _0)]
    InvalidConfiguration(String),
}

/// Generation error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at {}:{}", kind, file, line)]
pub struct GenerationError {
    /// The specific error kind
    pub kind: GenerationErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// Source file where error occurred
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new generation error.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Result type for generation operations.
pub type GenerationResult<T> = Result<T, GenerationError>;
