//! Publishing errors.
//!
//! Only failures that abort a run live here. A non-200 answer from a
//! network is a publish outcome, not an error.

/// Publisher error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PublishErrorKind {
    /// Request never produced a response
    #[display("{} transport failure: {}", platform, message)]
    Transport {
        /// Platform name (e.g. "facebook")
        platform: String,
        /// Transport error message
        message: String,
    },

    /// Image could not be read for upload
    #[display("Failed to read image {}: {}", path, message)]
    ImageRead {
        /// Image path
        path: String,
        /// I/O error message
        message: String,
    },

    /// Publisher is missing credentials or identifiers
    #[display("{} is not configured: {}", platform, message)]
    NotConfigured {
        /// Platform name
        platform: String,
        /// What is missing
        message: String,
    },
}

/// Publish error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Publish Error: {} at {}:{}", kind, file, line)]
pub struct PublishError {
    /// The specific error kind
    pub kind: PublishErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// Source file where error occurred
    pub file: &'static str,
}

impl PublishError {
    /// Create a new publish error.
    #[track_caller]
    pub fn new(kind: PublishErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Result type for publishing operations.
pub type PublishResult<T> = Result<T, PublishError>;
