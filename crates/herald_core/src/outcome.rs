//! Publish outcomes.

use serde::{Deserialize, Serialize};

/// What a publisher did with one run's caption and image.
///
/// Non-success answers from a network are outcomes, not errors: they are
/// recorded for the run and the image stays in place for a later run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_more::Display)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PublishOutcome {
    /// Caption or image missing; no request was made
    #[display("skipped")]
    Skipped,

    /// Final call returned 200
    #[display("published ({}): {}", status, body)]
    Published {
        /// HTTP status of the final call
        status: u16,
        /// Parsed response body
        body: serde_json::Value,
    },

    /// Final call returned a non-200 status
    #[display("rejected ({}): {}", status, body)]
    Rejected {
        /// HTTP status of the final call
        status: u16,
        /// Parsed response body, or the raw text as a JSON string
        body: serde_json::Value,
    },

    /// A multi-step publish stopped before its last call
    #[display("aborted at {} ({}): {}", stage, status, body)]
    Aborted {
        /// Step that failed (e.g. "media")
        stage: String,
        /// HTTP status of the failed step
        status: u16,
        /// Parsed response body of the failed step
        body: serde_json::Value,
    },
}

impl PublishOutcome {
    /// Whether the post went live.
    pub fn is_published(&self) -> bool {
        matches!(self, Self::Published { .. })
    }

    /// Whether a request was made at all.
    pub fn was_attempted(&self) -> bool {
        !matches!(self, Self::Skipped)
    }

    /// Response body, if any.
    pub fn body(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Skipped => None,
            Self::Published { body, .. } | Self::Rejected { body, .. } | Self::Aborted { body, .. } => {
                Some(body)
            }
        }
    }
}
