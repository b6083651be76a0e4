//! Error types for the herald posting pipeline.
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! Crate-level errors convert into [`HeraldError`] through `?`.
//!
//! # Examples
//!
//! ```
//! use herald_error::{HeraldResult, HttpError};
//!
//! fn fetch_data() -> HeraldResult<String> {
//!     Err(HttpError::new("Connection refused"))?
//! }
//!
//! assert!(fetch_data().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod generation;
mod http;
mod publish;
mod schedule;
mod storage;

pub use config::ConfigError;
pub use error::{HeraldError, HeraldErrorKind, HeraldResult};
pub use generation::{GenerationError, GenerationErrorKind, GenerationResult};
pub use http::HttpError;
pub use publish::{PublishError, PublishErrorKind, PublishResult};
pub use schedule::ScheduleError;
pub use storage::{StorageError, StorageErrorKind, StorageResult};
