//! Core data types for the herald posting pipeline.
//!
//! This crate provides the values that flow between pipeline steps: the
//! selected text and image, the generation request, publish outcomes, and
//! the per-run [`RunContext`] that carries them.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod context;
mod media;
mod outcome;
mod request;
mod source;

pub use context::{RunContext, StoreKey};
pub use media::{ImageAsset, IMAGE_EXTENSIONS, has_extension};
pub use outcome::PublishOutcome;
pub use request::{GenerateRequest, GenerateRequestBuilder, GenerateResponse};
pub use source::{SourceText, TEXT_EXTENSION};
