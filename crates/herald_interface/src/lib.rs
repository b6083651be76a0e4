//! Trait definitions for herald generation backends and publishers.
//!
//! The pipeline only talks to these traits, so tests can swap in mock
//! drivers and platforms without any network access.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{Publisher, TextGenerator};
