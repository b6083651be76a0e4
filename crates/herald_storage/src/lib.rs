//! Content directories and image archive for herald.
//!
//! - [`ContentLibrary`] lists and randomly selects source text files and
//!   images.
//! - [`ImageArchive`] moves posted images into the history directory so they
//!   are not selected again.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod archive;
mod library;

pub use archive::{ArchiveOutcome, ImageArchive};
pub use library::ContentLibrary;
