//! Facebook and Instagram Graph API publishers for herald.
//!
//! Both publishers speak to the Graph API through the [`GraphTransport`]
//! trait. [`ReqwestTransport`] is the real implementation; tests supply a
//! recording mock.
//!
//! - [`FacebookPublisher`]: single multipart upload to a Page's `photos` edge.
//! - [`InstagramPublisher`]: create a media container, then publish it.
//!
//! Publishers never move the image; the caller archives it once every
//! network has had its turn, since Instagram may still be fetching it by URL.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod facebook;
mod graph;
mod instagram;

pub use facebook::FacebookPublisher;
pub use graph::{
    DEFAULT_GRAPH_URL, DEFAULT_GRAPH_VERSION, GraphApi, GraphCredentials, GraphResponse,
    GraphTransport, ImageUpload, ReqwestTransport,
};
pub use instagram::InstagramPublisher;
