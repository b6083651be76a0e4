//! HTTP transport for Graph API calls.

use super::GraphResponse;
use async_trait::async_trait;
use derive_getters::Getters;
use herald_error::HttpError;
use tracing::instrument;

/// A file part for a multipart upload.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct ImageUpload {
    /// Form field name (e.g. "source")
    field: String,
    /// File name sent with the part
    file_name: String,
    /// MIME type of the part
    mime_type: String,
    /// File bytes
    bytes: Vec<u8>,
}

impl ImageUpload {
    /// Describe a file part.
    pub fn new(
        field: impl Into<String>,
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            field: field.into(),
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }
}

/// Sends Graph API requests.
///
/// Implementations return any HTTP status as a [`GraphResponse`]; only a
/// request that produced no response at all is an error.
#[async_trait]
pub trait GraphTransport: Send + Sync {
    /// `POST url?query` with an empty body.
    async fn post_form(
        &self,
        url: &str,
        query: &[(String, String)],
    ) -> Result<GraphResponse, HttpError>;

    /// `POST url?query` with a multipart body holding `upload`.
    async fn post_multipart(
        &self,
        url: &str,
        query: &[(String, String)],
        upload: ImageUpload,
    ) -> Result<GraphResponse, HttpError>;
}

/// [`GraphTransport`] backed by `reqwest`.
///
/// No timeout is set unless the supplied client carries one.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Transport over a fresh client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Transport over a preconfigured client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

/// Request errors carry the URL, and the URL carries the access token.
fn redacted(e: reqwest::Error) -> HttpError {
    let e = e.without_url();
    HttpError::new(e.to_string())
}

async fn read_response(response: reqwest::Response) -> Result<GraphResponse, HttpError> {
    let status = response.status().as_u16();
    let text = response.text().await.map_err(redacted)?;
    tracing::debug!(status, body_length = text.len(), "Graph API responded");
    Ok(GraphResponse::from_text(status, &text))
}

#[async_trait]
impl GraphTransport for ReqwestTransport {
    #[instrument(skip_all, fields(url = %url))]
    async fn post_form(
        &self,
        url: &str,
        query: &[(String, String)],
    ) -> Result<GraphResponse, HttpError> {
        let response = self
            .client
            .post(url)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                let e = redacted(e);
                tracing::error!(error = %e.message, "Graph API request failed");
                e
            })?;

        read_response(response).await
    }

    #[instrument(skip_all, fields(url = %url, file_name = %upload.file_name, size = upload.bytes.len()))]
    async fn post_multipart(
        &self,
        url: &str,
        query: &[(String, String)],
        upload: ImageUpload,
    ) -> Result<GraphResponse, HttpError> {
        let ImageUpload {
            field,
            file_name,
            mime_type,
            bytes,
        } = upload;

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(&mime_type)
            .map_err(redacted)?;
        let form = reqwest::multipart::Form::new().part(field, part);

        let response = self
            .client
            .post(url)
            .query(query)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                let e = redacted(e);
                tracing::error!(error = %e.message, "Graph API upload failed");
                e
            })?;

        read_response(response).await
    }
}
