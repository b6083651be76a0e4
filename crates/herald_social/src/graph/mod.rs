//! Graph API plumbing shared by the publishers.

mod response;
mod transport;

pub use response::GraphResponse;
pub use transport::{GraphTransport, ImageUpload, ReqwestTransport};

use herald_error::{PublishError, PublishErrorKind, PublishResult};
use serde::{Deserialize, Serialize};

/// Public Graph API host.
pub const DEFAULT_GRAPH_URL: &str = "https://graph.facebook.com";

/// Graph API version the endpoints are pinned to.
pub const DEFAULT_GRAPH_VERSION: &str = "v20.0";

/// Graph API host and version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphApi {
    /// Host URL without trailing slash
    pub base_url: String,
    /// Version path segment (e.g. "v20.0")
    pub version: String,
}

impl GraphApi {
    /// Graph API at a custom host and version.
    pub fn new(base_url: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            version: version.into(),
        }
    }

    /// URL of `edge` on `node`.
    ///
    /// # Examples
    ///
    /// ```
    /// use herald_social::GraphApi;
    ///
    /// let api = GraphApi::default();
    /// assert_eq!(
    ///     api.endpoint("123", "photos"),
    ///     "https://graph.facebook.com/v20.0/123/photos"
    /// );
    /// ```
    pub fn endpoint(&self, node: &str, edge: &str) -> String {
        format!("{}/{}/{}/{}", self.base_url, self.version, node, edge)
    }
}

impl Default for GraphApi {
    fn default() -> Self {
        Self::new(DEFAULT_GRAPH_URL, DEFAULT_GRAPH_VERSION)
    }
}

/// Node identifier and access token for one account.
#[derive(Clone, PartialEq, Eq)]
pub struct GraphCredentials {
    id: String,
    access_token: String,
}

impl GraphCredentials {
    /// Credentials for the page or account `id`.
    ///
    /// # Errors
    ///
    /// Returns error if either value is empty.
    pub fn new(
        platform: &str,
        id: impl Into<String>,
        access_token: impl Into<String>,
    ) -> PublishResult<Self> {
        let id = id.into();
        let access_token = access_token.into();

        if id.trim().is_empty() {
            return Err(PublishError::new(PublishErrorKind::NotConfigured {
                platform: platform.to_string(),
                message: "account id cannot be empty".to_string(),
            }));
        }
        if access_token.trim().is_empty() {
            return Err(PublishError::new(PublishErrorKind::NotConfigured {
                platform: platform.to_string(),
                message: "access token cannot be empty".to_string(),
            }));
        }

        Ok(Self { id, access_token })
    }

    /// Page or account id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Access token sent as the `access_token` query parameter.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }
}

impl std::fmt::Debug for GraphCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphCredentials")
            .field("id", &self.id)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_trims_trailing_slash() {
        let api = GraphApi::new("http://localhost:8080/", "v20.0");
        assert_eq!(
            api.endpoint("42", "media_publish"),
            "http://localhost:8080/v20.0/42/media_publish"
        );
    }

    #[test]
    fn credentials_reject_empty_values() {
        assert!(GraphCredentials::new("facebook", "", "token").is_err());
        assert!(GraphCredentials::new("facebook", "123", " ").is_err());
        assert!(GraphCredentials::new("facebook", "123", "token").is_ok());
    }

    #[test]
    fn debug_hides_token() {
        let creds = GraphCredentials::new("instagram", "17", "secret-token").unwrap();
        let text = format!("{:?}", creds);
        assert!(text.contains("17"));
        assert!(!text.contains("secret-token"));
    }
}
