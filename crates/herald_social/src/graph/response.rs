//! Graph API responses.

use derive_getters::Getters;
use serde_json::Value;

/// Status and body of one Graph API call.
///
/// The body is parsed as JSON when possible; otherwise the raw text is
/// kept as a JSON string so it can still be reported.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct GraphResponse {
    status: u16,
    body: Value,
}

impl GraphResponse {
    /// Response with an already-parsed body.
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Response from raw body text.
    ///
    /// # Examples
    ///
    /// ```
    /// use herald_social::GraphResponse;
    ///
    /// let ok = GraphResponse::from_text(200, r#"{"id":"1"}"#);
    /// assert_eq!(ok.id().as_deref(), Some("1"));
    ///
    /// let raw = GraphResponse::from_text(502, "Bad Gateway");
    /// assert_eq!(raw.body(), &serde_json::json!("Bad Gateway"));
    /// ```
    pub fn from_text(status: u16, text: &str) -> Self {
        let body = serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()));
        Self { status, body }
    }

    /// Whether the call returned HTTP 200.
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// The `id` field of the body, as a string.
    ///
    /// The Graph API returns ids as strings, but numeric ids are accepted.
    pub fn id(&self) -> Option<String> {
        match self.body.get("id")? {
            Value::String(id) if !id.is_empty() => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        }
    }

    /// Take the body.
    pub fn into_body(self) -> Value {
        self.body
    }
}
