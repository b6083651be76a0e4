//! Shared fixtures for publisher tests.

#![allow(dead_code)]

use async_trait::async_trait;
use herald_core::ImageAsset;
use herald_error::HttpError;
use herald_social::{GraphResponse, GraphTransport, ImageUpload};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;
use tempfile::TempDir;

/// One request seen by [`MockTransport`].
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub url: String,
    pub query: Vec<(String, String)>,
    pub upload: Option<ImageUpload>,
}

impl RecordedCall {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Transport that replays canned responses and records every request.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<GraphResponse, HttpError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: Value) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(GraphResponse::new(status, body)));
        self
    }

    pub fn respond_text(self, status: u16, text: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(GraphResponse::from_text(status, text)));
        self
    }

    pub fn fail(self, message: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(HttpError::new(message)));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn next(&self, call: RecordedCall) -> Result<GraphResponse, HttpError> {
        self.calls.lock().unwrap().push(call);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(HttpError::new("no canned response left")))
    }
}

#[async_trait]
impl GraphTransport for MockTransport {
    async fn post_form(
        &self,
        url: &str,
        query: &[(String, String)],
    ) -> Result<GraphResponse, HttpError> {
        self.next(RecordedCall {
            url: url.to_string(),
            query: query.to_vec(),
            upload: None,
        })
    }

    async fn post_multipart(
        &self,
        url: &str,
        query: &[(String, String)],
        upload: ImageUpload,
    ) -> Result<GraphResponse, HttpError> {
        self.next(RecordedCall {
            url: url.to_string(),
            query: query.to_vec(),
            upload: Some(upload),
        })
    }
}

/// Image directory with one image.
pub struct Fixture {
    pub dir: TempDir,
    pub image: ImageAsset,
}

impl Fixture {
    pub fn new(file_name: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let images = dir.path().join("images");
        std::fs::create_dir(&images).unwrap();

        let path = images.join(file_name);
        std::fs::write(&path, b"not really a jpeg").unwrap();

        Self {
            dir,
            image: ImageAsset::new(path),
        }
    }

    pub fn image_in_place(&self) -> bool {
        self.image.path().exists()
    }
}
