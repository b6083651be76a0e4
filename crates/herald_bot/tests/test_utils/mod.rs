//! Mock generator and publishers for pipeline tests.

#![allow(dead_code)]

use async_trait::async_trait;
use herald_bot::{CaptionGenerator, PostingPipeline};
use herald_core::{GenerateRequest, GenerateResponse, ImageAsset, PublishOutcome};
use herald_error::{GenerationError, GenerationErrorKind, HeraldResult, HttpError};
use herald_interface::{Publisher, TextGenerator};
use herald_storage::{ContentLibrary, ImageArchive};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Generator that answers every prompt with the same text.
pub struct MockGenerator {
    response: Option<String>,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl MockGenerator {
    pub fn replying(text: &str) -> Self {
        Self {
            response: Some(text.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Generator whose server is unreachable.
    pub fn unreachable() -> Self {
        Self {
            response: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, request: &GenerateRequest) -> HeraldResult<GenerateResponse> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.response {
            Some(text) => Ok(GenerateResponse::new(text.clone())),
            None => Err(GenerationError::new(GenerationErrorKind::ServerUnreachable {
                url: "http://localhost:11434".to_string(),
                message: "connection refused".to_string(),
            })
            .into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

/// Publisher that records calls and returns a fixed outcome.
pub struct MockPublisher {
    name: String,
    outcome: Option<PublishOutcome>,
    calls: Mutex<Vec<(String, ImageAsset)>>,
}

impl MockPublisher {
    pub fn accepting(name: &str) -> Self {
        Self::returning(
            name,
            PublishOutcome::Published {
                status: 200,
                body: json!({"id": format!("{name}-post")}),
            },
        )
    }

    pub fn returning(name: &str, outcome: PublishOutcome) -> Self {
        Self {
            name: name.to_string(),
            outcome: Some(outcome),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Publisher whose transport always fails.
    pub fn broken(name: &str) -> Self {
        Self {
            name: name.to_string(),
            outcome: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, ImageAsset)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Publisher for MockPublisher {
    async fn publish(&self, caption: &str, image: &ImageAsset) -> HeraldResult<PublishOutcome> {
        self.calls
            .lock()
            .unwrap()
            .push((caption.to_string(), image.clone()));
        match &self.outcome {
            Some(outcome) => Ok(outcome.clone()),
            None => Err(HttpError::new("connection reset").into()),
        }
    }

    fn platform_name(&self) -> &str {
        &self.name
    }
}

/// Content, image and history directories in a temp dir.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("md_files")).unwrap();
        std::fs::create_dir_all(dir.path().join("images")).unwrap();
        Self { dir }
    }

    pub fn content_dir(&self) -> PathBuf {
        self.dir.path().join("md_files")
    }

    pub fn image_dir(&self) -> PathBuf {
        self.dir.path().join("images")
    }

    pub fn history_dir(&self) -> PathBuf {
        self.dir.path().join("history")
    }

    /// File names currently in the history directory.
    pub fn history(&self) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(self.history_dir()) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    pub fn add_text(&self, name: &str, content: &str) -> PathBuf {
        let path = self.content_dir().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    pub fn add_image(&self, name: &str) -> PathBuf {
        let path = self.image_dir().join(name);
        std::fs::write(&path, b"image bytes").unwrap();
        path
    }

    pub fn library(&self) -> ContentLibrary {
        ContentLibrary::new(self.content_dir(), self.image_dir())
    }

    /// Pipeline with the given generator and publishers, in order.
    pub fn pipeline(
        &self,
        generator: Arc<MockGenerator>,
        publishers: &[Arc<MockPublisher>],
    ) -> PostingPipeline {
        let archive = ImageArchive::new(self.history_dir()).unwrap();
        let mut pipeline =
            PostingPipeline::new(self.library(), archive, CaptionGenerator::new(generator));
        for publisher in publishers {
            pipeline = pipeline.with_publisher(publisher.clone());
        }
        pipeline
    }
}

pub fn file_name(path: &Path) -> String {
    path.file_name().unwrap().to_string_lossy().into_owned()
}
