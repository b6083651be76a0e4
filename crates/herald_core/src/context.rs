//! Per-run context passed between pipeline steps.

use crate::{ImageAsset, PublishOutcome, SourceText};
use serde::Serialize;
use std::collections::BTreeMap;

/// Names of the values a run records.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum StoreKey {
    /// Full text of the selected source file
    MdContent,
    /// Base name of the selected source file
    MdFilename,
    /// Path of the selected image
    SelectedImage,
    /// Generated caption
    PostText,
}

/// Values produced during one pipeline run.
///
/// A fresh context is created for every run and handed to each step in
/// turn, so a selection that fails in one run never leaks the previous
/// run's values into the publishers.
///
/// # Examples
///
/// ```
/// use herald_core::{ImageAsset, RunContext, SourceText, StoreKey};
///
/// let mut ctx = RunContext::new();
/// assert!(ctx.publish_inputs().is_none());
///
/// ctx.set_source(SourceText::new("md/promo.md", "Fresh pasta daily"));
/// ctx.set_image(ImageAsset::new("images/a.jpg"));
/// ctx.set_caption("Pasta! #Foodie");
///
/// assert_eq!(ctx.value(StoreKey::MdFilename).as_deref(), Some("promo.md"));
/// assert!(ctx.publish_inputs().is_some());
/// ```
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunContext {
    source: Option<SourceText>,
    image: Option<ImageAsset>,
    caption: Option<String>,
    results: BTreeMap<String, PublishOutcome>,
}

impl RunContext {
    /// Empty context for a new run.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the selected text file.
    pub fn set_source(&mut self, source: SourceText) {
        self.source = Some(source);
    }

    /// Record the selected image.
    pub fn set_image(&mut self, image: ImageAsset) {
        self.image = Some(image);
    }

    /// Record the generated caption.
    pub fn set_caption(&mut self, caption: impl Into<String>) {
        self.caption = Some(caption.into());
    }

    /// Record a publisher's outcome under its platform name.
    pub fn record_result(&mut self, platform: impl Into<String>, outcome: PublishOutcome) {
        self.results.insert(platform.into(), outcome);
    }

    /// Selected text file, if any.
    pub fn source(&self) -> Option<&SourceText> {
        self.source.as_ref()
    }

    /// Selected image, if any.
    pub fn image(&self) -> Option<&ImageAsset> {
        self.image.as_ref()
    }

    /// Generated caption, if any.
    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }

    /// Outcome recorded for `platform`, if it ran.
    pub fn result(&self, platform: &str) -> Option<&PublishOutcome> {
        self.results.get(platform)
    }

    /// All recorded outcomes keyed by platform name.
    pub fn results(&self) -> &BTreeMap<String, PublishOutcome> {
        &self.results
    }

    /// Caption and image together, or `None` if either is missing.
    ///
    /// Publishers make no request unless both are present.
    pub fn publish_inputs(&self) -> Option<(&str, &ImageAsset)> {
        match (self.caption.as_deref(), self.image.as_ref()) {
            (Some(caption), Some(image)) if !caption.is_empty() => Some((caption, image)),
            _ => None,
        }
    }

    /// String view of a stored value.
    pub fn value(&self, key: StoreKey) -> Option<String> {
        match key {
            StoreKey::MdContent => self.source.as_ref().map(|s| s.content().clone()),
            StoreKey::MdFilename => self.source.as_ref().map(|s| s.file_name().clone()),
            StoreKey::SelectedImage => self
                .image
                .as_ref()
                .map(|i| i.path().display().to_string()),
            StoreKey::PostText => self.caption.clone(),
        }
    }
}
