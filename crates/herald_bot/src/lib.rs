//! Posting pipeline, scheduler and configuration for herald.
//!
//! - [`PostingPipeline`]: one run of select text, select image, caption,
//!   publish to every registered network.
//! - [`Scheduler`]: runs the pipeline on a [`ScheduleType`], one run at a
//!   time, skipping ticks missed while a run was in progress.
//! - [`HeraldConfig`]: bundled defaults, optional TOML file, environment.
//! - [`RunMetrics`]: run and post counters shared with the binary.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod caption;
mod config;
mod metrics;
mod pipeline;
mod schedule;
mod scheduler;

pub use caption::{CaptionGenerator, FALLBACK_HASHTAGS, caption_prompt, ensure_hashtags};
pub use config::{
    FacebookConfig, GenerationConfig, GraphConfig, HeraldConfig, InstagramConfig, PathsConfig,
    ScheduleConfig,
};
pub use metrics::{MetricsSnapshot, RunMetrics};
pub use pipeline::{PostingPipeline, RunReport};
pub use schedule::ScheduleType;
pub use scheduler::Scheduler;
