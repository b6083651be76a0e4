//! Counters for scheduled runs.

use crate::RunReport;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Run and post counters, cheap to clone and share.
#[derive(Debug, Clone, Default)]
pub struct RunMetrics {
    inner: Arc<RunMetricsInner>,
}

#[derive(Debug, Default)]
struct RunMetricsInner {
    runs: AtomicU64,
    failures: AtomicU64,
    published: parking_lot::Mutex<BTreeMap<String, u64>>,
    last_success: parking_lot::Mutex<Option<Instant>>,
}

impl RunMetrics {
    /// Creates a new metrics collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the start of a run.
    pub fn record_run(&self) {
        self.inner.runs.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a run that completed, counting each network it posted to.
    pub fn record_success(&self, report: &RunReport) {
        {
            let mut published = self.inner.published.lock();
            for (platform, outcome) in report.context().results() {
                if outcome.is_published() {
                    *published.entry(platform.clone()).or_default() += 1;
                }
            }
        }
        *self.inner.last_success.lock() = Some(Instant::now());
    }

    /// Records a run that returned an error.
    pub fn record_failure(&self) {
        self.inner.failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Runs started.
    pub fn runs(&self) -> u64 {
        self.inner.runs.load(Ordering::Relaxed)
    }

    /// Runs that returned an error.
    pub fn failures(&self) -> u64 {
        self.inner.failures.load(Ordering::Relaxed)
    }

    /// Posts that went live on `platform`.
    pub fn published(&self, platform: &str) -> u64 {
        self.inner
            .published
            .lock()
            .get(platform)
            .copied()
            .unwrap_or(0)
    }

    /// Time since the last run that completed.
    pub fn time_since_success(&self) -> Option<Duration> {
        self.inner
            .last_success
            .lock()
            .map(|instant| instant.elapsed())
    }

    /// Share of runs that completed (1.0 before the first run).
    pub fn success_rate(&self) -> f64 {
        let runs = self.runs();
        if runs == 0 {
            return 1.0;
        }

        let successes = runs.saturating_sub(self.failures());
        successes as f64 / runs as f64
    }

    /// Creates a serializable snapshot of current metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            runs: self.runs(),
            failures: self.failures(),
            published: self.inner.published.lock().clone(),
            seconds_since_success: self.time_since_success().map(|d| d.as_secs()),
            success_rate: self.success_rate(),
        }
    }
}

/// Serializable snapshot of run metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    /// Runs started
    pub runs: u64,
    /// Runs that returned an error
    pub failures: u64,
    /// Posts that went live, per network
    pub published: BTreeMap<String, u64>,
    /// Seconds since the last completed run
    pub seconds_since_success: Option<u64>,
    /// Share of runs that completed
    pub success_rate: f64,
}
