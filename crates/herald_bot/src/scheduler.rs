//! Sequential run loop.

use crate::{PostingPipeline, RunMetrics, RunReport, ScheduleConfig, ScheduleType};
use chrono::{DateTime, Local};
use herald_error::{HeraldResult, ScheduleError};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, instrument};

/// Runs a [`PostingPipeline`] on a schedule.
///
/// The next run time is computed after the previous run finishes, so runs
/// never overlap and ticks missed during a long run are skipped rather
/// than queued. While waiting, the loop re-reads the wall clock at least
/// every `poll_seconds`.
pub struct Scheduler {
    pipeline: Arc<PostingPipeline>,
    schedule: ScheduleType,
    poll: Duration,
    halt_on_error: bool,
    metrics: RunMetrics,
}

impl Scheduler {
    /// Scheduler for `pipeline` with the given settings.
    pub fn new(pipeline: Arc<PostingPipeline>, config: &ScheduleConfig) -> Self {
        Self {
            pipeline,
            schedule: config.trigger().clone(),
            poll: Duration::from_secs((*config.poll_seconds()).max(1)),
            halt_on_error: *config.halt_on_error(),
            metrics: RunMetrics::new(),
        }
    }

    /// Share metrics with another collector.
    pub fn with_metrics(mut self, metrics: RunMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Metrics recorded by this scheduler.
    pub fn metrics(&self) -> &RunMetrics {
        &self.metrics
    }

    /// Schedule in use.
    pub fn schedule(&self) -> &ScheduleType {
        &self.schedule
    }

    /// Run until a run fails with `halt_on_error` set.
    ///
    /// # Errors
    ///
    /// Returns the failing run's error, or a schedule error if the
    /// schedule produces no further run time.
    pub async fn run_forever(&self) -> HeraldResult<()> {
        self.run_iterations(None).await.map(|_| ())
    }

    /// Run at most `limit` scheduled runs (unbounded for `None`).
    ///
    /// Returns the number of runs performed, failed ones included.
    ///
    /// # Errors
    ///
    /// Same as [`Scheduler::run_forever`].
    #[instrument(skip(self), fields(schedule = %self.schedule))]
    pub async fn run_iterations(&self, limit: Option<usize>) -> HeraldResult<usize> {
        info!(poll_seconds = self.poll.as_secs(), halt_on_error = self.halt_on_error, "Scheduler started");

        let mut completed = 0;
        loop {
            if let Some(limit) = limit
                && completed >= limit
            {
                break;
            }

            let Some(next_run) = self.schedule.next_after(Local::now()) else {
                return Err(ScheduleError::new(format!(
                    "schedule {} has no upcoming run",
                    self.schedule
                ))
                .into());
            };

            info!(next_run = %next_run.to_rfc3339(), "Waiting for next run");
            self.wait_until(next_run).await;

            let result = self.run_once().await;
            completed += 1;

            if let Err(e) = result {
                if self.halt_on_error {
                    error!(error = %e, "Run failed, stopping scheduler");
                    return Err(e);
                }
                error!(error = %e, "Run failed, continuing");
            }
        }

        info!(runs = completed, "Scheduler finished");
        Ok(completed)
    }

    /// Run the pipeline once now, recording metrics.
    ///
    /// # Errors
    ///
    /// Returns the pipeline's error.
    pub async fn run_once(&self) -> HeraldResult<RunReport> {
        self.metrics.record_run();

        match self.pipeline.run().await {
            Ok(report) => {
                self.metrics.record_success(&report);
                log_report(&report);
                info!(metrics = ?self.metrics.snapshot(), "Run metrics");
                Ok(report)
            }
            Err(e) => {
                self.metrics.record_failure();
                info!(metrics = ?self.metrics.snapshot(), "Run metrics");
                Err(e)
            }
        }
    }

    async fn wait_until(&self, target: DateTime<Local>) {
        loop {
            let now = Local::now();
            if now >= target {
                return;
            }

            let remaining = (target - now).to_std().unwrap_or(Duration::ZERO);
            tokio::time::sleep(remaining.min(self.poll)).await;
        }
    }
}

fn log_report(report: &RunReport) {
    info!(
        started_at = %report.started_at().to_rfc3339(),
        finished_at = %report.finished_at().to_rfc3339(),
        published = report.published_count(),
        "Run finished"
    );
    if let Some(archived) = report.archived() {
        info!(archive = %archived, "Image");
    }
    for (platform, outcome) in report.context().results() {
        info!(platform = %platform, outcome = %outcome, "Result");
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("schedule", &self.schedule)
            .field("poll", &self.poll)
            .field("halt_on_error", &self.halt_on_error)
            .finish()
    }
}
