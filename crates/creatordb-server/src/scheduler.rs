//! Background job scheduler.
//!
//! Registers the two daily enrichment jobs at server startup. Both go
//! through the shared [`EnrichmentRunner`], so a scheduled run and an
//! on-demand trigger contend for the same per-pipeline lock instead of
//! overlapping. Job failures are logged and never take the server down.

use std::sync::Arc;

use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use creatordb_enrich::{EnrichError, EnrichmentRunner};

// 06:00 / 07:00 UTC, i.e. 03:00 / 04:00 América/São Paulo.
const YOUTUBE_SCHEDULE: &str = "0 0 6 * * *";
const INSTAGRAM_SCHEDULE: &str = "0 0 7 * * *";

/// Builds and starts the background job scheduler.
///
/// Returns the running [`JobScheduler`] handle, which must be kept alive for
/// the lifetime of the process. Dropping it shuts down all scheduled jobs.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the scheduler cannot be initialised,
/// a job cannot be registered, or the scheduler fails to start.
pub async fn build_scheduler(
    runner: Arc<EnrichmentRunner>,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;

    register_youtube_job(&scheduler, Arc::clone(&runner)).await?;
    register_instagram_job(&scheduler, runner).await?;

    scheduler.start().await?;
    Ok(scheduler)
}

/// Daily keyword-discovery run over the niche catalog.
async fn register_youtube_job(
    scheduler: &JobScheduler,
    runner: Arc<EnrichmentRunner>,
) -> Result<(), JobSchedulerError> {
    let job = Job::new_async(YOUTUBE_SCHEDULE, move |_uuid, _lock| {
        let runner = Arc::clone(&runner);
        Box::pin(async move {
            tracing::info!("scheduler: starting daily youtube discovery");
            match runner.run_youtube().await {
                Ok(summary) => {
                    tracing::info!(
                        saved = summary.saved,
                        skipped = summary.skipped,
                        failed = summary.failed,
                        "scheduler: youtube discovery complete"
                    );
                }
                Err(EnrichError::AlreadyRunning(pipeline)) => {
                    tracing::warn!(pipeline, "scheduler: run skipped, already in progress");
                }
                Err(e) => {
                    tracing::error!(error = %e, "scheduler: youtube discovery failed");
                }
            }
        })
    })?;

    scheduler.add(job).await?;
    Ok(())
}

/// Daily Instagram completion run for influencers without a profile yet.
async fn register_instagram_job(
    scheduler: &JobScheduler,
    runner: Arc<EnrichmentRunner>,
) -> Result<(), JobSchedulerError> {
    let job = Job::new_async(INSTAGRAM_SCHEDULE, move |_uuid, _lock| {
        let runner = Arc::clone(&runner);
        Box::pin(async move {
            tracing::info!("scheduler: starting daily instagram completion");
            match runner.run_instagram().await {
                Ok(summary) => {
                    tracing::info!(
                        saved = summary.saved,
                        skipped = summary.skipped,
                        failed = summary.failed,
                        "scheduler: instagram completion complete"
                    );
                }
                Err(EnrichError::AlreadyRunning(pipeline)) => {
                    tracing::warn!(pipeline, "scheduler: run skipped, already in progress");
                }
                Err(e) => {
                    tracing::error!(error = %e, "scheduler: instagram completion failed");
                }
            }
        })
    })?;

    scheduler.add(job).await?;
    Ok(())
}
