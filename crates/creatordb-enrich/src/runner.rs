//! Single-flight coordination for the two pipelines.
//!
//! The scheduler and the on-demand HTTP/CLI triggers share one runner; each
//! pipeline has its own lock, so a slow YouTube run never blocks Instagram,
//! and a second trigger for a running pipeline fails fast instead of queuing.

use tokio::sync::Mutex;
use tracing::info;

use crate::instagram::InstagramEnrichment;
use crate::summary::RunSummary;
use crate::youtube::YoutubeEnrichment;
use crate::EnrichError;

pub struct EnrichmentRunner {
    youtube: YoutubeEnrichment,
    instagram: InstagramEnrichment,
    youtube_lock: Mutex<()>,
    instagram_lock: Mutex<()>,
}

impl EnrichmentRunner {
    #[must_use]
    pub fn new(youtube: YoutubeEnrichment, instagram: InstagramEnrichment) -> Self {
        Self {
            youtube,
            instagram,
            youtube_lock: Mutex::new(()),
            instagram_lock: Mutex::new(()),
        }
    }

    /// Runs one YouTube discovery pass.
    ///
    /// # Errors
    ///
    /// Returns [`EnrichError::AlreadyRunning`] when a YouTube run is already
    /// in flight.
    pub async fn run_youtube(&self) -> Result<RunSummary, EnrichError> {
        let _guard = self
            .youtube_lock
            .try_lock()
            .map_err(|_| EnrichError::AlreadyRunning("youtube"))?;
        info!("starting youtube discovery run");
        Ok(self.youtube.run().await)
    }

    /// Runs one Instagram completion pass.
    ///
    /// # Errors
    ///
    /// Returns [`EnrichError::AlreadyRunning`] when an Instagram run is
    /// already in flight, or the pipeline's own startup errors.
    pub async fn run_instagram(&self) -> Result<RunSummary, EnrichError> {
        let _guard = self
            .instagram_lock
            .try_lock()
            .map_err(|_| EnrichError::AlreadyRunning("instagram"))?;
        info!("starting instagram completion run");
        self.instagram.run().await
    }

    /// Runs YouTube discovery, then Instagram completion, so freshly
    /// discovered influencers get their Instagram pass in the same trigger.
    ///
    /// # Errors
    ///
    /// Same taxonomy as the individual runs; fails fast if either pipeline
    /// is already in flight.
    pub async fn run_all(&self) -> Result<(RunSummary, RunSummary), EnrichError> {
        let youtube = self.run_youtube().await?;
        let instagram = self.run_instagram().await?;
        Ok((youtube, instagram))
    }
}
