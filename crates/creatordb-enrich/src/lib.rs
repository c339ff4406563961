//! Enrichment pipelines: keyword-driven YouTube discovery and Instagram
//! profile completion, with pure metric/gating logic and a single-flight
//! runner shared by the scheduler and on-demand triggers.

use thiserror::Error;

pub mod gate;
pub mod metrics;
mod runner;
mod summary;

mod instagram;
mod youtube;

pub use instagram::InstagramEnrichment;
pub use runner::EnrichmentRunner;
pub use summary::{RunSummary, SkipReason, UnitOutcome, UnitReport};
pub use youtube::{DiscoveryOptions, YoutubeEnrichment};

#[derive(Debug, Error)]
pub enum EnrichError {
    /// Another trigger holds this pipeline's run lock.
    #[error("{0} run already in progress")]
    AlreadyRunning(&'static str),

    /// The caller's own Instagram business account could not be resolved;
    /// business discovery is impossible without it, so the run aborts.
    #[error("could not resolve an Instagram business account id")]
    MissingBusinessAccount,

    #[error(transparent)]
    Youtube(#[from] creatordb_youtube::YoutubeError),

    #[error(transparent)]
    Instagram(#[from] creatordb_instagram::InstagramError),

    #[error(transparent)]
    Db(#[from] creatordb_db::DbError),
}
