//! Keyword-driven YouTube discovery pipeline.
//!
//! For every keyword of every niche: search for channels, fetch their
//! statistics, derive recent-activity metrics from a sample of uploads, apply
//! the quality gate, and upsert survivors. One keyword or channel failing
//! never aborts the rest of the run; the failure is recorded in the summary
//! and the run moves on.

use std::collections::HashSet;

use chrono::Utc;
use sqlx::PgPool;
use tracing::{info, warn};

use creatordb_core::{NicheCatalog, QualityThresholds};
use creatordb_db::influencers::{self, NewYoutubeProfile};
use creatordb_youtube::{Channel, YoutubeClient};

use crate::gate::{self, GateDecision};
use crate::metrics::{self, ContentSample};
use crate::summary::{RunSummary, RunSummaryBuilder, SkipReason, UnitOutcome};

/// Tunables for the discovery pass, sourced from configuration.
#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    /// Region bias for keyword searches.
    pub region: String,
    /// Channel candidates requested per keyword.
    pub results_per_keyword: u32,
    /// Recent uploads sampled per channel for metric derivation.
    pub sample_size: u32,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            region: "BR".to_owned(),
            results_per_keyword: 10,
            sample_size: 20,
        }
    }
}

/// The YouTube discovery pipeline. Holds everything a run needs so the
/// scheduler and the on-demand trigger share one instance.
pub struct YoutubeEnrichment {
    client: YoutubeClient,
    pool: PgPool,
    catalog: NicheCatalog,
    thresholds: QualityThresholds,
    options: DiscoveryOptions,
}

impl YoutubeEnrichment {
    #[must_use]
    pub fn new(
        client: YoutubeClient,
        pool: PgPool,
        catalog: NicheCatalog,
        thresholds: QualityThresholds,
        options: DiscoveryOptions,
    ) -> Self {
        Self {
            client,
            pool,
            catalog,
            thresholds,
            options,
        }
    }

    /// Runs one full discovery pass over the niche catalog.
    ///
    /// Infallible by design: per-keyword and per-channel errors are recorded
    /// as failed units in the returned summary instead of propagating.
    pub async fn run(&self) -> RunSummary {
        let mut summary = RunSummaryBuilder::new("youtube");
        // Keywords within a niche often surface the same channels.
        let mut seen: HashSet<String> = HashSet::new();

        for niche in &self.catalog.niches {
            for keyword in &niche.keywords {
                info!(niche = %niche.name, keyword = %keyword, "searching channels");

                let channel_ids = match self
                    .client
                    .search_channel_ids(keyword, &self.options.region, self.options.results_per_keyword)
                    .await
                {
                    Ok(ids) => ids,
                    Err(e) => {
                        warn!(keyword = %keyword, error = %e, "keyword search failed");
                        summary.record(
                            format!("keyword:{keyword}"),
                            UnitOutcome::Failed {
                                error: e.to_string(),
                            },
                        );
                        continue;
                    }
                };

                let fresh: Vec<String> = channel_ids
                    .into_iter()
                    .filter(|id| seen.insert(id.clone()))
                    .collect();

                let channels = match self.client.channel_details(&fresh).await {
                    Ok(channels) => channels,
                    Err(e) => {
                        warn!(keyword = %keyword, error = %e, "channel lookup failed");
                        summary.record(
                            format!("keyword:{keyword}"),
                            UnitOutcome::Failed {
                                error: e.to_string(),
                            },
                        );
                        continue;
                    }
                };

                for channel in channels {
                    let unit = channel.id.clone();
                    let outcome = match self.enrich_channel(&channel, &niche.name).await {
                        Ok(outcome) => outcome,
                        Err(e) => {
                            warn!(channel_id = %unit, error = %e, "channel enrichment failed");
                            UnitOutcome::Failed {
                                error: e.to_string(),
                            }
                        }
                    };
                    summary.record(unit, outcome);
                }
            }
        }

        let summary = summary.finish();
        info!(
            saved = summary.saved,
            skipped = summary.skipped,
            failed = summary.failed,
            "youtube discovery finished"
        );
        summary
    }

    /// Gate and persist a single channel candidate.
    async fn enrich_channel(
        &self,
        channel: &Channel,
        niche: &str,
    ) -> Result<UnitOutcome, crate::EnrichError> {
        let Some(stats) = &channel.statistics else {
            return Ok(UnitOutcome::Skipped {
                reason: SkipReason::MissingStatistics,
            });
        };

        let videos = self
            .client
            .recent_videos(&channel.id, self.options.sample_size)
            .await?;

        let samples: Vec<ContentSample> = videos
            .iter()
            .map(|video| {
                let video_stats = video.statistics.clone().unwrap_or_default();
                ContentSample {
                    published_at: video.snippet.published_at,
                    view_count: video_stats.views(),
                    like_count: video_stats.likes(),
                    comment_count: video_stats.comments(),
                }
            })
            .collect();

        let now = Utc::now();
        let activity = metrics::aggregate(&samples, now);

        let content_count = i32::try_from(stats.video_count()).unwrap_or(i32::MAX);
        let decision = gate::evaluate(
            stats.subscribers(),
            content_count,
            activity.most_recent_published_at,
            now,
            &self.thresholds,
        );
        if let GateDecision::Reject(reason) = decision {
            return Ok(UnitOutcome::Skipped {
                reason: SkipReason::Gate(reason),
            });
        }

        let description = channel.snippet.description.trim();
        let profile = NewYoutubeProfile {
            channel_id: channel.id.clone(),
            name: channel.snippet.title.clone(),
            description: (!description.is_empty()).then(|| description.to_owned()),
            avatar_url: channel.snippet.thumbnails.best_url(),
            subscriber_count: stats.subscribers(),
            total_views: stats.total_views(),
            content_count,
            avg_recent_views: activity.avg_views,
            posts_last_30_days: activity.posts_last_30_days,
            views_last_30_days: activity.views_last_30_days,
            engagement_rate: activity.engagement_rate,
        };

        influencers::upsert_youtube_profile(&self.pool, &channel.snippet.title, niche, &profile)
            .await?;

        Ok(UnitOutcome::Saved)
    }
}
