//! Instagram profile-completion pipeline.
//!
//! Finds influencers with no Instagram profile yet, resolves each display
//! name through business discovery, and upserts whatever resolves. Treats
//! the display name as the candidate username; discovery misses are
//! recorded as skips, not failures.

use sqlx::PgPool;
use tracing::{info, warn};

use creatordb_db::influencers::{self, NewInstagramProfile};
use creatordb_instagram::InstagramClient;

use crate::summary::{RunSummary, RunSummaryBuilder, SkipReason, UnitOutcome};
use crate::EnrichError;

pub struct InstagramEnrichment {
    client: InstagramClient,
    pool: PgPool,
}

impl InstagramEnrichment {
    #[must_use]
    pub fn new(client: InstagramClient, pool: PgPool) -> Self {
        Self { client, pool }
    }

    /// Runs one completion pass over influencers missing an Instagram profile.
    ///
    /// Per-influencer errors are recorded in the summary and the run moves
    /// on. The whole run aborts only when it cannot start at all.
    ///
    /// # Errors
    ///
    /// - [`EnrichError::Db`] if the missing-profile query fails.
    /// - [`EnrichError::MissingBusinessAccount`] when the access token has no
    ///   linked Instagram business account; discovery is impossible without
    ///   one.
    /// - [`EnrichError::Instagram`] if the business-account lookup itself
    ///   fails.
    pub async fn run(&self) -> Result<RunSummary, EnrichError> {
        let mut summary = RunSummaryBuilder::new("instagram");

        let missing =
            influencers::find_influencers_missing_platform(&self.pool, "instagram").await?;
        if missing.is_empty() {
            info!("no influencers missing an instagram profile");
            return Ok(summary.finish());
        }

        let business_account_id = self
            .client
            .business_account_id()
            .await?
            .ok_or(EnrichError::MissingBusinessAccount)?;

        info!(candidates = missing.len(), "completing instagram profiles");

        for row in missing {
            let outcome = match self
                .complete_profile(&business_account_id, row.id, &row.display_name)
                .await
            {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!(influencer = %row.display_name, error = %e, "instagram completion failed");
                    UnitOutcome::Failed {
                        error: e.to_string(),
                    }
                }
            };
            summary.record(row.display_name, outcome);
        }

        let summary = summary.finish();
        info!(
            saved = summary.saved,
            skipped = summary.skipped,
            failed = summary.failed,
            "instagram completion finished"
        );
        Ok(summary)
    }

    async fn complete_profile(
        &self,
        business_account_id: &str,
        influencer_id: i64,
        username: &str,
    ) -> Result<UnitOutcome, EnrichError> {
        let Some(discovery) = self
            .client
            .discover_user(business_account_id, username)
            .await?
        else {
            return Ok(UnitOutcome::Skipped {
                reason: SkipReason::ProfileNotFound,
            });
        };

        let profile = NewInstagramProfile {
            account_id: discovery.id,
            username: discovery.username,
            avatar_url: discovery.profile_picture_url,
            follower_count: discovery.followers_count,
            media_count: discovery.media_count,
        };
        influencers::upsert_instagram_profile(&self.pool, influencer_id, &profile).await?;

        Ok(UnitOutcome::Saved)
    }
}
