//! Database operations for the `influencers` and `social_profiles` tables.
//!
//! The YouTube write path is a two-statement transaction: upsert the
//! influencer by its unique display name, then upsert the profile by its
//! unique platform-native channel id. Both platforms converge with
//! overwrite-on-conflict semantics, so repeated runs update in place and
//! never duplicate rows.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `influencers` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct InfluencerRow {
    pub id: i64,
    pub public_id: Uuid,
    pub display_name: String,
    pub main_niche: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A row from the `social_profiles` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SocialProfileRow {
    pub id: i64,
    pub influencer_id: i64,
    pub platform: String,
    pub channel_id: String,
    pub name: String,
    pub description: Option<String>,
    pub avatar_url: Option<String>,
    pub subscriber_count: i64,
    pub total_views: i64,
    pub content_count: i32,
    pub avg_recent_views: i64,
    pub posts_last_30_days: i32,
    pub views_last_30_days: i64,
    pub engagement_rate: f64,
    pub updated_at: DateTime<Utc>,
}

/// An influencer that has no profile row for some platform yet.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MissingPlatformRow {
    pub id: i64,
    pub display_name: String,
}

/// An influencer with its social profiles grouped underneath.
#[derive(Debug, Clone)]
pub struct InfluencerWithProfiles {
    pub influencer: InfluencerRow,
    pub profiles: Vec<SocialProfileRow>,
}

/// Gated, metric-enriched channel data ready to persist.
#[derive(Debug, Clone)]
pub struct NewYoutubeProfile {
    pub channel_id: String,
    pub name: String,
    pub description: Option<String>,
    pub avatar_url: Option<String>,
    pub subscriber_count: i64,
    pub total_views: i64,
    pub content_count: i32,
    pub avg_recent_views: i64,
    pub posts_last_30_days: i32,
    pub views_last_30_days: i64,
    pub engagement_rate: f64,
}

/// A resolved Instagram account for an already-known influencer.
#[derive(Debug, Clone)]
pub struct NewInstagramProfile {
    pub account_id: String,
    pub username: String,
    pub avatar_url: Option<String>,
    pub follower_count: i64,
    pub media_count: i32,
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// Save or update a YouTube discovery in a single transaction.
///
/// Upserts the influencer by `display_name` (niche is last-write-wins), then
/// upserts the profile by `channel_id`, overwriting all mutable fields and
/// refreshing `updated_at`. Returns the influencer id. If either statement
/// fails the transaction guard rolls both back on drop, so an influencer is
/// never committed without its profile.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if either statement or the commit fails.
pub async fn upsert_youtube_profile(
    pool: &PgPool,
    display_name: &str,
    niche: &str,
    profile: &NewYoutubeProfile,
) -> Result<i64, DbError> {
    let mut tx = pool.begin().await?;

    let influencer_id: i64 = sqlx::query_scalar(
        "INSERT INTO influencers (display_name, main_niche) \
         VALUES ($1, $2) \
         ON CONFLICT (display_name) DO UPDATE \
           SET main_niche = EXCLUDED.main_niche, updated_at = NOW() \
         RETURNING id",
    )
    .bind(display_name)
    .bind(niche)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        "INSERT INTO social_profiles \
           (influencer_id, platform, channel_id, name, description, avatar_url, \
            subscriber_count, total_views, content_count, avg_recent_views, \
            posts_last_30_days, views_last_30_days, engagement_rate) \
         VALUES ($1, 'youtube', $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
         ON CONFLICT (channel_id) DO UPDATE SET \
           influencer_id = EXCLUDED.influencer_id, \
           name = EXCLUDED.name, \
           description = EXCLUDED.description, \
           avatar_url = EXCLUDED.avatar_url, \
           subscriber_count = EXCLUDED.subscriber_count, \
           total_views = EXCLUDED.total_views, \
           content_count = EXCLUDED.content_count, \
           avg_recent_views = EXCLUDED.avg_recent_views, \
           posts_last_30_days = EXCLUDED.posts_last_30_days, \
           views_last_30_days = EXCLUDED.views_last_30_days, \
           engagement_rate = EXCLUDED.engagement_rate, \
           updated_at = NOW()",
    )
    .bind(influencer_id)
    .bind(&profile.channel_id)
    .bind(&profile.name)
    .bind(&profile.description)
    .bind(&profile.avatar_url)
    .bind(profile.subscriber_count)
    .bind(profile.total_views)
    .bind(profile.content_count)
    .bind(profile.avg_recent_views)
    .bind(profile.posts_last_30_days)
    .bind(profile.views_last_30_days)
    .bind(profile.engagement_rate)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(influencer_id)
}

/// Save or update an Instagram profile for a known influencer.
///
/// Same overwrite-on-conflict semantics as the YouTube path; re-runs refresh
/// follower and media counts in place.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn upsert_instagram_profile(
    pool: &PgPool,
    influencer_id: i64,
    profile: &NewInstagramProfile,
) -> Result<(), DbError> {
    sqlx::query(
        "INSERT INTO social_profiles \
           (influencer_id, platform, channel_id, name, avatar_url, \
            subscriber_count, content_count) \
         VALUES ($1, 'instagram', $2, $3, $4, $5, $6) \
         ON CONFLICT (channel_id) DO UPDATE SET \
           influencer_id = EXCLUDED.influencer_id, \
           name = EXCLUDED.name, \
           avatar_url = EXCLUDED.avatar_url, \
           subscriber_count = EXCLUDED.subscriber_count, \
           content_count = EXCLUDED.content_count, \
           updated_at = NOW()",
    )
    .bind(influencer_id)
    .bind(&profile.account_id)
    .bind(&profile.username)
    .bind(&profile.avatar_url)
    .bind(profile.follower_count)
    .bind(profile.media_count)
    .execute(pool)
    .await?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// Returns influencers that have no profile row for the given platform.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn find_influencers_missing_platform(
    pool: &PgPool,
    platform: &str,
) -> Result<Vec<MissingPlatformRow>, DbError> {
    let rows = sqlx::query_as::<_, MissingPlatformRow>(
        "SELECT i.id, i.display_name \
         FROM influencers i \
         WHERE NOT EXISTS ( \
           SELECT 1 FROM social_profiles sp \
           WHERE sp.influencer_id = i.id AND sp.platform = $1 \
         ) \
         ORDER BY i.id",
    )
    .bind(platform)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns all influencers with their profiles nested, ordered by the maximum
/// subscriber count across each influencer's profiles (descending), with
/// influencers that have no profiles last.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if either query fails.
pub async fn list_influencers_with_profiles(
    pool: &PgPool,
) -> Result<Vec<InfluencerWithProfiles>, DbError> {
    let influencers = sqlx::query_as::<_, InfluencerRow>(
        "SELECT i.id, i.public_id, i.display_name, i.main_niche, i.created_at, i.updated_at \
         FROM influencers i \
         LEFT JOIN social_profiles sp ON sp.influencer_id = i.id \
         GROUP BY i.id \
         ORDER BY MAX(sp.subscriber_count) DESC NULLS LAST, i.id",
    )
    .fetch_all(pool)
    .await?;

    let profiles = sqlx::query_as::<_, SocialProfileRow>(
        "SELECT id, influencer_id, platform, channel_id, name, description, avatar_url, \
                subscriber_count, total_views, content_count, avg_recent_views, \
                posts_last_30_days, views_last_30_days, engagement_rate, updated_at \
         FROM social_profiles \
         ORDER BY influencer_id, platform",
    )
    .fetch_all(pool)
    .await?;

    let mut by_influencer: HashMap<i64, Vec<SocialProfileRow>> = HashMap::new();
    for profile in profiles {
        by_influencer
            .entry(profile.influencer_id)
            .or_default()
            .push(profile);
    }

    Ok(influencers
        .into_iter()
        .map(|influencer| {
            let profiles = by_influencer.remove(&influencer.id).unwrap_or_default();
            InfluencerWithProfiles {
                influencer,
                profiles,
            }
        })
        .collect())
}
