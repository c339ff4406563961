//! Dashboard read path: every influencer with its social profiles nested,
//! highest reach first.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use creatordb_db::{InfluencerWithProfiles, SocialProfileRow};

use super::AppState;

#[derive(Debug, Serialize)]
pub(super) struct InfluencerItem {
    /// Public uuid; internal row ids never leave the API.
    pub id: Uuid,
    pub display_name: String,
    pub main_niche: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub profiles: Vec<ProfileItem>,
}

#[derive(Debug, Serialize)]
pub(super) struct ProfileItem {
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

impl From<SocialProfileRow> for ProfileItem {
    fn from(row: SocialProfileRow) -> Self {
        Self {
            platform: row.platform,
            channel_id: row.channel_id,
            name: row.name,
            description: row.description,
            avatar_url: row.avatar_url,
            subscriber_count: row.subscriber_count,
            total_views: row.total_views,
            content_count: row.content_count,
            avg_recent_views: row.avg_recent_views,
            posts_last_30_days: row.posts_last_30_days,
            views_last_30_days: row.views_last_30_days,
            engagement_rate: row.engagement_rate,
            updated_at: row.updated_at,
        }
    }
}

impl From<InfluencerWithProfiles> for InfluencerItem {
    fn from(entry: InfluencerWithProfiles) -> Self {
        Self {
            id: entry.influencer.public_id,
            display_name: entry.influencer.display_name,
            main_niche: entry.influencer.main_niche,
            created_at: entry.influencer.created_at,
            updated_at: entry.influencer.updated_at,
            profiles: entry.profiles.into_iter().map(ProfileItem::from).collect(),
        }
    }
}

pub(super) async fn list_influencers(State(state): State<AppState>) -> impl IntoResponse {
    match creatordb_db::list_influencers_with_profiles(&state.pool).await {
        Ok(entries) => {
            let items: Vec<InfluencerItem> =
                entries.into_iter().map(InfluencerItem::from).collect();
            Json(items).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to list influencers");
            (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
        }
    }
}
