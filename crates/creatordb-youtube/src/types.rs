//! Response types for the `YouTube` Data API v3.
//!
//! The API encodes all statistics counters as JSON strings and omits blocks
//! the caller did not request (or that the channel hides), so every counter
//! is an optional string parsed leniently to 0.

use chrono::{DateTime, Utc};
use serde::Deserialize;

fn parse_count(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.parse::<i64>().ok()).unwrap_or(0)
}

// ---------------------------------------------------------------------------
// /search
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchItem {
    pub id: SearchItemId,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchItemId {
    #[serde(rename = "channelId", default)]
    pub channel_id: Option<String>,
}

// ---------------------------------------------------------------------------
// /channels
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct ChannelListResponse {
    #[serde(default)]
    pub items: Vec<Channel>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Channel {
    pub id: String,
    pub snippet: ChannelSnippet,
    /// Absent when the channel hides its statistics.
    #[serde(default)]
    pub statistics: Option<ChannelStatistics>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelSnippet {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnails: Thumbnails,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Thumbnails {
    #[serde(default)]
    pub high: Option<Thumbnail>,
    #[serde(rename = "default", default)]
    pub fallback: Option<Thumbnail>,
}

impl Thumbnails {
    /// Preferred avatar URL: the high-resolution variant when present.
    #[must_use]
    pub fn best_url(&self) -> Option<String> {
        self.high
            .as_ref()
            .or(self.fallback.as_ref())
            .map(|t| t.url.clone())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Thumbnail {
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChannelStatistics {
    #[serde(rename = "subscriberCount", default)]
    subscriber_count: Option<String>,
    #[serde(rename = "viewCount", default)]
    view_count: Option<String>,
    #[serde(rename = "videoCount", default)]
    video_count: Option<String>,
}

impl ChannelStatistics {
    #[must_use]
    pub fn subscribers(&self) -> i64 {
        parse_count(self.subscriber_count.as_deref())
    }

    #[must_use]
    pub fn total_views(&self) -> i64 {
        parse_count(self.view_count.as_deref())
    }

    #[must_use]
    pub fn video_count(&self) -> i64 {
        parse_count(self.video_count.as_deref())
    }
}

// ---------------------------------------------------------------------------
// /playlistItems
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct PlaylistItemsResponse {
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlaylistItem {
    #[serde(rename = "contentDetails")]
    pub content_details: PlaylistItemContentDetails,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlaylistItemContentDetails {
    #[serde(rename = "videoId")]
    pub video_id: String,
}

// ---------------------------------------------------------------------------
// /videos
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<Video>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Video {
    pub id: String,
    pub snippet: VideoSnippet,
    #[serde(default)]
    pub statistics: Option<VideoStatistics>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoSnippet {
    #[serde(rename = "publishedAt")]
    pub published_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoStatistics {
    #[serde(rename = "viewCount", default)]
    view_count: Option<String>,
    #[serde(rename = "likeCount", default)]
    like_count: Option<String>,
    #[serde(rename = "commentCount", default)]
    comment_count: Option<String>,
}

impl VideoStatistics {
    #[must_use]
    pub fn views(&self) -> i64 {
        parse_count(self.view_count.as_deref())
    }

    #[must_use]
    pub fn likes(&self) -> i64 {
        parse_count(self.like_count.as_deref())
    }

    #[must_use]
    pub fn comments(&self) -> i64 {
        parse_count(self.comment_count.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_parse_from_strings() {
        let stats: ChannelStatistics = serde_json::from_value(serde_json::json!({
            "subscriberCount": "15300",
            "viewCount": "2000000",
            "videoCount": "412"
        }))
        .unwrap();
        assert_eq!(stats.subscribers(), 15_300);
        assert_eq!(stats.total_views(), 2_000_000);
        assert_eq!(stats.video_count(), 412);
    }

    #[test]
    fn missing_counters_default_to_zero() {
        let stats: VideoStatistics = serde_json::from_value(serde_json::json!({
            "viewCount": "900"
        }))
        .unwrap();
        assert_eq!(stats.views(), 900);
        assert_eq!(stats.likes(), 0);
        assert_eq!(stats.comments(), 0);
    }

    #[test]
    fn garbage_counter_defaults_to_zero() {
        let stats: VideoStatistics = serde_json::from_value(serde_json::json!({
            "viewCount": "not-a-number"
        }))
        .unwrap();
        assert_eq!(stats.views(), 0);
    }

    #[test]
    fn channel_without_statistics_block_still_parses() {
        let channel: Channel = serde_json::from_value(serde_json::json!({
            "id": "UCabc",
            "snippet": { "title": "Canal" }
        }))
        .unwrap();
        assert!(channel.statistics.is_none());
        assert_eq!(channel.snippet.title, "Canal");
        assert!(channel.snippet.thumbnails.best_url().is_none());
    }

    #[test]
    fn thumbnails_prefer_high_resolution() {
        let thumbs: Thumbnails = serde_json::from_value(serde_json::json!({
            "default": { "url": "https://img.example.com/low.jpg" },
            "high": { "url": "https://img.example.com/high.jpg" }
        }))
        .unwrap();
        assert_eq!(
            thumbs.best_url().as_deref(),
            Some("https://img.example.com/high.jpg")
        );
    }
}
