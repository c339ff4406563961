//! HTTP client for the `YouTube` Data API v3.
//!
//! Wraps `reqwest` with API-key management and typed response
//! deserialization. API-level failures (quota, bad parameter) arrive as
//! non-2xx responses with an `error.message` payload and surface as
//! [`YoutubeError::Rejected`] carrying the upstream message.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::YoutubeError;
use crate::types::{
    Channel, ChannelListResponse, PlaylistItemsResponse, SearchResponse, Video, VideoListResponse,
};

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3/";

/// Client for the `YouTube` Data API v3.
///
/// Use [`YoutubeClient::new`] for production or
/// [`YoutubeClient::with_base_url`] to point at a mock server in tests.
pub struct YoutubeClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl YoutubeClient {
    /// Creates a new client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Unavailable`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, YoutubeError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Unavailable`] if the underlying
    /// `reqwest::Client` cannot be constructed, or [`YoutubeError::Rejected`]
    /// if `base_url` is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, YoutubeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("creatordb/0.1 (creator-discovery)")
            .build()?;

        // Ensure exactly one trailing slash so Url::join appends the endpoint
        // path instead of replacing the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| YoutubeError::Rejected(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Searches for channels matching a keyword, biased to a region.
    ///
    /// Returns the platform channel ids; an empty list means no results and
    /// is not an error.
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::Rejected`] if the API returns an error payload.
    /// - [`YoutubeError::Unavailable`] on network failure.
    /// - [`YoutubeError::Deserialize`] if the response shape is unexpected.
    pub async fn search_channel_ids(
        &self,
        keyword: &str,
        region_code: &str,
        max_results: u32,
    ) -> Result<Vec<String>, YoutubeError> {
        let url = self.build_url(
            "search",
            &[
                ("part", "snippet"),
                ("q", keyword),
                ("type", "channel"),
                ("regionCode", region_code),
                ("maxResults", &max_results.to_string()),
            ],
        )?;
        let response: SearchResponse = self.request_json(&url).await?;

        Ok(response
            .items
            .into_iter()
            .filter_map(|item| item.id.channel_id)
            .collect())
    }

    /// Fetches snippet and statistics for a batch of channel ids.
    ///
    /// An empty id list short-circuits to an empty result without a request.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`YoutubeClient::search_channel_ids`].
    pub async fn channel_details(&self, ids: &[String]) -> Result<Vec<Channel>, YoutubeError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let url = self.build_url(
            "channels",
            &[("part", "snippet,statistics"), ("id", &ids.join(","))],
        )?;
        let response: ChannelListResponse = self.request_json(&url).await?;
        Ok(response.items)
    }

    /// Fetches statistics for the channel's most recent uploads, newest first.
    ///
    /// Reads the channel's uploads playlist (`UC…` → `UU…`), then resolves the
    /// sampled video ids to statistics. Channels with no uploads yield an
    /// empty list.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`YoutubeClient::search_channel_ids`].
    pub async fn recent_videos(
        &self,
        channel_id: &str,
        sample_size: u32,
    ) -> Result<Vec<Video>, YoutubeError> {
        let playlist_id = uploads_playlist_id(channel_id);

        let url = self.build_url(
            "playlistItems",
            &[
                ("part", "contentDetails"),
                ("playlistId", &playlist_id),
                ("maxResults", &sample_size.to_string()),
            ],
        )?;
        let playlist: PlaylistItemsResponse = self.request_json(&url).await?;

        let video_ids: Vec<String> = playlist
            .items
            .into_iter()
            .map(|item| item.content_details.video_id)
            .collect();
        if video_ids.is_empty() {
            return Ok(Vec::new());
        }

        let url = self.build_url(
            "videos",
            &[("part", "statistics,snippet"), ("id", &video_ids.join(","))],
        )?;
        let response: VideoListResponse = self.request_json(&url).await?;
        Ok(response.items)
    }

    /// Builds the endpoint URL with percent-encoded query parameters and the
    /// API key appended.
    fn build_url(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Url, YoutubeError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| YoutubeError::Rejected(format!("invalid endpoint '{endpoint}': {e}")))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("key", &self.api_key);
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends a GET request and parses the body into `T`.
    ///
    /// Non-2xx responses are inspected for the Google error envelope and
    /// reported as [`YoutubeError::Rejected`] with the upstream message.
    async fn request_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &Url,
    ) -> Result<T, YoutubeError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(YoutubeError::Rejected(extract_api_message(&body, status)));
        }

        serde_json::from_str(&body).map_err(|e| YoutubeError::Deserialize {
            context: redact_key(url),
            source: e,
        })
    }
}

/// The uploads playlist shares the channel id with a `UU` prefix.
fn uploads_playlist_id(channel_id: &str) -> String {
    channel_id
        .strip_prefix("UC")
        .map_or_else(|| channel_id.to_owned(), |rest| format!("UU{rest}"))
}

/// Pulls `error.message` out of a Google API error envelope, falling back to
/// the HTTP status line when the body is not the expected shape.
fn extract_api_message(body: &str, status: reqwest::StatusCode) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")?
                .get("message")?
                .as_str()
                .map(ToOwned::to_owned)
        })
        .unwrap_or_else(|| format!("HTTP {status}"))
}

/// Error context never includes the key query parameter.
fn redact_key(url: &Url) -> String {
    format!(
        "{}{}",
        url.origin().ascii_serialization(),
        url.path()
    )
}
