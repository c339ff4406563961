use thiserror::Error;

/// Errors returned by the `YouTube` Data API client.
#[derive(Debug, Error)]
pub enum YoutubeError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("YouTube API unavailable: {0}")]
    Unavailable(#[from] reqwest::Error),

    /// The API returned an error payload (quota exhausted, bad parameter, ...).
    /// Carries the upstream message verbatim.
    #[error("YouTube API rejected request: {0}")]
    Rejected(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
