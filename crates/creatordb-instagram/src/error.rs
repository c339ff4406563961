use thiserror::Error;

/// Errors returned by the Meta Graph API client.
#[derive(Debug, Error)]
pub enum InstagramError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("Graph API unavailable: {0}")]
    Unavailable(#[from] reqwest::Error),

    /// The API returned an error payload. Carries the upstream message.
    #[error("Graph API rejected request: {0}")]
    Rejected(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
