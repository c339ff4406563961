//! HTTP client for the Meta Graph API (Instagram business discovery).
//!
//! Graph API errors arrive as non-2xx responses with an `error.message`
//! payload and surface as [`InstagramError::Rejected`]; a successful response
//! without the requested block (account has no linked Instagram, username
//! unknown) is `None`, not an error.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::InstagramError;
use crate::types::{AccountsResponse, BusinessDiscovery, DiscoveryResponse};

const DEFAULT_BASE_URL: &str = "https://graph.facebook.com/v19.0/";

/// Client for the Meta Graph API.
///
/// Use [`InstagramClient::new`] for production or
/// [`InstagramClient::with_base_url`] to point at a mock server in tests.
pub struct InstagramClient {
    client: Client,
    access_token: String,
    base_url: Url,
}

impl InstagramClient {
    /// Creates a new client pointed at the production Graph API.
    ///
    /// # Errors
    ///
    /// Returns [`InstagramError::Unavailable`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(access_token: &str, timeout_secs: u64) -> Result<Self, InstagramError> {
        Self::with_base_url(access_token, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`InstagramError::Unavailable`] if the underlying
    /// `reqwest::Client` cannot be constructed, or [`InstagramError::Rejected`]
    /// if `base_url` is not a valid URL.
    pub fn with_base_url(
        access_token: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, InstagramError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("creatordb/0.1 (creator-discovery)")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| InstagramError::Rejected(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            access_token: access_token.to_owned(),
            base_url,
        })
    }

    /// Resolves the caller's own Instagram business account id.
    ///
    /// Business discovery can only be issued from a business account, so
    /// every run needs this id first. `None` means the token's pages have no
    /// linked Instagram business account.
    ///
    /// # Errors
    ///
    /// - [`InstagramError::Rejected`] if the API returns an error payload.
    /// - [`InstagramError::Unavailable`] on network failure.
    /// - [`InstagramError::Deserialize`] if the response shape is unexpected.
    pub async fn business_account_id(&self) -> Result<Option<String>, InstagramError> {
        let url = self.build_url(
            "me/accounts",
            &[("fields", "instagram_business_account{id}")],
        )?;
        let response: AccountsResponse = self.request_json(&url).await?;

        Ok(response
            .data
            .into_iter()
            .find_map(|account| account.instagram_business_account)
            .map(|account| account.id))
    }

    /// Looks up a public creator account by username via business discovery.
    ///
    /// Returns `None` when the response carries no `business_discovery`
    /// block — the username could not be resolved, which is a valid outcome.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`InstagramClient::business_account_id`].
    pub async fn discover_user(
        &self,
        business_account_id: &str,
        username: &str,
    ) -> Result<Option<BusinessDiscovery>, InstagramError> {
        let fields = format!(
            "business_discovery.username({username}){{username,website,followers_count,media_count,profile_picture_url,id}}"
        );
        let url = self.build_url(business_account_id, &[("fields", &fields)])?;
        let response: DiscoveryResponse = self.request_json(&url).await?;
        Ok(response.business_discovery)
    }

    fn build_url(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Url, InstagramError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| InstagramError::Rejected(format!("invalid endpoint '{endpoint}': {e}")))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("access_token", &self.access_token);
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends a GET request and parses the body into `T`, mapping Graph API
    /// error envelopes to [`InstagramError::Rejected`].
    async fn request_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &Url,
    ) -> Result<T, InstagramError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(InstagramError::Rejected(extract_api_message(
                &body, status,
            )));
        }

        serde_json::from_str(&body).map_err(|e| InstagramError::Deserialize {
            context: redact_token(url),
            source: e,
        })
    }
}

/// Pulls `error.message` out of a Graph API error envelope, falling back to
/// the HTTP status line.
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

/// Error context never includes the access-token query parameter.
fn redact_token(url: &Url) -> String {
    format!("{}{}", url.origin().ascii_serialization(), url.path())
}
