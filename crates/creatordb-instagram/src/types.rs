//! Response types for the Meta Graph API business-discovery surface.

use serde::Deserialize;

// ---------------------------------------------------------------------------
// /me/accounts
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct AccountsResponse {
    #[serde(default)]
    pub data: Vec<Account>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Account {
    #[serde(default)]
    pub instagram_business_account: Option<BusinessAccountRef>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BusinessAccountRef {
    pub id: String,
}

// ---------------------------------------------------------------------------
// /{ig-user-id}?fields=business_discovery.username(...)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct DiscoveryResponse {
    #[serde(default)]
    pub business_discovery: Option<BusinessDiscovery>,
}

/// A public creator account resolved through business discovery.
#[derive(Debug, Clone, Deserialize)]
pub struct BusinessDiscovery {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub followers_count: i64,
    #[serde(default)]
    pub media_count: i32,
    #[serde(default)]
    pub profile_picture_url: Option<String>,
}
