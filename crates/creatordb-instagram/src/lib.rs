//! Typed client for the Meta Graph API's Instagram business-discovery
//! surface: resolving the caller's business account and looking up public
//! creator accounts by username.

mod client;
mod error;
mod types;

pub use client::InstagramClient;
pub use error::InstagramError;
pub use types::BusinessDiscovery;
