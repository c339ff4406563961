//! Typed client for the `YouTube` Data API v3: channel search, channel
//! statistics, and recent-upload sampling.

mod client;
mod error;
mod types;

pub use client::YoutubeClient;
pub use error::YoutubeError;
pub use types::{Channel, ChannelSnippet, ChannelStatistics, Video, VideoStatistics};
