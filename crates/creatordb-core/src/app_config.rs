use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Quality-gate thresholds applied to every discovered candidate.
///
/// Defaults match the original deployment: at least 1000 subscribers,
/// at least 10 published items, active within the last 6 months.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityThresholds {
    pub min_subscribers: i64,
    pub min_content_items: i32,
    pub activity_window_months: u32,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            min_subscribers: 1000,
            min_content_items: 10,
            activity_window_months: 6,
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub niches_path: PathBuf,
    pub youtube_api_key: String,
    pub instagram_access_token: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub platform_request_timeout_secs: u64,
    pub youtube_region: String,
    pub search_results_per_keyword: u32,
    pub recent_sample_size: u32,
    pub thresholds: QualityThresholds,
}

// Credentials never appear in logs, so Debug is written by hand.
impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("niches_path", &self.niches_path)
            .field("database_url", &"[redacted]")
            .field("youtube_api_key", &"[redacted]")
            .field("instagram_access_token", &"[redacted]")
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field(
                "platform_request_timeout_secs",
                &self.platform_request_timeout_secs,
            )
            .field("youtube_region", &self.youtube_region)
            .field(
                "search_results_per_keyword",
                &self.search_results_per_keyword,
            )
            .field("recent_sample_size", &self.recent_sample_size)
            .field("thresholds", &self.thresholds)
            .finish()
    }
}
