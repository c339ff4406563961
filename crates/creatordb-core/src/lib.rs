use thiserror::Error;

mod app_config;
mod config;
pub mod niches;

pub use app_config::{AppConfig, Environment, QualityThresholds};
pub use config::{load_app_config, load_app_config_from_env};
pub use niches::{load_niches, Niche, NicheCatalog};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var {0}")]
    MissingEnvVar(String),
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
    #[error("failed to read niche catalog at {path}")]
    NicheFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse niche catalog: {0}")]
    NicheFileParse(#[from] serde_yaml::Error),
    #[error("invalid niche catalog: {0}")]
    Validation(String),
}
