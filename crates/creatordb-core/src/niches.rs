//! Niche catalog: the category → search-phrase table driving discovery.
//!
//! Loaded from YAML so deployments (and tests) can supply their own table;
//! iteration order is declaration order, which keeps runs reproducible.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Niche {
    pub name: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NicheCatalog {
    pub niches: Vec<Niche>,
}

impl NicheCatalog {
    /// The catalog shipped with the service, used when no YAML file is present.
    #[must_use]
    pub fn built_in() -> Self {
        let table: &[(&str, &[&str])] = &[
            (
                "Tecnologia",
                &["review tech brasil", "unboxing brasil", "pc gamer setup"],
            ),
            (
                "Fitness",
                &["treino em casa", "dieta para hipertrofia", "receita fit"],
            ),
            (
                "Moda",
                &["looks da semana", "tendências moda 2025", "arrume-se comigo"],
            ),
            (
                "Finanças",
                &[
                    "investimentos para iniciantes",
                    "educação financeira",
                    "como economizar",
                ],
            ),
        ];

        Self {
            niches: table
                .iter()
                .map(|(name, keywords)| Niche {
                    name: (*name).to_string(),
                    keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
                })
                .collect(),
        }
    }

    /// Total number of keywords across all niches.
    #[must_use]
    pub fn keyword_count(&self) -> usize {
        self.niches.iter().map(|n| n.keywords.len()).sum()
    }
}

/// Load and validate a niche catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_niches(path: &Path) -> Result<NicheCatalog, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::NicheFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let catalog: NicheCatalog = serde_yaml::from_str(&content)?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

fn validate_catalog(catalog: &NicheCatalog) -> Result<(), ConfigError> {
    if catalog.niches.is_empty() {
        return Err(ConfigError::Validation(
            "catalog must declare at least one niche".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for niche in &catalog.niches {
        if niche.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "niche name must be non-empty".to_string(),
            ));
        }

        if !seen.insert(niche.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate niche name: '{}'",
                niche.name
            )));
        }

        if niche.keywords.is_empty() {
            return Err(ConfigError::Validation(format!(
                "niche '{}' has no keywords",
                niche.name
            )));
        }

        if niche.keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "niche '{}' has an empty keyword",
                niche.name
            )));
        }
    }

    Ok(())
}
