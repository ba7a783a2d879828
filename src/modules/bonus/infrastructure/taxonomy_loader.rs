use crate::modules::bonus::domain::{BonusDefinition, BonusTaxonomy};
use crate::shared::config::AppConfig;
use crate::shared::errors::{AppError, AppResult};
use crate::{log_info, log_warn};
use std::fs;
use std::path::Path;

/// Loads the bonus taxonomy at startup
pub struct TaxonomyLoader;

impl TaxonomyLoader {
    /// Load from `PAZAR_TAXONOMY_PATH` when configured, otherwise the built-in table
    pub fn load(config: &AppConfig) -> AppResult<BonusTaxonomy> {
        match &config.taxonomy_path {
            Some(path) => Self::from_file(path),
            None => {
                let taxonomy = BonusTaxonomy::metin2_default();
                log_info!("Using built-in bonus taxonomy ({} categories)", taxonomy.len());
                Ok(taxonomy)
            }
        }
    }

    /// Like `load`, but a broken override file falls back to the built-in table
    pub fn load_or_default(config: &AppConfig) -> BonusTaxonomy {
        Self::load(config).unwrap_or_else(|e| {
            log_warn!(
                "Failed to load bonus taxonomy override: {}. Falling back to built-in table",
                e
            );
            BonusTaxonomy::metin2_default()
        })
    }

    pub fn from_file(path: &Path) -> AppResult<BonusTaxonomy> {
        let contents = fs::read_to_string(path).map_err(|e| {
            AppError::ConfigError(format!(
                "Cannot read bonus taxonomy '{}': {}",
                path.display(),
                e
            ))
        })?;

        let taxonomy = Self::from_json(&contents)?;
        log_info!(
            "Loaded bonus taxonomy from {} ({} categories)",
            path.display(),
            taxonomy.len()
        );
        Ok(taxonomy)
    }

    /// Parse a JSON array of `{ "category": .., "max_value": .. }` objects
    pub fn from_json(json: &str) -> AppResult<BonusTaxonomy> {
        let definitions: Vec<BonusDefinition> = serde_json::from_str(json)?;

        if definitions.is_empty() {
            return Err(AppError::ValidationError(
                "Bonus taxonomy must contain at least one category".to_string(),
            ));
        }

        BonusTaxonomy::from_definitions(definitions)
    }
}
