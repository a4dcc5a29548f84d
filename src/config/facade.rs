//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::IndexerConfig;
use crate::error::ApiError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a working directory from files and environment.
    pub fn load(workspace_root: &Path) -> Result<IndexerConfig, ApiError> {
        let config = MergeService::load(workspace_root)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file with environment overlay.
    pub fn load_from_file(path: &Path) -> Result<IndexerConfig, ApiError> {
        let config = MergeService::load_from_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Create default configuration.
    pub fn default() -> IndexerConfig {
        IndexerConfig::default()
    }
}
