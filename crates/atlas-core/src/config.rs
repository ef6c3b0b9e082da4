//! Atlas configuration
//!
//! Read from YAML. Every field has a default, so an empty file is a valid
//! config.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::generator::DEFAULT_MAX_DEPTH;
use crate::step::Foot;
use crate::{Error, Result};

/// Deepest generation the config will accept. Result counts grow as
/// catalog size to this power.
pub const MAX_DEPTH_LIMIT: usize = 12;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasConfig {
    /// Longest sequence the generator builds
    pub max_depth: usize,
    /// Foot bearing weight when no start is given
    pub start_foot: Foot,
    /// User catalog file; the built-in catalog is used when unset
    pub catalog: Option<PathBuf>,
    /// `tracing` filter directive
    pub log_filter: String,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            start_foot: Foot::Left,
            catalog: None,
            log_filter: "atlas_core=info".to_string(),
        }
    }
}

impl AtlasConfig {
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        // serde_yaml reads an empty document as unit, not an empty map
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a YAML file. A missing file gives the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_depth > MAX_DEPTH_LIMIT {
            return Err(Error::Config(format!(
                "max_depth {} exceeds limit of {}",
                self.max_depth, MAX_DEPTH_LIMIT
            )));
        }
        Ok(())
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AtlasConfig::default();
        assert_eq!(config.max_depth, 5);
        assert_eq!(config.start_foot, Foot::Left);
        assert!(config.catalog.is_none());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = AtlasConfig::from_yaml_str("start_foot: right\n").unwrap();
        assert_eq!(config.start_foot, Foot::Right);
        assert_eq!(config.max_depth, 5);

        assert_eq!(AtlasConfig::from_yaml_str("").unwrap(), AtlasConfig::default());
    }

    #[test]
    fn test_depth_limit() {
        let result = AtlasConfig::from_yaml_str("max_depth: 40\n");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = AtlasConfig::load(dir.path().join("atlas.yaml")).unwrap();
        assert_eq!(config, AtlasConfig::default());
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("atlas.yaml");
        std::fs::write(&path, "max_depth: 3\ncatalog: moves.yaml\n").unwrap();

        let config = AtlasConfig::load(&path).unwrap();
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.catalog, Some(PathBuf::from("moves.yaml")));
    }
}
