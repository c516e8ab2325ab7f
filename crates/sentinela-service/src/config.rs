//! Service configuration

use sentinela_core::{Error, Result};
use sentinela_model::TrainingConfig;
use sentinela_policy::OverlayConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Where the trained artifact is saved and loaded from
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,

    /// Largest accepted batch
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,

    /// Longest accepted comment, in characters
    #[serde(default = "default_max_text_length")]
    pub max_text_length: usize,

    #[serde(default)]
    pub training: TrainingConfig,

    #[serde(default)]
    pub overlay: OverlayConfig,

    #[serde(default)]
    pub cache: CacheConfig,
}

/// Values set from the command line, applied over the file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub model_path: Option<PathBuf>,
    pub max_batch_size: Option<usize>,
    pub max_text_length: Option<usize>,
    pub seed: Option<u64>,
    pub cache_enabled: Option<bool>,
}

impl ServiceConfig {
    /// Load configuration from file, or defaults when the file does not exist
    pub fn load(config_path: impl AsRef<Path>) -> Result<Self> {
        let path = config_path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)
            .map_err(|e| Error::config(format!("Invalid config {}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Apply CLI overrides
    pub fn apply(&mut self, overrides: &ConfigOverrides) {
        if let Some(path) = &overrides.model_path {
            self.model_path = path.clone();
        }
        if let Some(size) = overrides.max_batch_size {
            self.max_batch_size = size;
        }
        if let Some(length) = overrides.max_text_length {
            self.max_text_length = length;
        }
        if let Some(seed) = overrides.seed {
            self.training.seed = seed;
        }
        if let Some(enabled) = overrides.cache_enabled {
            self.cache.enabled = enabled;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_batch_size == 0 {
            return Err(Error::config("max_batch_size must be at least 1"));
        }
        if self.max_text_length == 0 {
            return Err(Error::config("max_text_length must be at least 1"));
        }
        self.overlay.validate()
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            max_batch_size: default_max_batch_size(),
            max_text_length: default_max_text_length(),
            training: TrainingConfig::default(),
            overlay: OverlayConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

/// Prediction cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            ttl_secs: default_ttl_secs(),
        }
    }
}

fn default_model_path() -> PathBuf {
    PathBuf::from("models/sentinela.json")
}

fn default_max_batch_size() -> usize {
    1000
}

fn default_max_text_length() -> usize {
    500
}

fn default_ttl_secs() -> u64 {
    3600
}
