//! parsum configuration loaded from `parsum.toml`.
//!
//! The [`ParsumConfig`] struct holds every configurable parameter. Values
//! missing from the file use sensible defaults. The `PARSUM_BASE_URL`
//! environment variable takes precedence over the file.

use std::path::Path;

use serde::Deserialize;

use crate::error::ParsumError;

/// Top-level configuration loaded from `parsum.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ParsumConfig {
    /// Base URL of the summarization service.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Delay between evaluation status polls, in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Method used when the CLI does not specify one.
    #[serde(default = "default_method")]
    pub default_method: String,

    /// Sample cap used when the CLI does not specify one.
    #[serde(default = "default_samples")]
    pub default_samples: u16,
}

// Same origin as the development frontend's fallback service address.
fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

// The service worker updates progress a few times per second at most.
fn default_poll_interval_ms() -> u64 {
    3000
}

fn default_method() -> String {
    "extractive".to_string()
}

fn default_samples() -> u16 {
    30
}

impl Default for ParsumConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            poll_interval_ms: default_poll_interval_ms(),
            default_method: default_method(),
            default_samples: default_samples(),
        }
    }
}

impl ParsumConfig {
    /// Load the configuration from `parsum.toml` in the current directory.
    /// Uses defaults if the file does not exist.
    pub fn load() -> Result<Self, ParsumError> {
        Self::load_from(Path::new("parsum.toml"))
    }

    pub fn load_from(path: &Path) -> Result<Self, ParsumError> {
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str::<ParsumConfig>(&contents)?
        } else {
            Self::default()
        };

        // Environment variable wins over the file for the service address.
        if let Ok(url) = std::env::var("PARSUM_BASE_URL")
            && !url.is_empty()
        {
            config.base_url = url;
        }

        Ok(config)
    }
}
