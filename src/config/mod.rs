//! Configuration management.
//!
//! Supports configuration from:
//! - TOML config files
//! - Environment variables
//!
//! Only the response helpers read this. The codec and negotiation
//! functions take their inputs directly.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{EncoderError, Result};

/// Main configuration struct
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Response compression configuration
    #[serde(default)]
    pub compression: CompressionConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| EncoderError::Config(format!("Failed to read config file: {e}")))?;

        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("ACCEPT_ENCODER_ENABLED") {
            if let Ok(val) = val.parse() {
                config.compression.enabled = val;
            }
        }
        if let Ok(val) = std::env::var("ACCEPT_ENCODER_MIN_LENGTH") {
            if let Ok(val) = val.parse() {
                config.compression.min_length = val;
            }
        }

        config
    }
}

/// Response compression configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressionConfig {
    /// Compress responses at all (false = always send identity)
    pub enabled: bool,

    /// In-memory bodies shorter than this are sent uncompressed
    pub min_length: usize,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_length: 20,
        }
    }
}

impl CompressionConfig {
    /// Whether a generated body of `len` bytes should be compressed
    pub fn should_compress(&self, len: usize) -> bool {
        self.enabled && len >= self.min_length
    }
}
