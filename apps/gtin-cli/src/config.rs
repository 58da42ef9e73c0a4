//! CLI configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//! Command-line flags override whatever is loaded here.

use gtin_core::generator::normalize_prefix;
use gtin_core::{OverflowPolicy, DEFAULT_PREFIX};
use std::env;

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Prefix used when `generate` has no `--prefix`
    pub default_prefix: String,

    /// How `generate` treats product ids of ten or more digits
    pub overflow_policy: OverflowPolicy,

    /// Upper bound on `generate --count`
    pub max_count: usize,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            default_prefix: DEFAULT_PREFIX.to_string(),
            overflow_policy: OverflowPolicy::Reject,
            max_count: 10_000,
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = CliConfig::default();

        let config = CliConfig {
            default_prefix: lookup("GTIN_DEFAULT_PREFIX").unwrap_or(defaults.default_prefix),

            overflow_policy: match lookup("GTIN_OVERFLOW_POLICY") {
                Some(raw) => raw
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("GTIN_OVERFLOW_POLICY".to_string()))?,
                None => defaults.overflow_policy,
            },

            max_count: match lookup("GTIN_MAX_COUNT") {
                Some(raw) => raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("GTIN_MAX_COUNT".to_string()))?,
                None => defaults.max_count,
            },
        };

        // A prefix the generator would reject is a configuration mistake
        normalize_prefix(&config.default_prefix)
            .map_err(|_| ConfigError::InvalidValue("GTIN_DEFAULT_PREFIX".to_string()))?;

        if config.max_count == 0 {
            return Err(ConfigError::InvalidValue("GTIN_MAX_COUNT".to_string()));
        }

        Ok(config)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
