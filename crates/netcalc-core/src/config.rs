//! Engine configuration
//!
//! Limits are read from environment variables, with defaults when unset.

use std::env;
use thiserror::Error;

/// Environment variable overriding [`EngineConfig::max_subnets`]
pub const MAX_SUBNETS_ENV: &str = "NETCALC_MAX_SUBNETS";

/// Default cap on rows produced by one subnet generation (2^16)
pub const DEFAULT_MAX_SUBNETS: u64 = 1 << 16;

/// Highest accepted subnet row cap (2^24)
pub const MAX_SUBNETS_CEILING: u64 = 1 << 24;

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Value present but not usable
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Tunable limits for the calculation engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Maximum number of subnets a single generation may produce
    pub max_subnets: u64,
}

impl EngineConfig {
    /// Create a config with default limits
    pub fn new() -> Self {
        Self {
            max_subnets: DEFAULT_MAX_SUBNETS,
        }
    }

    /// Set the subnet row cap, between 1 and [`MAX_SUBNETS_CEILING`]
    pub fn with_max_subnets(mut self, max_subnets: u64) -> Result<Self> {
        if max_subnets == 0 || max_subnets > MAX_SUBNETS_CEILING {
            return Err(ConfigError::InvalidValue {
                name: "max_subnets",
                value: max_subnets.to_string(),
            });
        }
        self.max_subnets = max_subnets;
        Ok(self)
    }

    /// Load config from the process environment
    ///
    /// Checks the NETCALC_MAX_SUBNETS environment variable.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load config through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self::new();
        match lookup(MAX_SUBNETS_ENV) {
            None => Ok(config),
            Some(raw) => {
                let invalid = || ConfigError::InvalidValue {
                    name: MAX_SUBNETS_ENV,
                    value: raw.clone(),
                };
                let max_subnets: u64 = raw.trim().parse().map_err(|_| invalid())?;
                config.with_max_subnets(max_subnets).map_err(|_| invalid())
            }
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
