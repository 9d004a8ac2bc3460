//! Chain configuration, optionally read from the environment.

use thiserror::Error;

use std::env;

use crate::blockchain::encoding::HASH_HEX_SIZE;

/// Environment variable holding the mining difficulty
pub const DIFFICULTY_VAR: &str = "LEDGER_DIFFICULTY";
/// Environment variable holding the inclusive nonce cutoff
pub const MAX_NONCE_VAR: &str = "LEDGER_MAX_NONCE";
/// Environment variable enabling parallel nonce search
pub const PARALLEL_VAR: &str = "LEDGER_PARALLEL";

pub const DEFAULT_DIFFICULTY: usize = 2;

/// Errors that can occur while building a configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Difficulty {difficulty} is above the maximum of {max}")]
    DifficultyTooHigh { difficulty: usize, max: usize },

    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// Parameters fixed for the lifetime of a chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainConfig {
    /// Number of leading hex zeros a mined hash must have
    pub difficulty: usize,

    /// Inclusive upper bound on the nonce search; `None` means unbounded
    pub max_nonce: Option<u64>,

    /// Search nonces on rayon's thread pool
    pub parallel: bool,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DIFFICULTY)
    }
}

impl ChainConfig {
    pub fn new(difficulty: usize) -> Self {
        ChainConfig {
            difficulty,
            max_nonce: None,
            parallel: false,
        }
    }

    pub fn with_max_nonce(mut self, max_nonce: u64) -> Self {
        self.max_nonce = Some(max_nonce);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Reads the configuration from `LEDGER_*` environment variables, falling back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let mut config = ChainConfig::default();

        if let Some(value) = lookup(DIFFICULTY_VAR) {
            config.difficulty = parse(DIFFICULTY_VAR, &value)?;
        }
        if let Some(value) = lookup(MAX_NONCE_VAR) {
            config.max_nonce = Some(parse(MAX_NONCE_VAR, &value)?);
        }
        if let Some(value) = lookup(PARALLEL_VAR) {
            config.parallel = parse(PARALLEL_VAR, &value)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Rejects difficulties no SHA-256 hex digest can satisfy
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.difficulty > HASH_HEX_SIZE {
            return Err(ConfigError::DifficultyTooHigh {
                difficulty: self.difficulty,
                max: HASH_HEX_SIZE,
            });
        }
        Ok(())
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}
