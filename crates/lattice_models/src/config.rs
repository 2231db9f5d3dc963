//! Engine configuration.
//!
//! Defaults applied when building contracts and instruments: calibration
//! model, induction strategy, notional share count and comparison tolerance.
//!
//! Sources, lowest priority first:
//! 1. Built-in defaults
//! 2. Optional TOML file
//! 3. `LATTICE_*` environment variables (e.g. `LATTICE_MODEL=TRG`)

use std::path::Path;

use lattice_core::math::DEFAULT_EPSILON;
use lattice_core::types::PricingError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::lattice::{CalibrationModel, InductionStrategy};

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "LATTICE";

/// Configuration error types
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    /// Share count must be positive and finite.
    #[error("Invalid share count: {0}. Must be positive")]
    InvalidShares(f64),

    /// Tolerance must be positive and finite.
    #[error("Invalid tolerance: {0}. Must be positive")]
    InvalidTolerance(f64),

    /// File could not be read or parsed.
    #[error("Configuration file error: {0}")]
    FileError(String),

    /// Layered sources could not be merged or deserialised.
    #[error("Configuration source error: {0}")]
    SourceError(String),
}

impl From<ConfigError> for PricingError {
    fn from(err: ConfigError) -> Self {
        PricingError::Configuration(err.to_string())
    }
}

impl From<::config::ConfigError> for ConfigError {
    fn from(err: ::config::ConfigError) -> Self {
        ConfigError::SourceError(err.to_string())
    }
}

/// Engine defaults.
///
/// # Examples
/// ```
/// use lattice_models::config::EngineConfig;
/// use lattice_models::lattice::{CalibrationModel, InductionStrategy};
///
/// let config = EngineConfig::from_toml_str(r#"
///     model = "JR"
///     strategy = "vectorized"
/// "#).unwrap();
///
/// assert_eq!(config.model, CalibrationModel::JarrowRudd);
/// assert_eq!(config.strategy, InductionStrategy::Vectorized);
/// assert_eq!(config.shares, 100.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Default calibration model for new contracts
    pub model: CalibrationModel,
    /// Default backward induction strategy
    pub strategy: InductionStrategy,
    /// Default notional share count
    pub shares: f64,
    /// Default comparison tolerance for verification
    pub tolerance: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            model: CalibrationModel::CoxRossRubinstein,
            strategy: InductionStrategy::Scalar,
            shares: 100.0,
            tolerance: DEFAULT_EPSILON,
        }
    }
}

impl EngineConfig {
    /// Parses and validates a TOML document. Missing keys take defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;
        Self::from_toml_str(&content)
    }

    /// Layers defaults, an optional file and `LATTICE_*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let defaults = ::config::Config::try_from(&EngineConfig::default())?;
        let mut builder = ::config::Config::builder().add_source(defaults);
        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path).required(true));
        }
        let config: EngineConfig = builder
            .add_source(::config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        tracing::info!(
            model = config.model.tag(),
            strategy = config.strategy.as_str(),
            shares = config.shares,
            tolerance = config.tolerance,
            "engine configuration loaded"
        );
        Ok(config)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.shares > 0.0 && self.shares.is_finite()) {
            return Err(ConfigError::InvalidShares(self.shares));
        }
        if !(self.tolerance > 0.0 && self.tolerance.is_finite()) {
            return Err(ConfigError::InvalidTolerance(self.tolerance));
        }
        Ok(())
    }
}
