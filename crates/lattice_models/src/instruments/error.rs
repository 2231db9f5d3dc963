//! Instrument error types.
//!
//! Construction-time validation failures. All of them fail fast, before any
//! calibration result or value grid exists, and map onto
//! `PricingError::Configuration` at the crate boundary.

use lattice_core::types::PricingError;
use thiserror::Error;

/// Instrument construction errors.
///
/// # Variants
/// - `InvalidStrike`: Strike is not positive
/// - `InvalidMaturity`: Maturity is not positive
/// - `InvalidVolatility`: Volatility is not positive
/// - `InvalidRate`: Rate is not finite
/// - `InvalidSteps`: Step count is zero
/// - `InvalidBarrier`: Barrier level is not positive
/// - `MissingParameter`: A required builder field was not set
/// - `UnknownModel`: Calibration model tag not recognised
/// - `UnsupportedModel`: Model cannot price this instrument
/// - `ArbitrageViolation`: Risk-neutral probability outside (0, 1)
/// - `InvalidParameter`: General parameter validation failure
///
/// # Examples
/// ```
/// use lattice_models::instruments::InstrumentError;
///
/// let err = InstrumentError::InvalidStrike { strike: -100.0 };
/// assert!(format!("{}", err).contains("-100"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstrumentError {
    /// Invalid strike price (non-positive).
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Invalid maturity (non-positive).
    #[error("Invalid maturity: T = {maturity}")]
    InvalidMaturity {
        /// The invalid maturity value
        maturity: f64,
    },

    /// Invalid volatility (non-positive).
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Invalid rate (not finite).
    #[error("Invalid rate: r = {rate}")]
    InvalidRate {
        /// The invalid rate value
        rate: f64,
    },

    /// Invalid lattice step count.
    #[error("Invalid step count: n = {steps}")]
    InvalidSteps {
        /// The invalid step count
        steps: usize,
    },

    /// Invalid barrier level.
    #[error("Invalid barrier: H = {level}")]
    InvalidBarrier {
        /// The invalid barrier level
        level: f64,
    },

    /// Required parameter not provided.
    #[error("Missing parameter: {name}")]
    MissingParameter {
        /// Name of the missing parameter
        name: &'static str,
    },

    /// Calibration model tag not recognised.
    #[error("Invalid Model(CRR, JR, TRG or BS): {tag}")]
    UnknownModel {
        /// The rejected tag
        tag: String,
    },

    /// Calibration model cannot price the requested instrument or quantity.
    #[error("Model {model} does not support {operation}")]
    UnsupportedModel {
        /// Model tag
        model: String,
        /// What was requested
        operation: String,
    },

    /// Risk-neutral up probability outside (0, 1).
    #[error("Arbitrage violation: up probability p = {prob_up} is outside (0, 1)")]
    ArbitrageViolation {
        /// The calibrated up probability
        prob_up: f64,
    },

    /// Invalid parameter (general validation failure).
    #[error("Invalid parameter: {message}")]
    InvalidParameter {
        /// Description of the parameter error
        message: String,
    },
}

impl From<InstrumentError> for PricingError {
    fn from(err: InstrumentError) -> Self {
        PricingError::Configuration(err.to_string())
    }
}
