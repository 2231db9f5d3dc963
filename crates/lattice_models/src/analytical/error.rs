//! Error types for the closed-form model.

use lattice_core::types::PricingError;
use thiserror::Error;

/// Closed-form pricing errors.
///
/// # Variants
/// - `InvalidSpot`: Non-positive or non-finite spot
/// - `InvalidVolatility`: Non-positive volatility
///
/// Strike and maturity arrive through a validated `Contract`.
///
/// # Examples
/// ```
/// use lattice_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::InvalidVolatility { volatility: -0.2 };
/// assert!(format!("{}", err).contains("volatility"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// Invalid spot price.
    #[error("Invalid spot price: S = {spot}")]
    InvalidSpot {
        /// The invalid spot price value
        spot: f64,
    },

    /// Invalid volatility (non-positive).
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },
}

impl From<AnalyticalError> for PricingError {
    fn from(err: AnalyticalError) -> Self {
        match err {
            AnalyticalError::InvalidSpot { .. } => PricingError::InvalidInput(err.to_string()),
            AnalyticalError::InvalidVolatility { .. } => {
                PricingError::Configuration(err.to_string())
            }
        }
    }
}
