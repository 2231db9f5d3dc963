//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Errors surfaced by every pricing entry point
//! - `PrecisionError`: Tolerance exceeds the lattice resolution `h²`

use thiserror::Error;

/// Categorised pricing errors.
///
/// Every error is raised synchronously at the point of detection. Pricing is
/// deterministic, so none of these are worth retrying.
///
/// # Variants
/// - `Configuration`: Invalid calibration tag or construction parameter
/// - `Precision`: Comparison tolerance exceeds the lattice resolution `h²`
/// - `InvalidOptionKind`: Option kind other than call or put
/// - `InvalidInput`: Invalid runtime argument (spot, share count, node coordinates)
///
/// # Examples
/// ```
/// use lattice_core::types::PricingError;
///
/// let err = PricingError::Configuration("unknown model tag: XYZ".to_string());
/// assert_eq!(format!("{}", err), "Configuration error: unknown model tag: XYZ");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PricingError {
    /// Invalid calibration model tag or construction parameter.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Comparison tolerance exceeds the lattice resolution `h²`.
    #[error(transparent)]
    Precision(#[from] PrecisionError),

    /// Option kind other than call or put.
    #[error("Invalid option kind: {0}")]
    InvalidOptionKind(String),

    /// Invalid runtime input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl PricingError {
    /// Returns true for construction-time failures.
    #[inline]
    pub fn is_configuration(&self) -> bool {
        matches!(self, PricingError::Configuration(_))
    }

    /// Returns true for precision guard rejections.
    #[inline]
    pub fn is_precision(&self) -> bool {
        matches!(self, PricingError::Precision(_))
    }
}

/// Comparison tolerance exceeds the lattice resolution `h²`.
///
/// Raised when `h² < ε`, where `h` is the lattice step size and `ε` the
/// comparison tolerance.
///
/// # Examples
/// ```
/// use lattice_core::types::PrecisionError;
///
/// let err = PrecisionError { epsilon: 1e-2, resolution: 4e-6 };
/// assert!(format!("{}", err).contains("4e-6"));
/// ```
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("Precision error: tolerance {epsilon:e} exceeds lattice resolution h² = {resolution:e}")]
pub struct PrecisionError {
    /// The rejected comparison tolerance.
    pub epsilon: f64,
    /// The squared step size `h²`.
    pub resolution: f64,
}
