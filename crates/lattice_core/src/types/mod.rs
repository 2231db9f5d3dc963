//! Core error types.
//!
//! This module provides:
//! - `error`: Structured error types for pricing and precision failures
//!
//! # Re-exports
//!
//! For convenience, [`PricingError`] and [`PrecisionError`] are re-exported at this level.

pub mod error;

pub use error::{PrecisionError, PricingError};
