//! Numerical utilities shared by every lattice_* crate.
//!
//! - `precision`: The precision guard in front of tolerance-based comparisons

pub mod precision;

pub use precision::{compare_float, PrecisionGuard, DEFAULT_EPSILON};
