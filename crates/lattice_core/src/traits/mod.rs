//! Core traits for priceable instruments.
//!
//! This module defines:
//! - Generic floating-point operations (`Float` trait, re-exported from num-traits)
//! - Price calculation (`Priceable` trait)
//!
//! Instruments are dispatched through enums rather than `Box<dyn Priceable>`,
//! keeping every pricing path statically resolved.

/// Generic floating-point trait for numeric computations.
///
/// # Examples
/// ```
/// use lattice_core::traits::Float;
///
/// fn discount<T: Float>(rate: T, time: T) -> T {
///     (-rate * time).exp()
/// }
///
/// let df: f64 = discount(0.05, 1.0);
/// assert!((df - 0.951229).abs() < 1e-5);
/// ```
pub use num_traits::Float;

pub mod priceable;

pub use priceable::Priceable;
