//! Trait for priceable instruments.

use num_traits::Float;

use crate::types::PricingError;

/// Trait for instruments that can be priced against an initial spot.
///
/// # Type Parameters
/// * `T` - Floating-point type (f32 or f64)
///
/// # Design
///
/// Intended for static dispatch. Wrap instrument variants in an `enum` and
/// match, rather than boxing trait objects:
///
/// ```
/// use lattice_core::traits::Priceable;
/// use lattice_core::types::PricingError;
///
/// enum Instrument {
///     Forward { strike: f64, discount: f64 },
///     Expired,
/// }
///
/// impl Priceable<f64> for Instrument {
///     fn price(&self, spot: f64, shares: f64) -> Result<f64, PricingError> {
///         match self {
///             Instrument::Forward { strike, discount } => {
///                 Ok((spot - strike * discount) * shares)
///             }
///             Instrument::Expired => Ok(0.0),
///         }
///     }
/// }
///
/// let fwd = Instrument::Forward { strike: 100.0, discount: 0.99 };
/// assert!((fwd.price(100.0, 1.0).unwrap() - 1.0).abs() < 1e-12);
/// ```
pub trait Priceable<T: Float> {
    /// Present value at time zero.
    ///
    /// # Arguments
    /// * `spot` - Initial spot of the underlying
    /// * `shares` - Number of shares the payoff is scaled by
    ///
    /// # Invariants
    /// - The method is pure: repeated calls with the same arguments return the same value
    /// - No state is cached between calls
    fn price(&self, spot: T, shares: T) -> Result<T, PricingError>;
}
