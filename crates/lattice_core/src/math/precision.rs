//! Precision guard for tolerance-based float comparisons.
//!
//! A lattice with step size `h` carries a discretisation error of order `h²`
//! at best. A comparison tolerance `ε` that exceeds that resolution is
//! rejected: every comparison is gated on `h² ≥ ε`.
//!
//! Two-sided closeness follows the usual absolute-or-relative rule:
//!
//! ```text
//! |a - b| <= max(1e-9 · max(|a|, |b|), ε)
//! ```

use std::cmp::Ordering;

use num_traits::Float;

use crate::types::PrecisionError;

/// Default comparison tolerance.
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Relative component of the closeness test.
const RELATIVE_TOLERANCE: f64 = 1e-9;

/// Guarded comparator bound to a lattice step size and a tolerance.
///
/// Construction is the check: a guard only exists when `h² ≥ ε`, so every
/// comparison made through it is meaningful at the lattice resolution.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float` (e.g., `f64`, `f32`)
///
/// # Examples
/// ```
/// use std::cmp::Ordering;
/// use lattice_core::math::precision::PrecisionGuard;
///
/// let guard = PrecisionGuard::new(0.002_f64, 1e-9).unwrap();
/// assert_eq!(guard.compare(1.0, 2.0), Ordering::Less);
/// assert_eq!(guard.compare(2.0, 2.0 + 1e-12), Ordering::Equal);
///
/// assert!(guard.is_all_ge(&[1.0, 2.0], &[1.0, 1.5]));
/// assert!(!guard.is_all_le(&[1.0, 2.0], &[1.0, 1.5]));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrecisionGuard<T: Float> {
    step_size: T,
    epsilon: T,
}

impl<T: Float> PrecisionGuard<T> {
    /// Creates a guard for the given step size and tolerance.
    ///
    /// # Arguments
    /// * `step_size` - Lattice step size `h = T/n`
    /// * `epsilon` - Comparison tolerance (non-negative)
    ///
    /// # Errors
    /// `PrecisionError` if `h² < ε`, or if `ε` is negative or NaN.
    pub fn new(step_size: T, epsilon: T) -> Result<Self, PrecisionError> {
        let resolution = step_size * step_size;

        if !(epsilon >= T::zero()) || resolution < epsilon {
            let err = PrecisionError {
                epsilon: epsilon.to_f64().unwrap_or(f64::NAN),
                resolution: resolution.to_f64().unwrap_or(f64::NAN),
            };
            tracing::warn!(
                epsilon = err.epsilon,
                resolution = err.resolution,
                "comparison tolerance rejected by precision guard"
            );
            return Err(err);
        }

        Ok(Self { step_size, epsilon })
    }

    /// Returns the lattice step size `h`.
    #[inline]
    pub fn step_size(&self) -> T {
        self.step_size
    }

    /// Returns the comparison tolerance `ε`.
    #[inline]
    pub fn epsilon(&self) -> T {
        self.epsilon
    }

    /// Returns the lattice resolution `h²`.
    #[inline]
    pub fn resolution(&self) -> T {
        self.step_size * self.step_size
    }

    /// Returns true when `a` and `b` agree within tolerance.
    #[inline]
    pub fn is_close(&self, a: T, b: T) -> bool {
        let relative = T::from(RELATIVE_TOLERANCE).unwrap_or_else(T::zero);
        let scale = a.abs().max(b.abs());
        (a - b).abs() <= (relative * scale).max(self.epsilon)
    }

    /// Three-way comparison with tolerance.
    ///
    /// Returns `Equal` when the values are close, otherwise the strict order.
    #[inline]
    pub fn compare(&self, a: T, b: T) -> Ordering {
        if self.is_close(a, b) {
            Ordering::Equal
        } else if a > b {
            Ordering::Greater
        } else {
            Ordering::Less
        }
    }

    /// Elementwise `a[k] ≥ b[k]` with tolerance.
    ///
    /// Slices are compared pairwise up to the shorter length.
    pub fn ge_elementwise(&self, a: &[T], b: &[T]) -> Vec<bool> {
        a.iter()
            .zip(b)
            .map(|(&x, &y)| self.is_close(x, y) || x > y)
            .collect()
    }

    /// Elementwise `a[k] ≤ b[k]` with tolerance.
    ///
    /// Slices are compared pairwise up to the shorter length.
    pub fn le_elementwise(&self, a: &[T], b: &[T]) -> Vec<bool> {
        a.iter()
            .zip(b)
            .map(|(&x, &y)| self.is_close(x, y) || x < y)
            .collect()
    }

    /// Returns true when every `a[k] ≥ b[k]` within tolerance.
    ///
    /// Slices of different length never compare as ordered.
    pub fn is_all_ge(&self, a: &[T], b: &[T]) -> bool {
        a.len() == b.len() && self.ge_elementwise(a, b).into_iter().all(|flag| flag)
    }

    /// Returns true when every `a[k] ≤ b[k]` within tolerance.
    ///
    /// Slices of different length never compare as ordered.
    pub fn is_all_le(&self, a: &[T], b: &[T]) -> bool {
        a.len() == b.len() && self.le_elementwise(a, b).into_iter().all(|flag| flag)
    }
}

/// One-shot guarded comparison.
///
/// Equivalent to `PrecisionGuard::new(step_size, epsilon)?.compare(a, b)`.
///
/// # Examples
/// ```
/// use std::cmp::Ordering;
/// use lattice_core::math::precision::compare_float;
///
/// assert_eq!(compare_float(0.01_f64, 3.0, 2.0, 1e-9).unwrap(), Ordering::Greater);
/// assert!(compare_float(0.001_f64, 3.0, 2.0, 1e-3).is_err());
/// ```
pub fn compare_float<T: Float>(
    step_size: T,
    a: T,
    b: T,
    epsilon: T,
) -> Result<Ordering, PrecisionError> {
    Ok(PrecisionGuard::new(step_size, epsilon)?.compare(a, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_guard_accepts_coarse_lattice() {
        let guard = PrecisionGuard::new(1.0_f64 / 500.0, 1e-9).unwrap();
        assert_relative_eq!(guard.resolution(), 4e-6, epsilon = 1e-18);
        assert_eq!(guard.epsilon(), 1e-9);
    }

    #[test]
    fn test_guard_rejects_fine_tolerance() {
        let err = PrecisionGuard::new(1.0_f64 / 500.0, 1e-2).unwrap_err();
        assert_eq!(err.epsilon, 1e-2);
        assert_relative_eq!(err.resolution, 4e-6, epsilon = 1e-18);
    }

    #[test]
    fn test_guard_boundary_is_inclusive() {
        // h² == ε passes
        assert!(PrecisionGuard::new(0.5_f64, 0.25).is_ok());
    }

    #[test]
    fn test_guard_rejects_negative_and_nan_epsilon() {
        assert!(PrecisionGuard::new(0.1_f64, -1e-9).is_err());
        assert!(PrecisionGuard::new(0.1_f64, f64::NAN).is_err());
    }

    #[test]
    fn test_compare_orders() {
        let guard = PrecisionGuard::new(0.1_f64, 1e-6).unwrap();
        assert_eq!(guard.compare(1.0, 1.0 + 1e-7), Ordering::Equal);
        assert_eq!(guard.compare(1.0, 1.1), Ordering::Less);
        assert_eq!(guard.compare(1.1, 1.0), Ordering::Greater);
    }

    #[test]
    fn test_relative_component_for_large_values() {
        let guard = PrecisionGuard::new(0.1_f64, 0.0).unwrap();
        assert!(guard.is_close(1.0e6, 1.0e6 + 1.0e-4));
        assert!(!guard.is_close(1.0, 1.0 + 1.0e-4));
    }

    #[test]
    fn test_elementwise() {
        let guard = PrecisionGuard::new(0.1_f64, 1e-6).unwrap();
        let a = [1.0, 2.0, 3.0];
        let b = [1.0 + 1e-8, 2.5, 2.0];
        assert_eq!(guard.ge_elementwise(&a, &b), vec![true, false, true]);
        assert_eq!(guard.le_elementwise(&a, &b), vec![true, true, false]);
        assert!(!guard.is_all_ge(&a, &b));
        assert!(!guard.is_all_le(&a, &b));
        assert!(guard.is_all_ge(&a, &a));
    }

    #[test]
    fn test_mismatched_lengths() {
        let guard = PrecisionGuard::new(0.1_f64, 1e-6).unwrap();
        assert!(!guard.is_all_ge(&[1.0, 2.0], &[1.0]));
        assert_eq!(guard.ge_elementwise(&[1.0, 2.0], &[1.0]).len(), 1);
    }

    #[test]
    fn test_compare_float_one_shot() {
        assert_eq!(
            compare_float(0.01_f64, 1.0, 1.0, 1e-9).unwrap(),
            Ordering::Equal
        );
        assert!(compare_float(0.001_f64, 1.0, 1.0, 1e-5).is_err());
    }

    #[test]
    fn test_f32_compatibility() {
        let guard = PrecisionGuard::new(0.1_f32, 1e-4).unwrap();
        assert_eq!(guard.compare(1.0_f32, 1.00001), Ordering::Equal);
    }
}
