//! Integration tests for module exports.
//!
//! Verify that public modules and types are reachable via absolute paths,
//! and that the precision guard holds its contract across random inputs.

use std::cmp::Ordering;

use proptest::prelude::*;

/// Trait module is accessible via absolute path.
#[test]
fn test_traits_module_exports() {
    use lattice_core::traits::priceable::Priceable;
    use lattice_core::traits::Float;
    use lattice_core::types::error::PricingError;

    struct Constant {
        value: f64,
    }

    impl Priceable<f64> for Constant {
        fn price(&self, _spot: f64, shares: f64) -> Result<f64, PricingError> {
            Ok(self.value * shares)
        }
    }

    let instrument = Constant { value: 1.5 };
    assert_eq!(instrument.price(100.0, 2.0).unwrap(), 3.0);

    fn generic_sqrt<T: Float>(x: T) -> T {
        x.sqrt()
    }
    assert_eq!(generic_sqrt(9.0_f64), 3.0);
}

/// Types module is accessible via absolute and re-exported paths.
#[test]
fn test_types_module_exports() {
    use lattice_core::types::error::PrecisionError as DeepPath;
    use lattice_core::types::{PrecisionError, PricingError};

    let err: DeepPath = PrecisionError {
        epsilon: 1.0,
        resolution: 0.5,
    };
    let wrapped: PricingError = err.into();
    assert!(wrapped.is_precision());
}

/// Math module re-exports the guard and its helpers.
#[test]
fn test_math_module_exports() {
    use lattice_core::math::{compare_float, PrecisionGuard, DEFAULT_EPSILON};

    let guard = PrecisionGuard::new(0.01_f64, DEFAULT_EPSILON).unwrap();
    assert_eq!(guard.compare(1.0, 1.0), Ordering::Equal);
    assert_eq!(
        compare_float(0.01_f64, 2.0, 1.0, DEFAULT_EPSILON).unwrap(),
        Ordering::Greater
    );
}

proptest! {
    /// The guard exists exactly when h² ≥ ε.
    #[test]
    fn prop_guard_matches_resolution(steps in 1usize..10_000, exponent in 1i32..12) {
        let h = 1.0 / steps as f64;
        let epsilon = 10f64.powi(-exponent);
        let guard = lattice_core::math::PrecisionGuard::new(h, epsilon);
        prop_assert_eq!(guard.is_ok(), h * h >= epsilon);
    }

    /// compare is antisymmetric.
    #[test]
    fn prop_compare_antisymmetric(a in -1.0e3f64..1.0e3, b in -1.0e3f64..1.0e3) {
        let guard = lattice_core::math::PrecisionGuard::new(0.1, 1e-9).unwrap();
        prop_assert_eq!(guard.compare(a, b), guard.compare(b, a).reverse());
    }
}
