//! Standard normal distribution functions.
//!
//! The CDF goes through `statrs`' complementary error function. Absolute
//! error is around 1e-12 near the centre; relative accuracy holds in the
//! far tails, where `1 - erf` would cancel.

use statrs::function::erf::erfc;

/// 1 / sqrt(2 * pi)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Standard normal cumulative distribution function.
///
/// Φ(x) = (1/2) · erfc(-x / √2)
///
/// # Examples
/// ```
/// use lattice_models::analytical::distributions::norm_cdf;
///
/// assert!((norm_cdf(0.0) - 0.5).abs() < 1e-15);
/// assert!((norm_cdf(1.96) - 0.9750021048517795).abs() < 1e-11);
/// ```
#[inline]
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / std::f64::consts::SQRT_2)
}

/// Standard normal probability density function.
///
/// φ(x) = (1/√(2π)) · exp(-x²/2)
#[inline]
pub fn norm_pdf(x: f64) -> f64 {
    FRAC_1_SQRT_2PI * (-0.5 * x * x).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cdf_symmetry() {
        for x in [0.1, 0.5, 1.0, 2.5, 4.0] {
            assert_relative_eq!(norm_cdf(x) + norm_cdf(-x), 1.0, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_cdf_reference_values() {
        assert_relative_eq!(norm_cdf(1.96), 0.9750021048517795, epsilon = 1e-11);
        assert_relative_eq!(norm_cdf(-1.96), 0.024997895148220435, epsilon = 1e-11);
    }

    #[test]
    fn test_cdf_tail_keeps_precision() {
        // Φ(-8) ≈ 6.22e-16
        assert_relative_eq!(norm_cdf(-8.0), 6.220960574271819e-16, max_relative = 1e-10);
    }

    #[test]
    fn test_pdf_values() {
        assert_relative_eq!(norm_pdf(0.0), 0.3989422804014327, epsilon = 1e-15);
        assert_relative_eq!(norm_pdf(1.0), 0.24197072451914337, epsilon = 1e-15);
        assert_eq!(norm_pdf(1.3), norm_pdf(-1.3));
    }
}
