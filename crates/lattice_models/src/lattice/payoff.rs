//! Terminal payoff generator.

use super::calibration::LatticeParams;
use crate::instruments::OptionKind;

/// Terminal values at step `n`, ordered by up-count and scaled by `shares`.
///
/// `V[n][j] = shares · intrinsic(spot(n, j), K)`
///
/// # Examples
/// ```
/// use lattice_models::instruments::OptionKind;
/// use lattice_models::lattice::{terminal_values, CalibrationModel, LatticeParams};
///
/// let params = LatticeParams::calibrate(
///     CalibrationModel::CoxRossRubinstein, 0.05, 0.2, 1.0, 4,
/// ).unwrap();
/// let values = terminal_values(&params, OptionKind::Call, 100.0, 100.0, 1.0);
/// assert_eq!(values.len(), 5);
/// assert_eq!(values[0], 0.0);
/// assert!(values[4] > 0.0);
/// ```
pub fn terminal_values(
    params: &LatticeParams,
    kind: OptionKind,
    strike: f64,
    initial_spot: f64,
    shares: f64,
) -> Vec<f64> {
    let n = params.steps();
    (0..=n)
        .map(|ups| shares * kind.intrinsic(params.spot(initial_spot, n, ups), strike))
        .collect()
}
