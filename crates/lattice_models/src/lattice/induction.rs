//! Backward induction engine.
//!
//! Two strategies share the same one-step combination
//! ([`LatticeParams::combine`]) and the same spot function, so for identical
//! inputs they produce bit-identical roots:
//!
//! - **Scalar**: fills the full triangular [`ValueGrid`], `O(n²)` memory. The
//!   retained grid is what knock-in recurses over.
//! - **Vectorized**: a single shrinking array updated in place, `O(n)` memory.
//!
//! An optional knock-out barrier masks every node whose spot trips it,
//! terminal level included.

use std::fmt;
use std::str::FromStr;

use lattice_core::types::PricingError;

use super::calibration::LatticeParams;
use super::grid::ValueGrid;
use super::payoff::terminal_values;
use crate::instruments::{Barrier, InstrumentError, OptionKind};

/// Backward induction strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum InductionStrategy {
    /// Full value grid, one node at a time.
    #[default]
    Scalar,
    /// Single array swept in place, level by level.
    Vectorized,
}

impl InductionStrategy {
    /// Lowercase name, as accepted by `FromStr`.
    pub fn as_str(&self) -> &'static str {
        match self {
            InductionStrategy::Scalar => "scalar",
            InductionStrategy::Vectorized => "vectorized",
        }
    }

    /// Root value of the lattice under this strategy.
    pub fn root_value(
        &self,
        params: &LatticeParams,
        kind: OptionKind,
        strike: f64,
        initial_spot: f64,
        shares: f64,
        knock_out: Option<&Barrier>,
    ) -> f64 {
        match self {
            InductionStrategy::Scalar => {
                backward_grid(params, kind, strike, initial_spot, shares, knock_out).root()
            }
            InductionStrategy::Vectorized => {
                backward_sweep(params, kind, strike, initial_spot, shares, knock_out)
            }
        }
    }
}

impl FromStr for InductionStrategy {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "scalar" => Ok(InductionStrategy::Scalar),
            "vectorized" | "vectorised" => Ok(InductionStrategy::Vectorized),
            _ => Err(InstrumentError::InvalidParameter {
                message: format!("unknown induction strategy: {}", s),
            }
            .into()),
        }
    }
}

impl fmt::Display for InductionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[inline]
fn tripped(barrier: Option<&Barrier>, params: &LatticeParams, spot: f64, step: usize, ups: usize) -> bool {
    barrier.is_some_and(|b| b.is_triggered(params.spot(spot, step, ups)))
}

/// Scalar strategy: fills and returns the full value grid.
///
/// `PV[i][j] = df · (p_u · PV[i+1][j+1] + p_d · PV[i+1][j])`, or `0` where a
/// knock-out barrier is tripped.
pub fn backward_grid(
    params: &LatticeParams,
    kind: OptionKind,
    strike: f64,
    initial_spot: f64,
    shares: f64,
    knock_out: Option<&Barrier>,
) -> ValueGrid<f64> {
    let n = params.steps();
    let mut grid = ValueGrid::filled(n, 0.0);

    let terminal = terminal_values(params, kind, strike, initial_spot, shares);
    for (ups, value) in terminal.into_iter().enumerate() {
        if !tripped(knock_out, params, initial_spot, n, ups) {
            grid.set(n, ups, value);
        }
    }

    for step in (0..n).rev() {
        let (current, next) = grid.level_pair_mut(step);
        for (ups, cell) in current.iter_mut().enumerate() {
            *cell = if tripped(knock_out, params, initial_spot, step, ups) {
                0.0
            } else {
                params.combine(next[ups + 1], next[ups])
            };
        }
    }

    grid
}

/// Vectorized strategy: returns the root value using `O(n)` memory.
pub fn backward_sweep(
    params: &LatticeParams,
    kind: OptionKind,
    strike: f64,
    initial_spot: f64,
    shares: f64,
    knock_out: Option<&Barrier>,
) -> f64 {
    let n = params.steps();
    let mut values = terminal_values(params, kind, strike, initial_spot, shares);
    apply_mask(&mut values, params, initial_spot, n, knock_out);

    for step in (0..n).rev() {
        // ascending j reads values[j + 1] before it is overwritten
        for ups in 0..=step {
            values[ups] = params.combine(values[ups + 1], values[ups]);
        }
        values.truncate(step + 1);
        apply_mask(&mut values, params, initial_spot, step, knock_out);
    }

    values[0]
}

fn apply_mask(
    values: &mut [f64],
    params: &LatticeParams,
    initial_spot: f64,
    step: usize,
    knock_out: Option<&Barrier>,
) {
    let Some(barrier) = knock_out else {
        return;
    };
    let spots = params.level_spots(initial_spot, step);
    for (value, spot) in values.iter_mut().zip(spots) {
        if barrier.is_triggered(spot) {
            *value = 0.0;
        }
    }
}
