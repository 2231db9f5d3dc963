//! Knock-in barrier option.
//!
//! A knock-in "becomes vanilla" at the first node that trips the barrier.
//! Because the lattice recombines, every path into node `(i, j)` shares the
//! same spot, so activation is a property of the node and the value is
//!
//! ```text
//! f(i, j) = vanilla[i][j]                        if spot(i, j) trips the barrier
//!         = 0                                    if i = n
//!         = df · (p_u · f(i+1, j+1) + p_d · f(i+1, j))   otherwise
//! ```
//!
//! evaluated top-down from `(0, 0)` over the precomputed vanilla grid, with
//! each node memoised. Only nodes reachable without crossing the barrier are
//! visited. The recursion runs on an explicit stack, so depth is bounded by
//! heap rather than thread stack.

use std::time::Instant;

use lattice_core::traits::Priceable;
use lattice_core::types::PricingError;

use super::barrier::Barrier;
use super::contract::{check_spot, Contract};
use super::knock_out::require_lattice;
use crate::lattice::{backward_grid, LatticeParams, ValueGrid};

/// Knock-in option: pays the vanilla value once spot trips the barrier.
///
/// Always uses the full value grid; there is no `O(n)` variant.
#[derive(Debug, Clone)]
pub struct KnockInOption {
    contract: Contract,
    barrier: Barrier,
}

impl KnockInOption {
    /// Wraps a lattice contract with a knock-in barrier.
    ///
    /// # Errors
    /// `PricingError::Configuration` for the closed-form model.
    pub fn new(contract: Contract, barrier: Barrier) -> Result<Self, PricingError> {
        require_lattice(&contract, "knock-in barrier")?;
        Ok(Self { contract, barrier })
    }

    /// Underlying contract.
    #[inline]
    pub fn contract(&self) -> &Contract {
        &self.contract
    }

    /// Knock-in barrier.
    #[inline]
    pub fn barrier(&self) -> Barrier {
        self.barrier
    }
}

impl Priceable<f64> for KnockInOption {
    fn price(&self, spot: f64, shares: f64) -> Result<f64, PricingError> {
        let started = Instant::now();
        check_spot(spot)?;
        let c = &self.contract;
        let params = c.lattice()?;

        let vanilla = backward_grid(params, c.kind(), c.strike(), spot, shares, None);
        let price = activated_value(params, &vanilla, &self.barrier, spot);

        c.log_price("knock-in", "memoized", price, started);
        Ok(price)
    }
}

fn activated_value(
    params: &LatticeParams,
    vanilla: &ValueGrid<f64>,
    barrier: &Barrier,
    initial_spot: f64,
) -> f64 {
    let n = params.steps();
    let mut memo: ValueGrid<Option<f64>> = ValueGrid::filled(n, None);
    let mut stack = vec![(0_usize, 0_usize)];

    while let Some(&(step, ups)) = stack.last() {
        if memo.get(step, ups).is_some() {
            stack.pop();
            continue;
        }

        if barrier.is_triggered(params.spot(initial_spot, step, ups)) {
            memo.set(step, ups, Some(vanilla.get(step, ups)));
            stack.pop();
            continue;
        }

        if step == n {
            memo.set(step, ups, Some(0.0));
            stack.pop();
            continue;
        }

        match (memo.get(step + 1, ups + 1), memo.get(step + 1, ups)) {
            (Some(up), Some(down)) => {
                memo.set(step, ups, Some(params.combine(up, down)));
                stack.pop();
            }
            (up, down) => {
                if down.is_none() {
                    stack.push((step + 1, ups));
                }
                if up.is_none() {
                    stack.push((step + 1, ups + 1));
                }
            }
        }
    }

    memo.root().unwrap_or(0.0)
}
