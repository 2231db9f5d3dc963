//! Correctness checks for the lattice engine.
//!
//! - **Replication**: knock-in + knock-out = vanilla, compared through the
//!   precision guard
//! - **Convergence**: lattice vanilla against the closed form for the same
//!   parameters
//! - **Strategy equivalence**: scalar and vectorized knock-out induction
//!
//! ## Usage
//!
//! ```rust
//! use lattice_models::instruments::{Barrier, BarrierDirection, Contract, OptionKind};
//! use lattice_models::verify::check_replication;
//!
//! let contract = Contract::builder("Call")
//!     .rate(1.01_f64.ln())
//!     .volatility(1.3_f64.ln())
//!     .maturity(1.0)
//!     .steps(200)
//!     .strike(95.0)
//!     .kind(OptionKind::Call)
//!     .build()
//!     .unwrap();
//! let barrier = Barrier::new(105.0, BarrierDirection::Up).unwrap();
//!
//! let report = check_replication(&contract, barrier, 100.0, 1.0, 1e-9).unwrap();
//! assert!(report.holds);
//!
//! // A tolerance that exceeds the lattice resolution h² is refused.
//! assert!(check_replication(&contract, barrier, 100.0, 1.0, 1e-2).is_err());
//! ```

use lattice_core::traits::Priceable;
use lattice_core::types::PricingError;

#[cfg(feature = "serde")]
use crate::config::EngineConfig;
use crate::instruments::{
    Barrier, Contract, ContractBuilder, KnockInOption, KnockOutOption, VanillaOption,
};
use crate::lattice::InductionStrategy;

/// Outcome of a replication check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReplicationReport {
    /// Vanilla price
    pub vanilla: f64,
    /// Knock-out price
    pub knock_out: f64,
    /// Knock-in price
    pub knock_in: f64,
    /// Tolerance the comparison ran at
    pub tolerance: f64,
    /// Whether knock-in + knock-out matched vanilla within tolerance
    pub holds: bool,
}

impl ReplicationReport {
    /// `knock_in + knock_out - vanilla`
    pub fn gap(&self) -> f64 {
        self.knock_in + self.knock_out - self.vanilla
    }
}

/// Prices vanilla, knock-out and knock-in on one contract and compares.
///
/// # Errors
/// - `PricingError::Precision` if `h² < tolerance`
/// - `PricingError::Configuration` for the closed-form model
pub fn check_replication(
    contract: &Contract,
    barrier: Barrier,
    spot: f64,
    shares: f64,
    tolerance: f64,
) -> Result<ReplicationReport, PricingError> {
    let vanilla = VanillaOption::new(contract.clone());
    let knock_out = KnockOutOption::new(contract.clone(), barrier)?;
    replicate(contract, vanilla, knock_out, barrier, spot, shares, tolerance)
}

/// Replication check at the configured share count, tolerance and strategy.
///
/// # Errors
/// As [`check_replication`].
#[cfg(feature = "serde")]
pub fn check_replication_configured(
    contract: &Contract,
    barrier: Barrier,
    spot: f64,
    config: &EngineConfig,
) -> Result<ReplicationReport, PricingError> {
    let vanilla = VanillaOption::from_config(contract.clone(), config);
    let knock_out = KnockOutOption::from_config(contract.clone(), barrier, config)?;
    replicate(
        contract,
        vanilla,
        knock_out,
        barrier,
        spot,
        config.shares,
        config.tolerance,
    )
}

fn replicate(
    contract: &Contract,
    vanilla: VanillaOption,
    knock_out: KnockOutOption,
    barrier: Barrier,
    spot: f64,
    shares: f64,
    tolerance: f64,
) -> Result<ReplicationReport, PricingError> {
    let guard = contract.precision_guard(tolerance)?;

    let vanilla = vanilla.price(spot, shares)?;
    let knock_out = knock_out.price(spot, shares)?;
    let knock_in = KnockInOption::new(contract.clone(), barrier)?.price(spot, shares)?;

    let holds = guard.is_close(knock_in + knock_out, vanilla);
    if !holds {
        tracing::warn!(
            label = contract.name(),
            vanilla,
            knock_out,
            knock_in,
            tolerance,
            "replication identity violated"
        );
    }

    Ok(ReplicationReport {
        vanilla,
        knock_out,
        knock_in,
        tolerance,
        holds,
    })
}

/// Lattice price against the closed form at one step count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvergenceReport {
    /// Lattice steps
    pub steps: usize,
    /// Lattice vanilla price
    pub lattice: f64,
    /// Closed-form price
    pub closed_form: f64,
}

impl ConvergenceReport {
    /// `lattice - closed_form`
    pub fn error(&self) -> f64 {
        self.lattice - self.closed_form
    }
}

/// Compares a lattice contract's vanilla price with Black-Scholes.
///
/// # Errors
/// `PricingError::Configuration` for the closed-form model.
pub fn convergence_gap(
    contract: &Contract,
    spot: f64,
    shares: f64,
) -> Result<ConvergenceReport, PricingError> {
    let steps = contract.lattice()?.steps();
    let lattice = VanillaOption::new(contract.clone())
        .with_strategy(InductionStrategy::Vectorized)
        .price(spot, shares)?;
    let bs = contract.closed_form(spot)?;
    let closed_form = shares * bs.price(contract.strike(), contract.maturity(), contract.kind());

    Ok(ConvergenceReport {
        steps,
        lattice,
        closed_form,
    })
}

/// Convergence reports for one contract template over several step counts.
pub fn convergence_profile(
    template: &ContractBuilder,
    steps: &[usize],
    spot: f64,
    shares: f64,
) -> Result<Vec<ConvergenceReport>, PricingError> {
    steps
        .iter()
        .map(|&n| {
            let contract = template.clone().steps(n).build()?;
            convergence_gap(&contract, spot, shares)
        })
        .collect()
}

/// Knock-out prices under both induction strategies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrategyComparison {
    /// Full-grid price
    pub scalar: f64,
    /// Single-array price
    pub vectorized: f64,
}

impl StrategyComparison {
    /// Whether both strategies returned the same bits.
    pub fn is_identical(&self) -> bool {
        self.scalar.to_bits() == self.vectorized.to_bits()
    }
}

/// Prices a knock-out with both strategies.
pub fn check_strategy_equivalence(
    contract: &Contract,
    barrier: Barrier,
    spot: f64,
    shares: f64,
) -> Result<StrategyComparison, PricingError> {
    let option = KnockOutOption::new(contract.clone(), barrier)?;
    let scalar = option
        .clone()
        .with_strategy(InductionStrategy::Scalar)
        .price(spot, shares)?;
    let vectorized = option
        .with_strategy(InductionStrategy::Vectorized)
        .price(spot, shares)?;
    Ok(StrategyComparison { scalar, vectorized })
}
