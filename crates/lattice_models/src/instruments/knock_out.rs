//! Knock-out barrier option.
//!
//! Vanilla backward induction with every tripped node forced to zero.
//! Termination is absorbing and local to the node, so no extra state is
//! carried between levels.

use std::time::Instant;

use lattice_core::traits::Priceable;
use lattice_core::types::PricingError;

use super::barrier::Barrier;
use super::contract::{check_spot, Contract};
use super::error::InstrumentError;
#[cfg(feature = "serde")]
use crate::config::EngineConfig;
use crate::lattice::InductionStrategy;

pub(crate) fn require_lattice(contract: &Contract, instrument: &str) -> Result<(), PricingError> {
    if contract.model().is_lattice() {
        Ok(())
    } else {
        Err(InstrumentError::UnsupportedModel {
            model: contract.model().tag().to_string(),
            operation: instrument.to_string(),
        }
        .into())
    }
}

/// Knock-out option: worthless once spot trips the barrier.
///
/// Defaults to the vectorized strategy (`O(n)` memory).
#[derive(Debug, Clone)]
pub struct KnockOutOption {
    contract: Contract,
    barrier: Barrier,
    strategy: InductionStrategy,
}

impl KnockOutOption {
    /// Wraps a lattice contract with a knock-out barrier.
    ///
    /// # Errors
    /// `PricingError::Configuration` for the closed-form model.
    pub fn new(contract: Contract, barrier: Barrier) -> Result<Self, PricingError> {
        require_lattice(&contract, "knock-out barrier")?;
        Ok(Self {
            contract,
            barrier,
            strategy: InductionStrategy::Vectorized,
        })
    }

    /// Wraps a lattice contract using the configured induction strategy.
    ///
    /// # Errors
    /// `PricingError::Configuration` for the closed-form model.
    #[cfg(feature = "serde")]
    pub fn from_config(
        contract: Contract,
        barrier: Barrier,
        config: &EngineConfig,
    ) -> Result<Self, PricingError> {
        Ok(Self::new(contract, barrier)?.with_strategy(config.strategy))
    }

    /// Selects the backward induction strategy.
    pub fn with_strategy(mut self, strategy: InductionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Underlying contract.
    #[inline]
    pub fn contract(&self) -> &Contract {
        &self.contract
    }

    /// Knock-out barrier.
    #[inline]
    pub fn barrier(&self) -> Barrier {
        self.barrier
    }

    /// Selected induction strategy.
    #[inline]
    pub fn strategy(&self) -> InductionStrategy {
        self.strategy
    }
}

impl Priceable<f64> for KnockOutOption {
    fn price(&self, spot: f64, shares: f64) -> Result<f64, PricingError> {
        let started = Instant::now();
        check_spot(spot)?;
        let c = &self.contract;

        let price = if self.barrier.is_triggered(spot) {
            0.0
        } else {
            let params = c.lattice()?;
            self.strategy
                .root_value(params, c.kind(), c.strike(), spot, shares, Some(&self.barrier))
        };

        c.log_price("knock-out", self.strategy.as_str(), price, started);
        Ok(price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruments::{BarrierDirection, OptionKind};
    use crate::lattice::CalibrationModel;
    use approx::assert_relative_eq;

    fn contract(kind: OptionKind, strike: f64, volatility: f64, steps: usize) -> Contract {
        Contract::builder("ko")
            .rate(1.01_f64.ln())
            .volatility(volatility)
            .maturity(1.0)
            .steps(steps)
            .strike(strike)
            .kind(kind)
            .build()
            .unwrap()
    }

    #[test]
    fn test_up_and_out_call_reference() {
        let barrier = Barrier::new(105.0, BarrierDirection::Up).unwrap();
        let option =
            KnockOutOption::new(contract(OptionKind::Call, 95.0, 1.3_f64.ln(), 12), barrier).unwrap();
        assert_relative_eq!(option.price(100.0, 1.0).unwrap(), 0.15884558796031875, epsilon = 1e-12);
    }

    #[test]
    fn test_down_and_out_put_reference() {
        let barrier = Barrier::new(92.0, BarrierDirection::Down).unwrap();
        let option =
            KnockOutOption::new(contract(OptionKind::Put, 100.0, 1.2_f64.ln(), 12), barrier).unwrap();
        assert_relative_eq!(option.price(95.0, 100.0).unwrap(), 15.943080787644101, epsilon = 1e-10);
    }

    #[test]
    fn test_initial_spot_already_knocked_out() {
        let barrier = Barrier::new(105.0, BarrierDirection::Up).unwrap();
        let option =
            KnockOutOption::new(contract(OptionKind::Call, 95.0, 1.3_f64.ln(), 50), barrier).unwrap();
        assert_eq!(option.price(105.0, 100.0).unwrap(), 0.0);
        assert_eq!(
            option
                .clone()
                .with_strategy(InductionStrategy::Scalar)
                .price(130.0, 100.0)
                .unwrap(),
            0.0
        );
    }

    #[test]
    fn test_strategies_agree() {
        let barrier = Barrier::new(92.0, BarrierDirection::Down).unwrap();
        let option =
            KnockOutOption::new(contract(OptionKind::Put, 100.0, 1.2_f64.ln(), 75), barrier).unwrap();
        assert_eq!(option.strategy(), InductionStrategy::Vectorized);
        let vectorized = option.price(95.0, 100.0).unwrap();
        let scalar = option
            .with_strategy(InductionStrategy::Scalar)
            .price(95.0, 100.0)
            .unwrap();
        assert_eq!(vectorized, scalar);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_from_config_applies_strategy() {
        let barrier = Barrier::new(92.0, BarrierDirection::Down).unwrap();
        let config = EngineConfig::default();
        let option = KnockOutOption::from_config(
            contract(OptionKind::Put, 100.0, 1.2_f64.ln(), 12),
            barrier,
            &config,
        )
        .unwrap();
        assert_eq!(option.strategy(), InductionStrategy::Scalar);
        assert_relative_eq!(
            option.price(95.0, config.shares).unwrap(),
            15.943080787644101,
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_closed_form_rejected() {
        let contract = Contract::builder("bs")
            .rate(0.01)
            .volatility(0.2)
            .maturity(1.0)
            .strike(100.0)
            .kind(OptionKind::Call)
            .model(CalibrationModel::BlackScholes)
            .build()
            .unwrap();
        let barrier = Barrier::new(120.0, BarrierDirection::Up).unwrap();
        assert!(KnockOutOption::new(contract, barrier).unwrap_err().is_configuration());
    }
}
