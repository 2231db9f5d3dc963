//! Vanilla European option.

use std::time::Instant;

use lattice_core::traits::Priceable;
use lattice_core::types::PricingError;

use super::contract::{check_spot, Contract};
use super::error::InstrumentError;
use crate::analytical::{BlackScholes, Greeks, SensitivityUnit, ThetaUnit};
#[cfg(feature = "serde")]
use crate::config::EngineConfig;
use crate::lattice::{backward_grid, InductionStrategy, ValueGrid};

/// Vanilla call or put.
///
/// Prices on the contract's lattice with the selected induction strategy, or
/// in closed form when the contract uses the Black-Scholes model. Greeks are
/// available for the closed-form model only.
///
/// # Examples
/// ```
/// use lattice_core::traits::Priceable;
/// use lattice_models::analytical::SensitivityUnit;
/// use lattice_models::instruments::{Contract, OptionKind, VanillaOption};
/// use lattice_models::lattice::CalibrationModel;
///
/// let contract = Contract::builder("BS call")
///     .rate(0.05)
///     .volatility(0.2)
///     .maturity(1.0)
///     .strike(100.0)
///     .kind(OptionKind::Call)
///     .model(CalibrationModel::BlackScholes)
///     .build()
///     .unwrap();
/// let option = VanillaOption::new(contract);
///
/// let price = option.price(100.0, 1.0).unwrap();
/// assert!((price - 10.450583572185565).abs() < 1e-9);
/// assert!(option.vega(100.0, 1.0, SensitivityUnit::Percent).unwrap() > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct VanillaOption {
    contract: Contract,
    strategy: InductionStrategy,
}

impl VanillaOption {
    /// Wraps a contract using the scalar strategy.
    pub fn new(contract: Contract) -> Self {
        Self {
            contract,
            strategy: InductionStrategy::default(),
        }
    }

    /// Wraps a contract using the configured induction strategy.
    #[cfg(feature = "serde")]
    pub fn from_config(contract: Contract, config: &EngineConfig) -> Self {
        Self::new(contract).with_strategy(config.strategy)
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

    /// Selected induction strategy.
    #[inline]
    pub fn strategy(&self) -> InductionStrategy {
        self.strategy
    }

    /// Full vanilla value grid, rebuilt on every call.
    ///
    /// # Errors
    /// `PricingError::Configuration` for the closed-form model.
    pub fn value_grid(&self, spot: f64, shares: f64) -> Result<ValueGrid<f64>, PricingError> {
        let params = self.contract.lattice()?;
        check_spot(spot)?;
        Ok(backward_grid(
            params,
            self.contract.kind(),
            self.contract.strike(),
            spot,
            shares,
            None,
        ))
    }

    fn closed_form(&self, spot: f64, greek: &str) -> Result<BlackScholes, PricingError> {
        if self.contract.model().is_lattice() {
            return Err(InstrumentError::UnsupportedModel {
                model: self.contract.model().tag().to_string(),
                operation: greek.to_string(),
            }
            .into());
        }
        self.contract.closed_form(spot)
    }

    /// Delta, scaled by `shares`.
    pub fn delta(&self, spot: f64, shares: f64) -> Result<f64, PricingError> {
        let bs = self.closed_form(spot, "delta")?;
        let c = &self.contract;
        Ok(shares * bs.delta(c.strike(), c.maturity(), c.kind()))
    }

    /// Gamma, scaled by `shares`.
    pub fn gamma(&self, spot: f64, shares: f64) -> Result<f64, PricingError> {
        let bs = self.closed_form(spot, "gamma")?;
        Ok(shares * bs.gamma(self.contract.strike(), self.contract.maturity()))
    }

    /// Vega in the requested unit, scaled by `shares`.
    pub fn vega(&self, spot: f64, shares: f64, unit: SensitivityUnit) -> Result<f64, PricingError> {
        let bs = self.closed_form(spot, "vega")?;
        let raw = bs.vega(self.contract.strike(), self.contract.maturity());
        Ok(shares * unit.apply(raw))
    }

    /// Theta in the requested unit, scaled by `shares`.
    pub fn theta(&self, spot: f64, shares: f64, unit: ThetaUnit) -> Result<f64, PricingError> {
        let bs = self.closed_form(spot, "theta")?;
        let c = &self.contract;
        let annual = bs.theta(c.strike(), c.maturity(), c.kind());
        Ok(shares * unit.apply(annual))
    }

    /// Rho in the requested unit, scaled by `shares`.
    pub fn rho(&self, spot: f64, shares: f64, unit: SensitivityUnit) -> Result<f64, PricingError> {
        let bs = self.closed_form(spot, "rho")?;
        let c = &self.contract;
        let raw = bs.rho(c.strike(), c.maturity(), c.kind());
        Ok(shares * unit.apply(raw))
    }

    /// Price and all Greeks in raw units, scaled by `shares`.
    pub fn greeks(&self, spot: f64, shares: f64) -> Result<Greeks, PricingError> {
        let bs = self.closed_form(spot, "greeks")?;
        let c = &self.contract;
        Ok(bs.greeks(c.strike(), c.maturity(), c.kind()).scaled(shares))
    }
}

impl Priceable<f64> for VanillaOption {
    fn price(&self, spot: f64, shares: f64) -> Result<f64, PricingError> {
        let started = Instant::now();
        let c = &self.contract;

        let (price, strategy) = if c.model().is_lattice() {
            check_spot(spot)?;
            let params = c.lattice()?;
            let value =
                self.strategy
                    .root_value(params, c.kind(), c.strike(), spot, shares, None);
            (value, self.strategy.as_str())
        } else {
            let bs = c.closed_form(spot)?;
            (shares * bs.price(c.strike(), c.maturity(), c.kind()), "closed-form")
        };

        c.log_price("vanilla", strategy, price, started);
        Ok(price)
    }
}
