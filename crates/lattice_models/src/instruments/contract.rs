//! Contract parameters shared by every instrument.
//!
//! A [`Contract`] is validated and, for lattice models, calibrated once at
//! construction. Instruments wrap a contract and reuse its calibration on
//! every `price()` call.

use std::time::Instant;

use lattice_core::math::PrecisionGuard;
use lattice_core::types::PricingError;

use super::error::InstrumentError;
use super::payoff::OptionKind;
use crate::analytical::BlackScholes;
#[cfg(feature = "serde")]
use crate::config::EngineConfig;
use crate::lattice::{CalibrationModel, LatticeParams};

/// Validated contract parameters with memoised lattice calibration.
///
/// # Examples
/// ```
/// use lattice_models::instruments::{Contract, OptionKind};
/// use lattice_models::lattice::CalibrationModel;
///
/// let contract = Contract::builder("JR call")
///     .rate(0.05)
///     .volatility(0.2)
///     .maturity(1.0)
///     .steps(200)
///     .strike(100.0)
///     .kind(OptionKind::Call)
///     .model(CalibrationModel::JarrowRudd)
///     .build()
///     .unwrap();
///
/// assert_eq!(contract.steps(), Some(200));
/// assert_eq!(contract.lattice().unwrap().prob_up(), 0.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Contract {
    name: String,
    rate: f64,
    volatility: f64,
    maturity: f64,
    steps: Option<usize>,
    strike: f64,
    kind: OptionKind,
    model: CalibrationModel,
    lattice: Option<LatticeParams>,
}

impl Contract {
    /// Starts a builder with the default calibration model (CRR).
    pub fn builder(name: impl Into<String>) -> ContractBuilder {
        ContractBuilder::new(name)
    }

    /// Contract label.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Annualised rate `r`.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Annualised volatility `σ`.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Maturity `T` in years.
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Lattice step count; `None` only for the closed-form model.
    #[inline]
    pub fn steps(&self) -> Option<usize> {
        self.steps
    }

    /// Strike `K`.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Call or put.
    #[inline]
    pub fn kind(&self) -> OptionKind {
        self.kind
    }

    /// Calibration model tag.
    #[inline]
    pub fn model(&self) -> CalibrationModel {
        self.model
    }

    /// Calibrated lattice.
    ///
    /// # Errors
    /// `PricingError::Configuration` for the closed-form model.
    pub fn lattice(&self) -> Result<&LatticeParams, PricingError> {
        self.lattice.as_ref().ok_or_else(|| {
            InstrumentError::UnsupportedModel {
                model: self.model.tag().to_string(),
                operation: "lattice access".to_string(),
            }
            .into()
        })
    }

    /// Spot at lattice node `(step, ups)`.
    ///
    /// # Errors
    /// - `PricingError::Configuration` for the closed-form model
    /// - `PricingError::InvalidInput` unless `ups <= step <= n` and the spot is valid
    pub fn spot_at(&self, initial_spot: f64, step: usize, ups: usize) -> Result<f64, PricingError> {
        let params = self.lattice()?;
        check_spot(initial_spot)?;
        if ups > step || step > params.steps() {
            return Err(PricingError::InvalidInput(format!(
                "node ({}, {}) outside lattice with {} steps",
                step,
                ups,
                params.steps()
            )));
        }
        Ok(params.spot(initial_spot, step, ups))
    }

    /// Comparison guard at this lattice's resolution.
    ///
    /// # Errors
    /// - `PricingError::Configuration` for the closed-form model
    /// - `PricingError::Precision` if `h² < ε`
    pub fn precision_guard(&self, epsilon: f64) -> Result<PrecisionGuard<f64>, PricingError> {
        let params = self.lattice()?;
        Ok(PrecisionGuard::new(params.step_size(), epsilon)?)
    }

    /// Closed-form model at the given spot, sharing this contract's `r` and `σ`.
    pub fn closed_form(&self, initial_spot: f64) -> Result<BlackScholes, PricingError> {
        Ok(BlackScholes::new(initial_spot, self.rate, self.volatility)?)
    }

    pub(crate) fn log_price(&self, instrument: &str, strategy: &str, price: f64, started: Instant) {
        tracing::debug!(
            label = %self.name,
            instrument,
            model = self.model.tag(),
            steps = self.steps,
            strategy,
            price,
            elapsed_us = started.elapsed().as_micros() as u64,
            "priced"
        );
    }
}

/// Rejects non-positive or non-finite initial spots.
pub(crate) fn check_spot(spot: f64) -> Result<(), PricingError> {
    if spot > 0.0 && spot.is_finite() {
        Ok(())
    } else {
        Err(PricingError::InvalidInput(format!("Invalid spot price: S = {}", spot)))
    }
}

/// Builder for [`Contract`].
///
/// Every field except `steps` (closed form only) and `model` is required.
/// Validation and lattice calibration happen in [`ContractBuilder::build`];
/// a failed build leaves nothing behind.
#[derive(Debug, Clone)]
pub struct ContractBuilder {
    name: String,
    rate: Option<f64>,
    volatility: Option<f64>,
    maturity: Option<f64>,
    steps: Option<usize>,
    strike: Option<f64>,
    kind: Option<OptionKind>,
    model: CalibrationModel,
}

impl ContractBuilder {
    /// Creates an empty builder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rate: None,
            volatility: None,
            maturity: None,
            steps: None,
            strike: None,
            kind: None,
            model: CalibrationModel::default(),
        }
    }

    /// Creates a builder seeded with the configured default model.
    #[cfg(feature = "serde")]
    pub fn from_config(name: impl Into<String>, config: &EngineConfig) -> Self {
        Self::new(name).model(config.model)
    }

    /// Sets the annualised rate.
    #[inline]
    pub fn rate(mut self, rate: f64) -> Self {
        self.rate = Some(rate);
        self
    }

    /// Sets the annualised volatility.
    #[inline]
    pub fn volatility(mut self, volatility: f64) -> Self {
        self.volatility = Some(volatility);
        self
    }

    /// Sets the maturity in years.
    #[inline]
    pub fn maturity(mut self, maturity: f64) -> Self {
        self.maturity = Some(maturity);
        self
    }

    /// Sets the lattice step count.
    #[inline]
    pub fn steps(mut self, steps: usize) -> Self {
        self.steps = Some(steps);
        self
    }

    /// Sets the strike.
    #[inline]
    pub fn strike(mut self, strike: f64) -> Self {
        self.strike = Some(strike);
        self
    }

    /// Sets call or put.
    #[inline]
    pub fn kind(mut self, kind: OptionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Sets the calibration model.
    #[inline]
    pub fn model(mut self, model: CalibrationModel) -> Self {
        self.model = model;
        self
    }

    /// Validates parameters and calibrates the lattice.
    ///
    /// # Errors
    /// `PricingError::Configuration` if a required field is missing or
    /// invalid, or if the calibrated up probability leaves `(0, 1)`.
    pub fn build(self) -> Result<Contract, PricingError> {
        let rate = self.rate.ok_or(InstrumentError::MissingParameter { name: "rate" })?;
        let volatility = self
            .volatility
            .ok_or(InstrumentError::MissingParameter { name: "volatility" })?;
        let maturity = self
            .maturity
            .ok_or(InstrumentError::MissingParameter { name: "maturity" })?;
        let strike = self
            .strike
            .ok_or(InstrumentError::MissingParameter { name: "strike" })?;
        let kind = self.kind.ok_or(InstrumentError::MissingParameter { name: "kind" })?;

        if !rate.is_finite() {
            return Err(InstrumentError::InvalidRate { rate }.into());
        }
        if !(volatility > 0.0 && volatility.is_finite()) {
            return Err(InstrumentError::InvalidVolatility { volatility }.into());
        }
        if !(maturity > 0.0 && maturity.is_finite()) {
            return Err(InstrumentError::InvalidMaturity { maturity }.into());
        }
        if !(strike > 0.0 && strike.is_finite()) {
            return Err(InstrumentError::InvalidStrike { strike }.into());
        }

        let lattice = if self.model.is_lattice() {
            let steps = self
                .steps
                .ok_or(InstrumentError::MissingParameter { name: "steps" })?;
            let params = LatticeParams::calibrate(self.model, rate, volatility, maturity, steps)?;
            if !params.is_arbitrage_free() {
                return Err(InstrumentError::ArbitrageViolation {
                    prob_up: params.prob_up(),
                }
                .into());
            }
            Some(params)
        } else {
            None
        };

        Ok(Contract {
            name: self.name,
            rate,
            volatility,
            maturity,
            steps: self.steps,
            strike,
            kind,
            model: self.model,
            lattice,
        })
    }
}
