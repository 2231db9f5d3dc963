//! Lattice calibration and the spot function.
//!
//! Derives the per-step quantities of a recombining binomial lattice from
//! `(r, σ, T, n)` under one of three risk-neutral parameterisations:
//!
//! | Model | up | down | p_u |
//! |-------|----|------|-----|
//! | CRR | `exp(σ√h)` | `1/u` | `(1/df - d)/(u - d)` |
//! | JR | `exp(νh + σ√h)` | `exp(νh - σ√h)` | `0.5` |
//! | TRG | `Δx = √(σ²h + ν²h²)` (log step) | `-Δx` | `0.5 + 0.5·νh/Δx` |
//!
//! with `h = T/n`, `df = exp(-rh)` and `ν = r - σ²/2`. CRR and JR produce a
//! multiplicative lattice; TRG produces an additive lattice in log-spot.
//!
//! The calibrator does not clamp `p_u`. [`LatticeParams::is_arbitrage_free`]
//! lets callers reject combinations where it leaves `(0, 1)`.

use std::fmt;
use std::str::FromStr;

use lattice_core::types::PricingError;

use crate::instruments::InstrumentError;

/// Calibration model tag.
///
/// Selected once at contract construction. The three lattice schemes share
/// the same backward-induction contract and differ only in the parameters they
/// produce; `BlackScholes` selects the closed-form model and has no lattice.
///
/// # Examples
/// ```
/// use lattice_models::lattice::CalibrationModel;
///
/// let model: CalibrationModel = "TRG".parse().unwrap();
/// assert_eq!(model, CalibrationModel::Trigeorgis);
/// assert!(model.is_lattice());
/// assert_eq!(CalibrationModel::default(), CalibrationModel::CoxRossRubinstein);
///
/// assert!("XYZ".parse::<CalibrationModel>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CalibrationModel {
    /// Cox-Ross-Rubinstein: symmetric multiplicative steps.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "CRR", alias = "crr"))]
    CoxRossRubinstein,
    /// Jarrow-Rudd: drift-adjusted multiplicative steps, equal probabilities.
    #[cfg_attr(feature = "serde", serde(rename = "JR", alias = "jr"))]
    JarrowRudd,
    /// Trigeorgis: additive log-spot steps.
    #[cfg_attr(feature = "serde", serde(rename = "TRG", alias = "trg"))]
    Trigeorgis,
    /// Closed-form Black-Scholes (no lattice).
    #[cfg_attr(feature = "serde", serde(rename = "BS", alias = "bs"))]
    BlackScholes,
}

impl CalibrationModel {
    /// Short tag, as accepted by `FromStr`.
    pub fn tag(&self) -> &'static str {
        match self {
            CalibrationModel::CoxRossRubinstein => "CRR",
            CalibrationModel::JarrowRudd => "JR",
            CalibrationModel::Trigeorgis => "TRG",
            CalibrationModel::BlackScholes => "BS",
        }
    }

    /// Whether this model prices on a lattice.
    #[inline]
    pub fn is_lattice(&self) -> bool {
        !matches!(self, CalibrationModel::BlackScholes)
    }
}

impl FromStr for CalibrationModel {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CRR" => Ok(CalibrationModel::CoxRossRubinstein),
            "JR" => Ok(CalibrationModel::JarrowRudd),
            "TRG" => Ok(CalibrationModel::Trigeorgis),
            "BS" => Ok(CalibrationModel::BlackScholes),
            _ => Err(InstrumentError::UnknownModel { tag: s.to_string() }.into()),
        }
    }
}

impl fmt::Display for CalibrationModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// How up/down moves act on spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatticeGeometry {
    /// `S · u^j · d^(i-j)`; `up`/`down` are multipliers.
    Multiplicative,
    /// `S · exp(up·j) · exp(down·(i-j))`; `up`/`down` are log-spot increments.
    Additive,
}

/// Calibrated lattice parameters.
///
/// Computed once per contract and reused by every `price()` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeParams {
    steps: usize,
    step_size: f64,
    discount: f64,
    up: f64,
    down: f64,
    prob_up: f64,
    prob_down: f64,
    geometry: LatticeGeometry,
}

impl LatticeParams {
    /// Calibrates a lattice.
    ///
    /// # Arguments
    /// * `model` - Lattice calibration scheme
    /// * `rate` - Annualised continuously-compounded rate `r`
    /// * `volatility` - Annualised volatility `σ`
    /// * `maturity` - Time to maturity `T` in years
    /// * `steps` - Number of lattice steps `n`
    ///
    /// # Errors
    /// - `PricingError::Configuration` for the closed-form model or zero steps
    ///
    /// # Examples
    /// ```
    /// use lattice_models::lattice::{CalibrationModel, LatticeParams};
    ///
    /// let crr = LatticeParams::calibrate(
    ///     CalibrationModel::CoxRossRubinstein, 0.05, 0.2, 1.0, 100,
    /// ).unwrap();
    /// assert!((crr.up() * crr.down() - 1.0).abs() < 1e-12);
    /// assert!(crr.is_arbitrage_free());
    /// ```
    pub fn calibrate(
        model: CalibrationModel,
        rate: f64,
        volatility: f64,
        maturity: f64,
        steps: usize,
    ) -> Result<Self, PricingError> {
        if steps == 0 {
            return Err(InstrumentError::InvalidSteps { steps }.into());
        }

        let h = maturity / steps as f64;
        let discount = (-rate * h).exp();
        let sqrt_h = h.sqrt();
        let drift = rate - 0.5 * volatility * volatility;

        let (up, down, prob_up, geometry) = match model {
            CalibrationModel::CoxRossRubinstein => {
                let u = (volatility * sqrt_h).exp();
                let d = 1.0 / u;
                let p = (1.0 / discount - d) / (u - d);
                (u, d, p, LatticeGeometry::Multiplicative)
            }
            CalibrationModel::JarrowRudd => {
                let u = (drift * h + volatility * sqrt_h).exp();
                let d = (drift * h - volatility * sqrt_h).exp();
                (u, d, 0.5, LatticeGeometry::Multiplicative)
            }
            CalibrationModel::Trigeorgis => {
                let dx = (volatility * volatility * h + drift * drift * h * h).sqrt();
                let p = 0.5 + 0.5 * drift * h / dx;
                (dx, -dx, p, LatticeGeometry::Additive)
            }
            CalibrationModel::BlackScholes => {
                return Err(InstrumentError::UnsupportedModel {
                    model: model.tag().to_string(),
                    operation: "lattice calibration".to_string(),
                }
                .into());
            }
        };

        let params = Self {
            steps,
            step_size: h,
            discount,
            up,
            down,
            prob_up,
            prob_down: 1.0 - prob_up,
            geometry,
        };

        tracing::trace!(
            model = model.tag(),
            steps,
            h,
            u = up,
            d = down,
            pu = prob_up,
            df = discount,
            "lattice calibrated"
        );

        Ok(params)
    }

    /// Number of steps `n`.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Step size `h = T/n`.
    #[inline]
    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    /// Per-step discount factor `exp(-rh)`.
    #[inline]
    pub fn discount(&self) -> f64 {
        self.discount
    }

    /// Up move: multiplier (CRR/JR) or log increment (TRG).
    #[inline]
    pub fn up(&self) -> f64 {
        self.up
    }

    /// Down move: multiplier (CRR/JR) or log increment (TRG).
    #[inline]
    pub fn down(&self) -> f64 {
        self.down
    }

    /// Risk-neutral up probability.
    #[inline]
    pub fn prob_up(&self) -> f64 {
        self.prob_up
    }

    /// Risk-neutral down probability `1 - p_u`.
    #[inline]
    pub fn prob_down(&self) -> f64 {
        self.prob_down
    }

    /// Multiplicative or additive lattice.
    #[inline]
    pub fn geometry(&self) -> LatticeGeometry {
        self.geometry
    }

    /// Whether `0 < p_u < 1`.
    #[inline]
    pub fn is_arbitrage_free(&self) -> bool {
        self.prob_up > 0.0 && self.prob_up < 1.0
    }

    /// One-step risk-neutral expectation, discounted.
    ///
    /// `df · (p_u · V_up + p_d · V_down)`
    #[inline]
    pub fn combine(&self, up_value: f64, down_value: f64) -> f64 {
        self.discount * self.prob_up.mul_add(up_value, self.prob_down * down_value)
    }

    /// Spot at node `(step, ups)`.
    ///
    /// Depends only on the node coordinates. Callers guarantee
    /// `ups <= step <= n`.
    #[inline]
    pub fn spot(&self, initial_spot: f64, step: usize, ups: usize) -> f64 {
        let downs = step - ups;
        match self.geometry {
            LatticeGeometry::Multiplicative => {
                initial_spot * self.up.powi(ups as i32) * self.down.powi(downs as i32)
            }
            LatticeGeometry::Additive => {
                initial_spot * (self.up * ups as f64).exp() * (self.down * downs as f64).exp()
            }
        }
    }

    /// Spots of every node at one level, ordered by up-count.
    pub fn level_spots(&self, initial_spot: f64, step: usize) -> Vec<f64> {
        (0..=step)
            .map(|ups| self.spot(initial_spot, step, ups))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn rate() -> f64 {
        1.06_f64.ln()
    }

    fn vol() -> f64 {
        1.3_f64.ln()
    }

    #[test]
    fn test_crr_parameters() {
        let p = LatticeParams::calibrate(CalibrationModel::CoxRossRubinstein, rate(), vol(), 0.5, 10)
            .unwrap();
        assert_relative_eq!(p.step_size(), 0.05, epsilon = 1e-15);
        assert_relative_eq!(p.discount(), 0.9970907945572351, epsilon = 1e-14);
        assert_relative_eq!(p.up(), 1.0604214601563888, epsilon = 1e-14);
        assert_relative_eq!(p.down(), 0.9430212774574762, epsilon = 1e-14);
        assert_relative_eq!(p.prob_up(), 0.510190144329157, epsilon = 1e-12);
        assert_relative_eq!(p.prob_up() + p.prob_down(), 1.0, epsilon = 1e-15);
        assert_eq!(p.geometry(), LatticeGeometry::Multiplicative);
    }

    #[test]
    fn test_jr_parameters() {
        let p = LatticeParams::calibrate(CalibrationModel::JarrowRudd, rate(), vol(), 0.5, 10).unwrap();
        assert_relative_eq!(p.up(), 1.06168684159329, epsilon = 1e-14);
        assert_relative_eq!(p.down(), 0.9441465674142842, epsilon = 1e-14);
        assert_eq!(p.prob_up(), 0.5);
        assert_eq!(p.prob_down(), 0.5);
    }

    #[test]
    fn test_trg_parameters() {
        let p = LatticeParams::calibrate(CalibrationModel::Trigeorgis, rate(), vol(), 0.5, 10).unwrap();
        assert_relative_eq!(p.up(), 0.058678553042987074, epsilon = 1e-15);
        assert_eq!(p.down(), -p.up());
        assert_relative_eq!(p.prob_up(), 0.5101618918890685, epsilon = 1e-12);
        assert_eq!(p.geometry(), LatticeGeometry::Additive);
    }

    #[test]
    fn test_black_scholes_has_no_lattice() {
        let err = LatticeParams::calibrate(CalibrationModel::BlackScholes, rate(), vol(), 0.5, 10)
            .unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_zero_steps_rejected() {
        let err = LatticeParams::calibrate(CalibrationModel::CoxRossRubinstein, rate(), vol(), 0.5, 0)
            .unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_model_tags_parse() {
        for (tag, model) in [
            ("CRR", CalibrationModel::CoxRossRubinstein),
            ("jr", CalibrationModel::JarrowRudd),
            ("TRG", CalibrationModel::Trigeorgis),
            ("BS", CalibrationModel::BlackScholes),
        ] {
            assert_eq!(tag.parse::<CalibrationModel>().unwrap(), model);
        }
        assert!(matches!(
            "binomial".parse::<CalibrationModel>(),
            Err(PricingError::Configuration(_))
        ));
    }

    #[test]
    fn test_spot_recombines() {
        let p = LatticeParams::calibrate(CalibrationModel::CoxRossRubinstein, rate(), vol(), 0.5, 10)
            .unwrap();
        // up then down returns to the starting spot
        assert_relative_eq!(p.spot(100.0, 2, 1), 100.0, epsilon = 1e-12);
        assert_relative_eq!(p.spot(100.0, 1, 1), 100.0 * p.up(), epsilon = 1e-12);
        assert_eq!(p.spot(100.0, 0, 0), 100.0);
    }

    #[test]
    fn test_additive_spot() {
        let p = LatticeParams::calibrate(CalibrationModel::Trigeorgis, rate(), vol(), 0.5, 10).unwrap();
        assert_relative_eq!(p.spot(100.0, 1, 1), 100.0 * p.up().exp(), epsilon = 1e-12);
        assert_relative_eq!(p.spot(100.0, 4, 2), 100.0, epsilon = 1e-12);
    }

    #[test]
    fn test_level_spots_increase_with_ups() {
        let p = LatticeParams::calibrate(CalibrationModel::JarrowRudd, rate(), vol(), 0.5, 20).unwrap();
        let spots = p.level_spots(100.0, 7);
        assert_eq!(spots.len(), 8);
        assert!(spots.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_combine_of_constant_is_discounted() {
        let p = LatticeParams::calibrate(CalibrationModel::CoxRossRubinstein, rate(), vol(), 0.5, 10)
            .unwrap();
        assert_relative_eq!(p.combine(1.0, 1.0), p.discount(), epsilon = 1e-15);
    }

    #[test]
    fn test_extreme_rate_breaks_no_arbitrage() {
        // Rate drift dominates a tiny volatility: 1/df exceeds u.
        let p = LatticeParams::calibrate(CalibrationModel::CoxRossRubinstein, 0.5, 0.01, 1.0, 10)
            .unwrap();
        assert!(!p.is_arbitrage_free());
    }
}
