//! Black-Scholes closed-form model.
//!
//! Serves as the convergence reference for the lattice schemes and as the
//! only model that exposes Greeks.
//!
//! ## Mathematical Formulas
//!
//! With `N₂ = N(d₂)` for calls and `N(d₂) - 1` for puts, and `PV(K) = K·e^(-rτ)`:
//!
//! - **Price**: `Δ·S - N₂·PV(K)`
//! - **Delta**: `N(d₁)` (call), `N(d₁) - 1` (put)
//! - **Gamma**: `φ(d₁) / (S·σ·√τ)`
//! - **Vega**: `S·√τ·φ(d₁)`
//! - **Theta**: `-(S·φ(d₁)·σ)/(2√τ) - r·N₂·PV(K)`
//! - **Rho**: `τ·N₂·PV(K)`
//!
//! Where:
//! - d₁ = (ln(S/K) + (r + σ²/2)τ) / (σ√τ)
//! - d₂ = d₁ - σ√τ

use super::distributions::{norm_cdf, norm_pdf};
use super::error::AnalyticalError;
use crate::instruments::OptionKind;

/// Quoting convention for vega and rho.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SensitivityUnit {
    /// Per unit change (1.00 = 100%).
    Absolute,
    /// Per 1% change.
    #[default]
    Percent,
}

impl SensitivityUnit {
    /// Converts a raw sensitivity into this unit.
    #[inline]
    pub fn apply(&self, raw: f64) -> f64 {
        match self {
            SensitivityUnit::Absolute => raw,
            SensitivityUnit::Percent => raw * 0.01,
        }
    }
}

/// Time unit for theta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ThetaUnit {
    /// Per year.
    Annual,
    /// Per calendar day (annual / 365).
    #[default]
    Daily,
}

impl ThetaUnit {
    /// Converts an annual theta into this unit.
    #[inline]
    pub fn apply(&self, annual: f64) -> f64 {
        match self {
            ThetaUnit::Annual => annual,
            ThetaUnit::Daily => annual / 365.0,
        }
    }
}

/// Price and first/second-order sensitivities, in raw units.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Greeks {
    /// Present value
    pub price: f64,
    /// ∂V/∂S
    pub delta: f64,
    /// ∂²V/∂S²
    pub gamma: f64,
    /// ∂V/∂σ
    pub vega: f64,
    /// ∂V/∂t, per year
    pub theta: f64,
    /// ∂V/∂r
    pub rho: f64,
}

impl Greeks {
    /// Scales every entry by a share count.
    pub fn scaled(self, shares: f64) -> Self {
        Self {
            price: self.price * shares,
            delta: self.delta * shares,
            gamma: self.gamma * shares,
            vega: self.vega * shares,
            theta: self.theta * shares,
            rho: self.rho * shares,
        }
    }
}

/// Black-Scholes model for European options.
///
/// # Examples
/// ```
/// use lattice_models::analytical::BlackScholes;
/// use lattice_models::instruments::OptionKind;
///
/// let bs = BlackScholes::new(100.0, 0.05, 0.2).unwrap();
/// let call = bs.price(100.0, 1.0, OptionKind::Call);
/// let put = bs.price(100.0, 1.0, OptionKind::Put);
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = call - put - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BlackScholes {
    spot: f64,
    rate: f64,
    volatility: f64,
}

impl BlackScholes {
    /// Creates a new Black-Scholes model.
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidSpot` if spot is not positive and finite
    /// - `AnalyticalError::InvalidVolatility` if volatility <= 0
    pub fn new(spot: f64, rate: f64, volatility: f64) -> Result<Self, AnalyticalError> {
        if !(spot > 0.0 && spot.is_finite()) {
            return Err(AnalyticalError::InvalidSpot { spot });
        }
        if !(volatility > 0.0) {
            return Err(AnalyticalError::InvalidVolatility { volatility });
        }
        Ok(Self {
            spot,
            rate,
            volatility,
        })
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Returns the rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// d₁ = (ln(S/K) + (r + σ²/2)τ) / (σ√τ)
    #[inline]
    pub fn d1(&self, strike: f64, expiry: f64) -> f64 {
        let drift = (self.rate + 0.5 * self.volatility * self.volatility) * expiry;
        ((self.spot / strike).ln() + drift) / (self.volatility * expiry.sqrt())
    }

    /// d₂ = d₁ - σ√τ
    #[inline]
    pub fn d2(&self, strike: f64, expiry: f64) -> f64 {
        self.d1(strike, expiry) - self.volatility * expiry.sqrt()
    }

    #[inline]
    fn present_strike(&self, strike: f64, expiry: f64) -> f64 {
        strike * (-self.rate * expiry).exp()
    }

    #[inline]
    fn n2(&self, strike: f64, expiry: f64, kind: OptionKind) -> f64 {
        let n = norm_cdf(self.d2(strike, expiry));
        match kind {
            OptionKind::Call => n,
            OptionKind::Put => n - 1.0,
        }
    }

    /// Option price per share.
    #[inline]
    pub fn price(&self, strike: f64, expiry: f64, kind: OptionKind) -> f64 {
        self.delta(strike, expiry, kind) * self.spot
            - self.n2(strike, expiry, kind) * self.present_strike(strike, expiry)
    }

    /// Delta: `N(d₁)` for calls, `N(d₁) - 1` for puts.
    #[inline]
    pub fn delta(&self, strike: f64, expiry: f64, kind: OptionKind) -> f64 {
        let n = norm_cdf(self.d1(strike, expiry));
        match kind {
            OptionKind::Call => n,
            OptionKind::Put => n - 1.0,
        }
    }

    /// Gamma, identical for calls and puts.
    #[inline]
    pub fn gamma(&self, strike: f64, expiry: f64) -> f64 {
        norm_pdf(self.d1(strike, expiry)) / (self.spot * self.volatility * expiry.sqrt())
    }

    /// Vega per unit volatility, identical for calls and puts.
    #[inline]
    pub fn vega(&self, strike: f64, expiry: f64) -> f64 {
        self.spot * expiry.sqrt() * norm_pdf(self.d1(strike, expiry))
    }

    /// Theta per year (usually negative).
    #[inline]
    pub fn theta(&self, strike: f64, expiry: f64, kind: OptionKind) -> f64 {
        let decay = -(self.spot * norm_pdf(self.d1(strike, expiry)) * self.volatility)
            / (2.0 * expiry.sqrt());
        decay - self.rate * self.n2(strike, expiry, kind) * self.present_strike(strike, expiry)
    }

    /// Rho per unit rate.
    #[inline]
    pub fn rho(&self, strike: f64, expiry: f64, kind: OptionKind) -> f64 {
        expiry * self.n2(strike, expiry, kind) * self.present_strike(strike, expiry)
    }

    /// Price and all sensitivities per share, in raw units.
    pub fn greeks(&self, strike: f64, expiry: f64, kind: OptionKind) -> Greeks {
        Greeks {
            price: self.price(strike, expiry, kind),
            delta: self.delta(strike, expiry, kind),
            gamma: self.gamma(strike, expiry),
            vega: self.vega(strike, expiry),
            theta: self.theta(strike, expiry, kind),
            rho: self.rho(strike, expiry, kind),
        }
    }
}
