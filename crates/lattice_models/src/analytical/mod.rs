//! Closed-form reference model.
//!
//! - Black-Scholes price and Greeks (Delta, Gamma, Vega, Theta, Rho)
//! - Standard normal CDF/PDF
//!
//! Lattice prices converge to these values as the step count grows.

pub mod black_scholes;
pub mod distributions;
pub mod error;

pub use black_scholes::{BlackScholes, Greeks, SensitivityUnit, ThetaUnit};
pub use distributions::{norm_cdf, norm_pdf};
pub use error::AnalyticalError;
