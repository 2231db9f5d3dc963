//! Lattice instruments and the barrier overlay.
//!
//! # Architecture
//!
//! Uses enum dispatch (not trait objects) for static dispatch:
//! - [`LatticeInstrument`] wraps every instrument type
//! - Each instrument wraps a validated [`Contract`] and implements
//!   [`Priceable`]
//!
//! # Instrument Types
//!
//! - [`VanillaOption`]: call or put on the lattice or in closed form
//! - [`KnockOutOption`]: vanilla masked to zero at tripped nodes
//! - [`KnockInOption`]: vanilla value at tripped nodes, memoised top-down
//!
//! # Examples
//!
//! ```
//! use lattice_core::traits::Priceable;
//! use lattice_models::instruments::{
//!     Barrier, BarrierDirection, Contract, KnockOutOption, LatticeInstrument, OptionKind,
//!     VanillaOption,
//! };
//!
//! let contract = Contract::builder("Put")
//!     .rate(0.01)
//!     .volatility(0.2)
//!     .maturity(1.0)
//!     .steps(50)
//!     .strike(100.0)
//!     .kind(OptionKind::Put)
//!     .build()
//!     .unwrap();
//! let barrier = Barrier::new(90.0, BarrierDirection::Down).unwrap();
//!
//! let book = vec![
//!     LatticeInstrument::Vanilla(VanillaOption::new(contract.clone())),
//!     LatticeInstrument::KnockOut(KnockOutOption::new(contract, barrier).unwrap()),
//! ];
//! for instrument in &book {
//!     assert!(instrument.price(100.0, 100.0).unwrap() > 0.0);
//! }
//! ```

mod barrier;
mod contract;
mod error;
mod knock_in;
mod knock_out;
mod payoff;
mod vanilla;

pub use barrier::{Barrier, BarrierDirection};
pub use contract::{Contract, ContractBuilder};
pub use error::InstrumentError;
pub use knock_in::KnockInOption;
pub use knock_out::KnockOutOption;
pub use payoff::OptionKind;
pub use vanilla::VanillaOption;

use lattice_core::traits::Priceable;
use lattice_core::types::PricingError;

/// Enum wrapping every lattice instrument.
#[derive(Debug, Clone)]
pub enum LatticeInstrument {
    /// Vanilla call or put
    Vanilla(VanillaOption),
    /// Knock-out barrier option
    KnockOut(KnockOutOption),
    /// Knock-in barrier option
    KnockIn(KnockInOption),
}

impl LatticeInstrument {
    /// Underlying contract.
    pub fn contract(&self) -> &Contract {
        match self {
            LatticeInstrument::Vanilla(option) => option.contract(),
            LatticeInstrument::KnockOut(option) => option.contract(),
            LatticeInstrument::KnockIn(option) => option.contract(),
        }
    }

    /// Contract label.
    pub fn label(&self) -> &str {
        self.contract().name()
    }

    /// Instrument type name.
    pub fn instrument_type(&self) -> &'static str {
        match self {
            LatticeInstrument::Vanilla(_) => "vanilla",
            LatticeInstrument::KnockOut(_) => "knock-out",
            LatticeInstrument::KnockIn(_) => "knock-in",
        }
    }

    /// Barrier, if any.
    pub fn barrier(&self) -> Option<Barrier> {
        match self {
            LatticeInstrument::Vanilla(_) => None,
            LatticeInstrument::KnockOut(option) => Some(option.barrier()),
            LatticeInstrument::KnockIn(option) => Some(option.barrier()),
        }
    }
}

impl Priceable<f64> for LatticeInstrument {
    #[inline]
    fn price(&self, spot: f64, shares: f64) -> Result<f64, PricingError> {
        match self {
            LatticeInstrument::Vanilla(option) => option.price(spot, shares),
            LatticeInstrument::KnockOut(option) => option.price(spot, shares),
            LatticeInstrument::KnockIn(option) => option.price(spot, shares),
        }
    }
}

impl From<VanillaOption> for LatticeInstrument {
    fn from(option: VanillaOption) -> Self {
        LatticeInstrument::Vanilla(option)
    }
}

impl From<KnockOutOption> for LatticeInstrument {
    fn from(option: KnockOutOption) -> Self {
        LatticeInstrument::KnockOut(option)
    }
}

impl From<KnockInOption> for LatticeInstrument {
    fn from(option: KnockInOption) -> Self {
        LatticeInstrument::KnockIn(option)
    }
}
