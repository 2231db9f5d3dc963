//! # Lattice Models (L2: Business Logic)
//!
//! Recombining binomial lattices, barrier overlays and the closed-form
//! reference model.
//!
//! This crate provides:
//! - Lattice calibration under CRR, Jarrow-Rudd and Trigeorgis parameterisations
//! - Backward induction with a scalar (full grid) and a vectorised (single array) strategy
//! - Vanilla, knock-out and knock-in instruments
//! - Black-Scholes price and Greeks as a convergence reference
//! - Replication and convergence checks behind the precision guard
//! - Engine configuration and a price-record sink interface
//!
//! ## Design Principles
//!
//! - **Tagged calibration variant** selected at construction, shared induction contract
//! - **Calibration memoised on the contract**, value grids rebuilt on every `price()` call
//! - **Enum-based instruments** for static dispatch
//!
//! ## Example
//!
//! ```
//! use lattice_core::traits::Priceable;
//! use lattice_models::instruments::{
//!     Barrier, BarrierDirection, Contract, KnockInOption, KnockOutOption, OptionKind, VanillaOption,
//! };
//!
//! let contract = Contract::builder("Call")
//!     .rate(1.01_f64.ln())
//!     .volatility(1.3_f64.ln())
//!     .maturity(1.0)
//!     .steps(100)
//!     .strike(95.0)
//!     .kind(OptionKind::Call)
//!     .build()
//!     .unwrap();
//! let barrier = Barrier::new(105.0, BarrierDirection::Up).unwrap();
//!
//! let vanilla = VanillaOption::new(contract.clone()).price(100.0, 1.0).unwrap();
//! let knock_out = KnockOutOption::new(contract.clone(), barrier).unwrap().price(100.0, 1.0).unwrap();
//! let knock_in = KnockInOption::new(contract, barrier).unwrap().price(100.0, 1.0).unwrap();
//!
//! assert!((knock_in + knock_out - vanilla).abs() < 1e-9);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
#[cfg(feature = "serde")]
pub mod config;
pub mod instruments;
pub mod lattice;
pub mod store;
pub mod verify;
