//! # lattice_core: Foundation Layer for Lattice Pricing
//!
//! ## Layer 1 (Foundation) Role
//!
//! lattice_core is the bottom layer of the workspace, providing:
//! - Error types: `PricingError`, `PrecisionError` (`types::error`)
//! - The `Priceable` trait shared by every instrument (`traits`)
//! - The precision guard used before tolerance-based comparisons (`math::precision`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other lattice_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical comparison
//! - thiserror: Error derivation
//! - tracing: Diagnostic events
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use std::cmp::Ordering;
//! use lattice_core::math::precision::PrecisionGuard;
//!
//! // Step size h = 1/500: h² = 4e-6 is at least the 1e-9 tolerance.
//! let guard = PrecisionGuard::new(1.0_f64 / 500.0, 1e-9).unwrap();
//! assert_eq!(guard.compare(13.3710774, 13.3710774 + 1e-12), Ordering::Equal);
//!
//! // A tolerance that exceeds h² = 4e-6 is rejected.
//! assert!(PrecisionGuard::new(1.0_f64 / 500.0, 1e-2).is_err());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for error types

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod traits;
pub mod types;
