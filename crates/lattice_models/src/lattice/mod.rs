//! Recombining binomial lattice.
//!
//! - [`calibration`]: CRR / JR / TRG parameters and the spot function
//! - [`grid`]: triangular value-grid storage
//! - [`payoff`]: terminal payoff generator
//! - [`induction`]: scalar and vectorized backward induction
//!
//! Node `(i, j)` is step `i` with `j` up-moves, `0 ≤ j ≤ i ≤ n`. Its spot
//! depends on `(i, j)` alone, which is what lets barrier state be tracked per
//! node rather than per path.

pub mod calibration;
pub mod grid;
pub mod induction;
pub mod payoff;

pub use calibration::{CalibrationModel, LatticeGeometry, LatticeParams};
pub use grid::ValueGrid;
pub use induction::{backward_grid, backward_sweep, InductionStrategy};
pub use payoff::terminal_values;
