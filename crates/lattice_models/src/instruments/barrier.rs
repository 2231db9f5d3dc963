//! Barrier level and trigger direction.
//!
//! A barrier is a predicate over spot, evaluated per lattice node. Because the
//! lattice recombines, every path reaching node `(i, j)` shares the same spot,
//! so "has this path touched the barrier at step i" reduces to a property of
//! the node itself.

use std::fmt;
use std::str::FromStr;

use super::error::InstrumentError;

/// Direction in which the barrier is triggered.
///
/// - `Up`: triggered when spot ≥ barrier
/// - `Down`: triggered when spot ≤ barrier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BarrierDirection {
    /// Triggered when spot rises to or above the level.
    Up,
    /// Triggered when spot falls to or below the level.
    Down,
}

impl FromStr for BarrierDirection {
    type Err = InstrumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "up" => Ok(BarrierDirection::Up),
            "down" => Ok(BarrierDirection::Down),
            _ => Err(InstrumentError::InvalidParameter {
                message: format!("unknown barrier direction: {}", s),
            }),
        }
    }
}

impl fmt::Display for BarrierDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BarrierDirection::Up => f.write_str("up"),
            BarrierDirection::Down => f.write_str("down"),
        }
    }
}

/// Barrier level with trigger direction.
///
/// # Examples
/// ```
/// use lattice_models::instruments::{Barrier, BarrierDirection};
///
/// let up = Barrier::new(105.0, BarrierDirection::Up).unwrap();
/// assert!(up.is_triggered(105.0));
/// assert!(!up.is_triggered(104.99));
///
/// let down = Barrier::new(92.0, BarrierDirection::Down).unwrap();
/// assert!(down.is_triggered(91.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Barrier {
    level: f64,
    direction: BarrierDirection,
}

impl Barrier {
    /// Creates a barrier.
    ///
    /// # Errors
    /// `InstrumentError::InvalidBarrier` if the level is not positive and finite.
    pub fn new(level: f64, direction: BarrierDirection) -> Result<Self, InstrumentError> {
        if !(level > 0.0 && level.is_finite()) {
            return Err(InstrumentError::InvalidBarrier { level });
        }
        Ok(Self { level, direction })
    }

    /// Returns the barrier level.
    #[inline]
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Returns the trigger direction.
    #[inline]
    pub fn direction(&self) -> BarrierDirection {
        self.direction
    }

    /// Whether a node with this spot has tripped the barrier.
    #[inline]
    pub fn is_triggered(&self, spot: f64) -> bool {
        match self.direction {
            BarrierDirection::Up => spot >= self.level,
            BarrierDirection::Down => spot <= self.level,
        }
    }
}
