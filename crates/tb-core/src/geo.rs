//! Continuous and discrete positions.
//!
//! Citizens live in a continuous 2-D space (`Point`) that is overlaid by an
//! integer grid (`Cell`).  The cell of a point is obtained by truncating both
//! coordinates toward zero, so `(3.9, 0.2)` lies in cell `(3, 0)`.

use std::fmt;

use crate::{CoreError, CoreResult};

/// A position in continuous space.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Like [`Point::new`] but rejects negative, NaN or infinite coordinates.
    pub fn checked(x: f64, y: f64) -> CoreResult<Self> {
        if x.is_finite() && y.is_finite() && x >= 0.0 && y >= 0.0 {
            Ok(Self { x, y })
        } else {
            Err(CoreError::InvalidPoint { x, y })
        }
    }

    /// The grid cell containing this point (coordinates truncated).
    ///
    /// Negative coordinates saturate to 0; callers validate with
    /// [`Point::checked`] before placing anything.
    #[inline]
    pub fn cell(self) -> Cell {
        Cell::new(self.x as u32, self.y as u32)
    }

    /// Euclidean distance.
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

/// A discrete grid cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub x: u32,
    pub y: u32,
}

impl Cell {
    #[inline]
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}
