//! Box side lengths and the candidate box produced by the dimension wizard.

use crate::{Error, Result};

/// Number of cells along each side of the occupancy grid.
pub const GRID_SIZE: usize = 5;

/// One side length of a box, always in `1..=5`.
///
/// The click counter can only produce values in this range, so every
/// `Dimension` reaching the placement engine fits on the grid along its axis.
///
/// ```rust
/// use box_envoy::dimension::Dimension;
///
/// let three = Dimension::new(3)?;
/// assert_eq!(three.get(), 3);
/// assert_eq!(Dimension::MAX.wrapping_next(), Dimension::MIN);
/// assert!(Dimension::new(6).is_err());
/// # Ok::<(), box_envoy::Error>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, defmt::Format)]
pub struct Dimension(u8);

impl Dimension {
    /// Smallest side length.
    pub const MIN: Self = Self(1);

    /// Largest side length (the grid size).
    pub const MAX: Self = Self(GRID_SIZE as u8);

    /// Creates a dimension, rejecting values outside `1..=5`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] when `value` is 0 or greater than 5.
    pub const fn new(value: u8) -> Result<Self> {
        if value >= Self::MIN.0 && value <= Self::MAX.0 {
            Ok(Self(value))
        } else {
            Err(Error::InvalidDimension(value))
        }
    }

    /// The side length as a `u8`.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// The side length as a cell count.
    #[must_use]
    pub const fn cells(self) -> usize {
        self.0 as usize
    }

    /// The next side length, wrapping `5` back to `1`.
    #[must_use]
    pub const fn wrapping_next(self) -> Self {
        if self.0 >= Self::MAX.0 {
            Self::MIN
        } else {
            Self(self.0 + 1)
        }
    }
}

impl Default for Dimension {
    fn default() -> Self {
        Self::MIN
    }
}

impl TryFrom<u8> for Dimension {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Dimension> for u8 {
    fn from(dimension: Dimension) -> Self {
        dimension.0
    }
}

/// A `width × height` box waiting to be placed.
///
/// Built by the dimension wizard and consumed once by
/// [`Grid::place`](crate::grid::Grid::place).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, defmt::Format)]
pub struct Candidate {
    /// Number of columns the box covers.
    pub width: Dimension,
    /// Number of rows the box covers.
    pub height: Dimension,
}

impl Candidate {
    /// Creates a candidate from already-validated sides.
    #[must_use]
    pub const fn new(width: Dimension, height: Dimension) -> Self {
        Self { width, height }
    }

    /// Creates a candidate from raw side lengths.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for the first side outside `1..=5`.
    pub fn from_sides(width: u8, height: u8) -> Result<Self> {
        Ok(Self::new(Dimension::new(width)?, Dimension::new(height)?))
    }

    /// Number of cells the box covers.
    #[must_use]
    pub const fn area(self) -> usize {
        self.width.cells() * self.height.cells()
    }
}
