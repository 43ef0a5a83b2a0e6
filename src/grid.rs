//! The 5×5 occupancy grid and the first-fit placement engine.
//!
//! Cells are addressed as `(row, col)` with `(0, 0)` in the top-left corner.
//! A cell is occupied at most once and is never cleared, so the occupied cells
//! always form a disjoint union of the boxes placed so far.

use core::fmt::Write as _;

use heapless::String;
use smart_leds::RGB8;

use crate::dimension::{Candidate, GRID_SIZE};
use crate::{Error, Result};

/// Total number of cells on the grid.
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

const BLACK: RGB8 = RGB8::new(0, 0, 0);

/// One grid position: free, or occupied with the color of the box covering it.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Cell {
    occupied: bool,
    color: RGB8,
}

impl Cell {
    /// A free (black) cell.
    pub const EMPTY: Self = Self {
        occupied: false,
        color: BLACK,
    };

    /// Whether a box covers this cell.
    #[must_use]
    pub const fn is_occupied(&self) -> bool {
        self.occupied
    }

    /// Color shown on the LED: the box color, or black when free.
    #[must_use]
    pub const fn color(&self) -> RGB8 {
        self.color
    }
}

/// Result of asking the grid to take a box.
#[derive(Clone, Copy, Debug, Eq, PartialEq, defmt::Format)]
pub enum Placement {
    /// The box was committed with its top-left corner at `(row, col)`.
    Placed {
        /// Anchor row.
        row: usize,
        /// Anchor column.
        col: usize,
    },
    /// No anchor fits; the grid is unchanged.
    Rejected,
}

/// The occupancy grid: which cells are taken and with which color.
///
/// ```rust
/// use box_envoy::dimension::Candidate;
/// use box_envoy::grid::{Grid, Placement};
/// use smart_leds::RGB8;
///
/// let mut grid = Grid::new();
/// let red = RGB8::new(32, 0, 0);
/// let domino = Candidate::from_sides(2, 1)?;
///
/// assert_eq!(grid.place(domino, red), Placement::Placed { row: 0, col: 0 });
/// assert_eq!(grid.place(domino, red), Placement::Placed { row: 0, col: 2 });
/// assert_eq!(grid.occupied_count(), 4);
/// # Ok::<(), box_envoy::Error>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Grid {
    cells: [[Cell; GRID_SIZE]; GRID_SIZE],
}

impl Grid {
    /// Creates an empty grid.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cells: [[Cell::EMPTY; GRID_SIZE]; GRID_SIZE],
        }
    }

    /// The cell at `(row, col)`, or `None` off the grid.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.cells.get(row)?.get(col)
    }

    /// Iterates over `(row, col, cell)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, &Cell)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(move |(col, cell)| (row, col, cell))
        })
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.cells().filter(|(_, _, cell)| cell.occupied).count()
    }

    /// Whether every cell is occupied.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells().all(|(_, _, cell)| cell.occupied)
    }

    /// First anchor, in row-major order, where `candidate` fits on free cells.
    ///
    /// Pure: the same grid and candidate always yield the same anchor.
    #[must_use]
    pub fn find_anchor(&self, candidate: Candidate) -> Option<(usize, usize)> {
        let height = candidate.height.cells();
        let width = candidate.width.cells();
        let last_row = GRID_SIZE.checked_sub(height)?;
        let last_col = GRID_SIZE.checked_sub(width)?;

        (0..=last_row)
            .flat_map(|row| (0..=last_col).map(move |col| (row, col)))
            .find(|&(row, col)| self.is_region_free(row, col, width, height))
    }

    /// Places `candidate` at its first-fit anchor, painting it `color`.
    ///
    /// On [`Placement::Rejected`] the grid is left untouched.
    pub fn place(&mut self, candidate: Candidate, color: RGB8) -> Placement {
        let Some((row, col)) = self.find_anchor(candidate) else {
            return Placement::Rejected;
        };
        let (width, height) = (candidate.width.cells(), candidate.height.cells());
        for cells in self.cells.iter_mut().skip(row).take(height) {
            for cell in cells.iter_mut().skip(col).take(width) {
                *cell = Cell {
                    occupied: true,
                    color,
                };
            }
        }
        Placement::Placed { row, col }
    }

    /// Like [`place`](Self::place), but treats a rejection as an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PlacementRejected`] when no anchor fits.
    pub fn try_place(&mut self, candidate: Candidate, color: RGB8) -> Result<(usize, usize)> {
        match self.place(candidate, color) {
            Placement::Placed { row, col } => Ok((row, col)),
            Placement::Rejected => Err(Error::PlacementRejected {
                width: candidate.width.get(),
                height: candidate.height.get(),
            }),
        }
    }

    /// One grid row as `0`/`1` digits, e.g. `"11000"`.
    #[must_use]
    pub fn row_digits(&self, row: usize) -> String<GRID_SIZE> {
        let mut digits = String::new();
        if let Some(cells) = self.cells.get(row) {
            for cell in cells {
                // Capacity is exactly one byte per column.
                let _ = digits.push(if cell.occupied { '1' } else { '0' });
            }
        }
        digits
    }

    /// `"used/25"` summary, e.g. `"14/25"`.
    #[must_use]
    pub fn usage_text(&self) -> String<8> {
        let mut text = String::new();
        let _ = write!(text, "{}/{}", self.occupied_count(), CELL_COUNT);
        text
    }

    fn is_region_free(&self, row: usize, col: usize, width: usize, height: usize) -> bool {
        self.cells
            .iter()
            .skip(row)
            .take(height)
            .all(|cells| cells.iter().skip(col).take(width).all(|cell| !cell.occupied))
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
