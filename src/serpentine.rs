//! Grid-to-LED rendering for the serpentine-wired 5×5 matrix.
//!
//! The data line enters at the bottom-right LED and snakes upward. Logical row
//! `i` lands on physical row `4 - i`; even logical rows run right to left,
//! odd ones left to right:
//!
//! ```text
//! logical grid (row, col)          LED index on the data line
//!   (0,0) ... (0,4)                  24 23 22 21 20
//!   (1,0) ... (1,4)                  15 16 17 18 19
//!   (2,0) ... (2,4)                  14 13 12 11 10
//!   (3,0) ... (3,4)                   5  6  7  8  9
//!   (4,0) ... (4,4)                   4  3  2  1  0
//! ```

use smart_leds::RGB8;

use crate::dimension::GRID_SIZE;
use crate::grid::{CELL_COUNT, Grid};
use crate::layout::LedLayout;

/// Number of LEDs on the matrix.
pub const LED_COUNT: usize = CELL_COUNT;

/// Wiring of the box-system matrix.
pub const LED_LAYOUT: LedLayout<LED_COUNT, GRID_SIZE, GRID_SIZE> =
    LedLayout::serpentine_row_major().rotate_180();

const XY_TO_INDEX: [u16; LED_COUNT] = LED_LAYOUT.xy_to_index();

/// Physical LED index driving logical cell `(row, col)`.
///
/// # Panics
///
/// Panics if `row` or `col` is 5 or more.
///
/// ```rust
/// use box_envoy::serpentine::led_index;
///
/// assert_eq!(led_index(4, 4), 0);
/// assert_eq!(led_index(3, 0), 5);
/// assert_eq!(led_index(0, 0), 24);
/// ```
#[must_use]
#[expect(
    clippy::indexing_slicing,
    reason = "row and col are asserted in range; slice `get` is not const"
)]
pub const fn led_index(row: usize, col: usize) -> usize {
    assert!(row < GRID_SIZE && col < GRID_SIZE, "cell is off the grid");
    XY_TO_INDEX[row * GRID_SIZE + col] as usize
}

// ============================================================================
// Frame
// ============================================================================

/// Colors for every LED, in data-line order.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Frame([RGB8; LED_COUNT]);

impl Frame {
    /// An all-black frame.
    #[must_use]
    pub const fn new() -> Self {
        Self([RGB8::new(0, 0, 0); LED_COUNT])
    }

    /// Maps every grid cell to its LED. Free cells come out black.
    #[must_use]
    pub fn from_grid(grid: &Grid) -> Self {
        let mut frame = Self::new();
        for (row, col, cell) in grid.cells() {
            if let Some(pixel) = frame.0.get_mut(led_index(row, col)) {
                *pixel = cell.color();
            }
        }
        frame
    }

    /// Pixels in data-line order.
    #[must_use]
    pub const fn pixels(&self) -> &[RGB8; LED_COUNT] {
        &self.0
    }

    /// Color of logical cell `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is 5 or more.
    #[must_use]
    pub fn at_cell(&self, row: usize, col: usize) -> RGB8 {
        self.pixel(led_index(row, col)).unwrap_or_default()
    }

    /// Color of LED `led` on the data line, or `None` past the last LED.
    #[must_use]
    pub fn pixel(&self, led: usize) -> Option<RGB8> {
        self.0.get(led).copied()
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Frame> for [RGB8; LED_COUNT] {
    fn from(frame: Frame) -> Self {
        frame.0
    }
}

// ============================================================================
// Pixel-strip capability
// ============================================================================

/// Buffered LED strip.
///
/// [`set_pixel`](Self::set_pixel) only touches the buffer; [`flush`](Self::flush)
/// shows the whole buffer at once.
pub trait PixelStrip {
    /// Buffers `color` for LED `index` (`0..25`).
    fn set_pixel(&mut self, index: usize, color: RGB8);

    /// Sends the buffer to the LEDs.
    async fn flush(&mut self);
}

/// Writes every cell of `grid` to `strip`, then flushes once.
pub async fn render<S: PixelStrip>(grid: &Grid, strip: &mut S) {
    let frame = Frame::from_grid(grid);
    for (index, color) in frame.pixels().iter().enumerate() {
        strip.set_pixel(index, *color);
    }
    strip.flush().await;
}
