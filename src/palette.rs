//! Round-robin box colors.

use smart_leds::RGB8;

/// Number of colors in the palette.
pub const PALETTE_LEN: usize = 5;

/// Box colors in placement order, dimmed to 32/255 so a full matrix stays cool.
pub const PALETTE: [RGB8; PALETTE_LEN] = [
    RGB8::new(32, 32, 32), // white
    RGB8::new(32, 0, 0),   // red
    RGB8::new(0, 32, 0),   // green
    RGB8::new(0, 0, 32),   // blue
    RGB8::new(32, 0, 32),  // purple
];

/// Color cycler: hands out [`PALETTE`] entries in order, wrapping after the last.
///
/// ```rust
/// use box_envoy::palette::{PALETTE, Palette};
///
/// let mut palette = Palette::new();
/// for expected in PALETTE {
///     assert_eq!(palette.advance(), expected);
/// }
/// assert_eq!(palette.current(), PALETTE[0]);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Palette {
    index: usize,
}

impl Palette {
    /// Starts at the first color.
    #[must_use]
    pub const fn new() -> Self {
        Self { index: 0 }
    }

    /// Index of the color the next box will get, in `0..5`.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Color the next box will get.
    #[must_use]
    #[expect(
        clippy::indexing_slicing,
        reason = "the index is reduced modulo the palette length"
    )]
    pub const fn current(&self) -> RGB8 {
        PALETTE[self.index % PALETTE_LEN]
    }

    /// Returns the current color and moves to the next one.
    pub const fn advance(&mut self) -> RGB8 {
        let color = self.current();
        self.index = (self.index + 1) % PALETTE_LEN;
        color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixth_color_repeats_the_first() {
        let mut palette = Palette::new();
        let handed_out: [RGB8; 6] = core::array::from_fn(|_| palette.advance());
        assert_eq!(handed_out[5], handed_out[0]);
        assert_eq!(&handed_out[..5], &PALETTE[..]);
        assert_eq!(palette.index(), 1);
    }

    #[test]
    fn palette_colors_are_distinct() {
        for (i, a) in PALETTE.iter().enumerate() {
            for b in PALETTE.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
