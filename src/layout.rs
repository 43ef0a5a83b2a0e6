//! Compile-time description of how an LED matrix is wired.
//!
//! See [`LedLayout`].

/// Compile-time map from LED wiring order to `(x, y)` panel coordinates.
///
/// `(0, 0)` is the top-left corner, `x` grows to the right (grid column) and
/// `y` grows downward (grid row). Entry `i` of the map is the position of the
/// `i`-th LED on the data line.
///
/// Layouts are checked when built in a `const` context: every coordinate must be
/// in bounds and every cell must appear exactly once.
///
/// # Example
///
/// The box-system matrix is a row-major serpentine whose data line starts at the
/// bottom-right corner, which is the plain serpentine turned 180°:
///
/// ```rust
/// use box_envoy::layout::LedLayout;
///
/// const WIRED: LedLayout<6, 3, 2> = LedLayout::serpentine_row_major().rotate_180();
/// const EXPECTED: LedLayout<6, 3, 2> =
///     LedLayout::new([(2, 1), (1, 1), (0, 1), (0, 0), (1, 0), (2, 0)]);
/// const _: () = assert!(WIRED.equals(&EXPECTED));
/// ```
///
/// ```text
/// serpentine_row_major:   rotate_180:
///   LED0  LED1  LED2        LED3  LED4  LED5
///   LED5  LED4  LED3        LED2  LED1  LED0
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LedLayout<const N: usize, const W: usize, const H: usize> {
    map: [(u16, u16); N],
}

#[expect(
    clippy::indexing_slicing,
    reason = "const loops stay below N and every cell index is asserted in bounds"
)]
impl<const N: usize, const W: usize, const H: usize> LedLayout<N, W, H> {
    /// Checks that `map` covers every `(x, y)` cell of the `W × H` panel exactly once.
    #[must_use]
    pub const fn new(map: [(u16, u16); N]) -> Self {
        assert!(W > 0 && H > 0, "W and H must be positive");
        assert!(W * H == N, "W*H must equal N");

        let mut seen = [false; N];
        let mut led_index = 0;
        while led_index < N {
            let (x, y) = map[led_index];
            let x = x as usize;
            let y = y as usize;
            assert!(x < W, "column out of bounds");
            assert!(y < H, "row out of bounds");

            let cell = y * W + x;
            assert!(!seen[cell], "duplicate (x,y) in mapping");
            seen[cell] = true;
            led_index += 1;
        }
        // N distinct in-bounds cells on a panel of N cells cover it entirely.

        Self { map }
    }

    /// Row-major serpentine starting at the top-left corner.
    ///
    /// Even rows run left to right, odd rows right to left.
    #[must_use]
    pub const fn serpentine_row_major() -> Self {
        assert!(W > 0 && H > 0, "W and H must be positive");
        assert!(W * H == N, "W*H must equal N");

        let mut map = [(0_u16, 0_u16); N];
        let mut y = 0;
        while y < H {
            let mut x = 0;
            while x < W {
                let led_index = if y % 2 == 0 {
                    y * W + x
                } else {
                    y * W + (W - 1 - x)
                };
                map[led_index] = (x as u16, y as u16);
                x += 1;
            }
            y += 1;
        }
        Self::new(map)
    }

    /// Rotates 90° clockwise; width and height swap.
    #[must_use]
    pub const fn rotate_cw(self) -> LedLayout<N, H, W> {
        let mut map = [(0_u16, 0_u16); N];
        let mut led_index = 0;
        while led_index < N {
            let (x, y) = self.map[led_index];
            map[led_index] = ((H - 1 - y as usize) as u16, x);
            led_index += 1;
        }
        LedLayout::<N, H, W>::new(map)
    }

    /// Rotates 180°.
    #[must_use]
    pub const fn rotate_180(self) -> Self {
        self.rotate_cw().rotate_cw()
    }

    /// LED wiring order to `(x, y)`.
    #[must_use]
    pub const fn index_to_xy(&self) -> &[(u16, u16); N] {
        &self.map
    }

    /// Row-major `(x, y)` cell to LED wiring order: entry `y * W + x` holds the
    /// LED index driving that cell.
    #[must_use]
    pub const fn xy_to_index(&self) -> [u16; N] {
        assert!(N <= u16::MAX as usize, "total LEDs must fit in u16");

        let mut table = [0_u16; N];
        let mut led_index = 0;
        while led_index < N {
            let (x, y) = self.map[led_index];
            table[y as usize * W + x as usize] = led_index as u16;
            led_index += 1;
        }
        table
    }

    /// Const equality, usable in compile-time assertions.
    #[must_use]
    pub const fn equals(&self, other: &Self) -> bool {
        let mut led_index = 0;
        while led_index < N {
            if self.map[led_index].0 != other.map[led_index].0
                || self.map[led_index].1 != other.map[led_index].1
            {
                return false;
            }
            led_index += 1;
        }
        true
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> usize {
        W
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> usize {
        H
    }

    /// Number of LEDs.
    #[must_use]
    pub const fn len(&self) -> usize {
        N
    }
}
