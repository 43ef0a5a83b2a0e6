//! The session controller: wizard, placement, rendering, and the continue prompt.
//!
//! A [`Session`] owns the grid and the palette and moves through explicit
//! [`Stage`]s, one [`Session::step`] at a time:
//!
//! ```text
//! Splash -> SelectWidth -> SelectHeight -> Place --Placed--> Render -> ShowOccupancy
//!                ^                           \--Rejected----------------^    |
//!                |                                                           v
//!                +------------ yes ---- AskContinue <---- not full ---- CheckFull
//!                                          | no                            | full
//!                                          v                               v
//!                                 Finished(Declined)              Finished(GridFull)
//! ```
//!
//! The grid and palette persist across "yes" answers; a new session needs a restart.

use embassy_time::Duration;
use embedded_hal_async::delay::DelayNs;

use crate::click_counter::ClickCounter;
use crate::dimension::{Candidate, Dimension, GRID_SIZE};
use crate::display::{DedupDisplay, Line, TextDisplay, line};
use crate::grid::{Grid, Placement};
use crate::palette::Palette;
use crate::press::{ButtonEvents, ButtonId};
use crate::serpentine::{PixelStrip, render};
use crate::wizard::{Phase, select_dimension};

// ============================================================================
// Timing
// ============================================================================

/// Settle and dwell times used by the controller.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SessionTiming {
    /// Splash screen at start-up.
    pub splash: Duration,
    /// "Select the width" prompt before the width phase.
    pub width_prompt: Duration,
    /// Pause after each increment press in the wizard.
    pub increment_settle: Duration,
    /// "Width confirmed!" screen.
    pub width_confirmed: Duration,
    /// "Height confirmed!" screen.
    pub height_confirmed: Duration,
    /// Placement success or failure message.
    pub placement_result: Duration,
    /// Whole occupancy map, split evenly over its pages.
    pub occupancy_map: Duration,
    /// "Area is full!" screen.
    pub grid_full: Duration,
    /// Continue prompt, shown before presses are read.
    pub continue_prompt: Duration,
    /// Screen acknowledging the continue answer.
    pub continue_answer: Duration,
}

impl SessionTiming {
    /// Settle and dwell times of the shipped box-system firmware.
    pub const DEFAULT: Self = Self {
        splash: Duration::from_millis(1_500),
        width_prompt: Duration::from_millis(1_000),
        increment_settle: Duration::from_millis(600),
        width_confirmed: Duration::from_millis(800),
        height_confirmed: Duration::from_millis(1_000),
        placement_result: Duration::from_millis(1_000),
        occupancy_map: Duration::from_millis(3_000),
        grid_full: Duration::from_millis(2_000),
        continue_prompt: Duration::from_millis(1_000),
        continue_answer: Duration::from_millis(1_000),
    };
}

impl Default for SessionTiming {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Waits `duration` on `delay`.
pub async fn pause<T: DelayNs>(delay: &mut T, duration: Duration) {
    let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
    delay.delay_ms(millis).await;
}

// ============================================================================
// Devices
// ============================================================================

/// The collaborators a session talks to.
///
/// The display is wrapped in a [`DedupDisplay`], so unchanged screens are not
/// resent.
pub struct Devices<D, S, B, T> {
    /// Status display.
    pub display: DedupDisplay<D>,
    /// LED matrix.
    pub strip: S,
    /// Debounced presses.
    pub buttons: B,
    /// Settle and dwell pauses.
    pub delay: T,
}

impl<D: TextDisplay, S, B, T> Devices<D, S, B, T> {
    /// Bundles the collaborators.
    pub const fn new(display: D, strip: S, buttons: B, delay: T) -> Self {
        Self {
            display: DedupDisplay::new(display),
            strip,
            buttons,
            delay,
        }
    }
}

// ============================================================================
// Stages
// ============================================================================

/// Why a session ended.
#[derive(Clone, Copy, Debug, Eq, PartialEq, defmt::Format)]
pub enum SessionEnd {
    /// Every cell is occupied.
    GridFull,
    /// The user answered "no" to the continue prompt.
    Declined,
}

/// Controller state.
#[derive(Clone, Copy, Debug, Eq, PartialEq, defmt::Format)]
pub enum Stage {
    /// Start-up screen.
    Splash,
    /// Width phase of the wizard.
    SelectWidth,
    /// Height phase of the wizard, with the confirmed width.
    SelectHeight {
        /// Width confirmed in the previous phase.
        width: Dimension,
    },
    /// Try the candidate on the grid.
    Place(Candidate),
    /// Show the grid on the LED matrix.
    Render,
    /// Page the occupancy map on the display.
    ShowOccupancy,
    /// End the session if no cell is free.
    CheckFull,
    /// Ask whether to add another box.
    AskContinue,
    /// Terminal.
    Finished(SessionEnd),
}

/// Number of display pages in the occupancy map.
pub const OCCUPANCY_PAGES: usize = 1 + GRID_SIZE.div_ceil(2);

/// Occupancy map as display pages: a usage title, then two grid rows per page.
///
/// ```rust
/// use box_envoy::dimension::Candidate;
/// use box_envoy::grid::Grid;
/// use box_envoy::session::occupancy_pages;
/// use smart_leds::RGB8;
///
/// let mut grid = Grid::new();
/// let _ = grid.place(Candidate::from_sides(3, 1)?, RGB8::new(32, 0, 0));
/// let pages = occupancy_pages(&grid);
/// assert_eq!(pages[0].1.as_str(), "3/25 cells");
/// assert_eq!(pages[1].0.as_str(), "row 1: 11100");
/// assert_eq!(pages[3].1.as_str(), "");
/// # Ok::<(), box_envoy::Error>(())
/// ```
#[must_use]
pub fn occupancy_pages(grid: &Grid) -> [(Line, Line); OCCUPANCY_PAGES] {
    let row_line = |row: usize| {
        if row < GRID_SIZE {
            line(format_args!("row {}: {}", row + 1, grid.row_digits(row)))
        } else {
            Line::new()
        }
    };
    core::array::from_fn(|page| match page.checked_sub(1) {
        None => (
            line(format_args!("AREA TOTAL:")),
            line(format_args!("{} cells", grid.usage_text())),
        ),
        Some(pair) => (row_line(pair * 2), row_line(pair * 2 + 1)),
    })
}

// ============================================================================
// Session
// ============================================================================

/// One run of the box system: the grid, the palette, and the current stage.
#[derive(Clone, Debug)]
pub struct Session {
    grid: Grid,
    palette: Palette,
    stage: Stage,
    last_placement: Option<Placement>,
    timing: SessionTiming,
}

impl Session {
    /// A fresh session on an empty grid, starting at the splash screen.
    #[must_use]
    pub const fn new(timing: SessionTiming) -> Self {
        Self {
            grid: Grid::new(),
            palette: Palette::new(),
            stage: Stage::Splash,
            last_placement: None,
            timing,
        }
    }

    /// The occupancy grid.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The color cycler.
    #[must_use]
    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    /// The stage the next [`step`](Self::step) will run.
    #[must_use]
    pub const fn stage(&self) -> Stage {
        self.stage
    }

    /// Outcome of the most recent placement attempt.
    #[must_use]
    pub const fn last_placement(&self) -> Option<Placement> {
        self.last_placement
    }

    /// Runs stages until the session finishes.
    pub async fn run<D, S, B, T>(
        &mut self,
        counter: &ClickCounter,
        devices: &mut Devices<D, S, B, T>,
    ) -> SessionEnd
    where
        D: TextDisplay,
        S: PixelStrip,
        B: ButtonEvents,
        T: DelayNs,
    {
        loop {
            if let Stage::Finished(end) = self.step(counter, devices).await {
                return end;
            }
        }
    }

    /// Runs the current stage and returns the next one.
    ///
    /// Once [`Stage::Finished`] is reached, further calls do nothing.
    pub async fn step<D, S, B, T>(
        &mut self,
        counter: &ClickCounter,
        devices: &mut Devices<D, S, B, T>,
    ) -> Stage
    where
        D: TextDisplay,
        S: PixelStrip,
        B: ButtonEvents,
        T: DelayNs,
    {
        let timing = self.timing;
        let next = match self.stage {
            Stage::Splash => {
                show(devices, "STARTING", "Box System", timing.splash).await;
                Stage::SelectWidth
            }
            Stage::SelectWidth => {
                show(devices, "Select the width", "of the object.", timing.width_prompt).await;
                let width = select_dimension(Phase::Width, counter, devices, &timing).await;
                Stage::SelectHeight { width }
            }
            Stage::SelectHeight { width } => {
                let height = select_dimension(Phase::Height, counter, devices, &timing).await;
                Stage::Place(Candidate::new(width, height))
            }
            Stage::Place(candidate) => self.place(candidate, devices).await,
            Stage::Render => {
                render(&self.grid, &mut devices.strip).await;
                pause(&mut devices.delay, timing.placement_result).await;
                Stage::ShowOccupancy
            }
            Stage::ShowOccupancy => {
                let page_dwell = timing.occupancy_map / OCCUPANCY_PAGES as u32;
                for (line1, line2) in occupancy_pages(&self.grid) {
                    show(devices, &line1, &line2, page_dwell).await;
                }
                Stage::CheckFull
            }
            Stage::CheckFull => {
                if self.grid.is_full() {
                    show(devices, "Area is", "full!", timing.grid_full).await;
                    devices.display.show_two_lines("End of", "Box System...").await;
                    Stage::Finished(SessionEnd::GridFull)
                } else {
                    Stage::AskContinue
                }
            }
            Stage::AskContinue => self.ask_continue(devices).await,
            Stage::Finished(end) => Stage::Finished(end),
        };

        #[cfg(not(feature = "host"))]
        defmt::debug!("session: {} -> {}", self.stage, next);
        self.stage = next;
        next
    }

    async fn place<D, S, B, T>(
        &mut self,
        candidate: Candidate,
        devices: &mut Devices<D, S, B, T>,
    ) -> Stage
    where
        D: TextDisplay,
        T: DelayNs,
    {
        let placement = self.grid.place(candidate, self.palette.current());
        self.last_placement = Some(placement);
        #[cfg(not(feature = "host"))]
        defmt::info!("session: {} -> {}", candidate, placement);

        match placement {
            Placement::Placed { .. } => {
                devices.display.show_two_lines("Box placed", "in the area!").await;
                let _used = self.palette.advance();
                Stage::Render
            }
            Placement::Rejected => {
                show(
                    devices,
                    "Could not place",
                    "the object.",
                    self.timing.placement_result,
                )
                .await;
                Stage::ShowOccupancy
            }
        }
    }

    async fn ask_continue<D, S, B, T>(&mut self, devices: &mut Devices<D, S, B, T>) -> Stage
    where
        D: TextDisplay,
        B: ButtonEvents,
        T: DelayNs,
    {
        devices.buttons.discard_pending();
        show(devices, "Add another?", "A=yes B=no", self.timing.continue_prompt).await;
        match devices.buttons.next_press().await.button {
            ButtonId::Confirm => {
                show(devices, "Adding", "new object...", self.timing.continue_answer).await;
                Stage::SelectWidth
            }
            ButtonId::Increment => {
                show(devices, "End of", "Box System!", self.timing.continue_answer).await;
                Stage::Finished(SessionEnd::Declined)
            }
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionTiming::DEFAULT)
    }
}

async fn show<D, S, B, T>(
    devices: &mut Devices<D, S, B, T>,
    line1: &str,
    line2: &str,
    dwell: Duration,
) where
    D: TextDisplay,
    T: DelayNs,
{
    devices.display.show_two_lines(line1, line2).await;
    pause(&mut devices.delay, dwell).await;
}
