//! The two-phase width/height selection wizard.
//!
//! Each phase shows the click counter, redraws it after every increment press,
//! and finishes on a confirm press with the value the counter held at that
//! press. The counter is shared by both phases and is not reset in between.

use embedded_hal_async::delay::DelayNs;

use crate::click_counter::ClickCounter;
use crate::dimension::Dimension;
use crate::display::{Line, TextDisplay, line};
use crate::press::{ButtonEvents, ButtonId};
use crate::session::{Devices, SessionTiming, pause};

/// Which side of the box is being chosen.
#[derive(Clone, Copy, Debug, Eq, PartialEq, defmt::Format)]
pub enum Phase {
    /// Number of columns.
    Width,
    /// Number of rows.
    Height,
}

impl Phase {
    /// Top line while navigating.
    pub const PROMPT: &'static str = "Press B to set";

    /// Bottom line while navigating, e.g. `"width: 3"`.
    #[must_use]
    pub fn value_line(self, value: Dimension) -> Line {
        match self {
            Self::Width => line(format_args!("width: {}", value.get())),
            Self::Height => line(format_args!("height: {}", value.get())),
        }
    }

    /// Screen shown once the value is confirmed.
    #[must_use]
    pub const fn confirmation(self) -> (&'static str, &'static str) {
        match self {
            Self::Width => ("Width", "confirmed!"),
            Self::Height => ("Height", "confirmed!"),
        }
    }

    const fn confirm_dwell(self, timing: &SessionTiming) -> embassy_time::Duration {
        match self {
            Self::Width => timing.width_confirmed,
            Self::Height => timing.height_confirmed,
        }
    }
}

/// Runs one wizard phase and returns the confirmed side length.
///
/// Presses queued before the phase starts are dropped. Each increment redraws
/// the value it produced before the settle pause; a confirm returns the counter
/// value captured when it was pressed.
pub async fn select_dimension<D, S, B, T>(
    phase: Phase,
    counter: &ClickCounter,
    devices: &mut Devices<D, S, B, T>,
    timing: &SessionTiming,
) -> Dimension
where
    D: TextDisplay,
    B: ButtonEvents,
    T: DelayNs,
{
    devices.buttons.discard_pending();
    show_value(phase, counter.value(), devices).await;

    loop {
        let press = devices.buttons.next_press().await;
        match press.button {
            ButtonId::Increment => {
                show_value(phase, press.value, devices).await;
                pause(&mut devices.delay, timing.increment_settle).await;
            }
            ButtonId::Confirm => {
                #[cfg(not(feature = "host"))]
                defmt::info!("wizard: {} confirmed as {}", phase, press.value);
                let (line1, line2) = phase.confirmation();
                devices.display.show_two_lines(line1, line2).await;
                pause(&mut devices.delay, phase.confirm_dwell(timing)).await;
                return press.value;
            }
        }
    }
}

async fn show_value<D: TextDisplay, S, B, T>(
    phase: Phase,
    value: Dimension,
    devices: &mut Devices<D, S, B, T>,
) {
    devices
        .display
        .show_two_lines(Phase::PROMPT, &phase.value_line(value))
        .await;
}
