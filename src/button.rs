//! GPIO push buttons for the box system.
//!
//! See [`Button`] for usage example.

use embassy_rp::Peri;
use embassy_rp::gpio::{Input, Pull};
use embassy_time::{Duration, Timer};

/// Contact bounce filter applied before a level change counts.
const CONTACT_SETTLE: Duration = Duration::from_millis(10);

/// Describes how the button is physically wired.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, defmt::Format)]
pub enum PressedTo {
    /// Button connects pin to 3.3V when pressed. Uses the internal pull-down.
    ///
    /// The Pico 2 (RP2350) pull-down erratum can leave the pin HIGH after
    /// release; use [`PressedTo::Ground`] there.
    Voltage,

    /// Button connects pin to GND when pressed. Uses the internal pull-up.
    ///
    /// The box-system board wires both buttons this way.
    Ground,
}

/// A push button read by level and by falling edge.
///
/// # Example
///
/// ```rust,no_run
/// # #![no_std]
/// # #![no_main]
/// use box_envoy::button::{Button, PressedTo};
/// # #[panic_handler]
/// # fn panic(_info: &core::panic::PanicInfo) -> ! { loop {} }
///
/// async fn example(p: embassy_rp::Peripherals) {
///     let mut confirm = Button::new(p.PIN_5, PressedTo::Ground);
///     confirm.wait_for_press_edge().await;
///     assert!(confirm.is_pressed());
/// }
/// ```
pub struct Button<'a> {
    input: Input<'a>,
    pressed_to: PressedTo,
}

impl<'a> Button<'a> {
    /// Configures `pin` with the pull matching `pressed_to`.
    #[must_use]
    pub fn new<P: embassy_rp::gpio::Pin>(pin: Peri<'a, P>, pressed_to: PressedTo) -> Self {
        let pull = match pressed_to {
            PressedTo::Voltage => Pull::Down,
            PressedTo::Ground => Pull::Up,
        };
        Self {
            input: Input::new(pin, pull),
            pressed_to,
        }
    }

    /// Whether the button is held right now.
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        match self.pressed_to {
            PressedTo::Voltage => self.input.is_high(),
            PressedTo::Ground => self.input.is_low(),
        }
    }

    async fn wait_for_level(&mut self, pressed: bool) {
        loop {
            match (self.pressed_to, pressed) {
                (PressedTo::Ground, true) | (PressedTo::Voltage, false) => {
                    self.input.wait_for_low().await;
                }
                (PressedTo::Ground, false) | (PressedTo::Voltage, true) => {
                    self.input.wait_for_high().await;
                }
            }
            Timer::after(CONTACT_SETTLE).await;
            if self.is_pressed() == pressed {
                return;
            }
        }
    }

    /// Waits for the button to go from released to pressed.
    ///
    /// A button already held when this is called must be released first, so
    /// holding it down yields one edge. Does not wait for release.
    pub async fn wait_for_press_edge(&mut self) {
        self.wait_for_level(false).await;
        self.wait_for_level(true).await;
    }
}
