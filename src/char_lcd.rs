//! A 16×2 HD44780 character LCD behind a PCF8574 I2C backpack.
//!
//! See [`CharLcd`] for usage example.

use embassy_time::Delay;
use hd44780_driver::bus::I2CBus;
use hd44780_driver::{Cursor, CursorBlink, Display, DisplayMode, HD44780};

use crate::display::TextDisplay;
use crate::{Error, Result};

/// Usual I2C address of a PCF8574 LCD backpack.
pub const DEFAULT_ADDRESS: u8 = 0x27;

/// DDRAM address of the first column of the second line.
const SECOND_LINE: u8 = 0x40;

/// [`TextDisplay`] on an HD44780 LCD.
///
/// The driver is blocking, so each redraw holds the executor for the few
/// milliseconds the I2C transfer takes.
///
/// # Example
///
/// ```rust,no_run
/// # #![no_std]
/// # #![no_main]
/// use box_envoy::char_lcd::{CharLcd, DEFAULT_ADDRESS};
/// use box_envoy::display::TextDisplay;
/// use embassy_rp::i2c::{Config, I2c};
/// # #[panic_handler]
/// # fn panic(_info: &core::panic::PanicInfo) -> ! { loop {} }
///
/// async fn example(p: embassy_rp::Peripherals) -> box_envoy::Result<()> {
///     let i2c = I2c::new_blocking(p.I2C1, p.PIN_15, p.PIN_14, Config::default());
///     let mut lcd = CharLcd::new(i2c, DEFAULT_ADDRESS)?;
///     lcd.show_two_lines("STARTING", "Box System").await;
///     Ok(())
/// }
/// ```
pub struct CharLcd<I2C>
where
    I2C: embedded_hal_02::blocking::i2c::Write,
{
    lcd: HD44780<I2CBus<I2C>>,
    delay: Delay,
}

impl<I2C> CharLcd<I2C>
where
    I2C: embedded_hal_02::blocking::i2c::Write,
{
    /// Initializes the LCD at `address`, clears it, and hides the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Display`] if the LCD does not answer on the bus.
    pub fn new(i2c: I2C, address: u8) -> Result<Self> {
        let mut delay = Delay;
        let mut lcd = HD44780::new_i2c(i2c, address, &mut delay).map_err(|_| Error::Display)?;
        lcd.reset(&mut delay).map_err(|_| Error::Display)?;
        lcd.clear(&mut delay).map_err(|_| Error::Display)?;
        lcd.set_display_mode(
            DisplayMode {
                display: Display::On,
                cursor_visibility: Cursor::Invisible,
                cursor_blink: CursorBlink::Off,
            },
            &mut delay,
        )
        .map_err(|_| Error::Display)?;
        defmt::info!("char lcd: ready at {:#x}", address);
        Ok(Self { lcd, delay })
    }

    fn write_two_lines(&mut self, line1: &str, line2: &str) -> Result<()> {
        self.lcd.clear(&mut self.delay).map_err(|_| Error::Display)?;
        self.lcd
            .write_str(line1, &mut self.delay)
            .map_err(|_| Error::Display)?;
        self.lcd
            .set_cursor_pos(SECOND_LINE, &mut self.delay)
            .map_err(|_| Error::Display)?;
        self.lcd
            .write_str(line2, &mut self.delay)
            .map_err(|_| Error::Display)?;
        Ok(())
    }
}

impl<I2C> TextDisplay for CharLcd<I2C>
where
    I2C: embedded_hal_02::blocking::i2c::Write,
{
    async fn show_two_lines(&mut self, line1: &str, line2: &str) {
        if let Err(err) = self.write_two_lines(line1, line2) {
            defmt::warn!("char lcd: {}", defmt::Display2Format(&err));
        }
    }
}
