//! The 5×5 WS2812 matrix, driven through a PIO state machine.
//!
//! See [`LedMatrix`] for usage example.

use embassy_rp::pio::Instance;
use embassy_rp::pio_programs::ws2812::{PioWs2812, RgbColorOrder};
use smart_leds::RGB8;

use crate::serpentine::{LED_COUNT, PixelStrip};

/// Buffered [`PixelStrip`] over an embassy-rp WS2812 driver.
///
/// # Example
///
/// ```rust,no_run
/// # #![no_std]
/// # #![no_main]
/// use box_envoy::led_matrix::LedMatrix;
/// use box_envoy::serpentine::LED_COUNT;
/// use embassy_rp::bind_interrupts;
/// use embassy_rp::peripherals::PIO0;
/// use embassy_rp::pio::{InterruptHandler, Pio};
/// use embassy_rp::pio_programs::ws2812::{PioWs2812, PioWs2812Program};
/// # #[panic_handler]
/// # fn panic(_info: &core::panic::PanicInfo) -> ! { loop {} }
///
/// bind_interrupts!(struct Irqs {
///     PIO0_IRQ_0 => InterruptHandler<PIO0>;
/// });
///
/// async fn example(p: embassy_rp::Peripherals) {
///     let Pio { mut common, sm0, .. } = Pio::new(p.PIO0, Irqs);
///     let program = PioWs2812Program::new(&mut common);
///     let driver =
///         PioWs2812::<_, 0, LED_COUNT, _>::new(&mut common, sm0, p.DMA_CH0, p.PIN_7, &program);
///     let mut matrix = LedMatrix::new(driver);
///     matrix.clear().await;
/// }
/// ```
pub struct LedMatrix<'d, PIO: Instance, const SM: usize, ORDER: RgbColorOrder> {
    driver: PioWs2812<'d, PIO, SM, LED_COUNT, ORDER>,
    buffer: [RGB8; LED_COUNT],
}

impl<'d, PIO: Instance, const SM: usize, ORDER: RgbColorOrder> LedMatrix<'d, PIO, SM, ORDER> {
    /// Wraps `driver` with an all-black buffer. Nothing is sent yet.
    #[must_use]
    pub const fn new(driver: PioWs2812<'d, PIO, SM, LED_COUNT, ORDER>) -> Self {
        Self {
            driver,
            buffer: [RGB8::new(0, 0, 0); LED_COUNT],
        }
    }

    /// Turns every LED off.
    pub async fn clear(&mut self) {
        self.buffer = [RGB8::new(0, 0, 0); LED_COUNT];
        self.flush().await;
    }
}

impl<PIO: Instance, const SM: usize, ORDER: RgbColorOrder> PixelStrip
    for LedMatrix<'_, PIO, SM, ORDER>
{
    fn set_pixel(&mut self, index: usize, color: RGB8) {
        if let Some(pixel) = self.buffer.get_mut(index) {
            *pixel = color;
        } else {
            defmt::warn!("led matrix: index {} is past the last LED", index);
        }
    }

    async fn flush(&mut self) {
        self.driver.write(&self.buffer).await;
    }
}
