#![no_std]
#![no_main]
#![cfg(not(feature = "host"))]

use core::convert::Infallible;

use box_envoy::{
    Result,
    button::{Button, PressedTo},
    button_task::spawn_button_task,
    char_lcd::{CharLcd, DEFAULT_ADDRESS},
    click_counter::ClickCounter,
    led_matrix::LedMatrix,
    press::{PressConsumer, PressQueue},
    serpentine::LED_COUNT,
    session::{Devices, Session, SessionTiming},
};
use embassy_executor::Spawner;
use embassy_rp::{
    bind_interrupts,
    i2c::{self, I2c},
    peripherals::PIO0,
    pio::{InterruptHandler, Pio},
    pio_programs::ws2812::{PioWs2812, PioWs2812Program},
};
use embassy_time::{Delay, Timer};
use {defmt_rtt as _, panic_probe as _};

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => InterruptHandler<PIO0>;
});

static COUNTER: ClickCounter = ClickCounter::new();
static PRESSES: PressQueue = PressQueue::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) -> ! {
    let err = inner_main(spawner).await.unwrap_err();
    panic!("{err}");
}

async fn inner_main(spawner: Spawner) -> Result<Infallible> {
    let p = embassy_rp::init(Default::default());

    // Button A (GPIO 5) confirms, button B (GPIO 6) increments.
    let confirm = Button::new(p.PIN_5, PressedTo::Ground);
    let increment = Button::new(p.PIN_6, PressedTo::Ground);
    spawn_button_task(spawner, confirm, increment, &COUNTER, &PRESSES)?;

    let Pio {
        mut common, sm0, ..
    } = Pio::new(p.PIO0, Irqs);
    let program = PioWs2812Program::new(&mut common);
    let driver =
        PioWs2812::<_, 0, LED_COUNT, _>::new(&mut common, sm0, p.DMA_CH0, p.PIN_7, &program);
    let mut matrix = LedMatrix::new(driver);
    matrix.clear().await;

    let i2c = I2c::new_blocking(p.I2C1, p.PIN_15, p.PIN_14, i2c::Config::default());
    let lcd = CharLcd::new(i2c, DEFAULT_ADDRESS)?;

    let mut devices = Devices::new(lcd, matrix, PressConsumer::new(&PRESSES), Delay);
    let mut session = Session::new(SessionTiming::DEFAULT);
    let end = session.run(&COUNTER, &mut devices).await;
    defmt::info!(
        "box system finished: {} with {} cells used",
        end,
        session.grid().occupied_count()
    );

    // A new session needs a reset; keep the last screen and LEDs up.
    loop {
        Timer::after_secs(60).await;
    }
}
