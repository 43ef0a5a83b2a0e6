#![allow(missing_docs)]
//! Host-level tests for the session controller, driven through the real press pipeline.

use std::collections::VecDeque;

use box_envoy::click_counter::ClickCounter;
use box_envoy::dimension::{Candidate, Dimension};
use box_envoy::display::TextDisplay;
use box_envoy::grid::Placement;
use box_envoy::palette::PALETTE;
use box_envoy::press::{
    ButtonEvents, ButtonId, Press, PressConsumer, PressProducer, PressQueue,
};
use box_envoy::serpentine::{LED_COUNT, PixelStrip, led_index};
use box_envoy::session::{Devices, Session, SessionEnd, SessionTiming, Stage};
use box_envoy::wizard::{Phase, select_dimension};
use embassy_futures::block_on;
use embassy_time::Instant;
use embedded_hal_async::delay::DelayNs;
use smart_leds::RGB8;

use ButtonId::{Confirm, Increment};

// ============================================================================
// Test doubles
// ============================================================================

#[derive(Default)]
struct RecordingDisplay {
    screens: Vec<(String, String)>,
}

impl TextDisplay for RecordingDisplay {
    async fn show_two_lines(&mut self, line1: &str, line2: &str) {
        self.screens.push((line1.to_owned(), line2.to_owned()));
    }
}

struct RecordingStrip {
    buffer: [RGB8; LED_COUNT],
    flushed: Vec<[RGB8; LED_COUNT]>,
}

impl RecordingStrip {
    fn new() -> Self {
        Self {
            buffer: [RGB8::default(); LED_COUNT],
            flushed: Vec::new(),
        }
    }
}

impl PixelStrip for RecordingStrip {
    fn set_pixel(&mut self, index: usize, color: RGB8) {
        self.buffer[index] = color;
    }

    async fn flush(&mut self) {
        self.flushed.push(self.buffer);
    }
}

/// Presses a script of buttons through a real producer and queue.
///
/// `next_press` returns a press already waiting in the queue if there is one,
/// and otherwise presses the next scripted button. Scripted presses are a
/// second apart, so none fall inside the debounce window.
struct ScriptedButtons<'a> {
    script: VecDeque<ButtonId>,
    producer: PressProducer<'a>,
    queue: &'a PressQueue,
    consumer: PressConsumer<'a>,
    clock_ms: u64,
}

impl<'a> ScriptedButtons<'a> {
    fn new(counter: &'a ClickCounter, queue: &'a PressQueue, script: &[ButtonId]) -> Self {
        Self {
            script: script.iter().copied().collect(),
            producer: PressProducer::new(counter, queue),
            queue,
            consumer: PressConsumer::new(queue),
            clock_ms: 0,
        }
    }

    /// A press that lands while nobody is reading.
    fn press_now(&mut self, button: ButtonId) {
        self.clock_ms += 1_000;
        assert!(self.producer.on_edge(button, Instant::from_millis(self.clock_ms)));
    }
}

impl ButtonEvents for ScriptedButtons<'_> {
    async fn next_press(&mut self) -> Press {
        if let Ok(press) = self.queue.try_receive() {
            return press;
        }
        let button = self.script.pop_front().expect("press script exhausted");
        self.press_now(button);
        self.consumer.next_press().await
    }

    fn discard_pending(&mut self) {
        self.consumer.discard_pending();
    }
}

#[derive(Default)]
struct RecordingDelay {
    pauses_ms: Vec<u32>,
}

impl DelayNs for RecordingDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.pauses_ms.push(ns / 1_000_000);
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.pauses_ms.push(ms);
    }
}

type TestDevices<'a> =
    Devices<RecordingDisplay, RecordingStrip, ScriptedButtons<'a>, RecordingDelay>;

fn devices<'a>(
    counter: &'a ClickCounter,
    queue: &'a PressQueue,
    script: &[ButtonId],
) -> TestDevices<'a> {
    Devices::new(
        RecordingDisplay::default(),
        RecordingStrip::new(),
        ScriptedButtons::new(counter, queue, script),
        RecordingDelay::default(),
    )
}

fn screens<'d>(devices: &'d TestDevices<'_>) -> &'d [(String, String)] {
    &devices.display.inner().screens
}

fn shown(devices: &TestDevices<'_>, line1: &str, line2: &str) -> bool {
    screens(devices)
        .iter()
        .any(|(first, second)| first == line1 && second == line2)
}

/// Presses buttons from inside the first settle pause, as a user would while the
/// screen still shows the previous value.
struct PressingDelay<'a> {
    producer: PressProducer<'a>,
    presses_ms: Vec<(ButtonId, u64)>,
    pauses_ms: Vec<u32>,
}

impl DelayNs for PressingDelay<'_> {
    async fn delay_ns(&mut self, ns: u32) {
        self.delay_ms(ns / 1_000_000).await;
    }

    async fn delay_ms(&mut self, ms: u32) {
        for (button, at_ms) in self.presses_ms.drain(..) {
            assert!(self.producer.on_edge(button, Instant::from_millis(at_ms)));
        }
        self.pauses_ms.push(ms);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn confirm_during_settle_keeps_the_value_it_was_pressed_on() {
    let counter = ClickCounter::new();
    let queue = PressQueue::new();
    let mut devices = Devices::new(
        RecordingDisplay::default(),
        RecordingStrip::new(),
        ScriptedButtons::new(&counter, &queue, &[Increment]),
        PressingDelay {
            producer: PressProducer::new(&counter, &queue),
            presses_ms: vec![(Confirm, 1_100), (Increment, 1_550)],
            pauses_ms: Vec::new(),
        },
    );

    let width = block_on(select_dimension(
        Phase::Width,
        &counter,
        &mut devices,
        &SessionTiming::DEFAULT,
    ));

    assert_eq!(width.get(), 2);
    assert_eq!(counter.value().get(), 3);
    let screens: Vec<(&str, &str)> = devices
        .display
        .inner()
        .screens
        .iter()
        .map(|(line1, line2)| (line1.as_str(), line2.as_str()))
        .collect();
    assert_eq!(
        screens,
        [
            ("Press B to set", "width: 1"),
            ("Press B to set", "width: 2"),
            ("Width", "confirmed!"),
        ]
    );
    assert_eq!(devices.delay.pauses_ms, [600, 800]);
}

#[test]
fn two_by_two_then_five_by_five_places_then_rejects() {
    let counter = ClickCounter::new();
    let queue = PressQueue::new();
    // Width 2, height 2 (the counter carries over), "yes", width 5, height 5, "no".
    let script = [
        Increment, Confirm, Confirm, Confirm, Increment, Increment, Increment, Confirm, Confirm,
        Increment,
    ];
    let mut devices = devices(&counter, &queue, &script);
    let mut session = Session::new(SessionTiming::DEFAULT);

    let end = block_on(session.run(&counter, &mut devices));

    assert_eq!(end, SessionEnd::Declined);
    assert_eq!(session.last_placement(), Some(Placement::Rejected));
    let grid = session.grid();
    assert_eq!(grid.occupied_count(), 4);
    for (row, col, cell) in grid.cells() {
        let inside = row < 2 && col < 2;
        assert_eq!(cell.is_occupied(), inside, "cell ({row}, {col})");
        if inside {
            assert_eq!(cell.color(), PALETTE[0]);
        }
    }
    // Advanced once for the 2x2, not for the rejected 5x5.
    assert_eq!(session.palette().index(), 1);

    let flushed = &devices.strip.flushed;
    assert_eq!(flushed.len(), 1, "only a placement redraws the matrix");
    for (row, col) in [(0, 0), (0, 1), (1, 0), (1, 1)] {
        assert_eq!(flushed[0][led_index(row, col)], PALETTE[0]);
    }
    assert_eq!(flushed[0][led_index(4, 4)], RGB8::default());

    assert!(shown(&devices, "Box placed", "in the area!"));
    assert!(shown(&devices, "Could not place", "the object."));
    assert!(shown(&devices, "AREA TOTAL:", "4/25 cells"));
    assert!(shown(&devices, "row 1: 11000", "row 2: 11000"));
    assert_eq!(
        screens(&devices).last(),
        Some(&("End of".to_owned(), "Box System!".to_owned()))
    );
}

#[test]
fn filling_the_grid_ends_the_session() {
    let counter = ClickCounter::new();
    let queue = PressQueue::new();
    let script = [Increment, Increment, Increment, Increment, Confirm, Confirm];
    let mut devices = devices(&counter, &queue, &script);
    let mut session = Session::default();

    let end = block_on(session.run(&counter, &mut devices));

    assert_eq!(end, SessionEnd::GridFull);
    assert!(session.grid().is_full());
    assert_eq!(session.stage(), Stage::Finished(SessionEnd::GridFull));
    assert!(shown(&devices, "AREA TOTAL:", "25/25 cells"));
    assert!(shown(&devices, "Area is", "full!"));
    assert!(!shown(&devices, "Add another?", "A=yes B=no"));
    assert_eq!(
        screens(&devices).last(),
        Some(&("End of".to_owned(), "Box System...".to_owned()))
    );

    let pauses = &devices.delay.pauses_ms;
    assert_eq!(pauses.iter().filter(|&&ms| ms == 600).count(), 4);
    assert_eq!(pauses.iter().filter(|&&ms| ms == 750).count(), 4);
    assert_eq!(pauses.last(), Some(&2_000));
}

#[test]
fn stages_follow_the_wizard_and_carry_the_counter_into_height() {
    let counter = ClickCounter::new();
    let queue = PressQueue::new();
    let script = [Increment, Increment, Confirm, Confirm];
    let mut devices = devices(&counter, &queue, &script);
    let mut session = Session::default();
    let three = Dimension::new(3).expect("valid");

    // Stop before AskContinue runs; the script has no answer for it.
    let mut stages = Vec::new();
    block_on(async {
        for _ in 0..7 {
            stages.push(session.step(&counter, &mut devices).await);
        }
    });

    assert_eq!(
        stages,
        [
            Stage::SelectWidth,
            Stage::SelectHeight { width: three },
            Stage::Place(Candidate::new(three, three)),
            Stage::Render,
            Stage::ShowOccupancy,
            Stage::CheckFull,
            Stage::AskContinue,
        ]
    );
    assert_eq!(session.last_placement(), Some(Placement::Placed { row: 0, col: 0 }));
    assert!(shown(&devices, "Press B to set", "height: 3"));
    assert!(!shown(&devices, "Press B to set", "height: 1"));
}

#[test]
fn presses_queued_before_a_prompt_are_dropped() {
    let counter = ClickCounter::new();
    let queue = PressQueue::new();
    let script = [Increment, Confirm, Confirm, Increment];
    let mut devices = devices(&counter, &queue, &script);
    let mut session = Session::default();

    // A confirm arrives during the splash screen, before anyone asks for a width.
    devices.buttons.press_now(Confirm);
    let end = block_on(session.run(&counter, &mut devices));

    assert_eq!(end, SessionEnd::Declined);
    let width_two = Candidate::from_sides(2, 2).expect("valid");
    assert_eq!(session.grid().occupied_count(), width_two.area());
    assert!(shown(&devices, "Press B to set", "width: 2"));
}

#[test]
fn sixth_box_reuses_the_first_color() {
    let counter = ClickCounter::new();
    let queue = PressQueue::new();
    let mut script = Vec::new();
    for _ in 0..5 {
        script.extend([Confirm, Confirm, Confirm]);
    }
    script.extend([Confirm, Confirm, Increment]);
    let mut devices = devices(&counter, &queue, &script);
    let mut session = Session::default();

    let end = block_on(session.run(&counter, &mut devices));

    assert_eq!(end, SessionEnd::Declined);
    let grid = session.grid();
    assert_eq!(grid.occupied_count(), 6);
    for (col, color) in PALETTE.iter().enumerate() {
        assert_eq!(grid.cell(0, col).map(|cell| cell.color()), Some(*color));
    }
    assert_eq!(grid.cell(1, 0).map(|cell| cell.color()), Some(PALETTE[0]));
    assert_eq!(session.palette().index(), 1);
    assert_eq!(devices.strip.flushed.len(), 6);
}
