//! Debounced button presses, carried from the edge producer to the session.
//!
//! The producer ([`PressProducer`]) runs wherever edges arrive. It applies the
//! debounce window, advances the [`ClickCounter`] for the increment button, and
//! queues each accepted press together with the counter value at that moment.
//! The session reads presses through the [`ButtonEvents`] capability,
//! implemented here by [`PressConsumer`].

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::Instant;

use crate::click_counter::{ClickCounter, Debouncer};
use crate::dimension::Dimension;

/// Maximum number of accepted presses waiting for the session.
pub const PRESS_QUEUE_DEPTH: usize = 4;

/// The two buttons of the box system.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, defmt::Format)]
pub enum ButtonId {
    /// Button A: confirms the shown value, answers "yes".
    Confirm,
    /// Button B: advances the click counter, answers "no".
    Increment,
}

/// An accepted press.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, defmt::Format)]
pub struct Press {
    /// Which button went down.
    pub button: ButtonId,
    /// Click counter value right after the press was handled: the new value for
    /// an increment, the value being confirmed for a confirm.
    pub value: Dimension,
}

/// Queue of accepted presses shared by producer and consumer.
pub type PressQueue = Channel<CriticalSectionRawMutex, Press, PRESS_QUEUE_DEPTH>;

/// Source of debounced presses, as seen by the session controller.
pub trait ButtonEvents {
    /// Waits for the next accepted press.
    async fn next_press(&mut self) -> Press;

    /// Drops presses that arrived before the caller was ready to read them.
    fn discard_pending(&mut self);
}

// ============================================================================
// Producer side
// ============================================================================

/// Turns raw edges into debounced presses.
///
/// Takes `&self`, so one producer can serve an edge loop per button.
pub struct PressProducer<'a> {
    counter: &'a ClickCounter,
    queue: &'a PressQueue,
    confirm: Cell<Debouncer>,
    increment: Cell<Debouncer>,
}

impl<'a> PressProducer<'a> {
    /// Creates a producer feeding `queue` and advancing `counter`.
    #[must_use]
    pub const fn new(counter: &'a ClickCounter, queue: &'a PressQueue) -> Self {
        Self {
            counter,
            queue,
            confirm: Cell::new(Debouncer::new()),
            increment: Cell::new(Debouncer::new()),
        }
    }

    /// Handles an edge on `button` observed at `now`.
    ///
    /// Returns `true` when the edge was accepted as a press. Never blocks: when
    /// the queue is full the press is dropped, though an increment still
    /// advances the counter.
    pub fn on_edge(&self, button: ButtonId, now: Instant) -> bool {
        let slot = match button {
            ButtonId::Confirm => &self.confirm,
            ButtonId::Increment => &self.increment,
        };
        let mut debouncer = slot.get();
        let accepted = debouncer.accept(now);
        slot.set(debouncer);
        if !accepted {
            return false;
        }

        let value = match button {
            ButtonId::Increment => self.counter.increment(),
            ButtonId::Confirm => self.counter.value(),
        };
        #[cfg(not(feature = "host"))]
        defmt::debug!("press: {} with counter at {}", button, value);

        if self.queue.try_send(Press { button, value }).is_err() {
            #[cfg(not(feature = "host"))]
            defmt::warn!("press: queue full, dropping {}", button);
        }
        true
    }
}

// ============================================================================
// Consumer side
// ============================================================================

/// Reads presses queued by a [`PressProducer`].
pub struct PressConsumer<'a> {
    queue: &'a PressQueue,
}

impl<'a> PressConsumer<'a> {
    /// Creates a consumer reading from `queue`.
    #[must_use]
    pub const fn new(queue: &'a PressQueue) -> Self {
        Self { queue }
    }
}

impl ButtonEvents for PressConsumer<'_> {
    async fn next_press(&mut self) -> Press {
        self.queue.receive().await
    }

    fn discard_pending(&mut self) {
        while self.queue.try_receive().is_ok() {}
    }
}
