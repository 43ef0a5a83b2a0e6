//! The shared click counter and the per-button debounce window.
//!
//! The counter is written by the press producer (the edge task on the device)
//! and read by the session controller. It is a single atomic byte, so a read
//! never observes a half-applied increment.

use core::sync::atomic::Ordering;

use embassy_time::{Duration, Instant};
use portable_atomic::AtomicU8;

use crate::dimension::Dimension;

// ============================================================================
// Constants
// ============================================================================

/// Minimum spacing between two accepted edges on the same button.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(500);

// ============================================================================
// ClickCounter
// ============================================================================

/// Candidate side length selected by the increment button, always in `1..=5`.
///
/// Incrementing past 5 wraps back to 1.
///
/// ```rust
/// use box_envoy::click_counter::ClickCounter;
///
/// static COUNTER: ClickCounter = ClickCounter::new();
/// for _ in 0..5 {
///     COUNTER.increment();
/// }
/// assert_eq!(COUNTER.value().get(), 1);
/// ```
#[derive(Debug)]
pub struct ClickCounter {
    value: AtomicU8,
}

impl ClickCounter {
    /// Creates a counter showing 1.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            value: AtomicU8::new(Dimension::MIN.get()),
        }
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> Dimension {
        // Every stored byte came from a `Dimension`.
        Dimension::new(self.value.load(Ordering::Acquire)).unwrap_or_default()
    }

    /// Advances the counter, wrapping 5 to 1, and returns the new value.
    pub fn increment(&self) -> Dimension {
        let previous = self
            .value
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |raw| {
                Some(next_raw(raw))
            })
            .unwrap_or_else(|raw| raw);
        Dimension::new(next_raw(previous)).unwrap_or_default()
    }
}

impl Default for ClickCounter {
    fn default() -> Self {
        Self::new()
    }
}

fn next_raw(raw: u8) -> u8 {
    Dimension::new(raw)
        .unwrap_or_default()
        .wrapping_next()
        .get()
}

// ============================================================================
// Debouncer
// ============================================================================

/// Accepts at most one edge per [`DEBOUNCE_WINDOW`].
///
/// Owned by the producer side only; the controller never sees rejected edges.
#[derive(Clone, Copy, Debug)]
pub struct Debouncer {
    window: Duration,
    last_accepted: Option<Instant>,
}

impl Debouncer {
    /// Creates a debouncer using [`DEBOUNCE_WINDOW`].
    #[must_use]
    pub const fn new() -> Self {
        Self::with_window(DEBOUNCE_WINDOW)
    }

    /// Creates a debouncer with a custom window.
    #[must_use]
    pub const fn with_window(window: Duration) -> Self {
        Self {
            window,
            last_accepted: None,
        }
    }

    /// Records an edge seen at `now` and returns whether it counts as a press.
    ///
    /// The first edge is always accepted. Later edges are accepted once at least
    /// the window has elapsed since the last accepted edge.
    pub fn accept(&mut self, now: Instant) -> bool {
        let accepted = match self.last_accepted {
            None => true,
            Some(last) => now
                .checked_duration_since(last)
                .is_some_and(|elapsed| elapsed >= self.window),
        };
        if accepted {
            self.last_accepted = Some(now);
        }
        accepted
    }

    /// Time of the last accepted edge, if any.
    #[must_use]
    pub const fn last_accepted(&self) -> Option<Instant> {
        self.last_accepted
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new()
    }
}
