//! Interrupt-driven event system.
//!
//! Events are produced by:
//! - GPIO ISRs (start/stop button, reset button)
//! - The 1 Hz timebase timer callback
//!
//! Events are consumed by the main control loop, which drains the queue
//! once per wakeup. Button events carry a lower discriminant than the
//! tick so that `drain_sorted` hands an operator stop or reset to the
//! service **before** the statistics pass for the same interval — the
//! software analogue of giving the button interrupts higher priority
//! than the timebase.
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ Button ISRs │────▶│              │     │              │
//! │ Timer ISR   │────▶│  Event Queue │────▶│  Main Loop   │
//! │             │     │  (lock-free) │     │  (consumer)  │
//! └─────────────┘     └──────────────┘     └──────────────┘
//! ```

use core::sync::atomic::{AtomicU8, Ordering};

/// Maximum number of pending events.
/// Power of 2 for efficient ring buffer modulo.
const EVENT_QUEUE_CAP: usize = 16;

/// System event types, ordered by priority.
/// Lower discriminant = higher priority when multiple events
/// are pending simultaneously.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Event {
    // ── Operator input (highest priority) ─────────────────
    /// Reset button edge — full production reset.
    ResetPressed = 0,
    /// Start/Stop button edge — mode toggle.
    StartStopPressed = 1,

    // ── Timebase ──────────────────────────────────────────
    /// One-second control tick.
    ControlTick = 10,
}

// ── Lock-free SPSC ring buffer ────────────────────────────────
//
// ISRs write (produce), main loop reads (consume).
// Uses atomic head/tail indices.  The buffer is intentionally
// kept in a static so ISR callbacks can access it.

static EVENT_HEAD: AtomicU8 = AtomicU8::new(0);
static EVENT_TAIL: AtomicU8 = AtomicU8::new(0);
// SAFETY: EVENT_BUFFER slots are written only by the producer side
// (ISR context) at `head` before the Release store publishing `head`,
// and read only by the consumer (main loop) at `tail` after an Acquire
// load of `head`. One writer, one reader; the atomics enforce the SPSC
// discipline.
static mut EVENT_BUFFER: [u8; EVENT_QUEUE_CAP] = [0; EVENT_QUEUE_CAP];

/// Push an event into the queue.
/// Safe to call from ISR context (lock-free).
/// Returns `false` if the queue is full (event dropped).
pub fn push_event(event: Event) -> bool {
    let head = EVENT_HEAD.load(Ordering::Relaxed);
    let tail = EVENT_TAIL.load(Ordering::Acquire);
    let next_head = (head + 1) % EVENT_QUEUE_CAP as u8;

    if next_head == tail {
        return false; // Queue full — drop event.
    }

    // SAFETY: single producer; see the buffer invariant above.
    unsafe {
        EVENT_BUFFER[head as usize] = event as u8;
    }

    EVENT_HEAD.store(next_head, Ordering::Release);
    true
}

/// Pop the next event from the queue.
/// Called from the main loop (single consumer).
/// Returns `None` if the queue is empty.
pub fn pop_event() -> Option<Event> {
    let tail = EVENT_TAIL.load(Ordering::Relaxed);
    let head = EVENT_HEAD.load(Ordering::Acquire);

    if tail == head {
        return None; // Empty.
    }

    // SAFETY: single consumer; see the buffer invariant above.
    let raw = unsafe { EVENT_BUFFER[tail as usize] };
    EVENT_TAIL.store((tail + 1) % EVENT_QUEUE_CAP as u8, Ordering::Release);

    event_from_u8(raw)
}

/// Drain all currently pending events, handing button events to the
/// callback before any pending control tick.
///
/// At a 1 Hz tick rate at most one tick and a handful of button edges are
/// ever pending, so the sort is a fixed-size insertion over a stack array.
pub fn drain_sorted(mut handler: impl FnMut(Event)) {
    let mut pending: heapless::Vec<Event, EVENT_QUEUE_CAP> = heapless::Vec::new();
    while let Some(event) = pop_event() {
        // Capacity equals the queue capacity, so push cannot fail.
        let _ = pending.push(event);
    }
    pending.sort_unstable();
    for event in pending {
        handler(event);
    }
}

/// Check if the event queue is empty.
pub fn queue_is_empty() -> bool {
    let tail = EVENT_TAIL.load(Ordering::Relaxed);
    let head = EVENT_HEAD.load(Ordering::Acquire);
    tail == head
}

// ── Internal ──────────────────────────────────────────────────

/// Serialises tests that touch the process-wide queue (this module's
/// and the button driver's).
#[cfg(test)]
pub(crate) static TEST_QUEUE_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

fn event_from_u8(raw: u8) -> Option<Event> {
    match raw {
        0 => Some(Event::ResetPressed),
        1 => Some(Event::StartStopPressed),
        10 => Some(Event::ControlTick),
        _ => None,
    }
}
