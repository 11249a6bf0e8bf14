//! ISR-debounced operator buttons.
//!
//! Active-low momentary switches with external pull-ups.  GPIO fires on
//! the falling edge; the ISR debounces against the previously accepted
//! edge and, for a genuine press, pushes the classified event straight
//! into the lock-free queue.  Every accepted press becomes its own
//! event, so two quick presses inside one control interval are both
//! delivered, and sorted draining still hands them to the service ahead
//! of the tick they arrived with.
//!
//! The display-mode button is level-polled instead (see
//! [`crate::controls::DisplayButton`]).

use core::sync::atomic::{AtomicU32, Ordering};

use crate::events::{push_event, Event};

const DEBOUNCE_MS: u32 = 50;

/// Timestamp of the last accepted edge per button (milliseconds since
/// boot, truncated to u32).  Zero means "never pressed".
static START_STOP_ACCEPTED_MS: AtomicU32 = AtomicU32::new(0);
static RESET_ACCEPTED_MS: AtomicU32 = AtomicU32::new(0);

/// Debounce one falling edge against the button's last accepted edge
/// and queue the event for a genuine press.  Edges inside the debounce
/// window are contact bounce from the accepted press; they are dropped
/// without extending the window.
fn debounce_and_queue(accepted: &AtomicU32, now_ms: u32, event: Event) {
    let last = accepted.load(Ordering::Acquire);
    // Keep zero free as the "never pressed" sentinel.
    let now = now_ms.max(1);
    if last != 0 && now.wrapping_sub(last) < DEBOUNCE_MS {
        return;
    }
    accepted.store(now, Ordering::Release);
    // A full queue drops the press; 16 slots never fill at human speed.
    let _ = push_event(event);
}

/// ISR handler for the start/stop button falling edge.
/// Safe to call from interrupt context (atomics + lock-free queue).
pub fn start_stop_isr_handler(now_ms: u32) {
    debounce_and_queue(&START_STOP_ACCEPTED_MS, now_ms, Event::StartStopPressed);
}

/// ISR handler for the reset button falling edge.
pub fn reset_isr_handler(now_ms: u32) {
    debounce_and_queue(&RESET_ACCEPTED_MS, now_ms, Event::ResetPressed);
}
