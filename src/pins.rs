//! GPIO / peripheral pin assignments for the LineWatch main board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

#![allow(dead_code)] // Consumed only by the espidf hardware adapter.

// ---------------------------------------------------------------------------
// Product sensors — optical gates, pulse output, interrupt-driven
// ---------------------------------------------------------------------------

/// Accepted-product gate at the end of the line. One rising edge per unit.
pub const ACCEPTED_PULSE_GPIO: i32 = 6;
/// Rejected-product gate on the reject chute. One rising edge per unit.
pub const REJECTED_PULSE_GPIO: i32 = 7;

// ---------------------------------------------------------------------------
// Operator buttons (active-low with external pull-up)
// ---------------------------------------------------------------------------

/// Start/Stop toggle — edge-triggered interrupt.
pub const BTN_START_STOP_GPIO: i32 = 15;
/// Full production reset — edge-triggered interrupt.
pub const BTN_RESET_GPIO: i32 = 16;
/// Display-mode cycle — level input, polled once per control tick.
pub const BTN_DISPLAY_GPIO: i32 = 17;

// ---------------------------------------------------------------------------
// Indicator panel (digital outputs, active HIGH)
// ---------------------------------------------------------------------------

/// Green: line running / batch progress stage 1.
pub const LED_RUN_GPIO: i32 = 10;
/// Yellow: alarm warning blink / batch progress stage 2.
pub const LED_WARN_GPIO: i32 = 11;
/// Red: alarm fault steady / batch progress stage 3.
pub const LED_FAULT_GPIO: i32 = 12;
/// Blue: batch complete.
pub const LED_DONE_GPIO: i32 = 13;
/// Piezo buzzer, driven directly (no PWM tone shaping).
pub const BUZZER_GPIO: i32 = 14;

// ---------------------------------------------------------------------------
// UART debug
// ---------------------------------------------------------------------------

pub const UART_TX_GPIO: i32 = 43;
pub const UART_RX_GPIO: i32 = 44;
