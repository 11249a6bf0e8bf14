//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ LineService (domain)
//! ```
//!
//! Driven adapters (pulse counters, indicator panel, operator display,
//! event sinks) implement these traits.  The
//! [`LineService`](super::service::LineService) consumes them via
//! generics, so the domain core never touches hardware directly.

use crate::controls::DisplayMode;
use crate::panel::PanelFrame;

use super::events::StatusSnapshot;

// ───────────────────────────────────────────────────────────────
// Pulse counter port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port over the ISR-fed product counters.
///
/// Reads are non-destructive; the counters free-run until
/// [`reset_counters`](PulseCounterPort::reset_counters) (operator reset)
/// zeroes them.
pub trait PulseCounterPort {
    /// Absolute accepted-unit count.
    fn accepted(&self) -> u32;

    /// Absolute rejected-unit count.
    fn rejected(&self) -> u32;

    /// Zero both counters.
    fn reset_counters(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Panel port (driven adapter: domain → indicator hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain pushes one fully-rendered frame per tick.
pub trait PanelPort {
    /// Drive all five output channels to match `frame`.
    fn apply(&mut self, frame: &PanelFrame);
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain ↔ operator readout)
// ───────────────────────────────────────────────────────────────

/// Operator display: a polled mode-select button plus a one-line readout.
pub trait DisplayPort {
    /// Sample the display-mode button level (true = pressed).
    fn button_level(&mut self) -> bool;

    /// Present the current status in the selected view.
    fn show(&mut self, status: &StatusSnapshot, mode: DisplayMode);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (serial log, MQTT,
/// a supervisory link, etc.).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
