//! Display-mode selection.
//!
//! Unlike the start/stop and reset buttons (interrupt-driven, queued as
//! events), the display button is polled once per control tick.  A
//! previous-level latch turns the level into a rising edge; each press
//! cycles the readout through the three views.

use core::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::stats::StatsSnapshot;

/// Maximum rendered status line length.
pub const DISPLAY_LINE_CAP: usize = 48;

/// Which statistic the operator display shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayMode {
    /// Accepted and rejected totals.
    #[default]
    Totals,
    /// Trailing-minute throughput.
    Throughput,
    /// Cumulative reject percentage.
    Rejects,
}

impl DisplayMode {
    /// Advance to the next view, wrapping after the last.
    pub fn next(self) -> Self {
        match self {
            Self::Totals => Self::Throughput,
            Self::Throughput => Self::Rejects,
            Self::Rejects => Self::Totals,
        }
    }
}

/// Rising-edge detector for the polled display button.
#[derive(Debug, Default)]
pub struct DisplayButton {
    prev_level: bool,
}

impl DisplayButton {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed this tick's sampled level; returns `true` on a rising edge.
    ///
    /// At a 1 s poll interval, mechanical bounce settles long before the
    /// next sample, so the latch alone is sufficient debouncing.
    pub fn poll(&mut self, level: bool) -> bool {
        let pressed = level && !self.prev_level;
        self.prev_level = level;
        pressed
    }
}

/// Render the status line for the active view.
pub fn format_line(mode: DisplayMode, status: &StatsSnapshot) -> heapless::String<DISPLAY_LINE_CAP> {
    let mut line = heapless::String::new();
    // Writes only fail on capacity overrun; the formats below fit with room
    // to spare even at u32::MAX, so a truncated line is acceptable fallback.
    let _ = match mode {
        DisplayMode::Totals => write!(
            line,
            "OK {} / NOK {}",
            status.total_accepted, status.total_rejected
        ),
        DisplayMode::Throughput => write!(line, "{} units/min", status.throughput_60s),
        DisplayMode::Rejects => write!(line, "rejects {}%", status.reject_pct),
    };
    line
}
