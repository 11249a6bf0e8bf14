//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the GPIO indicator panel and the polled display button, exposing
//! them through [`PanelPort`] and [`DisplayPort`].  Together with
//! [`hw_init`](crate::drivers::hw_init) this is the only code in the
//! system that touches actual pins; on non-espidf targets the raw GPIO
//! layer is a simulation stub.

use log::info;

use crate::app::events::StatusSnapshot;
use crate::app::ports::{DisplayPort, PanelPort};
use crate::controls::{self, DisplayMode};
use crate::drivers::hw_init::{self, RawOutputPin};
use crate::drivers::panel_gpio::GpioPanel;
use crate::panel::PanelFrame;
use crate::pins;
use crate::stats::StatsSnapshot;

/// Concrete adapter that combines panel and display behind port traits.
pub struct HardwareAdapter {
    panel: GpioPanel<RawOutputPin>,
    /// Last rendered display line; suppresses repeat logging of an
    /// unchanged readout.
    last_line: heapless::String<{ controls::DISPLAY_LINE_CAP }>,
}

impl Default for HardwareAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl HardwareAdapter {
    pub fn new() -> Self {
        let panel = GpioPanel::new(
            RawOutputPin::new(pins::LED_RUN_GPIO),
            RawOutputPin::new(pins::LED_WARN_GPIO),
            RawOutputPin::new(pins::LED_FAULT_GPIO),
            RawOutputPin::new(pins::LED_DONE_GPIO),
            RawOutputPin::new(pins::BUZZER_GPIO),
        );
        Self {
            panel,
            last_line: heapless::String::new(),
        }
    }
}

// ── PanelPort implementation ──────────────────────────────────

impl PanelPort for HardwareAdapter {
    fn apply(&mut self, frame: &PanelFrame) {
        self.panel.apply(frame);
    }
}

// ── DisplayPort implementation ────────────────────────────────

impl DisplayPort for HardwareAdapter {
    fn button_level(&mut self) -> bool {
        // Active-low with pull-up: pressed reads low.
        !hw_init::gpio_read(pins::BTN_DISPLAY_GPIO)
    }

    fn show(&mut self, status: &StatusSnapshot, mode: DisplayMode) {
        let stats = StatsSnapshot {
            total_accepted: status.total_accepted,
            total_rejected: status.total_rejected,
            throughput_60s: status.throughput_60s,
            reject_pct: status.reject_pct,
        };
        let line = controls::format_line(mode, &stats);
        if line != self.last_line {
            info!("display: {line}");
            self.last_line = line;
        }
    }
}
