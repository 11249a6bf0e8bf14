//! System configuration parameters
//!
//! All tunable parameters for the LineWatch controller. The defaults match
//! the commissioning values for a single-station line; values can be
//! overridden at runtime without affecting the alarm state-machine contract.

use serde::{Deserialize, Serialize};

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineConfig {
    // --- Alarm thresholds ---
    /// Minimum trailing-60s throughput (units/minute) before the
    /// low-production alarm fires.
    pub min_throughput_per_minute: u32,
    /// Maximum cumulative reject percentage (0-100) before the
    /// reject-rate alarm fires.
    pub max_reject_pct: u8,
    /// Seconds without an accepted unit before the idle alarm fires.
    pub idle_timeout_secs: u32,

    // --- Batch ---
    /// Default accepted-unit target for a new batch.
    pub batch_target_qty: u32,

    // --- Indicator panel ---
    /// Audible beeps emitted on alarm entry. The buzzer sequencer is armed
    /// with twice this many on/off toggles.
    pub alarm_beeps: u8,

    // --- Timing ---
    /// Control tick interval (milliseconds). One tick is the "one second"
    /// timebase driving statistics, alarms and the panel.
    pub control_tick_interval_ms: u32,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            // Alarm thresholds
            min_throughput_per_minute: 30,
            max_reject_pct: 10,
            idle_timeout_secs: 10,

            // Batch
            batch_target_qty: 100,

            // Indicator panel
            alarm_beeps: 3,

            // Timing
            control_tick_interval_ms: 1000, // 1 Hz
        }
    }
}
