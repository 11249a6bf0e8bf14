//! Hardware product counters.
//!
//! Two optical gates emit one pulse per unit: one on the accepted-product
//! path, one on the reject chute.  A GPIO ISR increments an atomic counter
//! on each rising edge; the control loop samples the counters once per tick
//! **without** resetting them — the counters free-run between operator
//! resets, and per-second deltas are derived in [`crate::stats`].
//!
//! Because the ISRs and the main loop run at different priorities, the
//! counters use `AtomicU32` for lock-free thread safety — the correct
//! pattern for shared ISR state on ESP32.
//!
//! The 32-bit counters wrap silently on overflow (about 49 days at
//! 1 kHz pulse rate); delta computation uses wrapping subtraction, so a
//! wrap corrupts at most one per-second sample and never panics.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::app::ports::PulseCounterPort;

/// Global atomic counters incremented by the GPIO ISRs.
/// `static` because ISR callbacks in ESP-IDF cannot capture closures.
static ACCEPTED_PULSES: AtomicU32 = AtomicU32::new(0);
static REJECTED_PULSES: AtomicU32 = AtomicU32::new(0);

/// Called from the GPIO ISR on each accepted-gate rising edge.
pub fn accepted_isr_handler() {
    ACCEPTED_PULSES.fetch_add(1, Ordering::Relaxed);
}

/// Called from the GPIO ISR on each reject-gate rising edge.
pub fn rejected_isr_handler() {
    REJECTED_PULSES.fetch_add(1, Ordering::Relaxed);
}

/// Port adapter over the ISR-fed pulse counters.
///
/// Reads never disturb the count; only [`PulseCounterPort::reset_counters`]
/// (the operator reset) zeroes them.
#[derive(Default)]
pub struct HwPulseCounters;

impl HwPulseCounters {
    pub fn new() -> Self {
        Self
    }
}

impl PulseCounterPort for HwPulseCounters {
    fn accepted(&self) -> u32 {
        ACCEPTED_PULSES.load(Ordering::Relaxed)
    }

    fn rejected(&self) -> u32 {
        REJECTED_PULSES.load(Ordering::Relaxed)
    }

    fn reset_counters(&mut self) {
        ACCEPTED_PULSES.store(0, Ordering::Relaxed);
        REJECTED_PULSES.store(0, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

    #[test]
    fn reads_do_not_clear() {
        let _guard = TEST_LOCK.lock().unwrap();
        let mut hw = HwPulseCounters::new();
        hw.reset_counters();

        accepted_isr_handler();
        accepted_isr_handler();
        rejected_isr_handler();

        assert_eq!(hw.accepted(), 2);
        assert_eq!(hw.accepted(), 2); // second read unchanged
        assert_eq!(hw.rejected(), 1);
        hw.reset_counters();
    }

    #[test]
    fn reset_zeroes_both() {
        let _guard = TEST_LOCK.lock().unwrap();
        let mut hw = HwPulseCounters::new();
        accepted_isr_handler();
        rejected_isr_handler();
        hw.reset_counters();
        assert_eq!(hw.accepted(), 0);
        assert_eq!(hw.rejected(), 0);
    }
}
