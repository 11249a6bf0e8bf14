//! LineWatch firmware — main entry point.
//!
//! Hexagonal architecture with event-driven execution:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                  │
//! │                                                          │
//! │  HardwareAdapter        LogEventSink                     │
//! │  (Panel + Display)      (EventSink)                      │
//! │                                                          │
//! │  ────────────── Port Trait Boundary ──────────────       │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │           LineService (pure logic)             │      │
//! │  │  FSM · Stats · Batch · Panel rendering         │      │
//! │  └────────────────────────────────────────────────┘      │
//! │                                                          │
//! │  ISRs: pulse counters · buttons · timebase → event queue │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::info;

use linewatch::adapters::hardware::HardwareAdapter;
use linewatch::adapters::log_sink::LogEventSink;
use linewatch::app::service::LineService;
use linewatch::config::LineConfig;
use linewatch::counters::HwPulseCounters;
use linewatch::drivers::{hw_init, hw_timer};
use linewatch::error::validate_config;
use linewatch::events::{self, Event};

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("LineWatch v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration ──────────────────────────────────────
    let config = LineConfig::default();
    validate_config(&config)?;
    info!(
        "config: min {}/min, max rejects {}%, idle timeout {}s, lot {}",
        config.min_throughput_per_minute,
        config.max_reject_pct,
        config.idle_timeout_secs,
        config.batch_target_qty
    );

    // ── 3. Hardware ───────────────────────────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt.
        // In production this triggers the watchdog reset after timeout.
        log::error!("HAL init failed: {e} — halting");
        #[allow(clippy::empty_loop)]
        loop {}
    }
    if let Err(e) = hw_init::init_isr_service() {
        log::error!("ISR service init failed: {e} — continuing without ISRs");
    }
    hw_timer::start_control_timer(config.control_tick_interval_ms);

    // ── 4. Adapters ───────────────────────────────────────────
    let mut hw = HardwareAdapter::new();
    let mut log_sink = LogEventSink::new();
    let mut counters = HwPulseCounters::new();

    // ── 5. Application service ────────────────────────────────
    let mut service = LineService::new(config.clone());
    service.start(&mut log_sink);

    info!("System ready. Entering event loop.");

    // ── 6. Event loop ─────────────────────────────────────────
    // Ticks and button presses arrive through the queue: the esp_timer
    // callback pushes ControlTick on a fixed period and the button ISRs
    // push their events directly.  On the host there is no timer, so
    // the loop approximates the tick with a sleep.
    loop {
        #[cfg(target_os = "espidf")]
        std::thread::sleep(std::time::Duration::from_millis(10));

        #[cfg(not(target_os = "espidf"))]
        {
            std::thread::sleep(std::time::Duration::from_millis(u64::from(
                config.control_tick_interval_ms,
            )));
            events::push_event(Event::ControlTick);
        }

        events::drain_sorted(|event| match event {
            Event::ControlTick => {
                service.tick(&counters, &mut hw, &mut log_sink);
            }
            Event::StartStopPressed | Event::ResetPressed => {
                service.handle_event(event, &mut counters, &mut log_sink);
            }
        });
    }
}
