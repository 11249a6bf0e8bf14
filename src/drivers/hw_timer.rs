//! Hardware timebase using ESP-IDF's esp_timer API.
//!
//! Creates the periodic control timer that pushes `Event::ControlTick`
//! into the lock-free SPSC queue on a fixed schedule, so the one-second
//! timebase never drifts with main-loop processing time.  On simulation
//! targets the main loop approximates the tick with a sleep instead.
//!
//! The timer callback executes in the ESP timer task context (not ISR),
//! so it can safely call `push_event()` which uses atomics.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::events::{push_event, Event};

#[cfg(target_os = "espidf")]
static mut CONTROL_TIMER: esp_timer_handle_t = core::ptr::null_mut();

/// SAFETY: CONTROL_TIMER is written once in `start_control_timer()` before
/// any timer callbacks fire.  Only called from the single main task.
#[cfg(target_os = "espidf")]
unsafe fn control_timer() -> esp_timer_handle_t {
    unsafe { CONTROL_TIMER }
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn control_tick_cb(_arg: *mut core::ffi::c_void) {
    push_event(Event::ControlTick);
}

/// Start the periodic control tick timer at `period_ms`.
#[cfg(target_os = "espidf")]
pub fn start_control_timer(period_ms: u32) {
    // SAFETY: CONTROL_TIMER is written here once at boot from the single
    // main-task context before any timer callbacks fire.  The callback
    // itself only calls push_event(), which is ISR-safe.
    unsafe {
        let args = esp_timer_create_args_t {
            callback: Some(control_tick_cb),
            arg: core::ptr::null_mut(),
            dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
            name: b"control\0".as_ptr() as *const _,
            skip_unhandled_events: false,
        };
        let ret = esp_timer_create(&args, &raw mut CONTROL_TIMER);
        if ret != ESP_OK {
            log::error!("hw_timer: control timer create failed (rc={ret}) — no ticks");
            return;
        }
        let ret = esp_timer_start_periodic(CONTROL_TIMER, u64::from(period_ms) * 1_000);
        if ret != ESP_OK {
            log::error!("hw_timer: control timer start failed (rc={ret})");
            return;
        }

        info!("hw_timer: control tick started ({period_ms} ms period)");
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn start_control_timer(_period_ms: u32) {
    log::info!("hw_timer(sim): ticks driven by the main-loop sleep");
}

/// Stop the control tick timer.
#[cfg(target_os = "espidf")]
pub fn stop_control_timer() {
    // SAFETY: control_timer() is a valid handle if start succeeded;
    // null-check prevents stopping a timer that was never created.
    unsafe {
        let ct = control_timer();
        if !ct.is_null() {
            esp_timer_stop(ct);
        }
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn stop_control_timer() {}
