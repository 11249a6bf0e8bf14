//! One-shot hardware peripheral initialization.
//!
//! Configures GPIO directions and interrupt routing using raw ESP-IDF
//! sys calls.  Called once from `main()` before the event loop starts.
//! On non-espidf targets, every function is a cfg-gated simulation stub.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use log::info;

#[cfg(target_os = "espidf")]
use crate::error::Error;
use crate::error::Result;
#[cfg(target_os = "espidf")]
use crate::pins;

// ── GPIO configuration ────────────────────────────────────────

/// Configure all inputs and outputs. Panel outputs start driven low.
#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<()> {
    // SAFETY: called once from main() before the event loop; single-threaded.
    unsafe {
        init_gpio_inputs()?;
        init_gpio_outputs()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<()> {
    info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_inputs() -> Result<()> {
    // Pulse gates: the optical sensors drive the line low between units.
    let pulse_pins = [pins::ACCEPTED_PULSE_GPIO, pins::REJECTED_PULSE_GPIO];
    for &pin in &pulse_pins {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_INPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_ENABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            log::error!("hw_init: pulse gate config failed (gpio={pin}, rc={ret})");
            return Err(Error::Init("pulse gate GPIO config failed"));
        }
    }

    // Buttons: active-low momentary switches with pull-ups.
    let button_pins = [
        pins::BTN_START_STOP_GPIO,
        pins::BTN_RESET_GPIO,
        pins::BTN_DISPLAY_GPIO,
    ];
    for &pin in &button_pins {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_INPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            log::error!("hw_init: button config failed (gpio={pin}, rc={ret})");
            return Err(Error::Init("button GPIO config failed"));
        }
    }

    info!("hw_init: GPIO inputs configured");
    Ok(())
}

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs() -> Result<()> {
    let output_pins = [
        pins::LED_RUN_GPIO,
        pins::LED_WARN_GPIO,
        pins::LED_FAULT_GPIO,
        pins::LED_DONE_GPIO,
        pins::BUZZER_GPIO,
    ];

    for &pin in &output_pins {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            log::error!("hw_init: output config failed (gpio={pin}, rc={ret})");
            return Err(Error::Init("panel GPIO config failed"));
        }
        unsafe { gpio_set_level(pin, 0) };
    }

    info!("hw_init: GPIO outputs configured");
    Ok(())
}

// ── Level access ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access on an
    // already-configured input pin; safe to call from main context.
    (unsafe { gpio_get_level(pin) }) != 0
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(_pin: i32) -> bool {
    true
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: gpio_set_level writes to an already-configured output pin;
    // pin was validated during init_gpio_outputs(). Main-loop only.
    unsafe {
        gpio_set_level(pin, u32::from(high));
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) {}

/// [`embedded_hal::digital::OutputPin`] over an already-configured raw
/// output.  Writes cannot fail once the pin is configured.
pub struct RawOutputPin {
    gpio: i32,
}

impl RawOutputPin {
    pub fn new(gpio: i32) -> Self {
        Self { gpio }
    }
}

impl embedded_hal::digital::ErrorType for RawOutputPin {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::OutputPin for RawOutputPin {
    fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
        gpio_write(self.gpio, false);
        Ok(())
    }

    fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
        gpio_write(self.gpio, true);
        Ok(())
    }
}

// ── GPIO ISR service ──────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe extern "C" fn accepted_gpio_isr(_arg: *mut core::ffi::c_void) {
    crate::counters::accepted_isr_handler();
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn rejected_gpio_isr(_arg: *mut core::ffi::c_void) {
    crate::counters::rejected_isr_handler();
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn start_stop_gpio_isr(_arg: *mut core::ffi::c_void) {
    // SAFETY: esp_timer_get_time is a RTC counter read; safe in ISR context.
    let now_ms = (unsafe { esp_idf_svc::sys::esp_timer_get_time() } / 1_000) as u32;
    crate::drivers::button::start_stop_isr_handler(now_ms);
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn reset_gpio_isr(_arg: *mut core::ffi::c_void) {
    // SAFETY: esp_timer_get_time is a RTC counter read; safe in ISR context.
    let now_ms = (unsafe { esp_idf_svc::sys::esp_timer_get_time() } / 1_000) as u32;
    crate::drivers::button::reset_isr_handler(now_ms);
}

/// Install the per-pin GPIO ISR service and register interrupt handlers.
/// Call after [`init_peripherals`] and before the event loop.
#[cfg(target_os = "espidf")]
pub fn init_isr_service() -> Result<()> {
    // SAFETY: gpio_install_isr_service is idempotent; ESP_ERR_INVALID_STATE
    // means it was already installed (acceptable). ISR handlers registered
    // below are static functions that only touch atomics and the lock-free
    // event queue.
    unsafe {
        let ret = gpio_install_isr_service(0);
        if ret != ESP_OK && ret != ESP_ERR_INVALID_STATE {
            log::error!("hw_init: ISR service install failed (rc={ret})");
            return Err(Error::Init("GPIO ISR service install failed"));
        }

        // Pulse gates: rising edge, one pulse per unit.
        gpio_set_intr_type(pins::ACCEPTED_PULSE_GPIO, gpio_int_type_t_GPIO_INTR_POSEDGE);
        gpio_isr_handler_add(
            pins::ACCEPTED_PULSE_GPIO,
            Some(accepted_gpio_isr),
            core::ptr::null_mut(),
        );
        gpio_intr_enable(pins::ACCEPTED_PULSE_GPIO);

        gpio_set_intr_type(pins::REJECTED_PULSE_GPIO, gpio_int_type_t_GPIO_INTR_POSEDGE);
        gpio_isr_handler_add(
            pins::REJECTED_PULSE_GPIO,
            Some(rejected_gpio_isr),
            core::ptr::null_mut(),
        );
        gpio_intr_enable(pins::REJECTED_PULSE_GPIO);

        // Buttons: falling edge (active-low with pull-up already configured).
        // The display-mode button is level-polled and gets no interrupt.
        gpio_set_intr_type(pins::BTN_START_STOP_GPIO, gpio_int_type_t_GPIO_INTR_NEGEDGE);
        gpio_isr_handler_add(
            pins::BTN_START_STOP_GPIO,
            Some(start_stop_gpio_isr),
            core::ptr::null_mut(),
        );
        gpio_intr_enable(pins::BTN_START_STOP_GPIO);

        gpio_set_intr_type(pins::BTN_RESET_GPIO, gpio_int_type_t_GPIO_INTR_NEGEDGE);
        gpio_isr_handler_add(pins::BTN_RESET_GPIO, Some(reset_gpio_isr), core::ptr::null_mut());
        gpio_intr_enable(pins::BTN_RESET_GPIO);

        info!("hw_init: ISR service installed (pulse×2, start/stop, reset)");
    }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_isr_service() -> Result<()> {
    info!("hw_init(sim): ISR service skipped");
    Ok(())
}
