//! Hardware drivers: ISR-debounced buttons, the esp_timer timebase, raw
//! GPIO init and the indicator panel.

pub mod button;
pub mod hw_init;
pub mod hw_timer;
pub mod panel_gpio;
