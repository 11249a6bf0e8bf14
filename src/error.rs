//! Unified error types for the LineWatch firmware.
//!
//! The controller core has no recoverable-error taxonomy: every input is a
//! trusted hardware signal, and the alarm predicates are operating states
//! signalled through `Mode::Alarm`, not failures. What remains is the thin
//! set of fallible operations at the edges — peripheral bring-up and
//! configuration validation — funnelled into one `Copy` enum so the entry
//! point's error handling stays uniform.

use core::fmt;

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Peripheral initialisation failed.
    Init(&'static str),
    /// Configuration is invalid (e.g. reject threshold above 100 %).
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;

/// Range-check a configuration before applying it at runtime.
///
/// Thresholds are operator-tunable, so a bad value must be rejected at the
/// boundary rather than clamped silently inside the state machine.
pub fn validate_config(config: &crate::config::LineConfig) -> Result<()> {
    if config.max_reject_pct > 100 {
        return Err(Error::Config("max_reject_pct above 100"));
    }
    if config.idle_timeout_secs == 0 {
        return Err(Error::Config("idle_timeout_secs must be non-zero"));
    }
    if config.control_tick_interval_ms == 0 {
        return Err(Error::Config("control_tick_interval_ms must be non-zero"));
    }
    Ok(())
}
