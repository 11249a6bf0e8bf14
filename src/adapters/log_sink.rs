//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the logger (UART / USB-CDC in production, stdout in host tests).
//! A future supervisory-link adapter would implement the same trait.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(mode) => {
                info!("START | initial_mode={:?}", mode);
            }
            AppEvent::ModeChanged { from, to } => {
                info!("MODE  | {:?} -> {:?}", from, to);
            }
            AppEvent::AlarmRaised(cause) => {
                warn!("ALARM | raised: {cause}");
            }
            AppEvent::AlarmCleared => {
                info!("ALARM | cleared");
            }
            AppEvent::BatchCompleted { id, rejects } => {
                info!("BATCH | #{id} complete ({rejects} rejects)");
            }
            AppEvent::LineReset { batch_id } => {
                info!("RESET | batch #{batch_id} started");
            }
        }
    }
}
