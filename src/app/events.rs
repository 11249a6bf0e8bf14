//! Outbound application events.
//!
//! The [`LineService`](super::service::LineService) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  Adapters on the
//! other side decide what to do with them — log to serial, publish to a
//! supervisory system, etc.

use serde::{Deserialize, Serialize};

use crate::fsm::states::AlarmCause;
use crate::fsm::Mode;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The service has started (carries initial mode).
    Started(Mode),

    /// The line changed operating mode.
    ModeChanged { from: Mode, to: Mode },

    /// An alarm predicate fired and the line entered Alarm.
    AlarmRaised(AlarmCause),

    /// All alarm conditions cleared; the line returned to Run.
    AlarmCleared,

    /// The current batch reached its target quantity.
    BatchCompleted { id: u32, rejects: u32 },

    /// Operator reset: counters zeroed, next batch started.
    LineReset { batch_id: u32 },
}

/// A point-in-time status snapshot suitable for logging, display or
/// transmission.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub mode: Mode,
    pub total_accepted: u32,
    pub total_rejected: u32,
    pub throughput_60s: u32,
    pub reject_pct: u8,
    pub batch_id: u32,
    pub batch_qty: u32,
    pub batch_target: u32,
    pub batch_completed: bool,
}
