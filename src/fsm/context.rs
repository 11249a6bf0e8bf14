//! Shared mutable context threaded through every state handler.

use crate::batch::Batch;
use crate::config::LineConfig;
use crate::panel::BeepSequencer;
use crate::stats::StatsSnapshot;

use super::states::AlarmCause;

/// Everything a state handler may read or mutate.
///
/// The control loop refreshes the derived fields (`status`,
/// `elapsed_secs`, `last_production_secs`) before each FSM tick; the
/// handlers own `beeper` and `active_alarm`.
pub struct LineContext {
    /// Static line configuration (thresholds, targets).
    pub config: LineConfig,
    /// Latest derived statistics, refreshed each tick while not stopped.
    pub status: StatsSnapshot,
    /// Current batch run.
    pub batch: Batch,
    /// Seconds since the controller started.
    pub elapsed_secs: u32,
    /// Elapsed-seconds value of the last accepted unit.
    pub last_production_secs: u32,
    /// Ticks spent in the current mode (maintained by the engine).
    pub ticks_in_state: u64,
    /// Alarm buzzer sequencer, armed on alarm entry.
    pub beeper: BeepSequencer,
    /// Which predicate raised the standing alarm, if any.
    pub active_alarm: Option<AlarmCause>,
}

impl LineContext {
    pub fn new(config: LineConfig) -> Self {
        let batch = Batch::new(config.batch_target_qty);
        Self {
            config,
            status: StatsSnapshot::default(),
            batch,
            elapsed_secs: 0,
            last_production_secs: 0,
            ticks_in_state: 0,
            beeper: BeepSequencer::new(),
            active_alarm: None,
        }
    }

    /// Seconds without an accepted unit.
    pub fn idle_secs(&self) -> u32 {
        self.elapsed_secs.saturating_sub(self.last_production_secs)
    }
}
