//! Application service — the hexagonal core.
//!
//! [`LineService`] owns the FSM, the statistics engine, the batch tracker
//! and the shared context.  All I/O flows through port traits injected at
//! call sites, making the entire service testable with mock adapters.
//!
//! ```text
//! PulseCounterPort ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                      │       LineService        │
//!      PanelPort  ◀────│  FSM · Stats · Batch     │
//!     DisplayPort ◀───▶└──────────────────────────┘
//! ```

use log::info;

use crate::config::LineConfig;
use crate::controls::{DisplayButton, DisplayMode};
use crate::events::Event;
use crate::fsm::context::LineContext;
use crate::fsm::states::{build_state_table, AlarmCause};
use crate::fsm::{Fsm, Mode};
use crate::panel;
use crate::stats::StatisticsEngine;

use super::events::{AppEvent, StatusSnapshot};
use super::ports::{DisplayPort, EventSink, PanelPort, PulseCounterPort};

// ───────────────────────────────────────────────────────────────
// LineService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct LineService {
    fsm: Fsm,
    ctx: LineContext,
    stats: StatisticsEngine,
    display_button: DisplayButton,
    display_mode: DisplayMode,
    /// Ticks executed since startup; at a 1 s tick this is also the
    /// elapsed-seconds clock.
    tick_count: u64,
}

impl LineService {
    /// Construct the service from configuration.
    ///
    /// Does **not** start the FSM — call [`start`](Self::start) next.
    pub fn new(config: LineConfig) -> Self {
        let ctx = LineContext::new(config);
        let fsm = Fsm::new(build_state_table(), Mode::Stop);
        Self {
            fsm,
            ctx,
            stats: StatisticsEngine::new(),
            display_button: DisplayButton::new(),
            display_mode: DisplayMode::default(),
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Start the FSM in Stop and announce it.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        self.fsm.start(&mut self.ctx);
        sink.emit(&AppEvent::Started(self.fsm.current_mode()));
        info!("LineService started in {:?}", self.fsm.current_mode());
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full control cycle:
    /// read counters → statistics → FSM → batch → panel → display.
    pub fn tick(
        &mut self,
        counters: &impl PulseCounterPort,
        hw: &mut (impl PanelPort + DisplayPort),
        sink: &mut impl EventSink,
    ) {
        self.tick_count += 1;
        let now = self.elapsed_secs();
        self.ctx.elapsed_secs = now;
        let prev_mode = self.fsm.current_mode();

        // 1. Sample counters and refresh derived statistics.  Statistics
        //    run in every mode except Stop, so a standing alarm keeps
        //    being re-evaluated against live data and can clear itself.
        let accepted = counters.accepted();
        let rejected = counters.rejected();
        let mut batch_done = false;
        if prev_mode != Mode::Stop {
            self.ctx.status = self.stats.update(accepted, rejected, now);
            self.ctx.last_production_secs = self.stats.last_production_secs();
            batch_done = self.ctx.batch.update(accepted, rejected);
        }

        // 2. FSM tick (alarm predicates, mode transitions).
        self.fsm.tick(&mut self.ctx);
        let new_mode = self.fsm.current_mode();

        // 3. Render and apply the indicator panel.
        let buzzer = self.ctx.beeper.tick(now);
        let frame = panel::render(new_mode, &self.ctx.batch, now, buzzer);
        hw.apply(&frame);

        // 4. Polled display-mode button, then refresh the readout.
        if self.display_button.poll(hw.button_level()) {
            self.display_mode = self.display_mode.next();
            info!("display mode: {:?}", self.display_mode);
        }
        let status = self.status();
        hw.show(&status, self.display_mode);

        // 5. Emit outbound events for anything that changed this tick.
        if batch_done {
            sink.emit(&AppEvent::BatchCompleted {
                id: self.ctx.batch.id,
                rejects: self.ctx.batch.current_rejects,
            });
        }
        if new_mode != prev_mode {
            sink.emit(&AppEvent::ModeChanged {
                from: prev_mode,
                to: new_mode,
            });
            if new_mode == Mode::Alarm {
                let cause = self.ctx.active_alarm.unwrap_or(AlarmCause::IdleTimeout);
                sink.emit(&AppEvent::AlarmRaised(cause));
            } else if prev_mode == Mode::Alarm {
                sink.emit(&AppEvent::AlarmCleared);
            }
        }
    }

    // ── Operator event handling ───────────────────────────────

    /// Process a queued operator event (from the button ISRs).
    ///
    /// `ControlTick` is not handled here — the main loop dispatches it to
    /// [`tick`](Self::tick) because a tick needs the full port set.
    pub fn handle_event(
        &mut self,
        event: Event,
        counters: &mut impl PulseCounterPort,
        sink: &mut impl EventSink,
    ) {
        match event {
            Event::StartStopPressed => self.toggle_start_stop(sink),
            Event::ResetPressed => self.reset_line(counters, sink),
            Event::ControlTick => {}
        }
    }

    fn toggle_start_stop(&mut self, sink: &mut impl EventSink) {
        let from = self.fsm.current_mode();
        let to = match from {
            Mode::Stop => Mode::Run,
            // A stop request wins over everything, alarm included.
            Mode::Run | Mode::Alarm => Mode::Stop,
        };
        if to == Mode::Run {
            // Restart the idle clock so a line idle while stopped does not
            // trip the timeout on its first running tick.
            let now = self.elapsed_secs();
            self.stats.mark_production(now);
            self.ctx.last_production_secs = now;
        }
        self.fsm.force_transition(to, &mut self.ctx);
        sink.emit(&AppEvent::ModeChanged { from, to });
        if from == Mode::Alarm {
            sink.emit(&AppEvent::AlarmCleared);
        }
    }

    /// Operator reset: zero the counters and statistics and begin the next
    /// batch.  The operating mode is deliberately left unchanged — a reset
    /// during an alarm clears the data the alarm was computed from, and
    /// the next tick re-evaluates the predicates against the fresh state.
    fn reset_line(&mut self, counters: &mut impl PulseCounterPort, sink: &mut impl EventSink) {
        counters.reset_counters();
        self.stats.clear();
        let now = self.elapsed_secs();
        self.stats.mark_production(now);
        self.ctx.last_production_secs = now;
        self.ctx.status = Default::default();
        self.ctx.batch.begin_next();
        self.ctx.beeper.silence();
        info!("line reset: batch {} started", self.ctx.batch.id);
        sink.emit(&AppEvent::LineReset {
            batch_id: self.ctx.batch.id,
        });
    }

    // ── Queries ───────────────────────────────────────────────

    /// Build a status snapshot from the current context.
    pub fn status(&self) -> StatusSnapshot {
        StatusSnapshot {
            mode: self.fsm.current_mode(),
            total_accepted: self.ctx.status.total_accepted,
            total_rejected: self.ctx.status.total_rejected,
            throughput_60s: self.ctx.status.throughput_60s,
            reject_pct: self.ctx.status.reject_pct,
            batch_id: self.ctx.batch.id,
            batch_qty: self.ctx.batch.current_qty,
            batch_target: self.ctx.batch.target_qty,
            batch_completed: self.ctx.batch.completed,
        }
    }

    /// Current operating mode.
    pub fn mode(&self) -> Mode {
        self.fsm.current_mode()
    }

    /// Active display view.
    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    /// Total control ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Which predicate is holding the line in Alarm, if any.
    pub fn active_alarm(&self) -> Option<AlarmCause> {
        self.ctx.active_alarm
    }

    fn elapsed_secs(&self) -> u32 {
        // Tick interval is 1 s; a u32 of seconds lasts ~136 years.
        self.tick_count as u32
    }
}
