//! State handlers and the alarm predicates that drive them.
//!
//! Three modes:
//!
//! - **Stop** — line halted by the operator; counters keep accumulating in
//!   hardware but nothing is evaluated.
//! - **Run** — normal production; the three alarm predicates are checked
//!   every tick and any firing one moves the line to Alarm.
//! - **Alarm** — a fault condition is standing; the line keeps producing
//!   and returns to Run on the first tick where no predicate fires.
//!
//! Operator start/stop never passes through these handlers — the control
//! loop forces those transitions directly, so a stop request always wins.

use core::fmt;

use log::{info, warn};

use super::context::LineContext;
use super::{Mode, StateDescriptor};

/// Which alarm predicate fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmCause {
    /// No accepted unit for at least the configured idle timeout.
    IdleTimeout,
    /// Cumulative reject percentage above the configured maximum.
    RejectRate,
    /// Trailing-minute throughput below the configured minimum.
    LowThroughput,
}

impl fmt::Display for AlarmCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IdleTimeout => write!(f, "idle timeout"),
            Self::RejectRate => write!(f, "reject rate"),
            Self::LowThroughput => write!(f, "low throughput"),
        }
    }
}

/// Evaluate the alarm predicates in priority order.
///
/// The throughput check is guarded by a small absolute minimum of accepted
/// units so a freshly started line is not flagged before the trailing
/// window has anything in it.
pub fn alarm_condition(ctx: &LineContext) -> Option<AlarmCause> {
    let cfg = &ctx.config;
    let status = &ctx.status;

    if ctx.idle_secs() >= cfg.idle_timeout_secs {
        return Some(AlarmCause::IdleTimeout);
    }
    if status.reject_pct > cfg.max_reject_pct {
        return Some(AlarmCause::RejectRate);
    }
    if status.throughput_60s < cfg.min_throughput_per_minute && status.total_accepted > 10 {
        return Some(AlarmCause::LowThroughput);
    }
    None
}

/// Build the state table. Row order must match the `Mode` discriminants.
pub fn build_state_table() -> [StateDescriptor; Mode::COUNT] {
    [
        StateDescriptor {
            id: Mode::Stop,
            name: "STOP",
            on_enter: Some(stop_enter),
            on_exit: None,
            on_update: stop_update,
        },
        StateDescriptor {
            id: Mode::Run,
            name: "RUN",
            on_enter: Some(run_enter),
            on_exit: None,
            on_update: run_update,
        },
        StateDescriptor {
            id: Mode::Alarm,
            name: "ALARM",
            on_enter: Some(alarm_enter),
            on_exit: Some(alarm_exit),
            on_update: alarm_update,
        },
    ]
}

// ---------------------------------------------------------------------------
// Stop
// ---------------------------------------------------------------------------

fn stop_enter(ctx: &mut LineContext) {
    info!("line stopped");
    ctx.beeper.silence();
    ctx.active_alarm = None;
}

fn stop_update(_ctx: &mut LineContext) -> Option<Mode> {
    // Nothing is evaluated while stopped; only the operator leaves Stop.
    None
}

// ---------------------------------------------------------------------------
// Run
// ---------------------------------------------------------------------------

fn run_enter(ctx: &mut LineContext) {
    info!(
        "line running: batch {} ({}/{} units)",
        ctx.batch.id, ctx.batch.current_qty, ctx.batch.target_qty
    );
}

fn run_update(ctx: &mut LineContext) -> Option<Mode> {
    alarm_condition(ctx).map(|cause| {
        ctx.active_alarm = Some(cause);
        Mode::Alarm
    })
}

// ---------------------------------------------------------------------------
// Alarm
// ---------------------------------------------------------------------------

fn alarm_enter(ctx: &mut LineContext) {
    let cause = ctx.active_alarm.unwrap_or(AlarmCause::IdleTimeout);
    warn!(
        "alarm raised ({cause}): throughput {}/min, rejects {}%, idle {}s",
        ctx.status.throughput_60s,
        ctx.status.reject_pct,
        ctx.idle_secs()
    );
    ctx.beeper.arm(ctx.config.alarm_beeps, ctx.elapsed_secs);
}

fn alarm_exit(ctx: &mut LineContext) {
    ctx.beeper.silence();
    ctx.active_alarm = None;
}

fn alarm_update(ctx: &mut LineContext) -> Option<Mode> {
    match alarm_condition(ctx) {
        Some(cause) => {
            // Track the dominant cause while the alarm stands; a cause
            // change does not re-arm the beeper.
            ctx.active_alarm = Some(cause);
            None
        }
        None => {
            info!("alarm cleared");
            Some(Mode::Run)
        }
    }
}
