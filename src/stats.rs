//! Rolling production statistics.
//!
//! Once per control tick (while the line is not stopped) the engine reads
//! the absolute counter values, derives the this-second accepted delta,
//! pushes it into a 60-slot circular history, and recomputes:
//!
//! - `throughput_60s` — the sum of all 60 slots, i.e. the trailing-minute
//!   production rate;
//! - `reject_pct` — cumulative floor(100·rejected/accepted), 0 when no
//!   unit has been accepted yet;
//! - the idle-timeout reference (`last_production_secs`), advanced on any
//!   tick that saw at least one accepted unit.
//!
//! Each slot is overwritten exactly once per elapsed second, so after 60
//! ticks every slot reflects data from within the last minute.

/// Number of one-second slots in the trailing window.
pub const HISTORY_SLOTS: usize = 60;

/// Derived per-tick statistics, stored in the shared line context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Absolute accepted-unit count since the last reset.
    pub total_accepted: u32,
    /// Absolute rejected-unit count since the last reset.
    pub total_rejected: u32,
    /// Sum of the last 60 one-second accepted deltas.
    pub throughput_60s: u32,
    /// Cumulative reject percentage, 0–100.
    pub reject_pct: u8,
}

/// Circular per-second history plus the derived statistics.
pub struct StatisticsEngine {
    /// Accepted-unit deltas for the trailing 60 seconds.
    history: [u32; HISTORY_SLOTS],
    /// Next slot to overwrite, in [0, 60).
    index: usize,
    /// Accepted counter value at the previous tick.
    prev_accepted: u32,
    /// Elapsed-seconds value of the last tick with production activity.
    last_production_secs: u32,
}

impl Default for StatisticsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl StatisticsEngine {
    pub fn new() -> Self {
        Self {
            history: [0; HISTORY_SLOTS],
            index: 0,
            prev_accepted: 0,
            last_production_secs: 0,
        }
    }

    /// Ingest one tick's absolute counter readings.
    ///
    /// `now_secs` is the elapsed-seconds counter at this tick. Counters
    /// free-run, so the delta uses wrapping subtraction — a 32-bit wrap
    /// yields one garbage slot that ages out of the window in 60 s.
    pub fn update(&mut self, accepted: u32, rejected: u32, now_secs: u32) -> StatsSnapshot {
        let delta = accepted.wrapping_sub(self.prev_accepted);
        self.prev_accepted = accepted;

        self.history[self.index] = delta;
        self.index = (self.index + 1) % HISTORY_SLOTS;

        if delta > 0 {
            self.last_production_secs = now_secs;
        }

        StatsSnapshot {
            total_accepted: accepted,
            total_rejected: rejected,
            throughput_60s: self.window_sum(),
            reject_pct: reject_pct(accepted, rejected),
        }
    }

    /// Sum of the trailing window. Summed in u64 and saturated so that the
    /// one garbage slot a counter wrap can produce never overflows the
    /// 32-bit throughput field.
    fn window_sum(&self) -> u32 {
        let sum: u64 = self.history.iter().map(|&d| u64::from(d)).sum();
        sum.min(u64::from(u32::MAX)) as u32
    }

    /// Seconds since the last accepted unit, relative to `now_secs`.
    pub fn idle_secs(&self, now_secs: u32) -> u32 {
        now_secs.saturating_sub(self.last_production_secs)
    }

    /// Elapsed-seconds value of the last tick with production activity.
    pub fn last_production_secs(&self) -> u32 {
        self.last_production_secs
    }

    /// Re-seed the idle reference (line start, or operator reset).
    pub fn mark_production(&mut self, now_secs: u32) {
        self.last_production_secs = now_secs;
    }

    /// Zero the history, write index, previous reading and idle reference.
    pub fn clear(&mut self) {
        self.history = [0; HISTORY_SLOTS];
        self.index = 0;
        self.prev_accepted = 0;
        self.last_production_secs = 0;
    }
}

/// Cumulative reject percentage: floor(100·rejected/accepted), defined as 0
/// when nothing has been accepted. The two gates count independently, so
/// the raw ratio can exceed 100 — the status field is a percentage and is
/// clamped accordingly.
pub fn reject_pct(accepted: u32, rejected: u32) -> u8 {
    if accepted == 0 {
        return 0;
    }
    let pct = (u64::from(rejected) * 100) / u64::from(accepted);
    pct.min(100) as u8
}
