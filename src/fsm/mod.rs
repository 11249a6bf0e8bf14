//! Function-pointer finite state machine engine.
//!
//! Classic embedded FSM pattern expressed in Rust:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  StateTable                                              │
//! │  ┌────────┬───────────┬──────────┬───────────────────┐   │
//! │  │ Mode   │ on_enter  │ on_exit  │ on_update         │   │
//! │  ├────────┼───────────┼──────────┼───────────────────┤   │
//! │  │ Stop   │ fn(ctx)   │ fn(ctx)  │ fn(ctx)->Option<> │   │
//! │  │ Run    │ fn(ctx)   │ fn(ctx)  │ fn(ctx)->Option<> │   │
//! │  │ Alarm  │ fn(ctx)   │ fn(ctx)  │ fn(ctx)->Option<> │   │
//! │  └────────┴───────────┴──────────┴───────────────────┘   │
//! ```
//!
//! Each control tick the engine calls `on_update` for the **current**
//! mode; `Some(next)` triggers `on_exit` → pointer update → `on_enter`.
//! The operator buttons bypass `on_update` entirely through
//! [`Fsm::force_transition`] — a stop or start request is never gated on
//! an alarm predicate.

pub mod context;
pub mod states;

use context::LineContext;
use log::info;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Operating mode of the production line.
/// Must stay in sync with the state table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Mode {
    /// Line stopped; no statistics or alarm evaluation.
    Stop = 0,
    /// Normal operation; alarm predicates evaluated each tick.
    Run = 1,
    /// Active operation with a standing fault condition.
    Alarm = 2,
}

impl Mode {
    /// Total number of modes — used to size the table array.
    pub const COUNT: usize = 3;

    /// Convert a `u8` index back to `Mode`.  Panics on out-of-range in
    /// debug builds; returns `Stop` in release (safe fallback).
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Stop,
            1 => Self::Run,
            2 => Self::Alarm,
            _ => {
                debug_assert!(false, "invalid mode index: {idx}");
                Self::Stop
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` and `on_exit` actions.
/// These run exactly once on each mode transition.
pub type StateActionFn = fn(&mut LineContext);

/// Signature for the per-tick update handler.
/// Returns `Some(next)` to trigger a transition, or `None` to stay.
pub type StateUpdateFn = fn(&mut LineContext) -> Option<Mode>;

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single mode.
/// Stored in a fixed-size array — no heap, no `dyn`.
pub struct StateDescriptor {
    pub id: Mode,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn>,
    pub on_exit: Option<StateActionFn>,
    pub on_update: StateUpdateFn,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The finite state machine engine.
///
/// Owns the state table (array of [`StateDescriptor`]) and walks it with
/// a mutable [`LineContext`] threaded through every handler call.
pub struct Fsm {
    /// Fixed-size table indexed by `Mode as usize`.
    table: [StateDescriptor; Mode::COUNT],
    /// Index of the currently active mode.
    current: usize,
    /// Monotonically increasing tick counter.
    tick_count: u64,
    /// Tick at which the current mode was entered.
    state_entry_tick: u64,
}

impl Fsm {
    /// Construct a new FSM with the given state table, starting in `initial`.
    pub fn new(table: [StateDescriptor; Mode::COUNT], initial: Mode) -> Self {
        Self {
            table,
            current: initial as usize,
            tick_count: 0,
            state_entry_tick: 0,
        }
    }

    /// Run the initial `on_enter` for the starting mode.
    /// Call once after construction, before the first `tick()`.
    pub fn start(&mut self, ctx: &mut LineContext) {
        info!("FSM starting in mode: {}", self.table[self.current].name);
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// Advance the FSM by one tick.
    pub fn tick(&mut self, ctx: &mut LineContext) {
        self.tick_count += 1;
        ctx.ticks_in_state = self.tick_count - self.state_entry_tick;

        let next = (self.table[self.current].on_update)(ctx);

        if let Some(next_id) = next {
            self.transition(next_id, ctx);
        }
    }

    /// Force an immediate transition (operator start/stop, regardless of
    /// what `on_update` would decide).
    pub fn force_transition(&mut self, next: Mode, ctx: &mut LineContext) {
        if next as usize != self.current {
            self.transition(next, ctx);
        }
    }

    /// The current mode.
    pub fn current_mode(&self) -> Mode {
        Mode::from_index(self.current)
    }

    /// How many ticks the FSM has been in the current mode.
    pub fn ticks_in_current_mode(&self) -> u64 {
        self.tick_count - self.state_entry_tick
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next_id: Mode, ctx: &mut LineContext) {
        let next_idx = next_id as usize;

        info!(
            "FSM transition: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        // Exit current mode
        if let Some(exit) = self.table[self.current].on_exit {
            exit(ctx);
        }

        // Update pointer and timing
        self.current = next_idx;
        self.state_entry_tick = self.tick_count;
        ctx.ticks_in_state = 0;

        // Enter new mode
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }
}
