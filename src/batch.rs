//! Production batch tracking.
//!
//! A batch is a run toward a target accepted-unit quantity. Quantities are
//! absolute counter totals, not deltas, so the tracker is stateless with
//! respect to tick history — it only latches the one-shot completion edge.

use log::info;
use serde::{Deserialize, Serialize};

/// A tracked production batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Batch {
    /// Monotonically increasing identifier; survives `load`, advanced by
    /// [`Batch::begin_next`] on operator reset.
    pub id: u32,
    /// Accepted-unit quantity that completes the batch.
    pub target_qty: u32,
    /// Accepted units so far (absolute counter total).
    pub current_qty: u32,
    /// Rejected units so far (absolute counter total).
    pub current_rejects: u32,
    /// Latched once `current_qty` first reaches `target_qty`.
    pub completed: bool,
}

impl Batch {
    /// Create batch #1 with the given target.
    pub fn new(target_qty: u32) -> Self {
        Self {
            id: 1,
            target_qty,
            current_qty: 0,
            current_rejects: 0,
            completed: false,
        }
    }

    /// Begin a fresh run toward `target_qty`, keeping the batch id.
    pub fn load(&mut self, target_qty: u32) {
        self.target_qty = target_qty;
        self.current_qty = 0;
        self.current_rejects = 0;
        self.completed = false;
    }

    /// Operator reset: advance to the next batch id with the same target.
    pub fn begin_next(&mut self) {
        self.id = self.id.wrapping_add(1);
        let target = self.target_qty;
        self.load(target);
        info!("batch {} started (target {})", self.id, self.target_qty);
    }

    /// Ingest this tick's absolute totals.
    ///
    /// Returns `true` exactly once per batch lifetime — on the tick where
    /// `current_qty` first reaches the target. The indicator layer consumes
    /// the signal; `completed` stays latched until the next reset.
    pub fn update(&mut self, accepted_total: u32, rejected_total: u32) -> bool {
        self.current_qty = accepted_total;
        self.current_rejects = rejected_total;

        if accepted_total >= self.target_qty && !self.completed {
            self.completed = true;
            info!(
                "batch {} complete: {}/{} units ({} rejects)",
                self.id, self.current_qty, self.target_qty, self.current_rejects
            );
            return true;
        }
        false
    }

    /// Completion progress in percent (0–100); a zero target reads as 0.
    pub fn progress_pct(&self) -> u32 {
        if self.target_qty == 0 {
            return 0;
        }
        ((u64::from(self.current_qty) * 100) / u64::from(self.target_qty)).min(100) as u32
    }
}
