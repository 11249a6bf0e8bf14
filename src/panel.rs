//! Indicator panel rendering and buzzer sequencing.
//!
//! The panel is four independent boolean LED channels plus a buzzer,
//! recomputed from scratch every control tick — a pure function of mode,
//! batch progress and the shared blink phase. Channels are not mutually
//! exclusive: a completed batch keeps its blue LED lit through an alarm.
//!
//! | Channel | Progress stage (2s-on/2s-off blink) | Mode overlay          |
//! |---------|-------------------------------------|-----------------------|
//! | run     | ≥ 25 %                              | Run: steady on        |
//! | warn    | ≥ 50 %                              | Alarm: 1 Hz blink     |
//! | fault   | ≥ 75 %                              | Alarm: steady on      |
//! | done    | ≥ 100 % (steady)                    | completed: steady on  |
//!
//! The buzzer sequencer is armed on alarm entry with a fixed number of
//! on/off toggles and steps at most once per elapsed second; it alternates
//! by the parity of the remaining count and forces the output low the
//! moment the count reaches zero.

use crate::batch::Batch;
use crate::fsm::Mode;

/// One rendered frame of panel outputs, applied via
/// [`PanelPort`](crate::app::ports::PanelPort) after every tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelFrame {
    /// Green — running / progress stage 1.
    pub run: bool,
    /// Yellow — alarm warning / progress stage 2.
    pub warn: bool,
    /// Red — alarm fault / progress stage 3.
    pub fault: bool,
    /// Blue — batch complete.
    pub done: bool,
    /// Piezo buzzer level.
    pub buzzer: bool,
}

impl PanelFrame {
    /// Everything dark and silent.
    pub fn all_off() -> Self {
        Self::default()
    }
}

/// Render the panel for one tick.
///
/// `elapsed_secs` drives both blink cadences: the shared 1 Hz alarm phase
/// (`elapsed mod 2`) and the slower 0.25 Hz progress blink
/// (`elapsed mod 4 < 2`). `buzzer` is the sequencer output for this tick.
pub fn render(mode: Mode, batch: &Batch, elapsed_secs: u32, buzzer: bool) -> PanelFrame {
    let mut frame = PanelFrame::all_off();

    // Batch progress staging first, mode overlays OR on top.
    let slow_blink = elapsed_secs % 4 < 2;
    let progress = batch.progress_pct();
    if progress >= 25 {
        frame.run |= slow_blink;
    }
    if progress >= 50 {
        frame.warn |= slow_blink;
    }
    if progress >= 75 {
        frame.fault |= slow_blink;
    }
    if progress >= 100 {
        frame.done = true;
    }

    match mode {
        Mode::Stop => {} // progress staging only
        Mode::Run => {
            frame.run = true;
        }
        Mode::Alarm => {
            frame.warn |= elapsed_secs % 2 == 0;
            frame.fault = true;
        }
    }

    if batch.completed {
        frame.done = true;
    }

    frame.buzzer = buzzer;
    frame
}

// ───────────────────────────────────────────────────────────────
// Buzzer sequencer
// ───────────────────────────────────────────────────────────────

/// Counts down armed on/off toggles, one per elapsed second.
#[derive(Debug, Clone, Copy, Default)]
pub struct BeepSequencer {
    /// Remaining output toggles (2 per audible beep).
    toggles_remaining: u8,
    /// Elapsed-seconds value of the last toggle.
    last_toggle_secs: u32,
    /// Current buzzer level.
    output: bool,
}

impl BeepSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm `beeps` audible beeps (2 toggles each) starting after `now_secs`.
    pub fn arm(&mut self, beeps: u8, now_secs: u32) {
        self.toggles_remaining = beeps.saturating_mul(2);
        self.last_toggle_secs = now_secs;
    }

    /// Disarm and silence immediately.
    pub fn silence(&mut self) {
        self.toggles_remaining = 0;
        self.output = false;
    }

    /// Step the sequencer and return the buzzer level for this tick.
    ///
    /// While toggles remain, the output changes at most once per elapsed
    /// second: high when the remaining count is even, low when odd, and
    /// forced low the instant the count reaches zero.
    pub fn tick(&mut self, now_secs: u32) -> bool {
        if self.toggles_remaining > 0 && now_secs.wrapping_sub(self.last_toggle_secs) >= 1 {
            self.output = self.toggles_remaining % 2 == 0;
            self.toggles_remaining -= 1;
            self.last_toggle_secs = now_secs;
            if self.toggles_remaining == 0 {
                self.output = false;
            }
        }
        self.output
    }

    /// Remaining toggles (diagnostics and tests).
    pub fn toggles_remaining(&self) -> u8 {
        self.toggles_remaining
    }
}
