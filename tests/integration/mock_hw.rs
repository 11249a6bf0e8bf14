//! Mock adapters for integration tests.
//!
//! Records every panel frame and display update so tests can assert on
//! the full output history without touching real GPIO registers.

use linewatch::app::events::{AppEvent, StatusSnapshot};
use linewatch::app::ports::{DisplayPort, EventSink, PanelPort, PulseCounterPort};
use linewatch::controls::DisplayMode;
use linewatch::panel::PanelFrame;

// ── Mock pulse counters ───────────────────────────────────────

/// Free-running counters the test advances by hand.
#[derive(Default)]
pub struct MockCounters {
    pub accepted: u32,
    pub rejected: u32,
}

#[allow(dead_code)]
impl MockCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate pulses arriving during one interval.
    pub fn produce(&mut self, accepted: u32, rejected: u32) {
        self.accepted += accepted;
        self.rejected += rejected;
    }
}

impl PulseCounterPort for MockCounters {
    fn accepted(&self) -> u32 {
        self.accepted
    }

    fn rejected(&self) -> u32 {
        self.rejected
    }

    fn reset_counters(&mut self) {
        self.accepted = 0;
        self.rejected = 0;
    }
}

// ── Mock panel + display ──────────────────────────────────────

/// Records applied frames and display updates; button level is test-set.
#[derive(Default)]
pub struct MockHardware {
    pub frames: Vec<PanelFrame>,
    pub button_level: bool,
    pub shown: Vec<(StatusSnapshot, DisplayMode)>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_frame(&self) -> PanelFrame {
        self.frames.last().copied().unwrap_or_default()
    }

    /// Buzzer levels over the last `n` frames, oldest first.
    pub fn buzzer_tail(&self, n: usize) -> Vec<bool> {
        let start = self.frames.len().saturating_sub(n);
        self.frames[start..].iter().map(|f| f.buzzer).collect()
    }
}

impl PanelPort for MockHardware {
    fn apply(&mut self, frame: &PanelFrame) {
        self.frames.push(*frame);
    }
}

impl DisplayPort for MockHardware {
    fn button_level(&mut self) -> bool {
        self.button_level
    }

    fn show(&mut self, status: &StatusSnapshot, mode: DisplayMode) {
        self.shown.push((*status, mode));
    }
}

// ── Recording event sink ──────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alarm_raised_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, AppEvent::AlarmRaised(_)))
            .count()
    }

    pub fn alarm_cleared_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, AppEvent::AlarmCleared))
            .count()
    }

    pub fn batch_completions(&self) -> Vec<u32> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::BatchCompleted { id, .. } => Some(*id),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
