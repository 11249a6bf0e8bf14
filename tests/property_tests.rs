//! Property and fuzz-style tests for robustness of the core data paths.
//!
//! Runs on host (x86_64) only — proptest is not available for ESP32
//! targets.  On ESP32, these tests are compiled out.

#![cfg(not(target_os = "espidf"))]

use linewatch::app::events::{AppEvent, StatusSnapshot};
use linewatch::app::ports::{DisplayPort, EventSink, PanelPort, PulseCounterPort};
use linewatch::app::service::LineService;
use linewatch::config::LineConfig;
use linewatch::controls::DisplayMode;
use linewatch::events::Event;
use linewatch::fsm::Mode;
use linewatch::panel::PanelFrame;
use linewatch::stats::{reject_pct, StatisticsEngine, HISTORY_SLOTS};
use proptest::prelude::*;

// ── Throughput window ─────────────────────────────────────────

proptest! {
    /// After any sequence of per-second deltas, the reported throughput
    /// equals the sum of the most recent 60 deltas.
    #[test]
    fn throughput_equals_trailing_sum(
        deltas in proptest::collection::vec(0u32..200, 1..200)
    ) {
        let mut eng = StatisticsEngine::new();
        let mut accepted: u32 = 0;
        let mut snap = Default::default();

        for (i, &d) in deltas.iter().enumerate() {
            accepted += d;
            snap = eng.update(accepted, 0, i as u32 + 1);
        }

        let tail_start = deltas.len().saturating_sub(HISTORY_SLOTS);
        let expected: u32 = deltas[tail_start..].iter().sum();
        prop_assert_eq!(snap.throughput_60s, expected);
    }

    /// The reject percentage is always in [0, 100] and matches integer
    /// floor division when the raw ratio is in range.
    #[test]
    fn reject_pct_bounded_and_floored(accepted in 0u32..=u32::MAX, rejected in 0u32..=u32::MAX) {
        let pct = reject_pct(accepted, rejected);
        prop_assert!(pct <= 100);
        if accepted > 0 {
            let raw = (u64::from(rejected) * 100) / u64::from(accepted);
            if raw <= 100 {
                prop_assert_eq!(u64::from(pct), raw);
            }
        } else {
            prop_assert_eq!(pct, 0);
        }
    }
}

// ── Service-level fuzzing ─────────────────────────────────────

#[derive(Default)]
struct FuzzCounters {
    accepted: u32,
    rejected: u32,
}

impl PulseCounterPort for FuzzCounters {
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

#[derive(Default)]
struct FuzzHw {
    last: PanelFrame,
}

impl PanelPort for FuzzHw {
    fn apply(&mut self, frame: &PanelFrame) {
        self.last = *frame;
    }
}

impl DisplayPort for FuzzHw {
    fn button_level(&mut self) -> bool {
        false
    }
    fn show(&mut self, _status: &StatusSnapshot, _mode: DisplayMode) {}
}

#[derive(Default)]
struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &AppEvent) {}
}

/// One fuzz step: optional button presses, then pulses, then a tick.
#[derive(Debug, Clone)]
struct Step {
    press_start_stop: bool,
    press_reset: bool,
    accepted: u32,
    rejected: u32,
}

fn arb_step() -> impl Strategy<Value = Step> {
    (any::<bool>(), any::<bool>(), 0u32..300, 0u32..100).prop_map(
        |(press_start_stop, press_reset, accepted, rejected)| Step {
            press_start_stop,
            press_reset,
            accepted,
            rejected,
        },
    )
}

proptest! {
    /// Arbitrary interleavings of button presses, pulse bursts and ticks
    /// never drive the controller into an inconsistent state: the mode is
    /// always one of the three, stopped statistics never move, and the
    /// panel only sounds the buzzer while an alarm is standing.
    #[test]
    fn random_operation_keeps_invariants(steps in proptest::collection::vec(arb_step(), 1..150)) {
        let mut service = LineService::new(LineConfig::default());
        let mut counters = FuzzCounters::default();
        let mut hw = FuzzHw::default();
        let mut sink = NullSink;
        service.start(&mut sink);

        for step in steps {
            if step.press_start_stop {
                service.handle_event(Event::StartStopPressed, &mut counters, &mut sink);
            }
            if step.press_reset {
                service.handle_event(Event::ResetPressed, &mut counters, &mut sink);
            }

            let stopped_total = service.status().total_accepted;
            let was_stopped = service.mode() == Mode::Stop;

            counters.accepted = counters.accepted.wrapping_add(step.accepted);
            counters.rejected = counters.rejected.wrapping_add(step.rejected);
            service.tick(&counters, &mut hw, &mut sink);

            let mode = service.mode();
            prop_assert!(matches!(mode, Mode::Stop | Mode::Run | Mode::Alarm));
            prop_assert!(service.status().reject_pct <= 100);

            if was_stopped {
                prop_assert_eq!(service.mode(), Mode::Stop);
                prop_assert_eq!(service.status().total_accepted, stopped_total);
            }
            if hw.last.buzzer {
                prop_assert_eq!(mode, Mode::Alarm);
            }
        }
    }
}
