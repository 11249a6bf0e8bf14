//! End-to-end controller scenarios against mock adapters.
//!
//! Each test drives the full service loop — counters in, panel frames and
//! events out — exactly as the firmware main loop would.

use linewatch::app::service::LineService;
use linewatch::config::LineConfig;
use linewatch::controls::DisplayMode;
use linewatch::events::Event;
use linewatch::fsm::states::AlarmCause;
use linewatch::fsm::Mode;

use crate::mock_hw::{MockCounters, MockHardware, RecordingSink};

/// Service started and switched to Run, with empty counters.
fn running_line() -> (LineService, MockCounters, MockHardware, RecordingSink) {
    let mut service = LineService::new(LineConfig::default());
    let mut counters = MockCounters::new();
    let hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    service.start(&mut sink);
    service.handle_event(Event::StartStopPressed, &mut counters, &mut sink);
    assert_eq!(service.mode(), Mode::Run);
    (service, counters, hw, sink)
}

#[test]
fn steady_production_completes_batch_at_tick_fifty() {
    let (mut service, mut counters, mut hw, mut sink) = running_line();

    // Two units per second against the default lot of 100.
    for tick in 1..=50u32 {
        counters.produce(2, 0);
        service.tick(&counters, &mut hw, &mut sink);

        if tick < 50 {
            assert!(!service.status().batch_completed, "early at tick {tick}");
        }
    }

    assert_eq!(sink.batch_completions(), vec![1]);
    assert!(service.status().batch_completed);
    assert_eq!(service.status().batch_qty, 100);
    assert!(hw.last_frame().done);
    assert_eq!(service.mode(), Mode::Run);
}

#[test]
fn slow_ramp_up_trips_and_clears_low_throughput_alarm() {
    let (mut service, mut counters, mut hw, mut sink) = running_line();

    // At 2 units/s the startup guard (10 accepted units) expires at tick 6
    // while the trailing window is still far below 30/min.
    for _ in 1..=5u32 {
        counters.produce(2, 0);
        service.tick(&counters, &mut hw, &mut sink);
        assert_eq!(service.mode(), Mode::Run);
    }

    counters.produce(2, 0);
    service.tick(&counters, &mut hw, &mut sink);
    assert_eq!(service.mode(), Mode::Alarm);
    assert_eq!(service.active_alarm(), Some(AlarmCause::LowThroughput));

    // The window fills as production continues; 30 units at tick 15.
    for _ in 7..=15u32 {
        counters.produce(2, 0);
        service.tick(&counters, &mut hw, &mut sink);
    }
    assert_eq!(service.mode(), Mode::Run);
    assert_eq!(sink.alarm_raised_count(), 1);
    assert_eq!(sink.alarm_cleared_count(), 1);
}

#[test]
fn reject_rate_alarm_with_cumulative_percentage() {
    let (mut service, mut counters, mut hw, mut sink) = running_line();

    // 80 accepted, 20 rejected in the first interval: 20/80 = 25 %.
    counters.produce(80, 20);
    service.tick(&counters, &mut hw, &mut sink);

    assert_eq!(service.status().reject_pct, 25);
    assert_eq!(service.status().throughput_60s, 80);
    assert_eq!(service.mode(), Mode::Alarm);
    assert_eq!(service.active_alarm(), Some(AlarmCause::RejectRate));
    assert!(hw.last_frame().fault);
}

#[test]
fn idle_line_alarms_on_tenth_second_and_beeps_three_times() {
    let (mut service, counters, mut hw, mut sink) = running_line();

    // No production at all after start.
    for _ in 1..=9u32 {
        service.tick(&counters, &mut hw, &mut sink);
        assert_eq!(service.mode(), Mode::Run);
    }

    service.tick(&counters, &mut hw, &mut sink); // tick 10
    assert_eq!(service.mode(), Mode::Alarm);
    assert_eq!(service.active_alarm(), Some(AlarmCause::IdleTimeout));
    assert_eq!(sink.alarm_raised_count(), 1);

    // Three beeps: the buzzer alternates once per second for six ticks,
    // then stays silent.
    for _ in 11..=16u32 {
        service.tick(&counters, &mut hw, &mut sink);
    }
    assert_eq!(
        hw.buzzer_tail(6),
        vec![true, false, true, false, true, false]
    );

    service.tick(&counters, &mut hw, &mut sink);
    assert!(!hw.last_frame().buzzer);
    assert_eq!(service.mode(), Mode::Alarm); // still idle, alarm stands
}

#[test]
fn reset_during_alarm_keeps_mode_then_clears_on_next_tick() {
    let (mut service, mut counters, mut hw, mut sink) = running_line();

    counters.produce(5, 0);
    service.tick(&counters, &mut hw, &mut sink);
    for _ in 2..=11u32 {
        service.tick(&counters, &mut hw, &mut sink);
    }
    assert_eq!(service.mode(), Mode::Alarm);

    service.handle_event(Event::ResetPressed, &mut counters, &mut sink);

    // Reset never changes the operating mode by itself.
    assert_eq!(service.mode(), Mode::Alarm);
    assert_eq!(service.status().batch_id, 2);
    assert_eq!(service.status().total_accepted, 0);
    assert_eq!(counters.accepted, 0);

    // With counters and idle reference re-seeded, the next evaluation
    // finds no standing condition and the alarm clears itself.
    service.tick(&counters, &mut hw, &mut sink);
    assert_eq!(service.mode(), Mode::Run);
    assert_eq!(sink.alarm_cleared_count(), 1);
}

#[test]
fn operator_stop_wins_over_standing_alarm() {
    let (mut service, mut counters, mut hw, mut sink) = running_line();

    counters.produce(80, 40); // 50 % rejects
    service.tick(&counters, &mut hw, &mut sink);
    assert_eq!(service.mode(), Mode::Alarm);

    service.handle_event(Event::StartStopPressed, &mut counters, &mut sink);
    assert_eq!(service.mode(), Mode::Stop);
    assert_eq!(sink.alarm_cleared_count(), 1);

    // Stopped: statistics freeze even though the counters keep moving.
    let frozen = service.status().total_accepted;
    counters.produce(10, 0);
    service.tick(&counters, &mut hw, &mut sink);
    assert_eq!(service.status().total_accepted, frozen);
    assert_eq!(service.mode(), Mode::Stop);
}

#[test]
fn restart_after_stop_does_not_trip_idle_alarm_immediately() {
    let (mut service, mut counters, mut hw, mut sink) = running_line();

    counters.produce(5, 0);
    service.tick(&counters, &mut hw, &mut sink);

    // Stop, wait well past the idle timeout, start again.
    service.handle_event(Event::StartStopPressed, &mut counters, &mut sink);
    for _ in 0..30 {
        service.tick(&counters, &mut hw, &mut sink);
    }
    service.handle_event(Event::StartStopPressed, &mut counters, &mut sink);
    assert_eq!(service.mode(), Mode::Run);

    // The idle clock restarts at the start press; the first few ticks must
    // not alarm.
    for _ in 0..5 {
        service.tick(&counters, &mut hw, &mut sink);
        assert_eq!(service.mode(), Mode::Run);
    }
}

#[test]
fn display_button_cycles_views_and_updates_readout() {
    let (mut service, counters, mut hw, mut sink) = running_line();

    service.tick(&counters, &mut hw, &mut sink);
    assert_eq!(hw.shown.last().unwrap().1, DisplayMode::Totals);

    hw.button_level = true;
    service.tick(&counters, &mut hw, &mut sink);
    assert_eq!(hw.shown.last().unwrap().1, DisplayMode::Throughput);

    // Held across a tick: no further cycling.
    service.tick(&counters, &mut hw, &mut sink);
    assert_eq!(hw.shown.last().unwrap().1, DisplayMode::Throughput);

    hw.button_level = false;
    service.tick(&counters, &mut hw, &mut sink);
    hw.button_level = true;
    service.tick(&counters, &mut hw, &mut sink);
    assert_eq!(hw.shown.last().unwrap().1, DisplayMode::Rejects);
}

#[test]
fn progress_stages_appear_on_panel_during_run() {
    let (mut service, mut counters, mut hw, mut sink) = running_line();

    // 60 of 100 units, healthy rate.
    counters.produce(60, 0);
    service.tick(&counters, &mut hw, &mut sink);
    assert_eq!(service.mode(), Mode::Run);

    // elapsed 1 → slow blink on-phase; 60 % lights stages 1 and 2.
    let frame = hw.last_frame();
    assert!(frame.run); // steady in Run regardless of blink
    assert!(frame.warn);
    assert!(!frame.fault);
    assert!(!frame.done);
}
