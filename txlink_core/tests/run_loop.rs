//! Full-session tests: calibration, steady-state transmission, quit.

use std::sync::Arc;
use std::time::Duration;

use txlink_core::mocks::{ManualClock, RecordingSink, ScriptedController};
use txlink_core::{Bridge, LinkCfg, TxState};
use txlink_traits::RawSample;

fn sample(pitch: f32, roll: f32, yaw: f32, throttle: f32, switches: &[bool]) -> RawSample {
    RawSample {
        pitch,
        roll,
        yaw,
        throttle,
        switches: switches.to_vec(),
    }
}

fn centered(switches: &[bool]) -> RawSample {
    sample(0.0, 0.0, 0.0, 0.0, switches)
}

/// Minimal calibration prefix: switch on, switch off, ready gesture.
fn calibration_prefix() -> Vec<RawSample> {
    vec![
        centered(&[true, false]),
        centered(&[false, false]),
        sample(0.0, 0.0, 0.99, -0.99, &[false, false]),
    ]
}

fn quit_sample() -> RawSample {
    sample(0.0, 0.0, -0.99, -1.0, &[false, false])
}

#[test]
fn full_session_transmits_then_stops_cleanly() {
    let mut script = calibration_prefix();
    // Two flight iterations; the first is the canonical worked example:
    // raw (0.5, 0.3, 0.0, -0.99) must leave the link as (0.5, 0.0, -0.3, 0.0).
    script.push(sample(0.5, 0.3, 0.0, -0.99, &[false, false]));
    script.push(sample(0.0, -0.25, 0.4, 0.2, &[false, false]));
    script.push(quit_sample());
    // Trailing sample that must never be polled.
    script.push(centered(&[false, false]));

    let controller = ScriptedController::new(script);
    let controller_handle = controller.clone();
    let sink = RecordingSink::new();
    let sink_handle = sink.clone();
    let clock = ManualClock::new();
    let clock_handle = clock.clone();

    let mut bridge = Bridge::builder()
        .with_controller(controller)
        .with_sink(sink)
        .with_config(LinkCfg {
            poll_interval_s: 0.1,
            zero_thresh: 0.02,
        })
        .with_clock(Arc::new(clock))
        .build()
        .expect("build bridge");

    bridge.run().expect("session should end on the quit gesture");

    assert_eq!(bridge.state(), TxState::Stopped);
    assert_eq!(
        sink_handle.sent(),
        vec![(0.5, 0.0, -0.3, 0.0), (0.0, 0.4, 0.25, 0.6)]
    );
    assert_eq!(sink_handle.close_count(), 1);
    // No poll after the quit gesture.
    assert_eq!(controller_handle.remaining(), 1);
    // One sleep per transmitted iteration; the quit iteration returns
    // before sleeping and calibration polls never sleep.
    assert_eq!(
        clock_handle.total_slept(),
        2 * Duration::from_secs_f32(0.1)
    );
}

#[test]
fn calibration_walks_every_state_in_order() {
    let mut script = vec![
        // All-off before the cycle: holds the first state.
        centered(&[false, false]),
        centered(&[true, false]),
        centered(&[false, false]),
        // Ready gesture with a switch still on: must not arm.
        sample(0.0, 0.0, 0.99, -0.99, &[true, false]),
        sample(0.0, 0.0, 0.99, -0.99, &[false, false]),
    ];
    script.push(quit_sample());

    let controller = ScriptedController::new(script);
    let sink = RecordingSink::new();
    let sink_handle = sink.clone();

    let mut bridge = Bridge::builder()
        .with_controller(controller)
        .with_sink(sink)
        .with_clock(Arc::new(ManualClock::new()))
        .build()
        .expect("build bridge");

    bridge.calibrate().expect("calibration should complete");
    assert_eq!(bridge.state(), TxState::Running);
    // Calibration never touches the sink.
    assert!(sink_handle.sent().is_empty());
    assert_eq!(sink_handle.close_count(), 0);
}

#[test]
fn controller_failure_mid_run_is_fatal_and_releases_the_sink() {
    // Script ends without a quit gesture: the next poll fails.
    let mut script = calibration_prefix();
    script.push(sample(0.1, 0.0, 0.0, 0.0, &[false, false]));

    let controller = ScriptedController::new(script);
    let sink = RecordingSink::new();
    let sink_handle = sink.clone();

    let mut bridge = Bridge::builder()
        .with_controller(controller)
        .with_sink(sink)
        .with_clock(Arc::new(ManualClock::new()))
        .build()
        .expect("build bridge");

    let err = bridge.run().expect_err("exhausted script should abort");
    assert!(format!("{err:#}").contains("polling transmitter"));
    // Best-effort close on abort, still exactly once.
    assert_eq!(sink_handle.close_count(), 1);
}

#[test]
fn step_outside_the_run_state_is_an_error() {
    let controller = ScriptedController::new([]);
    let sink = RecordingSink::new();

    let mut bridge = Bridge::builder()
        .with_controller(controller)
        .with_sink(sink)
        .with_clock(Arc::new(ManualClock::new()))
        .build()
        .expect("build bridge");

    let err = bridge.step().expect_err("not calibrated yet");
    assert!(format!("{err}").contains("awaiting-switch-engage"));
}

#[test]
fn calibration_cannot_be_rerun_after_the_session() {
    let mut script = calibration_prefix();
    script.push(quit_sample());

    let controller = ScriptedController::new(script);
    let mut bridge = Bridge::builder()
        .with_controller(controller)
        .with_sink(RecordingSink::new())
        .with_clock(Arc::new(ManualClock::new()))
        .build()
        .expect("build bridge");

    bridge.run().expect("session runs to the quit gesture");
    let err = bridge.calibrate().expect_err("terminal state");
    assert!(format!("{err}").contains("stopped"));
}
