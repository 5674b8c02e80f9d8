//! Opt-in bounded calibration waits (unbounded remains the default).

use std::sync::Arc;
use std::time::Duration;

use txlink_core::mocks::{ManualClock, RecordingSink, ScriptedController};
use txlink_core::{Bridge, TxState};
use txlink_traits::{Clock, Controller, RawSample};

fn centered() -> RawSample {
    RawSample {
        pitch: 0.0,
        roll: 0.0,
        yaw: 0.0,
        throttle: 0.0,
        switches: vec![false, false],
    }
}

/// Controller stuck at center sticks; each poll advances the simulated
/// clock the way a blocking 50 Hz device read would.
struct StuckController {
    clock: ManualClock,
}

impl Controller for StuckController {
    fn poll(&mut self) -> Result<RawSample, Box<dyn std::error::Error + Send + Sync>> {
        self.clock.sleep(Duration::from_millis(20));
        Ok(centered())
    }
}

#[test]
fn deadline_bounds_a_stuck_calibration_state() {
    let clock = ManualClock::new();
    let mut bridge = Bridge::builder()
        .with_controller(StuckController {
            clock: clock.clone(),
        })
        .with_sink(RecordingSink::new())
        .with_clock(Arc::new(clock))
        .build()
        .expect("build bridge");

    let err = bridge
        .calibrate_with_deadline(Some(Duration::from_millis(100)))
        .expect_err("stuck operator should time out");
    assert!(format!("{err}").contains("timed out"));
}

#[test]
fn unbounded_default_outlasts_a_slow_operator() {
    let mut script = vec![centered(); 200];
    script.push(RawSample {
        switches: vec![true, false],
        ..centered()
    });
    script.push(centered());
    script.push(RawSample {
        yaw: 0.99,
        throttle: -0.99,
        ..centered()
    });

    let mut bridge = Bridge::builder()
        .with_controller(ScriptedController::new(script))
        .with_sink(RecordingSink::new())
        .with_clock(Arc::new(ManualClock::new()))
        .build()
        .expect("build bridge");

    bridge.calibrate().expect("gesture eventually arrives");
    assert_eq!(bridge.state(), TxState::Running);
}
