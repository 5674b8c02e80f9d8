//! The bridge control loop: calibration gating, the steady-state
//! poll → normalize → hold → transmit cycle, and the quit transition.

use std::sync::Arc;
use std::time::Duration;

use eyre::WrapErr;
use txlink_traits::clock::Clock;
use txlink_traits::{Controller, RawSample, Sink};

use crate::config::LinkCfg;
use crate::demands::normalize;
use crate::error::{LinkError, Result};
use crate::hold::HoldHook;
use crate::io_error::{map_device_error, map_transport_error};
use crate::state::{GestureGate, TxState};

/// Outcome of a single running iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStatus {
    /// Demands transmitted; keep going.
    Running,
    /// Quit gesture observed; sink closed, session over.
    Stopped,
}

/// Owns the controller, the sink and the session state for one flight
/// session. Single-threaded and fully synchronous: every poll blocks,
/// and the loop suspends between iterations with a blocking sleep.
pub struct Bridge<C: Controller, K: Sink> {
    pub(crate) controller: C,
    pub(crate) sink: K,
    pub(crate) cfg: LinkCfg,
    pub(crate) clock: Arc<dyn Clock + Send + Sync>,
    pub(crate) gate: GestureGate,
    pub(crate) hold: HoldHook,
    pub(crate) sink_open: bool,
    pub(crate) period: Duration,
}

impl<C: Controller, K: Sink> core::fmt::Debug for Bridge<C, K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Bridge")
            .field("state", &self.gate.state())
            .field("poll_interval_s", &self.cfg.poll_interval_s)
            .field("zero_thresh", &self.cfg.zero_thresh)
            .field("sink_open", &self.sink_open)
            .finish()
    }
}

impl<C: Controller, K: Sink> Bridge<C, K> {
    pub fn builder() -> crate::builder::BridgeBuilder<C, K> {
        crate::builder::BridgeBuilder::new()
    }

    /// Current session state, owned by this bridge.
    pub fn state(&self) -> TxState {
        self.gate.state()
    }

    fn poll(&mut self) -> Result<RawSample> {
        self.controller
            .poll()
            .map_err(|e| eyre::Report::new(map_device_error(&*e)))
            .wrap_err("polling transmitter")
    }

    /// Run the operator through the pre-flight gesture sequence:
    /// switch cycle on/off, then throttle-down + yaw-right.
    ///
    /// Each transition is its own poll-until-satisfied loop with no
    /// shared timing budget. An operator who never gestures holds the
    /// sequence indefinitely.
    pub fn calibrate(&mut self) -> Result<()> {
        self.calibrate_with_deadline(None)
    }

    /// Bounded-wait variant: `deadline` caps each calibration state
    /// separately. `None` preserves the unbounded default.
    pub fn calibrate_with_deadline(&mut self, deadline: Option<Duration>) -> Result<()> {
        if self.gate.state() != TxState::AwaitingSwitchEngage {
            return Err(eyre::Report::new(LinkError::State(format!(
                "calibration already consumed (state: {})",
                self.gate.state()
            ))));
        }

        tracing::info!("please cycle the switches on and off");
        self.await_state(TxState::AwaitingSwitchRelease, deadline)?;
        self.await_state(TxState::AwaitingReadyGesture, deadline)?;

        tracing::info!("switches off, throttle down, yaw right to start");
        self.await_state(TxState::Running, deadline)?;

        tracing::info!("ready; throttle down, yaw left to quit");
        Ok(())
    }

    fn await_state(&mut self, target: TxState, deadline: Option<Duration>) -> Result<()> {
        let start = self.clock.now();
        loop {
            let raw = self.poll()?;
            if self.gate.observe(&raw) == target {
                return Ok(());
            }
            if let Some(limit) = deadline
                && self.clock.now().saturating_duration_since(start) >= limit
            {
                return Err(eyre::Report::new(LinkError::State(format!(
                    "calibration timed out waiting for {target}"
                ))));
            }
        }
    }

    /// One steady-state iteration: poll, normalize, check the quit
    /// gesture, run the hold hook, transmit, sleep.
    ///
    /// The quit predicate is evaluated before the hold hook runs, on
    /// this poll's normalized throttle and raw (pre-snap) yaw, so the
    /// hook never sees and cannot suppress the quit gesture.
    pub fn step(&mut self) -> Result<LinkStatus> {
        match self.gate.state() {
            TxState::Running => {}
            other => {
                return Err(eyre::Report::new(LinkError::State(format!(
                    "step outside the run state ({other})"
                ))));
            }
        }

        let raw = self.poll()?;
        let demands = normalize(&raw, self.cfg.zero_thresh);

        if self.gate.quit_requested(demands.throttle, raw.yaw) {
            self.gate.stop();
            self.close_sink()?;
            return Ok(LinkStatus::Stopped);
        }

        let demands = (self.hold)(demands, raw.hold_switches());

        // Transmit order is the station's: pitch, yaw, reversed roll,
        // unipolar throttle.
        self.sink
            .set(demands.pitch, demands.yaw, -demands.roll, demands.throttle)
            .map_err(|e| eyre::Report::new(map_transport_error(&*e)))
            .wrap_err("transmitting demands")?;

        self.clock.sleep(self.period);
        Ok(LinkStatus::Running)
    }

    /// Blocking session: calibration, then the transmit loop until the
    /// quit gesture. Any failure mid-run is fatal; there is no retry
    /// and no degraded operation.
    pub fn run(&mut self) -> Result<()> {
        self.run_with_deadline(None)
    }

    /// `run` with an opt-in per-state calibration deadline.
    pub fn run_with_deadline(&mut self, calibration_deadline: Option<Duration>) -> Result<()> {
        self.calibrate_with_deadline(calibration_deadline)?;
        loop {
            match self.step() {
                Ok(LinkStatus::Running) => continue,
                Ok(LinkStatus::Stopped) => {
                    tracing::info!("quit gesture observed; link closed");
                    return Ok(());
                }
                Err(e) => {
                    // The session is over either way; release the transport.
                    if let Err(close_err) = self.close_sink() {
                        tracing::warn!(error = %close_err, "sink close failed during abort");
                    }
                    tracing::error!(error = %e, "session aborted");
                    return Err(e);
                }
            }
        }
    }

    fn close_sink(&mut self) -> Result<()> {
        if !self.sink_open {
            return Ok(());
        }
        self.sink_open = false;
        self.sink
            .close()
            .map_err(|e| eyre::Report::new(map_transport_error(&*e)))
            .wrap_err("closing sink")
    }
}
