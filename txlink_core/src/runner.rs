//! Session orchestration: assemble a bridge and run it to completion.

use std::time::Duration;

use txlink_traits::{Controller, Sink};

use crate::bridge::Bridge;
use crate::config::LinkCfg;
use crate::error::{LinkError, Result};
use crate::hold::HoldHook;

/// Parameters for a full session run.
#[derive(Debug, Default)]
pub struct RunParams {
    pub cfg: LinkCfg,
    /// Opt-in cap on each calibration wait; `None` waits forever.
    pub calibration_deadline: Option<Duration>,
}

/// Convert an optional seconds value from the CLI into a calibration
/// deadline, rejecting non-positive and non-finite input.
pub fn deadline_from_secs(secs: Option<f32>) -> Result<Option<Duration>> {
    match secs {
        None => Ok(None),
        Some(s) if s.is_finite() && s > 0.0 => Ok(Some(Duration::from_secs_f32(s))),
        Some(s) => Err(eyre::Report::new(LinkError::Config(format!(
            "calibration deadline must be a positive number of seconds, got {s}"
        )))),
    }
}

/// Run one session until the quit gesture, returning when the sink has
/// been released. The caller supplies the devices; `hold` of `None`
/// keeps the default report-and-pass-through hook.
pub fn run<C, K>(controller: C, sink: K, hold: Option<HoldHook>, params: RunParams) -> Result<()>
where
    C: Controller,
    K: Sink,
{
    let mut builder = Bridge::builder()
        .with_controller(controller)
        .with_sink(sink)
        .with_config(params.cfg);
    if let Some(hold) = hold {
        builder = builder.with_hold(hold);
    }
    let mut bridge = builder.build()?;

    tracing::info!(
        poll_interval_s = params.cfg.poll_interval_s,
        zero_thresh = params.cfg.zero_thresh,
        "link start"
    );
    bridge.run_with_deadline(params.calibration_deadline)
}
