//! Builder for `Bridge`.

use std::sync::Arc;
use std::time::Duration;

use txlink_traits::clock::{Clock, MonotonicClock};
use txlink_traits::{Controller, Sink};

use crate::bridge::Bridge;
use crate::config::LinkCfg;
use crate::error::{BuildError, Result};
use crate::hold::{HoldHook, default_hold};
use crate::state::GestureGate;

pub struct BridgeBuilder<C, K> {
    controller: Option<C>,
    sink: Option<K>,
    cfg: LinkCfg,
    clock: Option<Arc<dyn Clock + Send + Sync>>,
    hold: Option<HoldHook>,
}

impl<C: Controller, K: Sink> Default for BridgeBuilder<C, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Controller, K: Sink> BridgeBuilder<C, K> {
    pub fn new() -> Self {
        Self {
            controller: None,
            sink: None,
            cfg: LinkCfg::default(),
            clock: None,
            hold: None,
        }
    }

    pub fn with_controller(mut self, controller: C) -> Self {
        self.controller = Some(controller);
        self
    }

    pub fn with_sink(mut self, sink: K) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn with_config(mut self, cfg: LinkCfg) -> Self {
        self.cfg = cfg;
        self
    }

    /// Inject a clock; defaults to the real `MonotonicClock`.
    pub fn with_clock(mut self, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Inject a hold-override hook; defaults to report-and-pass-through.
    pub fn with_hold(mut self, hold: HoldHook) -> Self {
        self.hold = Some(hold);
        self
    }

    pub fn build(self) -> Result<Bridge<C, K>> {
        let controller = self
            .controller
            .ok_or_else(|| eyre::Report::new(BuildError::MissingController))?;
        let sink = self
            .sink
            .ok_or_else(|| eyre::Report::new(BuildError::MissingSink))?;
        self.cfg
            .validate()
            .map_err(|msg| eyre::Report::new(BuildError::InvalidConfig(msg)))?;

        Ok(Bridge {
            controller,
            sink,
            period: Duration::from_secs_f32(self.cfg.poll_interval_s),
            gate: GestureGate::new(self.cfg.zero_thresh),
            cfg: self.cfg,
            clock: self
                .clock
                .unwrap_or_else(|| Arc::new(MonotonicClock::new())),
            hold: self.hold.unwrap_or_else(default_hold),
            sink_open: true,
        })
    }
}
