//! Runtime configuration for the bridge loop.
//!
//! These are the runtime structs used by `Bridge`. They are separate
//! from the TOML-deserialized schema in `txlink_config`; see
//! `conversions` for the mapping.

/// Loop pacing and rail-noise threshold.
#[derive(Debug, Clone, Copy)]
pub struct LinkCfg {
    /// Seconds between transmissions. Blocking sleep; a rate limiter,
    /// not a scheduling deadline, and not compensated for processing
    /// latency.
    pub poll_interval_s: f32,
    /// Readings within this fraction of a rail snap to the rail.
    pub zero_thresh: f32,
}

impl Default for LinkCfg {
    fn default() -> Self {
        Self {
            poll_interval_s: 0.1,
            zero_thresh: 0.02,
        }
    }
}

impl LinkCfg {
    /// Checked at build time; the config is immutable afterwards.
    pub(crate) fn validate(&self) -> Result<(), &'static str> {
        if !(self.poll_interval_s.is_finite() && self.poll_interval_s > 0.0) {
            return Err("poll_interval_s must be > 0");
        }
        if !(0.0..1.0).contains(&self.zero_thresh) {
            return Err("zero_thresh must be in [0, 1)");
        }
        Ok(())
    }
}
