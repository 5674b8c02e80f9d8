//! `From` impls mapping the TOML schema onto runtime config.

use crate::config::LinkCfg;

impl From<&txlink_config::Timing> for LinkCfg {
    fn from(t: &txlink_config::Timing) -> Self {
        Self {
            poll_interval_s: t.poll_interval_s,
            zero_thresh: t.zero_thresh,
        }
    }
}
