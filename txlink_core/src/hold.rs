//! The hold-override hook invoked on every running iteration.

use crate::demands::Demands;

/// Strategy invoked with the iteration's demands and the (alt-hold,
/// pos-hold) switch pair; returns the demands to transmit.
///
/// Injected at build time so an altitude-hold or position-hold control
/// law can replace the default without touching the driver. The hook
/// runs after the quit predicate, so it can never suppress the quit
/// gesture.
pub type HoldHook = Box<dyn FnMut(Demands, (bool, bool)) -> Demands + Send>;

/// Default hook: report the demands and switch pair, pass the demands
/// through unchanged.
pub fn default_hold() -> HoldHook {
    Box::new(|demands, (alt_hold, pos_hold)| {
        tracing::info!(
            pitch = demands.pitch,
            roll = demands.roll,
            yaw = demands.yaw,
            throttle = demands.throttle,
            alt_hold,
            pos_hold,
            "demands"
        );
        demands
    })
}
