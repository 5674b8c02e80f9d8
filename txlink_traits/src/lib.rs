pub mod clock;

pub use clock::{Clock, MonotonicClock};

/// One reading of the transmitter sticks and switches.
///
/// Produced fresh by every [`Controller::poll`] call and consumed by the
/// iteration that read it. Axis values are normalized to [-1, 1]; switch
/// order is preserved exactly as read from the device.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSample {
    pub pitch: f32,
    pub roll: f32,
    pub yaw: f32,
    pub throttle: f32,
    pub switches: Vec<bool>,
}

impl RawSample {
    /// The alt-hold and pos-hold switches (bank positions 0 and 1).
    /// Positions missing from a narrow bank read as off.
    pub fn hold_switches(&self) -> (bool, bool) {
        (
            self.switches.first().copied().unwrap_or(false),
            self.switches.get(1).copied().unwrap_or(false),
        )
    }

    /// True when at least one switch in the bank is on.
    pub fn any_switch(&self) -> bool {
        self.switches.iter().any(|&s| s)
    }
}

/// A cabled R/C transmitter.
///
/// `poll` blocks for one fresh sample and must be safe to call
/// repeatedly. Construction failure (no transmitter attached) is the
/// implementor's concern and is reported once at startup.
pub trait Controller {
    fn poll(&mut self) -> Result<RawSample, Box<dyn std::error::Error + Send + Sync>>;
}

impl<T: Controller + ?Sized> Controller for Box<T> {
    fn poll(&mut self) -> Result<RawSample, Box<dyn std::error::Error + Send + Sync>> {
        (**self).poll()
    }
}

/// The datagram transport delivering demands to the ground-control
/// station. Channel values arrive already mapped to the transport's
/// sign/order convention; the wire format is the implementor's own.
pub trait Sink {
    fn set(
        &mut self,
        pitch: f32,
        yaw: f32,
        roll: f32,
        throttle: f32,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Release the transport. Called exactly once, at session end.
    fn close(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

#[cfg(test)]
mod tests {
    use super::RawSample;

    #[test]
    fn hold_switches_reads_first_two_positions() {
        let s = RawSample {
            pitch: 0.0,
            roll: 0.0,
            yaw: 0.0,
            throttle: 0.0,
            switches: vec![true, false, true],
        };
        assert_eq!(s.hold_switches(), (true, false));
    }

    #[test]
    fn hold_switches_tolerates_narrow_bank() {
        let s = RawSample {
            pitch: 0.0,
            roll: 0.0,
            yaw: 0.0,
            throttle: 0.0,
            switches: vec![true],
        };
        assert_eq!(s.hold_switches(), (true, false));
    }

    #[test]
    fn any_switch_is_false_for_all_off() {
        let s = RawSample {
            pitch: 0.0,
            roll: 0.0,
            yaw: 0.0,
            throttle: 0.0,
            switches: vec![false, false],
        };
        assert!(!s.any_switch());
    }
}
