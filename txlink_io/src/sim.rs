//! Deterministic transmitter simulation.
//!
//! Produces one complete scripted session: the switch on/off cycle, the
//! ready gesture, a configurable number of flight samples on a triangle
//! waveform, then the quit gesture held forever. Lets `fly --sim` run a
//! whole session to a clean exit with no hardware attached.

use txlink_traits::{Controller, RawSample};

/// Polls spent with the switches engaged, then released.
const SWITCH_POLLS: usize = 3;
/// Polls spent holding the ready gesture.
const READY_POLLS: usize = 2;
/// Triangle waveform period, in polls.
const WAVE_PERIOD: usize = 16;

/// Scripted transmitter; every poll is deterministic in the poll count.
pub struct SimulatedController {
    step: usize,
    flight_samples: usize,
}

impl SimulatedController {
    pub fn new(flight_samples: usize) -> Self {
        Self {
            step: 0,
            flight_samples,
        }
    }

    /// Triangle wave in [-1, 1] with period `WAVE_PERIOD`.
    fn wave(i: usize) -> f32 {
        let phase = (i % WAVE_PERIOD) as f32 / WAVE_PERIOD as f32;
        if phase < 0.5 {
            4.0 * phase - 1.0
        } else {
            3.0 - 4.0 * phase
        }
    }

    fn sample_at(&self, step: usize) -> RawSample {
        let centered = |switches: Vec<bool>| RawSample {
            pitch: 0.0,
            roll: 0.0,
            yaw: 0.0,
            throttle: 0.0,
            switches,
        };

        if step < SWITCH_POLLS {
            return centered(vec![true, false]);
        }
        if step < 2 * SWITCH_POLLS {
            return centered(vec![false, false]);
        }
        if step < 2 * SWITCH_POLLS + READY_POLLS {
            // Noisy rails: full deflection never quite reaches ±1.0.
            return RawSample {
                yaw: 0.995,
                throttle: -0.995,
                ..centered(vec![false, false])
            };
        }

        let flight_step = step - 2 * SWITCH_POLLS - READY_POLLS;
        if flight_step < self.flight_samples {
            let w = Self::wave(flight_step);
            return RawSample {
                pitch: 0.6 * w,
                roll: -0.4 * w,
                yaw: 0.5 * w,
                throttle: 0.2 + 0.3 * w,
                switches: vec![flight_step % WAVE_PERIOD >= WAVE_PERIOD / 2, false],
            };
        }

        // Quit gesture, held until the bridge stops polling.
        RawSample {
            yaw: -0.995,
            throttle: -0.995,
            ..centered(vec![false, false])
        }
    }
}

impl Controller for SimulatedController {
    fn poll(&mut self) -> Result<RawSample, Box<dyn std::error::Error + Send + Sync>> {
        let sample = self.sample_at(self.step);
        self.step += 1;
        Ok(sample)
    }
}
