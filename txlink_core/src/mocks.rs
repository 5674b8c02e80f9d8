//! Test and helper mocks for txlink_core.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use txlink_traits::clock::Clock;
use txlink_traits::{Controller, RawSample, Sink};

/// Controller replaying a scripted sample sequence; errors once the
/// script runs dry. Clones share the queue, so a test can keep a handle
/// and check how much of the script was consumed.
#[derive(Clone)]
pub struct ScriptedController {
    samples: Arc<Mutex<VecDeque<RawSample>>>,
}

impl ScriptedController {
    pub fn new(samples: impl IntoIterator<Item = RawSample>) -> Self {
        Self {
            samples: Arc::new(Mutex::new(samples.into_iter().collect())),
        }
    }

    /// Samples not yet consumed by `poll`.
    pub fn remaining(&self) -> usize {
        self.samples.lock().map(|q| q.len()).unwrap_or(0)
    }
}

impl Controller for ScriptedController {
    fn poll(&mut self) -> Result<RawSample, Box<dyn std::error::Error + Send + Sync>> {
        self.samples
            .lock()
            .ok()
            .and_then(|mut q| q.pop_front())
            .ok_or_else(|| {
                Box::new(std::io::Error::other("script exhausted"))
                    as Box<dyn std::error::Error + Send + Sync>
            })
    }
}

/// Sink spy recording every transmitted tuple and close call.
#[derive(Default, Clone)]
pub struct RecordingSink {
    pub sent: Arc<Mutex<Vec<(f32, f32, f32, f32)>>>,
    pub closes: Arc<Mutex<u32>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<(f32, f32, f32, f32)> {
        self.sent.lock().map(|v| v.clone()).unwrap_or_default()
    }

    pub fn close_count(&self) -> u32 {
        self.closes.lock().map(|c| *c).unwrap_or(0)
    }
}

impl Sink for RecordingSink {
    fn set(
        &mut self,
        pitch: f32,
        yaw: f32,
        roll: f32,
        throttle: f32,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if let Ok(mut v) = self.sent.lock() {
            v.push((pitch, yaw, roll, throttle));
        }
        Ok(())
    }

    fn close(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if let Ok(mut c) = self.closes.lock() {
            *c += 1;
        }
        Ok(())
    }
}

/// Sink that accepts everything and records nothing.
pub struct NullSink;

impl Sink for NullSink {
    fn set(
        &mut self,
        _pitch: f32,
        _yaw: f32,
        _roll: f32,
        _throttle: f32,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Ok(())
    }

    fn close(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Ok(())
    }
}

/// Clock that never blocks: `sleep` advances simulated time and records
/// the total requested.
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    slept: Arc<Mutex<Duration>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            slept: Arc::new(Mutex::new(Duration::ZERO)),
        }
    }

    /// Total sleep time requested so far.
    pub fn total_slept(&self) -> Duration {
        self.slept.lock().map(|d| *d).unwrap_or(Duration::ZERO)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.total_slept()
    }

    fn sleep(&self, d: Duration) {
        if let Ok(mut slept) = self.slept.lock() {
            *slept = slept.saturating_add(d);
        }
    }
}
