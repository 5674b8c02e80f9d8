use std::thread;
use std::time::{Duration, Instant};

/// Monotonic clock abstraction for the link's pacing.
///
/// The control loop paces itself with a blocking sleep between
/// transmissions; implementations may simulate the passage of time for
/// deterministic tests.
pub trait Clock {
    fn now(&self) -> Instant;
    fn sleep(&self, d: Duration);
}

/// Real-time monotonic clock backed by `std::time::Instant`.
#[derive(Debug, Default, Clone, Copy)]
pub struct MonotonicClock;

impl MonotonicClock {
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl Clock for MonotonicClock {
    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }

    #[inline]
    fn sleep(&self, d: Duration) {
        if d.is_zero() {
            return;
        }
        thread::sleep(d);
    }
}


#[cfg(test)]
mod tests {
    use super::test_clock::TestClock;
    use super::*;

    #[test]
    fn test_clock_sleep_advances_without_blocking() {
        let clock = TestClock::new();
        let before = clock.now();
        clock.sleep(Duration::from_secs(3600));
        assert_eq!(clock.now() - before, Duration::from_secs(3600));
    }

    #[test]
    fn monotonic_clock_skips_zero_sleep() {
        let clock = MonotonicClock::new();
        let before = Instant::now();
        clock.sleep(Duration::ZERO);
        assert!(before.elapsed() < Duration::from_millis(50));
    }
}
